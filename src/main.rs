use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use ore_route_planner::{compute_optimal_routes, load_tables, write_results, TablePaths};

/// Compute the cheapest mine-to-wharf routes and landed costs from five
/// JSON reference tables.
#[derive(Debug, Parser)]
#[command(name = "ore-route-planner", version, about)]
struct Args {
    /// Purchase prices table (mine, purchasePrice)
    #[arg(long)]
    purchases: PathBuf,

    /// Pre-sea transport legs table
    #[arg(long)]
    transfers: PathBuf,

    /// Port/wharf metadata table
    #[arg(long)]
    ports: PathBuf,

    /// Ocean-freight lanes table
    #[arg(long)]
    freight: PathBuf,

    /// Short-haul surcharges table
    #[arg(long)]
    surcharges: PathBuf,

    /// Where to write the result table
    #[arg(short, long, default_value = "routes.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tables = load_tables(&TablePaths {
        purchases: args.purchases,
        transfer_legs: args.transfers,
        ports: args.ports,
        freight_lanes: args.freight,
        surcharges: args.surcharges,
    })
    .context("loading input tables")?;

    let results = compute_optimal_routes(&tables);
    info!("computed {} optimal route rows", results.len());

    write_results(&args.output, &results)
        .with_context(|| format!("writing results to {}", args.output.display()))?;
    println!("{} rows written to {}", results.len(), args.output.display());
    Ok(())
}
