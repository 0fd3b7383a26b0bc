//! Cheapest-route and landed-cost calculator for ore shipments.
//!
//! The core is a pure three-stage pipeline over five in-memory relations:
//! route expansion (mine -> sea port, direct or via one rail-adjacent
//! transfer port), cost joining (departure wharves, freight lanes, arrival
//! wharves, surcharges) and group optimization (cheapest row per group).
//! Table storage lives behind the [`io`] module; the domain holds no state
//! across invocations.

pub mod domain;
pub mod io;

pub use domain::{compute_optimal_routes, CostCandidate, InputTables};
pub use io::{load_tables, write_results, TablePaths};
