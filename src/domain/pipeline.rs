//! Composition of the three pipeline stages.

use log::warn;

use super::cost_joiner;
use super::entities::{CostCandidate, InputTables};
use super::optimizer;
use super::route_expander;

/// Runs the full route-cost pipeline over the five input relations.
///
/// The computation is pure and total: schema validation happens when the
/// tables are deserialized, and every data-level mismatch inside the stages
/// only reduces the row count. An empty result is a valid outcome (no route
/// satisfied the constraints), reported via a warning, never an error.
pub fn compute_optimal_routes(tables: &InputTables) -> Vec<CostCandidate> {
    let inbound = route_expander::expand(&tables.purchases, &tables.transfer_legs);
    let candidates = cost_joiner::join(
        &inbound,
        &tables.ports,
        &tables.freight_lanes,
        &tables.surcharges,
    );
    let optimal = optimizer::optimize(candidates);

    if optimal.is_empty() {
        warn!("pipeline produced no rows: no mine/route combination satisfied the constraints");
    }
    optimal
}
