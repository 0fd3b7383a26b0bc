//! Domain logic for route expansion and landed-cost selection lives here.

pub mod cost_joiner;
pub mod entities;
pub mod optimizer;
pub mod pipeline;
pub mod route_expander;

pub use entities::{
    CostCandidate, FreightLane, InboundCandidate, InputTables, LocationKind, PortRecord, PortRole,
    PurchaseRecord, SurchargeRecord, TransferLeg, TransportMode, UnloadFamily,
};
pub use pipeline::compute_optimal_routes;
