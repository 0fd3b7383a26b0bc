//! Input relations and derived records for the route-cost pipeline.

use serde::{Deserialize, Serialize};

/// Transport mode of a pre-sea leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    Road,
    Rail,
}

/// Kind of a location in the fixed mine -> [rail port] -> sea port topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationKind {
    Mine,
    RailPort,
    SeaPort,
}

/// Whether a port record describes a loading (departure) or unloading
/// (arrival) facility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortRole {
    Departure,
    Arrival,
}

/// Family a wharf's unload method belongs to. A wharf constrained to one
/// family only accepts cargo that arrived by the matching transport mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnloadFamily {
    Road,
    Rail,
}

impl UnloadFamily {
    /// Classifies an unload-method string. Methods outside both families
    /// return `None` and therefore never pass the compatibility filter.
    pub fn classify(method: &str) -> Option<Self> {
        match method.trim() {
            "road-yard" | "road-direct" => Some(Self::Road),
            "rail-yard" | "rail-direct" => Some(Self::Rail),
            _ => None,
        }
    }
}

/// Ore purchase price at a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseRecord {
    pub mine: String,
    /// `None` when the source value failed to parse; the mine then
    /// contributes no candidates.
    pub purchase_price: Option<f64>,
}

/// One directed pre-sea transport edge (mine -> rail port, mine -> sea port,
/// or rail port -> sea port).
#[derive(Clone, Debug, PartialEq)]
pub struct TransferLeg {
    pub origin: String,
    pub origin_type: LocationKind,
    pub destination: String,
    pub destination_type: LocationKind,
    pub mode: TransportMode,
    pub price: Option<f64>,
}

/// Port/wharf metadata: capacity, fees, optional flat ex-wharf price and
/// unload-method constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct PortRecord {
    pub port_name: String,
    pub port_type: PortRole,
    pub wharf_name: String,
    pub max_tonnage: Option<f64>,
    /// Flat all-in ex-wharf price; 0 or absent means not offered.
    pub flat_price: Option<f64>,
    pub wharf_fee: f64,
    pub unload_mode: Option<String>,
}

impl PortRecord {
    /// Flat price actually on offer (absent and zero both mean "no offer").
    pub fn offered_flat_price(&self) -> Option<f64> {
        self.flat_price.filter(|price| *price != 0.0)
    }
}

/// Ocean-freight lane between a departure port/wharf and an arrival wharf.
#[derive(Clone, Debug, PartialEq)]
pub struct FreightLane {
    pub departure_port: String,
    /// Absent means the lane serves any wharf at the departure port.
    pub departure_wharf: Option<String>,
    pub arrival_port: String,
    pub arrival_wharf: String,
    /// Missing tonnage disqualifies the lane.
    pub ship_tonnage: Option<f64>,
    pub freight_fee: Option<f64>,
}

/// Short-haul surcharge for onward movement beyond an arrival wharf.
#[derive(Clone, Debug, PartialEq)]
pub struct SurchargeRecord {
    pub arrival_wharf: String,
    pub additional_destination: String,
    pub additional_fee: f64,
}

/// A mine -> sea-port candidate produced by the route expander.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundCandidate {
    pub mine: String,
    pub purchase_price: f64,
    pub mode1: TransportMode,
    pub road_price: f64,
    pub rail_price: f64,
    /// Rail-adjacent transfer port, when the route is not direct.
    pub rail_transfer_point: Option<String>,
    pub mode2: Option<TransportMode>,
    pub sea_port: String,
    /// Purchase price plus both transport buckets.
    pub to_sea_port_price: f64,
}

impl InboundCandidate {
    /// True when any leg of the inbound route used rail; drives the
    /// unload-family filter at the departure wharf.
    pub fn used_rail(&self) -> bool {
        self.mode1 == TransportMode::Rail || self.mode2 == Some(TransportMode::Rail)
    }
}

/// One fully joined cost row. Field order is the fixed output column order;
/// flat-price rows blank the inbound-route fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCandidate {
    pub purchase_price: Option<f64>,
    pub mine: Option<String>,
    pub mode1: Option<TransportMode>,
    pub road_price: f64,
    pub rail_transfer_point: Option<String>,
    pub mode2: Option<TransportMode>,
    pub rail_price: f64,
    pub sea_port: Option<String>,
    pub to_sea_port_price: Option<f64>,
    pub flat_price: Option<f64>,
    pub is_flat_price_shipment: bool,
    pub departure_port: String,
    pub departure_wharf: String,
    pub unload_mode: Option<String>,
    pub departure_wharf_fee: f64,
    pub arrival_port: String,
    pub arrival_wharf: String,
    pub arrival_wharf_fee: f64,
    pub ship_tonnage: f64,
    pub freight_fee: f64,
    /// Empty when no surcharge row matched the arrival wharf.
    pub additional_destination: String,
    pub additional_fee: f64,
    pub total_cost: f64,
}

/// The five input relations consumed by one pipeline invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputTables {
    pub purchases: Vec<PurchaseRecord>,
    pub transfer_legs: Vec<TransferLeg>,
    pub ports: Vec<PortRecord>,
    pub freight_lanes: Vec<FreightLane>,
    pub surcharges: Vec<SurchargeRecord>,
}
