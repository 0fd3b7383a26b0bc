//! Stage 2: join wharves, freight lanes and surcharges onto inbound
//! candidates.
//!
//! Every filter here is a silent exclusion: a combination that fails a join
//! or a capacity/compatibility check simply produces no output rows.

use log::debug;

use super::entities::{
    CostCandidate, FreightLane, InboundCandidate, PortRecord, PortRole, SurchargeRecord,
    UnloadFamily,
};

/// Joins each inbound candidate against departure wharves, freight lanes,
/// arrival wharves and surcharges, emitting a standard cost row per valid
/// combination plus a flat-price row wherever the departure wharf offers one.
pub fn join(
    inbound: &[InboundCandidate],
    ports: &[PortRecord],
    lanes: &[FreightLane],
    surcharges: &[SurchargeRecord],
) -> Vec<CostCandidate> {
    let departures: Vec<&PortRecord> = ports
        .iter()
        .filter(|port| port.port_type == PortRole::Departure)
        .collect();
    let arrivals: Vec<&PortRecord> = ports
        .iter()
        .filter(|port| port.port_type == PortRole::Arrival)
        .collect();

    let mut rows = Vec::new();

    for candidate in inbound {
        let used_rail = candidate.used_rail();

        for departure in departures
            .iter()
            .copied()
            .filter(|port| port.port_name == candidate.sea_port)
        {
            if !unload_compatible(departure, used_rail) {
                continue;
            }

            let matching_lanes = lanes.iter().filter(|lane| {
                lane.departure_port == candidate.sea_port
                    && lane
                        .departure_wharf
                        .as_ref()
                        .map(|wharf| *wharf == departure.wharf_name)
                        .unwrap_or(true)
            });

            for lane in matching_lanes {
                let Some(ship_tonnage) = lane.ship_tonnage else {
                    continue;
                };
                let Some(freight_fee) = lane.freight_fee else {
                    continue;
                };

                let arrival_candidates = arrivals.iter().copied().filter(|port| {
                    port.port_name == lane.arrival_port && port.wharf_name == lane.arrival_wharf
                });

                for arrival in arrival_candidates {
                    if !within_capacity(ship_tonnage, departure, arrival) {
                        continue;
                    }

                    let builder = CombinationBuilder {
                        inbound: candidate,
                        departure,
                        arrival,
                        ship_tonnage,
                        freight_fee,
                    };

                    let matched: Vec<&SurchargeRecord> = surcharges
                        .iter()
                        .filter(|s| s.arrival_wharf == arrival.wharf_name)
                        .collect();

                    if matched.is_empty() {
                        builder.emit(None, 0.0, &mut rows);
                    } else {
                        for surcharge in matched {
                            builder.emit(
                                Some(surcharge.additional_destination.as_str()),
                                surcharge.additional_fee,
                                &mut rows,
                            );
                        }
                    }
                }
            }
        }
    }

    debug!(
        "cost join: {} inbound candidates -> {} cost rows",
        inbound.len(),
        rows.len()
    );
    rows
}

/// A wharf with no unload-method constraint accepts anything; a constrained
/// one must belong to the family matching the inbound transport.
fn unload_compatible(departure: &PortRecord, used_rail: bool) -> bool {
    let Some(method) = departure.unload_mode.as_deref() else {
        return true;
    };
    match UnloadFamily::classify(method) {
        Some(UnloadFamily::Rail) => used_rail,
        Some(UnloadFamily::Road) => !used_rail,
        None => false,
    }
}

/// Both wharf capacities must be known and accommodate the ship.
fn within_capacity(ship_tonnage: f64, departure: &PortRecord, arrival: &PortRecord) -> bool {
    match (departure.max_tonnage, arrival.max_tonnage) {
        (Some(dep), Some(arr)) => ship_tonnage <= dep && ship_tonnage <= arr,
        _ => false,
    }
}

/// Shared field population for one inbound/departure/lane/arrival
/// combination; only the cost formula and the blanked inbound fields differ
/// between the standard and flat-price variants.
struct CombinationBuilder<'a> {
    inbound: &'a InboundCandidate,
    departure: &'a PortRecord,
    arrival: &'a PortRecord,
    ship_tonnage: f64,
    freight_fee: f64,
}

impl CombinationBuilder<'_> {
    fn emit(&self, destination: Option<&str>, surcharge_fee: f64, rows: &mut Vec<CostCandidate>) {
        rows.push(self.standard(destination, surcharge_fee));
        if let Some(flat_price) = self.departure.offered_flat_price() {
            rows.push(self.flat(flat_price, destination, surcharge_fee));
        }
    }

    fn standard(&self, destination: Option<&str>, surcharge_fee: f64) -> CostCandidate {
        let total_cost = self.inbound.to_sea_port_price
            + self.departure.wharf_fee
            + self.arrival.wharf_fee
            + self.freight_fee
            + surcharge_fee;
        CostCandidate {
            purchase_price: Some(self.inbound.purchase_price),
            mine: Some(self.inbound.mine.clone()),
            mode1: Some(self.inbound.mode1),
            road_price: self.inbound.road_price,
            rail_transfer_point: self.inbound.rail_transfer_point.clone(),
            mode2: self.inbound.mode2,
            rail_price: self.inbound.rail_price,
            sea_port: Some(self.inbound.sea_port.clone()),
            to_sea_port_price: Some(self.inbound.to_sea_port_price),
            flat_price: None,
            is_flat_price_shipment: false,
            total_cost,
            ..self.shipping_fields(destination, surcharge_fee)
        }
    }

    /// The flat price supersedes the inbound route entirely, so every
    /// route-to-sea field is blanked.
    fn flat(&self, flat_price: f64, destination: Option<&str>, surcharge_fee: f64) -> CostCandidate {
        let total_cost = flat_price
            + self.departure.wharf_fee
            + self.arrival.wharf_fee
            + self.freight_fee
            + surcharge_fee;
        CostCandidate {
            flat_price: Some(flat_price),
            is_flat_price_shipment: true,
            total_cost,
            ..self.shipping_fields(destination, surcharge_fee)
        }
    }

    fn shipping_fields(&self, destination: Option<&str>, surcharge_fee: f64) -> CostCandidate {
        CostCandidate {
            purchase_price: None,
            mine: None,
            mode1: None,
            road_price: 0.0,
            rail_transfer_point: None,
            mode2: None,
            rail_price: 0.0,
            sea_port: None,
            to_sea_port_price: None,
            flat_price: None,
            is_flat_price_shipment: false,
            departure_port: self.inbound.sea_port.clone(),
            departure_wharf: self.departure.wharf_name.clone(),
            unload_mode: self.departure.unload_mode.clone(),
            departure_wharf_fee: self.departure.wharf_fee,
            arrival_port: self.arrival.port_name.clone(),
            arrival_wharf: self.arrival.wharf_name.clone(),
            arrival_wharf_fee: self.arrival.wharf_fee,
            ship_tonnage: self.ship_tonnage,
            freight_fee: self.freight_fee,
            additional_destination: destination.unwrap_or_default().to_string(),
            additional_fee: surcharge_fee,
            total_cost: 0.0,
        }
    }
}
