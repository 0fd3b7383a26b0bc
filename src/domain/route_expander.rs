//! Stage 1: enumerate mine -> sea-port candidates.
//!
//! The topology is fixed at one optional transfer: a mine reaches a sea port
//! either directly or through exactly one rail-adjacent port. This is a
//! bounded two-level fan-out over the transfer-leg relation, not a graph
//! search.

use log::debug;

use super::entities::{
    InboundCandidate, LocationKind, PurchaseRecord, TransferLeg, TransportMode,
};

/// Expands each purchase record into all reachable sea-port candidates.
///
/// Mines with no outgoing leg, legs with unparseable prices, and transfer
/// ports with no onward sea-port leg are all skipped silently; they reduce
/// the candidate count, they are not errors.
pub fn expand(purchases: &[PurchaseRecord], legs: &[TransferLeg]) -> Vec<InboundCandidate> {
    let mut candidates = Vec::new();

    for purchase in purchases {
        let Some(purchase_price) = purchase.purchase_price else {
            continue;
        };

        let first_hops = legs.iter().filter(|leg| {
            leg.origin == purchase.mine && leg.origin_type == LocationKind::Mine
        });

        for first in first_hops {
            let Some(first_price) = first.price else {
                continue;
            };
            let (mut road_price, mut rail_price) = (0.0, 0.0);
            add_to_bucket(first.mode, first_price, &mut road_price, &mut rail_price);

            match first.destination_type {
                LocationKind::SeaPort => {
                    candidates.push(InboundCandidate {
                        mine: purchase.mine.clone(),
                        purchase_price,
                        mode1: first.mode,
                        road_price,
                        rail_price,
                        rail_transfer_point: None,
                        mode2: None,
                        sea_port: first.destination.clone(),
                        to_sea_port_price: purchase_price + road_price + rail_price,
                    });
                }
                LocationKind::RailPort => {
                    let second_hops = legs.iter().filter(|leg| {
                        leg.origin == first.destination
                            && leg.origin_type == LocationKind::RailPort
                            && leg.destination_type == LocationKind::SeaPort
                    });
                    for second in second_hops {
                        let Some(second_price) = second.price else {
                            continue;
                        };
                        // Each hop adds to the bucket of its own mode,
                        // independent of the other hop's mode.
                        let (mut road, mut rail) = (road_price, rail_price);
                        add_to_bucket(second.mode, second_price, &mut road, &mut rail);

                        candidates.push(InboundCandidate {
                            mine: purchase.mine.clone(),
                            purchase_price,
                            mode1: first.mode,
                            road_price: road,
                            rail_price: rail,
                            rail_transfer_point: Some(first.destination.clone()),
                            mode2: Some(second.mode),
                            sea_port: second.destination.clone(),
                            to_sea_port_price: purchase_price + road + rail,
                        });
                    }
                }
                LocationKind::Mine => {}
            }
        }
    }

    debug!(
        "route expansion: {} purchase records -> {} inbound candidates",
        purchases.len(),
        candidates.len()
    );
    candidates
}

fn add_to_bucket(mode: TransportMode, price: f64, road: &mut f64, rail: &mut f64) {
    match mode {
        TransportMode::Road => *road += price,
        TransportMode::Rail => *rail += price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(mine: &str, price: f64) -> PurchaseRecord {
        PurchaseRecord {
            mine: mine.into(),
            purchase_price: Some(price),
        }
    }

    fn leg(
        origin: &str,
        origin_type: LocationKind,
        destination: &str,
        destination_type: LocationKind,
        mode: TransportMode,
        price: f64,
    ) -> TransferLeg {
        TransferLeg {
            origin: origin.into(),
            origin_type,
            destination: destination.into(),
            destination_type,
            mode,
            price: Some(price),
        }
    }

    #[test]
    fn direct_road_leg_produces_one_candidate() {
        let candidates = expand(
            &[purchase("M", 100.0)],
            &[leg(
                "M",
                LocationKind::Mine,
                "S",
                LocationKind::SeaPort,
                TransportMode::Road,
                20.0,
            )],
        );

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.sea_port, "S");
        assert_eq!(c.road_price, 20.0);
        assert_eq!(c.rail_price, 0.0);
        assert_eq!(c.rail_transfer_point, None);
        assert_eq!(c.mode2, None);
        assert_eq!(c.to_sea_port_price, 120.0);
        assert!(!c.used_rail());
    }

    #[test]
    fn transfer_via_rail_port_accumulates_both_buckets() {
        let candidates = expand(
            &[purchase("M", 50.0)],
            &[
                leg(
                    "M",
                    LocationKind::Mine,
                    "R",
                    LocationKind::RailPort,
                    TransportMode::Road,
                    10.0,
                ),
                leg(
                    "R",
                    LocationKind::RailPort,
                    "S",
                    LocationKind::SeaPort,
                    TransportMode::Rail,
                    15.0,
                ),
            ],
        );

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.road_price, 10.0);
        assert_eq!(c.rail_price, 15.0);
        assert_eq!(c.to_sea_port_price, 75.0);
        assert_eq!(c.rail_transfer_point.as_deref(), Some("R"));
        assert_eq!(c.mode1, TransportMode::Road);
        assert_eq!(c.mode2, Some(TransportMode::Rail));
        assert!(c.used_rail());
    }

    #[test]
    fn transfer_port_without_onward_leg_is_dropped() {
        let candidates = expand(
            &[purchase("M", 50.0)],
            &[leg(
                "M",
                LocationKind::Mine,
                "R",
                LocationKind::RailPort,
                TransportMode::Road,
                10.0,
            )],
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn mine_without_legs_is_skipped() {
        let candidates = expand(
            &[purchase("M", 50.0)],
            &[leg(
                "Other",
                LocationKind::Mine,
                "S",
                LocationKind::SeaPort,
                TransportMode::Road,
                10.0,
            )],
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn multiple_legs_fan_out_per_mine() {
        let candidates = expand(
            &[purchase("M", 100.0)],
            &[
                leg(
                    "M",
                    LocationKind::Mine,
                    "S1",
                    LocationKind::SeaPort,
                    TransportMode::Road,
                    20.0,
                ),
                leg(
                    "M",
                    LocationKind::Mine,
                    "S2",
                    LocationKind::SeaPort,
                    TransportMode::Rail,
                    18.0,
                ),
            ],
        );

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].sea_port, "S1");
        assert_eq!(candidates[1].sea_port, "S2");
        assert_eq!(candidates[1].rail_price, 18.0);
        assert!(candidates[1].used_rail());
    }

    #[test]
    fn unparseable_prices_disqualify_rows() {
        let mut no_price_purchase = purchase("M", 0.0);
        no_price_purchase.purchase_price = None;
        let mut no_price_leg = leg(
            "M",
            LocationKind::Mine,
            "S",
            LocationKind::SeaPort,
            TransportMode::Road,
            0.0,
        );
        no_price_leg.price = None;

        assert!(expand(
            &[no_price_purchase],
            &[leg(
                "M",
                LocationKind::Mine,
                "S",
                LocationKind::SeaPort,
                TransportMode::Road,
                20.0,
            )],
        )
        .is_empty());
        assert!(expand(&[purchase("M", 100.0)], &[no_price_leg]).is_empty());
    }
}
