//! Stage 3: keep the cheapest row per group.
//!
//! Standard rows group by `(mine, arrival wharf)`, flat-price rows by
//! `(departure port, arrival wharf)`. Ties are broken by a stable sort
//! ascending on total cost; the first row after the sort wins. Winners are
//! collected in group-key order so repeated runs produce identical output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;

use super::entities::CostCandidate;

/// Retains the minimum-total-cost row per group and returns the combined
/// result sorted ascending by total cost.
pub fn optimize(candidates: Vec<CostCandidate>) -> Vec<CostCandidate> {
    let total = candidates.len();
    let (flat, standard): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|row| row.is_flat_price_shipment);

    let mut winners = best_per_group(standard, |row| {
        (
            row.mine.clone().unwrap_or_default(),
            row.arrival_wharf.clone(),
        )
    });
    winners.extend(best_per_group(flat, |row| {
        (row.departure_port.clone(), row.arrival_wharf.clone())
    }));

    sort_by_total_cost(&mut winners);
    debug!("group optimization: {} candidate rows -> {} winners", total, winners.len());
    winners
}

fn best_per_group<K>(mut rows: Vec<CostCandidate>, key: K) -> Vec<CostCandidate>
where
    K: Fn(&CostCandidate) -> (String, String),
{
    sort_by_total_cost(&mut rows);
    let mut groups: BTreeMap<(String, String), CostCandidate> = BTreeMap::new();
    for row in rows {
        groups.entry(key(&row)).or_insert(row);
    }
    groups.into_values().collect()
}

fn sort_by_total_cost(rows: &mut [CostCandidate]) {
    rows.sort_by(|a, b| {
        a.total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(Ordering::Equal)
    });
}
