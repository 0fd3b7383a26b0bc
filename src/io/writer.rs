//! JSON result writer.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Error as SerdeError;
use thiserror::Error;

use crate::domain::CostCandidate;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

/// Persists the result table as a JSON array, preserving the fixed output
/// column order. An empty table is written as `[]`.
pub fn write_results(path: &Path, rows: &[CostCandidate]) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CostCandidate;

    #[test]
    fn writes_rows_with_fixed_column_order() {
        let row = CostCandidate {
            purchase_price: Some(100.0),
            mine: Some("M".into()),
            mode1: Some(crate::domain::TransportMode::Road),
            road_price: 20.0,
            rail_transfer_point: None,
            mode2: None,
            rail_price: 0.0,
            sea_port: Some("S".into()),
            to_sea_port_price: Some(120.0),
            flat_price: None,
            is_flat_price_shipment: false,
            departure_port: "S".into(),
            departure_wharf: "D1".into(),
            unload_mode: Some("road-direct".into()),
            departure_wharf_fee: 5.0,
            arrival_port: "P".into(),
            arrival_wharf: "W".into(),
            arrival_wharf_fee: 7.0,
            ship_tonnage: 8.0,
            freight_fee: 30.0,
            additional_destination: String::new(),
            additional_fee: 0.0,
            total_cost: 162.0,
        };

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results").join("routes.json");
        write_results(&path, std::slice::from_ref(&row)).expect("write");

        let data = fs::read_to_string(&path).expect("read back");
        let parsed: Vec<CostCandidate> = serde_json::from_str(&data).expect("parse");
        assert_eq!(parsed, vec![row]);

        // Column order is the struct field order.
        let purchase = data.find("\"purchasePrice\"").expect("purchasePrice");
        let mine = data.find("\"mine\"").expect("mine");
        let total = data.find("\"totalCost\"").expect("totalCost");
        assert!(purchase < mine && mine < total);

        // A row without a surcharge carries a blank destination, not null.
        assert!(data.contains("\"additionalDestination\": \"\""));
    }

    #[test]
    fn empty_result_writes_an_empty_array() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("routes.json");
        write_results(&path, &[]).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read back").trim(), "[]");
    }
}
