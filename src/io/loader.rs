//! JSON table loader.
//!
//! Each input relation is a JSON array of objects with camelCase keys. Raw
//! rows are deserialized into DTOs first and converted into domain records:
//! numeric values parse leniently (a number, a numeric string, or anything
//! else which becomes "missing"), while a missing identity field or
//! malformed JSON is a structural error that aborts the load.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::domain::{
    FreightLane, InputTables, LocationKind, PortRecord, PortRole, PurchaseRecord, SurchargeRecord,
    TransferLeg, TransportMode,
};

/// Structural failures: these abort the whole computation.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{table} table has a malformed schema: {source}")]
    Schema {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Locations of the five input relations.
#[derive(Clone, Debug)]
pub struct TablePaths {
    pub purchases: PathBuf,
    pub transfer_legs: PathBuf,
    pub ports: PathBuf,
    pub freight_lanes: PathBuf,
    pub surcharges: PathBuf,
}

/// Loads all five relations, failing on the first structural error.
pub fn load_tables(paths: &TablePaths) -> Result<InputTables, TableError> {
    Ok(InputTables {
        purchases: load_purchases(&paths.purchases)?,
        transfer_legs: load_transfer_legs(&paths.transfer_legs)?,
        ports: load_ports(&paths.ports)?,
        freight_lanes: load_freight_lanes(&paths.freight_lanes)?,
        surcharges: load_surcharges(&paths.surcharges)?,
    })
}

pub fn load_purchases(path: &Path) -> Result<Vec<PurchaseRecord>, TableError> {
    let rows: Vec<PurchaseDto> = read_rows(path, "purchase prices")?;
    Ok(rows.into_iter().map(PurchaseRecord::from).collect())
}

pub fn load_transfer_legs(path: &Path) -> Result<Vec<TransferLeg>, TableError> {
    let rows: Vec<TransferLegDto> = read_rows(path, "transfer legs")?;
    Ok(rows.into_iter().filter_map(TransferLegDto::into_record).collect())
}

pub fn load_ports(path: &Path) -> Result<Vec<PortRecord>, TableError> {
    let rows: Vec<PortDto> = read_rows(path, "ports")?;
    Ok(rows.into_iter().filter_map(PortDto::into_record).collect())
}

pub fn load_freight_lanes(path: &Path) -> Result<Vec<FreightLane>, TableError> {
    let rows: Vec<FreightLaneDto> = read_rows(path, "freight lanes")?;
    Ok(rows.into_iter().map(FreightLane::from).collect())
}

pub fn load_surcharges(path: &Path) -> Result<Vec<SurchargeRecord>, TableError> {
    let rows: Vec<SurchargeDto> = read_rows(path, "surcharges")?;
    Ok(rows.into_iter().map(SurchargeRecord::from).collect())
}

fn read_rows<T: DeserializeOwned>(path: &Path, table: &'static str) -> Result<Vec<T>, TableError> {
    let data = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| TableError::Schema { table, source })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseDto {
    mine: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    purchase_price: Option<f64>,
}

impl From<PurchaseDto> for PurchaseRecord {
    fn from(dto: PurchaseDto) -> Self {
        Self {
            mine: dto.mine,
            purchase_price: dto.purchase_price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferLegDto {
    origin: String,
    origin_type: String,
    destination: String,
    destination_type: String,
    mode: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    price: Option<f64>,
}

impl TransferLegDto {
    /// Rows with location kinds or modes outside the fixed topology can
    /// never match a join, so they are dropped here.
    fn into_record(self) -> Option<TransferLeg> {
        let origin_type = parse_location_kind(&self.origin_type)?;
        let destination_type = parse_location_kind(&self.destination_type)?;
        let mode = parse_transport_mode(&self.mode)?;
        Some(TransferLeg {
            origin: self.origin,
            origin_type,
            destination: self.destination,
            destination_type,
            mode,
            price: self.price,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortDto {
    port_name: String,
    port_type: String,
    wharf_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    max_tonnage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    flat_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    wharf_fee: Option<f64>,
    #[serde(default)]
    unload_mode: Option<String>,
}

impl PortDto {
    fn into_record(self) -> Option<PortRecord> {
        let port_type = match self.port_type.trim() {
            "departure" => PortRole::Departure,
            "arrival" => PortRole::Arrival,
            other => {
                warn!("skipping port row {}/{}: unknown port type {other:?}", self.port_name, self.wharf_name);
                return None;
            }
        };
        Some(PortRecord {
            port_name: self.port_name,
            port_type,
            wharf_name: self.wharf_name,
            max_tonnage: self.max_tonnage,
            flat_price: self.flat_price,
            wharf_fee: self.wharf_fee.unwrap_or(0.0),
            unload_mode: normalize_optional(self.unload_mode),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FreightLaneDto {
    departure_port: String,
    #[serde(default)]
    departure_wharf: Option<String>,
    arrival_port: String,
    arrival_wharf: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    ship_tonnage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    freight_fee: Option<f64>,
}

impl From<FreightLaneDto> for FreightLane {
    fn from(dto: FreightLaneDto) -> Self {
        Self {
            departure_port: dto.departure_port,
            // An empty wharf name is the wildcard, same as an absent one.
            departure_wharf: normalize_optional(dto.departure_wharf),
            arrival_port: dto.arrival_port,
            arrival_wharf: dto.arrival_wharf,
            ship_tonnage: dto.ship_tonnage,
            freight_fee: dto.freight_fee,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurchargeDto {
    arrival_wharf: String,
    additional_destination: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    additional_fee: Option<f64>,
}

impl From<SurchargeDto> for SurchargeRecord {
    fn from(dto: SurchargeDto) -> Self {
        Self {
            arrival_wharf: dto.arrival_wharf,
            additional_destination: dto.additional_destination,
            additional_fee: dto.additional_fee.unwrap_or(0.0),
        }
    }
}

fn parse_location_kind(raw: &str) -> Option<LocationKind> {
    match raw.trim() {
        "mine" => Some(LocationKind::Mine),
        "railPort" => Some(LocationKind::RailPort),
        "seaPort" => Some(LocationKind::SeaPort),
        other => {
            warn!("skipping transfer leg: unknown location kind {other:?}");
            None
        }
    }
}

fn parse_transport_mode(raw: &str) -> Option<TransportMode> {
    match raw.trim() {
        "road" => Some(TransportMode::Road),
        "rail" => Some(TransportMode::Rail),
        other => {
            warn!("skipping transfer leg: unknown transport mode {other:?}");
            None
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Accepts a JSON number, a numeric string, or null; anything that fails to
/// parse becomes `None` so the stage rules can disqualify the row instead of
/// aborting the load.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumberOrMissing;

    impl<'de> Visitor<'de> for NumberOrMissing {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.trim().parse::<f64>().ok())
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map
                .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                .is_some()
            {}
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(NumberOrMissing)
        }
    }

    deserializer.deserialize_any(NumberOrMissing)
}
