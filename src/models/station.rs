//! Voting-station records, raw and resolved.

use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Postal code used when a record carries neither `cp` nor `code_postal`.
pub const UNKNOWN_POSTAL_CODE: &str = "unknown";

/// One entry of the input document, as published in the open-data export.
///
/// Every field is kept as a raw JSON value: the export mixes numbers and
/// strings, and a badly typed field on one record must not reject the whole
/// document. Values are copied verbatim into the output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub objectid: Value,
    #[serde(default)]
    pub id_bv: Value,
    #[serde(default)]
    pub num_bv: Value,
    #[serde(default)]
    pub lib: Value,
    #[serde(default)]
    pub adresse: Value,
    #[serde(default)]
    pub cp: Value,
    #[serde(default)]
    pub code_postal: Value,
    /// `{ "lat": .., "lon": .. }`
    #[serde(default)]
    pub geo_point_2d: Value,
}

impl RawRecord {
    /// Raw postal code from `cp`, falling back to `code_postal`, then to
    /// [`UNKNOWN_POSTAL_CODE`].
    pub fn postal_code_field(&self) -> Value {
        [&self.cp, &self.code_postal]
            .into_iter()
            .find(|v| is_postal_code_set(v))
            .cloned()
            .unwrap_or_else(|| Value::from(UNKNOWN_POSTAL_CODE))
    }

    /// Postal code as a group key
    pub fn postal_code(&self) -> String {
        postal_code_key(&self.postal_code_field())
    }

    /// `(lat, lon)` when both coordinates are present and numeric
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = coordinate(self.geo_point_2d.get("lat")?)?;
        let lon = coordinate(self.geo_point_2d.get("lon")?)?;
        Some((lat, lon))
    }
}

/// Only non-empty strings and non-zero numbers count as a postal code.
fn is_postal_code_set(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => false,
    }
}

/// Integral float codes such as `75000.0` key as `"75000"`.
fn postal_code_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        other => other.to_string(),
    }
}

/// Numbers, or strings holding a number
fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text of a scalar field for the routes report; null renders empty.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A geolocated voting station, the unit that gets clustered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub objectid: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id_bv: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub num_bv: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub lib: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub adresse: Value,
    /// Resolved postal code, string or number as it appeared in the input
    pub cp: Value,
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    /// Resolve a raw record. Returns `None` when a coordinate is missing.
    pub fn from_record(record: RawRecord) -> Option<Self> {
        let (lat, lon) = record.coordinates()?;
        let cp = record.postal_code_field();

        Some(Self {
            objectid: record.objectid,
            id_bv: record.id_bv,
            num_bv: record.num_bv,
            lib: record.lib,
            adresse: record.adresse,
            cp,
            lat,
            lon,
        })
    }

    /// Postal code this station is grouped under
    pub fn postal_code(&self) -> String {
        postal_code_key(&self.cp)
    }

    /// Key used to detect duplicate addresses; `5` and `"5"` stay distinct.
    pub fn address_key(&self) -> String {
        self.adresse.to_string()
    }

    /// Location as a `geo` point (x = lon, y = lat)
    pub fn location(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// `adresse (lib)` as printed in the routes report
    pub fn route_label(&self) -> String {
        format!(
            "{} ({})",
            display_text(&self.adresse),
            display_text(&self.lib)
        )
    }
}
