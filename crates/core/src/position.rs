//! Live-feed position records and their enriched counterpart.

use serde::{Deserialize, Serialize};

/// One vehicle-position record from the live feed.
///
/// The feed carries no route information; enrichment attaches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionRecord {
    /// Flight identifier (callsign). May be empty for anonymous traffic.
    #[serde(default)]
    pub flight_id: String,
    /// Transponder identifier (icao24), stable across callsign reuse.
    #[serde(default)]
    pub hardware_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Barometric altitude in metres.
    pub altitude: Option<f64>,
    /// Ground speed in m/s.
    pub speed: Option<f64>,
    /// Unix timestamp of the observation.
    pub timestamp: i64,
}

/// A position record augmented with origin/destination, when known.
///
/// Absence of a route is a normal, displayable state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedPosition {
    #[serde(flatten)]
    pub position: PositionRecord,
    pub origin: Option<String>,
    pub destination: Option<String>,
}
