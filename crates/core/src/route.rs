//! Route cache record types.
//!
//! A route is an (origin, destination) airport pair keyed by flight
//! identifier (callsign). Keying is case-insensitive; the spelling of the
//! identifier is preserved as first written.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How a route record entered the cache.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    /// Entered by an operator; never replaced by automatic discovery.
    Manual,
    /// Discovered from the historical-data provider; refreshed on expiry.
    Automatic,
}

impl RouteSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }
}

impl std::str::FromStr for RouteSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "automatic" => Ok(Self::Automatic),
            other => Err(format!("unknown route source: {}", other)),
        }
    }
}

/// A cached origin/destination pair for one flight identifier.
///
/// `origin` and `destination` are free-form airport identifiers (ICAO or
/// IATA, callers' choice). Both empty marks a remembered "no route known"
/// outcome so the provider is not queried again before the record expires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteRecord {
    /// Flight identifier (callsign), spelling as first written.
    pub flight_id: String,
    /// Departure airport identifier; empty when unknown.
    pub origin: String,
    /// Arrival airport identifier; empty when unknown.
    pub destination: String,
    /// When this record was last confirmed or written.
    pub last_seen: DateTime<Utc>,
    /// How the record entered the cache.
    pub source: RouteSource,
}

impl RouteRecord {
    /// A manually entered record, timestamped now.
    #[must_use]
    pub fn manual(flight_id: String, origin: String, destination: String) -> Self {
        Self { flight_id, origin, destination, last_seen: Utc::now(), source: RouteSource::Manual }
    }

    /// An automatically discovered record, timestamped now.
    #[must_use]
    pub fn automatic(flight_id: String, origin: String, destination: String) -> Self {
        Self {
            flight_id,
            origin,
            destination,
            last_seen: Utc::now(),
            source: RouteSource::Automatic,
        }
    }

    /// A negative-cache marker: the provider had no historical flights for
    /// this identifier. Ages out through the normal expiry window.
    #[must_use]
    pub fn no_route(flight_id: String) -> Self {
        Self::automatic(flight_id, String::new(), String::new())
    }

    /// Whether this record carries an actual route.
    #[must_use]
    pub fn has_route(&self) -> bool {
        !self.origin.is_empty() && !self.destination.is_empty()
    }

    /// Time elapsed since the record was last confirmed.
    #[must_use]
    pub fn age(&self) -> Duration {
        Utc::now() - self.last_seen
    }
}

/// Normalizes a flight identifier for use as a cache key.
#[must_use]
pub fn normalize_flight_id(flight_id: &str) -> String {
    flight_id.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_flight_id() {
        assert_eq!(normalize_flight_id(" dlh123 "), "DLH123");
        assert_eq!(normalize_flight_id("DLH123"), "DLH123");
        assert_eq!(normalize_flight_id(""), "");
    }

    #[test]
    fn test_no_route_marker_has_no_route() {
        let record = RouteRecord::no_route("UNKNOWN99".to_string());
        assert!(!record.has_route());
        assert_eq!(record.source, RouteSource::Automatic);
    }

    #[test]
    fn test_has_route_requires_both_airports() {
        let mut record = RouteRecord::manual("DLH123".into(), "FRA".into(), "JFK".into());
        assert!(record.has_route());
        record.destination.clear();
        assert!(!record.has_route());
    }

    #[test]
    fn test_route_source_round_trip() {
        for source in [RouteSource::Manual, RouteSource::Automatic] {
            let parsed: RouteSource = source.as_str().parse().unwrap();
            assert_eq!(parsed, source);
        }
        assert!("pilot".parse::<RouteSource>().is_err());
    }
}
