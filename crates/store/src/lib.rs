//! Persistent route store: a JSON key-value file mapping flight
//! identifiers to cached routes.
//!
//! The store is the only component that mutates persisted route state.
//! Every successful write flushes the full mapping back to disk before
//! returning (write-through), so a crash loses at most the in-flight
//! write. Loading fails soft: a missing, unreadable, or malformed file
//! never prevents startup.

pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flightboard_core::{normalize_flight_id, RouteRecord, RouteSource};

pub use error::StoreError;

/// Result of an upsert, reflecting the manual-over-automatic precedence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was written and persisted.
    Stored,
    /// An automatic write was rejected because a manual record exists.
    Superseded,
}

/// Persisted file value; the flight identifier is the surrounding key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRoute {
    origin: String,
    destination: String,
    last_seen: DateTime<Utc>,
    source: RouteSource,
}

/// Lock-guarded route mapping backed by a JSON document on disk.
///
/// Keyed case-insensitively; the identifier spelling is preserved as
/// first written. Injected into the orchestrator rather than held as
/// process-global state.
#[derive(Debug)]
pub struct RouteStore {
    path: PathBuf,
    inner: Mutex<HashMap<String, RouteRecord>>,
}

impl RouteStore {
    /// Opens the store at `path`, loading whatever is salvageable.
    ///
    /// A missing file starts empty silently; an unreadable or malformed
    /// file starts empty with an error log; individually malformed
    /// entries are skipped and the rest load.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_file(&path);
        tracing::debug!(path = %path.display(), count = records.len(), "route store opened");
        Self { path, inner: Mutex::new(records) }
    }

    /// Case-insensitive lookup. Never performs I/O.
    #[must_use]
    pub fn get(&self, flight_id: &str) -> Option<RouteRecord> {
        self.lock().get(&normalize_flight_id(flight_id)).cloned()
    }

    /// Upserts by flight identifier, enforcing precedence: an automatic
    /// write over an existing manual record is a no-op reporting
    /// [`PutOutcome::Superseded`]. Successful writes persist before
    /// returning.
    pub fn put(&self, mut record: RouteRecord) -> Result<PutOutcome, StoreError> {
        let key = normalize_flight_id(&record.flight_id);
        let mut map = self.lock();
        if let Some(existing) = map.get(&key) {
            if existing.source == RouteSource::Manual && record.source == RouteSource::Automatic {
                return Ok(PutOutcome::Superseded);
            }
            // Identifier spelling is preserved as first seen.
            record.flight_id = existing.flight_id.clone();
        }
        map.insert(key, record);
        self.flush_locked(&map)?;
        Ok(PutOutcome::Stored)
    }

    /// Snapshot of all records, in map iteration order.
    #[must_use]
    pub fn list(&self) -> Vec<RouteRecord> {
        self.lock().values().cloned().collect()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Rewrites the full mapping to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let map = self.lock();
        self.flush_locked(&map)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RouteRecord>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes via a temp file and rename so readers never observe a
    /// partially written document.
    fn flush_locked(&self, map: &HashMap<String, RouteRecord>) -> Result<(), StoreError> {
        let document: HashMap<&str, StoredRoute> = map
            .values()
            .map(|record| {
                (
                    record.flight_id.as_str(),
                    StoredRoute {
                        origin: record.origin.clone(),
                        destination: record.destination.clone(),
                        last_seen: record.last_seen,
                        source: record.source,
                    },
                )
            })
            .collect();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&document)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_file(path: &Path) -> HashMap<String, RouteRecord> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no route file yet, starting empty");
            return HashMap::new();
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "route file unreadable, starting empty");
            return HashMap::new();
        }
    };

    let document: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "route file malformed, starting empty");
            return HashMap::new();
        }
    };

    let mut records = HashMap::with_capacity(document.len());
    for (flight_id, value) in document {
        match serde_json::from_value::<StoredRoute>(value) {
            Ok(stored) => {
                let key = normalize_flight_id(&flight_id);
                if key.is_empty() {
                    tracing::warn!("skipping route entry with empty flight id");
                    continue;
                }
                records.insert(
                    key,
                    RouteRecord {
                        flight_id,
                        origin: stored.origin,
                        destination: stored.destination,
                        last_seen: stored.last_seen,
                        source: stored.source,
                    },
                );
            }
            Err(e) => {
                tracing::warn!(flight_id = %flight_id, error = %e, "skipping malformed route entry");
            }
        }
    }
    records
}
