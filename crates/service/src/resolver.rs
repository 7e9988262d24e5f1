//! Lookup orchestration: decides when a cached route is trusted and when
//! the historical provider is consulted, with single-flight deduplication
//! per flight identifier.
//!
//! Per identifier the state machine is `unresolved → resolving →
//! resolved | absent`, falling back to `unresolved` once the record ages
//! past the expiry window. Manual records never enter `resolving`; only
//! an explicit manual write changes them.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use flightboard_core::{normalize_flight_id, EnrichmentConfig, RouteRecord, RouteSource};
use flightboard_provider::RouteProvider;
use flightboard_store::{PutOutcome, RouteStore};

/// Marks an identifier as resolving; cleared on drop so no failure path
/// can leave a stuck entry.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap_or_else(PoisonError::into_inner).remove(&self.key);
    }
}

/// Decides, per flight identifier, whether the stored record is usable,
/// and if not performs a de-duplicated provider call and merges the
/// result into the store.
pub struct RouteResolver {
    store: Arc<RouteStore>,
    provider: Arc<dyn RouteProvider>,
    expiry: chrono::Duration,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl RouteResolver {
    #[must_use]
    pub fn new(
        store: Arc<RouteStore>,
        provider: Arc<dyn RouteProvider>,
        config: &EnrichmentConfig,
    ) -> Self {
        Self {
            store,
            provider,
            expiry: config.expiry_window(),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Looks up a route, refreshing stale or absent entries through the
    /// provider. Provider failures are absorbed here: the caller sees a
    /// record or `None`, never a provider error.
    ///
    /// The returned record may be a negative-cache marker; check
    /// [`RouteRecord::has_route`] before displaying it.
    pub async fn lookup(&self, flight_id: &str, hardware_id: &str) -> Option<RouteRecord> {
        let key = normalize_flight_id(flight_id);
        if key.is_empty() {
            return None;
        }

        let cached = self.store.get(flight_id);
        if let Some(record) = &cached {
            // Manual records are pinned until the next manual write.
            if record.source == RouteSource::Manual || record.age() < self.expiry {
                return cached;
            }
        }

        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if !in_flight.insert(key.clone()) {
                // Another caller is mid-resolution; a stale record is
                // better than nothing.
                return cached;
            }
        }
        let guard = InFlightGuard { set: Arc::clone(&self.in_flight), key };

        let store = Arc::clone(&self.store);
        let provider = Arc::clone(&self.provider);
        let flight_id_owned = flight_id.to_string();
        let hardware_id = hardware_id.to_string();

        // Spawned so a caller that abandons the lookup does not cancel
        // the resolution; the result still populates the cache for
        // subsequent observers.
        let handle = tokio::spawn(async move {
            let _guard = guard;
            resolve_and_store(&store, provider.as_ref(), &flight_id_owned, &hardware_id).await
        });

        match handle.await {
            Ok(Some(record)) => Some(record),
            Ok(None) => cached,
            Err(e) => {
                tracing::warn!(flight_id = %flight_id, error = %e, "resolution task failed");
                cached
            }
        }
    }

    /// Number of identifiers currently mid-resolution.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Runs the provider call and merges the outcome into the store.
///
/// Returns the record to surface to the caller, or `None` when the
/// caller should fall back to whatever stale record it already has.
async fn resolve_and_store(
    store: &RouteStore,
    provider: &dyn RouteProvider,
    flight_id: &str,
    hardware_id: &str,
) -> Option<RouteRecord> {
    match provider.resolve(flight_id, hardware_id).await {
        Ok(Some(route)) => {
            let record =
                RouteRecord::automatic(flight_id.to_string(), route.origin, route.destination);
            match store.put(record.clone()) {
                Ok(PutOutcome::Stored) => Some(record),
                Ok(PutOutcome::Superseded) => {
                    // A manual write raced in; it wins regardless of timestamp.
                    tracing::debug!(flight_id = %flight_id, "discovered route superseded by manual entry");
                    store.get(flight_id)
                }
                Err(e) => {
                    tracing::warn!(flight_id = %flight_id, error = %e, "failed to persist discovered route");
                    Some(record)
                }
            }
        }
        Ok(None) => {
            // Remember the absent outcome so the provider is not queried
            // again for this identifier before the record expires.
            let marker = RouteRecord::no_route(flight_id.to_string());
            match store.put(marker.clone()) {
                Ok(PutOutcome::Stored) => Some(marker),
                Ok(PutOutcome::Superseded) => store.get(flight_id),
                Err(e) => {
                    tracing::warn!(flight_id = %flight_id, error = %e, "failed to persist negative entry");
                    Some(marker)
                }
            }
        }
        Err(e) => {
            tracing::warn!(flight_id = %flight_id, error = %e, "route lookup failed, keeping stale entry");
            None
        }
    }
}
