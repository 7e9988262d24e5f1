//! Operator-facing manual route overrides.

use std::sync::Arc;

use flightboard_core::RouteRecord;
use flightboard_store::RouteStore;

use crate::ServiceError;

/// Inserts or replaces route records directly, bypassing automatic
/// discovery. Manual entries win over any automatic entry and are never
/// refreshed automatically afterwards.
pub struct ManualRouteService {
    store: Arc<RouteStore>,
}

impl ManualRouteService {
    #[must_use]
    pub fn new(store: Arc<RouteStore>) -> Self {
        Self { store }
    }

    /// Validates and writes a manual record, unconditionally superseding
    /// any prior record for the identifier.
    ///
    /// # Errors
    /// `InvalidInput` when any identifier is empty after trimming, or
    /// a store error if persisting fails.
    pub fn add_or_replace(
        &self,
        flight_id: &str,
        origin: &str,
        destination: &str,
    ) -> Result<RouteRecord, ServiceError> {
        let flight_id = flight_id.trim();
        let origin = origin.trim();
        let destination = destination.trim();
        if flight_id.is_empty() {
            return Err(ServiceError::InvalidInput("flight id must not be empty".into()));
        }
        if origin.is_empty() {
            return Err(ServiceError::InvalidInput("origin must not be empty".into()));
        }
        if destination.is_empty() {
            return Err(ServiceError::InvalidInput("destination must not be empty".into()));
        }

        let record =
            RouteRecord::manual(flight_id.to_string(), origin.to_string(), destination.to_string());
        self.store.put(record.clone())?;
        tracing::info!(flight_id = %flight_id, origin = %origin, destination = %destination,
            "manual route stored");
        // The store preserves first-seen identifier spelling.
        Ok(self.store.get(flight_id).unwrap_or(record))
    }

    /// Full store snapshot for display and audit, including source and
    /// freshness per entry.
    #[must_use]
    pub fn list_all(&self) -> Vec<RouteRecord> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightboard_core::RouteSource;
    use tempfile::TempDir;

    fn create_service() -> (ManualRouteService, Arc<RouteStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(RouteStore::open(temp_dir.path().join("routes.json")));
        (ManualRouteService::new(Arc::clone(&store)), store, temp_dir)
    }

    #[test]
    fn test_add_to_empty_store() {
        let (service, store, _temp_dir) = create_service();

        let record = service.add_or_replace("DLH123", "FRA", "JFK").unwrap();
        assert_eq!(record.origin, "FRA");
        assert_eq!(record.destination, "JFK");
        assert_eq!(record.source, RouteSource::Manual);

        let stored = store.get("DLH123").unwrap();
        assert_eq!(stored.origin, "FRA");
        assert_eq!(stored.destination, "JFK");
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let (service, _store, _temp_dir) = create_service();
        let record = service.add_or_replace(" DLH123 ", " FRA ", " JFK ").unwrap();
        assert_eq!(record.flight_id, "DLH123");
        assert_eq!(record.origin, "FRA");
    }

    #[test]
    fn test_empty_fields_rejected() {
        let (service, store, _temp_dir) = create_service();

        for (flight_id, origin, destination) in
            [("", "FRA", "JFK"), ("DLH123", "  ", "JFK"), ("DLH123", "FRA", "")]
        {
            let err = service.add_or_replace(flight_id, origin, destination).unwrap_err();
            assert!(err.is_invalid_input());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_manual_supersedes_automatic() {
        let (service, store, _temp_dir) = create_service();

        store
            .put(RouteRecord::automatic("DLH123".into(), "EDDF".into(), "KJFK".into()))
            .unwrap();
        service.add_or_replace("DLH123", "FRA", "JFK").unwrap();

        let record = store.get("DLH123").unwrap();
        assert_eq!(record.source, RouteSource::Manual);
        assert_eq!(record.origin, "FRA");
    }

    #[test]
    fn test_list_all_includes_source_and_freshness() {
        let (service, store, _temp_dir) = create_service();

        service.add_or_replace("DLH123", "FRA", "JFK").unwrap();
        store
            .put(RouteRecord::automatic("BAW456".into(), "LHR".into(), "JFK".into()))
            .unwrap();

        let mut listing = service.list_all();
        listing.sort_by(|a, b| a.flight_id.cmp(&b.flight_id));
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].source, RouteSource::Automatic);
        assert_eq!(listing[1].source, RouteSource::Manual);
    }
}
