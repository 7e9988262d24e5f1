//! Feed enrichment: attaches cached routes to live position records.

use std::sync::Arc;

use flightboard_core::{EnrichedPosition, PositionRecord};

use crate::RouteResolver;

/// Consumes raw live-position records and augments them with
/// origin/destination where a route is known.
///
/// Never fails: provider trouble surfaces only as an absent route, and
/// the resolver's timeout bounds how long a single record can take.
pub struct EnrichmentService {
    resolver: Arc<RouteResolver>,
}

impl EnrichmentService {
    #[must_use]
    pub fn new(resolver: Arc<RouteResolver>) -> Self {
        Self { resolver }
    }

    /// Enriches one position record. A missing route is a normal,
    /// displayable state; `origin`/`destination` stay unset.
    pub async fn enrich(&self, position: PositionRecord) -> EnrichedPosition {
        let route = self
            .resolver
            .lookup(&position.flight_id, &position.hardware_id)
            .await
            .filter(|record| record.has_route());

        let (origin, destination) = match route {
            Some(record) => (Some(record.origin), Some(record.destination)),
            None => (None, None),
        };
        EnrichedPosition { position, origin, destination }
    }

    /// Enriches a feed batch in order. Sequential is fine at feed
    /// volumes; duplicate identifiers within a batch collapse onto the
    /// resolver's single-flight set anyway.
    pub async fn enrich_batch(&self, batch: Vec<PositionRecord>) -> Vec<EnrichedPosition> {
        let mut enriched = Vec::with_capacity(batch.len());
        for position in batch {
            enriched.push(self.enrich(position).await);
        }
        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightboard_core::{EnrichmentConfig, RouteRecord};
    use flightboard_provider::{DisabledProvider, RouteProvider};
    use flightboard_store::RouteStore;
    use tempfile::TempDir;

    fn position(flight_id: &str) -> PositionRecord {
        PositionRecord {
            flight_id: flight_id.into(),
            hardware_id: "3c6444".into(),
            latitude: Some(50.03),
            longitude: Some(8.57),
            altitude: Some(10972.0),
            speed: Some(250.0),
            timestamp: 1_756_000_000,
        }
    }

    fn create_service() -> (EnrichmentService, std::sync::Arc<RouteStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(RouteStore::open(temp_dir.path().join("routes.json")));
        let provider: Arc<dyn RouteProvider> = Arc::new(DisabledProvider);
        let resolver = Arc::new(RouteResolver::new(
            Arc::clone(&store),
            provider,
            &EnrichmentConfig::default(),
        ));
        (EnrichmentService::new(resolver), store, temp_dir)
    }

    #[tokio::test]
    async fn test_known_route_is_attached() {
        let (service, store, _temp_dir) = create_service();
        store
            .put(RouteRecord::manual("DLH123".into(), "FRA".into(), "JFK".into()))
            .unwrap();

        let enriched = service.enrich(position("DLH123")).await;
        assert_eq!(enriched.origin.as_deref(), Some("FRA"));
        assert_eq!(enriched.destination.as_deref(), Some("JFK"));
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_route_unset() {
        let (service, _store, _temp_dir) = create_service();

        // DisabledProvider always reports unavailable; enrich must not
        // fail and must keep serving subsequent records.
        let enriched = service.enrich(position("BAW456")).await;
        assert!(enriched.origin.is_none());
        assert!(enriched.destination.is_none());

        let batch = service.enrich_batch(vec![position("BAW456"), position("AFR006")]).await;
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|p| p.origin.is_none()));
    }

    #[tokio::test]
    async fn test_negative_entry_renders_as_unknown() {
        let (service, store, _temp_dir) = create_service();
        store.put(RouteRecord::no_route("UNKNOWN99".into())).unwrap();

        let enriched = service.enrich(position("UNKNOWN99")).await;
        assert!(enriched.origin.is_none());
        assert!(enriched.destination.is_none());
    }
}
