//! OpenSky Network historical-flights client.
//!
//! Queries `/flights/aircraft` for the trailing week by transponder id
//! and picks the most recent segment carrying both airports. Calls are
//! counted against a per-process daily budget; credentials raise the
//! ceiling, their absence only lowers it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{ProviderError, RouteLookup, RouteProvider};

const OPENSKY_BASE_URL: &str = "https://opensky-network.org/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Fixed trailing search window for historical queries.
const LOOKBACK_SECS: i64 = 7 * 24 * 3600;
/// Daily call ceiling without credentials.
const ANON_DAILY_LIMIT: u32 = 400;
/// Daily call ceiling with a registered account.
const AUTH_DAILY_LIMIT: u32 = 4000;

/// Rolling count of calls within the current UTC day.
///
/// Process-local only; the remote service enforces its own limit
/// server-side, so an overshoot across restarts is acceptable.
#[derive(Debug)]
struct CallBudget {
    day: NaiveDate,
    used: u32,
}

/// OpenSky API client with optional basic-auth credentials.
pub struct OpenSkyProvider {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    budget: Mutex<CallBudget>,
}

impl std::fmt::Debug for OpenSkyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSkyProvider")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials.as_ref().map(|(user, _)| (user, "***")))
            .finish()
    }
}

impl OpenSkyProvider {
    /// Creates a client. Credentials are optional; without them the
    /// daily ceiling is lower but operation is unaffected.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(credentials: Option<(String, String)>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("client init: {e}")))?;
        Ok(Self {
            client,
            base_url: OPENSKY_BASE_URL.to_string(),
            credentials,
            budget: Mutex::new(CallBudget { day: Utc::now().date_naive(), used: 0 }),
        })
    }

    /// Points the client at a different base URL (tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The daily call ceiling for this client's credential tier.
    #[must_use]
    pub fn daily_limit(&self) -> u32 {
        if self.credentials.is_some() { AUTH_DAILY_LIMIT } else { ANON_DAILY_LIMIT }
    }

    /// Calls used against today's budget.
    #[must_use]
    pub fn calls_used_today(&self) -> u32 {
        let budget = self.lock_budget();
        if budget.day == Utc::now().date_naive() { budget.used } else { 0 }
    }

    fn lock_budget(&self) -> MutexGuard<'_, CallBudget> {
        self.budget.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims one call against the budget, resetting the count when the
    /// UTC day has rolled over. Checked before any network I/O.
    fn claim_budget_slot(&self, today: NaiveDate) -> Result<(), ProviderError> {
        let limit = self.daily_limit();
        let mut budget = self.lock_budget();
        if budget.day != today {
            budget.day = today;
            budget.used = 0;
        }
        if budget.used >= limit {
            return Err(ProviderError::QuotaExceeded { limit });
        }
        budget.used += 1;
        Ok(())
    }
}

/// One historical flight segment as returned by `/flights/aircraft`.
#[derive(Debug, Deserialize)]
struct FlightSegment {
    #[serde(rename = "lastSeen")]
    last_seen: Option<i64>,
    #[serde(rename = "estDepartureAirport")]
    departure: Option<String>,
    #[serde(rename = "estArrivalAirport")]
    arrival: Option<String>,
}

/// Picks the most recent segment that carries both airports.
fn best_route(segments: Vec<FlightSegment>) -> Option<RouteLookup> {
    segments
        .into_iter()
        .filter_map(|segment| {
            let origin = segment.departure.filter(|s| !s.is_empty())?;
            let destination = segment.arrival.filter(|s| !s.is_empty())?;
            Some((segment.last_seen.unwrap_or(0), RouteLookup { origin, destination }))
        })
        .max_by_key(|(last_seen, _)| *last_seen)
        .map(|(_, route)| route)
}

#[async_trait]
impl RouteProvider for OpenSkyProvider {
    async fn resolve(
        &self,
        flight_id: &str,
        hardware_id: &str,
    ) -> Result<Option<RouteLookup>, ProviderError> {
        if hardware_id.is_empty() {
            // Without a transponder id there is nothing to query; leave
            // the record unresolved rather than negative-caching it.
            return Err(ProviderError::Unavailable(format!(
                "no hardware id for flight {flight_id}"
            )));
        }

        let now = Utc::now();
        self.claim_budget_slot(now.date_naive())?;

        let end = now.timestamp();
        let begin = end - LOOKBACK_SECS;
        let url = format!("{}/flights/aircraft", self.base_url);
        tracing::debug!(flight_id = %flight_id, hardware_id = %hardware_id, "querying OpenSky");

        let mut request = self.client.get(&url).query(&[
            ("icao24", hardware_id),
            ("begin", &begin.to_string()),
            ("end", &end.to_string()),
        ]);
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send().await?;
        let status = response.status();

        // OpenSky answers 404 when no flights are known for the aircraft.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("status {status}")));
        }

        let segments: Vec<FlightSegment> = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {e}")))?;

        let route = best_route(segments);
        match &route {
            Some(route) => tracing::debug!(
                flight_id = %flight_id,
                origin = %route.origin,
                destination = %route.destination,
                "route discovered"
            ),
            None => tracing::debug!(flight_id = %flight_id, "no historical route"),
        }
        Ok(route)
    }
}
