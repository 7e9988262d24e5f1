//! Enrichment configuration with documented defaults and env overrides.

use crate::env_config::env_parse_with_default;

/// Default cache expiry window in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;
/// Lower bound for the configurable expiry window.
pub const MIN_EXPIRY_DAYS: i64 = 1;
/// Upper bound for the configurable expiry window.
pub const MAX_EXPIRY_DAYS: i64 = 90;

/// Configuration for the route enrichment cache.
///
/// Constructed once at startup and passed to the services; values outside
/// the documented ranges are clamped, not rejected.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Maximum age in days before a cached route is considered stale.
    /// Default 7, clamped to 1–90.
    pub expiry_window_days: i64,
    /// Whether automatic discovery via the historical provider is enabled.
    pub provider_enabled: bool,
    /// Optional provider username; raises the daily call quota.
    pub provider_username: Option<String>,
    /// Optional provider password.
    pub provider_password: Option<String>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            expiry_window_days: DEFAULT_EXPIRY_DAYS,
            provider_enabled: true,
            provider_username: None,
            provider_password: None,
        }
    }
}

impl EnrichmentConfig {
    /// Builds a configuration from `FLIGHTBOARD_*` environment variables,
    /// falling back to defaults for anything unset or malformed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expiry_window_days: env_parse_with_default(
                "FLIGHTBOARD_EXPIRY_DAYS",
                defaults.expiry_window_days,
            ),
            provider_enabled: env_parse_with_default(
                "FLIGHTBOARD_PROVIDER_ENABLED",
                defaults.provider_enabled,
            ),
            provider_username: std::env::var("FLIGHTBOARD_OPENSKY_USER").ok(),
            provider_password: std::env::var("FLIGHTBOARD_OPENSKY_PASS").ok(),
        }
    }

    /// The expiry window as a duration, clamped to the documented range.
    #[must_use]
    pub fn expiry_window(&self) -> chrono::Duration {
        let days = self.expiry_window_days.clamp(MIN_EXPIRY_DAYS, MAX_EXPIRY_DAYS);
        chrono::Duration::days(days)
    }

    /// Provider credentials, present only when both parts are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.provider_username, &self.provider_password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry_window() {
        let config = EnrichmentConfig::default();
        assert_eq!(config.expiry_window(), chrono::Duration::days(7));
    }

    #[test]
    fn test_expiry_window_clamped() {
        let mut config = EnrichmentConfig::default();
        config.expiry_window_days = 0;
        assert_eq!(config.expiry_window(), chrono::Duration::days(1));
        config.expiry_window_days = 365;
        assert_eq!(config.expiry_window(), chrono::Duration::days(90));
    }

    #[test]
    fn test_credentials_require_both_parts() {
        let mut config = EnrichmentConfig::default();
        assert!(config.credentials().is_none());
        config.provider_username = Some("user".into());
        assert!(config.credentials().is_none());
        config.provider_password = Some("pass".into());
        assert_eq!(config.credentials(), Some(("user".into(), "pass".into())));
    }
}
