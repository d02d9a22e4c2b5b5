use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub availability: AvailabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvailabilityConfig {
    /// Base URL of a remote reservations service. When unset, availability is
    /// answered from the local booking ledger instead.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_bookings_path")]
    pub bookings_path: String,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            bookings_path: default_bookings_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/catalog.json".into()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("mcp-stays/", env!("CARGO_PKG_VERSION")).into()
}

fn default_bookings_path() -> String {
    "data/bookings.json".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.catalog.path, "data/catalog.json");
        assert!(config.availability.endpoint.is_none());
        assert_eq!(config.availability.request_timeout_secs, 10);
        assert_eq!(config.availability.bookings_path, "data/bookings.json");
    }

    #[test]
    fn user_agent_carries_crate_version() {
        let config = AvailabilityConfig::default();
        assert!(config.user_agent.starts_with("mcp-stays/"));
    }

    #[test]
    fn config_serde_roundtrip() {
        let original = Config::default();
        let yaml = serde_yml::to_string(&original).unwrap();
        let restored: Config = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(restored.catalog.path, original.catalog.path);
        assert_eq!(
            restored.availability.request_timeout_secs,
            original.availability.request_timeout_secs
        );
    }

    #[test]
    fn config_deserialize_with_overrides() {
        let yaml = "availability:\n  endpoint: \"http://localhost:9000\"\n  request_timeout_secs: 3";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(
            config.availability.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.availability.request_timeout_secs, 3);
        // Untouched sections get defaults
        assert_eq!(config.catalog.path, "data/catalog.json");
        assert_eq!(config.availability.bookings_path, "data/bookings.json");
    }
}
