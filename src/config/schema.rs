//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so a file may list only its routes.

use serde::{Deserialize, Serialize};

use crate::routing::table::DEFAULT_CACHE_CAPACITY;
use crate::routing::{ComponentId, RouteConfigNode, RouteTable};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteNodeConfig {
    /// Nested route tree. Components are referenced by id.
    pub routes: Vec<RouteConfigNode<ComponentId>>,

    /// Resolution memo settings.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RouteNodeConfig {
    /// Build a route table from this configuration, honoring the cache settings.
    pub fn build_table(&self) -> RouteTable<ComponentId> {
        if self.cache.enabled {
            RouteTable::with_cache_capacity(self.routes.clone(), self.cache.max_entries)
        } else {
            RouteTable::uncached(self.routes.clone())
        }
    }
}

/// Resolution memo configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Memoize resolutions per (route, node).
    pub enabled: bool,

    /// Entries kept before the memo is cleared.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Record resolution, transition and re-render counters.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            metrics_enabled: true,
        }
    }
}
