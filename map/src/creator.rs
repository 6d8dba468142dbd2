//! Configuration-driven construction of maps.

use treasure_hunt_core::{ConfigError, MapKind};

use crate::Map;

/// Stateless factory that turns configuration strings into fresh maps.
///
/// Configuration strings name a [`MapKind`] (`"basic"`, `"hazard"`),
/// ignoring case and surrounding whitespace. Returned maps are unsized.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapCreator;

impl MapCreator {
    /// Resolves a configuration string to the map variant it names.
    pub fn parse_kind(config: &str) -> Result<MapKind, ConfigError> {
        config
            .trim()
            .parse::<MapKind>()
            .map_err(|_| ConfigError::InvalidConfiguration {
                config: config.to_owned(),
            })
    }

    /// Creates an unsized map of the configured variant with the default
    /// generation seed.
    pub fn create_map(config: &str) -> Result<Map, ConfigError> {
        Self::parse_kind(config).map(Map::new)
    }

    /// Creates an unsized map of the configured variant whose generation is
    /// driven by `seed`.
    pub fn create_map_with_seed(config: &str, seed: u64) -> Result<Map, ConfigError> {
        Self::parse_kind(config).map(|kind| Map::with_seed(kind, seed))
    }
}
