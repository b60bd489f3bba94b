//! Ordered map configuration.

use super::{parse_env_bool, parse_env_var, Config, ValidationError};
use crate::error::{OrderedMapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound accepted for `initial_capacity`.
///
/// Both the key sequence and the lookup table reserve this many slots up
/// front, so an unchecked value turns into an allocation failure later.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 28;

/// Configuration for [`OrderedMap`](crate::OrderedMap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedMapConfig {
    /// Slots reserved in both the key sequence and the lookup table
    pub initial_capacity: usize,
    /// Release spare capacity once deletes leave the map under a quarter full
    pub auto_shrink: bool,
}

impl Default for OrderedMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            auto_shrink: false,
        }
    }
}

impl OrderedMapConfig {
    /// Create a configuration builder starting from the defaults.
    pub fn builder() -> OrderedMapConfigBuilder {
        OrderedMapConfigBuilder::new()
    }

    fn validation_error(&self) -> Option<ValidationError> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Some(
                ValidationError::new(
                    "initial_capacity",
                    &self.initial_capacity.to_string(),
                    "exceeds the maximum initial capacity",
                )
                .with_suggestion(&format!("0..={}", MAX_INITIAL_CAPACITY)),
            );
        }
        None
    }
}

impl Config for OrderedMapConfig {
    fn validate(&self) -> Result<()> {
        match self.validation_error() {
            Some(err) => Err(OrderedMapError::configuration(err.to_string())),
            None => Ok(()),
        }
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity = parse_env_var(
            &format!("{}MAP_INITIAL_CAPACITY", prefix),
            config.initial_capacity,
        );
        config.auto_shrink =
            parse_env_bool(&format!("{}MAP_AUTO_SHRINK", prefix), config.auto_shrink);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 1024,
            auto_shrink: false,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 0,
            auto_shrink: true,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            initial_capacity: 4096,
            auto_shrink: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            OrderedMapError::serialization(format!("Failed to serialize map config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            OrderedMapError::serialization(format!("Failed to parse map config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`OrderedMapConfig`].
#[derive(Debug, Clone)]
pub struct OrderedMapConfigBuilder {
    config: OrderedMapConfig,
}

impl OrderedMapConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: OrderedMapConfig::default(),
        }
    }

    /// Set the number of slots reserved up front.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Enable or disable shrinking after deletes.
    pub fn auto_shrink(mut self, enabled: bool) -> Self {
        self.config.auto_shrink = enabled;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<OrderedMapConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for OrderedMapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = OrderedMapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_capacity, 16);
        assert!(!config.auto_shrink);
    }

    #[test]
    fn test_builder_rejects_huge_capacity() {
        let err = OrderedMapConfig::builder()
            .initial_capacity(MAX_INITIAL_CAPACITY + 1)
            .build()
            .unwrap_err();
        assert_eq!(err.category(), "config");
        assert!(err.to_string().contains("initial_capacity"));
    }

    #[test]
    fn test_builder_accepts_limit() {
        let config = OrderedMapConfig::builder()
            .initial_capacity(MAX_INITIAL_CAPACITY)
            .auto_shrink(true)
            .build()
            .unwrap();
        assert_eq!(config.initial_capacity, MAX_INITIAL_CAPACITY);
        assert!(config.auto_shrink);
    }
}
