//! Configuration System
//!
//! Engine tuning parameters, loadable from TOML so experiments can be varied
//! without recompiling. Every section is optional and falls back to the
//! defaults of the baseline experiment.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use evo_events::Zone;

/// How many organisms a patch may hold.
///
/// Fixed when a simulation is initialized and never changed mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyPolicy {
    /// At most one organism per patch; inbound organisms aimed at a full
    /// patch are destroyed
    #[default]
    SingleOccupant,
    /// Any number of organisms per patch
    Unbounded,
}

/// Maximum prey birth attempts per tick, by the zone the parent stands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FecundityTiers {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl FecundityTiers {
    pub const BASELINE: FecundityTiers = FecundityTiers {
        low: 1,
        medium: 2,
        high: 3,
    };

    pub const HIGH: FecundityTiers = FecundityTiers {
        low: 4,
        medium: 7,
        high: 10,
    };

    pub fn attempts(&self, zone: Zone) -> u32 {
        match zone {
            Zone::Low => self.low,
            Zone::Medium => self.medium,
            Zone::High => self.high,
        }
    }
}

impl Default for FecundityTiers {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Complete engine configuration.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deterministic seed for reproducible runs
    pub seed: u64,
    pub occupancy: OccupancyPolicy,
    /// Confine predator movement and breeding to their birth zone
    pub zone_locking: bool,
    /// Chance that each trait of an offspring is perturbed
    pub mutation_rate: f64,
    /// Standard deviation of a trait perturbation
    pub mutation_sd: f64,
    /// Per-tick chance that a predator dies
    pub predator_death_rate: f64,
    /// Per-attempt prey birth chance, scaled by the patch resource level
    pub prey_birth_chance: f64,
    /// Per-tick predator birth chance
    pub predator_birth_chance: f64,
    /// Resource level of every patch, in grid order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<f64>>,
    pub fecundity: FecundityTiers,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            occupancy: OccupancyPolicy::SingleOccupant,
            zone_locking: true,
            mutation_rate: 0.05,
            mutation_sd: 0.025,
            predator_death_rate: 0.1,
            prey_birth_chance: 0.25,
            predator_birth_chance: 0.25,
            grid: None,
            fecundity: FecundityTiers::BASELINE,
        }
    }
}

impl EngineConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every probability and level lies in [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("mutation_rate", self.mutation_rate),
            ("predator_death_rate", self.predator_death_rate),
            ("prey_birth_chance", self.prey_birth_chance),
            ("predator_birth_chance", self.predator_birth_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if !self.mutation_sd.is_finite() || self.mutation_sd < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "mutation_sd",
                value: self.mutation_sd,
            });
        }

        if let Some(levels) = &self.grid {
            if levels.is_empty() {
                return Err(ConfigError::EmptyGrid);
            }
            if let Some(&value) = levels.iter().find(|l| !(0.0..=1.0).contains(*l)) {
                return Err(ConfigError::OutOfRange {
                    field: "grid",
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Clamp a probability into [0, 1], mapping NaN to 0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("grid must contain at least one patch")]
    EmptyGrid,
    #[error("no grid resource levels configured")]
    MissingGrid,
}
