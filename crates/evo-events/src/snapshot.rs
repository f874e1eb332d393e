//! Snapshot Types
//!
//! Read-only copies of grid occupancy, taken between ticks.
//!
//! Consumers such as renderers colour cells from these without holding any
//! reference into the running simulation.

use serde::{Deserialize, Serialize};

use crate::{Variant, Zone};

/// A single organism as seen from outside the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismSnapshot {
    pub variant: Variant,
    pub alpha: f64,
    pub tau: f64,
    pub move_rate: f64,
    #[serde(default)]
    pub birth_zone: Option<Zone>,
}

/// A patch and its occupants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSnapshot {
    pub index: usize,
    pub resource_level: f64,
    pub zone: Zone,
    #[serde(default)]
    pub occupants: Vec<OrganismSnapshot>,
}

/// The whole grid at the end of a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub tick: u64,
    pub patches: Vec<PatchSnapshot>,
}

impl GridSnapshot {
    pub fn population(&self) -> usize {
        self.patches.iter().map(|p| p.occupants.len()).sum()
    }

    /// Largest occupant count of any patch.
    pub fn max_occupancy(&self) -> usize {
        self.patches
            .iter()
            .map(|p| p.occupants.len())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organism(variant: Variant) -> OrganismSnapshot {
        OrganismSnapshot {
            variant,
            alpha: 0.5,
            tau: 0.5,
            move_rate: 0.5,
            birth_zone: Some(Zone::Low),
        }
    }

    #[test]
    fn test_grid_totals() {
        let grid = GridSnapshot {
            tick: 2,
            patches: vec![
                PatchSnapshot {
                    index: 0,
                    resource_level: 0.9,
                    zone: Zone::High,
                    occupants: vec![organism(Variant::PreyA), organism(Variant::Predator)],
                },
                PatchSnapshot {
                    index: 1,
                    resource_level: 0.5,
                    zone: Zone::Medium,
                    occupants: Vec::new(),
                },
            ],
        };
        assert_eq!(grid.population(), 2);
        assert_eq!(grid.max_occupancy(), 2);
    }
}
