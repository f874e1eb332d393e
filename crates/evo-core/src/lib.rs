//! Patch Evolution Simulation Engine
//!
//! Prey and predators scattered over resource patches move, breed with
//! mutation, and die, one tick at a time. The `alpha` and `tau` traits evolve
//! under the pressure of patch scoring and predation.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, EngineConfig, FecundityTiers, OccupancyPolicy};
pub use output::{Census, OrganismFilter, VariantFilter};
pub use simulation::Simulation;

pub use evo_events::{
    GenerationReport, GridSnapshot, OrganismSnapshot, PatchSnapshot, TickSummary, Variant, Zone,
    ZoneCounts, CSV_HEADER,
};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
