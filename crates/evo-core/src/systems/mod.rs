//! ECS Systems
//!
//! The three stages of a tick, run strictly in order: movement, reproduction,
//! culling. Each stage walks the grid in patch order and draws from the one
//! shared `SimRng`, so the draw sequence is fixed for a given state.

use bevy_ecs::prelude::*;
use rand::Rng;

pub mod culling;
pub mod movement;
pub mod reproduction;

pub use culling::cull_organisms;
pub use movement::{move_organisms, patch_census, score_patches, select_patch, PatchCensus};
pub use reproduction::{conceive, reproduce_organisms};

/// Resource: counters for the tick in progress
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickTally {
    pub moved: usize,
    pub births: usize,
    pub births_discarded: usize,
    pub deaths: usize,
}

impl TickTally {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Bernoulli trial that always consumes exactly one uniform draw.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}
