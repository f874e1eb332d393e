//! Culling System
//!
//! Removes predators that fail their per-tick survival draw, and any organism
//! whose death predicate reports it dead.

use bevy_ecs::prelude::*;

use crate::components::{Organism, PatchGrid};
use crate::config::EngineConfig;
use crate::SimRng;

use super::{chance, TickTally};

/// System: remove dead organisms from the grid and the world
pub fn cull_organisms(
    mut commands: Commands,
    config: Res<EngineConfig>,
    mut rng: ResMut<SimRng>,
    mut grid: ResMut<PatchGrid>,
    mut tally: ResMut<TickTally>,
    organisms: Query<&Organism>,
) {
    for (index, entity) in grid.occupants_in_order() {
        let Ok(organism) = organisms.get(entity) else {
            continue;
        };

        let starved = !organism.is_prey() && chance(&mut rng.0, config.predator_death_rate);
        if starved || organism.is_dead() {
            grid.remove(index, entity);
            commands.entity(entity).despawn();
            tally.deaths += 1;
        }
    }
}
