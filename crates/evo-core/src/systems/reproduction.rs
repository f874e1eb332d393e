//! Reproduction System
//!
//! Organisms breed on the patch they ended movement on. Prey get several
//! attempts scaled by the patch's resources; predators get one. Offspring are
//! staged in a nursery and only admitted to the grid after every parent has
//! had its turn.

use bevy_ecs::prelude::*;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::trace;

use evo_events::Zone;

use crate::components::{OffspringFactory, Organism, PatchGrid};
use crate::config::EngineConfig;
use crate::SimRng;

use super::{chance, TickTally};

/// Build one offspring of `parent`, conceived on a patch in `zone`.
///
/// Alpha then tau each mutate with probability `mutation_rate` by a normal
/// perturbation, clamped into [0, 1]. The move rate is inherited unchanged.
/// The variant is then re-resolved, so a prey whose tau crosses one half is
/// born as the other prey type.
pub fn conceive<R: Rng + ?Sized>(
    parent: &Organism,
    zone: Zone,
    config: &EngineConfig,
    factory: &OffspringFactory,
    rng: &mut R,
) -> Organism {
    let mut child = parent.clone();

    let alpha = mutate_trait(rng, child.alpha(), config.mutation_rate, config.mutation_sd);
    child.set_alpha(alpha);
    let tau = mutate_trait(rng, child.tau(), config.mutation_rate, config.mutation_sd);
    child.set_tau(tau);

    let variant = factory.resolve(child.is_prey(), child.tau());
    child.reclassified(variant).born_in(zone)
}

fn mutate_trait<R: Rng + ?Sized>(rng: &mut R, value: f64, rate: f64, sd: f64) -> f64 {
    if !chance(rng, rate) {
        return value;
    }
    match Normal::new(0.0, sd) {
        Ok(normal) => (value + normal.sample(rng)).clamp(0.0, 1.0),
        Err(_) => value,
    }
}

/// System: breed every organism and admit the offspring
pub fn reproduce_organisms(
    mut commands: Commands,
    config: Res<EngineConfig>,
    factory: Res<OffspringFactory>,
    mut rng: ResMut<SimRng>,
    mut grid: ResMut<PatchGrid>,
    mut tally: ResMut<TickTally>,
    organisms: Query<&Organism>,
) {
    let mut nursery: Vec<(usize, Organism)> = Vec::new();

    for (index, entity) in grid.occupants_in_order() {
        let Ok(parent) = organisms.get(entity) else {
            continue;
        };
        let zone = grid.zone(index);

        if parent.is_prey() {
            let attempts = config.fecundity.attempts(zone);
            let birth_chance = config.prey_birth_chance * grid.resource_level(index);
            for _ in 0..attempts {
                if chance(&mut rng.0, birth_chance) {
                    let child = conceive(parent, zone, &config, &factory, &mut rng.0);
                    nursery.push((index, child));
                }
            }
        } else {
            let outside_birth_zone = matches!(parent.birth_zone(), Some(born) if born != zone);
            if config.zone_locking && outside_birth_zone {
                continue;
            }
            if chance(&mut rng.0, config.predator_birth_chance) {
                let child = conceive(parent, zone, &config, &factory, &mut rng.0);
                nursery.push((index, child));
            }
        }
    }

    for (index, child) in nursery {
        if grid.can_admit(index) {
            let entity = commands.spawn(child).id();
            grid.admit(index, entity);
            tally.births += 1;
        } else {
            trace!(
                patch = index,
                zone = %grid.zone(index),
                variant = %child.variant(),
                "offspring discarded on occupied patch"
            );
            tally.births_discarded += 1;
        }
    }
}
