//! Simulation
//!
//! Owns the ECS world and the tick schedule, and is the only way drivers
//! touch the engine. Every tick runs movement, reproduction and culling in
//! that order on a single thread; accessors hand out read-only views that
//! cannot outlive the next tick.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use tracing::{debug, trace};

use evo_events::{GenerationReport, GridSnapshot, PatchSnapshot, TickSummary, Zone};

use crate::components::{OffspringFactory, Organism, PatchGrid, VariantResolver};
use crate::config::{clamp_unit, ConfigError, EngineConfig, FecundityTiers};
use crate::output::Census;
use crate::systems::{cull_organisms, move_organisms, reproduce_organisms, TickTally};
use crate::SimRng;

/// Build the per-tick schedule: move, reproduce, cull.
fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            move_organisms,
            reproduce_organisms,
            apply_deferred,
            cull_organisms,
        )
            .chain(),
    );
    schedule
}

/// A running patch simulation
pub struct Simulation {
    world: World,
    schedule: Schedule,
    tick: u64,
}

impl Simulation {
    /// Create an empty grid with one patch per resource level.
    pub fn initialize(resource_levels: &[f64], mut config: EngineConfig) -> Self {
        config.grid = Some(resource_levels.to_vec());

        let mut world = World::new();
        world.insert_resource(PatchGrid::new(resource_levels, config.occupancy));
        world.insert_resource(SimRng::from_seed(config.seed));
        world.insert_resource(OffspringFactory::default());
        world.insert_resource(TickTally::default());
        world.insert_resource(config);

        Self {
            world,
            schedule: tick_schedule(),
            tick: 0,
        }
    }

    /// Create an empty grid from the levels in `config.grid`.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let levels = config.grid.clone().ok_or(ConfigError::MissingGrid)?;
        Ok(Self::initialize(&levels, config))
    }

    /// Put an organism on a patch during scenario setup.
    ///
    /// Returns `None` when the occupancy policy turns it away, in which case
    /// the organism is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `patch_index` is outside the grid.
    pub fn place(&mut self, mut organism: Organism, patch_index: usize) -> Option<Entity> {
        let grid = self.world.resource::<PatchGrid>();
        let zone = grid.zone(patch_index);
        if !grid.can_admit(patch_index) {
            trace!(
                patch = patch_index,
                zone = %zone,
                variant = %organism.variant(),
                "placement discarded on occupied patch"
            );
            return None;
        }

        organism.settle_birth_zone(zone);
        let entity = self.world.spawn(organism).id();
        self.world
            .resource_mut::<PatchGrid>()
            .admit(patch_index, entity);
        Some(entity)
    }

    /// Run one full tick: move, reproduce, cull.
    pub fn advance_one_tick(&mut self) -> TickSummary {
        self.world.resource_mut::<TickTally>().reset();
        self.schedule.run(&mut self.world);
        self.tick += 1;

        let tally = *self.world.resource::<TickTally>();
        let summary = TickSummary {
            tick: self.tick,
            moved: tally.moved,
            births: tally.births,
            births_discarded: tally.births_discarded,
            deaths: tally.deaths,
            population: self.population(),
        };

        debug!(
            tick = summary.tick,
            moved = summary.moved,
            births = summary.births,
            discarded = summary.births_discarded,
            deaths = summary.deaths,
            population = summary.population,
            "Tick complete"
        );
        summary
    }

    /// Run `ticks` ticks, returning the summary of each.
    pub fn run(&mut self, ticks: u64) -> Vec<TickSummary> {
        (0..ticks).map(|_| self.advance_one_tick()).collect()
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &EngineConfig {
        self.world.resource::<EngineConfig>()
    }

    pub fn grid(&self) -> &PatchGrid {
        self.world.resource::<PatchGrid>()
    }

    pub fn patch_count(&self) -> usize {
        self.grid().len()
    }

    pub fn resource_level(&self, patch_index: usize) -> f64 {
        self.grid().resource_level(patch_index)
    }

    pub fn zone(&self, patch_index: usize) -> Zone {
        self.grid().zone(patch_index)
    }

    pub fn population(&self) -> usize {
        self.grid().population()
    }

    pub fn organism(&self, entity: Entity) -> Option<&Organism> {
        self.world.get::<Organism>(entity)
    }

    /// Organisms on a patch, in arrival order.
    pub fn occupants(&self, patch_index: usize) -> Vec<&Organism> {
        self.grid()
            .occupants(patch_index)
            .iter()
            .filter_map(|&entity| self.organism(entity))
            .collect()
    }

    /// Owned copy of the whole grid.
    pub fn snapshot(&self) -> GridSnapshot {
        let patches = self
            .grid()
            .patches()
            .enumerate()
            .map(|(index, patch)| PatchSnapshot {
                index,
                resource_level: patch.resource_level(),
                zone: patch.zone(),
                occupants: patch
                    .occupants()
                    .iter()
                    .filter_map(|&entity| self.organism(entity))
                    .map(Organism::snapshot)
                    .collect(),
            })
            .collect();

        GridSnapshot {
            tick: self.tick,
            patches,
        }
    }

    pub fn census(&self) -> Census {
        let grid = self.grid();
        let mut census = Census::new();
        for (index, entity) in grid.occupants_in_order() {
            if let Some(organism) = self.organism(entity) {
                census.record(organism, grid.zone(index));
            }
        }
        census
    }

    pub fn generation_report(&self, generation: u64) -> GenerationReport {
        self.census().report(generation)
    }

    /// The simulation's random generator, for seeding scenarios.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.world.resource_mut::<SimRng>().into_inner().0
    }

    fn config_mut(&mut self) -> Mut<'_, EngineConfig> {
        self.world.resource_mut::<EngineConfig>()
    }

    pub fn set_mutation_rate(&mut self, rate: f64) {
        self.config_mut().mutation_rate = clamp_unit(rate);
    }

    /// Negative or NaN deviations become zero.
    pub fn set_mutation_sd(&mut self, sd: f64) {
        self.config_mut().mutation_sd = if sd.is_finite() { sd.max(0.0) } else { 0.0 };
    }

    pub fn set_predator_death_rate(&mut self, rate: f64) {
        self.config_mut().predator_death_rate = clamp_unit(rate);
    }

    pub fn set_zone_locking(&mut self, enabled: bool) {
        self.config_mut().zone_locking = enabled;
    }

    pub fn set_fecundity(&mut self, tiers: FecundityTiers) {
        self.config_mut().fecundity = tiers;
    }

    pub fn set_birth_chances(&mut self, prey: f64, predator: f64) {
        let mut config = self.config_mut();
        config.prey_birth_chance = clamp_unit(prey);
        config.predator_birth_chance = clamp_unit(predator);
    }

    pub fn set_offspring_factory(&mut self, resolver: VariantResolver) {
        self.world.insert_resource(OffspringFactory(resolver));
    }
}
