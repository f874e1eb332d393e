//! Scenario Seeding
//!
//! Ready-made starting states for experiments.

use rand::seq::SliceRandom;

use crate::components::Organism;
use crate::config::EngineConfig;
use crate::simulation::Simulation;

/// Resource levels of the banded scenario: three patches per zone.
pub const BANDED_LEVELS: [f64; 9] = [0.1, 0.1, 0.1, 0.5, 0.5, 0.5, 0.9, 0.9, 0.9];

/// Prey seeded onto every patch of the banded scenario
pub const BANDED_PREY_PER_PATCH: usize = 5;

/// Zoned scenario grid width in cells
pub const ZONED_COLUMNS: usize = 30;
/// Zoned scenario grid height in cells
pub const ZONED_ROWS: usize = 30;
/// Side length of one square block
pub const ZONED_BLOCK: usize = 10;
/// Prey scattered into each block
pub const ZONED_PREY_PER_BLOCK: usize = 10;

/// Resource level of each band of blocks, top row first
const ZONED_BAND_LEVELS: [f64; 3] = [0.9, 0.5, 0.1];

/// Nine patches (low, medium, high bands) each seeded with five PreyA and one
/// predator, all with alpha, tau and move rate of one half.
///
/// Under single occupancy only the first prey on each patch is kept.
pub fn banded_scenario(config: EngineConfig) -> Simulation {
    let mut sim = Simulation::initialize(&BANDED_LEVELS, config);

    for patch in 0..BANDED_LEVELS.len() {
        for _ in 0..BANDED_PREY_PER_PATCH {
            sim.place(Organism::prey_a(0.5, 0.5, 0.5), patch);
        }
        sim.place(Organism::predator(0.5, 0.5, 0.5), patch);
    }

    sim
}

/// Row-major cell index on the zoned grid.
pub fn cell_index(x: usize, y: usize) -> usize {
    y * ZONED_COLUMNS + x
}

/// Resource levels of the zoned grid: three rows of three blocks, high
/// resources on top and low at the bottom.
pub fn zoned_levels() -> Vec<f64> {
    (0..ZONED_ROWS * ZONED_COLUMNS)
        .map(|index| ZONED_BAND_LEVELS[(index / ZONED_COLUMNS) / ZONED_BLOCK])
        .collect()
}

/// 30x30 grid of nine 10x10 blocks. Each block gets one food-averse predator
/// at its centre and ten food-seeking prey on shuffled cells of the rest of
/// the block. The shuffle draws from the simulation's own generator.
pub fn zoned_scenario(config: EngineConfig) -> Simulation {
    let mut sim = Simulation::initialize(&zoned_levels(), config);

    for block_y in (0..ZONED_ROWS).step_by(ZONED_BLOCK) {
        for block_x in (0..ZONED_COLUMNS).step_by(ZONED_BLOCK) {
            let center = cell_index(block_x + ZONED_BLOCK / 2, block_y + ZONED_BLOCK / 2);
            sim.place(Organism::predator(0.5, 0.0, 0.5), center);

            let mut cells: Vec<usize> = (0..ZONED_BLOCK)
                .flat_map(|dy| (0..ZONED_BLOCK).map(move |dx| cell_index(block_x + dx, block_y + dy)))
                .filter(|&cell| cell != center)
                .collect();
            cells.shuffle(sim.rng());

            for &cell in cells.iter().take(ZONED_PREY_PER_BLOCK) {
                sim.place(Organism::prey_a(0.5, 1.0, 0.5), cell);
            }
        }
    }

    sim
}
