//! Report Types
//!
//! Per-tick and per-generation aggregates produced by the engine.

use serde::{Deserialize, Serialize};

use crate::Zone;

/// Header line for CSV generation reports.
pub const CSV_HEADER: &str = "Generation,AvgAlphaPrey,PreyLow,PreyMed,PreyHigh,PredLow,PredMed,PredHigh";

/// Organism counts split by zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl ZoneCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one organism in the given zone.
    pub fn record(&mut self, zone: Zone) {
        *self.get_mut(zone) += 1;
    }

    pub fn get(&self, zone: Zone) -> usize {
        match zone {
            Zone::Low => self.low,
            Zone::Medium => self.medium,
            Zone::High => self.high,
        }
    }

    fn get_mut(&mut self, zone: Zone) -> &mut usize {
        match zone {
            Zone::Low => &mut self.low,
            Zone::Medium => &mut self.medium,
            Zone::High => &mut self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Tick number after advancing (first tick is 1)
    pub tick: u64,
    /// Organisms that changed patch
    pub moved: usize,
    /// Offspring admitted to the grid
    pub births: usize,
    /// Offspring destroyed because their patch was full
    pub births_discarded: usize,
    /// Organisms removed by culling
    pub deaths: usize,
    /// Population at the end of the tick
    pub population: usize,
}

/// One row of an experiment's results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: u64,
    /// Mean prey alpha, 0.0 when no prey remain
    pub avg_prey_alpha: f64,
    #[serde(default)]
    pub avg_prey_tau: f64,
    #[serde(default)]
    pub avg_predator_alpha: f64,
    pub prey: ZoneCounts,
    pub predators: ZoneCounts,
}

impl GenerationReport {
    /// Total organisms counted in this report.
    pub fn population(&self) -> usize {
        self.prey.total() + self.predators.total()
    }

    /// Format as a CSV row matching `CSV_HEADER`.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.4},{},{},{},{},{},{}",
            self.generation,
            self.avg_prey_alpha,
            self.prey.low,
            self.prey.medium,
            self.prey.high,
            self.predators.low,
            self.predators.medium,
            self.predators.high,
        )
    }

    /// Format as a tab separated console row.
    pub fn to_console_row(&self) -> String {
        format!(
            "{}\t{:.4}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.generation,
            self.avg_prey_alpha,
            self.prey.low,
            self.prey.medium,
            self.prey.high,
            self.predators.low,
            self.predators.medium,
            self.predators.high,
        )
    }
}
