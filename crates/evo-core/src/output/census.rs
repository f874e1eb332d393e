//! Population Census
//!
//! Counts and trait averages over the organisms on the grid, filterable by
//! variant and by the zone each organism currently stands in.

use evo_events::{GenerationReport, Variant, Zone, ZoneCounts};

use crate::components::Organism;

/// Which organisms a census query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantFilter {
    #[default]
    Any,
    /// Both prey sub-types
    Prey,
    Predators,
    Only(Variant),
}

impl VariantFilter {
    pub fn matches(self, variant: Variant) -> bool {
        match self {
            VariantFilter::Any => true,
            VariantFilter::Prey => variant.is_prey(),
            VariantFilter::Predators => !variant.is_prey(),
            VariantFilter::Only(only) => only == variant,
        }
    }
}

/// Variant and zone constraints for a census query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrganismFilter {
    pub variant: VariantFilter,
    pub zone: Option<Zone>,
}

impl OrganismFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn prey() -> Self {
        Self {
            variant: VariantFilter::Prey,
            zone: None,
        }
    }

    pub fn predators() -> Self {
        Self {
            variant: VariantFilter::Predators,
            zone: None,
        }
    }

    pub fn variant(variant: Variant) -> Self {
        Self {
            variant: VariantFilter::Only(variant),
            zone: None,
        }
    }

    /// Narrow this filter to one zone.
    pub fn in_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn matches(&self, variant: Variant, zone: Zone) -> bool {
        self.variant.matches(variant) && self.zone.map_or(true, |z| z == zone)
    }
}

#[derive(Debug, Clone, Copy)]
struct CensusEntry {
    variant: Variant,
    zone: Zone,
    alpha: f64,
    tau: f64,
}

/// A read-only tally of the grid, taken between ticks
#[derive(Debug, Clone, Default)]
pub struct Census {
    entries: Vec<CensusEntry>,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an organism standing in `zone`.
    pub fn record(&mut self, organism: &Organism, zone: Zone) {
        self.entries.push(CensusEntry {
            variant: organism.variant(),
            zone,
            alpha: organism.alpha(),
            tau: organism.tau(),
        });
    }

    fn matching<'a>(&'a self, filter: &'a OrganismFilter) -> impl Iterator<Item = &'a CensusEntry> {
        self.entries
            .iter()
            .filter(move |e| filter.matches(e.variant, e.zone))
    }

    pub fn count(&self, filter: &OrganismFilter) -> usize {
        self.matching(filter).count()
    }

    /// Mean alpha of matching organisms, 0.0 when none match.
    pub fn average_alpha(&self, filter: &OrganismFilter) -> f64 {
        mean(self.matching(filter).map(|e| e.alpha))
    }

    /// Mean tau of matching organisms, 0.0 when none match.
    pub fn average_tau(&self, filter: &OrganismFilter) -> f64 {
        mean(self.matching(filter).map(|e| e.tau))
    }

    /// Matching organisms split by zone.
    pub fn zone_counts(&self, filter: &OrganismFilter) -> ZoneCounts {
        let mut counts = ZoneCounts::new();
        for entry in self.matching(filter) {
            counts.record(entry.zone);
        }
        counts
    }

    pub fn report(&self, generation: u64) -> GenerationReport {
        let prey = OrganismFilter::prey();
        let predators = OrganismFilter::predators();
        GenerationReport {
            generation,
            avg_prey_alpha: self.average_alpha(&prey),
            avg_prey_tau: self.average_tau(&prey),
            avg_predator_alpha: self.average_alpha(&predators),
            prey: self.zone_counts(&prey),
            predators: self.zone_counts(&predators),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
