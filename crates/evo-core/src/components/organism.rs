//! Organism Components
//!
//! The single component carried by every organism entity: its variant, its
//! evolving traits, and the zone it was born in.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use evo_events::{OrganismSnapshot, Variant, Zone};

/// A prey or predator living on the patch grid.
///
/// `alpha`, `tau` and `move_rate` always lie in [0, 1]; every constructor and
/// setter clamps rather than rejecting.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    variant: Variant,
    /// Sensitivity to differences in patch score
    alpha: f64,
    /// Preference for food (1.0) over safety (0.0)
    tau: f64,
    /// Stored chance of moving each tick
    move_rate: f64,
    /// Set once, when the organism first lands on a patch
    birth_zone: Option<Zone>,
}

impl Organism {
    pub fn new(variant: Variant, alpha: f64, tau: f64, move_rate: f64) -> Self {
        Self {
            variant,
            alpha: clamp_trait(alpha),
            tau: clamp_trait(tau),
            move_rate: clamp_trait(move_rate),
            birth_zone: None,
        }
    }

    pub fn prey_a(alpha: f64, tau: f64, move_rate: f64) -> Self {
        Self::new(Variant::PreyA, alpha, tau, move_rate)
    }

    pub fn prey_b(alpha: f64, tau: f64, move_rate: f64) -> Self {
        Self::new(Variant::PreyB, alpha, tau, move_rate)
    }

    pub fn predator(alpha: f64, tau: f64, move_rate: f64) -> Self {
        Self::new(Variant::Predator, alpha, tau, move_rate)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_prey(&self) -> bool {
        self.variant.is_prey()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Effective chance of moving this tick. PreyB never moves.
    pub fn move_rate(&self) -> f64 {
        match self.variant {
            Variant::PreyB => 0.0,
            Variant::PreyA | Variant::Predator => self.move_rate,
        }
    }

    /// The move rate as stored, ignoring variant overrides.
    pub fn stored_move_rate(&self) -> f64 {
        self.move_rate
    }

    pub fn birth_zone(&self) -> Option<Zone> {
        self.birth_zone
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = clamp_trait(alpha);
    }

    pub fn set_tau(&mut self, tau: f64) {
        self.tau = clamp_trait(tau);
    }

    /// Whether the organism has died of causes other than predation culling.
    pub fn is_dead(&self) -> bool {
        match self.variant {
            Variant::PreyA | Variant::PreyB | Variant::Predator => false,
        }
    }

    /// Records the zone of the first patch this organism lands on. Later
    /// calls leave the first zone untouched.
    pub(crate) fn settle_birth_zone(&mut self, zone: Zone) {
        if self.birth_zone.is_none() {
            self.birth_zone = Some(zone);
        }
    }

    /// Same traits and birth zone under a different variant.
    pub(crate) fn reclassified(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// A freshly conceived copy takes the zone it was conceived in.
    pub(crate) fn born_in(mut self, zone: Zone) -> Self {
        self.birth_zone = Some(zone);
        self
    }

    pub fn snapshot(&self) -> OrganismSnapshot {
        OrganismSnapshot {
            variant: self.variant,
            alpha: self.alpha,
            tau: self.tau,
            move_rate: self.move_rate,
            birth_zone: self.birth_zone,
        }
    }
}

fn clamp_trait(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Chooses an offspring's concrete variant from its class and final tau.
pub type VariantResolver = fn(is_prey: bool, tau: f64) -> Variant;

/// Default resolver: prey split on tau at one half.
pub fn resolve_variant(is_prey: bool, tau: f64) -> Variant {
    if !is_prey {
        Variant::Predator
    } else if tau > 0.5 {
        Variant::PreyA
    } else {
        Variant::PreyB
    }
}

/// Resolver with a single prey type, as used by the grid visualisation runs.
pub fn single_prey_variant(is_prey: bool, _tau: f64) -> Variant {
    if is_prey {
        Variant::PreyA
    } else {
        Variant::Predator
    }
}

/// Resource: how offspring variants are resolved after mutation
#[derive(Resource, Debug, Clone, Copy)]
pub struct OffspringFactory(pub VariantResolver);

impl OffspringFactory {
    pub fn resolve(&self, is_prey: bool, tau: f64) -> Variant {
        (self.0)(is_prey, tau)
    }
}

impl Default for OffspringFactory {
    fn default() -> Self {
        Self(resolve_variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prey_b_never_moves() {
        let prey = Organism::prey_b(0.5, 0.2, 0.9);
        assert_eq!(prey.move_rate(), 0.0);
        assert_eq!(prey.stored_move_rate(), 0.9);

        let mobile = Organism::prey_a(0.5, 0.8, 0.9);
        assert_eq!(mobile.move_rate(), 0.9);
    }

    #[test]
    fn test_traits_are_clamped() {
        let mut organism = Organism::predator(1.7, -0.3, 2.0);
        assert_eq!(organism.alpha(), 1.0);
        assert_eq!(organism.tau(), 0.0);
        assert_eq!(organism.move_rate(), 1.0);

        organism.set_alpha(-4.0);
        organism.set_tau(f64::NAN);
        assert_eq!(organism.alpha(), 0.0);
        assert_eq!(organism.tau(), 0.0);
    }

    #[test]
    fn test_birth_zone_is_set_once() {
        let mut organism = Organism::prey_a(0.5, 0.5, 0.5);
        assert_eq!(organism.birth_zone(), None);

        organism.settle_birth_zone(Zone::High);
        organism.settle_birth_zone(Zone::Low);
        assert_eq!(organism.birth_zone(), Some(Zone::High));
    }

    #[test]
    fn test_baseline_variants_never_die_of_old_age() {
        for variant in Variant::ALL {
            assert!(!Organism::new(variant, 0.5, 0.5, 0.5).is_dead());
        }
    }

    #[test]
    fn test_clone_keeps_variant_and_traits() {
        let parent = Organism::predator(0.3, 0.7, 0.4);
        let child = parent.clone();
        assert_eq!(child, parent);
        assert!(!child.is_prey());
    }

    #[test]
    fn test_resolve_variant() {
        assert_eq!(resolve_variant(true, 0.51), Variant::PreyA);
        assert_eq!(resolve_variant(true, 0.5), Variant::PreyB);
        assert_eq!(resolve_variant(true, 0.0), Variant::PreyB);
        assert_eq!(resolve_variant(false, 0.9), Variant::Predator);
        assert_eq!(single_prey_variant(true, 0.1), Variant::PreyA);
    }

    #[test]
    fn test_reclassified_keeps_traits() {
        let mut parent = Organism::prey_a(0.4, 0.45, 0.6);
        parent.settle_birth_zone(Zone::Medium);
        let child = parent.clone().reclassified(Variant::PreyB);
        assert_eq!(child.variant(), Variant::PreyB);
        assert_eq!(child.alpha(), 0.4);
        assert_eq!(child.stored_move_rate(), 0.6);
        assert_eq!(child.birth_zone(), Some(Zone::Medium));
    }
}
