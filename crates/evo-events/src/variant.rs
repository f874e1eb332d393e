//! Organism Variants
//!
//! The closed set of organism kinds: two prey sub-types and one predator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete organism variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Mobile prey, food-leaning (tau above one half)
    PreyA,
    /// Sessile prey, safety-leaning; never moves
    PreyB,
    Predator,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::PreyA, Variant::PreyB, Variant::Predator];

    /// True for both prey sub-types.
    pub fn is_prey(self) -> bool {
        match self {
            Variant::PreyA | Variant::PreyB => true,
            Variant::Predator => false,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::PreyA => write!(f, "prey_a"),
            Variant::PreyB => write!(f, "prey_b"),
            Variant::Predator => write!(f, "predator"),
        }
    }
}
