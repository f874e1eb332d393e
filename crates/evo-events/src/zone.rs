//! Resource Zones
//!
//! Coarse Low/Medium/High buckets derived from a patch's resource level.
//!
//! # Example
//!
//! ```
//! use evo_events::Zone;
//!
//! assert_eq!(Zone::classify(0.1), Zone::Low);
//! assert_eq!(Zone::classify(0.5), Zone::Medium);
//! assert_eq!(Zone::classify(0.9), Zone::High);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource levels below this are `Zone::Low`.
pub const MEDIUM_THRESHOLD: f64 = 0.33;

/// Resource levels at or above this are `Zone::High`.
pub const HIGH_THRESHOLD: f64 = 0.66;

/// Resource zone of a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Low,
    Medium,
    High,
}

impl Zone {
    /// All zones, lowest first.
    pub const ALL: [Zone; 3] = [Zone::Low, Zone::Medium, Zone::High];

    /// Classifies a resource level into its zone.
    pub fn classify(resource_level: f64) -> Self {
        if resource_level < MEDIUM_THRESHOLD {
            Zone::Low
        } else if resource_level < HIGH_THRESHOLD {
            Zone::Medium
        } else {
            Zone::High
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Low => write!(f, "low"),
            Zone::Medium => write!(f, "medium"),
            Zone::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(Zone::classify(0.0), Zone::Low);
        assert_eq!(Zone::classify(0.3299), Zone::Low);
        assert_eq!(Zone::classify(0.33), Zone::Medium);
        assert_eq!(Zone::classify(0.6599), Zone::Medium);
        assert_eq!(Zone::classify(0.66), Zone::High);
        assert_eq!(Zone::classify(1.0), Zone::High);
    }

    #[test]
    fn test_zone_serde() {
        let json = serde_json::to_string(&Zone::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
