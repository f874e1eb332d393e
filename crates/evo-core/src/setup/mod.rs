//! Scenario Setup
//!
//! Grid layouts and initial populations for experiments.

pub mod scenarios;

pub use scenarios::*;
