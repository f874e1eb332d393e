//! ECS Components
//!
//! The organism component and the patch grid resource.

pub mod grid;
pub mod organism;

pub use grid::*;
pub use organism::*;
