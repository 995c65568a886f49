//! Shared domain: cross-cutting helpers
//!
//! Содержит:
//! - angles: heading convention (local +Y forward), angle wrapping
//! - collision_layers: bitmask constants для sight/bullet масок

pub mod angles;
pub mod collision_layers;

pub use angles::*;
pub use collision_layers::*;
