//! Physics simulation module
//!
//! Headless mover: ShipInput → ShipBody → Transform.

pub mod movement;

// Re-export основных типов
pub use movement::{
    apply_ship_input,
    spawn_ship,
    ShipInput,
    ShipMotionPlugin,
};
