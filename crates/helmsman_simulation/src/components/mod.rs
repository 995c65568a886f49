//! ECS Components для кораблей-агентов
//!
//! Организация по доменам:
//! - world: карта и координаты (MapId, MapCoordinates)
//! - body: кинематика и тяга корпуса (ShipBody, ThrustProfile)
//! - agent: приказы агента (AgentOrders, AgentMode)

pub mod world;
pub mod body;
pub mod agent;

// Re-exports для удобного импорта
pub use world::*;
pub use body::*;
pub use agent::*;
