pub mod core;

// Re-export commonly used types
pub use crate::core::component::{Component, ComponentKind, KindState, Port};
pub use crate::core::engine::{SignalEngine, TICK_PERIOD};
pub use crate::core::errors::WireError;
pub use crate::core::graph::{Connection, GraphStore};
pub use crate::core::interaction::{Hit, InteractionState};
pub use crate::core::simulator::{Key, Simulator};
pub use crate::core::types::{ComponentId, PortDirection, PortRef};
