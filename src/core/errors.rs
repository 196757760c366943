use crate::core::types::ComponentId;

/// Reasons a wiring attempt is rejected by the graph store.
///
/// The command surface never propagates these to the UI - a rejected gesture
/// simply produces no wire - but the graph store reports the precise reason
/// so callers can log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Both endpoints have the same direction
    SameDirection,
    /// Both endpoints belong to the same component
    SameComponent,
    /// An identical wire already exists
    Duplicate,
    /// One endpoint names a component not in the store
    UnknownComponent(ComponentId),
    /// One endpoint names a port index the component does not have
    PortOutOfRange(ComponentId, usize),
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::SameDirection => {
                write!(f, "cannot connect two ports of the same direction")
            }
            WireError::SameComponent => {
                write!(f, "cannot connect a component to itself")
            }
            WireError::Duplicate => write!(f, "connection already exists"),
            WireError::UnknownComponent(id) => {
                write!(f, "component '{}' not found", id)
            }
            WireError::PortOutOfRange(id, port) => {
                write!(f, "port {} not found on component '{}'", port, id)
            }
        }
    }
}

impl std::error::Error for WireError {}
