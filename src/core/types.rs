use crate::core::component::ComponentKind;
use uuid::Uuid;

/// Unique identifier for a placed component.
///
/// Generated ids embed the kind name for readable logs; uniqueness is the
/// only property callers may rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    /// Generate a fresh id for a component of the given kind.
    pub fn generate(kind: ComponentKind) -> Self {
        Self(format!("{}-{}", kind, Uuid::new_v4()))
    }

    /// Wrap a raw id string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a port on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Input port - receives a signal from another component
    Input,
    /// Output port - drives a signal toward other components
    Output,
}

impl PortDirection {
    /// Check whether a wire may run between a port of this direction and one
    /// of `other`. Wires always link one output to one input.
    pub fn can_connect_to(&self, other: &PortDirection) -> bool {
        match (self, other) {
            (PortDirection::Output, PortDirection::Input) => true,
            (PortDirection::Input, PortDirection::Output) => true,
            _ => false,
        }
    }
}

/// Handle naming one port on one component.
///
/// This is the currency of the wiring gesture: the interaction machine
/// records the first clicked port as a `PortRef` and hands both endpoints to
/// the graph store when the gesture completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub component: ComponentId,
    pub port: usize,
    pub direction: PortDirection,
}

impl PortRef {
    pub fn new(component: ComponentId, port: usize, direction: PortDirection) -> Self {
        Self {
            component,
            port,
            direction,
        }
    }
}
