use crate::core::types::{ComponentId, PortDirection};
use std::time::Duration;

/// Kind tag for every placeable component.
///
/// This is the vocabulary of the "add component" command surface; per-kind
/// runtime state lives in [`KindState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Switch,
    Clock,
    Led,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    Buffer,
    Latch,
    FullAdder,
    Alu,
    Register,
    Encoder,
    Decoder,
    Mux,
    Demux,
}

impl ComponentKind {
    /// Display label, also used as the id prefix.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Switch => "SWITCH",
            ComponentKind::Clock => "CLOCK",
            ComponentKind::Led => "LED",
            ComponentKind::And => "AND",
            ComponentKind::Or => "OR",
            ComponentKind::Not => "NOT",
            ComponentKind::Nand => "NAND",
            ComponentKind::Nor => "NOR",
            ComponentKind::Xor => "XOR",
            ComponentKind::Xnor => "XNOR",
            ComponentKind::Buffer => "BUFFER",
            ComponentKind::Latch => "LATCH",
            ComponentKind::FullAdder => "FULL_ADDER",
            ComponentKind::Alu => "ALU",
            ComponentKind::Register => "REGISTER",
            ComponentKind::Encoder => "ENCODER",
            ComponentKind::Decoder => "DECODER",
            ComponentKind::Mux => "MUX",
            ComponentKind::Demux => "DEMUX",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-kind runtime state, one variant per kind.
///
/// Transfer functions match on this exhaustively, so adding a kind without a
/// transfer function is a compile error rather than a silent fallthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum KindState {
    Switch { on: bool },
    Clock { on: bool, period: Duration },
    Led,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    Buffer,
    Latch { state: bool },
    FullAdder,
    /// The stored operation index mirrors the original model; the evaluated
    /// op selector is input port 3.
    Alu { operation: u8 },
    Register { value: u8 },
    Encoder,
    Decoder,
    Mux,
    Demux,
}

impl KindState {
    /// The kind tag for this state.
    pub fn kind(&self) -> ComponentKind {
        match self {
            KindState::Switch { .. } => ComponentKind::Switch,
            KindState::Clock { .. } => ComponentKind::Clock,
            KindState::Led => ComponentKind::Led,
            KindState::And => ComponentKind::And,
            KindState::Or => ComponentKind::Or,
            KindState::Not => ComponentKind::Not,
            KindState::Nand => ComponentKind::Nand,
            KindState::Nor => ComponentKind::Nor,
            KindState::Xor => ComponentKind::Xor,
            KindState::Xnor => ComponentKind::Xnor,
            KindState::Buffer => ComponentKind::Buffer,
            KindState::Latch { .. } => ComponentKind::Latch,
            KindState::FullAdder => ComponentKind::FullAdder,
            KindState::Alu { .. } => ComponentKind::Alu,
            KindState::Register { .. } => ComponentKind::Register,
            KindState::Encoder => ComponentKind::Encoder,
            KindState::Decoder => ComponentKind::Decoder,
            KindState::Mux => ComponentKind::Mux,
            KindState::Demux => ComponentKind::Demux,
        }
    }
}

/// Attachment point on a component carrying one boolean signal.
///
/// The offset is relative to the owning component's origin; absolute port
/// positions are derived at hit-test and draw time from the component's
/// current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Port {
    pub dx: f32,
    pub dy: f32,
    pub direction: PortDirection,
    pub signal: bool,
}

impl Port {
    pub fn input(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            direction: PortDirection::Input,
            signal: false,
        }
    }

    pub fn output(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            direction: PortDirection::Output,
            signal: false,
        }
    }
}

/// A placed logic element: fixed port geometry, position, selection flag and
/// kind-tagged internal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub selected: bool,
    pub state: KindState,
}

impl Component {
    /// The kind tag for this component.
    pub fn kind(&self) -> ComponentKind {
        self.state.kind()
    }

    /// Bounding-box containment test in canvas coordinates.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// The value this component drives onto the given output port.
    ///
    /// Switches and clocks drive their stored state directly so a freshly
    /// toggled source is visible on the very next tick; every other kind
    /// drives the output computed on the previous tick. A missing port index
    /// reads as `false`.
    pub fn driving_signal(&self, port: usize) -> bool {
        match &self.state {
            KindState::Switch { on } | KindState::Clock { on, .. } => *on,
            _ => self.outputs.get(port).map_or(false, |p| p.signal),
        }
    }

    /// Read one input signal; a missing port index reads as `false`.
    pub fn input_signal(&self, port: usize) -> bool {
        self.inputs.get(port).map_or(false, |p| p.signal)
    }
}
