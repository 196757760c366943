//! Selection, wiring and dragging gestures.
//!
//! One explicit state machine replaces the pile of independent flags a
//! direct-manipulation UI tends to accumulate: the three states are mutually
//! exclusive by construction, so an in-progress drag can never coexist with
//! an in-progress wiring gesture.

use crate::core::graph::GraphStore;
use crate::core::types::{ComponentId, PortDirection, PortRef};
use log::debug;

/// Pointer pick radius around a port center, in canvas pixels.
pub const PORT_HIT_RADIUS: f32 = 8.0;

/// Current gesture state.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// A wiring gesture is in progress; the recorded port is its first
    /// endpoint.
    Connecting(PortRef),
    /// A component is being dragged; the offsets keep the grab point fixed
    /// under the pointer.
    Dragging {
        component: ComponentId,
        grab_dx: f32,
        grab_dy: f32,
    },
}

impl Default for InteractionState {
    fn default() -> Self {
        InteractionState::Idle
    }
}

/// What a pointer press at some canvas position landed on.
///
/// Ports win over component bodies: all ports of all components are scanned
/// (outputs before inputs, components in store order) before any bounding box
/// is considered, so a port remains clickable even where boxes overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Port(PortRef),
    Body(ComponentId),
    Background,
}

/// Resolve a canvas position to the element under it.
pub fn hit_test(graph: &GraphStore, x: f32, y: f32) -> Hit {
    let radius_sq = PORT_HIT_RADIUS * PORT_HIT_RADIUS;
    for component in graph.components() {
        for (index, port) in component.outputs.iter().enumerate() {
            let dx = x - (component.x + port.dx);
            let dy = y - (component.y + port.dy);
            if dx * dx + dy * dy <= radius_sq {
                return Hit::Port(PortRef::new(
                    component.id.clone(),
                    index,
                    PortDirection::Output,
                ));
            }
        }
        for (index, port) in component.inputs.iter().enumerate() {
            let dx = x - (component.x + port.dx);
            let dy = y - (component.y + port.dy);
            if dx * dx + dy * dy <= radius_sq {
                return Hit::Port(PortRef::new(
                    component.id.clone(),
                    index,
                    PortDirection::Input,
                ));
            }
        }
    }
    for component in graph.components() {
        if component.contains(x, y) {
            return Hit::Body(component.id.clone());
        }
    }
    Hit::Background
}

/// The gesture state machine. Owns nothing but its state; every transition
/// that touches the circuit goes through the graph store passed in.
#[derive(Debug, Default)]
pub struct Interaction {
    state: InteractionState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Drop any in-progress gesture.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// A port was activated.
    ///
    /// From `Idle` this opens a wiring gesture; while `Connecting` it
    /// completes the gesture, wiring the two ports if the graph accepts them.
    /// Either way the machine ends up `Idle` after a completion attempt - a
    /// rejected wire is logged and dropped, matching the best-effort command
    /// contract.
    pub fn port_activated(&mut self, graph: &mut GraphStore, port: PortRef) {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => {
                self.state = InteractionState::Connecting(port);
            }
            InteractionState::Connecting(first) => {
                if let Err(err) = graph.try_connect(first, port) {
                    debug!("wiring rejected: {}", err);
                }
            }
            // A press cannot arrive mid-drag; ignore and stay dragging.
            dragging => self.state = dragging,
        }
    }

    /// Abort an in-progress wiring gesture, if any.
    pub fn cancel_connection(&mut self) {
        if matches!(self.state, InteractionState::Connecting(_)) {
            self.state = InteractionState::Idle;
        }
    }

    /// A component body was pressed. Only meaningful from `Idle`: starts a
    /// drag with the grab offset and selects the component.
    pub fn body_pressed(&mut self, graph: &mut GraphStore, id: &ComponentId, x: f32, y: f32) {
        if self.state != InteractionState::Idle {
            return;
        }
        if let Some(component) = graph.component(id) {
            self.state = InteractionState::Dragging {
                component: id.clone(),
                grab_dx: x - component.x,
                grab_dy: y - component.y,
            };
            graph.set_selected(Some(id.clone()));
        }
    }

    /// Pointer moved. While dragging, the component follows the pointer
    /// minus the grab offset, clamped to non-negative coordinates.
    pub fn pointer_moved(&mut self, graph: &mut GraphStore, x: f32, y: f32) {
        if let InteractionState::Dragging {
            component,
            grab_dx,
            grab_dy,
        } = &self.state
        {
            let nx = (x - grab_dx).max(0.0);
            let ny = (y - grab_dy).max(0.0);
            graph.move_component(component, nx, ny);
        }
    }

    /// Pointer released: a drag ends, selection persists.
    pub fn pointer_released(&mut self) {
        if matches!(self.state, InteractionState::Dragging { .. }) {
            self.state = InteractionState::Idle;
        }
    }

    /// A press that landed on empty canvas: cancels a wiring gesture, or
    /// clears the selection when idle.
    pub fn background_pressed(&mut self, graph: &mut GraphStore) {
        match self.state {
            InteractionState::Connecting(_) => self.state = InteractionState::Idle,
            InteractionState::Idle => graph.set_selected(None),
            InteractionState::Dragging { .. } => {}
        }
    }

    /// Route a raw pointer press through hit-testing.
    pub fn pointer_down(&mut self, graph: &mut GraphStore, x: f32, y: f32) {
        match hit_test(graph, x, y) {
            Hit::Port(port) => self.port_activated(graph, port),
            Hit::Body(id) => self.body_pressed(graph, &id, x, y),
            Hit::Background => self.background_pressed(graph),
        }
    }

    /// A double activation toggles switches; port hits and other kinds are
    /// ignored. Gesture state is unaffected.
    pub fn double_click(&mut self, graph: &mut GraphStore, x: f32, y: f32) {
        let hit = graph
            .components()
            .iter()
            .find(|c| c.contains(x, y))
            .map(|c| c.id.clone());
        if let Some(id) = hit {
            graph.toggle_switch(&id);
        }
    }
}
