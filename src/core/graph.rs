//! The live circuit graph: components and connections in creation order.
//!
//! All structural mutation goes through this store. Operations follow a
//! best-effort UI command contract: unknown ids are silently ignored and no
//! operation fails, except `try_connect`, whose rejection reason callers may
//! log before discarding.

use crate::core::component::{Component, ComponentKind, KindState};
use crate::core::errors::WireError;
use crate::core::factory;
use crate::core::types::{ComponentId, PortDirection, PortRef};
use log::debug;
use rand::Rng;

/// Directed wire from one component's output port to another's input port.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: ComponentId,
    pub from_port: usize,
    pub to: ComponentId,
    pub to_port: usize,
    /// Last value copied across this wire; rendering cache only, the engine
    /// recomputes it every tick from the live port states.
    pub signal: bool,
}

/// Placement window for randomized "add" requests.
const RANDOM_X_RANGE: std::ops::Range<f32> = 100.0..600.0;
const RANDOM_Y_RANGE: std::ops::Range<f32> = 50.0..400.0;

/// Owns the component and connection collections.
///
/// Both collections preserve creation order; the propagation engine relies on
/// that order for connection copying and component evaluation.
#[derive(Debug, Default)]
pub struct GraphStore {
    components: Vec<Component>,
    connections: Vec<Connection>,
    selected: Option<ComponentId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a component of `kind` at (x, y) and append it to the store.
    pub fn add_component(&mut self, kind: ComponentKind, x: f32, y: f32) -> ComponentId {
        let component = factory::create(kind, x, y);
        let id = component.id.clone();
        debug!("add {} at ({:.1}, {:.1})", id, x, y);
        self.components.push(component);
        id
    }

    /// Create a component at a random position inside the placement window.
    pub fn add_component_at_random<R: Rng>(&mut self, kind: ComponentKind, rng: &mut R) -> ComponentId {
        let x = rng.gen_range(RANDOM_X_RANGE);
        let y = rng.gen_range(RANDOM_Y_RANGE);
        self.add_component(kind, x, y)
    }

    /// Remove a component and every connection referencing it. Clears the
    /// selection if it pointed at the removed component. Unknown ids are a
    /// no-op.
    pub fn remove_component(&mut self, id: &ComponentId) {
        let before = self.components.len();
        self.components.retain(|c| &c.id != id);
        if self.components.len() == before {
            return;
        }
        debug!("remove {}", id);
        self.connections.retain(|c| &c.from != id && &c.to != id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    /// Overwrite a component's position. Connection geometry needs no update;
    /// it is derived from current positions plus fixed port offsets.
    pub fn move_component(&mut self, id: &ComponentId, x: f32, y: f32) {
        if let Some(component) = self.component_mut(id) {
            component.x = x;
            component.y = y;
        }
    }

    /// Flip a switch's stored state. No-op for any other kind or unknown id.
    pub fn toggle_switch(&mut self, id: &ComponentId) {
        if let Some(component) = self.component_mut(id) {
            if let KindState::Switch { on } = &mut component.state {
                *on = !*on;
                debug!("switch {} -> {}", id, on);
            }
        }
    }

    /// Flip a clock's stored state. Called by the clock scheduler only.
    pub(crate) fn toggle_clock(&mut self, id: &ComponentId) {
        if let Some(component) = self.component_mut(id) {
            if let KindState::Clock { on, .. } = &mut component.state {
                *on = !*on;
            }
        }
    }

    /// Attempt to wire two ports together.
    ///
    /// The endpoints may arrive in either order; the stored connection always
    /// runs output -> input. Rejections leave the store untouched. An input
    /// port already driven by another wire is deliberately not rejected -
    /// the engine resolves multi-driver inputs last-write-wins.
    pub fn try_connect(&mut self, a: PortRef, b: PortRef) -> Result<(), WireError> {
        if !a.direction.can_connect_to(&b.direction) {
            return Err(WireError::SameDirection);
        }
        if a.component == b.component {
            return Err(WireError::SameComponent);
        }
        let (from, to) = if a.direction == PortDirection::Output {
            (a, b)
        } else {
            (b, a)
        };

        let source = self
            .component(&from.component)
            .ok_or_else(|| WireError::UnknownComponent(from.component.clone()))?;
        if from.port >= source.outputs.len() {
            return Err(WireError::PortOutOfRange(from.component.clone(), from.port));
        }
        let target = self
            .component(&to.component)
            .ok_or_else(|| WireError::UnknownComponent(to.component.clone()))?;
        if to.port >= target.inputs.len() {
            return Err(WireError::PortOutOfRange(to.component.clone(), to.port));
        }

        let duplicate = self.connections.iter().any(|c| {
            c.from == from.component
                && c.from_port == from.port
                && c.to == to.component
                && c.to_port == to.port
        });
        if duplicate {
            return Err(WireError::Duplicate);
        }

        debug!(
            "connect {}:{} -> {}:{}",
            from.component, from.port, to.component, to.port
        );
        self.connections.push(Connection {
            from: from.component,
            from_port: from.port,
            to: to.component,
            to_port: to.port,
            signal: false,
        });
        Ok(())
    }

    /// Delete the matching connection if present; no-op otherwise.
    pub fn remove_connection(
        &mut self,
        from: &ComponentId,
        from_port: usize,
        to: &ComponentId,
        to_port: usize,
    ) {
        self.connections.retain(|c| {
            !(&c.from == from && c.from_port == from_port && &c.to == to && c.to_port == to_port)
        });
    }

    /// Empty both collections and drop the selection.
    pub fn clear(&mut self) {
        debug!(
            "clear {} components, {} connections",
            self.components.len(),
            self.connections.len()
        );
        self.components.clear();
        self.connections.clear();
        self.selected = None;
    }

    /// Select a component, or pass `None` to clear the selection. Selecting
    /// an id not in the store is a no-op.
    pub fn set_selected(&mut self, id: Option<ComponentId>) {
        match id {
            Some(id) if self.component(&id).is_none() => {}
            other => self.selected = other,
        }
    }

    pub fn selected(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    pub(crate) fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| &c.id == id)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub(crate) fn connection_mut(&mut self, index: usize) -> Option<&mut Connection> {
        self.connections.get_mut(index)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
