//! The simulator facade: the imperative command surface consumed by the UI
//! layer, plus read-only state for the renderer.
//!
//! The facade owns the graph store, the propagation engine, the clock
//! scheduler and the interaction machine, and keeps the cross-cutting
//! invariants: every clock component has exactly one timer for exactly as
//! long as it lives, and `clear_all` resets everything at once.
//!
//! The host loop is expected to call [`Simulator::tick`] on a fixed cadence
//! (see [`TICK_PERIOD`]) and [`Simulator::advance_clocks`] with the elapsed
//! time between iterations; all calls must come from one thread.

use crate::core::clock::ClockScheduler;
use crate::core::component::{Component, ComponentKind, KindState};
use crate::core::engine::{SignalEngine, TICK_PERIOD};
use crate::core::graph::{Connection, GraphStore};
use crate::core::interaction::{Interaction, InteractionState};
use crate::core::types::{ComponentId, PortRef};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Keyboard commands the core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
}

/// Facade over the whole simulation core.
pub struct Simulator {
    graph: GraphStore,
    engine: SignalEngine,
    clocks: ClockScheduler,
    interaction: Interaction,
    rng: StdRng,
}

impl Simulator {
    /// Create an empty simulator with entropy-seeded placement randomness.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty simulator with a fixed placement seed, for
    /// reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            graph: GraphStore::new(),
            engine: SignalEngine::new(),
            clocks: ClockScheduler::new(),
            interaction: Interaction::new(),
            rng,
        }
    }

    // --- topology commands ---

    /// Add a component at the given position. Clocks also get their periodic
    /// timer registered here.
    pub fn add_component(&mut self, kind: ComponentKind, x: f32, y: f32) -> ComponentId {
        let id = self.graph.add_component(kind, x, y);
        self.register_clock_if_needed(&id);
        id
    }

    /// Add a component at a randomized position inside the placement window.
    pub fn add_component_at_random(&mut self, kind: ComponentKind) -> ComponentId {
        let id = self.graph.add_component_at_random(kind, &mut self.rng);
        self.register_clock_if_needed(&id);
        id
    }

    fn register_clock_if_needed(&mut self, id: &ComponentId) {
        if let Some(component) = self.graph.component(id) {
            if let KindState::Clock { period, .. } = component.state {
                self.clocks.register(id.clone(), period);
            }
        }
    }

    /// Remove a component, its connections and (for clocks) its timer.
    /// Unknown ids are a no-op.
    pub fn remove_component(&mut self, id: &ComponentId) {
        self.clocks.unregister(id);
        self.graph.remove_component(id);
    }

    pub fn move_component(&mut self, id: &ComponentId, x: f32, y: f32) {
        self.graph.move_component(id, x, y);
    }

    pub fn toggle_switch(&mut self, id: &ComponentId) {
        self.graph.toggle_switch(id);
    }

    pub fn remove_connection(
        &mut self,
        from: &ComponentId,
        from_port: usize,
        to: &ComponentId,
        to_port: usize,
    ) {
        self.graph.remove_connection(from, from_port, to, to_port);
    }

    /// Tear down every timer and gesture and empty the circuit.
    pub fn clear_all(&mut self) {
        self.clocks.clear();
        self.graph.clear();
        self.interaction.reset();
    }

    // --- gesture commands ---

    /// Port activation: opens or completes a wiring gesture.
    pub fn start_connection(&mut self, port: PortRef) {
        self.interaction.port_activated(&mut self.graph, port);
    }

    pub fn cancel_connection(&mut self) {
        self.interaction.cancel_connection();
    }

    pub fn start_dragging(&mut self, id: &ComponentId, x: f32, y: f32) {
        self.interaction.body_pressed(&mut self.graph, id, x, y);
    }

    pub fn update_dragging(&mut self, x: f32, y: f32) {
        self.interaction.pointer_moved(&mut self.graph, x, y);
    }

    pub fn stop_dragging(&mut self) {
        self.interaction.pointer_released();
    }

    pub fn set_selected(&mut self, id: Option<ComponentId>) {
        self.graph.set_selected(id);
    }

    // --- raw event entry points ---

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.interaction.pointer_down(&mut self.graph, x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.interaction.pointer_moved(&mut self.graph, x, y);
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_released();
    }

    pub fn double_click(&mut self, x: f32, y: f32) {
        self.interaction.double_click(&mut self.graph, x, y);
    }

    /// Keyboard surface: Delete/Backspace removes the selection, Escape
    /// cancels a wiring gesture and clears the selection.
    pub fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Delete | Key::Backspace => {
                if let Some(id) = self.graph.selected().cloned() {
                    self.remove_component(&id);
                }
            }
            Key::Escape => {
                self.interaction.cancel_connection();
                self.graph.set_selected(None);
            }
        }
    }

    // --- simulation drivers ---

    /// Run one propagation pass. The host calls this on a fixed cadence.
    pub fn tick(&mut self) {
        self.engine.tick(&mut self.graph);
    }

    /// Credit elapsed wall-clock time to the clock timers.
    pub fn advance_clocks(&mut self, elapsed: Duration) {
        self.clocks.advance(elapsed, &mut self.graph);
    }

    /// The cadence `tick` is designed for.
    pub fn tick_period(&self) -> Duration {
        TICK_PERIOD
    }

    // --- read-only state for the renderer ---

    pub fn components(&self) -> &[Component] {
        self.graph.components()
    }

    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.graph.component(id)
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn selected(&self) -> Option<&ComponentId> {
        self.graph.selected()
    }

    pub fn component_count(&self) -> usize {
        self.graph.component_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.connection_count()
    }

    pub fn ticks(&self) -> u64 {
        self.engine.ticks()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
