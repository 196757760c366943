//! Periodic clock toggling.
//!
//! One timer per clock component, keyed by component id. The host drives the
//! scheduler with elapsed wall-clock time from its cooperative loop; toggles
//! are therefore independent of the propagation tick, and a toggle landing
//! between ticks is simply observed on the next tick.

use crate::core::graph::GraphStore;
use crate::core::types::ComponentId;
use log::debug;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug)]
struct ClockTimer {
    period: Duration,
    /// Time accumulated since the last toggle.
    elapsed: Duration,
}

/// Owns the id -> periodic-timer mapping for every live clock component.
///
/// Registration and teardown are paired 1:1 with component creation and
/// removal; `clear` tears down everything at once.
#[derive(Debug, Default)]
pub struct ClockScheduler {
    timers: HashMap<ComponentId, ClockTimer>,
}

impl ClockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a periodic toggle for the given clock component. A zero period
    /// is ignored.
    pub fn register(&mut self, id: ComponentId, period: Duration) {
        if period.is_zero() {
            debug!("clock {} has zero period, not scheduling", id);
            return;
        }
        debug!("clock {} scheduled every {:?}", id, period);
        self.timers.insert(
            id,
            ClockTimer {
                period,
                elapsed: Duration::ZERO,
            },
        );
    }

    /// Stop the timer for a removed clock component. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &ComponentId) {
        if self.timers.remove(id).is_some() {
            debug!("clock {} unscheduled", id);
        }
    }

    /// Tear down every timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.timers.contains_key(id)
    }

    /// Credit every timer with `elapsed` time and toggle each owning clock
    /// once per full period contained in its accumulated time. A long stall
    /// yields multiple toggles, keeping long-run cadence correct.
    pub fn advance(&mut self, elapsed: Duration, graph: &mut GraphStore) {
        for (id, timer) in self.timers.iter_mut() {
            timer.elapsed += elapsed;
            while timer.elapsed >= timer.period {
                timer.elapsed -= timer.period;
                graph.toggle_clock(id);
            }
        }
    }
}
