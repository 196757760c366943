//! Component construction: per-kind port layout, bounding size and default
//! internal state.

use crate::core::component::{Component, ComponentKind, KindState, Port};
use crate::core::types::ComponentId;
use std::time::Duration;

/// Default toggle period for a freshly placed clock.
pub const DEFAULT_CLOCK_PERIOD: Duration = Duration::from_millis(1000);

const GATE_WIDTH: f32 = 80.0;
const GATE_HEIGHT: f32 = 60.0;

/// Build a fully initialized component of the given kind at (x, y).
///
/// Port offsets and bounding sizes are fixed per kind and never change after
/// creation. Never fails.
pub fn create(kind: ComponentKind, x: f32, y: f32) -> Component {
    let id = ComponentId::generate(kind);
    let (width, height, inputs, outputs, state) = layout(kind);
    Component {
        id,
        x,
        y,
        width,
        height,
        inputs,
        outputs,
        selected: false,
        state,
    }
}

/// The per-kind layout table: size, port offsets and default state.
fn layout(kind: ComponentKind) -> (f32, f32, Vec<Port>, Vec<Port>, KindState) {
    match kind {
        ComponentKind::Switch => (
            60.0,
            40.0,
            vec![],
            vec![Port::output(60.0, 20.0)],
            KindState::Switch { on: false },
        ),
        ComponentKind::Clock => (
            60.0,
            40.0,
            vec![],
            vec![Port::output(60.0, 20.0)],
            KindState::Clock {
                on: false,
                period: DEFAULT_CLOCK_PERIOD,
            },
        ),
        ComponentKind::Led => (
            40.0,
            40.0,
            vec![Port::input(0.0, 20.0)],
            vec![],
            KindState::Led,
        ),
        ComponentKind::Not | ComponentKind::Buffer => (
            GATE_WIDTH,
            GATE_HEIGHT,
            vec![Port::input(0.0, 30.0)],
            vec![Port::output(GATE_WIDTH, 30.0)],
            match kind {
                ComponentKind::Not => KindState::Not,
                _ => KindState::Buffer,
            },
        ),
        ComponentKind::And
        | ComponentKind::Or
        | ComponentKind::Nand
        | ComponentKind::Nor
        | ComponentKind::Xor
        | ComponentKind::Xnor => (
            GATE_WIDTH,
            GATE_HEIGHT,
            vec![Port::input(0.0, 20.0), Port::input(0.0, 40.0)],
            vec![Port::output(GATE_WIDTH, 30.0)],
            match kind {
                ComponentKind::And => KindState::And,
                ComponentKind::Or => KindState::Or,
                ComponentKind::Nand => KindState::Nand,
                ComponentKind::Nor => KindState::Nor,
                ComponentKind::Xor => KindState::Xor,
                _ => KindState::Xnor,
            },
        ),
        ComponentKind::Latch => (
            80.0,
            60.0,
            vec![Port::input(0.0, 20.0), Port::input(0.0, 40.0)],
            vec![Port::output(80.0, 20.0), Port::output(80.0, 40.0)],
            KindState::Latch { state: false },
        ),
        ComponentKind::FullAdder => (
            100.0,
            80.0,
            vec![
                Port::input(0.0, 20.0),
                Port::input(0.0, 40.0),
                Port::input(0.0, 60.0),
            ],
            vec![Port::output(100.0, 30.0), Port::output(100.0, 50.0)],
            KindState::FullAdder,
        ),
        ComponentKind::Alu => (
            120.0,
            100.0,
            vec![
                Port::input(0.0, 25.0),
                Port::input(0.0, 50.0),
                Port::input(0.0, 75.0),
                Port::input(60.0, 0.0),
            ],
            vec![Port::output(120.0, 50.0), Port::output(100.0, 100.0)],
            KindState::Alu { operation: 0 },
        ),
        ComponentKind::Register => (
            80.0,
            60.0,
            vec![Port::input(0.0, 20.0), Port::input(0.0, 40.0)],
            vec![Port::output(80.0, 30.0)],
            KindState::Register { value: 0 },
        ),
        ComponentKind::Encoder => (
            80.0,
            80.0,
            vec![
                Port::input(0.0, 20.0),
                Port::input(0.0, 40.0),
                Port::input(0.0, 60.0),
            ],
            vec![Port::output(80.0, 30.0), Port::output(80.0, 50.0)],
            KindState::Encoder,
        ),
        ComponentKind::Decoder => (
            80.0,
            80.0,
            vec![Port::input(0.0, 30.0), Port::input(0.0, 50.0)],
            vec![
                Port::output(80.0, 20.0),
                Port::output(80.0, 40.0),
                Port::output(80.0, 60.0),
            ],
            KindState::Decoder,
        ),
        ComponentKind::Mux => (
            60.0,
            80.0,
            vec![
                Port::input(0.0, 20.0),
                Port::input(0.0, 40.0),
                Port::input(30.0, 80.0),
            ],
            vec![Port::output(60.0, 40.0)],
            KindState::Mux,
        ),
        ComponentKind::Demux => (
            60.0,
            80.0,
            vec![Port::input(0.0, 40.0), Port::input(30.0, 80.0)],
            vec![Port::output(60.0, 20.0), Port::output(60.0, 60.0)],
            KindState::Demux,
        ),
    }
}
