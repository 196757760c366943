//! Headless demo: builds a one-bit full-adder circuit plus a clock-driven
//! blinker, then runs the simulation loop and prints what an attached
//! renderer would see.
//!
//! Run with `RUST_LOG=debug` to watch the graph mutations and ticks.

use lsim::{ComponentKind, PortDirection, PortRef, Simulator, TICK_PERIOD};
use std::time::Duration;

fn wire(sim: &mut Simulator, from: &lsim::ComponentId, from_port: usize, to: &lsim::ComponentId, to_port: usize) {
    sim.start_connection(PortRef::new(from.clone(), from_port, PortDirection::Output));
    sim.start_connection(PortRef::new(to.clone(), to_port, PortDirection::Input));
}

fn main() {
    env_logger::init();

    let mut sim = Simulator::seeded(2024);

    // Full adder: three input switches, sum and carry LEDs.
    let sw_a = sim.add_component(ComponentKind::Switch, 50.0, 50.0);
    let sw_b = sim.add_component(ComponentKind::Switch, 50.0, 150.0);
    let sw_cin = sim.add_component(ComponentKind::Switch, 50.0, 250.0);
    let adder = sim.add_component(ComponentKind::FullAdder, 250.0, 120.0);
    let led_sum = sim.add_component(ComponentKind::Led, 450.0, 100.0);
    let led_carry = sim.add_component(ComponentKind::Led, 450.0, 200.0);
    wire(&mut sim, &sw_a, 0, &adder, 0);
    wire(&mut sim, &sw_b, 0, &adder, 1);
    wire(&mut sim, &sw_cin, 0, &adder, 2);
    wire(&mut sim, &adder, 0, &led_sum, 0);
    wire(&mut sim, &adder, 1, &led_carry, 0);

    // Independent blinker in the corner.
    let clock = sim.add_component(ComponentKind::Clock, 50.0, 380.0);
    let led_blink = sim.add_component(ComponentKind::Led, 150.0, 380.0);
    wire(&mut sim, &clock, 0, &led_blink, 0);

    println!(
        "circuit: {} components, {} connections",
        sim.component_count(),
        sim.connection_count()
    );

    // Walk the adder through all eight input rows, letting the two-hop path
    // settle between changes.
    for bits in 0u8..8 {
        set_switch(&mut sim, &sw_a, bits & 1 != 0);
        set_switch(&mut sim, &sw_b, bits & 2 != 0);
        set_switch(&mut sim, &sw_cin, bits & 4 != 0);
        for _ in 0..2 {
            sim.advance_clocks(TICK_PERIOD);
            sim.tick();
        }
        let sum = sim.component(&led_sum).unwrap().inputs[0].signal;
        let carry = sim.component(&led_carry).unwrap().inputs[0].signal;
        println!(
            "a={} b={} cin={}  ->  sum={} carry={}",
            bits & 1 != 0,
            bits & 2 != 0,
            bits & 4 != 0,
            sum,
            carry
        );
    }

    // Let the blinker run for three seconds of simulated time.
    let mut blinks = 0;
    let mut last = false;
    for _ in 0..60 {
        sim.advance_clocks(Duration::from_millis(50));
        sim.tick();
        let lit = sim.component(&led_blink).unwrap().inputs[0].signal;
        if lit != last {
            blinks += 1;
            last = lit;
        }
    }
    println!("blinker changed state {} times over 3s (tick {})", blinks, sim.ticks());
}

/// Put a switch into a known state regardless of where it is now.
fn set_switch(sim: &mut Simulator, id: &lsim::ComponentId, on: bool) {
    let current = match sim.component(id).map(|c| &c.state) {
        Some(lsim::KindState::Switch { on }) => *on,
        _ => return,
    };
    if current != on {
        sim.toggle_switch(id);
    }
}
