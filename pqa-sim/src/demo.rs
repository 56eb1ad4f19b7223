//! Guided walk through the simulator
//!
//! Two short experiments printed step by step:
//! 1. one qubit driven through H, X, Y, Z and P(π/4), then measured
//! 2. a Bell pair between a "control" and a "target" qubit, measured at the
//!    register level, followed by a classically controlled X on the target

use crate::error::Result;
use crate::simulator::Simulator;
use pqa_core::{Gate, QubitId};
use pqa_gates::{CNot, Hadamard, PauliX, PauliY, PauliZ, Phase};
use pqa_state::{QuantumRegister, Qubit};
use std::f64::consts::PI;
use std::io::Write;
use tracing::info;

/// Run both experiments, writing the narration to `out`
pub fn run_demo<W: Write>(simulator: &mut Simulator, out: &mut W) -> Result<()> {
    single_qubit_walk(simulator, out)?;
    writeln!(out)?;
    bell_experiment(simulator, out)?;
    Ok(())
}

/// One qubit through the standard single-qubit gates, then measured
pub fn single_qubit_walk<W: Write>(simulator: &mut Simulator, out: &mut W) -> Result<u8> {
    let mut qubit = Qubit::new();
    writeln!(out, "Initial state: {:.4}", qubit)?;

    let gates: [&dyn Gate; 5] = [&Hadamard, &PauliX, &PauliY, &PauliZ, &Phase::new(PI / 4.0)];
    for (step, gate) in gates.iter().enumerate() {
        qubit.apply_gate(*gate)?;
        writeln!(out, "After gate {} ({}): {:.4}", step + 1, gate.name(), qubit)?;
    }

    let outcome = qubit.measure(simulator.rng());
    info!(bit = outcome.bit, probability = outcome.probability, "measured walk qubit");
    writeln!(out, "Measured: {}", outcome.bit)?;
    Ok(outcome.bit)
}

/// Bell pair, joint measurement and classical control
///
/// Returns the measured (control, target) bits.
pub fn bell_experiment<W: Write>(simulator: &mut Simulator, out: &mut W) -> Result<(u8, u8)> {
    let control = Qubit::new().with_label("control");
    let target = Qubit::new().with_label("target");
    let (c, t) = (QubitId::new(0), QubitId::new(1));

    simulator.check_width(2)?;
    let mut register = QuantumRegister::from_qubits(&[control.clone(), target.clone()])?;
    register.apply_gate(&Hadamard, &[c])?;
    register.apply_gate(&CNot, &[c, t])?;

    writeln!(
        out,
        "Bell state after H and CNOT (q0 = {}, q1 = {}):",
        label(&control),
        label(&target)
    )?;
    for line in format!("{:.4}", register).lines() {
        writeln!(out, "  {}", line)?;
    }

    let m0 = simulator.measure(&mut register, c)?.bit;
    let m1 = simulator.measure(&mut register, t)?.bit;
    writeln!(out, "Measured: Q0={}, Q1={}", m0, m1)?;

    let mut target = target;
    target.collapse_to(m1);
    if m0 == 1 {
        register.apply_gate(&PauliX, &[t])?;
        target.apply_gate(&PauliX)?;
        writeln!(out, "Classical control: Q0==1, flipped Q1: {:.4}", target)?;
    } else {
        writeln!(out, "Classical control: Q0==0, Q1 unchanged: {:.4}", target)?;
    }
    writeln!(out, "Final register: {:.4}", register)?;

    Ok((m0, m1))
}

fn label(qubit: &Qubit) -> &str {
    qubit.label().unwrap_or("unlabeled")
}
