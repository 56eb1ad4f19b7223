//! Simulation result types

use pqa_core::QubitId;
use pqa_state::{MeasurementOutcome, QuantumRegister};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of running a circuit
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Register state after the last operation
    pub register: QuantumRegister,

    /// Mid-circuit and final measurement outcomes, in execution order
    pub measurements: Vec<MeasurementOutcome>,

    /// Number of gates applied
    pub gates_applied: usize,
}

impl SimulationResult {
    /// Number of qubits in the final state
    pub fn num_qubits(&self) -> usize {
        self.register.num_qubits()
    }

    /// Most recent outcome recorded for `qubit`
    pub fn outcome(&self, qubit: QubitId) -> Option<&MeasurementOutcome> {
        self.measurements.iter().rev().find(|m| m.qubit == qubit)
    }

    /// The observed bits, in measurement order, e.g. `"011"`
    pub fn classical_bits(&self) -> String {
        self.measurements
            .iter()
            .map(|m| if m.bit == 0 { '0' } else { '1' })
            .collect()
    }

    /// Serializable view of the final state
    pub fn snapshot(&self, threshold: f64) -> StateSnapshot {
        StateSnapshot::capture(&self.register, threshold)
            .with_measurements(self.measurements.clone())
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Result")?;
        writeln!(f, "  Qubits: {}", self.num_qubits())?;
        writeln!(f, "  Gates applied: {}", self.gates_applied)?;
        for m in &self.measurements {
            writeln!(f, "  Measured {}", m)?;
        }
        write!(f, "{:.4}", self.register)
    }
}

/// One basis state of a [`StateSnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisEntry {
    /// Basis index
    pub index: usize,
    /// Ket label, e.g. `|01⟩`
    pub label: String,
    pub re: f64,
    pub im: f64,
    pub probability: f64,
}

/// A JSON-friendly copy of a register's non-negligible amplitudes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub num_qubits: usize,
    pub states: Vec<BasisEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<MeasurementOutcome>,
}

impl StateSnapshot {
    /// Capture every basis state whose probability exceeds `threshold`
    pub fn capture(register: &QuantumRegister, threshold: f64) -> Self {
        let states = register
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(_, amp)| amp.norm_sqr() > threshold)
            .map(|(index, amp)| BasisEntry {
                index,
                label: register.basis_label(index),
                re: amp.re,
                im: amp.im,
                probability: amp.norm_sqr(),
            })
            .collect();

        Self {
            num_qubits: register.num_qubits(),
            states,
            measurements: Vec::new(),
        }
    }

    /// Attach measurement outcomes
    pub fn with_measurements(mut self, measurements: Vec<MeasurementOutcome>) -> Self {
        self.measurements = measurements;
        self
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
