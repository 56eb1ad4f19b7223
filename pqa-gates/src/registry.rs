//! Name-based gate lookup
//!
//! Scripts and the interactive emulator refer to gates by name. The registry
//! maps upper-cased names to shared gate instances and also understands the
//! parameterized phase gate written as `P(θ)` or `PHASE(θ)`, where θ is a
//! number or a multiple/fraction of `pi` (`pi/4`, `-pi/2`, `3*pi/4`, `0.25`).
//!
//! # Example
//!
//! ```rust
//! use pqa_core::Gate;
//! use pqa_gates::registry::GateRegistry;
//!
//! let registry = GateRegistry::standard();
//! assert_eq!(registry.resolve("h").unwrap().name(), "H");
//! assert_eq!(registry.resolve("cx").unwrap().num_qubits(), 2);
//! assert_eq!(registry.resolve("P(pi/4)").unwrap().name(), "P");
//! assert!(registry.resolve("FOO").is_none());
//! ```

use crate::matrix_ops::{validate_unitary, DEFAULT_UNITARY_TOLERANCE};
use crate::standard::{CNot, Hadamard, Identity, PauliX, PauliY, PauliZ, Phase, SGate, TGate};
use pqa_core::gate::Gate;
use pqa_core::Result;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;

/// A registry of named gates
#[derive(Debug, Clone, Default)]
pub struct GateRegistry {
    gates: BTreeMap<String, Arc<dyn Gate>>,
}

impl GateRegistry {
    /// Create a new empty gate registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the standard gate set
    ///
    /// `H X Y Z I S T CNOT`, plus `CX` as an alias of `CNOT`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.insert("H", Arc::new(Hadamard));
        registry.insert("X", Arc::new(PauliX));
        registry.insert("Y", Arc::new(PauliY));
        registry.insert("Z", Arc::new(PauliZ));
        registry.insert("I", Arc::new(Identity));
        registry.insert("S", Arc::new(SGate));
        registry.insert("T", Arc::new(TGate));
        let cnot: Arc<dyn Gate> = Arc::new(CNot);
        registry.insert("CNOT", cnot.clone());
        registry.insert("CX", cnot);
        registry
    }

    /// Register a gate under `name` (case-insensitive)
    ///
    /// The gate's matrix must have the shape its arity implies and be unitary
    /// within [`DEFAULT_UNITARY_TOLERANCE`]. If a gate with the same name
    /// already exists, it will be replaced.
    ///
    /// # Errors
    /// - [`QuantumError::InvalidGateMatrix`](pqa_core::QuantumError::InvalidGateMatrix)
    ///   for a wrong shape or non-finite entries
    /// - [`QuantumError::NotUnitary`](pqa_core::QuantumError::NotUnitary) otherwise
    pub fn register(&mut self, name: impl AsRef<str>, gate: Arc<dyn Gate>) -> Result<()> {
        validate_unitary(
            gate.name(),
            gate.num_qubits(),
            &gate.matrix(),
            DEFAULT_UNITARY_TOLERANCE,
        )?;
        self.insert(name.as_ref(), gate);
        Ok(())
    }

    fn insert(&mut self, name: &str, gate: Arc<dyn Gate>) {
        self.gates.insert(name.to_uppercase(), gate);
    }

    /// Look up a gate by name, or build a phase gate from `P(θ)`
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Gate>> {
        let name = name.trim();
        if let Some(gate) = self.gates.get(&name.to_uppercase()) {
            return Some(gate.clone());
        }

        let open = name.find('(')?;
        let inner = name[open + 1..].strip_suffix(')')?;
        match name[..open].trim().to_uppercase().as_str() {
            "P" | "PHASE" => {
                parse_angle(inner).map(|theta| Arc::new(Phase::new(theta)) as Arc<dyn Gate>)
            }
            _ => None,
        }
    }

    /// Names of all registered gates, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gates.keys().map(String::as_str)
    }

    /// Number of registered gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Parse an angle: a plain number, or `[k*]pi[/d]` with an optional sign
///
/// Returns `None` for anything that is not a finite angle, `nan` and `inf`
/// included.
pub fn parse_angle(text: &str) -> Option<f64> {
    parse_angle_text(text).filter(|theta| theta.is_finite())
}

fn parse_angle_text(text: &str) -> Option<f64> {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let lower = text.to_lowercase();

    if !lower.contains("pi") {
        return lower.parse::<f64>().ok();
    }

    let (sign, body) = match lower.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, lower.as_str()),
    };

    let (numerator, denominator) = match body.split_once('/') {
        Some((num, den)) => (num, den.parse::<f64>().ok()?),
        None => (body, 1.0),
    };

    let factor = match numerator {
        "pi" => 1.0,
        other => other.strip_suffix("*pi")?.parse::<f64>().ok()?,
    };

    if denominator == 0.0 {
        return None;
    }
    Some(sign * factor * PI / denominator)
}
