//! Quantum gate definitions and operations

use crate::{QuantumError, QubitId, Result};
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Trait for unitary quantum gates
///
/// Gates are stateless and reusable: parameterized gates fix their
/// parameters at construction. Every gate exposes its unitary matrix in
/// row-major order; for an n-qubit gate the matrix is 2^n × 2^n and the
/// returned vector has length 4^n.
///
/// When a gate acts on several qubits, the first listed target is the most
/// significant bit of the matrix row/column index (for CNOT: control first).
///
/// # Example
/// ```
/// use pqa_core::{Complex64, Gate};
///
/// #[derive(Debug)]
/// struct Flip;
///
/// impl Gate for Flip {
///     fn name(&self) -> &str { "FLIP" }
///     fn num_qubits(&self) -> usize { 1 }
///     fn matrix(&self) -> Vec<Complex64> {
///         let (o, l) = (Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0));
///         vec![o, l, l, o]
///     }
/// }
///
/// assert_eq!(Flip.dimension(), 2);
/// assert_eq!(Flip.matrix().len(), 4);
/// ```
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "CNOT", "P")
    fn name(&self) -> &str;

    /// Number of qubits this gate acts on (its arity)
    fn num_qubits(&self) -> usize;

    /// The unitary matrix, flattened row-major
    fn matrix(&self) -> Vec<Complex64>;

    /// Row/column count of the matrix (2^arity)
    fn dimension(&self) -> usize {
        1 << self.num_qubits()
    }

    /// Whether this gate is hermitian (self-adjoint)
    ///
    /// Hermitian gates are their own inverse.
    fn is_hermitian(&self) -> bool {
        false
    }

    /// Get a description of this gate
    fn description(&self) -> String {
        format!("{}-qubit gate '{}'", self.num_qubits(), self.name())
    }
}

/// A gate operation applied to specific qubits
///
/// Combines a gate with the qubits it operates on.
///
/// # Example
/// ```
/// # use pqa_core::{Complex64, QubitId, gate::GateOp};
/// # use std::sync::Arc;
/// # #[derive(Debug)]
/// # struct DummyGate;
/// # impl pqa_core::gate::Gate for DummyGate {
/// #     fn name(&self) -> &str { "DUMMY" }
/// #     fn num_qubits(&self) -> usize { 1 }
/// #     fn matrix(&self) -> Vec<Complex64> { vec![Complex64::new(1.0, 0.0); 4] }
/// # }
/// let gate = Arc::new(DummyGate);
/// let q0 = QubitId::new(0);
/// let op = GateOp::new(gate, &[q0]).unwrap();
/// assert_eq!(op.to_string(), "DUMMY(q0)");
/// ```
#[derive(Clone)]
pub struct GateOp {
    gate: Arc<dyn Gate>,
    qubits: SmallVec<[QubitId; 2]>, // Most gates are 1-2 qubits
}

/// Check a target list against a gate's arity and for repeated qubits
///
/// # Errors
/// - [`QuantumError::InvalidQubitCount`] if the number of targets differs
///   from the gate's arity
/// - [`QuantumError::DuplicateQubit`] if a qubit appears twice
pub fn check_targets(gate: &dyn Gate, qubits: &[QubitId]) -> Result<()> {
    if qubits.len() != gate.num_qubits() {
        return Err(QuantumError::invalid_qubit_count(
            gate.name(),
            gate.num_qubits(),
            qubits.len(),
        ));
    }

    for i in 0..qubits.len() {
        for j in (i + 1)..qubits.len() {
            if qubits[i] == qubits[j] {
                return Err(QuantumError::DuplicateQubit(qubits[i]));
            }
        }
    }
    Ok(())
}

impl GateOp {
    /// Create a new gate operation
    ///
    /// # Errors
    /// Returns error if:
    /// - Qubit count doesn't match gate requirements
    /// - Duplicate qubits specified
    pub fn new(gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<Self> {
        check_targets(gate.as_ref(), qubits)?;

        Ok(Self {
            gate,
            qubits: SmallVec::from_slice(qubits),
        })
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Get the qubits this operation acts on
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
