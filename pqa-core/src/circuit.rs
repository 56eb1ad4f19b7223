//! Quantum circuit representation

use crate::gate::Gate;
use crate::{GateOp, QuantumError, QubitId, Result, MAX_QUBITS};
use std::fmt;
use std::sync::Arc;

/// A single step of a circuit
#[derive(Clone, Debug)]
pub enum Operation {
    /// Apply a unitary gate to its target qubits
    Gate(GateOp),
    /// Measure one qubit in the computational basis, collapsing the state
    Measure(QubitId),
}

impl Operation {
    /// Qubits touched by this operation
    pub fn qubits(&self) -> &[QubitId] {
        match self {
            Operation::Gate(op) => op.qubits(),
            Operation::Measure(q) => std::slice::from_ref(q),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(op) => write!(f, "{}", op),
            Operation::Measure(q) => write!(f, "MEASURE({})", q),
        }
    }
}

/// A quantum circuit
///
/// Contains a sequence of gate applications and measurements over a fixed
/// number of qubits. Every qubit index is checked when the operation is
/// added, so a built circuit can run on any register of the same size.
///
/// # Example
/// ```
/// use pqa_core::Circuit;
///
/// let circuit = Circuit::new(3).unwrap();
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.len(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new quantum circuit with the specified number of qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::NoQubits`] if `num_qubits` is 0 and
    /// [`QuantumError::TooManyQubits`] above [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::NoQubits);
        }
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::TooManyQubits {
                requested: num_qubits,
                maximum: MAX_QUBITS,
            });
        }
        Ok(Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        })
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of operations in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit is empty (no operations)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Add a gate operation to the circuit
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds, the target count
    /// does not match the gate, or a target repeats
    ///
    /// # Example
    /// ```ignore
    /// use pqa_core::{Circuit, QubitId};
    /// use std::sync::Arc;
    ///
    /// let mut circuit = Circuit::new(2)?;
    /// circuit.add_gate(Arc::new(Hadamard), &[QubitId::new(0)])?;
    /// ```
    pub fn add_gate(&mut self, gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<&mut Self> {
        for &qubit in qubits {
            qubit.check(self.num_qubits)?;
        }

        let gate_op = GateOp::new(gate, qubits)?;
        self.operations.push(Operation::Gate(gate_op));
        Ok(self)
    }

    /// Add a computational-basis measurement of one qubit
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidQubit`] if the qubit is out of bounds
    pub fn add_measurement(&mut self, qubit: QubitId) -> Result<&mut Self> {
        let qubit = qubit.check(self.num_qubits)?;
        self.operations.push(Operation::Measure(qubit));
        Ok(self)
    }

    /// Measure every qubit, q0 first
    pub fn measure_all(&mut self) -> &mut Self {
        self.operations
            .extend((0..self.num_qubits).map(|i| Operation::Measure(QubitId::new(i))));
        self
    }

    /// Get an iterator over the operations
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Number of measurement operations
    pub fn num_measurements(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Measure(_)))
            .count()
    }

    /// Clear all operations from the circuit
    pub fn clear(&mut self) {
        self.operations.clear();
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit({} qubits, {} operations)", self.num_qubits, self.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}
