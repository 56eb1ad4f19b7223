//! Error types for PQA

use crate::QubitId;
use thiserror::Error;

/// Errors that can occur in quantum state and circuit operations
///
/// Every variant is a precondition violation rather than a transient
/// condition, so none of them is retried. [`QuantumError::kind`] groups them
/// into the three classes callers usually care about.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Register or circuit built from zero qubits
    #[error("Register must have at least one qubit")]
    NoQubits,

    /// Register too large for a dense state vector
    #[error("Cannot allocate {requested} qubits: maximum is {maximum}")]
    TooManyQubits { requested: usize, maximum: usize },

    /// Amplitude vector of the wrong length for the register size
    #[error("Expected {expected} amplitudes for a {num_qubits}-qubit register, got {actual}")]
    InvalidAmplitudeCount {
        num_qubits: usize,
        expected: usize,
        actual: usize,
    },

    /// Gate matrix has the wrong shape or contains NaN/infinite entries
    #[error("Gate '{gate}' has an invalid matrix: {reason}")]
    InvalidGateMatrix { gate: String, reason: String },

    /// Gate matrix fails the unitarity check U†U = I
    #[error("Gate '{gate}' is not unitary: max deviation {max_deviation:.2e} exceeds tolerance {tolerance:.2e}")]
    NotUnitary {
        gate: String,
        max_deviation: f64,
        tolerance: f64,
    },

    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: register has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Gate applied to wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Duplicate qubit in gate operation
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// Normalization divisor is zero: the state carries no probability
    #[error("Cannot normalize a state with norm {norm}")]
    NumericDegeneracy { norm: f64 },
}

/// Coarse classification of [`QuantumError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Something could not be built: empty or oversized register, invalid gate
    Construction,
    /// Targets do not fit the gate or the register
    DimensionMismatch,
    /// Division by a zero norm
    NumericDegeneracy,
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid gate matrix error
    pub fn invalid_gate_matrix(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGateMatrix {
            gate: gate.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoQubits
            | Self::TooManyQubits { .. }
            | Self::InvalidAmplitudeCount { .. }
            | Self::InvalidGateMatrix { .. }
            | Self::NotUnitary { .. } => ErrorKind::Construction,
            Self::InvalidQubit(..) | Self::InvalidQubitCount { .. } | Self::DuplicateQubit(_) => {
                ErrorKind::DimensionMismatch
            }
            Self::NumericDegeneracy { .. } => ErrorKind::NumericDegeneracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(5, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("5"));
        assert!(msg.contains("3"));
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_invalid_qubit_count_error() {
        let err = QuantumError::invalid_qubit_count("CNOT", 2, 1);
        let msg = format!("{}", err);
        assert!(msg.contains("CNOT"));
        assert!(msg.contains("2"));
        assert!(msg.contains("1"));
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_no_qubits_error() {
        let err = QuantumError::NoQubits;
        assert!(err.to_string().contains("at least one qubit"));
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn test_not_unitary_error() {
        let err = QuantumError::NotUnitary {
            gate: "U".to_string(),
            max_deviation: 0.5,
            tolerance: 1e-9,
        };
        assert!(err.to_string().contains("not unitary"));
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn test_degeneracy_kind() {
        let err = QuantumError::NumericDegeneracy { norm: 0.0 };
        assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
    }
}
