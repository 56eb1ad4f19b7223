//! Error types for the simulator

use pqa_core::QuantumError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur while configuring or driving a simulation
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// A state or gate operation failed
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The circuit is wider than the configured qubit limit
    #[error("Too many qubits: circuit has {num_qubits}, configured maximum is {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// A circuit was run on a register of a different width
    #[error("Circuit has {circuit} qubits but the register has {register}")]
    RegisterMismatch { circuit: usize, register: usize },

    /// A script line could not be understood
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A gate name the registry does not know
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Reading a script or configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON
    #[error("Invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulatorError {
    /// Attach a script line number to an error
    ///
    /// Errors that already carry a line number are returned unchanged.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            SimulatorError::Parse { .. } => self,
            other => SimulatorError::Parse {
                line,
                message: other.to_string(),
            },
        }
    }
}
