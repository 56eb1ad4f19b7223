//! Custom quantum gates with validation
//!
//! A custom gate carries a user-supplied matrix. The matrix is checked once,
//! at construction, for shape, finite entries and unitarity; after that the
//! gate behaves exactly like a built-in one.
//!
//! # Example
//!
//! ```rust
//! use pqa_gates::custom::CustomGate;
//! use pqa_core::gate::Gate;
//! use num_complex::Complex64;
//! use std::f64::consts::FRAC_1_SQRT_2 as S;
//!
//! let my_h = CustomGate::from_2x2(
//!     "MyH",
//!     [
//!         [Complex64::new(S, 0.0), Complex64::new(S, 0.0)],
//!         [Complex64::new(S, 0.0), Complex64::new(-S, 0.0)],
//!     ],
//! )
//! .unwrap();
//! assert!(my_h.is_hermitian());
//! ```

use crate::matrix_ops::{self, DEFAULT_UNITARY_TOLERANCE};
use num_complex::Complex64;
use pqa_core::gate::Gate;
use pqa_core::{QuantumError, Result};
use std::fmt;

/// A quantum gate with a user-defined, validated unitary matrix
pub struct CustomGate {
    name: String,
    num_qubits: usize,
    matrix: Vec<Complex64>,
    is_hermitian: bool,
    description: Option<String>,
}

impl CustomGate {
    /// Create a new custom gate with validation
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the gate
    /// * `num_qubits` - Number of qubits the gate acts on
    /// * `matrix` - Gate matrix as a flattened vector (row-major order)
    /// * `tolerance` - Tolerance for unitarity checking
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Gate name is empty
    /// - Matrix dimensions don't match num_qubits
    /// - Matrix contains invalid values (NaN, infinity)
    /// - Matrix is not unitary
    pub fn new(
        name: impl Into<String>,
        num_qubits: usize,
        matrix: Vec<Complex64>,
        tolerance: f64,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QuantumError::invalid_gate_matrix(
                "<unnamed>",
                "gate name cannot be empty",
            ));
        }

        matrix_ops::validate_unitary(&name, num_qubits, &matrix, tolerance)?;
        let is_hermitian = matrix_ops::is_hermitian(&matrix, tolerance);

        Ok(Self {
            name,
            num_qubits,
            matrix,
            is_hermitian,
            description: None,
        })
    }

    /// Create a single-qubit gate from a 2×2 matrix
    pub fn from_2x2(name: impl Into<String>, matrix: [[Complex64; 2]; 2]) -> Result<Self> {
        Self::new(
            name,
            1,
            crate::matrices::flatten(&matrix),
            DEFAULT_UNITARY_TOLERANCE,
        )
    }

    /// Create a two-qubit gate from a 4×4 matrix
    pub fn from_4x4(name: impl Into<String>, matrix: [[Complex64; 4]; 4]) -> Result<Self> {
        Self::new(
            name,
            2,
            crate::matrices::flatten(&matrix),
            DEFAULT_UNITARY_TOLERANCE,
        )
    }

    /// Get the matrix as a flattened slice
    pub fn matrix_vec(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Set a custom description for this gate
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Create a controlled version of this gate
    ///
    /// The new gate has one extra qubit, listed first, that acts as control:
    /// identity on the control-|0⟩ half, this gate on the control-|1⟩ half.
    pub fn controlled(&self) -> Result<Self> {
        let half_size = 1usize << self.num_qubits;
        let new_size = half_size * 2;
        let mut controlled_matrix = vec![Complex64::new(0.0, 0.0); new_size * new_size];

        for i in 0..half_size {
            controlled_matrix[i * new_size + i] = Complex64::new(1.0, 0.0);
        }

        for i in 0..half_size {
            for j in 0..half_size {
                let row = half_size + i;
                let col = half_size + j;
                controlled_matrix[row * new_size + col] = self.matrix[i * half_size + j];
            }
        }

        CustomGate::new(
            format!("C{}", self.name),
            self.num_qubits + 1,
            controlled_matrix,
            DEFAULT_UNITARY_TOLERANCE,
        )
    }

    /// Get the adjoint (inverse) of this gate
    pub fn adjoint(&self) -> Result<Self> {
        CustomGate::new(
            format!("{}†", self.name),
            self.num_qubits,
            matrix_ops::matrix_adjoint(&self.matrix),
            DEFAULT_UNITARY_TOLERANCE,
        )
    }
}

impl Gate for CustomGate {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn is_hermitian(&self) -> bool {
        self.is_hermitian
    }

    fn description(&self) -> String {
        if let Some(ref desc) = self.description {
            desc.clone()
        } else {
            format!(
                "Custom {}-qubit gate '{}'{}",
                self.num_qubits,
                self.name,
                if self.is_hermitian { " (Hermitian)" } else { "" }
            )
        }
    }

    fn matrix(&self) -> Vec<Complex64> {
        self.matrix.clone()
    }
}

impl fmt::Debug for CustomGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomGate")
            .field("name", &self.name)
            .field("num_qubits", &self.num_qubits)
            .field("is_hermitian", &self.is_hermitian)
            .finish()
    }
}
