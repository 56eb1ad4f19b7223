//! Standard quantum gate implementations with pre-computed matrices

use crate::matrices;
use num_complex::Complex64;
use pqa_core::gate::Gate;

/// Helper macro to implement the matrix() method for gates
macro_rules! impl_matrix_method {
    ($gate_type:ty, $matrix:expr, $size:expr) => {
        impl $gate_type {
            /// Returns the pre-computed gate matrix
            #[inline]
            pub const fn matrix() -> &'static [[Complex64; $size]; $size] {
                $matrix
            }
        }
    };
}

/// Helper macro for fixed gates: a unit struct with a const matrix
macro_rules! fixed_gate {
    ($(#[$doc:meta])* $gate_type:ident, $name:expr, $matrix:expr, $size:expr, hermitian = $herm:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $gate_type;

        impl Gate for $gate_type {
            fn name(&self) -> &str {
                $name
            }

            fn num_qubits(&self) -> usize {
                ($size as usize).trailing_zeros() as usize
            }

            fn is_hermitian(&self) -> bool {
                $herm
            }

            fn matrix(&self) -> Vec<Complex64> {
                matrices::flatten(Self::matrix())
            }
        }

        impl_matrix_method!($gate_type, &$matrix, $size);
    };
}

// ============================================================================
// Single-Qubit Gates
// ============================================================================

fixed_gate!(
    /// Hadamard gate
    ///
    /// Creates superposition: H|0⟩ = (|0⟩ + |1⟩)/√2
    Hadamard, "H", matrices::HADAMARD, 2, hermitian = true
);

fixed_gate!(
    /// Pauli-X gate (NOT gate)
    ///
    /// Bit flip: X|0⟩ = |1⟩, X|1⟩ = |0⟩
    PauliX, "X", matrices::PAULI_X, 2, hermitian = true
);

fixed_gate!(
    /// Pauli-Y gate
    ///
    /// Combined bit and phase flip
    PauliY, "Y", matrices::PAULI_Y, 2, hermitian = true
);

fixed_gate!(
    /// Pauli-Z gate
    ///
    /// Phase flip: Z|0⟩ = |0⟩, Z|1⟩ = -|1⟩
    PauliZ, "Z", matrices::PAULI_Z, 2, hermitian = true
);

fixed_gate!(
    /// Identity gate
    Identity, "I", matrices::IDENTITY, 2, hermitian = true
);

fixed_gate!(
    /// S gate (√Z), equal to Phase(π/2)
    SGate, "S", matrices::S_GATE, 2, hermitian = false
);

fixed_gate!(
    /// T gate (√S), equal to Phase(π/4)
    TGate, "T", matrices::T_GATE, 2, hermitian = false
);

// ============================================================================
// Two-Qubit Gates
// ============================================================================

fixed_gate!(
    /// Controlled-NOT gate
    ///
    /// The first target is the control, the second the target:
    /// |c, t⟩ → |c, t ⊕ c⟩
    CNot, "CNOT", matrices::CNOT, 4, hermitian = true
);

// ============================================================================
// Parameterized Gates
// ============================================================================

/// Phase gate P(θ)
///
/// Leaves |0⟩ alone and multiplies |1⟩ by e^(iθ). P(0) is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    theta: f64,
}

impl Phase {
    /// Creates a new Phase gate with the given angle
    pub const fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Returns the phase angle
    pub const fn angle(&self) -> f64 {
        self.theta
    }

    /// Computes the Phase matrix for this angle
    #[inline]
    pub fn matrix(&self) -> [[Complex64; 2]; 2] {
        matrices::phase(self.theta)
    }
}

impl Gate for Phase {
    fn name(&self) -> &str {
        "P"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn description(&self) -> String {
        format!("P({:.4})", self.theta)
    }

    fn matrix(&self) -> Vec<Complex64> {
        matrices::flatten(&Phase::matrix(self))
    }
}
