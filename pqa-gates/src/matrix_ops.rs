//! Matrix utilities and gate-matrix validation
//!
//! Matrices are flattened row-major `n × n` slices. The arithmetic helpers
//! assume square inputs of matching size; [`validate_unitary`] is the checked
//! entry point that every custom gate goes through before it can be used.

use num_complex::Complex64;
use pqa_core::{QuantumError, Result};

/// Tolerance used when a gate matrix is checked for unitarity
pub const DEFAULT_UNITARY_TOLERANCE: f64 = 1e-9;

/// Side length of a flattened square matrix
#[inline]
fn side(matrix: &[Complex64]) -> usize {
    (matrix.len() as f64).sqrt().round() as usize
}

/// Create an `n × n` identity matrix
pub fn identity_matrix(n: usize) -> Vec<Complex64> {
    let mut result = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        result[i * n + i] = Complex64::new(1.0, 0.0);
    }
    result
}

/// Multiply two square matrices: A·B
///
/// # Panics
/// Panics if the matrices are not square or differ in size.
pub fn matrix_multiply(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let n = side(a);
    assert_eq!(n * n, a.len(), "Matrix A must be square");
    assert_eq!(a.len(), b.len(), "Matrices must have the same size");

    let mut result = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        for k in 0..n {
            let a_ik = a[i * n + k];
            for j in 0..n {
                result[i * n + j] += a_ik * b[k * n + j];
            }
        }
    }
    result
}

/// Compute the adjoint (conjugate transpose) of a matrix
///
/// Returns A† where (A†)ᵢⱼ = (Aⱼᵢ)*
pub fn matrix_adjoint(matrix: &[Complex64]) -> Vec<Complex64> {
    let n = side(matrix);
    assert_eq!(n * n, matrix.len(), "Matrix must be square");

    let mut result = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        for j in 0..n {
            result[i * n + j] = matrix[j * n + i].conj();
        }
    }
    result
}

/// Largest entry-wise distance between U†U and the identity
pub fn unitary_deviation(matrix: &[Complex64]) -> f64 {
    let n = side(matrix);
    let u_dagger_u = matrix_multiply(&matrix_adjoint(matrix), matrix);

    let mut max_deviation: f64 = 0.0;
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            let deviation = (u_dagger_u[i * n + j] - Complex64::new(expected, 0.0)).norm();
            max_deviation = max_deviation.max(deviation);
        }
    }
    max_deviation
}

/// Check if a matrix is unitary (U†U = I) within `tolerance`
pub fn is_unitary(matrix: &[Complex64], tolerance: f64) -> bool {
    unitary_deviation(matrix) <= tolerance
}

/// Check if a matrix is Hermitian (A = A†) within `tolerance`
pub fn is_hermitian(matrix: &[Complex64], tolerance: f64) -> bool {
    let adjoint = matrix_adjoint(matrix);
    matrix
        .iter()
        .zip(adjoint.iter())
        .all(|(a, b)| (a - b).norm() <= tolerance)
}

/// Validate a gate matrix for an `num_qubits`-qubit gate
///
/// Checks, in order:
/// - the matrix has (2^num_qubits)² entries
/// - no entry is NaN or infinite
/// - U†U = I within `tolerance`
///
/// Returns the measured deviation from unitarity.
///
/// # Errors
/// - [`QuantumError::InvalidGateMatrix`] for a wrong shape or invalid values
/// - [`QuantumError::NotUnitary`] if the deviation exceeds `tolerance`
///
/// # Example
/// ```
/// use pqa_gates::matrices::{flatten, HADAMARD};
/// use pqa_gates::matrix_ops::{validate_unitary, DEFAULT_UNITARY_TOLERANCE};
///
/// let h = flatten(&HADAMARD);
/// assert!(validate_unitary("H", 1, &h, DEFAULT_UNITARY_TOLERANCE).is_ok());
/// assert!(validate_unitary("H", 2, &h, DEFAULT_UNITARY_TOLERANCE).is_err());
/// ```
pub fn validate_unitary(
    name: &str,
    num_qubits: usize,
    matrix: &[Complex64],
    tolerance: f64,
) -> Result<f64> {
    if num_qubits == 0 || num_qubits > pqa_core::MAX_QUBITS {
        return Err(QuantumError::invalid_gate_matrix(
            name,
            format!("unsupported arity {}", num_qubits),
        ));
    }

    let dim = 1usize << num_qubits;
    if matrix.len() != dim * dim {
        return Err(QuantumError::invalid_gate_matrix(
            name,
            format!(
                "expected {}×{} ({} entries), got {} entries",
                dim,
                dim,
                dim * dim,
                matrix.len()
            ),
        ));
    }

    if matrix.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
        return Err(QuantumError::invalid_gate_matrix(
            name,
            "matrix contains NaN or infinite values",
        ));
    }

    let max_deviation = unitary_deviation(matrix);
    if max_deviation > tolerance {
        return Err(QuantumError::NotUnitary {
            gate: name.to_string(),
            max_deviation,
            tolerance,
        });
    }
    Ok(max_deviation)
}
