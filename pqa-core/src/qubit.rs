//! Qubit addressing within a register

use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe identifier for a qubit position in a register
///
/// Registers order their basis states big-endian: qubit 0 is the most
/// significant bit of a basis-state index, so the label `|q0 q1 … q(n-1)⟩`
/// read as a binary number is the index into the state vector.
///
/// # Example
/// ```
/// use pqa_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// assert_eq!(q0.bit_mask(3), 0b100);
/// assert_eq!(q1.bit_mask(3), 0b010);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Bit of a basis-state index that holds this qubit's value
    ///
    /// The caller must have checked `index() < num_qubits`.
    #[inline]
    pub const fn bit_mask(&self, num_qubits: usize) -> usize {
        1 << (num_qubits - 1 - self.0)
    }

    /// Check that this qubit exists in a register of `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidQubit`] if the index is out of range.
    #[inline]
    pub fn check(self, num_qubits: usize) -> Result<Self> {
        if self.0 >= num_qubits {
            return Err(QuantumError::invalid_qubit(self.0, num_qubits));
        }
        Ok(self)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_ordering() {
        let q0 = QubitId::new(0);
        let q1 = QubitId::new(1);
        let q2 = QubitId::new(2);

        assert!(q0 < q1);
        assert!(q1 < q2);
        assert_eq!(q1, QubitId::from(1));
    }

    #[test]
    fn test_qubit_display() {
        assert_eq!(QubitId::new(5).to_string(), "q5");
    }

    #[test]
    fn test_bit_mask_is_big_endian() {
        assert_eq!(QubitId::new(0).bit_mask(1), 1);
        assert_eq!(QubitId::new(0).bit_mask(2), 0b10);
        assert_eq!(QubitId::new(1).bit_mask(2), 0b01);
        assert_eq!(QubitId::new(0).bit_mask(4), 0b1000);
        assert_eq!(QubitId::new(3).bit_mask(4), 0b0001);
    }

    #[test]
    fn test_check_range() {
        assert!(QubitId::new(2).check(3).is_ok());
        assert_eq!(
            QubitId::new(3).check(3),
            Err(QuantumError::InvalidQubit(3, 3))
        );
    }

    #[test]
    fn test_usize_roundtrip() {
        let i: usize = QubitId::new(7).into();
        assert_eq!(i, 7);
    }
}
