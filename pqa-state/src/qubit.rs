//! A single, standalone qubit
//!
//! A [`Qubit`] holds the two amplitudes of α|0⟩ + β|1⟩ and an optional label.
//! It is the building block a register is tensored together from, and it can
//! also be driven on its own: apply single-qubit gates, inspect it, measure it.

use crate::measurement::{self, MeasurementOutcome};
use num_complex::Complex64;
use pqa_core::amplitude::{self, Amplitude};
use pqa_core::{Gate, QuantumError, Result};
use rand::Rng;
use std::fmt;

/// A single qubit α|0⟩ + β|1⟩ with |α|² + |β|² = 1
#[derive(Debug, Clone, PartialEq)]
pub struct Qubit {
    alpha: Amplitude,
    beta: Amplitude,
    label: Option<String>,
}

impl Qubit {
    /// A qubit in |0⟩
    pub fn new() -> Self {
        Self {
            alpha: Complex64::new(1.0, 0.0),
            beta: Complex64::new(0.0, 0.0),
            label: None,
        }
    }

    /// A qubit in |1⟩
    pub fn one() -> Self {
        let mut qubit = Self::new();
        qubit.collapse_to(1);
        qubit
    }

    /// Create a qubit from (possibly unnormalized) amplitudes
    ///
    /// # Errors
    /// Returns [`QuantumError::NumericDegeneracy`] if both amplitudes are zero.
    ///
    /// # Example
    /// ```
    /// use pqa_core::Complex64;
    /// use pqa_state::Qubit;
    ///
    /// let q = Qubit::from_amplitudes(Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)).unwrap();
    /// assert!((q.probability_zero() - 0.36).abs() < 1e-12);
    /// ```
    pub fn from_amplitudes(alpha: Amplitude, beta: Amplitude) -> Result<Self> {
        let mut amplitudes = [alpha, beta];
        amplitude::normalize_amplitudes(&mut amplitudes)?;
        Ok(Self {
            alpha: amplitudes[0],
            beta: amplitudes[1],
            label: None,
        })
    }

    /// Attach a label, shown when the qubit is printed
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Amplitude of |0⟩
    #[inline]
    pub fn alpha(&self) -> Amplitude {
        self.alpha
    }

    /// Amplitude of |1⟩
    #[inline]
    pub fn beta(&self) -> Amplitude {
        self.beta
    }

    /// Display label, if one was attached
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Apply a single-qubit gate and renormalize
    ///
    /// # Errors
    /// - [`QuantumError::InvalidQubitCount`] if the gate is not a 1-qubit gate
    /// - [`QuantumError::NumericDegeneracy`] if the result has zero norm
    pub fn apply_gate(&mut self, gate: &dyn Gate) -> Result<()> {
        if gate.num_qubits() != 1 {
            return Err(QuantumError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                1,
            ));
        }

        let m = gate.matrix();
        let mut amplitudes = [
            m[0] * self.alpha + m[1] * self.beta,
            m[2] * self.alpha + m[3] * self.beta,
        ];
        amplitude::normalize_amplitudes(&mut amplitudes)?;

        self.alpha = amplitudes[0];
        self.beta = amplitudes[1];
        Ok(())
    }

    /// Force the qubit into a basis state
    ///
    /// Bit 0 gives |0⟩; any non-zero bit gives |1⟩.
    pub fn collapse_to(&mut self, bit: u8) {
        let (alpha, beta) = if bit == 0 { (1.0, 0.0) } else { (0.0, 1.0) };
        self.alpha = Complex64::new(alpha, 0.0);
        self.beta = Complex64::new(beta, 0.0);
    }

    /// Measure in the computational basis, collapsing the qubit
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MeasurementOutcome {
        measurement::measure_qubit(self, rng)
    }

    /// |α|²
    #[inline]
    pub fn probability_zero(&self) -> f64 {
        self.alpha.norm_sqr()
    }

    /// |β|²
    #[inline]
    pub fn probability_one(&self) -> f64 {
        self.beta.norm_sqr()
    }

    /// √(|α|² + |β|²); 1 up to rounding for any qubit built through this API
    pub fn norm(&self) -> f64 {
        amplitude::norm(&[self.alpha, self.beta])
    }

    /// Position of the qubit on the Bloch sphere
    ///
    /// The global phase is dropped: α is rotated onto the real axis before
    /// reading off θ and φ.
    pub fn bloch_vector(&self) -> BlochVector {
        let theta = 2.0 * self.alpha.norm().clamp(0.0, 1.0).acos();
        let phi = if self.alpha.norm() > 1e-9 {
            self.beta.arg() - self.alpha.arg()
        } else {
            0.0
        };

        BlochVector {
            x: theta.sin() * phi.cos(),
            y: theta.sin() * phi.sin(),
            z: theta.cos(),
        }
    }
}

impl Default for Qubit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "|ψ⟩ = {:.*} |0⟩ + {:.*} |1⟩", p, self.alpha, p, self.beta)?,
            None => write!(f, "|ψ⟩ = {} |0⟩ + {} |1⟩", self.alpha, self.beta)?,
        }
        if let Some(label) = &self.label {
            write!(f, " [{}]", label)?;
        }
        Ok(())
    }
}

/// Cartesian coordinates on the Bloch sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {:+.2}  y: {:+.2}  z: {:+.2}", self.x, self.y, self.z)
    }
}
