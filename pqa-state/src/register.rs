//! Multi-qubit state vector
//!
//! A [`QuantumRegister`] stores the `2^n` complex amplitudes of an n-qubit
//! state. Basis states are ordered big-endian: qubit 0 is the most
//! significant bit of an index, so `|q0 q1 … q(n-1)⟩` read as a binary number
//! is the position in the vector.
//!
//! # Example
//! ```
//! use pqa_core::QubitId;
//! use pqa_gates::{CNot, Hadamard};
//! use pqa_state::QuantumRegister;
//!
//! let mut register = QuantumRegister::new(2).unwrap();
//! register.apply_gate(&Hadamard, &[QubitId::new(0)]).unwrap();
//! register.apply_gate(&CNot, &[QubitId::new(0), QubitId::new(1)]).unwrap();
//!
//! let p = register.probabilities();
//! assert!((p[0b00] - 0.5).abs() < 1e-12);
//! assert!((p[0b11] - 0.5).abs() < 1e-12);
//! ```

use crate::kernel;
use crate::measurement::{born_outcome, MeasurementOutcome};
use crate::qubit::Qubit;
use num_complex::Complex64;
use pqa_core::amplitude::{self, Amplitude};
use pqa_core::{check_targets, Gate, GateOp, QuantumError, QubitId, Result, MAX_QUBITS};
use rand::Rng;
use smallvec::SmallVec;
use std::fmt;
use tracing::{trace, warn};

/// Renormalization corrections larger than this are reported
const DRIFT_WARN_THRESHOLD: f64 = 1e-6;

/// Basis states with smaller probability are left out of `Display`
const DISPLAY_THRESHOLD: f64 = 1e-12;

/// State vector of an n-qubit register
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumRegister {
    num_qubits: usize,
    amplitudes: Vec<Amplitude>,
}

fn check_size(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 {
        return Err(QuantumError::NoQubits);
    }
    if num_qubits > MAX_QUBITS {
        return Err(QuantumError::TooManyQubits {
            requested: num_qubits,
            maximum: MAX_QUBITS,
        });
    }
    Ok(())
}

/// One step of the tensor product: append `qubit` as the new lowest bit
fn tensor_fold(amplitudes: &[Amplitude], qubit: &Qubit) -> Vec<Amplitude> {
    let mut expanded = Vec::with_capacity(amplitudes.len() * 2);
    for &v in amplitudes {
        expanded.push(v * qubit.alpha());
        expanded.push(v * qubit.beta());
    }
    expanded
}

impl QuantumRegister {
    /// Register of `num_qubits` qubits in |0…0⟩
    ///
    /// # Errors
    /// [`QuantumError::NoQubits`] or [`QuantumError::TooManyQubits`].
    pub fn new(num_qubits: usize) -> Result<Self> {
        check_size(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Tensor product of independent qubits, the first being the most significant
    ///
    /// # Errors
    /// [`QuantumError::NoQubits`] for an empty slice,
    /// [`QuantumError::TooManyQubits`] above [`MAX_QUBITS`].
    pub fn from_qubits(qubits: &[Qubit]) -> Result<Self> {
        check_size(qubits.len())?;

        let mut amplitudes = vec![Complex64::new(1.0, 0.0)];
        for qubit in qubits {
            amplitudes = tensor_fold(&amplitudes, qubit);
        }
        amplitude::normalize_amplitudes(&mut amplitudes)?;

        trace!(num_qubits = qubits.len(), "built register from qubits");
        Ok(Self {
            num_qubits: qubits.len(),
            amplitudes,
        })
    }

    /// Register from an explicit state vector, normalized on construction
    ///
    /// # Errors
    /// - [`QuantumError::InvalidAmplitudeCount`] unless `amplitudes.len() == 2^num_qubits`
    /// - [`QuantumError::NumericDegeneracy`] for an all-zero vector
    pub fn from_amplitudes(num_qubits: usize, mut amplitudes: Vec<Amplitude>) -> Result<Self> {
        check_size(num_qubits)?;
        let expected = 1usize << num_qubits;
        if amplitudes.len() != expected {
            return Err(QuantumError::InvalidAmplitudeCount {
                num_qubits,
                expected,
                actual: amplitudes.len(),
            });
        }
        amplitude::normalize_amplitudes(&mut amplitudes)?;
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Tensor `qubit` onto the register as a new last (least significant) qubit
    ///
    /// Returns the id of the added qubit.
    pub fn add_qubit(&mut self, qubit: &Qubit) -> Result<QubitId> {
        check_size(self.num_qubits + 1)?;
        let mut amplitudes = tensor_fold(&self.amplitudes, qubit);
        amplitude::normalize_amplitudes(&mut amplitudes)?;

        self.amplitudes = amplitudes;
        self.num_qubits += 1;
        Ok(QubitId::new(self.num_qubits - 1))
    }

    /// Apply a gate to the listed target qubits
    ///
    /// The first target is the most significant bit of the gate's sub-index:
    /// for CNOT, `targets = [control, target]`. Any positions are allowed.
    ///
    /// # Errors
    /// - [`QuantumError::InvalidQubitCount`] if `targets.len()` differs from the gate's arity
    /// - [`QuantumError::DuplicateQubit`] if a target is repeated
    /// - [`QuantumError::InvalidQubit`] if a target is outside the register
    /// - [`QuantumError::InvalidGateMatrix`] if the matrix is not `2^k × 2^k`
    /// - [`QuantumError::NumericDegeneracy`] if the result cannot be normalized
    ///
    /// On error the register is left unchanged.
    pub fn apply_gate(&mut self, gate: &dyn Gate, targets: &[QubitId]) -> Result<()> {
        check_targets(gate, targets)?;
        let masks = targets
            .iter()
            .map(|q| q.check(self.num_qubits).map(|q| q.bit_mask(self.num_qubits)))
            .collect::<Result<SmallVec<[usize; 2]>>>()?;

        let matrix = gate.matrix();
        let block = 1usize << masks.len();
        if matrix.len() != block * block {
            return Err(QuantumError::invalid_gate_matrix(
                gate.name(),
                format!(
                    "expected {}×{} ({} entries), got {} entries",
                    block,
                    block,
                    block * block,
                    matrix.len()
                ),
            ));
        }

        let mut amplitudes = self.amplitudes.clone();
        kernel::apply_matrix(&mut amplitudes, &matrix, &masks);
        let old_norm = amplitude::normalize_amplitudes(&mut amplitudes)?;
        self.amplitudes = amplitudes;

        let drift = (old_norm - 1.0).abs();
        if drift > DRIFT_WARN_THRESHOLD {
            warn!(gate = gate.name(), drift, "renormalized state after gate");
        }
        trace!(gate = gate.name(), ?targets, "applied gate");
        Ok(())
    }

    /// Apply a gate operation
    pub fn apply(&mut self, op: &GateOp) -> Result<()> {
        self.apply_gate(op.gate().as_ref(), op.qubits())
    }

    /// Measure one qubit, drawing from `rng`
    ///
    /// # Errors
    /// [`QuantumError::InvalidQubit`] if the qubit is outside the register.
    pub fn measure<R: Rng + ?Sized>(
        &mut self,
        qubit: QubitId,
        rng: &mut R,
    ) -> Result<MeasurementOutcome> {
        self.measure_with(qubit, rng.gen::<f64>())
    }

    /// Measure one qubit with an explicit draw `r` in [0, 1)
    ///
    /// Amplitudes inconsistent with the observed bit are zeroed and the
    /// survivors renormalized.
    pub fn measure_with(&mut self, qubit: QubitId, r: f64) -> Result<MeasurementOutcome> {
        let mask = qubit.check(self.num_qubits)?.bit_mask(self.num_qubits);

        let (p0, p1) = self
            .amplitudes
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(p0, p1), (idx, amp)| {
                if idx & mask == 0 {
                    (p0 + amp.norm_sqr(), p1)
                } else {
                    (p0, p1 + amp.norm_sqr())
                }
            });

        let bit = born_outcome(p0, p1, r);
        let keep = if bit == 0 { 0 } else { mask };
        for (idx, amp) in self.amplitudes.iter_mut().enumerate() {
            if idx & mask != keep {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        amplitude::normalize_amplitudes(&mut self.amplitudes)?;

        let probability = (if bit == 0 { p0 } else { p1 }) / (p0 + p1);
        trace!(%qubit, bit, probability, "measured qubit");
        Ok(MeasurementOutcome {
            qubit,
            bit,
            probability,
        })
    }

    /// Measure every qubit in order, q0 first
    ///
    /// Returns the observed basis-state index; the register is left in that
    /// basis state.
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let mut index = 0;
        for q in 0..self.num_qubits {
            let outcome = self.measure(QubitId::new(q), rng)?;
            index = (index << 1) | outcome.bit as usize;
        }
        Ok(index)
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the state vector
    #[inline]
    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    /// Amplitude of one basis state, `None` past the end
    pub fn amplitude(&self, index: usize) -> Option<Amplitude> {
        self.amplitudes.get(index).copied()
    }

    /// Probability of every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probability that measuring `qubit` gives 0
    pub fn probability_of_zero(&self, qubit: QubitId) -> Result<f64> {
        let mask = qubit.check(self.num_qubits)?.bit_mask(self.num_qubits);
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx & mask == 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum())
    }

    /// √(Σ|a|²)
    pub fn norm(&self) -> f64 {
        amplitude::norm(&self.amplitudes)
    }

    /// Check that the norm is within `epsilon` of 1
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Ket label of a basis index, e.g. `|01⟩`
    pub fn basis_label(&self, index: usize) -> String {
        format!("|{:0width$b}⟩", index, width = self.num_qubits)
    }

    /// Return to |0…0⟩ keeping the qubit count
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (index, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() < DISPLAY_THRESHOLD {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            match f.precision() {
                Some(p) => write!(f, "{:.*} {}", p, amp, self.basis_label(index))?,
                None => write!(f, "{} {}", amp, self.basis_label(index))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pqa_gates::{CNot, Hadamard, PauliX, Phase};
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPSILON: f64 = 1e-10;

    fn q(i: usize) -> QubitId {
        QubitId::new(i)
    }

    #[test]
    fn test_new_register() {
        let register = QuantumRegister::new(3).unwrap();
        assert_eq!(register.num_qubits(), 3);
        assert_eq!(register.dimension(), 8);
        assert_eq!(register.amplitude(0), Some(Complex64::new(1.0, 0.0)));
        assert_eq!(register.amplitude(8), None);
        assert!(register.is_normalized(1e-12));
    }

    #[test]
    fn test_size_limits() {
        assert_eq!(QuantumRegister::new(0), Err(QuantumError::NoQubits));
        assert_eq!(QuantumRegister::from_qubits(&[]), Err(QuantumError::NoQubits));
        assert!(matches!(
            QuantumRegister::new(MAX_QUBITS + 1),
            Err(QuantumError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_from_amplitudes_checks_length() {
        let result = QuantumRegister::from_amplitudes(2, vec![Complex64::new(1.0, 0.0); 3]);
        assert!(matches!(
            result,
            Err(QuantumError::InvalidAmplitudeCount { expected: 4, actual: 3, .. })
        ));

        let register =
            QuantumRegister::from_amplitudes(1, vec![Complex64::new(2.0, 0.0); 2]).unwrap();
        assert_relative_eq!(register.amplitudes()[0].re, FRAC_1_SQRT_2, epsilon = EPSILON);
    }

    #[test]
    fn test_from_qubits_ordering() {
        // |1⟩ ⊗ |0⟩ = |10⟩: the first qubit is the high bit
        let register = QuantumRegister::from_qubits(&[Qubit::one(), Qubit::new()]).unwrap();
        assert_eq!(register.amplitude(0b10), Some(Complex64::new(1.0, 0.0)));
        assert_relative_eq!(register.probability_of_zero(q(0)).unwrap(), 0.0);
        assert_relative_eq!(register.probability_of_zero(q(1)).unwrap(), 1.0);
    }

    #[test]
    fn test_add_qubit() {
        let mut register = QuantumRegister::new(1).unwrap();
        register.apply_gate(&PauliX, &[q(0)]).unwrap();
        let id = register.add_qubit(&Qubit::new()).unwrap();

        assert_eq!(id, q(1));
        assert_eq!(register.num_qubits(), 2);
        assert_eq!(register.amplitude(0b10), Some(Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_apply_gate_validation() {
        let mut register = QuantumRegister::new(2).unwrap();
        assert!(matches!(
            register.apply_gate(&CNot, &[q(0)]),
            Err(QuantumError::InvalidQubitCount { .. })
        ));
        assert!(matches!(
            register.apply_gate(&Hadamard, &[q(2)]),
            Err(QuantumError::InvalidQubit(2, 2))
        ));
        assert!(matches!(
            register.apply_gate(&CNot, &[q(1), q(1)]),
            Err(QuantumError::DuplicateQubit(_))
        ));
        // Nothing was modified
        assert_eq!(register, QuantumRegister::new(2).unwrap());
    }

    #[test]
    fn test_apply_gate_op() {
        let mut register = QuantumRegister::new(2).unwrap();
        let op = GateOp::new(std::sync::Arc::new(PauliX), &[q(1)]).unwrap();
        register.apply(&op).unwrap();
        assert_eq!(register.amplitude(0b01), Some(Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_measure_with_collapses_bell() {
        let mut register = QuantumRegister::new(2).unwrap();
        register.apply_gate(&Hadamard, &[q(0)]).unwrap();
        register.apply_gate(&CNot, &[q(0), q(1)]).unwrap();

        let outcome = register.measure_with(q(0), 0.9).unwrap();
        assert_eq!(outcome.bit, 1);
        assert_relative_eq!(outcome.probability, 0.5, epsilon = EPSILON);
        assert_relative_eq!(register.probabilities()[0b11], 1.0, epsilon = EPSILON);

        let second = register.measure_with(q(1), 0.0).unwrap();
        assert_eq!(second.bit, 1);
        assert_relative_eq!(second.probability, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_measure_invalid_qubit() {
        let mut register = QuantumRegister::new(1).unwrap();
        assert!(matches!(
            register.measure_with(q(1), 0.5),
            Err(QuantumError::InvalidQubit(1, 1))
        ));
    }

    #[test]
    fn test_basis_label_and_reset() {
        let mut register = QuantumRegister::new(3).unwrap();
        assert_eq!(register.basis_label(0b011), "|011⟩");

        register.apply_gate(&Hadamard, &[q(2)]).unwrap();
        register.reset();
        assert_eq!(register, QuantumRegister::new(3).unwrap());
    }

    #[test]
    fn test_display_skips_zero_amplitudes() {
        let mut register = QuantumRegister::new(2).unwrap();
        register.apply_gate(&PauliX, &[q(1)]).unwrap();
        assert_eq!(register.to_string(), "1+0i |01⟩");

        register.apply_gate(&Hadamard, &[q(0)]).unwrap();
        assert_eq!(format!("{:.3}", register), "0.707+0.000i |01⟩\n0.707+0.000i |11⟩");
    }

    #[derive(Debug)]
    struct RawGate {
        num_qubits: usize,
        matrix: Vec<Complex64>,
    }

    impl Gate for RawGate {
        fn name(&self) -> &str {
            "RAW"
        }

        fn num_qubits(&self) -> usize {
            self.num_qubits
        }

        fn matrix(&self) -> Vec<Complex64> {
            self.matrix.clone()
        }
    }

    fn superposed_pair() -> QuantumRegister {
        let mut register = QuantumRegister::new(2).unwrap();
        register.apply_gate(&Hadamard, &[q(0)]).unwrap();
        register.apply_gate(&CNot, &[q(0), q(1)]).unwrap();
        register
    }

    #[test]
    fn test_failed_gate_leaves_register_unchanged() {
        let mut register = superposed_pair();
        let before = register.clone();

        let err = register.apply_gate(&Phase::new(f64::NAN), &[q(1)]).unwrap_err();
        assert!(matches!(err, QuantumError::NumericDegeneracy { .. }));
        assert_eq!(register, before);
        assert!(register.is_normalized(1e-9));

        let zero = RawGate {
            num_qubits: 1,
            matrix: vec![Complex64::new(0.0, 0.0); 4],
        };
        let err = register.apply_gate(&zero, &[q(0)]).unwrap_err();
        assert!(matches!(err, QuantumError::NumericDegeneracy { .. }));
        assert_eq!(register, before);

        // Still usable afterwards
        register.apply_gate(&PauliX, &[q(0)]).unwrap();
        let outcome = register.measure_with(q(0), 0.1).unwrap();
        assert_eq!(register.measure_with(q(1), 0.9).unwrap().bit, 1 - outcome.bit);
    }

    #[test]
    fn test_wrong_matrix_shape_rejected() {
        let mut register = superposed_pair();
        let before = register.clone();

        let short = RawGate {
            num_qubits: 1,
            matrix: vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        };
        let err = register.apply_gate(&short, &[q(0)]).unwrap_err();
        assert!(matches!(err, QuantumError::InvalidGateMatrix { .. }));

        let wide = RawGate {
            num_qubits: 2,
            matrix: vec![Complex64::new(1.0, 0.0); 4],
        };
        let err = register.apply_gate(&wide, &[q(0), q(1)]).unwrap_err();
        assert!(matches!(err, QuantumError::InvalidGateMatrix { .. }));
        assert_eq!(register, before);
    }
}
