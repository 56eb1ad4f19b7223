//! Probability amplitudes
//!
//! An amplitude is a plain [`Complex64`]: addition, multiplication,
//! conjugation and the squared magnitude (`norm_sqr`) come straight from
//! `num-complex`. What this module adds is the one operation the simulator
//! must never get wrong silently: dividing by a norm. A zero (or non-finite)
//! norm means a state with no probability mass, and dividing by it would fill
//! the state with NaN, so it is reported as [`QuantumError::NumericDegeneracy`].

use crate::{QuantumError, Result};
use num_complex::Complex64;

/// A complex probability amplitude
pub type Amplitude = Complex64;

/// Norms below this are treated as zero
const DEGENERATE_NORM: f64 = f64::EPSILON;

#[inline]
fn check_norm(norm: f64) -> Result<()> {
    if !norm.is_finite() || norm < DEGENERATE_NORM {
        return Err(QuantumError::NumericDegeneracy { norm });
    }
    Ok(())
}

/// Divide an amplitude by a (real, positive) norm
///
/// # Errors
/// Returns [`QuantumError::NumericDegeneracy`] if `norm` is zero or not finite.
///
/// # Example
/// ```
/// use pqa_core::{checked_scale_by_norm, Amplitude};
///
/// let a = checked_scale_by_norm(Amplitude::new(3.0, 4.0), 5.0).unwrap();
/// assert_eq!(a, Amplitude::new(0.6, 0.8));
/// assert!(checked_scale_by_norm(a, 0.0).is_err());
/// ```
#[inline]
pub fn checked_scale_by_norm(amplitude: Amplitude, norm: f64) -> Result<Amplitude> {
    check_norm(norm)?;
    Ok(amplitude / norm)
}

/// Euclidean norm √(Σ|a|²) of a slice of amplitudes
#[inline]
pub fn norm(amplitudes: &[Amplitude]) -> f64 {
    amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
}

/// Rescale a slice of amplitudes in place so that Σ|a|² = 1
///
/// Returns the norm the amplitudes had before rescaling.
///
/// # Errors
/// Returns [`QuantumError::NumericDegeneracy`] if the slice has zero total
/// probability. The amplitudes are left untouched in that case.
pub fn normalize_amplitudes(amplitudes: &mut [Amplitude]) -> Result<f64> {
    let norm = norm(amplitudes);
    check_norm(norm)?;

    let inv_norm = 1.0 / norm;
    for amp in amplitudes.iter_mut() {
        *amp *= inv_norm;
    }
    Ok(norm)
}
