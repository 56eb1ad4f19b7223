//! Computational basis measurement
//!
//! Measurement is the only non-unitary transition in the simulator. A
//! measurement of one qubit draws r ~ U[0,1), reads 0 when r < P(0) and 1
//! otherwise, and collapses the state onto the observed bit.
//!
//! Randomness is always injected: callers pass any [`rand::Rng`], or a
//! pre-drawn value to the `*_with` variants for deterministic replay.

use crate::qubit::Qubit;
use crate::register::QuantumRegister;
use pqa_core::QubitId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The observed bit of a single-qubit measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    /// Measured qubit (always q0 for a standalone qubit)
    pub qubit: QubitId,

    /// Observed bit, 0 or 1
    pub bit: u8,

    /// Probability the outcome had before the collapse
    pub probability: f64,
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} (p = {:.3})", self.qubit, self.bit, self.probability)
    }
}

/// Pick a bit given the (unnormalized) weights of the two branches
///
/// Equivalent to `r < p0` for a normalized state. Scaling `r` by the total
/// weight keeps a branch with zero weight from ever being chosen when the
/// state has drifted slightly below unit norm.
#[inline]
pub(crate) fn born_outcome(weight_zero: f64, weight_one: f64, r: f64) -> u8 {
    if r * (weight_zero + weight_one) < weight_zero {
        0
    } else {
        1
    }
}

/// Measure a standalone qubit, drawing from `rng`
pub fn measure_qubit<R: Rng + ?Sized>(qubit: &mut Qubit, rng: &mut R) -> MeasurementOutcome {
    measure_qubit_with(qubit, rng.gen::<f64>())
}

/// Measure a standalone qubit with an explicit draw `r` in [0, 1)
pub fn measure_qubit_with(qubit: &mut Qubit, r: f64) -> MeasurementOutcome {
    let p0 = qubit.probability_zero();
    let p1 = qubit.probability_one();
    let bit = born_outcome(p0, p1, r);
    let probability = (if bit == 0 { p0 } else { p1 }) / (p0 + p1);

    qubit.collapse_to(bit);
    MeasurementOutcome {
        qubit: QubitId::new(0),
        bit,
        probability,
    }
}

/// Counts from repeated sampling of a register without collapsing it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingResult {
    /// Map from basis state index to count
    pub counts: BTreeMap<usize, usize>,

    /// Total number of shots
    pub shots: usize,
}

impl SamplingResult {
    /// Draw `shots` basis states from the register's Born distribution
    ///
    /// The register is left untouched.
    pub fn sample<R: Rng + ?Sized>(register: &QuantumRegister, shots: usize, rng: &mut R) -> Self {
        let mut cumulative = Vec::with_capacity(register.dimension());
        let mut total = 0.0;
        for p in register.probabilities() {
            total += p;
            cumulative.push(total);
        }

        let mut result = Self {
            counts: BTreeMap::new(),
            shots,
        };
        for _ in 0..shots {
            let r = rng.gen::<f64>() * total;
            let index = cumulative
                .partition_point(|&c| c <= r)
                .min(cumulative.len() - 1);
            *result.counts.entry(index).or_insert(0) += 1;
        }
        result
    }

    /// Number of times `outcome` was observed
    pub fn get_count(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Observed frequency of `outcome`
    pub fn get_probability(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// Outcomes sorted by decreasing count
    pub fn sorted_outcomes(&self) -> Vec<(usize, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        outcomes
    }
}
