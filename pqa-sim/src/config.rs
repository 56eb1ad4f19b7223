//! Simulator configuration

use crate::error::{Result, SimulatorError};
use pqa_core::MAX_QUBITS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the quantum simulator
///
/// Every field has a default, so a JSON configuration file only needs the
/// fields it changes:
///
/// ```
/// use pqa_sim::SimulatorConfig;
///
/// let config: SimulatorConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.max_qubits, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducibility
    ///
    /// If None, the generator is seeded from system entropy. Set to
    /// Some(seed) for deterministic measurement outcomes.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Largest register the simulator will allocate
    ///
    /// Must be between 1 and 30.
    ///
    /// Default: 20
    pub max_qubits: usize,

    /// Tolerance for the unitarity check done on every gate before a run
    ///
    /// Default: 1e-9
    pub unitary_tolerance: f64,

    /// Allowed deviation of the state norm from 1 after each operation
    ///
    /// Default: 1e-9
    pub normalization_tolerance: f64,

    /// Basis states with a smaller probability are hidden by `show`
    ///
    /// Default: 1e-9
    pub show_threshold: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: 20,
            unitary_tolerance: 1e-9,
            normalization_tolerance: 1e-9,
            show_threshold: 1e-9,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a fixed seed
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the qubit limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the unitarity tolerance
    pub fn with_unitary_tolerance(mut self, tolerance: f64) -> Self {
        self.unitary_tolerance = tolerance;
        self
    }

    /// Set the normalization tolerance
    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    /// Set the display threshold
    pub fn with_show_threshold(mut self, threshold: f64) -> Self {
        self.show_threshold = threshold;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(SimulatorError::InvalidConfig(format!(
                "max_qubits must be in [1,{}], got {}",
                MAX_QUBITS, self.max_qubits
            )));
        }

        for (name, value) in [
            ("unitary_tolerance", self.unitary_tolerance),
            ("normalization_tolerance", self.normalization_tolerance),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(SimulatorError::InvalidConfig(format!(
                    "{} must be in (0,1), got {}",
                    name, value
                )));
            }
        }

        if !(0.0..1.0).contains(&self.show_threshold) {
            return Err(SimulatorError::InvalidConfig(format!(
                "show_threshold must be in [0,1), got {}",
                self.show_threshold
            )));
        }

        Ok(())
    }
}
