//! Core simulator implementation

use pqa_core::{Circuit, Operation, QuantumError, QubitId};
use pqa_gates::matrix_ops;
use pqa_state::{MeasurementOutcome, QuantumRegister};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::{
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    result::SimulationResult,
};

/// Circuit driver owning the configuration and the random source
///
/// Every measurement the simulator performs draws from one [`StdRng`],
/// seeded from [`SimulatorConfig::seed`] when set, so a seeded simulator
/// reproduces the same outcomes run after run.
///
/// # Example
///
/// ```
/// use pqa_core::{Circuit, QubitId};
/// use pqa_gates::{CNot, Hadamard};
/// use pqa_sim::{Simulator, SimulatorConfig};
/// use std::sync::Arc;
///
/// let mut simulator = Simulator::new(SimulatorConfig::deterministic(1)).unwrap();
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.add_gate(Arc::new(Hadamard), &[QubitId::new(0)]).unwrap();
/// circuit.add_gate(Arc::new(CNot), &[QubitId::new(0), QubitId::new(1)]).unwrap();
/// circuit.measure_all();
///
/// let result = simulator.run(&circuit).unwrap();
/// let bits = result.classical_bits();
/// assert!(bits == "00" || bits == "11");
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    /// Returns [`SimulatorError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The random source used for measurements
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Check a qubit count against the configured limit
    pub fn check_width(&self, num_qubits: usize) -> Result<()> {
        if num_qubits > self.config.max_qubits {
            return Err(SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }
        Ok(())
    }

    /// A fresh |0…0⟩ register within the configured limit
    pub fn new_register(&self, num_qubits: usize) -> Result<QuantumRegister> {
        self.check_width(num_qubits)?;
        Ok(QuantumRegister::new(num_qubits)?)
    }

    /// Check a circuit's width and every gate matrix before running it
    pub fn validate_circuit(&self, circuit: &Circuit) -> Result<()> {
        self.check_width(circuit.num_qubits())?;
        for op in circuit.operations() {
            if let Operation::Gate(gate_op) = op {
                let gate = gate_op.gate();
                matrix_ops::validate_unitary(
                    gate.name(),
                    gate.num_qubits(),
                    &gate.matrix(),
                    self.config.unitary_tolerance,
                )?;
            }
        }
        Ok(())
    }

    /// Run a circuit on a fresh |0…0⟩ register
    pub fn run(&mut self, circuit: &Circuit) -> Result<SimulationResult> {
        let register = self.new_register(circuit.num_qubits())?;
        self.run_on(register, circuit)
    }

    /// Run a circuit on a prepared register of the same width
    pub fn run_on(
        &mut self,
        mut register: QuantumRegister,
        circuit: &Circuit,
    ) -> Result<SimulationResult> {
        if register.num_qubits() != circuit.num_qubits() {
            return Err(SimulatorError::RegisterMismatch {
                circuit: circuit.num_qubits(),
                register: register.num_qubits(),
            });
        }
        self.validate_circuit(circuit)?;

        info!(
            num_qubits = circuit.num_qubits(),
            operations = circuit.len(),
            "starting circuit"
        );

        let mut measurements = Vec::with_capacity(circuit.num_measurements());
        let mut gates_applied = 0;
        for op in circuit.operations() {
            match self.execute(&mut register, op)? {
                Some(outcome) => measurements.push(outcome),
                None => gates_applied += 1,
            }
        }

        info!(gates_applied, measurements = measurements.len(), "circuit finished");
        Ok(SimulationResult {
            register,
            measurements,
            gates_applied,
        })
    }

    /// Execute one operation, returning the outcome if it was a measurement
    pub fn execute(
        &mut self,
        register: &mut QuantumRegister,
        op: &Operation,
    ) -> Result<Option<MeasurementOutcome>> {
        debug!(operation = %op, "executing");
        let outcome = match op {
            Operation::Gate(gate_op) => {
                register.apply(gate_op)?;
                None
            }
            Operation::Measure(qubit) => Some(self.measure(register, *qubit)?),
        };
        self.check_normalized(register)?;
        Ok(outcome)
    }

    /// Measure one qubit of `register`
    pub fn measure(
        &mut self,
        register: &mut QuantumRegister,
        qubit: QubitId,
    ) -> Result<MeasurementOutcome> {
        let outcome = register.measure(qubit, &mut self.rng)?;
        info!(
            qubit = %outcome.qubit,
            bit = outcome.bit,
            probability = outcome.probability,
            "measured"
        );
        Ok(outcome)
    }

    /// Measure every qubit of `register`, returning the basis index
    pub fn measure_all(&mut self, register: &mut QuantumRegister) -> Result<usize> {
        let index = register.measure_all(&mut self.rng)?;
        info!(outcome = %register.basis_label(index), "measured all qubits");
        Ok(index)
    }

    fn check_normalized(&self, register: &QuantumRegister) -> Result<()> {
        if !register.is_normalized(self.config.normalization_tolerance) {
            return Err(QuantumError::NumericDegeneracy {
                norm: register.norm(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqa_gates::{CNot, CustomGate, Hadamard, PauliX};
    use std::sync::Arc;

    fn bell_circuit() -> Circuit {
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .add_gate(Arc::new(Hadamard), &[QubitId::new(0)])
            .unwrap()
            .add_gate(Arc::new(CNot), &[QubitId::new(0), QubitId::new(1)])
            .unwrap();
        circuit.measure_all();
        circuit
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulatorConfig::new().with_max_qubits(0);
        assert!(matches!(Simulator::new(config), Err(SimulatorError::InvalidConfig(_))));
    }

    #[test]
    fn test_bell_circuit_correlated() {
        let mut simulator = Simulator::new(SimulatorConfig::deterministic(11)).unwrap();
        for _ in 0..50 {
            let result = simulator.run(&bell_circuit()).unwrap();
            assert_eq!(result.gates_applied, 2);
            assert_eq!(result.measurements.len(), 2);
            assert_eq!(result.measurements[0].bit, result.measurements[1].bit);
        }
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let run = |seed| {
            let mut simulator = Simulator::new(SimulatorConfig::deterministic(seed)).unwrap();
            (0..32)
                .map(|_| simulator.run(&bell_circuit()).unwrap().classical_bits())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_width_limit() {
        let simulator = Simulator::new(SimulatorConfig::new().with_max_qubits(3)).unwrap();
        assert!(simulator.new_register(3).is_ok());
        assert!(matches!(
            simulator.new_register(4),
            Err(SimulatorError::TooManyQubits { num_qubits: 4, max_qubits: 3 })
        ));
    }

    #[test]
    fn test_register_mismatch() {
        let mut simulator = Simulator::new(SimulatorConfig::deterministic(0)).unwrap();
        let register = QuantumRegister::new(3).unwrap();
        assert!(matches!(
            simulator.run_on(register, &bell_circuit()),
            Err(SimulatorError::RegisterMismatch { circuit: 2, register: 3 })
        ));
    }

    #[test]
    fn test_unitary_tolerance_applies_to_custom_gates() {
        // Unitary to 1e-7 but not to the default 1e-9
        let eps = 1e-7;
        let almost_x = CustomGate::new(
            "AX",
            1,
            vec![
                pqa_core::Complex64::new(0.0, 0.0),
                pqa_core::Complex64::new(1.0 + eps, 0.0),
                pqa_core::Complex64::new(1.0, 0.0),
                pqa_core::Complex64::new(0.0, 0.0),
            ],
            1e-6,
        )
        .unwrap();

        let mut circuit = Circuit::new(1).unwrap();
        circuit.add_gate(Arc::new(almost_x), &[QubitId::new(0)]).unwrap();

        let mut strict = Simulator::new(SimulatorConfig::deterministic(0)).unwrap();
        assert!(matches!(
            strict.run(&circuit),
            Err(SimulatorError::Quantum(QuantumError::NotUnitary { .. }))
        ));

        let mut lenient =
            Simulator::new(SimulatorConfig::deterministic(0).with_unitary_tolerance(1e-5)).unwrap();
        assert!(lenient.run(&circuit).is_ok());
    }

    #[test]
    fn test_run_on_prepared_register() {
        let mut simulator = Simulator::new(SimulatorConfig::deterministic(0)).unwrap();
        let mut register = QuantumRegister::new(1).unwrap();
        register.apply_gate(&PauliX, &[QubitId::new(0)]).unwrap();

        let mut circuit = Circuit::new(1).unwrap();
        circuit.add_measurement(QubitId::new(0)).unwrap();

        let result = simulator.run_on(register, &circuit).unwrap();
        assert_eq!(result.classical_bits(), "1");
        assert_eq!(result.gates_applied, 0);
    }

    #[test]
    fn test_measure_all_through_simulator() {
        let mut simulator = Simulator::new(SimulatorConfig::deterministic(3)).unwrap();
        let mut register = simulator.new_register(3).unwrap();
        register.apply_gate(&PauliX, &[QubitId::new(1)]).unwrap();
        assert_eq!(simulator.measure_all(&mut register).unwrap(), 0b010);
    }
}
