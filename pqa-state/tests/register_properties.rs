//! Physical properties of register gate application and measurement

use approx::assert_relative_eq;
use num_complex::Complex64;
use pqa_core::{Gate, QuantumError, QubitId};
use pqa_gates::{CNot, CustomGate, Hadamard, PauliX, PauliY, PauliZ, Phase, SGate, TGate};
use pqa_state::{QuantumRegister, Qubit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const EPSILON: f64 = 1e-10;

fn q(i: usize) -> QubitId {
    QubitId::new(i)
}

fn plus() -> Qubit {
    let mut qubit = Qubit::new();
    qubit.apply_gate(&Hadamard).unwrap();
    qubit
}

fn bell_pair() -> QuantumRegister {
    let mut register = QuantumRegister::new(2).unwrap();
    register.apply_gate(&Hadamard, &[q(0)]).unwrap();
    register.apply_gate(&CNot, &[q(0), q(1)]).unwrap();
    register
}

/// P(qubit = 1) for each qubit
fn marginals(register: &QuantumRegister) -> Vec<f64> {
    (0..register.num_qubits())
        .map(|i| 1.0 - register.probability_of_zero(q(i)).unwrap())
        .collect()
}

#[test]
fn test_bell_state_amplitudes() {
    let register = bell_pair();
    let expected = [FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2];
    for (amp, want) in register.amplitudes().iter().zip(expected) {
        assert_relative_eq!(amp.re, want, epsilon = EPSILON);
        assert_relative_eq!(amp.im, 0.0, epsilon = EPSILON);
    }
}

#[test]
fn test_bell_measurement_correlation() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let mut register = bell_pair();
        let first = register.measure(q(0), &mut rng).unwrap();
        let second = register.measure(q(1), &mut rng).unwrap();

        assert_eq!(first.bit, second.bit);
        assert_relative_eq!(second.probability, 1.0, epsilon = EPSILON);
        assert!(register.is_normalized(1e-9));

        let p = register.probabilities();
        let hit = if first.bit == 0 { 0b00 } else { 0b11 };
        assert_relative_eq!(p[hit], 1.0, epsilon = EPSILON);
    }
}

#[test]
fn test_three_qubit_uniform_tensor_product() {
    let register = QuantumRegister::from_qubits(&[plus(), plus(), plus()]).unwrap();
    assert_eq!(register.dimension(), 8);
    let expected = 1.0 / 8f64.sqrt();
    for amp in register.amplitudes() {
        assert_relative_eq!(amp.re, expected, epsilon = EPSILON);
        assert_relative_eq!(amp.im, 0.0, epsilon = EPSILON);
    }
}

#[test]
fn test_non_uniform_tensor_product() {
    let a = Qubit::from_amplitudes(Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)).unwrap();
    let b = Qubit::from_amplitudes(Complex64::new(1.0, 0.0), Complex64::new(1.0, 1.0)).unwrap();
    let c = Qubit::one();
    let qubits = [a.clone(), b.clone(), c.clone()];
    let register = QuantumRegister::from_qubits(&qubits).unwrap();

    let pick = |qubit: &Qubit, bit: usize| if bit == 0 { qubit.alpha() } else { qubit.beta() };
    for index in 0..8 {
        let expected =
            pick(&a, (index >> 2) & 1) * pick(&b, (index >> 1) & 1) * pick(&c, index & 1);
        let actual = register.amplitude(index).unwrap();
        assert_relative_eq!((actual - expected).norm(), 0.0, epsilon = EPSILON);
    }
}

#[test]
fn test_cnot_on_non_adjacent_qubits() {
    // H on q0, CNOT(q0 -> q2) in a 3-qubit register: q0 and q2 correlated, q1 untouched
    let mut register = QuantumRegister::from_qubits(&[Qubit::new(), plus(), Qubit::new()]).unwrap();
    let before = marginals(&register);
    register.apply_gate(&Hadamard, &[q(0)]).unwrap();
    register.apply_gate(&CNot, &[q(0), q(2)]).unwrap();

    let p = register.probabilities();
    for (index, prob) in p.iter().enumerate() {
        let bit0 = (index >> 2) & 1;
        let bit2 = index & 1;
        if bit0 != bit2 {
            assert_relative_eq!(*prob, 0.0, epsilon = EPSILON);
        } else {
            assert_relative_eq!(*prob, 0.25, epsilon = EPSILON);
        }
    }
    assert_relative_eq!(marginals(&register)[1], before[1], epsilon = EPSILON);
}

#[test]
fn test_cnot_reversed_pair() {
    // Control q2, target q0
    let mut register = QuantumRegister::new(3).unwrap();
    register.apply_gate(&PauliY, &[q(1)]).unwrap();
    register.apply_gate(&Hadamard, &[q(2)]).unwrap();
    let spectator = marginals(&register)[1];

    register.apply_gate(&CNot, &[q(2), q(0)]).unwrap();

    let p = register.probabilities();
    assert_relative_eq!(p[0b010], 0.5, epsilon = EPSILON);
    assert_relative_eq!(p[0b111], 0.5, epsilon = EPSILON);
    assert_relative_eq!(marginals(&register)[1], spectator, epsilon = EPSILON);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let mut copy = register.clone();
        let control = copy.measure(q(2), &mut rng).unwrap();
        let target = copy.measure(q(0), &mut rng).unwrap();
        assert_eq!(control.bit, target.bit);
    }
}

#[test]
fn test_single_qubit_gate_matches_standalone_qubit() {
    // A gate on one qubit of a product state acts like the gate on that qubit alone
    let gates: Vec<Box<dyn Gate>> = vec![
        Box::new(Hadamard),
        Box::new(PauliX),
        Box::new(PauliY),
        Box::new(PauliZ),
        Box::new(SGate),
        Box::new(TGate),
        Box::new(Phase::new(PI / 4.0)),
    ];

    for gate in &gates {
        let mut middle = plus();
        let mut register =
            QuantumRegister::from_qubits(&[Qubit::one(), middle.clone(), Qubit::new()]).unwrap();
        register.apply_gate(gate.as_ref(), &[q(1)]).unwrap();
        middle.apply_gate(gate.as_ref()).unwrap();

        let expected = QuantumRegister::from_qubits(&[Qubit::one(), middle, Qubit::new()]).unwrap();
        for (a, b) in register.amplitudes().iter().zip(expected.amplitudes()) {
            assert_relative_eq!((a - b).norm(), 0.0, epsilon = EPSILON);
        }
    }
}

#[test]
fn test_normalization_after_random_circuit() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut register = QuantumRegister::new(4).unwrap();

    for _ in 0..200 {
        let a = rng.gen_range(0..4);
        let mut b = rng.gen_range(0..4);
        while b == a {
            b = rng.gen_range(0..4);
        }
        match rng.gen_range(0..4) {
            0 => register.apply_gate(&Hadamard, &[q(a)]).unwrap(),
            1 => register.apply_gate(&Phase::new(rng.gen::<f64>() * 2.0 * PI), &[q(a)]).unwrap(),
            2 => register.apply_gate(&PauliY, &[q(a)]).unwrap(),
            _ => register.apply_gate(&CNot, &[q(a), q(b)]).unwrap(),
        }
        assert!(register.is_normalized(1e-9));
    }
}

#[test]
fn test_custom_gate_on_register() {
    // √X applied twice is X
    let half = Complex64::new(0.5, 0.5);
    let half_conj = Complex64::new(0.5, -0.5);
    let sqrt_x = CustomGate::from_2x2("SX", [[half, half_conj], [half_conj, half]]).unwrap();

    let mut register = QuantumRegister::new(2).unwrap();
    register.apply_gate(&sqrt_x, &[q(1)]).unwrap();
    register.apply_gate(&sqrt_x, &[q(1)]).unwrap();
    assert_relative_eq!(register.probabilities()[0b01], 1.0, epsilon = EPSILON);
}

#[test]
fn test_non_unitary_custom_gate_rejected() {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let result = CustomGate::from_2x2("PROJ", [[one, zero], [zero, zero]]);
    assert!(matches!(result, Err(QuantumError::NotUnitary { .. })));
}

#[test]
fn test_zero_vector_rejected() {
    let result = QuantumRegister::from_amplitudes(2, vec![Complex64::new(0.0, 0.0); 4]);
    assert!(matches!(result, Err(QuantumError::NumericDegeneracy { .. })));
}

#[test]
fn test_born_frequencies() {
    // cos²(π/8) ≈ 0.854 for |0⟩
    let theta = PI / 8.0;
    let qubit = Qubit::from_amplitudes(
        Complex64::new(theta.cos(), 0.0),
        Complex64::new(theta.sin(), 0.0),
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let shots = 10_000;
    let mut zeros = 0;
    for _ in 0..shots {
        let mut register = QuantumRegister::from_qubits(&[qubit.clone()]).unwrap();
        if register.measure(q(0), &mut rng).unwrap().bit == 0 {
            zeros += 1;
        }
    }

    let frequency = zeros as f64 / shots as f64;
    assert!((frequency - theta.cos().powi(2)).abs() < 0.02, "frequency {}", frequency);
}

#[test]
fn test_measure_all_returns_basis_index() {
    let mut register =
        QuantumRegister::from_qubits(&[Qubit::one(), Qubit::new(), Qubit::one()]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(register.measure_all(&mut rng).unwrap(), 0b101);

    let mut register = bell_pair();
    let index = register.measure_all(&mut rng).unwrap();
    assert!(index == 0b00 || index == 0b11);
    assert_relative_eq!(register.probabilities()[index], 1.0, epsilon = EPSILON);
}
