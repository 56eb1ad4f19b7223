//! Benchmarks for register gate application
//!
//! Compares the single-qubit kernel with the general block kernel and
//! measures a full CNOT on registers of growing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex64;
use pqa_core::{Gate, QubitId};
use pqa_gates::{CNot, Hadamard};
use pqa_state::kernel::{apply_multi_qubit, apply_single_qubit};
use pqa_state::QuantumRegister;

fn zero_state(num_qubits: usize) -> Vec<Complex64> {
    let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
    state[0] = Complex64::new(1.0, 0.0);
    state
}

fn bench_single_qubit_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard_kernel");
    let h = Gate::matrix(&Hadamard);

    for num_qubits in [10, 15, 20].iter() {
        let size = 1 << num_qubits;
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("single", num_qubits), num_qubits, |b, &n| {
            let mut state = zero_state(n);
            b.iter(|| apply_single_qubit(black_box(&mut state), &h, 1 << (n / 2)));
        });

        group.bench_with_input(BenchmarkId::new("block", num_qubits), num_qubits, |b, &n| {
            let mut state = zero_state(n);
            b.iter(|| apply_multi_qubit(black_box(&mut state), &h, &[1 << (n / 2)]));
        });
    }

    group.finish();
}

fn bench_register_cnot(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_cnot");

    for num_qubits in [8, 12, 16].iter() {
        group.throughput(Throughput::Elements(1 << num_qubits));

        group.bench_with_input(BenchmarkId::from_parameter(num_qubits), num_qubits, |b, &n| {
            let mut register = QuantumRegister::new(n).unwrap();
            register.apply_gate(&Hadamard, &[QubitId::new(0)]).unwrap();
            let targets = [QubitId::new(0), QubitId::new(n - 1)];

            b.iter(|| register.apply_gate(black_box(&CNot), &targets).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_qubit_kernels, bench_register_cnot);
criterion_main!(benches);
