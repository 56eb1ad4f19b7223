//! Gate application kernels on a raw state vector
//!
//! Both kernels work in place on a slice of `2^n` amplitudes and take the
//! bit masks of the target qubits rather than qubit indices, so they do not
//! care which bit-ordering convention the caller uses. The register passes
//! big-endian masks (qubit 0 is the most significant bit).
//!
//! Neither kernel renormalizes; that is the caller's job.

use num_complex::Complex64;

/// Apply a single-qubit gate using scalar operations
///
/// # Algorithm
/// For a gate on the qubit selected by `mask`:
/// - Group amplitudes into pairs (i, j) where i and j differ only in that bit
/// - Apply the 2×2 matrix to each pair
/// - Complexity: O(2^n) operations
pub fn apply_single_qubit(state: &mut [Complex64], matrix: &[Complex64], mask: usize) {
    debug_assert_eq!(matrix.len(), 4);

    // Extract matrix elements for better cache locality
    let m00 = matrix[0];
    let m01 = matrix[1];
    let m10 = matrix[2];
    let m11 = matrix[3];

    for i in 0..state.len() {
        // Skip the "high" half of each pair
        if i & mask != 0 {
            continue;
        }

        let j = i | mask;
        let amp0 = state[i];
        let amp1 = state[j];

        state[i] = m00 * amp0 + m01 * amp1;
        state[j] = m10 * amp0 + m11 * amp1;
    }
}

/// Apply a k-qubit gate to the qubits selected by `masks`
///
/// `matrix` is the row-major `2^k × 2^k` gate matrix. Its sub-index is formed
/// from the target bits with `masks[0]` as the most significant bit, so a
/// CNOT with `masks = [control, target]` flips `target` where `control` is set,
/// whatever the positions of the two qubits in the register.
///
/// # Algorithm
/// - Precompute, for each sub-index s, the offset that sets the target bits of s
/// - For every base index with all target bits clear, gather the `2^k`
///   amplitudes `state[base | offset[s]]`
/// - Multiply by the matrix and scatter the result back
pub fn apply_multi_qubit(state: &mut [Complex64], matrix: &[Complex64], masks: &[usize]) {
    let k = masks.len();
    let block = 1usize << k;
    debug_assert_eq!(matrix.len(), block * block);

    let target_mask = masks.iter().fold(0, |acc, m| acc | m);
    let offsets: Vec<usize> = (0..block)
        .map(|s| {
            masks
                .iter()
                .enumerate()
                .filter(|(bit, _)| s & (1 << (k - 1 - bit)) != 0)
                .fold(0, |acc, (_, m)| acc | m)
        })
        .collect();

    let mut gathered = vec![Complex64::new(0.0, 0.0); block];

    for base in 0..state.len() {
        if base & target_mask != 0 {
            continue;
        }

        for (slot, offset) in gathered.iter_mut().zip(&offsets) {
            *slot = state[base | offset];
        }

        for (row, offset) in offsets.iter().enumerate() {
            let coefficients = &matrix[row * block..(row + 1) * block];
            state[base | offset] = coefficients
                .iter()
                .zip(&gathered)
                .map(|(m, a)| m * a)
                .sum();
        }
    }
}

/// Apply a gate of any arity, choosing the fastest kernel
#[inline]
pub fn apply_matrix(state: &mut [Complex64], matrix: &[Complex64], masks: &[usize]) {
    match masks {
        [mask] => apply_single_qubit(state, matrix, *mask),
        _ => apply_multi_qubit(state, matrix, masks),
    }
}
