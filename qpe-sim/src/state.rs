use num_complex::Complex;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        if !amplitudes.is_empty() {
            amplitudes[0] = Complex::new(1.0, 0.0);
        }
        Self {
            num_qubits,
            amplitudes,
        }
    }

    pub fn apply_single_qubit_gate(
        &mut self,
        gate_matrix: &[[Complex<f64>; 2]; 2],
        target_qubit: usize,
    ) {
        let mut new_amplitudes = self.amplitudes.clone();
        let k = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & k) == 0 {
                let j = i | k;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                new_amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                new_amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
        self.amplitudes = new_amplitudes;
    }

    /// Pauli-X as a basis-state swap; no matrix needed.
    pub fn apply_x(&mut self, target_qubit: usize) {
        let mask = 1usize << target_qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    /// Phase gate: multiplies the |1> amplitude of `target_qubit` by e^{i*angle}.
    pub fn apply_phase(&mut self, target_qubit: usize, angle: f64) {
        let phase = Complex::from_polar(1.0, angle);
        let mask = 1usize << target_qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    /// Controlled phase: e^{i*angle} on basis states with both qubits set.
    pub fn apply_controlled_phase(&mut self, control: usize, target: usize, angle: f64) {
        let phase = Complex::from_polar(1.0, angle);
        let mask = (1usize << control) | (1usize << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    /// Controlled modular multiplication on the work register: under the
    /// control qubit, permutes work values y < modulus to y * multiplier
    /// mod modulus and leaves y >= modulus untouched. The multiplier must
    /// be coprime to the modulus for this to stay a permutation.
    pub fn apply_controlled_modmul(
        &mut self,
        control: usize,
        multiplier: u64,
        modulus: u64,
        work_start: usize,
        work_bits: usize,
    ) {
        let control_mask = 1usize << control;
        let work_mask = ((1usize << work_bits) - 1) << work_start;
        let mut new_amplitudes = vec![Complex::new(0.0, 0.0); self.amplitudes.len()];

        for (i, amp) in self.amplitudes.iter().enumerate() {
            let y = ((i & work_mask) >> work_start) as u64;
            let j = if i & control_mask != 0 && y < modulus {
                let mapped = (u128::from(y) * u128::from(multiplier) % u128::from(modulus)) as usize;
                (i & !work_mask) | (mapped << work_start)
            } else {
                i
            };
            new_amplitudes[j] = *amp;
        }
        self.amplitudes = new_amplitudes;
    }

    /// Exact inverse discrete Fourier transform over one contiguous
    /// sub-register of `bits` qubits starting at `start`. Direct O(M^2)
    /// per branch of the remaining qubits; register widths stay inside
    /// the backend's qubit budget.
    pub fn apply_inverse_qft(&mut self, start: usize, bits: usize) {
        let m = 1usize << bits;
        let reg_mask = (m - 1) << start;
        let norm = 1.0 / (m as f64).sqrt();
        let mut transformed = vec![Complex::new(0.0, 0.0); m];

        for base in 0..self.amplitudes.len() {
            if base & reg_mask != 0 {
                continue;
            }
            for (v, out) in transformed.iter_mut().enumerate() {
                let mut acc = Complex::new(0.0, 0.0);
                for x in 0..m {
                    let angle = -2.0 * PI * (v * x) as f64 / m as f64;
                    acc += self.amplitudes[base | (x << start)] * Complex::from_polar(1.0, angle);
                }
                *out = acc * norm;
            }
            for (v, out) in transformed.iter().enumerate() {
                self.amplitudes[base | (v << start)] = *out;
            }
        }
    }

    pub fn measure_all(&mut self, rng: &mut impl Rng) -> usize {
        let probabilities: Vec<f64> = self.amplitudes.iter().map(|a| a.norm_sqr()).collect();
        let dist =
            WeightedIndex::new(&probabilities).expect("Failed to create weighted distribution.");
        let measured_index = dist.sample(rng);

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if i == measured_index {
                Complex::new(1.0, 0.0)
            } else {
                Complex::new(0.0, 0.0)
            };
        }
        measured_index
    }

    /// Measures one qubit in Z and collapses the state onto the outcome.
    pub fn measure_qubit(&mut self, qubit: usize, rng: &mut impl Rng) -> u8 {
        let mask = 1usize << qubit;
        let p_one: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();

        let outcome = if rng.gen_range(0.0..1.0) < p_one {
            1u8
        } else {
            0u8
        };
        let keep = if outcome == 1 { mask } else { 0 };
        let norm = if outcome == 1 { p_one } else { 1.0 - p_one }.sqrt();

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == keep {
                *amp /= norm;
            } else {
                *amp = Complex::new(0.0, 0.0);
            }
        }
        outcome
    }

    /// Measure-and-flip reset of a single qubit back to |0>.
    pub fn reset_qubit(&mut self, qubit: usize, rng: &mut impl Rng) {
        if self.measure_qubit(qubit, rng) == 1 {
            self.apply_x(qubit);
        }
    }

    pub fn reset(&mut self) {
        for amp in &mut self.amplitudes {
            *amp = Complex::new(0.0, 0.0);
        }
        if !self.amplitudes.is_empty() {
            self.amplitudes[0] = Complex::new(1.0, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn test_state_vector_initialization() {
        let num_qubits = 3;
        let state = StateVector::new(num_qubits);
        assert_eq!(state.num_qubits, num_qubits);
        assert_eq!(state.amplitudes.len(), 1 << num_qubits);
        assert!(approx_eq(state.amplitudes[0], Complex::new(1.0, 0.0)));
        for i in 1..state.amplitudes.len() {
            assert!(approx_eq(state.amplitudes[i], Complex::new(0.0, 0.0)));
        }
    }

    #[test]
    fn x_flips_a_basis_state() {
        let mut state = StateVector::new(2);
        state.apply_x(1);
        assert!(approx_eq(state.amplitudes[2], Complex::new(1.0, 0.0)));
        assert!(approx_eq(state.amplitudes[0], Complex::new(0.0, 0.0)));
    }

    #[test]
    fn controlled_phase_only_touches_the_doubly_set_branch() {
        let mut state = StateVector::new(2);
        state.apply_x(0);
        state.apply_x(1); // |11>
        state.apply_controlled_phase(0, 1, PI);
        assert!(approx_eq(state.amplitudes[3], Complex::new(-1.0, 0.0)));

        let mut untouched = StateVector::new(2);
        untouched.apply_x(0); // |01>
        untouched.apply_controlled_phase(0, 1, PI);
        assert!(approx_eq(untouched.amplitudes[1], Complex::new(1.0, 0.0)));
    }

    #[test]
    fn controlled_modmul_permutes_the_work_register() {
        // qubit 0 is the control, qubits 1..5 the work register
        let mut state = StateVector::new(5);
        state.apply_x(0);
        state.apply_x(1); // work value 1, control set
        state.apply_controlled_modmul(0, 7, 15, 1, 4);
        // 1 * 7 mod 15 = 7 -> basis index (7 << 1) | 1
        let expected = (7 << 1) | 1;
        assert!(approx_eq(state.amplitudes[expected], Complex::new(1.0, 0.0)));
    }

    #[test]
    fn controlled_modmul_is_identity_without_the_control() {
        let mut state = StateVector::new(5);
        state.apply_x(1); // work value 1, control clear
        state.apply_controlled_modmul(0, 7, 15, 1, 4);
        assert!(approx_eq(state.amplitudes[1 << 1], Complex::new(1.0, 0.0)));
    }

    #[test]
    fn inverse_qft_concentrates_a_phase_ramp() {
        // amplitudes e^{2*pi*i * (3/8) * x} / sqrt(8) must transform to |011>
        let mut state = StateVector::new(3);
        let m = 8usize;
        let norm = 1.0 / (m as f64).sqrt();
        for x in 0..m {
            let angle = 2.0 * PI * 3.0 * x as f64 / m as f64;
            state.amplitudes[x] = Complex::from_polar(norm, angle);
        }
        state.apply_inverse_qft(0, 3);
        assert!(approx_eq(state.amplitudes[3], Complex::new(1.0, 0.0)));
        for (i, amp) in state.amplitudes.iter().enumerate() {
            if i != 3 {
                assert!(approx_eq(*amp, Complex::new(0.0, 0.0)));
            }
        }
    }

    #[test]
    fn inverse_qft_spreads_the_zero_state() {
        let mut state = StateVector::new(2);
        state.apply_inverse_qft(0, 2);
        for amp in &state.amplitudes {
            assert!(approx_eq(*amp, Complex::new(0.5, 0.0)));
        }
    }

    #[test]
    fn single_qubit_measurement_is_deterministic_on_basis_states() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = StateVector::new(2);
        state.apply_x(1); // |10>
        assert_eq!(state.measure_qubit(1, &mut rng), 1);
        assert_eq!(state.measure_qubit(0, &mut rng), 0);
        // collapsed state is untouched by the measurements
        assert!(approx_eq(state.amplitudes[2], Complex::new(1.0, 0.0)));
    }

    #[test]
    fn reset_returns_the_qubit_to_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = StateVector::new(1);
        state.apply_x(0);
        state.reset_qubit(0, &mut rng);
        assert!(approx_eq(state.amplitudes[0], Complex::new(1.0, 0.0)));
    }
}
