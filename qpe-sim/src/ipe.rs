use crate::simulator::HADAMARD;
use crate::state::StateVector;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

/// One round of the iterative estimate, least-significant phase bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpeRound {
    pub round: u32,
    /// Power the controlled unitary is raised to this round.
    pub controlled_power: u64,
    pub measured_bit: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpeReport {
    pub bits: u32,
    /// Recovered phase as numerator / 2^bits.
    pub numerator: u64,
    pub rounds: Vec<IpeRound>,
}

/// Iterative phase estimation of a phase gate U = P(theta) on its |1>
/// eigenstate, one bit per round on a single reused ancilla.
///
/// Round k prepares the ancilla in |+>, applies the controlled
/// U^(2^(bits-k)), rotates away the phase contribution of the bits
/// already measured, and a closing Hadamard turns the remaining bit into
/// a Z measurement. When theta has an exact `bits`-bit expansion every
/// round is deterministic.
pub fn iterative_phase_estimate(theta: f64, bits: u32, rng: &mut impl Rng) -> IpeReport {
    // ancilla on qubit 0, eigenstate on qubit 1
    let mut state = StateVector::new(2);
    state.apply_x(1);

    let mut numerator: u64 = 0;
    let mut rounds = Vec::with_capacity(bits as usize);

    for round in 1..=bits {
        state.reset_qubit(0, rng);
        state.apply_single_qubit_gate(&HADAMARD, 0);

        let power = 1u64 << (bits - round);
        // controlled-U^power collapses to a single controlled phase
        state.apply_controlled_phase(0, 1, theta * power as f64);

        if numerator != 0 {
            let correction = -2.0 * PI * numerator as f64 / (1u64 << round) as f64;
            state.apply_phase(0, correction);
        }

        state.apply_single_qubit_gate(&HADAMARD, 0);
        let measured_bit = state.measure_qubit(0, rng);
        numerator |= u64::from(measured_bit) << (round - 1);

        rounds.push(IpeRound {
            round,
            controlled_power: power,
            measured_bit,
        });
    }

    IpeReport {
        bits,
        numerator,
        rounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn exact_theta(numerator: u64, bits: u32) -> f64 {
        2.0 * PI * numerator as f64 / (1u64 << bits) as f64
    }

    #[test]
    fn recovers_an_exact_four_bit_phase() {
        let mut rng = StdRng::seed_from_u64(5);
        let report = iterative_phase_estimate(exact_theta(5, 4), 4, &mut rng);
        assert_eq!(report.numerator, 5);
        assert_eq!(report.rounds.len(), 4);
        // 5 = 0101: bits arrive least significant first
        let measured: Vec<u8> = report.rounds.iter().map(|r| r.measured_bit).collect();
        assert_eq!(measured, vec![1, 0, 1, 0]);
    }

    #[test]
    fn one_round_resolves_a_half_turn() {
        let mut rng = StdRng::seed_from_u64(5);
        let report = iterative_phase_estimate(exact_theta(1, 1), 1, &mut rng);
        assert_eq!(report.numerator, 1);
    }

    #[test]
    fn zero_phase_measures_all_zeros() {
        let mut rng = StdRng::seed_from_u64(5);
        let report = iterative_phase_estimate(0.0, 6, &mut rng);
        assert_eq!(report.numerator, 0);
        assert!(report.rounds.iter().all(|r| r.measured_bit == 0));
    }

    #[test]
    fn controlled_powers_halve_each_round() {
        let mut rng = StdRng::seed_from_u64(5);
        let report = iterative_phase_estimate(exact_theta(3, 3), 3, &mut rng);
        let powers: Vec<u64> = report.rounds.iter().map(|r| r.controlled_power).collect();
        assert_eq!(powers, vec![4, 2, 1]);
    }
}
