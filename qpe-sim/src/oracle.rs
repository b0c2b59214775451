use crate::circuit::{Circuit, work_register_width};
use crate::simulator::PhaseSimulator;
use rand::SeedableRng;
use rand::rngs::StdRng;
use shor_core::{OracleError, PhaseJob, PhaseOracle, PhaseSample};
use std::time::{Duration, Instant};

/// Backend configuration, passed in explicitly rather than read from any
/// process-wide state.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Refuse readouts whose combined register would exceed this many qubits.
    pub max_qubits: u32,
    /// Per-sample wall-clock budget; `None` disables the check.
    pub deadline: Option<Duration>,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            max_qubits: 24,
            deadline: None,
            seed: None,
        }
    }
}

/// A `PhaseOracle` backed by the statevector simulator: builds the
/// order-finding readout for each job and samples it once.
pub struct SampledOracle {
    config: OracleConfig,
    rng: StdRng,
}

impl SampledOracle {
    pub fn new(config: OracleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SampledOracle { config, rng }
    }
}

impl PhaseOracle for SampledOracle {
    fn sample_phase(&mut self, job: &PhaseJob) -> Result<PhaseSample, OracleError> {
        let qubits = job.precision_bits + work_register_width(job.modulus);
        if qubits > self.config.max_qubits {
            return Err(OracleError::RegisterTooLarge {
                qubits,
                limit: self.config.max_qubits,
            });
        }

        let started = Instant::now();
        let circuit = Circuit::order_finding(job.modulus, job.base, job.precision_bits)
            .map_err(|err| OracleError::Backend(err.to_string()))?;
        let mut sim = PhaseSimulator::new(circuit.num_qubits);
        let outcome = sim
            .run(&circuit, &mut self.rng)
            .map_err(|err| OracleError::Backend(err.to_string()))?;

        if let Some(deadline) = self.config.deadline {
            let elapsed = started.elapsed();
            if elapsed > deadline {
                return Err(OracleError::Timeout { elapsed });
            }
        }

        Ok(PhaseSample::new(outcome.counting_value, job.precision_bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shor_core::{EstimateConfig, FactorEstimator};

    fn seeded(seed: u64) -> SampledOracle {
        SampledOracle::new(OracleConfig {
            seed: Some(seed),
            ..OracleConfig::default()
        })
    }

    #[test]
    fn oversized_jobs_are_refused() {
        let mut oracle = SampledOracle::new(OracleConfig {
            max_qubits: 6,
            ..OracleConfig::default()
        });
        let job = PhaseJob {
            modulus: 15,
            base: 7,
            precision_bits: 4,
        };
        assert!(matches!(
            oracle.sample_phase(&job),
            Err(OracleError::RegisterTooLarge { qubits: 8, limit: 6 })
        ));
    }

    #[test]
    fn equal_seeds_draw_equal_samples() {
        let job = PhaseJob {
            modulus: 15,
            base: 7,
            precision_bits: 4,
        };
        let first = seeded(42).sample_phase(&job).unwrap();
        let second = seeded(42).sample_phase(&job).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn samples_respect_the_order_of_the_base() {
        // order of 7 mod 15 is 4, so samples sit exactly on multiples of 16/4
        let mut oracle = seeded(9);
        let job = PhaseJob {
            modulus: 15,
            base: 7,
            precision_bits: 4,
        };
        for _ in 0..10 {
            let sample = oracle.sample_phase(&job).unwrap();
            assert_eq!(sample.value() % 4, 0);
        }
    }

    #[test]
    fn end_to_end_factors_fifteen() {
        let mut estimator = FactorEstimator::new(seeded(17));
        let estimate = estimator
            .estimate_factor(&EstimateConfig {
                modulus: 15,
                base: 7,
                precision_bits: 8,
                max_attempts: 32,
            })
            .unwrap();
        let (low, high) = estimate.factors;
        let nontrivial = |f: u64| f != 1 && f != 15 && 15 % f == 0;
        assert!(nontrivial(low) || nontrivial(high));
    }
}
