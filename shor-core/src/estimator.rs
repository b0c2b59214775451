use crate::approx::best_approximation;
use crate::arith::{gcd, modpow};
use crate::error::FactorError;
use crate::oracle::{PhaseJob, PhaseOracle};
use serde::Serialize;
use std::fmt;

/// Parameters for one factoring run.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateConfig {
    /// The composite number to factor.
    pub modulus: u64,
    /// Base of the modular exponentiation; must be coprime to the modulus.
    pub base: u64,
    /// Counting bits requested from the oracle per attempt.
    pub precision_bits: u32,
    /// Retry bound keeping the run finite.
    pub max_attempts: u32,
}

impl EstimateConfig {
    fn validate(&self) -> Result<(), FactorError> {
        if self.modulus < 2 {
            return Err(FactorError::InvalidModulus(self.modulus));
        }
        if self.base < 2 || self.base >= self.modulus {
            return Err(FactorError::BaseOutOfRange {
                base: self.base,
                modulus: self.modulus,
            });
        }
        let common_divisor = gcd(self.base, self.modulus);
        if common_divisor != 1 {
            return Err(FactorError::InvalidBase {
                base: self.base,
                modulus: self.modulus,
                common_divisor,
            });
        }
        if self.precision_bits == 0 || self.precision_bits > 63 {
            return Err(FactorError::InvalidPrecision(self.precision_bits));
        }
        if self.max_attempts == 0 {
            return Err(FactorError::InvalidAttemptBudget);
        }
        Ok(())
    }
}

/// How a single attempt ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AttemptOutcome {
    OracleFailed {
        reason: String,
    },
    OddPeriod {
        bits: String,
        period: u64,
    },
    TrivialFactors {
        bits: String,
        period: u64,
    },
    Factored {
        bits: String,
        period: u64,
        factors: (u64, u64),
    },
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::OracleFailed { reason } => write!(f, "oracle failed: {}", reason),
            AttemptOutcome::OddPeriod { bits, period } => {
                write!(f, "sampled {} -> period guess {} is odd", bits, period)
            }
            AttemptOutcome::TrivialFactors { bits, period } => {
                write!(f, "sampled {} -> period guess {} gave trivial factors", bits, period)
            }
            AttemptOutcome::Factored {
                bits,
                period,
                factors,
            } => write!(
                f,
                "sampled {} -> period guess {} splits as {} x {}",
                bits, period, factors.0, factors.1
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub attempt: u32,
    pub outcome: AttemptOutcome,
}

/// A successful run: the gcd pair and the attempts it took.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub factors: (u64, u64),
    pub attempts_used: u32,
    pub trace: Vec<AttemptRecord>,
}

/// Recovers a non-trivial factor of a composite modulus from repeated
/// single-shot phase samples. Purely classical apart from the injected
/// oracle; a deterministic oracle makes the whole run deterministic.
pub struct FactorEstimator<O> {
    oracle: O,
}

impl<O: PhaseOracle> FactorEstimator<O> {
    pub fn new(oracle: O) -> Self {
        FactorEstimator { oracle }
    }

    /// One bounded retry loop. Every attempt draws a fresh sample, turns
    /// it into a period guess via bounded-denominator approximation, and
    /// checks the gcd pair; the first non-trivial pair wins.
    pub fn estimate_factor(&mut self, config: &EstimateConfig) -> Result<Estimate, FactorError> {
        config.validate()?;

        let job = PhaseJob {
            modulus: config.modulus,
            base: config.base,
            precision_bits: config.precision_bits,
        };

        let mut trace = Vec::new();
        for attempt in 1..=config.max_attempts {
            let outcome = self.attempt(&job);
            let factors = match &outcome {
                AttemptOutcome::Factored { factors, .. } => Some(*factors),
                _ => None,
            };
            trace.push(AttemptRecord { attempt, outcome });
            if let Some(factors) = factors {
                return Ok(Estimate {
                    factors,
                    attempts_used: attempt,
                    trace,
                });
            }
        }

        Err(FactorError::NoNontrivialFactor {
            attempts: config.max_attempts,
        })
    }

    fn attempt(&mut self, job: &PhaseJob) -> AttemptOutcome {
        let sample = match self.oracle.sample_phase(job) {
            Ok(sample) => sample,
            Err(err) => {
                return AttemptOutcome::OracleFailed {
                    reason: err.to_string(),
                };
            }
        };

        let (numerator, resolution) = sample.as_ratio();
        let guess = best_approximation(numerator, resolution, job.modulus);
        let period = guess.denominator;
        let bits = sample.bits();

        if period % 2 != 0 {
            return AttemptOutcome::OddPeriod { bits, period };
        }

        // base coprime to the modulus keeps the root in the unit group,
        // so root >= 1 and the subtraction below cannot wrap.
        let root = modpow(job.base, period / 2, job.modulus);
        let low = gcd(root - 1, job.modulus);
        let high = gcd(root + 1, job.modulus);

        let nontrivial = |f: u64| f != 1 && f != job.modulus;
        if nontrivial(low) || nontrivial(high) {
            AttemptOutcome::Factored {
                bits,
                period,
                factors: (low, high),
            }
        } else {
            AttemptOutcome::TrivialFactors { bits, period }
        }
    }
}
