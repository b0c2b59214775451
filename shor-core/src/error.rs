use thiserror::Error;

/// Failures of one factoring run. Configuration variants surface before
/// any oracle call; `NoNontrivialFactor` is the only way a run that
/// started sampling can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactorError {
    #[error("modulus must be at least 2, got {0}")]
    InvalidModulus(u64),
    #[error("base {base} lies outside 2..{modulus}")]
    BaseOutOfRange { base: u64, modulus: u64 },
    #[error("base {base} shares the divisor {common_divisor} with {modulus}")]
    InvalidBase {
        base: u64,
        modulus: u64,
        common_divisor: u64,
    },
    #[error("precision must be between 1 and 63 bits, got {0}")]
    InvalidPrecision(u32),
    #[error("attempt budget must be at least 1")]
    InvalidAttemptBudget,
    #[error("no non-trivial factor after {attempts} attempts")]
    NoNontrivialFactor { attempts: u32 },
}
