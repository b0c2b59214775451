pub mod approx;
pub mod arith;
pub mod error;
pub mod estimator;
pub mod oracle;

// Re-export key components for easier access from the runner or other libraries.
pub use approx::{Ratio, best_approximation};
pub use error::FactorError;
pub use estimator::{AttemptOutcome, AttemptRecord, Estimate, EstimateConfig, FactorEstimator};
pub use oracle::{OracleError, PhaseJob, PhaseOracle, PhaseSample};
