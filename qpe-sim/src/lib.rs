pub mod circuit;
pub mod error;
pub mod ipe;
pub mod oracle;
pub mod simulator;
pub mod state;

// Re-export key components for easier access from the runner or other libraries.
pub use circuit::{Circuit, PhaseOp, work_register_width};
pub use error::SimError;
pub use ipe::{IpeReport, IpeRound, iterative_phase_estimate};
pub use oracle::{OracleConfig, SampledOracle};
pub use simulator::{PhaseSimulator, RunOutcome};
pub use state::StateVector;
