use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Parameters of one phase-estimation readout: a controlled
/// `base^x mod modulus` stage followed by an inverse-Fourier readout of
/// `precision_bits` counting bits. The oracle owns the circuit details;
/// the estimator only ever sees the sampled bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseJob {
    pub modulus: u64,
    pub base: u64,
    pub precision_bits: u32,
}

/// One m-bit sample drawn from a phase-estimation readout, read as an
/// unsigned integer over 2^m.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseSample {
    value: u64,
    width: u32,
}

impl PhaseSample {
    pub fn new(value: u64, width: u32) -> Self {
        let mask = if width >= 64 { u64::MAX } else { (1 << width) - 1 };
        Self {
            value: value & mask,
            width,
        }
    }

    /// Parse an MSB-first binary string such as "0100".
    pub fn from_bits(bits: &str) -> Option<Self> {
        let value = u64::from_str_radix(bits, 2).ok()?;
        Some(Self::new(value, bits.len() as u32))
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The sample as the exact fraction value / 2^width.
    pub fn as_ratio(&self) -> (u64, u64) {
        (self.value, 1 << self.width)
    }

    /// MSB-first rendering of the sample, zero-padded to its width.
    pub fn bits(&self) -> String {
        format!("{:0width$b}", self.value, width = self.width as usize)
    }
}

/// A lightweight error enum so the estimator doesn't rely on backend
/// internals. Every variant is retryable from the estimator's point of
/// view and is counted against the attempt budget.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle backend failed: {0}")]
    Backend(String),
    #[error("sampling exceeded the configured deadline after {elapsed:?}")]
    Timeout { elapsed: Duration },
    #[error("readout needs {qubits} qubits but the backend allows {limit}")]
    RegisterTooLarge { qubits: u32, limit: u32 },
}

/// The single capability the estimator needs from the quantum side.
pub trait PhaseOracle {
    /// Draw exactly one `precision_bits`-wide sample from the readout
    /// described by `job`.
    fn sample_phase(&mut self, job: &PhaseJob) -> Result<PhaseSample, OracleError>;
}
