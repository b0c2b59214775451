/// A lightweight error enum so callers don't rely on simulator internals.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("base {base} is not coprime to modulus {modulus}")]
    NotCoprime { base: u64, modulus: u64 },
    #[error("invalid qubit index: {0}")]
    Qubit(usize),
    #[error("internal error: {0}")]
    Internal(String),
}
