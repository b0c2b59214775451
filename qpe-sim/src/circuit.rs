use crate::error::SimError;
use shor_core::arith::gcd;

/// Number of work qubits needed to hold values 0..modulus.
pub fn work_register_width(modulus: u64) -> u32 {
    64 - modulus.saturating_sub(1).leading_zeros()
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOp {
    H(usize),
    X(usize),
    /// Controlled y -> multiplier * y mod modulus on the work register.
    ControlledModMul { control: usize, multiplier: u64 },
    InverseQft { start: usize, bits: usize },
    MeasureAll,
}

/// A phase-estimation readout circuit: `counting_bits` counting qubits at
/// the low indices, `work_bits` work qubits above them.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub num_qubits: usize,
    pub counting_bits: usize,
    pub work_bits: usize,
    pub modulus: u64,
    pub ops: Vec<PhaseOp>,
}

impl Circuit {
    /// The standard order-finding readout for `base^x mod modulus`:
    /// Hadamards over the counting register, work register prepared to
    /// |1>, one controlled modular multiplication per counting bit with
    /// repeatedly squared multipliers, then the inverse-Fourier readout
    /// and a full measurement. The measured counting value v estimates a
    /// phase v / 2^precision_bits.
    pub fn order_finding(modulus: u64, base: u64, precision_bits: u32) -> Result<Self, SimError> {
        if modulus < 2 {
            return Err(SimError::Internal(format!(
                "modulus {} leaves nothing to factor",
                modulus
            )));
        }
        let base = base % modulus;
        if gcd(base, modulus) != 1 {
            return Err(SimError::NotCoprime { base, modulus });
        }

        let counting_bits = precision_bits as usize;
        let work_bits = work_register_width(modulus) as usize;
        let mut ops = Vec::with_capacity(counting_bits * 2 + 3);

        for qubit in 0..counting_bits {
            ops.push(PhaseOp::H(qubit));
        }
        ops.push(PhaseOp::X(counting_bits)); // work register starts at |1>

        // counting qubit q controls base^(2^q): square the multiplier as we go
        let mut multiplier = base;
        for qubit in 0..counting_bits {
            ops.push(PhaseOp::ControlledModMul {
                control: qubit,
                multiplier,
            });
            multiplier =
                (u128::from(multiplier) * u128::from(multiplier) % u128::from(modulus)) as u64;
        }

        ops.push(PhaseOp::InverseQft {
            start: 0,
            bits: counting_bits,
        });
        ops.push(PhaseOp::MeasureAll);

        Ok(Circuit {
            num_qubits: counting_bits + work_bits,
            counting_bits,
            work_bits,
            modulus,
            ops,
        })
    }
}
