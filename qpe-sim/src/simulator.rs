use crate::circuit::{Circuit, PhaseOp};
use crate::error::SimError;
use crate::state::StateVector;
use num_complex::Complex;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

/// The measured end of one readout run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Full measured basis index across counting and work registers.
    pub basis_index: usize,
    /// The counting-register slice of the measurement.
    pub counting_value: u64,
}

pub struct PhaseSimulator {
    pub num_qubits: usize,
    pub state: StateVector,
}

impl PhaseSimulator {
    pub fn new(num_qubits: usize) -> Self {
        PhaseSimulator {
            num_qubits,
            state: StateVector::new(num_qubits),
        }
    }

    /// Runs the circuit from |0...0> and returns the measured outcome.
    pub fn run(&mut self, circuit: &Circuit, rng: &mut impl Rng) -> Result<RunOutcome, SimError> {
        if self.num_qubits != circuit.num_qubits {
            self.num_qubits = circuit.num_qubits;
            self.state = StateVector::new(circuit.num_qubits);
        } else {
            self.state.reset();
        }

        let mut measured = None;
        for op in &circuit.ops {
            match op {
                PhaseOp::H(qubit) => {
                    self.check_qubit(*qubit)?;
                    self.state.apply_single_qubit_gate(&HADAMARD, *qubit);
                }
                PhaseOp::X(qubit) => {
                    self.check_qubit(*qubit)?;
                    self.state.apply_x(*qubit);
                }
                PhaseOp::ControlledModMul {
                    control,
                    multiplier,
                } => {
                    self.check_qubit(*control)?;
                    self.state.apply_controlled_modmul(
                        *control,
                        *multiplier,
                        circuit.modulus,
                        circuit.counting_bits,
                        circuit.work_bits,
                    );
                }
                PhaseOp::InverseQft { start, bits } => {
                    self.check_qubit(start + bits - 1)?;
                    self.state.apply_inverse_qft(*start, *bits);
                }
                PhaseOp::MeasureAll => {
                    measured = Some(self.state.measure_all(rng));
                }
            }
        }

        let basis_index = measured
            .ok_or_else(|| SimError::Internal("circuit never measured".to_string()))?;
        let counting_value = (basis_index & ((1 << circuit.counting_bits) - 1)) as u64;
        Ok(RunOutcome {
            basis_index,
            counting_value,
        })
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), SimError> {
        if qubit >= self.num_qubits {
            Err(SimError::Qubit(qubit))
        } else {
            Ok(())
        }
    }
}
