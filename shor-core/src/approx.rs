use crate::arith::gcd;
use serde::Serialize;
use std::fmt;

/// A reduced fraction p/q with q >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// |p/q - n/d| cross-multiplied to an integer: |p*d - n*q|.
fn cross_error(candidate: Ratio, numerator: u64, denominator: u64) -> u128 {
    let lhs = u128::from(candidate.numerator) * u128::from(denominator);
    let rhs = u128::from(numerator) * u128::from(candidate.denominator);
    lhs.abs_diff(rhs)
}

/// Best rational approximation to `numerator/denominator` with denominator
/// at most `max_denominator`, ties broken toward the smaller denominator.
///
/// Walks the continued-fraction convergents of the value and, once the
/// denominator bound is crossed, weighs the last convergent against the
/// furthest semiconvergent still inside the bound. All arithmetic is
/// exact, so the sampled phase is never rounded through a float here.
pub fn best_approximation(numerator: u64, denominator: u64, max_denominator: u64) -> Ratio {
    assert!(denominator > 0, "denominator must be positive");
    assert!(max_denominator >= 1, "denominator bound must be at least 1");

    let g = gcd(numerator, denominator);
    let (n0, d0) = (numerator / g, denominator / g);
    if d0 <= max_denominator {
        return Ratio {
            numerator: n0,
            denominator: d0,
        };
    }

    // Convergent recurrence: (p0/q0, p1/q1) are the previous and current
    // convergents of the continued fraction of n0/d0.
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let (mut n, mut d) = (n0, d0);
    loop {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > max_denominator {
            break;
        }
        let p2 = p0 + a * p1;
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        let r = n - a * d;
        n = d;
        d = r;
    }

    // d0 > max_denominator guarantees the loop rotated at least once and
    // broke before the expansion terminated, so q1 >= 1 here.
    let k = (max_denominator - q0) / q1;
    let convergent = Ratio {
        numerator: p1,
        denominator: q1,
    };
    let semiconvergent = Ratio {
        numerator: p0 + k * p1,
        denominator: q0 + k * q1,
    };

    let err_convergent = cross_error(convergent, n0, d0) * u128::from(semiconvergent.denominator);
    let err_semiconvergent = cross_error(semiconvergent, n0, d0) * u128::from(convergent.denominator);
    if err_semiconvergent < err_convergent {
        semiconvergent
    } else if err_convergent < err_semiconvergent {
        convergent
    } else if convergent.denominator <= semiconvergent.denominator {
        convergent
    } else {
        semiconvergent
    }
}
