use num::BigUint;

/// Greatest common divisor by Euclid's algorithm.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// `base^exponent mod modulus` over arbitrary-precision integers.
///
/// The intermediate powers never touch machine words, so the result is
/// exact for any exponent the estimator can produce.
pub fn modpow(base: u64, exponent: u64, modulus: u64) -> u64 {
    let reduced = BigUint::from(base).modpow(&BigUint::from(exponent), &BigUint::from(modulus));
    // reduced < modulus, so it fits back into a u64
    u64::try_from(reduced).expect("value reduced modulo a u64 fits in a u64")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_of_small_pairs() {
        assert_eq!(gcd(48, 15), 3);
        assert_eq!(gcd(50, 15), 5);
        assert_eq!(gcd(7, 15), 1);
        assert_eq!(gcd(0, 15), 15);
    }

    #[test]
    fn modpow_matches_known_orders() {
        // 7 has order 4 mod 15
        assert_eq!(modpow(7, 4, 15), 1);
        assert_eq!(modpow(7, 2, 15), 4);
        // large exponent still exact
        assert_eq!(modpow(2, 10, 1000), 24);
        assert_eq!(modpow(3, 0, 7), 1);
    }
}
