//! Meilleure approximation rationnelle à dénominateur borné.
//!
//! Réduites de la fraction continue de |r| jusqu’à dépasser q_max, puis
//! comparaison avec la dernière semi-réduite admissible : on garde la plus proche.
//! Étape EXPLICITE d’approximation (entrées avec π ou e), hors de la garantie
//! d’exactitude du développement.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Rationnel le plus proche de `r` parmi ceux de dénominateur ≤ `q_max` (q_max ≥ 1).
/// Identité si le dénominateur de `r` tient déjà dans la borne. Le signe est conservé.
pub fn meilleure_approximation(r: &BigRational, q_max: &BigInt) -> BigRational {
    if r.denom() <= q_max {
        return r.clone();
    }
    if r.is_negative() {
        return -meilleure_approximation(&-r, q_max);
    }

    // Réduites p_{k-1}/q_{k-1} (p0/q0) et p_k/q_k (p1/q1)
    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let (mut n, mut d) = (r.numer().clone(), r.denom().clone());

    loop {
        let a = &n / &d;
        let q2 = &q0 + &a * &q1;
        if &q2 > q_max {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);

        let reste = &n - &a * &d;
        n = std::mem::replace(&mut d, reste);
    }

    // Semi-réduite la plus grande encore admissible
    let k = (q_max - &q0) / &q1;
    let semi = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let reduite = BigRational::new(p1, q1);

    // Même règle que limit_denominator : à égalité, on garde la réduite.
    if (&semi - r).abs() < (&reduite - r).abs() {
        semi
    } else {
        reduite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(a: i64, b: i64) -> BigRational {
        BigRational::new(BigInt::from(a), BigInt::from(b))
    }

    fn q(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn identite_si_deja_petit() {
        assert_eq!(meilleure_approximation(&r(5, 8), &q(1_000_000)), r(5, 8));
    }

    #[test]
    fn pi_classiques() {
        // π ≈ 3.14159265358979323846
        let pi = BigRational::new(
            "314159265358979323846".parse::<BigInt>().unwrap(),
            "100000000000000000000".parse::<BigInt>().unwrap(),
        );
        assert_eq!(meilleure_approximation(&pi, &q(10)), r(22, 7));
        assert_eq!(meilleure_approximation(&pi, &q(100)), r(311, 99));
        assert_eq!(meilleure_approximation(&pi, &q(1000)), r(355, 113));
        assert_eq!(meilleure_approximation(&pi, &q(1)), r(3, 1));
    }

    #[test]
    fn decimal_vers_fraction_simple() {
        // 0.3333333333 -> 1/3
        assert_eq!(
            meilleure_approximation(&r(3_333_333_333, 10_000_000_000), &q(1000)),
            r(1, 3)
        );
    }

    #[test]
    fn semi_reduite_retenue() {
        // limit_denominator(0.4142135623, 10) = 2/5
        let x = r(4_142_135_623, 10_000_000_000);
        assert_eq!(meilleure_approximation(&x, &q(10)), r(2, 5));
    }

    #[test]
    fn signe_conserve() {
        let x = r(-3_333_333_333, 10_000_000_000);
        assert_eq!(meilleure_approximation(&x, &q(1000)), r(-1, 3));
    }

    #[test]
    fn borne_respectee() {
        let x = r(123_456_789, 987_654_321);
        for borne in [1, 2, 7, 50, 999, 123_456] {
            let a = meilleure_approximation(&x, &q(borne));
            assert!(a.denom() <= &q(borne), "borne={borne} a={a}");
        }
    }
}
