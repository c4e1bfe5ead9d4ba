// src/noyau/somme.rs
//
// Somme partielle exacte : Σ_{k} 2^-(m_1+…+m_k).
//
// Dénominateur commun = 2^(m_1+…+m_len). On accumule le numérateur à la Horner :
//   num ← num·2^m_k + 1
// ce qui garde la valeur num / 2^cumul à chaque pas, sans flottants.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Reconstruit le rationnel exact d’une suite d’exposants (suite vide => 0).
pub fn somme_partielle(exposants: &[u64]) -> BigRational {
    let mut num = BigInt::zero();
    let mut cumul: u64 = 0;

    for &m in exposants {
        num = (num << m) + 1u32;
        cumul += m;
    }

    BigRational::new(num, BigInt::one() << cumul)
}
