// src/noyau/bits.rs
//
// Chaîne binaire « 0.b1b2b3… » à partir des exposants.
//
// Chaque m_k place un bit à 1 en position m_1+…+m_k après la virgule :
// on écrit donc les (m_k − 1) zéros de l’écart, PUIS le 1.
// Lu en base 2, le résultat vaut exactement somme_partielle(exposants).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Rend les chiffres binaires après la virgule (sans le « 0. »).
///
/// L’ordre suit la position des bits : pour chaque m_k, d’abord les (m_k − 1)
/// zéros de l’écart, puis le 1 en position m_1+…+m_k (« 101 » pour [1, 2]).
pub fn chaine_binaire(exposants: &[u64]) -> String {
    let longueur: u64 = exposants.iter().sum();
    let mut out = String::with_capacity(usize::try_from(longueur).unwrap_or(0));

    for &m in exposants {
        for _ in 1..m {
            out.push('0');
        }
        out.push('1');
    }
    out
}

/// Lit « b1b2…bL » comme 0.b1b2…bL en base 2 (valeur exacte).
pub fn valeur_binaire(bits: &str) -> Result<BigRational, String> {
    if bits.is_empty() {
        return Ok(BigRational::zero());
    }
    if let Some(c) = bits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(format!("chiffre binaire inattendu: '{c}'"));
    }

    let num = BigInt::parse_bytes(bits.as_bytes(), 2).ok_or("chaîne binaire invalide")?;
    Ok(BigRational::new(num, BigInt::one() << bits.len()))
}
