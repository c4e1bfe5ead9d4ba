// src/noyau/lecture.rs
//
// Évaluation scalée (×10^digits, troncature) des expressions avec π ou e.
// Sert uniquement à APPROCHER x avant la recherche du meilleur rationnel :
// le développement, lui, ne voit que des rationnels exacts.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use super::expr::{verifier_taille_puissance, Expr};

/// Digits de garde pour amortir les troncatures en cascade.
const DIGITS_GARDE: usize = 10;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = r * 10^digits (troncature vers 0)
pub fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/* ------------------------ π (Machin) et e (série) + cache ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Constante {
    Pi,
    E,
}

/// arctan(1/q) en entier scalé (troncature) via série:
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut sign_pos = true;

    // q^(2k+1)
    let mut q_pow = q.clone();
    let mut sum = BigInt::zero();

    loop {
        let denom = BigInt::from((2 * k + 1) as i64);
        let d = &q_pow * &denom;

        let term = scale / &d;
        if term.is_zero() {
            break;
        }

        if sign_pos {
            sum += &term;
        } else {
            sum -= &term;
        }

        // q_pow *= q^2
        q_pow *= &q;
        q_pow *= &q;

        sign_pos = !sign_pos;
        k += 1;
    }

    sum
}

fn pi_scaled_compute(digits: usize) -> BigInt {
    let scale = pow10(digits + DIGITS_GARDE);

    // Machin : π = 16*atan(1/5) - 4*atan(1/239)
    let a = arctan_inv_q_scaled(5, &scale);
    let b = arctan_inv_q_scaled(239, &scale);

    let pi = BigInt::from(16) * a - BigInt::from(4) * b;
    pi / pow10(DIGITS_GARDE)
}

/// e = Σ 1/k! : terme_k = terme_{k-1} / k, jusqu’à ce qu’il s’annule.
fn e_scaled_compute(digits: usize) -> BigInt {
    let mut terme = pow10(digits + DIGITS_GARDE);
    let mut sum = BigInt::zero();
    let mut k: u32 = 1;

    while !terme.is_zero() {
        sum += &terme;
        terme /= k;
        k += 1;
    }

    sum / pow10(DIGITS_GARDE)
}

static CONSTANTES_CACHE: OnceLock<Mutex<HashMap<(Constante, usize), BigInt>>> = OnceLock::new();

fn constante_scaled_cached(c: Constante, digits: usize) -> BigInt {
    let m = CONSTANTES_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // un cache empoisonné reste cohérent : on reprend la garde
    let mut guard = m.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(v) = guard.get(&(c, digits)) {
        return v.clone();
    }

    let v = match c {
        Constante::Pi => pi_scaled_compute(digits),
        Constante::E => e_scaled_compute(digits),
    };
    guard.insert((c, digits), v.clone());
    v
}

/* ------------------------ Évaluation scalée ------------------------ */

/// Évalue une expression en entier “scalé” (×10^digits).
pub fn eval_scaled(expr: &Expr, digits: usize) -> Result<BigInt, String> {
    use Expr::*;

    let scale = pow10(digits);

    match expr {
        Rat(r) => Ok(rational_scaled(r, digits)),
        Pi => Ok(constante_scaled_cached(Constante::Pi, digits)),
        E => Ok(constante_scaled_cached(Constante::E, digits)),

        Neg(x) => Ok(-eval_scaled(x, digits)?),
        Add(a, b) => Ok(eval_scaled(a, digits)? + eval_scaled(b, digits)?),
        Sub(a, b) => Ok(eval_scaled(a, digits)? - eval_scaled(b, digits)?),

        Mul(a, b) => {
            let sa = eval_scaled(a, digits)?;
            let sb = eval_scaled(b, digits)?;
            Ok((sa * sb) / &scale)
        }

        Div(a, b) => {
            let sa = eval_scaled(a, digits)?;
            let sb = eval_scaled(b, digits)?;
            if sb.is_zero() {
                return Err("division par zéro".into());
            }
            Ok((sa * &scale) / sb)
        }

        PowInt(base, n) => {
            // base rationnelle : calcul exact puis une seule troncature
            if !base.contient_constante() {
                return Ok(rational_scaled(&expr.eval_exacte()?, digits));
            }

            let sb = eval_scaled(base, digits)?;
            // taille de la partie entière de la base (le scale n’y compte pas)
            let bits_base = (sb.bits() + 1).saturating_sub(scale.bits());
            verifier_taille_puissance(bits_base, n.unsigned_abs())?;
            let pos = scaled_pow(&sb, n.unsigned_abs(), &scale);
            if *n >= 0 {
                Ok(pos)
            } else if pos.is_zero() {
                Err("division par zéro".into())
            } else {
                Ok((&scale * &scale) / pos)
            }
        }
    }
}

/// (b/scale)^n en scalé, par carrés successifs (re-scale à chaque produit).
fn scaled_pow(b: &BigInt, mut n: u64, scale: &BigInt) -> BigInt {
    let mut acc = scale.clone();
    let mut base = b.clone();

    while n > 0 {
        if (n & 1) == 1 {
            acc = (&acc * &base) / scale;
        }
        n >>= 1;
        if n > 0 {
            base = (&base * &base) / scale;
        }
    }
    acc
}

/// Valeur approchée (rationnelle, dénominateur 10^digits) d’une expression,
/// évaluée avec des digits de garde.
pub fn valeur_approchee(expr: &Expr, digits: usize) -> Result<BigRational, String> {
    let total = digits + DIGITS_GARDE;
    let scaled = eval_scaled(expr, total)?;
    let tronque = scaled / pow10(DIGITS_GARDE);
    Ok(BigRational::new(tronque, pow10(digits)))
}

/// Helper pour les notes : x tronqué à `digits` décimales.
pub fn decimal_tronque(r: &BigRational, digits: usize) -> String {
    scaled_to_decimal(rational_scaled(r, digits), digits)
}
