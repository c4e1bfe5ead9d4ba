// src/noyau/expr.rs
//
// AST d’entrée (x), sans flottants.
// - Rat : rationnel exact
// - Pi, E : constantes de la liste blanche (irrationnelles)
//
// IMPORTANT :
// - eval_exacte() refuse π et e : une valeur exacte n’existe pas.
//   Les constantes passent par lecture.rs (évaluation scalée) puis approx.rs.

use num_rational::BigRational;
use num_traits::{One, Zero};

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,

    Neg(Box<Expr>),
    PowInt(Box<Expr>, i64), // x^n (n entier)

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Vrai si l’expression mentionne π ou e.
    pub fn contient_constante(&self) -> bool {
        use Expr::*;
        match self {
            Rat(_) => false,
            Pi | E => true,
            Neg(x) | PowInt(x, _) => x.contient_constante(),
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                a.contient_constante() || b.contient_constante()
            }
        }
    }

    /// Valeur rationnelle exacte (sans constante).
    pub fn eval_exacte(&self) -> Result<BigRational, String> {
        use Expr::*;

        match self {
            Rat(r) => Ok(r.clone()),
            Pi | E => Err("constante irrationnelle : pas de valeur exacte".into()),

            Neg(x) => Ok(-x.eval_exacte()?),
            Add(a, b) => Ok(a.eval_exacte()? + b.eval_exacte()?),
            Sub(a, b) => Ok(a.eval_exacte()? - b.eval_exacte()?),
            Mul(a, b) => Ok(a.eval_exacte()? * b.eval_exacte()?),

            Div(a, b) => {
                let d = b.eval_exacte()?;
                if d.is_zero() {
                    return Err("division par zéro".into());
                }
                Ok(a.eval_exacte()? / d)
            }

            PowInt(base, n) => {
                let b = base.eval_exacte()?;
                if b.is_zero() && *n < 0 {
                    return Err("division par zéro".into());
                }
                let bits = b.numer().bits().max(b.denom().bits());
                verifier_taille_puissance(bits, n.unsigned_abs())?;
                Ok(rational_pow_int(b, *n))
            }
        }
    }
}

/// Garde-fou : taille maximale (en bits) du résultat d’une puissance.
/// Les exposants sont bornés un à un ; les puissances imbriquées, elles,
/// le sont par la taille de ce qu’elles produiraient.
pub const TAILLE_PUISSANCE_MAX_BITS: u64 = 1 << 20;

/// Refuse base^k si le résultat dépasserait TAILLE_PUISSANCE_MAX_BITS
/// (`bits_base` : taille de la base en bits, `k` : |exposant|).
pub fn verifier_taille_puissance(bits_base: u64, k: u64) -> Result<(), String> {
    if bits_base.saturating_mul(k) > TAILLE_PUISSANCE_MAX_BITS {
        return Err("puissance trop grande".into());
    }
    Ok(())
}

/// Puissance entière par carrés successifs (exposant négatif : inverse).
/// La base doit être non nulle si `exp < 0`.
pub fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    let mut e = exp.unsigned_abs();
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc = &acc * &b;
        }
        e >>= 1;
        if e > 0 {
            b = &b * &b;
        }
    }

    if exp < 0 {
        acc.recip()
    } else {
        acc
    }
}

/// Affichage compact, complètement parenthésé (logs).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => write!(f, "{r}"),
            Pi => write!(f, "π"),
            E => write!(f, "e"),
            Neg(x) => write!(f, "-({x})"),
            PowInt(x, n) => write!(f, "({x})^{n}"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
        }
    }
}
