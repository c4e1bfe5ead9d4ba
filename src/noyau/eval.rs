//! Noyau — lecture des entrées (pipeline réel)
//!
//! x : tokenize -> RPN -> Expr -> valeur exacte (ou approchée si π/e)
//!     -> réduction modulo 1 si x ≥ 1 -> contrôle 0 < x < 1
//! n : entier ≥ 1
//!
//! Toute erreur sort ici, AVANT le développement.

use log::{debug, info, warn};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};

use super::approx::meilleure_approximation;
use super::erreur::ErreurEntree;
use super::jetons::{format_tokens, tokenize};
use super::lecture::{decimal_tronque, valeur_approchee};
use super::rpn::{from_rpn, to_rpn};

/// Trace de l’approximation d’une entrée symbolique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approximation {
    /// Valeur décimale tronquée de l’expression (avant recherche du rationnel).
    pub decimal: String,
    /// Borne utilisée pour le dénominateur.
    pub denominateur_max: u64,
}

/// Résultat validé de la lecture de x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LectureX {
    /// x ∈ ]0,1[, exact.
    pub x: BigRational,
    /// Valeur avant réduction modulo 1.
    pub avant_reduction: BigRational,
    /// Some(..) si l’entrée contenait π ou e.
    pub approximation: Option<Approximation>,
}

impl LectureX {
    pub fn reduit_modulo_1(&self) -> bool {
        self.x != self.avant_reduction
    }
}

/// API publique : lit x (fraction, décimal, ou expression avec pi/e).
///
/// - `digits` : précision décimale pour évaluer π et e
/// - `denominateur_max` : borne du dénominateur de l’approximation
pub fn lire_x(brut: &str, digits: usize, denominateur_max: u64) -> Result<LectureX, ErreurEntree> {
    let s = brut.trim();
    if s.is_empty() {
        return Err(ErreurEntree::rationnel("x : entrée vide"));
    }

    let illisible = |e: String| ErreurEntree::rationnel(format!("impossible de lire x = {s:?} : {e}"));

    // 1) Jetons
    let jetons = tokenize(s).map_err(illisible)?;
    debug!("jetons : {}", format_tokens(&jetons));

    // 2) RPN
    let rpn = to_rpn(&jetons).map_err(illisible)?;
    debug!("rpn : {}", format_tokens(&rpn));

    // 3) AST
    let expr = from_rpn(&rpn).map_err(illisible)?;
    debug!("expr : {expr}");

    // 4) Valeur : exacte, ou approchée (explicitement) si π/e
    let (valeur, approximation) = if expr.contient_constante() {
        let approchee = valeur_approchee(&expr, digits).map_err(illisible)?;
        let q_max = BigInt::from(denominateur_max.max(1));
        let v = meilleure_approximation(&approchee, &q_max);
        warn!("x = {s:?} approché par {v} (dénominateur ≤ {q_max}, {digits} digits)");
        let a = Approximation {
            decimal: decimal_tronque(&approchee, digits.min(DIGITS_NOTE)),
            denominateur_max: denominateur_max.max(1),
        };
        (v, Some(a))
    } else {
        let v = expr.eval_exacte().map_err(illisible)?;
        info!("x = {s:?} lu exactement : {v}");
        (v, None)
    };

    // 5) Réduction modulo 1 (seulement si x ≥ 1) puis contrôle
    let x = if valeur >= BigRational::one() {
        valeur.fract()
    } else {
        valeur.clone()
    };

    if !x.is_positive() || x >= BigRational::one() {
        return Err(ErreurEntree::rationnel(format!(
            "x doit être strictement entre 0 et 1 après réduction à la partie fractionnaire (lu : {valeur})"
        )));
    }

    Ok(LectureX {
        x,
        avant_reduction: valeur,
        approximation,
    })
}

/// Nombre de décimales montrées dans la note d’approximation.
const DIGITS_NOTE: usize = 20;

/// API publique : lit n (entier ≥ 1).
pub fn lire_n(brut: &str) -> Result<usize, ErreurEntree> {
    let s = brut.trim();
    let v: i64 = s
        .parse()
        .map_err(|_| ErreurEntree::borne(format!("n doit être un entier (reçu {s:?})")))?;
    if v < 1 {
        return Err(ErreurEntree::borne(format!("n doit être au moins 1 (reçu {v})")));
    }
    usize::try_from(v).map_err(|_| ErreurEntree::borne(format!("n trop grand (reçu {v})")))
}
