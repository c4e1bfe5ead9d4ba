// src/noyau/developpement.rs
//
// Développement binaire glouton (exact, sans flottants).
//
// Pour 0 < x < 1, on produit m_1, m_2, … (m_k ≥ 1) tels que
//   x = Σ 2^-(m_1+…+m_k)
// avec, à chaque tour : m = ⌈log2(1/reste)⌉ puis reste ← 2^m·reste − 1.
//
// Machine à états : {itère, arrêt exact (reste = 0), arrêt sur borne (n termes)}.
// ⌊log2⌋ se calcule par longueurs de bits + une seule comparaison décalée :
// aucun arrondi possible, quelle que soit la taille de p et q.

use log::{debug, info};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreur::ErreurEntree;

/// Raison de l’arrêt de la boucle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arret {
    /// Le reste est tombé exactement à 0 : développement fini.
    Exact,
    /// n termes produits, reste encore non nul.
    Borne,
}

/// Suite d’exposants produite par un appel (immuable une fois rendue).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Developpement {
    exposants: Vec<u64>,
    borne: usize,
    arret: Arret,
}

impl Developpement {
    /// Les m_k, dans l’ordre.
    pub fn exposants(&self) -> &[u64] {
        &self.exposants
    }

    /// Le n demandé.
    pub fn borne(&self) -> usize {
        self.borne
    }

    pub fn arret(&self) -> Arret {
        self.arret
    }

    /// Positions des bits à 1 après la virgule : m_1, m_1+m_2, …
    pub fn positions(&self) -> Vec<u64> {
        self.exposants
            .iter()
            .scan(0u64, |cumul, &m| {
                *cumul += m;
                Some(*cumul)
            })
            .collect()
    }

    /// Vrai si le développement exact s’est terminé avant d’atteindre n termes.
    pub fn tronque_avant_borne(&self) -> bool {
        self.exposants.len() < self.borne
    }
}

/// Une itération de la boucle (pour la démarche).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Etape {
    pub inverse: BigRational,
    pub log2_plancher: u64,
    pub exposant: u64,
    pub reste: BigRational,
}

/// ⌊log2(p/q)⌋ pour p ≥ q > 0.
///
/// bits(p) − bits(q) approche log2(p/q) à 1 près ; la comparaison
/// p < q·2^candidat tranche exactement.
pub fn log2_plancher(p: &BigInt, q: &BigInt) -> u64 {
    let candidat = p.bits().saturating_sub(q.bits());
    if candidat > 0 && p < &(q << candidat) {
        candidat - 1
    } else {
        candidat
    }
}

/// ⌈log2(p/q)⌉ connaissant ⌊log2(p/q)⌋ : égal si p/q est une puissance de 2.
fn log2_plafond(p: &BigInt, q: &BigInt, plancher: u64) -> u64 {
    if *p == (q << plancher) {
        plancher
    } else {
        plancher + 1
    }
}

fn verifier_domaine(x: &BigRational, n: usize) -> Result<(), ErreurEntree> {
    if n < 1 {
        return Err(ErreurEntree::borne("n doit être au moins 1"));
    }
    if !x.is_positive() || *x >= BigRational::one() {
        return Err(ErreurEntree::rationnel(format!(
            "x = {x} doit être strictement entre 0 et 1"
        )));
    }
    Ok(())
}

/// Jusqu’à n exposants gloutons de x ∈ ]0,1[.
///
/// La suite rendue est plus courte que n si le reste tombe à 0 :
/// ce n’est pas une erreur (voir [`Developpement::tronque_avant_borne`]).
pub fn developper(x: &BigRational, n: usize) -> Result<Developpement, ErreurEntree> {
    developper_interne(x, n, None)
}

/// Comme [`developper`], en gardant chaque étape (inverse, ⌊log2⌋, m, reste).
pub fn developper_avec_demarche(
    x: &BigRational,
    n: usize,
) -> Result<(Developpement, Vec<Etape>), ErreurEntree> {
    let mut etapes = Vec::new();
    let d = developper_interne(x, n, Some(&mut etapes))?;
    Ok((d, etapes))
}

fn developper_interne(
    x: &BigRational,
    n: usize,
    mut trace: Option<&mut Vec<Etape>>,
) -> Result<Developpement, ErreurEntree> {
    verifier_domaine(x, n)?;

    let un = BigRational::one();
    let mut reste = x.clone();
    let mut exposants: Vec<u64> = Vec::with_capacity(n.min(4096));
    let mut arret = Arret::Borne;

    for k in 1..=n {
        // 0 < reste < 1  =>  inverse = p/q avec p > q > 0
        let inverse = reste.recip();
        let plancher = log2_plancher(inverse.numer(), inverse.denom());
        let m = log2_plafond(inverse.numer(), inverse.denom(), plancher);

        // invariant : 0 ≤ 2^m·reste − 1 < 1
        reste = &reste * BigRational::from_integer(BigInt::one() << m) - &un;
        debug!("étape {k} : 1/reste = {inverse}, m = {m}, reste = {reste}");

        if let Some(etapes) = trace.as_deref_mut() {
            etapes.push(Etape {
                inverse,
                log2_plancher: plancher,
                exposant: m,
                reste: reste.clone(),
            });
        }

        exposants.push(m);

        if reste.is_zero() {
            arret = Arret::Exact;
            break;
        }
    }

    info!(
        "développement de {x} : {} terme(s) sur {n}, arrêt {:?}",
        exposants.len(),
        arret
    );

    Ok(Developpement {
        exposants,
        borne: n,
        arret,
    })
}
