//! src/app/etat.rs
//!
//! État de l’application (sans affichage, sans calcul).
//!
//! Rôle : porter la configuration (fichier TOML + options) et les résultats
//! d’une exécution, pour que vue.rs n’ait plus qu’à les rendre.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing de x).
//! - Défense en profondeur : bornes sur la précision et le dénominateur.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use num_rational::BigRational;
use serde::Deserialize;

use crate::noyau::{Developpement, Etape, LectureX};

/// Précision par défaut (digits) pour évaluer π et e.
const DIGITS_DEFAUT: usize = 40;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
const DIGITS_MAX: usize = 2000;

/// Borne par défaut du dénominateur pour les entrées symboliques.
const DENOMINATEUR_MAX_DEFAUT: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Digits utilisés pour évaluer π et e avant approximation.
    pub digits: usize,
    /// Dénominateur maximal de l’approximation rationnelle (π, e).
    pub denominateur_max: u64,
    /// Afficher chaque étape du développement.
    pub demarche: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            digits: DIGITS_DEFAUT,
            denominateur_max: DENOMINATEUR_MAX_DEFAUT,
            demarche: false,
        }
    }
}

impl Config {
    /// Charge un fichier TOML (clés kebab-case), ou les défauts si aucun chemin.
    pub fn charger(chemin: Option<&Path>) -> Result<Self> {
        let Some(chemin) = chemin else {
            return Ok(Self::default());
        };

        let contenu = fs::read_to_string(chemin)
            .with_context(|| format!("lecture impossible de {}", chemin.display()))?;
        let config: Config = toml::from_str(&contenu)
            .with_context(|| format!("configuration invalide dans {}", chemin.display()))?;
        Ok(config.bornee())
    }

    /// Garde-fou : limite digits et dénominateur.
    pub fn bornee(mut self) -> Self {
        self.set_digits(self.digits);
        self.set_denominateur_max(self.denominateur_max);
        self
    }

    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.clamp(1, DIGITS_MAX);
    }

    pub fn set_denominateur_max(&mut self, q: u64) {
        self.denominateur_max = q.max(1);
    }
}

/// Tout ce qu’une exécution produit (avant affichage).
#[derive(Clone, Debug)]
pub struct Resultats {
    pub entree_x: String,
    pub lecture: LectureX,
    pub n: usize,
    pub developpement: Developpement,
    pub somme: BigRational,
    pub bits: String,
    /// Some(..) seulement si la démarche est demandée.
    pub etapes: Option<Vec<Etape>>,
}
