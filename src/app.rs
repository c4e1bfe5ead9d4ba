// src/app.rs
//
// Développement binaire glouton — module App (racine)
// ---------------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter Config (pour main.rs: use crate::app::Config;)
// - Enchaîner lecture -> noyau -> vue
//
// Important:
// - Toute validation passe par le noyau (lire_x / lire_n) AVANT le développement.
// - Ici, aucune arithmétique : seulement l’orchestration.

pub mod etat;
pub mod vue;

pub use etat::{Config, Resultats};

use std::io::{BufRead, Write};

use anyhow::Result;
use log::debug;

use crate::noyau::bits::valeur_binaire;
use crate::noyau::{
    chaine_binaire, developper, developper_avec_demarche, lire_n, lire_x, somme_partielle,
    ErreurEntree,
};

/// Exécution complète : invites si besoin, calcul, affichage.
pub fn executer(
    config: &Config,
    x: Option<String>,
    n: Option<String>,
    entree: &mut impl BufRead,
    sortie: &mut impl Write,
) -> Result<()> {
    if x.is_none() || n.is_none() {
        vue::afficher_introduction(sortie)?;
    }

    let x_brut = match x {
        Some(v) => v,
        None => vue::demander(entree, sortie, vue::INVITE_X)?,
    };
    let n_brut = match n {
        Some(v) => v,
        None => vue::demander(entree, sortie, vue::INVITE_N)?,
    };

    let resultats = calculer(config, &x_brut, &n_brut)?;
    vue::afficher_resultats(sortie, &resultats)?;
    Ok(())
}

/// Pipeline pur : lecture validée de x et n, développement, somme, bits.
pub fn calculer(config: &Config, x_brut: &str, n_brut: &str) -> Result<Resultats, ErreurEntree> {
    let lecture = lire_x(x_brut, config.digits, config.denominateur_max)?;
    let n = lire_n(n_brut)?;

    let (developpement, etapes) = if config.demarche {
        let (d, e) = developper_avec_demarche(&lecture.x, n)?;
        (d, Some(e))
    } else {
        (developper(&lecture.x, n)?, None)
    };

    let somme = somme_partielle(developpement.exposants());
    let bits = chaine_binaire(developpement.exposants());
    debug_assert_eq!(valeur_binaire(&bits).as_ref(), Ok(&somme));
    debug!(
        "{} exposant(s), arrêt {:?}, somme = {somme}",
        developpement.exposants().len(),
        developpement.arret()
    );

    Ok(Resultats {
        entree_x: x_brut.trim().to_string(),
        lecture,
        n,
        developpement,
        somme,
        bits,
        etapes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executer_txt(x: Option<&str>, n: Option<&str>, stdin: &str) -> Result<String> {
        let mut entree = stdin.as_bytes();
        let mut sortie = Vec::new();
        executer(
            &Config::default(),
            x.map(str::to_string),
            n.map(str::to_string),
            &mut entree,
            &mut sortie,
        )?;
        Ok(String::from_utf8(sortie)?)
    }

    #[test]
    fn arguments_complets_sans_invite() {
        let s = executer_txt(Some("1/2"), Some("1"), "").unwrap();
        assert!(!s.contains("Entrez"));
        assert!(s.contains("[1]"));
    }

    #[test]
    fn invites_pour_x_et_n() {
        let s = executer_txt(None, None, "5/8\n3\n").unwrap();
        assert!(s.contains("Ce programme calcule"));
        assert!(s.contains("Entrez x"));
        assert!(s.contains("Entrez n"));
        assert!(s.contains("0.101"));
    }

    #[test]
    fn invite_pour_n_seulement() {
        let s = executer_txt(Some("1/3"), None, "4\n").unwrap();
        assert!(!s.contains("Entrez x"));
        assert!(s.contains("Entrez n"));
        assert!(s.contains("0.01010101"));
    }

    #[test]
    fn erreurs_de_validation() {
        let e = calculer(&Config::default(), "1/2", "0").unwrap_err();
        assert!(matches!(e, ErreurEntree::BorneInvalide(_)));

        let e = calculer(&Config::default(), "1", "3").unwrap_err();
        assert!(matches!(e, ErreurEntree::RationnelInvalide(_)));

        // x est validé avant n
        let e = calculer(&Config::default(), "abc", "0").unwrap_err();
        assert!(matches!(e, ErreurEntree::RationnelInvalide(_)));
    }
}
