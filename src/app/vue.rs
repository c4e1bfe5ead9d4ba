// src/app/vue.rs
//
// Vue (terminal)
// --------------
// Objectifs :
// - Invites interactives quand x et/ou n manquent
// - Rendu des Resultats (etat.rs) : notes, exposants, somme, bits, démarche
//
// Note :
// - Tout passe par des `impl Write` / `impl BufRead` : testable sans terminal.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use super::etat::Resultats;
use crate::noyau::{Arret, Developpement, Etape};

pub const INVITE_X: &str = "Entrez x (ex. 0.625, 5/8, pi/4) : ";
pub const INVITE_N: &str = "Entrez n (entier positif) : ";

pub fn afficher_introduction(sortie: &mut impl Write) -> Result<()> {
    writeln!(
        sortie,
        "Ce programme calcule le développement binaire glouton de x ∈ (0,1)."
    )?;
    Ok(())
}

/// Affiche l’invite puis lit une ligne (sans le saut de ligne).
pub fn demander(entree: &mut impl BufRead, sortie: &mut impl Write, invite: &str) -> Result<String> {
    write!(sortie, "{invite}")?;
    sortie.flush()?;

    let mut ligne = String::new();
    let lus = entree
        .read_line(&mut ligne)
        .context("lecture de l’entrée standard")?;
    if lus == 0 {
        bail!("entrée interrompue (fin de flux)");
    }
    Ok(ligne.trim().to_string())
}

/* ------------------------ Helpers de format ------------------------ */

fn format_rat_pretty(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

fn format_liste(v: &[u64]) -> String {
    let items: Vec<String> = v.iter().map(|m| m.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn pluriel(k: usize) -> &'static str {
    if k == 1 {
        ""
    } else {
        "s"
    }
}

/* ------------------------ Rendu complet ------------------------ */

pub fn afficher_resultats(sortie: &mut impl Write, r: &Resultats) -> Result<()> {
    let exposants = r.developpement.exposants();
    let k = exposants.len();

    // --- notes (avant le bloc principal) ---
    if r.developpement.tronque_avant_borne() {
        writeln!(sortie)?;
        writeln!(
            sortie,
            "note : le développement binaire exact s’est terminé après {k} terme{}.",
            pluriel(k)
        )?;
    }

    if let Some(a) = &r.lecture.approximation {
        writeln!(
            sortie,
            "note : x = {} ≈ {}… approché par {} (dénominateur ≤ {}).",
            r.entree_x,
            a.decimal,
            format_rat_pretty(&r.lecture.avant_reduction),
            a.denominateur_max
        )?;
    }

    if r.lecture.reduit_modulo_1() {
        writeln!(
            sortie,
            "note : {} réduit à sa partie fractionnaire {}.",
            format_rat_pretty(&r.lecture.avant_reduction),
            format_rat_pretty(&r.lecture.x)
        )?;
    }

    // --- bloc principal ---
    writeln!(sortie)?;
    writeln!(
        sortie,
        "Entrée x = {}   n = {}",
        format_rat_pretty(&r.lecture.x),
        r.n
    )?;

    if k == 1 {
        writeln!(sortie, "Le premier exposant est : {}", format_liste(exposants))?;
    } else {
        writeln!(
            sortie,
            "Les {k} premiers exposants sont : {}",
            format_liste(exposants)
        )?;
    }
    writeln!(
        sortie,
        "Positions des bits à 1 : {}",
        format_liste(&r.developpement.positions())
    )?;

    let flottant = r
        .somme
        .to_f64()
        .map_or_else(|| "?".to_string(), |f| f.to_string());
    writeln!(
        sortie,
        "Approximation binaire = {}   (≈ {flottant})",
        format_rat_pretty(&r.somme)
    )?;
    writeln!(sortie, "Bits exacts   = 0.{}", r.bits)?;

    if let Some(etapes) = &r.etapes {
        afficher_demarche(sortie, etapes, &r.developpement)?;
    }

    Ok(())
}

fn afficher_demarche(sortie: &mut impl Write, etapes: &[Etape], d: &Developpement) -> Result<()> {
    let arret = match d.arret() {
        Arret::Exact => "reste nul",
        Arret::Borne => "borne atteinte",
    };
    writeln!(sortie)?;
    writeln!(
        sortie,
        "Démarche ({} étape{} sur {}, {arret}) :",
        etapes.len(),
        pluriel(etapes.len()),
        d.borne()
    )?;
    for (i, e) in etapes.iter().enumerate() {
        writeln!(
            sortie,
            "  k={} : 1/reste = {}, ⌊log2⌋ = {}, m = {}, reste = {}",
            i + 1,
            format_rat_pretty(&e.inverse),
            e.log2_plancher,
            e.exposant,
            format_rat_pretty(&e.reste)
        )?;
    }
    Ok(())
}
