// src/main.rs
//
// Développement binaire glouton — point d’entrée (terminal)
// ---------------------------------------------------------
// But:
// - Lire x et n (arguments, sinon invites interactives)
// - Charger la configuration (--config FICHIER, puis options)
// - Journalisation : RUST_LOG=debug pour suivre chaque étape (sur stderr)
//
// Code de sortie : 0 si succès, 1 sur toute erreur de validation
// (message sur la sortie standard, préfixé par « Erreur : »).

mod app;
mod noyau;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use log::info;

use app::Config;

#[derive(Parser, Debug)]
#[command(version, about, name("binaire_glouton"), max_term_width = 90)]
struct Args {
    /// Le nombre x : fraction (5/8), décimal (0.625) ou expression avec pi et e (pi/4, e-2).
    /// Les valeurs ≥ 1 sont ramenées à leur partie fractionnaire.
    #[arg(allow_hyphen_values = true)]
    x: Option<String>,

    /// Nombre maximal de termes (entier ≥ 1).
    #[arg(allow_hyphen_values = true)]
    n: Option<String>,

    /// Fichier de configuration TOML (digits, denominateur-max, demarche).
    #[arg(long, value_name = "FICHIER")]
    config: Option<PathBuf>,

    /// Précision (digits) pour évaluer pi et e avant approximation.
    #[arg(long, value_name = "N")]
    digits: Option<usize>,

    /// Dénominateur maximal de l’approximation rationnelle d’une expression avec pi ou e.
    #[arg(long, value_name = "Q")]
    denominateur_max: Option<u64>,

    /// Afficher chaque étape du développement (1/reste, ⌊log2⌋, m, reste).
    #[arg(short, long)]
    demarche: bool,
}

fn construire_config(args: &Args) -> Result<Config> {
    let mut config = Config::charger(args.config.as_deref())?;

    if let Some(d) = args.digits {
        config.set_digits(d);
    }
    if let Some(q) = args.denominateur_max {
        config.set_denominateur_max(q);
    }
    config.demarche |= args.demarche;

    info!("configuration : {config:?}");
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = construire_config(&args)?;

    let stdin = io::stdin();
    let mut entree = stdin.lock();
    let mut sortie = io::stdout().lock();

    app::executer(&config, args.x, args.n, &mut entree, &mut sortie)?;
    sortie.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        println!("Erreur : {e:#}");
        process::exit(1);
    }
}
