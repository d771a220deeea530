// src/main.rs
//
// Certif-égalité : point d'entrée console
// ---------------------------------------
// - Deux expressions (par défaut : le cas historique)
// - Affiche la borne Lambda, epsilon, la précision, le résidu et le verdict
// - Code de sortie : 0 égal, 1 différent, 2 erreur

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use certif_egalite::noyau::reglages::{
    CHIFFRES_AFFICHAGE_DEFAUT, CHIFFRES_GARDE_DEFAUT, CHIFFRES_MAX_DEFAUT, EXPOSANT_MAX_DEFAUT,
};
use certif_egalite::{is_equal_with, Reglages, Verdict};

const GAUCHE_HISTORIQUE: &str = "2^(1/2)+(5-2*(6)^(1/2))^(1/2)";
const DROITE_HISTORIQUE: &str = "3^(1/2)";

/// Test d'égalité certifié de deux expressions algébriques
#[derive(Parser, Debug)]
#[command(
    name = "certif-egalite",
    version,
    about = "Égalité certifiée de deux expressions (entiers, + - * / ^, exposants rationnels)",
    after_help = r#"
Exemples :
  certif-egalite                              # cas historique
  certif-egalite "8^(1/3)" "2"
  certif-egalite "2^(1/2)" "1414/1000" -v

Variables d'environnement :
  RUST_LOG=debug                 Journalisation détaillée
  CERTIF_GARDE=30                Chiffres de garde
  CERTIF_CHIFFRES_MAX=20000      Précision maximale
  CERTIF_EXPOSANT_MAX=4096       |p| maximal
"#
)]
struct Cli {
    /// Expression de gauche
    #[arg(default_value = GAUCHE_HISTORIQUE)]
    gauche: String,

    /// Expression de droite
    #[arg(default_value = DROITE_HISTORIQUE)]
    droite: String,

    /// Chiffres de garde ajoutés à la précision dérivée
    #[arg(long, env = "CERTIF_GARDE", default_value_t = CHIFFRES_GARDE_DEFAUT)]
    garde: usize,

    /// Précision maximale (chiffres significatifs)
    #[arg(long, env = "CERTIF_CHIFFRES_MAX", default_value_t = CHIFFRES_MAX_DEFAUT)]
    chiffres_max: usize,

    /// |p| maximal dans un exposant p/q
    #[arg(long, env = "CERTIF_EXPOSANT_MAX", default_value_t = EXPOSANT_MAX_DEFAUT)]
    exposant_max: u64,

    /// Chiffres affichés (epsilon, résidu)
    #[arg(long, default_value_t = CHIFFRES_AFFICHAGE_DEFAUT)]
    affichage: usize,

    /// Verbosité (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn reglages(&self) -> Reglages {
        Reglages::default()
            .with_chiffres_garde(self.garde)
            .with_chiffres_max(self.chiffres_max)
            .with_exposant_max(self.exposant_max)
            .with_chiffres_affichage(self.affichage)
    }
}

fn niveau(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn rapport(gauche: &str, droite: &str, v: &Verdict, reglages: &Reglages) {
    let n = reglages.chiffres_affichage;

    println!("Gauche    : {gauche}");
    println!("Droite    : {droite}");
    println!("Expression: {}", v.demarche.expression);
    println!("RPN       : {}", v.demarche.rpn);
    println!("Lambda    : {{{}}}", v.borne);
    println!("Epsilon   : {}", v.epsilon_scientifique(n.max(1)));
    println!("Précision : {} chiffres significatifs", v.precision.chiffres());
    println!("Résidu    : {}", v.residu_decimal(n));
    println!(
        "Verdict   : {}",
        if v.egal { "ÉGAL (certifié)" } else { "DIFFÉRENT (certifié)" }
    );
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG prime si présent ; sinon -v règle le niveau
    let mut logs = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logs.filter_level(niveau(cli.verbose));
    }
    logs.init();

    let reglages = cli.reglages();
    debug!("réglages : {reglages:?}");

    match is_equal_with(&cli.gauche, &cli.droite, &reglages) {
        Ok(v) => {
            rapport(&cli.gauche, &cli.droite, &v, &reglages);
            if v.egal {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Erreur : {e}");
            ExitCode::from(2)
        }
    }
}
