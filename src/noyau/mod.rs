//! Noyau exact : égalité certifiée de nombres algébriques
//!
//! Organisation interne :
//! - jetons.rs      : tokenisation (permissive : Unknown refusé au shunting-yard)
//! - rpn.rs         : shunting-yard -> Postfix (immuable, parcourue deux fois)
//! - rationnel.rs   : rationnel exact (dénominateur nul = erreur)
//! - borne.rs       : borne (degré, hauteur) "Lambda" + epsilon de séparation
//! - reel.rs        : réels mantisse × 10^e, précision relative explicite
//! - format.rs      : affichage décimal / scientifique tronqué
//! - evaluation.rs  : passe A (bornes + exact) et passe B (numérique)
//! - egalite.rs     : pipeline complet (a)-(b) -> |r| < ε
//! - reglages.rs    : garde-fous (exposant, précision) et chiffres de garde
//! - erreur.rs      : taxonomie des erreurs

pub mod borne;
pub mod egalite;
pub mod erreur;
pub mod evaluation;
pub mod format;
pub mod jetons;
pub mod rationnel;
pub mod reel;
pub mod reglages;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use egalite::{is_equal, is_equal_with, DemarcheNoyau, Verdict};
pub use erreur::{ErreurNoyau, Resultat};
pub use reglages::Reglages;
