// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes sont fatales pour la comparaison en cours : pas de reprise,
// pas de "false" silencieux, pas de résultat partiel.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurNoyau {
    /// Dénominateur nul (construction, `/`, puissance négative de 0).
    #[error("division par zéro")]
    DivisionByZero,

    #[error("parenthèses non appariées : '{texte}' (position {position})")]
    MismatchedParentheses { texte: String, position: usize },

    #[error("expression invalide : '{texte}' (position {position})")]
    MalformedExpression { texte: String, position: usize },

    #[error("opérateur inconnu : '{texte}' (position {position})")]
    UnknownOperator { texte: String, position: usize },

    #[error("entrée vide")]
    EmptyExpression,

    /// L'exposant n'est pas un rationnel exact (ex: 2^(2^(1/2))).
    #[error("exposant non rationnel (position {position})")]
    NonRationalExponent { position: usize },

    #[error("exposant trop grand : |p| = {exposant} (max {max})")]
    ExponentTooLarge { exposant: String, max: u64 },

    #[error("précision requise trop grande : {chiffres} chiffres (max {max})")]
    PrecisionTooLarge { chiffres: String, max: usize },

    #[error("dépassement du degré (borne > 2^64)")]
    BoundOverflow,

    #[error("racine paire d'un nombre négatif (position {position})")]
    NegativeEvenRoot { position: usize },
}

pub type Resultat<T> = Result<T, ErreurNoyau>;

impl ErreurNoyau {
    /// Construit une erreur "expression invalide" à partir d'un jeton.
    pub(crate) fn malformee(texte: &str, position: usize) -> Self {
        ErreurNoyau::MalformedExpression {
            texte: texte.to_string(),
            position,
        }
    }
}
