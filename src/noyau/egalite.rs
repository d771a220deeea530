//! Noyau : décision d'égalité (pipeline réel)
//!
//! (a)-(b) -> jetons -> RPN -> passe A (borne {N,B}, epsilon, précision)
//!         -> passe B (à cette précision + garde, chiffres significatifs)
//!         -> |r| < epsilon
//!
//! Correct mais pas complet : un "égal" est certifié, un "différent" aussi
//! dès que |r| dépasse la séparation.

use log::{debug, info};
use num_bigint::BigUint;
use num_rational::BigRational;

use super::borne::DegreeHeightBound;
use super::erreur::{ErreurNoyau, Resultat};
use super::evaluation::{passe_bornes, passe_numerique};
use super::format::format_scientifique;
use super::jetons::{format_tokens, tokenize};
use super::reel::{Precision, Reel};
use super::reglages::Reglages;
use super::rpn::to_rpn;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub expression: String,
    pub jetons: String,
    pub rpn: String,
    pub note: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub egal: bool,
    pub borne: DegreeHeightBound,
    pub epsilon: BigRational,
    /// Précision de la passe B en chiffres significatifs (garde incluse).
    pub precision: Precision,
    /// r = valeur numérique de (a)-(b).
    pub residu: Reel,
    pub demarche: DemarcheNoyau,
}

impl Verdict {
    pub fn degree(&self) -> u64 {
        self.borne.degree()
    }

    pub fn height(&self) -> &BigUint {
        self.borne.height()
    }

    pub fn epsilon_scientifique(&self, significatifs: usize) -> String {
        format_scientifique(&self.epsilon, significatifs)
    }

    pub fn residu_decimal(&self, chiffres: usize) -> String {
        self.residu.to_decimal(chiffres)
    }

    /// (égal, N, B, epsilon) : ce qui doit être identique d'un appel à l'autre.
    pub fn signature(&self) -> (bool, u64, BigUint, BigRational) {
        (
            self.egal,
            self.degree(),
            self.height().clone(),
            self.epsilon.clone(),
        )
    }
}

/// API publique : a et b représentent-ils le même nombre algébrique ?
pub fn is_equal(a: &str, b: &str) -> Resultat<Verdict> {
    is_equal_with(a, b, &Reglages::default())
}

pub fn is_equal_with(a: &str, b: &str, reglages: &Reglages) -> Resultat<Verdict> {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return Err(ErreurNoyau::EmptyExpression);
    }

    // parenthèses : "1+2" vs "2+1" doit donner (1+2)-(2+1), pas 1+2-2+1
    let expression = format!("({a})-({b})");

    // 1) Jetons
    let jetons = tokenize(&expression);

    // 2) RPN (une seule fois, partagée par les deux passes)
    let rpn = to_rpn(&jetons)?;
    debug!("rpn : {rpn}");

    // 3) Passe A : borne + epsilon + précision requise
    let certificat = passe_bornes(&rpn, reglages)?;

    // 4) Passe B : numérique à la précision dérivée (garde incluse)
    let precision = Precision::new(certificat.chiffres + reglages.chiffres_garde);
    let residu = passe_numerique(&rpn, precision, reglages)?;

    // 5) Décision
    let egal = residu.abs_lt(&certificat.epsilon);

    info!(
        "{a} = {b} ? {egal} (Lambda {}, epsilon {})",
        certificat.borne,
        format_scientifique(&certificat.epsilon, 6)
    );

    let demarche = DemarcheNoyau {
        jetons: format_tokens(&jetons),
        rpn: rpn.to_string(),
        expression,
        note: "Pipeline: jetons → RPN → passe bornes (N, B, ε) → passe numérique → |r| < ε."
            .into(),
    };

    Ok(Verdict {
        egal,
        borne: certificat.borne,
        epsilon: certificat.epsilon,
        precision,
        residu,
        demarche,
    })
}
