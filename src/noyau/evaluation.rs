//! Noyau : double évaluation d'une RPN
//!
//! Deux passes pures sur la même suite postfix (jamais re-tokenisée) :
//! - passe A (`passe_bornes`) : pile de (rationnel, exact?, borne degré/hauteur)
//!   -> borne finale {N, B}, epsilon de séparation, précision requise
//! - passe B (`passe_numerique`) : pile de réels à précision relative
//!   (chiffres significatifs reçus en paramètre)
//!
//! Ordre des opérandes : on dépile rhs PUIS lhs (-, / et ^ ne commutent pas).

use log::{debug, trace};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use super::borne::DegreeHeightBound;
use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{Token, TokenKind};
use super::rationnel::Rational;
use super::reel::{Precision, Reel};
use super::reglages::Reglages;
use super::rpn::Postfix;

/* ------------------------ Opérateurs ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Puiss,
}

impl Op {
    fn depuis(tok: &Token) -> Resultat<Op> {
        let op = match (tok.kind, tok.text.as_str()) {
            (TokenKind::Operator, "+") => Op::Plus,
            (TokenKind::Operator, "-") => Op::Moins,
            (TokenKind::Operator, "*") => Op::Fois,
            (TokenKind::Operator, "/") => Op::Div,
            (TokenKind::Operator, "^") => Op::Puiss,
            _ => {
                return Err(ErreurNoyau::UnknownOperator {
                    texte: tok.text.clone(),
                    position: tok.position,
                })
            }
        };
        Ok(op)
    }
}

fn depile<T>(pile: &mut Vec<T>, tok: &Token) -> Resultat<T> {
    pile.pop().ok_or_else(|| ErreurNoyau::malformee(&tok.text, tok.position))
}

/// Il doit rester exactement une valeur sur la pile.
fn sommet_unique<T>(mut pile: Vec<T>, postfix: &Postfix) -> Resultat<T> {
    if pile.len() != 1 {
        let (texte, position) = postfix
            .as_slice()
            .last()
            .map(|t| (t.text.as_str(), t.position))
            .unwrap_or(("", 0));
        return Err(ErreurNoyau::malformee(texte, position));
    }
    pile.pop().ok_or_else(|| ErreurNoyau::malformee("", 0))
}

fn litteral(tok: &Token) -> Resultat<BigInt> {
    Rational::parse_digits(&tok.text)
        .map(|r| r.numer().clone())
        .ok_or_else(|| ErreurNoyau::malformee(&tok.text, tok.position))
}

/// Exposant p/q : exact obligatoire, |p| borné. Retourne (p, q).
fn exposant(e: &Rational, exact: bool, tok: &Token, max: u64) -> Resultat<(i64, u32)> {
    if !exact {
        return Err(ErreurNoyau::NonRationalExponent {
            position: tok.position,
        });
    }
    let trop_grand = || ErreurNoyau::ExponentTooLarge {
        exposant: e.to_string(),
        max,
    };
    let p = e.numer().to_i64().ok_or_else(trop_grand)?;
    if p.unsigned_abs() > max {
        return Err(trop_grand());
    }
    let q = e.denom().to_u32().ok_or_else(trop_grand)?;
    Ok((p, q))
}

/* ------------------------ Passe A : bornes + exact ------------------------ */

#[derive(Clone, Debug)]
struct EntreeBorne {
    valeur: Rational,
    // false dès qu'une racine non entière intervient : valeur = estimation
    exacte: bool,
    borne: DegreeHeightBound,
}

/// Résultat de la passe A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificat {
    pub borne: DegreeHeightBound,
    /// Valeur rationnelle (exacte seulement si `exacte`).
    pub valeur: Rational,
    pub exacte: bool,
    /// 1 / (N·B)^(N-1)
    pub epsilon: BigRational,
    /// Précision requise (chiffres décimaux), avant chiffres de garde.
    pub chiffres: usize,
}

fn applique_borne(
    op: Op,
    lhs: EntreeBorne,
    rhs: EntreeBorne,
    tok: &Token,
    reglages: &Reglages,
) -> Resultat<EntreeBorne> {
    let exacte = lhs.exacte && rhs.exacte;

    let entree = match op {
        Op::Plus => EntreeBorne {
            valeur: &lhs.valeur + &rhs.valeur,
            exacte,
            borne: lhs.borne.sum(&rhs.borne)?,
        },
        Op::Moins => EntreeBorne {
            valeur: &lhs.valeur - &rhs.valeur,
            exacte,
            borne: lhs.borne.sum(&rhs.borne)?,
        },
        Op::Fois => EntreeBorne {
            valeur: &lhs.valeur * &rhs.valeur,
            exacte,
            borne: lhs.borne.product(&rhs.borne)?,
        },
        Op::Div => {
            let valeur = match lhs.valeur.checked_div(&rhs.valeur) {
                Ok(v) => v,
                // zéro estimé : la vraie division par zéro sera vue en passe B
                Err(_) if !rhs.exacte => lhs.valeur.clone(),
                Err(e) => return Err(e),
            };
            EntreeBorne {
                valeur,
                exacte,
                borne: lhs.borne.product(&rhs.borne)?,
            }
        }
        Op::Puiss => {
            let (p, q) = exposant(&rhs.valeur, rhs.exacte, tok, reglages.exposant_max)?;
            let borne = lhs.borne.pow(rhs.valeur.as_big_rational(), reglages.exposant_max)?;

            let (valeur, exacte) = if q == 1 {
                match lhs.valeur.pow_int(p) {
                    Ok(v) => (v, lhs.exacte),
                    Err(_) if !lhs.exacte => (Rational::one(), false),
                    Err(e) => return Err(e),
                }
            } else {
                (lhs.valeur.pow_estimate(&rhs.valeur), false)
            };

            EntreeBorne {
                valeur,
                exacte,
                borne,
            }
        }
    };

    Ok(entree)
}

/// Passe A : borne {N, B} de la valeur, epsilon et précision requise.
pub fn passe_bornes(postfix: &Postfix, reglages: &Reglages) -> Resultat<Certificat> {
    let mut pile: Vec<EntreeBorne> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        if tok.kind == TokenKind::Number {
            let k = litteral(tok)?;
            pile.push(EntreeBorne {
                borne: DegreeHeightBound::literal(&k),
                valeur: Rational::from_integer(k),
                exacte: true,
            });
            continue;
        }

        let op = Op::depuis(tok)?;
        let rhs = depile(&mut pile, tok)?;
        let lhs = depile(&mut pile, tok)?;
        let entree = applique_borne(op, lhs, rhs, tok, reglages)?;
        trace!("passe A '{}' -> {{{}}}", tok.text, entree.borne);
        pile.push(entree);
    }

    let fin = sommet_unique(pile, postfix)?;

    let chiffres = fin.borne.chiffres_requis()?;
    let chiffres = match usize::try_from(chiffres) {
        Ok(c) if c <= reglages.chiffres_max => c,
        _ => {
            return Err(ErreurNoyau::PrecisionTooLarge {
                chiffres: chiffres.to_string(),
                max: reglages.chiffres_max,
            })
        }
    };
    let epsilon = fin.borne.epsilon()?;

    debug!(
        "Lambda final : {}, {} ; précision requise : {} chiffres",
        fin.borne.degree(),
        fin.borne.height(),
        chiffres
    );

    Ok(Certificat {
        borne: fin.borne,
        valeur: fin.valeur,
        exacte: fin.exacte,
        epsilon,
        chiffres,
    })
}

/* ------------------------ Passe B : numérique ------------------------ */

#[derive(Clone, Debug)]
struct EntreeNum {
    reel: Reel,
    // valeur exacte si la sous-expression est rationnelle (sert aux exposants)
    exact: Option<Rational>,
}

fn applique_num(
    op: Op,
    lhs: EntreeNum,
    rhs: EntreeNum,
    tok: &Token,
    reglages: &Reglages,
) -> Resultat<EntreeNum> {
    let entree = match op {
        Op::Plus => EntreeNum {
            reel: lhs.reel.add(&rhs.reel),
            exact: lhs.exact.zip(rhs.exact).map(|(a, b)| &a + &b),
        },
        Op::Moins => EntreeNum {
            reel: lhs.reel.sub(&rhs.reel),
            exact: lhs.exact.zip(rhs.exact).map(|(a, b)| &a - &b),
        },
        Op::Fois => EntreeNum {
            reel: lhs.reel.mul(&rhs.reel),
            exact: lhs.exact.zip(rhs.exact).map(|(a, b)| &a * &b),
        },
        Op::Div => {
            let exact = match (lhs.exact, rhs.exact) {
                (Some(a), Some(b)) => Some(a.checked_div(&b)?),
                _ => None,
            };
            let reel = lhs
                .reel
                .div(&rhs.reel)
                .ok_or(ErreurNoyau::DivisionByZero)?;
            EntreeNum { reel, exact }
        }
        Op::Puiss => {
            let e = rhs.exact.ok_or(ErreurNoyau::NonRationalExponent {
                position: tok.position,
            })?;
            let (p, q) = exposant(&e, true, tok, reglages.exposant_max)?;

            let racine = lhs.reel.nth_root(q).ok_or(ErreurNoyau::NegativeEvenRoot {
                position: tok.position,
            })?;
            let mut reel = racine.pow_u64(p.unsigned_abs());
            if p < 0 {
                let un = Reel::from_integer(&BigInt::from(1), reel.precision());
                reel = un.div(&reel).ok_or(ErreurNoyau::DivisionByZero)?;
            }

            let exact = match lhs.exact {
                Some(base) if q == 1 => Some(base.pow_int(p)?),
                _ => None,
            };
            EntreeNum { reel, exact }
        }
    };

    Ok(entree)
}

/// Passe B : valeur numérique à la précision donnée (paramètre explicite,
/// aucune précision globale).
pub fn passe_numerique(
    postfix: &Postfix,
    precision: Precision,
    reglages: &Reglages,
) -> Resultat<Reel> {
    let mut pile: Vec<EntreeNum> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        if tok.kind == TokenKind::Number {
            let k = litteral(tok)?;
            pile.push(EntreeNum {
                reel: Reel::from_integer(&k, precision),
                exact: Some(Rational::from_integer(k)),
            });
            continue;
        }

        let op = Op::depuis(tok)?;
        let rhs = depile(&mut pile, tok)?;
        let lhs = depile(&mut pile, tok)?;
        let entree = applique_num(op, lhs, rhs, tok, reglages)?;
        pile.push(entree);
    }

    let fin = sommet_unique(pile, postfix)?;
    debug!("passe B ({} chiffres) : {}", precision.chiffres(), fin.reel);
    Ok(fin.reel)
}
