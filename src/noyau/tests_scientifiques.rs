//! Tests scientifiques (campagne) : identités connues + contre-vérification.
//!
//! But : vérifier le certificat sur des identités algébriques classiques,
//! sans faire chauffer la machine.
//! - budget temps global
//! - contre-vérification indépendante à 200 chiffres du cas historique
//! - les erreurs ne sont jamais converties en "différent"

use std::time::{Duration, Instant};

use super::egalite::{is_equal, Verdict};
use super::erreur::ErreurNoyau;
use super::evaluation::passe_numerique;
use super::jetons::tokenize;
use super::reel::Precision;
use super::reglages::Reglages;
use super::rpn::to_rpn;

fn verdict(a: &str, b: &str) -> Verdict {
    is_equal(a, b).unwrap_or_else(|e| panic!("a={a:?} b={b:?} err={e}"))
}

fn assert_egal(a: &str, b: &str) {
    let v = verdict(a, b);
    assert!(
        v.egal,
        "attendu égal: {a} = {b} (r={}, ε={})",
        v.residu_decimal(30),
        v.epsilon_scientifique(4)
    );
}

fn assert_different(a: &str, b: &str) {
    let v = verdict(a, b);
    assert!(!v.egal, "attendu différent: {a} ≠ {b}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Cas historique ------------------------ */

#[test]
fn sci_cas_historique_contre_verifie_200_chiffres() {
    let gauche = "2^(1/2)+(5-2*(6)^(1/2))^(1/2)";
    let droite = "3^(1/2)";

    let v = verdict(gauche, droite);
    assert!(v.egal);

    // Évaluation indépendante des deux côtés à 200 chiffres
    let p = Precision::new(200);
    let r = Reglages::default();
    let l = passe_numerique(&to_rpn(&tokenize(gauche)).unwrap(), p, &r).unwrap();
    let d = passe_numerique(&to_rpn(&tokenize(droite)).unwrap(), p, &r).unwrap();
    let ecart = l.sub(&d);

    assert!(ecart.abs_lt(&v.epsilon), "ε doit dépasser |l - d|");
    assert_eq!(l.to_decimal(30), "1.732050807568877293527446341505");
}

/* ------------------------ Identités (égal) ------------------------ */

#[test]
fn sci_radicaux_imbriques() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let cas = [
        ("(3+2*2^(1/2))^(1/2)", "1+2^(1/2)"),
        ("(7+4*3^(1/2))^(1/2)", "2+3^(1/2)"),
        ("2^(1/3)*4^(1/3)", "2"),
        ("(2^(1/2)+1)*(2^(1/2)-1)", "1"),
        ("27^(2/3)", "9"),
        ("16^(3/4)", "8"),
        ("(1/4)^(1/2)", "1/2"),
        ("((5^(1/2)+1)/2)*((5^(1/2)+1)/2-1)", "1"),
        ("(0-8)^(1/3)", "0-2"),
        ("-27^(1/3)", "-3"),
        ("2^(0-1)", "1/2"),
        ("9^(0-1/2)", "1/3"),
    ];

    for (a, b) in cas {
        budget(t0, max);
        assert_egal(a, b);
    }
}

#[test]
fn sci_associativite_puissance() {
    assert_egal("2^3^2", "512");
    assert_different("2^3^2", "64");
    assert_egal("(2^3)^2", "64");
}

/* ------------------------ Presque égaux (différent) ------------------------ */

#[test]
fn sci_approximations_rationnelles_refusees() {
    assert_different("2^(1/2)", "1414213562/1000000000");
    assert_different("10^(1/2)", "3162277/1000000");
    assert_different("2^(1/3)", "126/100");
    assert_different("2^(1/2)+3^(1/2)", "10^(1/2)");
    assert_different("2", "3");
}

/* ------------------------ Epsilon ------------------------ */

#[test]
fn sci_epsilon_decroit_avec_la_complexite() {
    let simple = verdict("2^(1/2)", "2^(1/2)");
    let complexe = verdict("2^(1/2)+3^(1/2)", "2^(1/2)+3^(1/2)");
    assert!(simple.egal && complexe.egal);
    assert!(complexe.epsilon < simple.epsilon);
    assert!(complexe.precision > simple.precision);
}

/* ------------------------ Erreurs (jamais "false") ------------------------ */

#[test]
fn sci_erreurs_distinctes() {
    assert!(matches!(
        is_equal("2^(2^(1/2))", "1"),
        Err(ErreurNoyau::NonRationalExponent { .. })
    ));
    assert!(matches!(
        is_equal("(0-1)^(1/2)", "1"),
        Err(ErreurNoyau::NegativeEvenRoot { .. })
    ));
    assert!(matches!(
        is_equal("1+2)", "3"),
        Err(ErreurNoyau::MismatchedParentheses { .. })
    ));
    assert!(matches!(
        is_equal("3.0", "3"),
        Err(ErreurNoyau::MalformedExpression { .. })
    ));
    assert!(matches!(
        is_equal("2^100000", "1"),
        Err(ErreurNoyau::ExponentTooLarge { .. })
    ));
}
