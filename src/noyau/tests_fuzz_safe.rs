//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, précision bornée, etc.)
//! - invariants clés :
//!     - entiers seulement : passe A (exacte) == passe B (numérique)
//!     - x == x toujours vrai quand il n'y a pas d'erreur
//!     - même entrée => même (égal, N, B, ε)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::egalite::{is_equal, is_equal_with};
use super::erreur::ErreurNoyau;
use super::evaluation::{passe_bornes, passe_numerique};
use super::jetons::tokenize;
use super::reel::Precision;
use super::reglages::Reglages;
use super::rpn::to_rpn;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurNoyau) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz,
    // parce que le domaine est volontairement limité.
    matches!(
        e,
        ErreurNoyau::DivisionByZero
            | ErreurNoyau::NegativeEvenRoot { .. }
            | ErreurNoyau::PrecisionTooLarge { .. }
            | ErreurNoyau::BoundOverflow
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_entier(rng: &mut Rng) -> String {
    // inclut 0 (utile pour tester les divisions par zéro)
    rng.pick(10).to_string()
}

/// Arbre entier : + - * / et ^k (k petit, littéral).
fn gen_expr_entiere(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_entier(rng);
    }

    match rng.pick(7) {
        0 => gen_entier(rng),
        1 => format!(
            "({}+{})",
            gen_expr_entiere(rng, depth - 1),
            gen_expr_entiere(rng, depth - 1)
        ),
        2 => format!(
            "({}-{})",
            gen_expr_entiere(rng, depth - 1),
            gen_expr_entiere(rng, depth - 1)
        ),
        3 => format!(
            "({}*{})",
            gen_expr_entiere(rng, depth - 1),
            gen_expr_entiere(rng, depth - 1)
        ),
        4 | 5 => format!(
            "({}/{})",
            gen_expr_entiere(rng, depth - 1),
            gen_expr_entiere(rng, depth - 1)
        ),
        _ => format!("({})^{}", gen_expr_entiere(rng, depth - 1), rng.pick(4)),
    }
}

fn gen_atome_algebrique(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 => gen_entier(rng),
        1 => "2^(1/2)".to_string(),
        2 => "3^(1/2)".to_string(),
        3 => "5^(1/3)".to_string(),
        _ => format!("{}/{}", rng.pick(9), 1 + rng.pick(8)),
    }
}

fn gen_expr_algebrique(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome_algebrique(rng);
    }

    let a = gen_expr_algebrique(rng, depth - 1);
    let b = gen_expr_algebrique(rng, depth - 1);
    match rng.pick(4) {
        0 => format!("({a}+{b})"),
        1 => format!("({a}-{b})"),
        2 => format!("({a}*{b})"),
        _ => format!("({a})^(1/2)"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_exactitude_entiers_profondeur_5() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let reglages = Reglages::default();

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr_entiere(&mut rng, 5);
        let rpn = to_rpn(&tokenize(&expr)).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        let certificat = match passe_bornes(&rpn, &reglages) {
            Ok(c) => c,
            Err(e) => {
                assert!(is_erreur_attendue(&e), "erreur non attendue: expr={expr:?} err={e}");
                seen_err += 1;
                continue;
            }
        };
        assert!(certificat.exacte, "entiers seulement => exact: {expr:?}");

        let precision = Precision::new(certificat.chiffres + reglages.chiffres_garde);
        // passe A exacte et sans erreur => passe B sans erreur
        let reel = passe_numerique(&rpn, precision, &reglages)
            .unwrap_or_else(|e| panic!("passe B: expr={expr:?} err={e}"));

        // accord à 20 chiffres après la virgule
        let ecart = (reel.to_rational() - certificat.valeur.as_big_rational()) * pow10(20);
        assert!(
            ecart.numer().magnitude() < ecart.denom().magnitude(),
            "expr={expr:?} exact={} num={}",
            certificat.valeur,
            reel.to_decimal(25)
        );
        seen_ok += 1;
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

fn pow10(n: u32) -> BigRational {
    BigRational::from_integer(BigInt::from(10).pow(n))
}

#[test]
fn fuzz_safe_reflexivite_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    // précision bornée : les racines imbriquées font vite exploser N
    let reglages = Reglages::default().with_chiffres_max(3_000);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut seen_ok = 0usize;

    for _ in 0..60 {
        budget(t0, max);

        let expr = gen_expr_algebrique(&mut rng, 2);

        match is_equal_with(&expr, &expr, &reglages) {
            Ok(v1) => {
                assert!(v1.egal, "x = x doit être vrai: {expr:?}");
                let v2 = is_equal_with(&expr, &expr, &reglages)
                    .unwrap_or_else(|e| panic!("err: {e}"));
                assert_eq!(v1.signature(), v2.signature(), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(is_erreur_attendue(&e), "erreur non attendue: expr={expr:?} err={e}");
            }
        }
    }

    assert!(seen_ok > 5, "trop peu de succès: {seen_ok}");
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 800*(1/2) = 400
    let expr = somme_balancee("1/2", 800);
    let v = is_equal(&expr, "400").unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);
    assert!(v.egal);
    assert_eq!(v.degree(), 1);
}

#[test]
fn fuzz_safe_chaine_longue_sans_recursion() {
    // 1+1+...+1 (3000 termes) : RPN et passes itératives, pas de pile d'appels
    let expr = vec!["1"; 3000].join("+");
    let v = is_equal(&expr, "3000").unwrap_or_else(|e| panic!("err: {e}"));
    assert!(v.egal);
}
