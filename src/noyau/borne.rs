// src/noyau/borne.rs
//
// Borne (degré, hauteur) : la comptabilité "Lambda".
//
// Une borne {n, b} certifie : la valeur suivie est un nombre algébrique de
// degré <= n dont le polynôme minimal a des coefficients bornés par b.
// Règles de combinaison (toutes monotones) :
// - littéral k      : {1, |k|}
// - a + b, a - b    : {n_a * n_b, b_a + b_b}
// - a * b, a / b    : {n_a * n_b, b_a * b_b}
// - a ^ (p/q)       : (a * a * ... * a, |p| fois) puis n *= q
//
// La soustraction réutilise la règle de l'addition, la division celle du
// produit. Ces règles sont lâches mais correctes ; ne pas les resserrer.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use std::fmt;

use super::erreur::{ErreurNoyau, Resultat};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DegreeHeightBound {
    degree: u64,
    height: BigUint,
}

impl DegreeHeightBound {
    /// Borne d'un littéral entier k : {1, |k|}.
    pub fn literal(k: &BigInt) -> Self {
        DegreeHeightBound {
            degree: 1,
            height: k.magnitude().clone(),
        }
    }

    /// Construction directe (tests, diagnostics). Le degré est ramené à 1 au minimum.
    pub fn new(degree: u64, height: BigUint) -> Self {
        DegreeHeightBound {
            degree: degree.max(1),
            height,
        }
    }

    pub fn degree(&self) -> u64 {
        self.degree
    }

    pub fn height(&self) -> &BigUint {
        &self.height
    }

    fn degree_produit(&self, rhs: &Self) -> Resultat<u64> {
        self.degree
            .checked_mul(rhs.degree)
            .ok_or(ErreurNoyau::BoundOverflow)
    }

    /// Règle de la somme (et de la différence).
    pub fn sum(&self, rhs: &Self) -> Resultat<Self> {
        Ok(DegreeHeightBound {
            degree: self.degree_produit(rhs)?,
            height: &self.height + &rhs.height,
        })
    }

    /// Règle du produit (et du quotient).
    pub fn product(&self, rhs: &Self) -> Resultat<Self> {
        Ok(DegreeHeightBound {
            degree: self.degree_produit(rhs)?,
            height: &self.height * &rhs.height,
        })
    }

    /// Règle de la puissance a^(p/q).
    ///
    /// Multiplication répétée de la borne par elle-même |p| fois (coût linéaire
    /// en |p|, d'où `exposant_max`), puis degré multiplié par q.
    /// p = 0 : la borne de la base est gardée (degré n·q), la racine q-ième
    /// est calculée en passe B et reste comptée dans la précision.
    pub fn pow(&self, exposant: &BigRational, exposant_max: u64) -> Resultat<Self> {
        let p = exposant.numer().magnitude();
        let q = exposant
            .denom()
            .to_u64()
            .ok_or(ErreurNoyau::BoundOverflow)?;

        let p = match p.to_u64() {
            Some(p) if p <= exposant_max => p,
            _ => {
                return Err(ErreurNoyau::ExponentTooLarge {
                    exposant: p.to_string(),
                    max: exposant_max,
                })
            }
        };

        let mut acc = self.clone();
        for _ in 1..p {
            acc = acc.product(self)?;
        }
        if p == 0 && acc.height.is_zero() {
            // la valeur vaut 1 : hauteur au moins 1
            acc.height = BigUint::one();
        }

        acc.degree = acc
            .degree
            .checked_mul(q)
            .ok_or(ErreurNoyau::BoundOverflow)?;
        Ok(acc)
    }

    /// n * max(b, 1). Relever la hauteur est toujours correct ; on évite un produit nul.
    pub fn produit_nb(&self) -> BigUint {
        let b = if self.height > BigUint::one() {
            self.height.clone()
        } else {
            BigUint::one()
        };
        b * BigUint::from(self.degree)
    }

    /// Séparation : epsilon = 1 / (n·b)^(n-1).
    /// Deux nombres algébriques distincts sous cette borne diffèrent d'au moins epsilon.
    pub fn epsilon(&self) -> Resultat<BigRational> {
        let exp = u32::try_from(self.degree - 1).map_err(|_| ErreurNoyau::BoundOverflow)?;
        let denom = self.produit_nb().pow(exp);
        Ok(BigRational::new(BigInt::one(), BigInt::from(denom)))
    }

    /// Précision de travail (chiffres décimaux) : longueur décimale de n·b, fois n.
    pub fn chiffres_requis(&self) -> Resultat<u64> {
        let longueur = self.produit_nb().to_str_radix(10).len() as u64;
        longueur
            .checked_mul(self.degree)
            .ok_or(ErreurNoyau::BoundOverflow)
    }
}

impl fmt::Display for DegreeHeightBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.degree, self.height)
    }
}
