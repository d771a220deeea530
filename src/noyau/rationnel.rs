// src/noyau/rationnel.rs
//
// Rationnel exact (forme réduite, signe porté par le numérateur).
// Enveloppe fine autour de BigRational : la seule différence est que
// la construction et la division retournent une erreur au lieu de paniquer
// sur un dénominateur nul.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::erreur::{ErreurNoyau, Resultat};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// n/d réduit. Échoue si d == 0 ; 0/d devient 0/1.
    pub fn new(n: BigInt, d: BigInt) -> Resultat<Self> {
        if d.is_zero() {
            return Err(ErreurNoyau::DivisionByZero);
        }
        Ok(Rational(BigRational::new(n, d)))
    }

    pub fn from_integer(n: BigInt) -> Self {
        Rational(BigRational::from_integer(n))
    }

    pub fn zero() -> Self {
        Rational(BigRational::zero())
    }

    pub fn one() -> Self {
        Rational(BigRational::one())
    }

    /// Littéral décimal (chiffres seulement, sans signe).
    pub fn parse_digits(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|c| c.is_ascii_digit()) {
            return None;
        }
        BigInt::parse_bytes(s.as_bytes(), 10).map(Self::from_integer)
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Rational(self.0.abs())
    }

    pub fn as_big_rational(&self) -> &BigRational {
        &self.0
    }

    pub fn recip(&self) -> Resultat<Self> {
        if self.is_zero() {
            return Err(ErreurNoyau::DivisionByZero);
        }
        Ok(Rational(self.0.recip()))
    }

    pub fn checked_div(&self, other: &Rational) -> Resultat<Self> {
        if other.is_zero() {
            return Err(ErreurNoyau::DivisionByZero);
        }
        Ok(Rational(&self.0 / &other.0))
    }

    /// Puissance entière exacte (exponentiation rapide, jamais de flottant).
    /// 0^0 = 1 ; 0^(-k) => DivisionByZero.
    pub fn pow_int(&self, exp: i64) -> Resultat<Self> {
        if exp == 0 {
            return Ok(Self::one());
        }
        if exp < 0 {
            return self.pow_int_abs(exp.unsigned_abs()).recip();
        }
        Ok(self.pow_int_abs(exp as u64))
    }

    fn pow_int_abs(&self, mut e: u64) -> Self {
        let mut acc = BigRational::one();
        let mut b = self.0.clone();

        while e > 0 {
            if (e & 1) == 1 {
                acc = &acc * &b;
            }
            e >>= 1;
            if e > 0 {
                b = &b * &b;
            }
        }
        Rational(acc)
    }

    /// Estimation (NON exacte) de |self|^exp, arrondie au plafond, et inversée
    /// d'abord si elle est < 1. Sert seulement de valeur de repli quand
    /// l'exposant n'est pas entier : la valeur exacte n'est alors plus rationnelle.
    pub fn pow_estimate(&self, exp: &Rational) -> Self {
        let base = self.to_f64().abs();
        let e = exp.to_f64();
        let mut val = base.powf(e).abs();
        if val > 0.0 && val < 1.0 {
            val = 1.0 / val;
        }
        match BigInt::from_f64(val.ceil()) {
            Some(n) if val.is_finite() && !n.is_zero() => Self::from_integer(n),
            _ => Self::one(),
        }
    }

    /// Approximation flottante (diagnostic / estimation seulement).
    pub fn to_f64(&self) -> f64 {
        let n = self.numer().to_f64().unwrap_or(f64::NAN);
        let d = self.denom().to_f64().unwrap_or(f64::NAN);
        n / d
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(BigInt::from(n))
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

impl Add for &Rational {
    type Output = Rational;
    fn add(self, rhs: &Rational) -> Rational {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;
    fn sub(self, rhs: &Rational) -> Rational {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;
    fn mul(self, rhs: &Rational) -> Rational {
        Rational(&self.0 * &rhs.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.denom().is_one() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}
