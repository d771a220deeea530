// src/noyau/reel.rs
//
// Réels à précision relative : mantisse entière × 10^exposant, au plus
// `chiffres` chiffres significatifs. Pas de précision globale : chaque valeur
// porte la sienne, et la passe numérique la reçoit en paramètre.
//
// Toutes les opérations tronquent vers zéro. Une valeur non nulle le reste
// quelle que soit sa petitesse : un diviseur n'est nul que s'il vaut zéro.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, Zero};

use std::cmp::Ordering;
use std::fmt;

use super::format::{format_scientifique, pow10, scaled_to_decimal};

/// Chiffres supplémentaires pendant l'extraction de racine.
const CHIFFRES_RACINE: usize = 10;

/// Marge ajoutée à chaque pas de Newton (en unités du dernier chiffre).
const MARGE_RACINE: u32 = 100;

const ITERATIONS_RACINE_MAX: usize = 200;

/// Précision de travail : nombre de chiffres significatifs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(usize);

impl Precision {
    pub fn new(chiffres: usize) -> Self {
        Precision(chiffres.max(1))
    }

    pub fn chiffres(self) -> usize {
        self.0
    }
}

fn nb_chiffres(m: &BigInt) -> usize {
    m.magnitude().to_str_radix(10).len()
}

/// Forme canonique : mantisse sans zéro final, zéro = 0 × 10^0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reel {
    mantisse: BigInt,
    exposant: i64,
    precision: Precision,
}

impl Reel {
    /// mantisse × 10^exposant, tronquée à la précision.
    pub fn new(mantisse: BigInt, exposant: i64, precision: Precision) -> Self {
        if mantisse.is_zero() {
            return Reel::zero(precision);
        }

        let mut mantisse = mantisse;
        let mut exposant = exposant;

        let longueur = nb_chiffres(&mantisse);
        if longueur > precision.0 {
            let coupe = longueur - precision.0;
            mantisse /= pow10(coupe);
            exposant += coupe as i64;
        }

        let dix = BigInt::from(10);
        while (&mantisse % &dix).is_zero() {
            mantisse /= &dix;
            exposant += 1;
        }

        Reel {
            mantisse,
            exposant,
            precision,
        }
    }

    pub fn zero(precision: Precision) -> Self {
        Reel {
            mantisse: BigInt::zero(),
            exposant: 0,
            precision,
        }
    }

    pub fn from_integer(n: &BigInt, precision: Precision) -> Self {
        Reel::new(n.clone(), 0, precision)
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.mantisse.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantisse.is_negative()
    }

    pub fn abs(&self) -> Self {
        Reel {
            mantisse: self.mantisse.abs(),
            ..self.clone()
        }
    }

    fn oppose(&self) -> Self {
        Reel {
            mantisse: -&self.mantisse,
            ..self.clone()
        }
    }

    /// Position juste au-dessus du premier chiffre : |x| < 10^sommet.
    fn sommet(&self) -> i64 {
        self.exposant + nb_chiffres(&self.mantisse) as i64
    }

    pub fn add(&self, rhs: &Reel) -> Self {
        let p = self.precision;
        if rhs.is_zero() {
            return Reel::new(self.mantisse.clone(), self.exposant, p);
        }
        if self.is_zero() {
            return Reel::new(rhs.mantisse.clone(), rhs.exposant, p);
        }

        let (grand, petit) = if self.sommet() >= rhs.sommet() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        // petit entièrement sous le dernier chiffre retenu
        if petit.sommet() + 2 < grand.sommet() - p.0 as i64 {
            return Reel::new(grand.mantisse.clone(), grand.exposant, p);
        }

        let e = grand.exposant.min(petit.exposant);
        let m = &grand.mantisse * pow10((grand.exposant - e) as usize)
            + &petit.mantisse * pow10((petit.exposant - e) as usize);
        Reel::new(m, e, p)
    }

    pub fn sub(&self, rhs: &Reel) -> Self {
        self.add(&rhs.oppose())
    }

    pub fn mul(&self, rhs: &Reel) -> Self {
        Reel::new(
            &self.mantisse * &rhs.mantisse,
            self.exposant + rhs.exposant,
            self.precision,
        )
    }

    /// None si le diviseur vaut exactement zéro.
    pub fn div(&self, rhs: &Reel) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Reel::zero(self.precision));
        }

        // au moins `precision + 1` chiffres au quotient
        let k = (self.precision.0 + 1 + nb_chiffres(&rhs.mantisse))
            .saturating_sub(nb_chiffres(&self.mantisse));
        let m = (&self.mantisse * pow10(k)) / &rhs.mantisse;
        Some(Reel::new(
            m,
            self.exposant - rhs.exposant - k as i64,
            self.precision,
        ))
    }

    /// Racine q-ième (q >= 1). None pour une racine paire d'un négatif.
    ///
    /// Newton sur y^q = x, à quelques chiffres de plus que la précision, en
    /// restant au-dessus de la racine ; le résultat est ensuite tronqué, donc
    /// exact quand la racine tient dans la précision (8^(1/3) = 2).
    pub fn nth_root(&self, q: u32) -> Option<Self> {
        if q <= 1 || self.is_zero() {
            return Some(self.clone());
        }
        if self.is_negative() {
            if q % 2 == 0 {
                return None;
            }
            return self.abs().nth_root(q).map(|r| r.oppose());
        }

        let travail = Precision(self.precision.0 + CHIFFRES_RACINE);
        let x = Reel::new(self.mantisse.clone(), self.exposant, travail);

        // y1 >= racine (moyenne arithmético-géométrique), puis décroissance
        let mut y = x.estimation_racine(q);
        let mut suivant = x.pas_newton(&y, q);
        for _ in 0..ITERATIONS_RACINE_MAX {
            y = suivant;
            suivant = x.pas_newton(&y, q);
            if suivant.compare(&y) != Ordering::Less {
                break;
            }
        }

        Some(Reel::new(y.mantisse, y.exposant, self.precision))
    }

    /// Approximation flottante de x^(1/q) (x > 0), hors du domaine f64 compris.
    fn estimation_racine(&self, q: u32) -> Reel {
        let texte = self.mantisse.magnitude().to_str_radix(10);
        let tete = &texte[..texte.len().min(17)];
        let f: f64 = tete.parse().unwrap_or(1.0);
        let log10 = f.log10() + (self.exposant + (texte.len() - tete.len()) as i64) as f64;

        let l = log10 / f64::from(q);
        let entier = l.floor();
        let m = BigInt::from_f64((10f64.powf(l - entier) * 1e15).ceil())
            .unwrap_or_else(BigInt::one);
        Reel::new(m, entier as i64 - 15, self.precision)
    }

    /// ((q-1)·y + x / y^(q-1)) / q, relevé de quelques unités du dernier
    /// chiffre pour ne jamais passer sous la racine malgré les troncatures.
    fn pas_newton(&self, y: &Reel, q: u32) -> Reel {
        let p = self.precision;
        let puissance = y.pow_u64(u64::from(q - 1));
        let quotient = match self.div(&puissance) {
            Some(v) => v,
            None => return y.clone(),
        };

        let somme = y
            .mul(&Reel::from_integer(&BigInt::from(q - 1), p))
            .add(&quotient);
        let brut = match somme.div(&Reel::from_integer(&BigInt::from(q), p)) {
            Some(v) => v,
            None => return y.clone(),
        };

        let marge = Reel::new(
            BigInt::from(MARGE_RACINE),
            brut.sommet() - p.0 as i64,
            p,
        );
        brut.add(&marge)
    }

    fn compare(&self, other: &Reel) -> Ordering {
        let d = self.sub(other);
        if d.is_zero() {
            Ordering::Equal
        } else if d.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Puissance entière positive (exponentiation rapide).
    pub fn pow_u64(&self, mut e: u64) -> Self {
        let mut acc = Reel::from_integer(&BigInt::one(), self.precision);
        let mut b = self.clone();

        while e > 0 {
            if (e & 1) == 1 {
                acc = acc.mul(&b);
            }
            e >>= 1;
            if e > 0 {
                b = b.mul(&b);
            }
        }
        acc
    }

    /// |self| < r, comparaison exacte.
    pub fn abs_lt(&self, r: &BigRational) -> bool {
        let m = self.mantisse.abs();
        if self.exposant >= 0 {
            m * pow10(self.exposant as usize) * r.denom() < *r.numer()
        } else {
            m * r.denom() < r.numer() * pow10(self.exposant.unsigned_abs() as usize)
        }
    }

    /// Valeur exacte de la représentation.
    pub fn to_rational(&self) -> BigRational {
        if self.exposant >= 0 {
            BigRational::from_integer(&self.mantisse * pow10(self.exposant as usize))
        } else {
            BigRational::new(
                self.mantisse.clone(),
                pow10(self.exposant.unsigned_abs() as usize),
            )
        }
    }

    /// Rendu décimal tronqué à `chiffres` chiffres après la virgule.
    pub fn to_decimal(&self, chiffres: usize) -> String {
        let decalage = self.exposant + chiffres as i64;
        let tronque = if decalage >= 0 {
            &self.mantisse * pow10(decalage as usize)
        } else {
            &self.mantisse / pow10(decalage.unsigned_abs() as usize)
        };
        scaled_to_decimal(&tronque, chiffres)
    }
}

impl fmt::Display for Reel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_scientifique(
            &self.to_rational(),
            self.precision.0,
        ))
    }
}
