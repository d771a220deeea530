// src/noyau/format.rs
//
// Affichage décimal des entiers “scalés” (×10^digits) et notation
// scientifique des rationnels.
// Toujours tronqué (jamais arrondi) : ce qui est affiché est vrai.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

pub(crate) fn pow10(n: usize) -> BigInt {
    num_traits::pow(BigInt::from(10), n)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    let scaled = scaled.abs();

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let frac = format!("{:0>width$}", frac_part.to_str_radix(10), width = digits);
    format!("{signe}{int_part}.{frac}")
}

/// Notation scientifique tronquée : "3.5200e-39".
/// `significatifs` >= 1 chiffres de mantisse.
pub fn format_scientifique(r: &BigRational, significatifs: usize) -> String {
    if r.is_zero() {
        return "0".to_string();
    }

    let significatifs = significatifs.max(1);
    let neg = r.is_negative();
    let a = r.abs();

    // exposant décimal e tel que 10^e <= a < 10^(e+1)
    let num_len = a.numer().to_str_radix(10).len() as i64;
    let den_len = a.denom().to_str_radix(10).len() as i64;
    let mut e = num_len - den_len;
    if mantisse_scaled(&a, e, 0) < BigInt::from(1) {
        e -= 1;
    }

    let m = mantisse_scaled(&a, e, significatifs - 1);
    let texte = scaled_to_decimal(&m, significatifs - 1);
    let signe = if neg { "-" } else { "" };
    format!("{signe}{texte}e{e}")
}

/// trunc(a / 10^e * 10^digits)
fn mantisse_scaled(a: &BigRational, e: i64, digits: usize) -> BigInt {
    let decalage = digits as i64 - e;
    let mut num = a.numer().clone();
    let mut den = a.denom().clone();
    if decalage >= 0 {
        num *= pow10(decalage as usize);
    } else {
        den *= pow10((-decalage) as usize);
    }
    num / den
}
