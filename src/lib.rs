//! Égalité certifiée de deux expressions algébriques.
//!
//! ```
//! let v = certif_egalite::is_equal("2^(1/2)+(5-2*(6)^(1/2))^(1/2)", "3^(1/2)").unwrap();
//! assert!(v.egal);
//! assert_eq!((v.degree(), v.height().to_string()), (16, "22".to_string()));
//! ```

pub mod noyau;

pub use noyau::{is_equal, is_equal_with, DemarcheNoyau, ErreurNoyau, Reglages, Resultat, Verdict};
