// src/noyau/reglages.rs
//
// Réglages d'une vérification d'égalité.
// Garde-fous (anti-abus / anti-gel) : exposant et précision bornés.

/// Chiffres de garde ajoutés à la précision dérivée de la borne.
pub const CHIFFRES_GARDE_DEFAUT: usize = 30;

/// Précision maximale acceptée (chiffres décimaux).
pub const CHIFFRES_MAX_DEFAUT: usize = 20_000;

/// |p| maximal pour un exposant p/q (la règle de puissance est linéaire en |p|).
pub const EXPOSANT_MAX_DEFAUT: u64 = 4_096;

/// Chiffres affichés pour epsilon et le résidu.
pub const CHIFFRES_AFFICHAGE_DEFAUT: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub chiffres_garde: usize,
    pub chiffres_max: usize,
    pub exposant_max: u64,
    pub chiffres_affichage: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            chiffres_garde: CHIFFRES_GARDE_DEFAUT,
            chiffres_max: CHIFFRES_MAX_DEFAUT,
            exposant_max: EXPOSANT_MAX_DEFAUT,
            chiffres_affichage: CHIFFRES_AFFICHAGE_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn with_chiffres_garde(mut self, n: usize) -> Self {
        self.chiffres_garde = n;
        self
    }

    pub fn with_chiffres_max(mut self, n: usize) -> Self {
        self.chiffres_max = n;
        self
    }

    pub fn with_exposant_max(mut self, n: u64) -> Self {
        self.exposant_max = n;
        self
    }

    pub fn with_chiffres_affichage(mut self, n: usize) -> Self {
        self.chiffres_affichage = n;
        self
    }
}
