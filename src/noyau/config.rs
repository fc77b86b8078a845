//! Garde-fous du pipeline (anti-gel) : longueur d’entrée + profondeur d’AST.
//!
//! Valeurs par défaut raisonnables pour une saisie humaine ; surcharge possible
//! par variables d’environnement :
//! - PCS_LONGUEUR_MAX   (caractères)
//! - PCS_PROFONDEUR_MAX (niveaux d’AST)

use log::warn;

/// Longueur max d’une expression (caractères).
pub const LONGUEUR_MAX_DEFAUT: usize = 512;

/// Profondeur max de l’AST (borne la récursion de l’évaluateur).
/// Une somme à plat "1+1+…" de longueur_max caractères fait longueur_max / 2 niveaux :
/// toute saisie de longueur admise sans imbrication passe donc.
pub const PROFONDEUR_MAX_DEFAUT: usize = LONGUEUR_MAX_DEFAUT / 2;

/// Taille max (en bits) d’un numérateur / dénominateur produit par une puissance exacte.
/// Au-delà, pow repasse en flottant.
pub const BITS_EXACTS_MAX: u64 = 1 << 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    pub longueur_max: usize,
    pub profondeur_max: usize,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX_DEFAUT,
            profondeur_max: PROFONDEUR_MAX_DEFAUT,
        }
    }
}

impl Limites {
    /// Défauts, surchargés par l’environnement si les valeurs sont lisibles.
    pub fn depuis_env() -> Self {
        Self::depuis(|cle| std::env::var(cle).ok())
    }

    /// Même chose, avec une source de variables injectable (tests).
    pub fn depuis(lire: impl Fn(&str) -> Option<String>) -> Self {
        let mut l = Self::default();
        if let Some(v) = lire_usize(&lire, "PCS_LONGUEUR_MAX") {
            l.longueur_max = v;
        }
        if let Some(v) = lire_usize(&lire, "PCS_PROFONDEUR_MAX") {
            l.profondeur_max = v;
        }
        l
    }
}

fn lire_usize(lire: &impl Fn(&str) -> Option<String>, cle: &str) -> Option<usize> {
    let brut = lire(cle)?;
    match brut.trim().parse::<usize>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            warn!("{cle}={brut:?} ignoré (entier > 0 attendu)");
            None
        }
    }
}
