//! Fonctions enregistrables (extensions du registre).
//!
//! Chaque module expose `enregistrer(&mut Registre)` :
//! - fractions.rs : frac, mixf, dec (fonctions du noyau)
//! - math_base.rs : sqrt, pow, mod, floor, ceil, round, gcd, lcm, abs, max, min
//!
//! `charger_fonctions` parcourt la table `MODULES` dans l’ordre : un module plus bas
//! dans la table peut redéfinir un nom d’un module plus haut (le dernier gagne).

use log::info;
use num_bigint::BigInt;

use super::erreur::ErreurFonction;
use super::fraction::Fraction;
use super::registre::Registre;
use super::valeur::Valeur;

pub mod fractions;
pub mod math_base;

/// Modules d’extension, dans l’ordre de chargement.
const MODULES: &[(&str, fn(&mut Registre))] = &[
    ("fractions", fractions::enregistrer),
    ("math_base", math_base::enregistrer),
];

/// Charge toutes les fonctions d’extension dans `reg`.
pub fn charger_fonctions(reg: &mut Registre) {
    for (nom, enregistrer) in MODULES {
        let avant = reg.len();
        enregistrer(reg);
        info!("module '{nom}' chargé ({} fonction(s))", reg.len() - avant);
    }
}

/* ------------------------ Helpers pour les implémentations ------------------------ */

pub(crate) fn verifie_arite(args: &[Valeur], attendu: usize) -> Result<(), ErreurFonction> {
    if args.len() != attendu {
        return Err(ErreurFonction::Arite {
            attendu: attendu.to_string(),
            recu: args.len(),
        });
    }
    Ok(())
}

pub(crate) fn verifie_arite_min(args: &[Valeur], min: usize) -> Result<(), ErreurFonction> {
    if args.len() < min {
        return Err(ErreurFonction::Arite {
            attendu: format!("au moins {min}"),
            recu: args.len(),
        });
    }
    Ok(())
}

/// Lecture flottante d’un argument.
pub(crate) fn nombre_arg(v: &Valeur) -> Result<f64, ErreurFonction> {
    v.to_f64()
        .map_err(|_| ErreurFonction::Argument(format!("{v} hors de portée flottante")))
}

/// Lecture exacte d’un argument (nombre promu en fraction).
pub(crate) fn fraction_arg(v: &Valeur) -> Result<Fraction, ErreurFonction> {
    v.to_fraction()
        .map_err(|_| ErreurFonction::Argument(format!("{v} n’est pas un nombre fini")))
}

/// Argument entier (3, 3.0 ou frac(6, 2)).
pub(crate) fn entier_arg(v: &Valeur, quoi: &str) -> Result<BigInt, ErreurFonction> {
    let f = fraction_arg(v)?;
    if !f.est_entier() {
        return Err(ErreurFonction::Argument(format!(
            "{quoi} doit être entier (reçu {v})"
        )));
    }
    Ok(f.numer().clone())
}

/// Argument entier borné dans [min, max].
pub(crate) fn entier_borne(v: &Valeur, quoi: &str, min: i64, max: i64) -> Result<i64, ErreurFonction> {
    let n = entier_arg(v, quoi)?;
    match i64::try_from(&n) {
        Ok(k) if (min..=max).contains(&k) => Ok(k),
        _ => Err(ErreurFonction::Argument(format!(
            "{quoi} doit être compris entre {min} et {max} (reçu {v})"
        ))),
    }
}
