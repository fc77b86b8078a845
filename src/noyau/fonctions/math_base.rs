// src/noyau/fonctions/math_base.rs
//
// Fonctions mathématiques de base.
// Les fractions restent exactes quand c’est possible (abs, floor, ceil, round, mod,
// gcd, lcm, max, min, pow à exposant entier et résultat de taille bornée) ; sqrt passe toujours en flottant.

use std::cmp::Ordering;

use log::debug;

use super::fractions::{arrondi_decimal, decimal_vers_nombre, PRECISION_MAX};
use super::{
    entier_arg, entier_borne, fraction_arg, nombre_arg, verifie_arite, verifie_arite_min,
};
use crate::noyau::config::BITS_EXACTS_MAX;
use crate::noyau::erreur::ErreurFonction;
use crate::noyau::fraction::{pgcd, ppcm, Fraction};
use crate::noyau::registre::Registre;
use crate::noyau::valeur::Valeur;

pub fn enregistrer(reg: &mut Registre) {
    reg.register("sqrt", sqrt);
    reg.register("pow", pow);
    reg.register("mod", modulo);
    reg.register("floor", |args: &[Valeur]| arrondi_entier("floor", args));
    reg.register("ceil", |args: &[Valeur]| arrondi_entier("ceil", args));
    reg.register("round", round);
    reg.register("gcd", gcd);
    reg.register("lcm", lcm);
    reg.register("abs", abs);
    reg.register("max", |args: &[Valeur]| extremum("max", args));
    reg.register("min", |args: &[Valeur]| extremum("min", args));
}

/// Résultat flottant : un non-fini devient une erreur d’argument.
fn fini(nom: &str, x: f64) -> Result<Valeur, ErreurFonction> {
    if x.is_finite() {
        Ok(Valeur::Nombre(x))
    } else {
        Err(ErreurFonction::Argument(format!("{nom} : résultat hors de portée")))
    }
}

pub fn sqrt(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 1)?;
    let x = nombre_arg(&args[0])?;
    if x < 0.0 {
        return Err(ErreurFonction::Argument(format!(
            "racine carrée d’un nombre négatif ({x})"
        )));
    }
    Ok(Valeur::Nombre(x.sqrt()))
}

pub fn pow(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 2)?;

    // base fraction + exposant entier raisonnable + résultat de taille bornée => exact
    if let Valeur::Fraction(base) = &args[0] {
        if let Ok(e) = entier_borne(&args[1], "l’exposant", -1024, 1024) {
            if bits_puissance(base, e) > BITS_EXACTS_MAX {
                debug!("pow : résultat exact trop grand, passage en flottant");
                return pow_flottant(&args[0], &args[1]);
            }
            let r = base
                .pow(e as i32)
                .map_err(|_| ErreurFonction::DivisionParZero)?;
            return Ok(Valeur::Fraction(r));
        }
    }

    pow_flottant(&args[0], &args[1])
}

/// Majorant de la taille (bits) du numérateur / dénominateur de base^e.
fn bits_puissance(base: &Fraction, e: i64) -> u64 {
    base.numer()
        .bits()
        .max(base.denom().bits())
        .saturating_mul(e.unsigned_abs())
}

fn pow_flottant(base: &Valeur, exposant: &Valeur) -> Result<Valeur, ErreurFonction> {
    let a = nombre_arg(base)?;
    let b = nombre_arg(exposant)?;
    if a == 0.0 && b < 0.0 {
        return Err(ErreurFonction::DivisionParZero);
    }
    fini("pow", a.powf(b))
}

/// Reste du signe du diviseur : mod(-7, 3) = 2, mod(7, -3) = -2.
pub fn modulo(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 2)?;

    if args.iter().any(Valeur::est_fraction) {
        let a = fraction_arg(&args[0])?;
        let b = fraction_arg(&args[1])?;
        let q = a.div(&b).map_err(|_| ErreurFonction::DivisionParZero)?;
        return Ok(Valeur::Fraction(a.sub(&b.mul(&q.floor()))));
    }

    let a = nombre_arg(&args[0])?;
    let b = nombre_arg(&args[1])?;
    if b == 0.0 {
        return Err(ErreurFonction::DivisionParZero);
    }
    let mut r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r += b;
    }
    fini("mod", r)
}

fn arrondi_entier(nom: &str, args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 1)?;
    match &args[0] {
        Valeur::Fraction(f) => Ok(Valeur::Fraction(match nom {
            "floor" => f.floor(),
            _ => f.ceil(),
        })),
        Valeur::Nombre(x) => Ok(Valeur::Nombre(match nom {
            "floor" => x.floor(),
            _ => x.ceil(),
        })),
    }
}

/// round(x) ou round(x, p) : même règle que dec (demi-cas loin de zéro), type conservé.
pub fn round(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    if args.len() != 1 && args.len() != 2 {
        return Err(ErreurFonction::Arite {
            attendu: "1 ou 2".into(),
            recu: args.len(),
        });
    }
    let p = match args.get(1) {
        Some(v) => entier_borne(v, "la précision", 0, PRECISION_MAX)?,
        None => 0,
    };
    let x = fraction_arg(&args[0])?;
    match &args[0] {
        Valeur::Fraction(_) => Ok(Valeur::Fraction(arrondi_decimal(&x, p as usize)?)),
        Valeur::Nombre(_) => decimal_vers_nombre(&x, p as usize),
    }
}

/// Résultat entier : fraction si l’un des arguments en est une, nombre sinon.
fn entier_resultat(args: &[Valeur], n: num_bigint::BigInt) -> Result<Valeur, ErreurFonction> {
    let f = Fraction::entier(n);
    if args.iter().any(Valeur::est_fraction) {
        return Ok(Valeur::Fraction(f));
    }
    f.to_f64()
        .map(Valeur::Nombre)
        .ok_or_else(|| ErreurFonction::Argument("résultat hors de portée flottante".into()))
}

pub fn gcd(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 2)?;
    let a = entier_arg(&args[0], "gcd : le premier argument")?;
    let b = entier_arg(&args[1], "gcd : le second argument")?;
    entier_resultat(args, pgcd(&a, &b))
}

pub fn lcm(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 2)?;
    let a = entier_arg(&args[0], "lcm : le premier argument")?;
    let b = entier_arg(&args[1], "lcm : le second argument")?;
    entier_resultat(args, ppcm(&a, &b))
}

pub fn abs(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 1)?;
    Ok(match &args[0] {
        Valeur::Nombre(x) => Valeur::Nombre(x.abs()),
        Valeur::Fraction(f) => Valeur::Fraction(f.abs()),
    })
}

/// max / min variadiques ; comparaison exacte dès qu’une fraction est présente.
/// L’argument retenu est renvoyé tel quel (type conservé).
fn extremum(nom: &str, args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite_min(args, 1)?;
    let exact = args.iter().any(Valeur::est_fraction);

    let mut meilleur = &args[0];
    for v in &args[1..] {
        let ordre = if exact {
            fraction_arg(v)?.cmp(&fraction_arg(meilleur)?)
        } else {
            nombre_arg(v)?
                .partial_cmp(&nombre_arg(meilleur)?)
                .unwrap_or(Ordering::Equal)
        };
        let remplace = match nom {
            "max" => ordre == Ordering::Greater,
            _ => ordre == Ordering::Less,
        };
        if remplace {
            meilleur = v;
        }
    }
    Ok(meilleur.clone())
}
