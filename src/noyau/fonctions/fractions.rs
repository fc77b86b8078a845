// src/noyau/fonctions/fractions.rs
//
// Fonctions du noyau :
// - frac(a, b)          : fraction exacte a/b (a, b nombres ou fractions)
// - mixf(e, n, d)       : nombre mixte e n/d, signe porté par la partie entière
// - dec(x, p)           : arrondi décimal à p chiffres -> nombre (jamais une fraction)
//
// Règle d’arrondi de dec : demi-cas LOIN DE ZÉRO, appliqué à la valeur exacte
// (fraction telle quelle, ou écriture décimale la plus courte d’un flottant).
//   dec(0.125, 2) = 0.13 ; dec(-0.125, 2) = -0.13 ; dec(2.675, 2) = 2.68

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::{entier_arg, entier_borne, fraction_arg, verifie_arite};
use crate::noyau::erreur::ErreurFonction;
use crate::noyau::fraction::Fraction;
use crate::noyau::registre::Registre;
use crate::noyau::valeur::Valeur;

/// Précision max de dec / round (au-delà, f64 ne distingue plus rien).
pub const PRECISION_MAX: i64 = 15;

pub fn enregistrer(reg: &mut Registre) {
    reg.register("frac", frac);
    reg.register("mixf", mixf);
    reg.register("dec", dec);
}

/// Vers ErreurFonction : seule la division par zéro peut sortir de l’arithmétique Fraction.
fn div_exacte(a: &Fraction, b: &Fraction) -> Result<Fraction, ErreurFonction> {
    a.div(b).map_err(|_| ErreurFonction::DivisionParZero)
}

pub fn frac(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 2)?;
    let a = fraction_arg(&args[0])?;
    let b = fraction_arg(&args[1])?;
    Ok(Valeur::Fraction(div_exacte(&a, &b)?))
}

pub fn mixf(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 3)?;
    let entier = entier_arg(&args[0], "la partie entière")?;
    let num = entier_arg(&args[1], "le numérateur")?;
    let den = entier_arg(&args[2], "le dénominateur")?;

    let partie = div_exacte(&Fraction::entier(num.abs()), &Fraction::entier(den.abs()))?;

    // 0 n/d : le signe vient de n/d lui-même
    if entier.is_zero() {
        let signe = (num.is_negative()) != (den.is_negative());
        let r = if signe { partie.neg() } else { partie };
        return Ok(Valeur::Fraction(r));
    }

    let total = Fraction::entier(entier.abs()).add(&partie);
    let r = if entier.is_negative() { total.neg() } else { total };
    Ok(Valeur::Fraction(r))
}

pub fn dec(args: &[Valeur]) -> Result<Valeur, ErreurFonction> {
    verifie_arite(args, 2)?;
    let x = fraction_arg(&args[0])?;
    let p = entier_borne(&args[1], "la précision", 0, PRECISION_MAX)?;
    decimal_vers_nombre(&x, p as usize)
}

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// x arrondi à `chiffres` décimales, demi-cas loin de zéro, en entier “scalé” (×10^chiffres).
fn arrondi_scale(x: &Fraction, chiffres: usize) -> BigInt {
    let echelle = Fraction::entier(pow10(chiffres));
    x.mul(&echelle).round().numer().clone()
}

/// x arrondi à `chiffres` décimales, résultat exact.
pub(crate) fn arrondi_decimal(x: &Fraction, chiffres: usize) -> Result<Fraction, ErreurFonction> {
    Fraction::new(arrondi_scale(x, chiffres), pow10(chiffres))
        .map_err(|_| ErreurFonction::DivisionParZero)
}

/// x arrondi à `chiffres` décimales, puis lu comme flottant depuis son texte décimal
/// (le flottant le plus proche de l’écriture arrondie : dec(3.14159, 2) == 3.14).
pub(crate) fn decimal_vers_nombre(x: &Fraction, chiffres: usize) -> Result<Valeur, ErreurFonction> {
    let texte = scaled_to_decimal(arrondi_scale(x, chiffres), chiffres);
    match texte.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Valeur::Nombre(v)),
        _ => Err(ErreurFonction::Argument(format!(
            "{texte} hors de portée flottante"
        ))),
    }
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;
    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }
    format!("{signe}{int_part}.{frac}")
}
