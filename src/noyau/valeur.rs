// src/noyau/valeur.rs
//
// Résultat d’évaluation : nombre flottant OU fraction exacte.
//
// Règle de promotion : dès qu’un opérande est une Fraction, l’autre est converti
// (écriture décimale exacte, 3 -> 3/1, 0.5 -> 1/2) et le résultat est une Fraction réduite.

use std::fmt;

use super::erreur::ErreurEval;
use super::fraction::Fraction;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Nombre(f64),
    Fraction(Fraction),
}

impl Valeur {
    pub fn est_fraction(&self) -> bool {
        matches!(self, Valeur::Fraction(_))
    }

    /// Lecture flottante (Fraction -> approximation f64).
    pub fn to_f64(&self) -> Result<f64, ErreurEval> {
        match self {
            Valeur::Nombre(x) => Ok(*x),
            Valeur::Fraction(f) => f.to_f64().ok_or(ErreurEval::Depassement),
        }
    }

    /// Vue exacte : Fraction telle quelle, nombre promu.
    pub fn to_fraction(&self) -> Result<Fraction, ErreurEval> {
        match self {
            Valeur::Nombre(x) => Fraction::depuis_f64(*x).ok_or(ErreurEval::Depassement),
            Valeur::Fraction(f) => Ok(f.clone()),
        }
    }

    pub fn neg(&self) -> Valeur {
        match self {
            Valeur::Nombre(x) => Valeur::Nombre(-x),
            Valeur::Fraction(f) => Valeur::Fraction(f.neg()),
        }
    }

    pub fn add(&self, b: &Valeur) -> Result<Valeur, ErreurEval> {
        combine(self, b, |x, y| Ok(x + y), |p, q| Ok(p.add(q)))
    }

    pub fn sub(&self, b: &Valeur) -> Result<Valeur, ErreurEval> {
        combine(self, b, |x, y| Ok(x - y), |p, q| Ok(p.sub(q)))
    }

    pub fn mul(&self, b: &Valeur) -> Result<Valeur, ErreurEval> {
        combine(self, b, |x, y| Ok(x * y), |p, q| Ok(p.mul(q)))
    }

    pub fn div(&self, b: &Valeur) -> Result<Valeur, ErreurEval> {
        combine(
            self,
            b,
            |x, y| {
                if y == 0.0 {
                    Err(ErreurEval::DivisionParZero)
                } else {
                    Ok(x / y)
                }
            },
            |p, q| p.div(q),
        )
    }
}

/// Opération binaire avec promotion vers Fraction si l’un des deux en est une.
/// Côté flottant : un résultat non fini est refusé (jamais d’inf / NaN silencieux).
fn combine(
    a: &Valeur,
    b: &Valeur,
    op_nombre: impl Fn(f64, f64) -> Result<f64, ErreurEval>,
    op_fraction: impl Fn(&Fraction, &Fraction) -> Result<Fraction, ErreurEval>,
) -> Result<Valeur, ErreurEval> {
    match (a, b) {
        (Valeur::Nombre(x), Valeur::Nombre(y)) => {
            let r = op_nombre(*x, *y)?;
            if !r.is_finite() {
                return Err(ErreurEval::Depassement);
            }
            Ok(Valeur::Nombre(r))
        }
        _ => {
            let p = a.to_fraction()?;
            let q = b.to_fraction()?;
            Ok(Valeur::Fraction(op_fraction(&p, &q)?))
        }
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Nombre(x) => write!(f, "{x}"),
            Valeur::Fraction(r) => write!(f, "{r}"),
        }
    }
}
