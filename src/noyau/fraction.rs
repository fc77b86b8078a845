// src/noyau/fraction.rs
//
// Fraction exacte (sans flottants).
// - stockée réduite, dénominateur > 0, signe sur le numérateur
// - immuable : chaque opération renvoie une nouvelle Fraction
// - égalité / ordre exacts (produit en croix via BigRational)
//
// Le passage nombre -> Fraction se fait par l’écriture décimale la plus courte
// du flottant : 0.1 -> 1/10 (et non 3602879701896397/36028797018963968).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(BigRational);

impl Fraction {
    /// num/den réduite. Dénominateur nul => division par zéro.
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Fraction, ErreurEval> {
        let den = den.into();
        if den.is_zero() {
            return Err(ErreurEval::DivisionParZero);
        }
        Ok(Fraction(BigRational::new(num.into(), den)))
    }

    pub fn entier(n: impl Into<BigInt>) -> Fraction {
        Fraction(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Fraction {
        Fraction(BigRational::zero())
    }

    pub fn un() -> Fraction {
        Fraction(BigRational::one())
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /// Normalisation explicite (idempotente : une Fraction est toujours réduite).
    pub fn reduce(&self) -> Fraction {
        Fraction(BigRational::new(self.numer().clone(), self.denom().clone()))
    }

    /* ------------------------ Arithmétique ------------------------ */

    pub fn add(&self, b: &Fraction) -> Fraction {
        Fraction(&self.0 + &b.0)
    }

    pub fn sub(&self, b: &Fraction) -> Fraction {
        Fraction(&self.0 - &b.0)
    }

    pub fn mul(&self, b: &Fraction) -> Fraction {
        Fraction(&self.0 * &b.0)
    }

    pub fn div(&self, b: &Fraction) -> Result<Fraction, ErreurEval> {
        if b.est_zero() {
            return Err(ErreurEval::DivisionParZero);
        }
        Ok(Fraction(&self.0 / &b.0))
    }

    pub fn neg(&self) -> Fraction {
        Fraction(-&self.0)
    }

    pub fn abs(&self) -> Fraction {
        Fraction(self.0.abs())
    }

    pub fn floor(&self) -> Fraction {
        Fraction(self.0.floor())
    }

    pub fn ceil(&self) -> Fraction {
        Fraction(self.0.ceil())
    }

    /// Arrondi à l’entier, demi-cas loin de zéro (2.5 -> 3, -2.5 -> -3).
    pub fn round(&self) -> Fraction {
        Fraction(self.0.round())
    }

    /// Puissance entière (exposant négatif => inverse, 0^-n => division par zéro).
    pub fn pow(&self, exp: i32) -> Result<Fraction, ErreurEval> {
        if exp < 0 && self.est_zero() {
            return Err(ErreurEval::DivisionParZero);
        }
        Ok(Fraction(num_traits::Pow::pow(&self.0, exp)))
    }

    /* ------------------------ Tests ------------------------ */

    pub fn est_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn est_entier(&self) -> bool {
        self.0.is_integer()
    }

    pub fn est_negatif(&self) -> bool {
        self.0.is_negative()
    }

    /* ------------------------ Conversions ------------------------ */

    /// Valeur flottante la plus proche (None si hors de portée f64).
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64().filter(|x| x.is_finite())
    }

    /// Flottant -> Fraction exacte de son écriture décimale la plus courte.
    /// None si NaN ou infini.
    pub fn depuis_f64(x: f64) -> Option<Fraction> {
        if !x.is_finite() {
            return None;
        }

        // Display f64 : jamais de notation scientifique, plus courte écriture fidèle.
        let texte = format!("{}", x.abs());
        let (ent, dec) = match texte.split_once('.') {
            Some((e, d)) => (e, d),
            None => (texte.as_str(), ""),
        };

        let chiffres = format!("{ent}{dec}");
        let mut num = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
        if x.is_sign_negative() {
            num = -num;
        }
        let den = BigInt::from(10).pow(dec.len() as u32);
        Some(Fraction(BigRational::new(num, den)))
    }

    /// Décomposition en nombre mixte : (entier, numérateur, dénominateur).
    /// Le signe est porté par la partie entière, ou par le numérateur si elle est nulle.
    /// Ex: -7/2 -> (-3, 1, 2) ; -1/2 -> (0, -1, 2)
    pub fn en_mixte(&self) -> (BigInt, BigInt, BigInt) {
        let den = self.denom().clone();
        let abs_num = self.numer().abs();
        let mut entier = &abs_num / &den;
        let mut reste = &abs_num % &den;

        if self.est_negatif() {
            if entier.is_zero() {
                reste = -reste;
            } else {
                entier = -entier;
            }
        }
        (entier, reste, den)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom().is_one() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

/// PGCD d’entiers (Euclide), toujours >= 0.
pub fn pgcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// PPCM d’entiers, 0 si l’un des deux est nul.
pub fn ppcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b).abs() / pgcd(a, b)
}
