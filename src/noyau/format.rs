// src/noyau/format.rs
//
// Affichage Unicode des résultats (fonction pure : Valeur -> texte).
// - fraction entière       : "3"
// - fraction “courante”     : glyphe (½, ¾, ⅞…), "-" devant si négative
// - sinon                   : exposant ⁄ indice (⁷⁄₁₂)
// - nombre                  : écriture décimale la plus courte, sans ".0", -0 -> 0

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::fraction::Fraction;
use super::valeur::Valeur;

/// Barre de fraction Unicode (U+2044).
const BARRE: char = '⁄';

/// Fractions ayant un glyphe dédié.
const GLYPHES: &[(u8, u8, char)] = &[
    (1, 2, '½'),
    (1, 3, '⅓'),
    (2, 3, '⅔'),
    (1, 4, '¼'),
    (3, 4, '¾'),
    (1, 5, '⅕'),
    (2, 5, '⅖'),
    (3, 5, '⅗'),
    (4, 5, '⅘'),
    (1, 6, '⅙'),
    (5, 6, '⅚'),
    (1, 7, '⅐'),
    (1, 8, '⅛'),
    (3, 8, '⅜'),
    (5, 8, '⅝'),
    (7, 8, '⅞'),
    (1, 9, '⅑'),
    (1, 10, '⅒'),
];

/* ------------------------ Helpers caractères ------------------------ */

fn exposant(c: char) -> char {
    match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        _ => c,
    }
}

fn indice(c: char) -> char {
    match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        _ => c,
    }
}

/// "12" -> "¹²". Les caractères sans forme exposant restent tels quels.
pub fn format_superscript(s: &str) -> String {
    s.chars().map(exposant).collect()
}

/// "12" -> "₁₂".
pub fn format_subscript(s: &str) -> String {
    s.chars().map(indice).collect()
}

/* ------------------------ Expressions ------------------------ */

/// Opérateurs ASCII -> notation mathématique (`*` -> `×`, `/` -> `÷`, `-` -> `−`).
pub fn format_expression(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => '×',
            '/' => '÷',
            '-' => '−',
            _ => c,
        })
        .collect()
}

/// Inverse de `format_expression` : le texte redevient saisissable au clavier.
pub fn to_alphanumeric(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            _ => c,
        })
        .collect()
}

/* ------------------------ Fractions ------------------------ */

fn glyphe(num: &BigInt, den: &BigInt) -> Option<char> {
    GLYPHES
        .iter()
        .find(|(n, d, _)| num == &BigInt::from(*n) && den == &BigInt::from(*d))
        .map(|(_, _, g)| *g)
}

/// num/den (déjà réduite, den > 0) : glyphe si possible, sinon ⁿ⁄ₐ.
pub fn format_fraction(num: &BigInt, den: &BigInt) -> String {
    if den.is_one() {
        return num.to_string();
    }

    let signe = if num.is_negative() { "-" } else { "" };
    let n = num.abs();

    match glyphe(&n, den) {
        Some(g) => format!("{signe}{g}"),
        None => format!(
            "{signe}{}{BARRE}{}",
            format_superscript(&n.to_string()),
            format_subscript(&den.to_string())
        ),
    }
}

/// Fraction “empilée” sur trois lignes (numérateur, barre, dénominateur), centrées.
pub fn format_fraction_stacked(num: &BigInt, den: &BigInt) -> String {
    let haut = num.to_string();
    let bas = den.to_string();
    let largeur = haut.chars().count().max(bas.chars().count());

    let centre = |s: &str| {
        let vide = largeur - s.chars().count();
        let gauche = vide / 2;
        format!("{}{s}{}", " ".repeat(gauche), " ".repeat(vide - gauche))
    };

    format!("{}\n{}\n{}", centre(&haut), "─".repeat(largeur), centre(&bas))
}

/// Nombre mixte : 3/2 -> "1½", 17/7 -> "2 ³⁄₇", -7/2 -> "-3½".
pub fn format_mixte(f: &Fraction) -> String {
    let (entier, num, den) = f.en_mixte();

    if num.is_zero() {
        return entier.to_string();
    }
    if entier.is_zero() {
        return format_fraction(&num, &den);
    }

    match glyphe(&num, &den) {
        Some(g) => format!("{entier}{g}"),
        None => format!("{entier} {}", format_fraction(&num, &den)),
    }
}

/* ------------------------ Résultat ------------------------ */

fn format_nombre(x: f64) -> String {
    if x == 0.0 {
        // -0 -> 0
        return "0".to_string();
    }
    format!("{x}")
}

/// Rendu d’un résultat pour affichage (ne modifie rien).
pub fn format(v: &Valeur) -> String {
    match v {
        Valeur::Nombre(x) => format_nombre(*x),
        Valeur::Fraction(f) => format_fraction(f.numer(), f.denom()),
    }
}
