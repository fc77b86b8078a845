// src/noyau/jetons.rs

use super::erreur::ErreurLex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Ident(String),
    Op(Operateur),
    LPar,
    RPar,
    Virgule,
    Fin,
}

/// Jeton + texte brut + position (en caractères) dans la source.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub texte: String,
    pub position: usize,
}

impl Jeton {
    fn new(tok: Tok, texte: impl Into<String>, position: usize) -> Self {
        Self {
            tok,
            texte: texte.into(),
            position,
        }
    }

    pub fn est_fin(&self) -> bool {
        matches!(self.tok, Tok::Fin)
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers et décimaux (ex: 12, 3.14, 3., .5), sans exposant
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
/// - opérateurs + - * / (et leurs formes unicode × ÷ −)
/// - parenthèses ( ) et virgule
///
/// Le signe n’est jamais collé au nombre : "-5" donne Op(Moins), Num(5).
/// La suite se termine toujours par Tok::Fin.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurLex> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Ponctuation + opérateurs (un caractère)
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Op(Operateur::Plus)),
            '-' | '−' => Some(Tok::Op(Operateur::Moins)),
            '*' | '×' => Some(Tok::Op(Operateur::Fois)),
            '/' | '÷' => Some(Tok::Op(Operateur::Divise)),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton::new(tok, c.to_string(), i));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Jeton::new(Tok::Ident(word.clone()), word, start));
            continue;
        }

        // Nombre : chiffres [ '.' chiffres ] ou '.' chiffres
        let debut_point = c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || debut_point {
            let start = i;
            let mut vu_point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if vu_point {
                        // "1.2.3" : le second point est refusé
                        return Err(ErreurLex::CaractereInattendu {
                            car: '.',
                            position: i,
                        });
                    }
                    vu_point = true;
                }
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            // un littéral trop long pour f64 (inf) est refusé ici
            let v = match texte.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(ErreurLex::NombreInvalide {
                        texte,
                        position: start,
                    })
                }
            };
            out.push(Jeton::new(Tok::Num(v), texte, start));
            continue;
        }

        return Err(ErreurLex::CaractereInattendu { car: c, position: i });
    }

    out.push(Jeton::new(Tok::Fin, "", chars.len()));
    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    tokens
        .iter()
        .filter(|j| !j.est_fin())
        .map(|j| j.texte.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
