//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, racine d’un négatif…)
//! - invariant clé : un résultat Nombre est toujours fini, une Fraction toujours réduite

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_traits::One;

use super::erreur::{ErreurEval, ErreurFonction};
use super::fraction::pgcd;
use super::{eval_expression, format, Erreur, Limites, Registre, Valeur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Limites larges : le fuzz génère des expressions longues mais peu profondes.
fn limites_fuzz() -> Limites {
    Limites {
        longueur_max: 8192,
        profondeur_max: 64,
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &Erreur) -> bool {
    // Liste blanche : erreurs *normales* pour des expressions bien formées
    // mais aux valeurs arbitraires.
    match e {
        Erreur::Eval(ErreurEval::DivisionParZero) => true,
        Erreur::Eval(ErreurEval::Depassement) => true,
        Erreur::Eval(ErreurEval::Fonction { source, .. }) => {
            matches!(source, ErreurFonction::Argument(_))
        }
        _ => false,
    }
}

fn check_invariants(expr: &str, v: &Valeur) {
    match v {
        Valeur::Nombre(x) => assert!(x.is_finite(), "non fini: expr={expr:?} v={x}"),
        Valeur::Fraction(f) => {
            assert!(f.denom() > &BigInt::from(0), "dénominateur <= 0: expr={expr:?}");
            if !f.est_zero() {
                assert!(pgcd(f.numer(), f.denom()).is_one(), "non réduite: expr={expr:?}");
            }
        }
    }
    assert!(!format(v).is_empty(), "format vide: expr={expr:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_entier(rng: &mut Rng) -> u32 {
    rng.pick(10)
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => format!("{}", gen_entier(rng)),
        2 => format!("{}.{}", gen_entier(rng), rng.pick(100)),
        // dénominateur parfois nul : la division par zéro doit remonter proprement
        3 => format!("frac({}, {})", gen_entier(rng), rng.pick(6)),
        4 => format!("mixf({}, {}, {})", gen_entier(rng), gen_entier(rng), 1 + rng.pick(7)),
        _ => format!("-{}", gen_entier(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(11) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("sqrt({a})"),
        6 => format!("abs({a})"),
        7 => format!("dec({a}, {})", rng.pick(6)),
        8 => format!("max({a}, {})", gen_expr(rng, depth - 1)),
        9 => format!("floor({a})"),
        _ => {
            if rng.coin() {
                format!("-({a})")
            } else {
                format!("mod({a}, {})", gen_atom(rng))
            }
        }
    }
}

/// Bruit : caractères plausibles mélangés, souvent mal formés.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[&str] = &[
        "1", "2", ".", "+", "-", "*", "/", "(", ")", ",", " ", "frac", "dec", "x", "×", "$",
    ];
    let n = 1 + rng.pick(16) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let r = Registre::avec_fonctions();
    let limites = limites_fuzz();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let premier = eval_expression(&expr, &r, &limites);
        let second = eval_expression(&expr, &r, &limites);

        match premier {
            Ok(v) => {
                check_invariants(&expr, &v);
                assert_eq!(second.ok(), Some(v), "non déterministe: expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                assert!(second.is_err(), "non déterministe: expr={expr:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let r = Registre::avec_fonctions();

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        // seule exigence : une valeur bien formée OU une erreur structurée
        if let Ok(v) = eval_expression(&expr, &r, &Limites::default()) {
            check_invariants(&expr, &v);
        }
    }
}

#[test]
fn fuzz_safe_format_resaisissable() {
    // format_expression puis to_alphanumeric : même résultat qu’en ASCII
    use super::format::{format_expression, to_alphanumeric};

    let mut rng = Rng::new(0x5EED_u64);
    let r = Registre::avec_fonctions();
    let limites = limites_fuzz();

    for _ in 0..60 {
        let expr = gen_expr(&mut rng, 3);
        let unicode = format_expression(&expr);
        assert_eq!(to_alphanumeric(&unicode), expr);

        // le tokenizer accepte directement les glyphes
        let a = eval_expression(&expr, &r, &limites).ok();
        let b = eval_expression(&unicode, &r, &limites).ok();
        assert_eq!(a, b, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 800 termes, profondeur ~11 seulement
    let expr = somme_balancee("frac(1,2)", 800);
    let r = Registre::avec_fonctions();
    let limites = Limites {
        longueur_max: 32_768,
        profondeur_max: 64,
    };
    let v = eval_expression(&expr, &r, &limites).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(format(&v), "400");
}

#[test]
fn fuzz_safe_chaine_trop_profonde_refusee() {
    // 300 négations (longueur admise, profondeur non) : refus propre, sans débordement de pile
    let expr = format!("{}1", "-".repeat(300));
    let r = Registre::avec_fonctions();
    assert!(matches!(
        eval_expression(&expr, &r, &Limites::default()),
        Err(Erreur::Analyse(_))
    ));
}
