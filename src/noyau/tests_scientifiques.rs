//! Tests scientifiques (campagne) : invariants des fractions + cohérence du pipeline.
//!
//! But : vérifier les lois de l’arithmétique exacte sur une grille bornée,
//! puis que le pipeline complet les respecte, sans faire chauffer la machine.
//! - grilles petites et déterministes
//! - budget temps global sur les tests de charge

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_traits::One;

use super::fraction::{pgcd, Fraction};
use super::{eval_expression, Erreur, ErreurEval, Limites, Registre, Valeur};

fn eval_ok(expr: &str) -> Valeur {
    let r = Registre::avec_fonctions();
    eval_expression(expr, &r, &Limites::default())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn fr(a: i64, b: i64) -> Fraction {
    Fraction::new(a, b).unwrap()
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Grille de fractions : n/d pour n dans [-6, 6], d dans [-4, 4] \ {0}.
fn grille() -> Vec<Fraction> {
    let mut out = Vec::new();
    for n in -6..=6 {
        for d in -4..=4 {
            if d != 0 {
                out.push(fr(n, d));
            }
        }
    }
    out
}

/* ------------------------ Forme canonique ------------------------ */

#[test]
fn sci_forme_canonique() {
    for f in grille() {
        assert!(f.denom() > &BigInt::from(0), "dénominateur positif: {f}");
        if f.est_zero() {
            assert!(f.denom().is_one(), "0 s’écrit 0/1: {f:?}");
        } else {
            assert!(pgcd(f.numer(), f.denom()).is_one(), "non réduite: {f}");
        }
        // réduire une fraction déjà réduite ne change rien
        assert_eq!(f.reduce(), f);
    }
}

#[test]
fn sci_egalite_structurelle() {
    // 2/4, -1/-2, 3/6 : même valeur => même représentation
    assert_eq!(fr(2, 4), fr(1, 2));
    assert_eq!(fr(-1, -2), fr(1, 2));
    assert_eq!(fr(1, -2), fr(-1, 2));
    assert_eq!(format!("{}", fr(6, -4)), "-3/2");
}

/* ------------------------ Lois de l’addition / multiplication ------------------------ */

#[test]
fn sci_neutres() {
    let zero = Fraction::zero();
    let un = Fraction::un();
    for f in grille() {
        assert_eq!(f.add(&zero), f);
        assert_eq!(f.mul(&un), f);
        assert_eq!(f.sub(&f), zero);
    }
}

#[test]
fn sci_commutativite() {
    let g = grille();
    for a in &g {
        for b in &g {
            assert_eq!(a.add(b), b.add(a));
            assert_eq!(a.mul(b), b.mul(a));
        }
    }
}

#[test]
fn sci_associativite() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let g: Vec<Fraction> = grille().into_iter().step_by(5).collect();
    for a in &g {
        for b in &g {
            for c in &g {
                assert_eq!(a.add(b).add(c), a.add(&b.add(c)));
                assert_eq!(a.mul(b).mul(c), a.mul(&b.mul(c)));
            }
        }
        budget(t0, max);
    }
}

#[test]
fn sci_inverse() {
    for f in grille() {
        if f.est_zero() {
            assert!(Fraction::un().div(&f).is_err());
            continue;
        }
        let inv = Fraction::un().div(&f).unwrap();
        assert_eq!(f.mul(&inv), Fraction::un());
        assert_eq!(f.div(&f).unwrap(), Fraction::un());
    }
}

#[test]
fn sci_mixte_recompose() {
    // en_mixte puis recomposition = identité
    for f in grille() {
        let (e, n, d) = f.en_mixte();
        let partie = Fraction::new(n, d).unwrap();
        let e = Fraction::entier(e);
        let recompose = if e.est_zero() {
            partie
        } else if e.est_negatif() {
            e.sub(&partie)
        } else {
            e.add(&partie)
        };
        assert_eq!(recompose, f, "en_mixte({f})");
    }
}

/* ------------------------ Pipeline : exactitude ------------------------ */

#[test]
fn sci_pas_de_derive_flottante() {
    // en flottant, 0.1 + 0.2 != 0.3 ; en fraction, c’est exact
    assert_ne!(eval_ok("0.1 + 0.2"), Valeur::Nombre(0.3));
    assert_eq!(
        eval_ok("frac(1, 10) + frac(2, 10)"),
        Valeur::Fraction(fr(3, 10))
    );
    assert_eq!(
        eval_ok("frac(1, 3) + frac(1, 3) + frac(1, 3)"),
        Valeur::Fraction(fr(1, 1))
    );
    // la promotion lit l’écriture décimale : 0.1 -> 1/10
    assert_eq!(eval_ok("frac(0, 1) + 0.1"), Valeur::Fraction(fr(1, 10)));
}

#[test]
fn sci_mixf_grille() {
    for e in -3i64..=3 {
        for n in 0i64..4 {
            for d in 1i64..5 {
                let v = eval_ok(&format!("mixf({e}, {n}, {d})"));
                let partie = fr(n, d);
                let entier = Fraction::entier(e.abs());
                let attendu = if e < 0 {
                    entier.add(&partie).neg()
                } else {
                    entier.add(&partie)
                };
                assert_eq!(v, Valeur::Fraction(attendu), "mixf({e}, {n}, {d})");
            }
        }
    }
}

#[test]
fn sci_dec_idempotent() {
    for x in ["3.14159", "2.675", "-0.125", "frac(22, 7)", "1 / 3", "1000.0005"] {
        for p in 0..6 {
            let une = eval_ok(&format!("dec({x}, {p})"));
            let deux = eval_ok(&format!("dec(dec({x}, {p}), {p})"));
            assert_eq!(une, deux, "dec({x}, {p})");
            assert!(!une.est_fraction());
        }
    }
}

#[test]
fn sci_division_par_zero_partout() {
    let r = Registre::avec_fonctions();
    for s in [
        "1 / 0",
        "frac(1, 0)",
        "frac(1, 2) / frac(0, 3)",
        "mixf(1, 1, 0)",
        "mod(frac(1, 2), 0)",
        "pow(0, -2)",
        "2 * (1 / (3 - 3))",
    ] {
        assert!(
            matches!(
                eval_expression(s, &r, &Limites::default()),
                Err(Erreur::Eval(ErreurEval::DivisionParZero))
            ),
            "{s}"
        );
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_fractions() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 80 termes : chaîne gauche de profondeur ~80, donc limites élargies
    let expr = vec!["frac(1,2)"; 80].join(" + ");
    let limites = Limites {
        longueur_max: 4096,
        profondeur_max: 128,
    };
    let r = Registre::avec_fonctions();
    let v = eval_expression(&expr, &r, &limites).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v, Valeur::Fraction(fr(40, 1)));
}

#[test]
fn sci_stress_grands_entiers() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // (2/3)^200 : numérateur et dénominateur de ~100 chiffres, exacts
    let v = eval_ok("pow(frac(2, 3), 200)");
    budget(t0, max);

    let attendu = Fraction::new(BigInt::from(2).pow(200u32), BigInt::from(3).pow(200u32)).unwrap();
    assert_eq!(v, Valeur::Fraction(attendu));
}

#[test]
fn sci_stress_puissances_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(1);

    // le résultat exact ferait des millions de bits : refus rapide, pas de calcul géant
    let r = Registre::avec_fonctions();
    for expr in [
        "pow(pow(frac(7, 3), 1024), 1024)",
        "pow(pow(pow(frac(7, 3), 1024), 1024), 1024)",
    ] {
        match eval_expression(expr, &r, &Limites::default()) {
            Err(Erreur::Eval(ErreurEval::Fonction { .. })) => {}
            autre => panic!("expr={expr:?} : attendu une erreur de fonction, obtenu {autre:?}"),
        }
        budget(t0, max);
    }
}
