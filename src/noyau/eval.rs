//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> AST -> évaluation (registre) -> Valeur
//!
//! Chaque étage échoue vite : la première erreur arrête l’expression et remonte telle quelle.
//! Aucun état partagé n’est modifié pendant l’évaluation (le registre est seulement lu).

use log::debug;

use super::config::Limites;
use super::erreur::{Erreur, ErreurEval, ErreurFonction};
use super::expr::{Noeud, OpUnaire};
use super::jetons::{format_tokens, tokenize, Operateur};
use super::registre::{lire_registre, Registre};
use super::rpn::parse_borne;
use super::valeur::Valeur;

/// Évalue un AST. Les arguments sont évalués de gauche à droite, la gauche avant la droite.
pub fn evaluate(noeud: &Noeud, registre: &Registre) -> Result<Valeur, ErreurEval> {
    match noeud {
        Noeud::Nombre(v) => Ok(Valeur::Nombre(*v)),

        Noeud::Unaire(OpUnaire::Neg, x) => Ok(evaluate(x, registre)?.neg()),
        Noeud::Unaire(OpUnaire::Plus, x) => evaluate(x, registre),

        Noeud::Binaire(op, a, b) => {
            let va = evaluate(a, registre)?;
            let vb = evaluate(b, registre)?;
            match op {
                Operateur::Plus => va.add(&vb),
                Operateur::Moins => va.sub(&vb),
                Operateur::Fois => va.mul(&vb),
                Operateur::Divise => va.div(&vb),
            }
        }

        Noeud::Appel(nom, args) => {
            let valeurs = args
                .iter()
                .map(|a| evaluate(a, registre))
                .collect::<Result<Vec<_>, _>>()?;

            let f = registre
                .lookup(nom)
                .ok_or_else(|| ErreurEval::FonctionInconnue(nom.clone()))?;

            let v = f(&valeurs).map_err(|e| match e {
                ErreurFonction::DivisionParZero => ErreurEval::DivisionParZero,
                source => ErreurEval::Fonction {
                    nom: nom.clone(),
                    source,
                },
            })?;

            valide_resultat(nom, v)
        }
    }
}

/// Une extension doit renvoyer une valeur bien formée (pas d’inf / NaN).
/// Les fractions le sont par construction.
fn valide_resultat(nom: &str, v: Valeur) -> Result<Valeur, ErreurEval> {
    match v {
        Valeur::Nombre(x) if !x.is_finite() => Err(ErreurEval::ResultatInvalide {
            nom: nom.to_string(),
            detail: format!("{x}"),
        }),
        _ => Ok(v),
    }
}

/// API publique : expression -> Valeur, avec le registre et les limites donnés.
pub fn eval_expression(
    expr_str: &str,
    registre: &Registre,
    limites: &Limites,
) -> Result<Valeur, Erreur> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(Erreur::EntreeVide);
    }

    let longueur = s.chars().count();
    if longueur > limites.longueur_max {
        return Err(Erreur::EntreeTropLongue {
            longueur,
            max: limites.longueur_max,
        });
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    debug!("jetons: {}", format_tokens(&jetons));

    // 2) RPN -> AST (profondeur bornée)
    let ast = parse_borne(&jetons, limites.profondeur_max)?;
    debug!("ast: {ast}");

    // 3) Évaluation
    Ok(evaluate(&ast, registre)?)
}

/// Raccourci : registre global + limites par défaut.
pub fn evaluer(expr_str: &str) -> Result<Valeur, Erreur> {
    let registre = lire_registre();
    eval_expression(expr_str, &registre, &Limites::default())
}
