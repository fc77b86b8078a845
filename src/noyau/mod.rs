//! Noyau PCS (calculatrice d’expressions)
//!
//! Organisation interne :
//! - erreur.rs    : erreurs typées de chaque étage
//! - config.rs    : limites (longueur, profondeur), surchargeables par l’environnement
//! - fraction.rs  : rationnel exact, toujours réduit
//! - valeur.rs    : résultat d’évaluation (nombre | fraction) + promotion
//! - jetons.rs    : tokenisation
//! - expr.rs      : AST
//! - rpn.rs       : shunting-yard + construction de l’AST
//! - registre.rs  : nom -> implémentation (le dernier enregistré gagne)
//! - fonctions/   : modules d’extension (frac, mixf, dec, sqrt, pow…)
//! - eval.rs      : pipeline complet
//! - format.rs    : affichage Unicode (½, ⁷⁄₁₂, ×, ÷)

pub mod config;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod fraction;
pub mod jetons;
pub mod registre;
pub mod rpn;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use config::Limites;
pub use erreur::{Erreur, ErreurAnalyse, ErreurEval, ErreurFonction, ErreurLex};
pub use eval::{eval_expression, evaluate, evaluer};
pub use format::format;
pub use fraction::Fraction;
pub use registre::{ecrire_registre, lire_registre, Registre};
pub use valeur::Valeur;
