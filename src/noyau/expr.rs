// src/noyau/expr.rs
//
// AST d’une expression.
// - construit une seule fois (rpn::from_rpn), jamais modifié ensuite
// - chaque noeud possède ses enfants (Box / Vec) : arbre acyclique
// - les parenthèses ne produisent pas de noeud

use std::fmt;

use super::jetons::Operateur;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Plus,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Nombre(f64),
    Unaire(OpUnaire, Box<Noeud>),
    Binaire(Operateur, Box<Noeud>, Box<Noeud>),
    Appel(String, Vec<Noeud>),
}

impl Noeud {
    pub fn binaire(op: Operateur, a: Noeud, b: Noeud) -> Noeud {
        Noeud::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn unaire(op: OpUnaire, x: Noeud) -> Noeud {
        Noeud::Unaire(op, Box::new(x))
    }
}

/// Forme entièrement parenthésée (journal / tests de précédence).
impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noeud::Nombre(x) => write!(f, "{x}"),
            Noeud::Unaire(OpUnaire::Neg, x) => write!(f, "(-{x})"),
            Noeud::Unaire(OpUnaire::Plus, x) => write!(f, "(+{x})"),
            Noeud::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Noeud::Appel(nom, args) => {
                write!(f, "{nom}(")?;
                for (k, a) in args.iter().enumerate() {
                    if k > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
