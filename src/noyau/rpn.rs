// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix), en validant la syntaxe au passage
// - Puis reconstruire l’AST (Noeud), de façon itérative (pas de récursion)
//
// Précédences (faible -> forte):
//   + -  (binaires, gauche)
//   * /  (binaires, gauche)
//   - +  (unaires préfixes, droite ; plus fort que * et /)
//   nombre, ( expr ), appel f(a, b, ...)
//
// Règles:
// - `attend_valeur` dit si la position courante attend un opérande :
//     - un '-' / '+' à cette position est unaire
//     - un nombre / '(' / identifiant hors de cette position est une erreur (ex: "2 3")
// - Ident(name) doit être suivi de '(' : la paire ouvre un appel, dont on compte les virgules
// - La suite doit finir par Tok::Fin ; tout doit être consommé.

use log::debug;

use super::config::PROFONDEUR_MAX_DEFAUT;
use super::erreur::ErreurAnalyse;
use super::expr::{Noeud, OpUnaire};
use super::jetons::{Jeton, Operateur, Tok};

#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Num(f64),
    Binaire(Operateur),
    Unaire(OpUnaire),
    Appel { nom: String, nb_args: usize },
}

/// Pile d’opérateurs du shunting-yard.
#[derive(Debug)]
enum Pile {
    Binaire(Operateur),
    Unaire(OpUnaire),
    // '(' ; si c’est l’ouverture d’un appel : (nom, virgules vues)
    Paren { appel: Option<(String, usize)> },
}

fn precedence(op: Operateur) -> i32 {
    match op {
        Operateur::Plus | Operateur::Moins => 1,
        Operateur::Fois | Operateur::Divise => 2,
    }
}

fn inattendu(j: &Jeton) -> ErreurAnalyse {
    ErreurAnalyse::JetonInattendu {
        texte: j.texte.clone(),
        position: j.position,
    }
}

fn operande_attendu(j: &Jeton) -> ErreurAnalyse {
    ErreurAnalyse::OperandeAttendu {
        texte: j.texte.clone(),
        position: j.position,
    }
}

/// Dépile vers la sortie tout ce qui lie au moins aussi fort qu’un binaire de précédence `p`
/// (gauche-associatif). Les unaires sortent toujours. Bloqué par '('.
fn depile_operateurs(ops: &mut Vec<Pile>, out: &mut Vec<ElemRpn>, p: i32) {
    while let Some(top) = ops.last() {
        let doit_pop = match top {
            Pile::Unaire(_) => true,
            Pile::Binaire(op) => precedence(*op) >= p,
            Pile::Paren { .. } => false,
        };
        if !doit_pop {
            break;
        }
        match ops.pop() {
            Some(Pile::Unaire(u)) => out.push(ElemRpn::Unaire(u)),
            Some(Pile::Binaire(op)) => out.push(ElemRpn::Binaire(op)),
            _ => break,
        }
    }
}

/// Dépile jusqu’à la '(' la plus proche (non retirée).
fn vide_jusqua_paren(ops: &mut Vec<Pile>, out: &mut Vec<ElemRpn>) {
    depile_operateurs(ops, out, i32::MIN);
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: frac ( 1 , 2 ) + 3
///   rpn:    1 2 frac/2 3 +
pub fn to_rpn(tokens: &[Jeton]) -> Result<Vec<ElemRpn>, ErreurAnalyse> {
    if !tokens.last().is_some_and(Jeton::est_fin) {
        return Err(ErreurAnalyse::SansFin);
    }

    let mut out: Vec<ElemRpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();
    let mut attend_valeur = true;
    let mut i = 0;

    while i < tokens.len() {
        let j = &tokens[i];

        match &j.tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(inattendu(j));
                }
                out.push(ElemRpn::Num(*v));
                attend_valeur = false;
            }

            Tok::Ident(nom) => {
                if !attend_valeur {
                    return Err(inattendu(j));
                }
                if !matches!(tokens.get(i + 1).map(|t| &t.tok), Some(Tok::LPar)) {
                    return Err(ErreurAnalyse::IdentifiantSansAppel {
                        nom: nom.clone(),
                        position: j.position,
                    });
                }
                ops.push(Pile::Paren {
                    appel: Some((nom.clone(), 0)),
                });
                // '(' consommée avec le nom
                i += 1;
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(inattendu(j));
                }
                ops.push(Pile::Paren { appel: None });
            }

            Tok::Op(op) => {
                if attend_valeur {
                    match op {
                        Operateur::Moins => ops.push(Pile::Unaire(OpUnaire::Neg)),
                        Operateur::Plus => ops.push(Pile::Unaire(OpUnaire::Plus)),
                        Operateur::Fois | Operateur::Divise => return Err(operande_attendu(j)),
                    }
                } else {
                    depile_operateurs(&mut ops, &mut out, precedence(*op));
                    ops.push(Pile::Binaire(*op));
                    attend_valeur = true;
                }
            }

            Tok::Virgule => {
                if attend_valeur {
                    return Err(operande_attendu(j));
                }
                vide_jusqua_paren(&mut ops, &mut out);
                match ops.last_mut() {
                    Some(Pile::Paren {
                        appel: Some((_, virgules)),
                    }) => *virgules += 1,
                    _ => {
                        return Err(ErreurAnalyse::VirguleHorsAppel {
                            position: j.position,
                        })
                    }
                }
                attend_valeur = true;
            }

            Tok::RPar => {
                if attend_valeur {
                    // seul cas permis : appel sans argument "f()"
                    match ops.pop() {
                        Some(Pile::Paren {
                            appel: Some((nom, 0)),
                        }) => {
                            out.push(ElemRpn::Appel { nom, nb_args: 0 });
                            attend_valeur = false;
                            i += 1;
                            continue;
                        }
                        Some(Pile::Paren { appel: None }) => {
                            return Err(ErreurAnalyse::ParenthesesVides {
                                position: j.position,
                            })
                        }
                        None => {
                            return Err(ErreurAnalyse::ParentheseSansOuvrante {
                                position: j.position,
                            })
                        }
                        Some(_) => return Err(operande_attendu(j)),
                    }
                }

                vide_jusqua_paren(&mut ops, &mut out);
                match ops.pop() {
                    Some(Pile::Paren {
                        appel: Some((nom, virgules)),
                    }) => out.push(ElemRpn::Appel {
                        nom,
                        nb_args: virgules + 1,
                    }),
                    Some(Pile::Paren { appel: None }) => {}
                    _ => {
                        return Err(ErreurAnalyse::ParentheseSansOuvrante {
                            position: j.position,
                        })
                    }
                }
                attend_valeur = false;
            }

            Tok::Fin => {
                if i + 1 != tokens.len() {
                    return Err(inattendu(j));
                }
                if attend_valeur {
                    return Err(if out.is_empty() && ops.is_empty() {
                        ErreurAnalyse::Vide
                    } else {
                        ErreurAnalyse::Incomplete
                    });
                }

                // vide la pile ops
                while let Some(p) = ops.pop() {
                    match p {
                        Pile::Paren { .. } => return Err(ErreurAnalyse::ParentheseNonFermee),
                        Pile::Binaire(op) => out.push(ElemRpn::Binaire(op)),
                        Pile::Unaire(u) => out.push(ElemRpn::Unaire(u)),
                    }
                }
                return Ok(out);
            }
        }

        i += 1;
    }

    Err(ErreurAnalyse::SansFin)
}

/// Construit l’AST à partir d’une RPN, en refusant toute profondeur > `profondeur_max`.
pub fn from_rpn(rpn: &[ElemRpn], profondeur_max: usize) -> Result<Noeud, ErreurAnalyse> {
    // (noeud, profondeur du sous-arbre)
    let mut st: Vec<(Noeud, usize)> = Vec::new();

    let borne = |p: usize| {
        if p > profondeur_max {
            Err(ErreurAnalyse::TropProfond {
                max: profondeur_max,
            })
        } else {
            Ok(p)
        }
    };

    for elem in rpn.iter().cloned() {
        match elem {
            ElemRpn::Num(v) => st.push((Noeud::Nombre(v), borne(1)?)),

            ElemRpn::Unaire(u) => {
                let (x, p) = st.pop().ok_or(ErreurAnalyse::RpnInvalide)?;
                st.push((Noeud::unaire(u, x), borne(p + 1)?));
            }

            ElemRpn::Binaire(op) => {
                let (b, pb) = st.pop().ok_or(ErreurAnalyse::RpnInvalide)?;
                let (a, pa) = st.pop().ok_or(ErreurAnalyse::RpnInvalide)?;
                st.push((Noeud::binaire(op, a, b), borne(pa.max(pb) + 1)?));
            }

            ElemRpn::Appel { nom, nb_args } => {
                if st.len() < nb_args {
                    return Err(ErreurAnalyse::RpnInvalide);
                }
                let args = st.split_off(st.len() - nb_args);
                let p = args.iter().map(|(_, p)| *p).max().unwrap_or(0) + 1;
                let args = args.into_iter().map(|(n, _)| n).collect();
                st.push((Noeud::Appel(nom, args), borne(p)?));
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurAnalyse::RpnInvalide);
    }
    st.pop()
        .map(|(n, _)| n)
        .ok_or(ErreurAnalyse::RpnInvalide)
}

/// Jetons -> AST (profondeur par défaut).
pub fn parse(tokens: &[Jeton]) -> Result<Noeud, ErreurAnalyse> {
    parse_borne(tokens, PROFONDEUR_MAX_DEFAUT)
}

/// Jetons -> AST, profondeur bornée.
pub fn parse_borne(tokens: &[Jeton], profondeur_max: usize) -> Result<Noeud, ErreurAnalyse> {
    let rpn = to_rpn(tokens)?;
    debug!("rpn: {}", format_rpn(&rpn));
    from_rpn(&rpn, profondeur_max)
}

/// Format utilitaire (journal) : RPN en texte. Les appels montrent leur arité : frac/2.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| match e {
            ElemRpn::Num(v) => format!("{v}"),
            ElemRpn::Binaire(op) => op.symbole().to_string(),
            ElemRpn::Unaire(OpUnaire::Neg) => "neg".to_string(),
            ElemRpn::Unaire(OpUnaire::Plus) => "pos".to_string(),
            ElemRpn::Appel { nom, nb_args } => format!("{nom}/{nb_args}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::tokenize;

    fn ast(s: &str) -> String {
        let j = tokenize(s).unwrap();
        parse(&j)
            .unwrap_or_else(|e| panic!("parse({s:?}) erreur: {e}"))
            .to_string()
    }

    fn err(s: &str) -> ErreurAnalyse {
        let j = tokenize(s).unwrap();
        match parse(&j) {
            Ok(n) => panic!("parse({s:?}) aurait dû échouer, a donné {n}"),
            Err(e) => e,
        }
    }

    // --- Précédence / associativité ---

    #[test]
    fn precedence_mul_sur_add() {
        assert_eq!(ast("2 + 3 * 4"), "(2 + (3 * 4))");
        assert_eq!(ast("(2 + 3) * 4"), "((2 + 3) * 4)");
    }

    #[test]
    fn associativite_gauche() {
        assert_eq!(ast("10 - 4 - 3"), "((10 - 4) - 3)");
        assert_eq!(ast("100 / 5 / 2"), "((100 / 5) / 2)");
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(ast("-5 + 10"), "((-5) + 10)");
        assert_eq!(ast("-2 * 3"), "((-2) * 3)");
        assert_eq!(ast("2 * -3"), "(2 * (-3))");
        assert_eq!(ast("- -3"), "(-(-3))");
        assert_eq!(ast("2 - -3"), "(2 - (-3))");
        assert_eq!(ast("+4"), "(+4)");
    }

    #[test]
    fn parentheses_sans_noeud() {
        assert_eq!(ast("((7))"), "7");
    }

    // --- Appels ---

    #[test]
    fn appels() {
        assert_eq!(ast("sqrt(2+2)"), "sqrt((2 + 2))");
        assert_eq!(ast("frac(1, 2) + frac(1, 4)"), "(frac(1, 2) + frac(1, 4))");
        assert_eq!(ast("foo()"), "foo()");
        assert_eq!(ast("max(1, 2, 3)"), "max(1, 2, 3)");
        assert_eq!(
            ast("sqrt(pow(3, 2) + pow(4, 2))"),
            "sqrt((pow(3, 2) + pow(4, 2)))"
        );
        assert_eq!(ast("f(-1, (2))"), "f((-1), 2)");
    }

    // --- Erreurs ---

    #[test]
    fn parenthese_non_fermee() {
        assert_eq!(err("(2 + 3"), ErreurAnalyse::ParentheseNonFermee);
        assert_eq!(err("frac(1, 2"), ErreurAnalyse::ParentheseNonFermee);
    }

    #[test]
    fn parenthese_sans_ouvrante() {
        assert!(matches!(
            err("2 + 3)"),
            ErreurAnalyse::ParentheseSansOuvrante { .. }
        ));
        assert!(matches!(err(")"), ErreurAnalyse::ParentheseSansOuvrante { .. }));
    }

    #[test]
    fn jetons_en_trop() {
        assert!(matches!(err("2 3"), ErreurAnalyse::JetonInattendu { .. }));
        assert!(matches!(err("(1) (2)"), ErreurAnalyse::JetonInattendu { .. }));
        assert!(matches!(err("2 sqrt(4)"), ErreurAnalyse::JetonInattendu { .. }));
    }

    #[test]
    fn operande_manquant() {
        assert_eq!(err("2 +"), ErreurAnalyse::Incomplete);
        assert!(matches!(err("* 2"), ErreurAnalyse::OperandeAttendu { .. }));
        assert!(matches!(err("2 + * 3"), ErreurAnalyse::OperandeAttendu { .. }));
        assert!(matches!(err("(2 +)"), ErreurAnalyse::OperandeAttendu { .. }));
    }

    #[test]
    fn vide() {
        assert_eq!(err(""), ErreurAnalyse::Vide);
        assert!(matches!(err("()"), ErreurAnalyse::ParenthesesVides { .. }));
    }

    #[test]
    fn virgules() {
        assert!(matches!(err("1, 2"), ErreurAnalyse::VirguleHorsAppel { .. }));
        assert!(matches!(err("(1, 2)"), ErreurAnalyse::VirguleHorsAppel { .. }));
        assert!(matches!(err("f(1,)"), ErreurAnalyse::OperandeAttendu { .. }));
        assert!(matches!(err("f(,1)"), ErreurAnalyse::OperandeAttendu { .. }));
    }

    #[test]
    fn identifiant_seul() {
        assert_eq!(
            err("x + 1"),
            ErreurAnalyse::IdentifiantSansAppel {
                nom: "x".into(),
                position: 0
            }
        );
    }

    #[test]
    fn sans_fin() {
        let mut j = tokenize("1 + 2").unwrap();
        j.pop();
        assert_eq!(parse(&j), Err(ErreurAnalyse::SansFin));
        assert_eq!(parse(&[]), Err(ErreurAnalyse::SansFin));
    }

    #[test]
    fn profondeur_bornee() {
        let s = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        // les parenthèses seules ne créent pas de profondeur
        assert_eq!(ast(&s), "1");

        let s = format!("{}1", "-".repeat(20));
        let j = tokenize(&s).unwrap();
        assert_eq!(
            parse_borne(&j, 8),
            Err(ErreurAnalyse::TropProfond { max: 8 })
        );
        assert!(parse_borne(&j, 21).is_ok());
    }

    #[test]
    fn rpn_lisible() {
        let j = tokenize("frac(1, 2) + -3").unwrap();
        let rpn = to_rpn(&j).unwrap();
        assert_eq!(format_rpn(&rpn), "1 2 frac/2 3 neg +");
    }
}
