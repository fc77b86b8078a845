//! Erreurs du noyau, une famille par étage du pipeline.
//!
//! - ErreurLex      : tokenisation (caractère + position)
//! - ErreurAnalyse  : construction de l’AST (RPN)
//! - ErreurEval     : évaluation (division par zéro, fonction inconnue, ...)
//! - ErreurFonction : échec levé par une fonction enregistrée
//! - Erreur         : agrégat renvoyé par `eval_expression`

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurLex {
    #[error("caractère inattendu: '{car}' (position {position})")]
    CaractereInattendu { car: char, position: usize },

    #[error("nombre invalide: '{texte}' (position {position})")]
    NombreInvalide { texte: String, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurAnalyse {
    #[error("expression vide")]
    Vide,

    #[error("jeton inattendu '{texte}' (position {position})")]
    JetonInattendu { texte: String, position: usize },

    #[error("opérande attendu avant '{texte}' (position {position})")]
    OperandeAttendu { texte: String, position: usize },

    #[error("expression incomplète")]
    Incomplete,

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante (position {position})")]
    ParentheseSansOuvrante { position: usize },

    #[error("parenthèses vides (position {position})")]
    ParenthesesVides { position: usize },

    #[error("virgule hors d’un appel de fonction (position {position})")]
    VirguleHorsAppel { position: usize },

    #[error("'{nom}' doit être suivi de '(' (position {position})")]
    IdentifiantSansAppel { nom: String, position: usize },

    #[error("suite de jetons sans marqueur de fin")]
    SansFin,

    #[error("expression trop profonde (max {max})")]
    TropProfond { max: usize },

    #[error("RPN invalide")]
    RpnInvalide,
}

/// Erreur levée par l’implémentation d’une fonction enregistrée.
#[derive(Debug, Error)]
pub enum ErreurFonction {
    #[error("attend {attendu} argument(s), reçu {recu}")]
    Arite { attendu: String, recu: usize },

    #[error("argument invalide: {0}")]
    Argument(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error(transparent)]
    Autre(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum ErreurEval {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),

    #[error("{nom}(): {source}")]
    Fonction {
        nom: String,
        #[source]
        source: ErreurFonction,
    },

    #[error("{nom}() a renvoyé un résultat invalide ({detail})")]
    ResultatInvalide { nom: String, detail: String },

    #[error("dépassement de capacité numérique")]
    Depassement,
}

/// Agrégat des trois étages + garde-fous d’entrée.
#[derive(Debug, Error)]
pub enum Erreur {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("entrée trop longue ({longueur} caractères, max {max})")]
    EntreeTropLongue { longueur: usize, max: usize },

    #[error(transparent)]
    Lex(#[from] ErreurLex),

    #[error(transparent)]
    Analyse(#[from] ErreurAnalyse),

    #[error(transparent)]
    Eval(#[from] ErreurEval),
}
