// src/noyau/registre.rs
//
// Registre des fonctions : nom -> implémentation.
//
// Contrat :
// - interface fixe : arguments évalués (ordre conservé) -> Valeur ou ErreurFonction
// - aucune validation à l’enregistrement : arité / types vérifiés par l’implémentation
// - ré-enregistrer un nom existant REMPLACE l’entrée (le dernier gagne) ;
//   `register` renvoie l’ancienne entrée et le remplacement est journalisé
//
// Registre global : initialisé une fois (fonctions du noyau + extensions),
// puis lu pendant l’évaluation ; l’écriture passe par le RwLock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use super::erreur::ErreurFonction;
use super::fonctions::charger_fonctions;
use super::valeur::Valeur;

/// Implémentation d’une fonction enregistrée.
pub type Implementation = Arc<dyn Fn(&[Valeur]) -> Result<Valeur, ErreurFonction> + Send + Sync>;

#[derive(Clone, Default)]
pub struct Registre {
    fonctions: HashMap<String, Implementation>,
}

impl Registre {
    /// Registre vide (aucune fonction, pas même frac/mixf/dec).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registre prêt à l’emploi : fonctions du noyau + extensions.
    pub fn avec_fonctions() -> Self {
        let mut r = Self::new();
        charger_fonctions(&mut r);
        r
    }

    /// Insère ou remplace `nom`. Renvoie l’implémentation remplacée, s’il y en avait une.
    pub fn register<F>(&mut self, nom: impl Into<String>, f: F) -> Option<Implementation>
    where
        F: Fn(&[Valeur]) -> Result<Valeur, ErreurFonction> + Send + Sync + 'static,
    {
        let nom = nom.into();
        let ancienne = self.fonctions.insert(nom.clone(), Arc::new(f));
        if ancienne.is_some() {
            warn!("fonction '{nom}' ré-enregistrée : la nouvelle définition remplace l’ancienne");
        } else {
            debug!("fonction '{nom}' enregistrée");
        }
        ancienne
    }

    pub fn lookup(&self, nom: &str) -> Option<&Implementation> {
        self.fonctions.get(nom)
    }

    pub fn contient(&self, nom: &str) -> bool {
        self.fonctions.contains_key(nom)
    }

    /// Noms enregistrés, triés.
    pub fn noms(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.fonctions.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn len(&self) -> usize {
        self.fonctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonctions.is_empty()
    }
}

impl fmt::Debug for Registre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registre")
            .field("fonctions", &self.noms())
            .finish()
    }
}

/* ------------------------ Registre global ------------------------ */

static REGISTRE: OnceLock<RwLock<Registre>> = OnceLock::new();

fn registre_global() -> &'static RwLock<Registre> {
    REGISTRE.get_or_init(|| RwLock::new(Registre::avec_fonctions()))
}

/// Lecture du registre global (initialisé au premier accès).
/// Un verrou empoisonné reste lisible : le registre n’est jamais laissé à moitié écrit.
pub fn lire_registre() -> RwLockReadGuard<'static, Registre> {
    registre_global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Écriture du registre global (enregistrement à chaud).
pub fn ecrire_registre() -> RwLockWriteGuard<'static, Registre> {
    registre_global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}
