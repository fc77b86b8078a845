//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Actions déterministes, sans effet de bord caché.

use calculatrice_pcs::noyau::Limites;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub ast: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,   // rendu Unicode (½, ⁷⁄₁₂, 3.14…)
    pub brut: String,       // rendu resaisissable (frac(3, 4), 2.5)
    pub expression: String, // l’entrée en notation mathématique (×, ÷, −)
    pub erreur: String,     // message d’erreur (si lecture/éval échoue)
    pub empile: String,     // fraction sur trois lignes (vide si pas une fraction)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub mixte: bool, // fractions affichées en nombre mixte (1½ plutôt que ³⁄₂)
    pub limites: Limites,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            brut: String::new(),
            expression: String::new(),
            erreur: String::new(),
            empile: String::new(),
            demarche: Demarche::default(),
            mixte: false,
            limites: Limites::depuis_env(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + affichage par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.mixte = false;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.brut.clear();
        self.expression.clear();
        self.erreur.clear();
        self.empile.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Place une erreur.
    ///
    /// On CONSERVE le dernier résultat pour ne pas “effacer l’écran” sur une faute ;
    /// la démarche, elle, ne correspond plus à rien.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet (Unicode + resaisissable + expression + démarche).
    pub fn set_resultats(
        &mut self,
        resultat: impl Into<String>,
        brut: impl Into<String>,
        expression: impl Into<String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.brut = brut.into();
        self.expression = expression.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// “Ans” : reprend le dernier résultat (forme resaisissable) à la fin de l’entrée.
    pub fn reprendre_resultat(&mut self) {
        if self.brut.is_empty() {
            return;
        }
        let brut = self.brut.clone();
        self.entree.push_str(&brut);
        self.focus_entree = true;
    }
}
