// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus) ; Backspace reste au TextEdit
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Liste des fonctions lue dans le registre (extensions comprises)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + “Enter” virtuel mobile selon navigateur)

use eframe::egui;

use calculatrice_pcs::noyau::format::{format_expression, format_fraction_stacked, format_mixte};
use calculatrice_pcs::noyau::jetons::{format_tokens, tokenize};
use calculatrice_pcs::noyau::rpn::{format_rpn, parse_borne, to_rpn};
use calculatrice_pcs::noyau::{eval_expression, format, lire_registre, Valeur};

use super::etat::{AppCalc, Demarche};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice PCS");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: frac(1,2) + frac(1,4), mixf(1,1,2) * 2, dec(22/7, 3)")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        // Backspace clavier : laissé au TextEdit (un caractère).
        // Le bouton DEL efface un appel entamé d’un coup ("frac(", "sqrt(", etc.).

        ui.add_space(6.0);

        // Actions + affichage
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "Ans", "Reprend le dernier résultat", Action::Reprendre);

            ui.separator();

            if ui
                .checkbox(&mut self.mixte, "nombre mixte")
                .on_hover_text("Affiche 3/2 comme 1½")
                .changed()
                && !self.brut.is_empty()
            {
                // ré-affiche le dernier résultat dans le nouveau mode
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Touches rapides + fonctions du noyau + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);
            self.bouton_insert(ui, ",", ", ", InsertKind::Digit);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "−", "-", InsertKind::Op);
            self.bouton_insert(ui, "×", "*", InsertKind::Op);
            self.bouton_insert(ui, "÷", "/", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "frac", "frac(", InsertKind::Func);
            self.bouton_insert(ui, "mixf", "mixf(", InsertKind::Func);
            self.bouton_insert(ui, "dec", "dec(", InsertKind::Func);
            self.bouton_insert(ui, "√", "sqrt(", InsertKind::Func);
            self.bouton_insert(ui, "pow", "pow(", InsertKind::Func);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_pcs")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "÷", "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "×", "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                self.bouton_insert(ui, ",", ", ", InsertKind::Digit);
                self.bouton_insert(ui, "−", "-", InsertKind::Op);
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : un appel entamé ("frac(", "sqrt(") part d’un coup.
    fn backspace_entree(&mut self) {
        efface_dernier(&mut self.entree);
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        if !self.empile.is_empty() {
            ui.add_space(6.0);
            Self::champ_monospace(ui, "empile_out", &self.empile, 3);
        }

        ui.add_space(6.0);

        ui.label("Expression :");
        Self::champ_monospace(ui, "expression_out", &self.expression, 1);

        ui.add_space(6.0);

        ui.label("Valeur (resaisissable) :");
        Self::champ_monospace(ui, "brut_out", &self.brut, 1);
    }

    /// Fonctions disponibles (registre global, extensions comprises).
    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        // copie des noms : le verrou ne doit pas survivre aux clics
        let noms: Vec<String> = lire_registre().noms().into_iter().map(String::from).collect();

        egui::CollapsingHeader::new(format!("Fonctions ({})", noms.len()))
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for nom in &noms {
                        self.bouton_insert(ui, nom, &format!("{nom}("), InsertKind::Func);
                    }
                });
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_ast", &self.demarche.ast);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::Reprendre => self.reprendre_resultat(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            insere(&mut self.entree, to_insert, kind);
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat/expression/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();

        let res = {
            let registre = lire_registre();
            eval_expression(&s, &registre, &self.limites)
        };

        match res {
            Ok(v) => {
                let resultat = match (&v, self.mixte) {
                    (Valeur::Fraction(f), true) => format_mixte(f),
                    _ => format(&v),
                };
                let d = demarche(&s, self.limites.profondeur_max);
                self.set_resultats(resultat, resaisissable(&v), format_expression(&s), d);
                self.empile = apercu_empile(&v).unwrap_or_default();
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
        self.focus_entree = true;
    }
}

/* ------------------------ Helpers (purs, testables sans egui) ------------------------ */

/// Forme que le noyau relit à l’identique : frac(n, d) pour une fraction.
fn resaisissable(v: &Valeur) -> String {
    match v {
        Valeur::Fraction(f) => format!("frac({}, {})", f.numer(), f.denom()),
        Valeur::Nombre(_) => format(v),
    }
}

/// Jetons / RPN / arbre de l’expression (vide là où l’étage échoue).
fn demarche(s: &str, profondeur_max: usize) -> Demarche {
    let Ok(jetons) = tokenize(s) else {
        return Demarche::default();
    };
    let rpn = to_rpn(&jetons).map(|r| format_rpn(&r)).unwrap_or_default();
    let ast = parse_borne(&jetons, profondeur_max)
        .map(|n| n.to_string())
        .unwrap_or_default();
    Demarche {
        jetons: format_tokens(&jetons),
        rpn,
        ast,
    }
}

/// Fraction “empilée” (numérateur / barre / dénominateur) pour un résultat exact non entier.
fn apercu_empile(v: &Valeur) -> Option<String> {
    match v {
        Valeur::Fraction(f) if !f.est_entier() => Some(format_fraction_stacked(f.numer(), f.denom())),
        _ => None,
    }
}

fn efface_dernier(entree: &mut String) {
    // Retire espaces finaux
    while entree.ends_with(' ') {
        entree.pop();
    }

    // "nom(" : on retire l’appel entier
    if entree.ends_with('(') {
        entree.pop();
        while entree.ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            entree.pop();
        }
    } else {
        entree.pop();
    }

    while entree.ends_with(' ') {
        entree.pop();
    }
}

fn insere(entree: &mut String, to_insert: &str, kind: InsertKind) {
    if to_insert.is_empty() {
        return;
    }

    match kind {
        InsertKind::CloseParen => {
            while entree.ends_with(' ') {
                entree.pop();
            }
            entree.push_str(to_insert);
        }
        InsertKind::OpenParen | InsertKind::Func => {
            let last = entree.chars().rev().find(|c| !c.is_whitespace());
            if let Some(c) = last {
                if c.is_ascii_digit() || c.is_ascii_alphabetic() || c == ')' {
                    entree.push_str(" * ");
                }
            }
            entree.push_str(to_insert);
        }
        InsertKind::Op => {
            while entree.ends_with(' ') {
                entree.pop();
            }
            if !entree.is_empty() {
                entree.push(' ');
            }
            entree.push_str(to_insert);
            entree.push(' ');
        }
        InsertKind::Digit => {
            // chiffres: pas d’espaces auto
            entree.push_str(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    Reprendre,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
