// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter envoie la phrase (quand le champ est focus)
// - Tactile : boutons de mots, focus redonné après clic (focus_entree)
// - La phrase tapée remplace la transcription vocale (même chemin que la voix)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::commande::GenreReponse;
use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice vocale");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
                self.ui_journal(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Phrase :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: what is nine hundred eighty seven divided by three")
                .id_source("entree_edit"),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // TextEdit singleline perd le focus sur Enter : on teste lost_focus.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.soumettre_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let ok = ui.add_sized([64.0, 30.0], egui::Button::new("Envoyer"));
            if ok.clicked() {
                self.soumettre_via_noyau();
            }

            ui.separator();

            // Contrat: C = entrée seulement ; CLR = journal ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement la phrase", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Vide le journal", Action::ClearJournal);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
        });

        ui.add_space(6.0);

        // Modes : mêmes effets que "set the angle mode to ..." / "set calculator mode to ..."
        ui.horizontal(|ui| {
            let mut degres = !self.calc.expression().is_radian_mode();
            if ui.checkbox(&mut degres, "Degrés").changed() {
                self.calc.set_degres(degres);
                self.focus_entree = true;
            }

            let mut express = self.calc.est_express();
            if ui.checkbox(&mut express, "Express").changed() {
                self.calc.set_express(express);
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            for mot in ["what is", "compute", "get the answer", "answer"] {
                self.bouton_mot(ui, mot);
            }
            ui.separator();
            for mot in ["plus", "minus", "times", "divided by", "to the power of"] {
                self.bouton_mot(ui, mot);
            }
            ui.separator();
            for mot in ["open paren", "close paren", "square root of", "sine of", "pi"] {
                self.bouton_mot(ui, mot);
            }
        });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Réponse :");
        match &self.reponse {
            Some(r) => {
                let couleur = match r.genre {
                    GenreReponse::Incomprise | GenreReponse::Indefini => {
                        ui.visuals().error_fg_color
                    }
                    _ => ui.visuals().text_color(),
                };
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.colored_label(couleur, &r.texte);
                    });
            }
            None => {
                ui.monospace("—");
            }
        }

        ui.add_space(6.0);

        let e = self.calc.expression();
        ui.horizontal(|ui| {
            ui.label("Résultat :");
            ui.monospace(e.dernier_resultat().to_string());
            ui.separator();
            ui.label("Précédent :");
            ui.monospace(e.resultat_precedent().to_string());
            ui.separator();
            ui.label(if e.is_radian_mode() { "radians" } else { "degrés" });
        });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Entendu", "demarche_acoustique", &self.demarche.acoustique);
                Self::champ_demarche(ui, "Normalisé", "demarche_normalise", &self.demarche.normalise);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
            });
    }

    fn ui_journal(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Journal ({})", self.journal.len()))
            .default_open(true)
            .show(ui, |ui| {
                // plus récent en haut
                for (k, e) in self.journal.iter().rev().enumerate() {
                    ui.push_id(k, |ui| {
                        ui.label(format!("« {} »", e.entendu));
                        ui.monospace(format!("  → {}", e.reponse.texte));
                    });
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule, cadre visuel via Frame + Label monospace.
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
                Action::ClearJournal => self.clear_journal(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_entree = true;
        }
    }

    /// Ajoute un mot (ou une phrase) à la fin de l’entrée, séparé par un espace.
    fn bouton_mot(&mut self, ui: &mut egui::Ui, mot: &str) {
        if !ui.button(mot).clicked() {
            return;
        }
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        if !self.entree.is_empty() {
            self.entree.push(' ');
        }
        self.entree.push_str(mot);
        self.focus_entree = true;
    }

    /// Envoie la phrase au dispatcher puis dépose la réponse dans l’état UI.
    fn soumettre_via_noyau(&mut self) {
        let phrase = self.entree.trim().to_string();
        if phrase.is_empty() {
            self.focus_entree = true;
            return;
        }

        let reponse = self.calc.traiter(&phrase);
        self.set_reponse(phrase, reponse);
        self.entree.clear();
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearJournal,
    ResetTotal,
}
