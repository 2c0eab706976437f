// src/app.rs
//
// Calculatrice vocale — module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (commande.rs + etat.rs + vue.rs)
// - Ré-exporter AppCalc et Calculatrice (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La gestion Enter est faite dans vue.rs (quand le champ a le focus).

pub mod commande;
pub mod etat;
pub mod vue;

pub use commande::Calculatrice;
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement la phrase (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
