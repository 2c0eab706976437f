//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la fenêtre (transcription en cours, calculatrice, journal,
//! dernière réponse, démarche) et offrir des opérations simples sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : le calcul passe par `Calculatrice::traiter` (commande.rs).
//! - Actions déterministes, sans effet de bord caché.
//! - Journal borné (JOURNAL_MAX).

use std::collections::VecDeque;

use super::commande::{Calculatrice, Reponse};

/// Nombre d’échanges conservés dans le journal.
pub const JOURNAL_MAX: usize = 50;

/// Une phrase entendue et sa réponse.
#[derive(Clone, Debug)]
pub struct Echange {
    pub entendu: String,
    pub reponse: Reponse,
}

/// Panneau d’explication : ce que le noyau a vu de la dernière expression.
#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub acoustique: String,
    pub normalise: String,
    pub jetons: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- noyau + registre ---
    pub calc: Calculatrice,

    // --- sorties ---
    pub reponse: Option<Reponse>,
    pub journal: VecDeque<Echange>,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- réglages de lancement (--degres / --express), restaurés par AC ---
    degres_depart: bool,
    express_depart: bool,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Calculatrice::default())
    }
}

impl AppCalc {
    pub fn new(calc: Calculatrice) -> Self {
        Self {
            degres_depart: !calc.expression().is_radian_mode(),
            express_depart: calc.est_express(),
            entree: String::new(),
            calc,
            reponse: None,
            journal: VecDeque::new(),
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + journal + mémoire + modes de lancement).
    pub fn reset_total(&mut self) {
        *self = Self::new(Calculatrice::new(self.degres_depart, self.express_depart));
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : vider le journal et la dernière réponse (la mémoire du noyau reste).
    pub fn clear_journal(&mut self) {
        self.journal.clear();
        self.reponse = None;
        self.focus_entree = true;
    }

    /// Dépose une réponse : dernière réponse + journal (borné) + démarche à jour.
    pub fn set_reponse(&mut self, entendu: impl Into<String>, reponse: Reponse) {
        if self.journal.len() == JOURNAL_MAX {
            self.journal.pop_front();
        }
        self.journal.push_back(Echange {
            entendu: entendu.into(),
            reponse: reponse.clone(),
        });
        self.reponse = Some(reponse);

        let e = self.calc.expression();
        self.demarche = Demarche {
            acoustique: e.acoustic_representation().to_string(),
            normalise: e.texte_normalise().to_string(),
            jetons: crate::noyau::jetons::format_tokens(e.jetons()),
        };

        self.focus_entree = true;
    }
}
