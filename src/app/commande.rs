//! src/app/commande.rs
//!
//! Aiguillage des commandes dictées (sans vue).
//!
//! Rôle : reconnaître la forme de la phrase (régler / lire / "what is" / calculer),
//! appeler le noyau, et produire la réponse à afficher (ou à prononcer).
//!
//! Deux registres de réponse :
//! - normal  : phrases complètes ("The result of ... is equal to ...")
//! - express : réponses courtes ("42", "Undefined.")

use tracing::{info, warn};

use crate::noyau::{ErreurCalcul, Expression};

/// Nature de la réponse (utile à la vue pour la couleur, et aux tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreReponse {
    Reglage,
    Lecture,
    Resultat,
    Indefini,
    Incomprise,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reponse {
    pub texte: String,
    pub genre: GenreReponse,
}

impl Reponse {
    fn new(genre: GenreReponse, texte: impl Into<String>) -> Self {
        Self {
            texte: texte.into(),
            genre,
        }
    }
}

/// Forme reconnue d’une phrase, préfixes retirés.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Commande {
    Regler(String),
    Obtenir(String),
    Question(String),
    Calculer(String),
    Inconnue,
}

/// Retire `prefixe` (mots obligatoires) puis, dans l’ordre, chaque mot optionnel présent.
fn retirer<'a>(
    mots: &'a [&'a str],
    prefixe: &[&'static str],
    optionnels: &[&[&'static str]],
) -> Option<&'a [&'a str]> {
    let mut reste = mots.strip_prefix(prefixe)?;
    for opt in optionnels {
        if let Some(r) = reste.strip_prefix(*opt) {
            reste = r;
        }
    }
    Some(reste)
}

fn analyser(texte: &str) -> Commande {
    let mots: Vec<&str> = texte.split_whitespace().collect();
    let joindre = |m: &[&str]| m.join(" ");

    for verbe in ["set", "change"] {
        if let Some(r) = retirer(&mots, &[verbe], &[&["the"]]) {
            return Commande::Regler(joindre(r));
        }
    }

    if let Some(r) = retirer(&mots, &["get"], &[&["the"]])
        .or_else(|| retirer(&mots, &["what", "was"], &[&["the"]]))
    {
        return Commande::Obtenir(joindre(r));
    }

    if let Some(r) = retirer(
        &mots,
        &["what", "is"],
        &[&["the"], &["current"], &["value", "of"]],
    ) {
        return Commande::Question(joindre(r));
    }

    for verbe in ["compute", "calculate"] {
        if let Some(r) = retirer(&mots, &[verbe], &[&["the", "value", "of"]]) {
            return Commande::Calculer(joindre(r));
        }
    }

    Commande::Inconnue
}

/// Calculatrice dictée : une Expression + le registre express.
#[derive(Clone, Debug, Default)]
pub struct Calculatrice {
    expression: Expression,
    express: bool,
}

impl Calculatrice {
    pub fn new(degres: bool, express: bool) -> Self {
        let mut expression = Expression::new();
        expression.set_angle_mode(!degres);
        Self {
            expression,
            express,
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn est_express(&self) -> bool {
        self.express
    }

    pub fn set_express(&mut self, express: bool) {
        self.express = express;
    }

    pub fn set_degres(&mut self, degres: bool) {
        self.expression.set_angle_mode(!degres);
    }

    /// Point d’entrée : une transcription brute -> une réponse.
    pub fn traiter(&mut self, transcription: &str) -> Reponse {
        // Le noyau attend du texte en minuscules, espaces simples.
        let texte = transcription
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        let commande = analyser(&texte);
        info!(?commande, express = self.express, "commande reconnue");

        let reponse = match commande {
            Commande::Regler(p) => self.regler(&p),
            Commande::Obtenir(p) => self.obtenir(&p),
            Commande::Question(p) => match p.as_str() {
                "angle mode" => self.lire_mode_angle(),
                "calculator mode" => self.lire_mode_calculatrice(),
                _ => self.calculer(&p),
            },
            Commande::Calculer(p) => self.calculer(&p),
            Commande::Inconnue => self.incomprise(),
        };

        if reponse.genre == GenreReponse::Incomprise {
            warn!(transcription = %texte, "énoncé rejeté");
        }
        reponse
    }

    /* ------------------------ Formes ------------------------ */

    fn regler(&mut self, parametre: &str) -> Reponse {
        use GenreReponse::Reglage;

        match parametre {
            "angle mode to degrees" => {
                self.expression.set_angle_mode(false);
                info!("mode d’angle : degrés");
                Reponse::new(
                    Reglage,
                    self.selon("The angle mode is now in degrees.", "Mode set to degrees."),
                )
            }
            "angle mode to radians" | "angle mode to ray dee ins" => {
                self.expression.set_angle_mode(true);
                info!("mode d’angle : radians");
                Reponse::new(
                    Reglage,
                    self.selon("The angle mode is now in radians.", "Mode set to radians."),
                )
            }
            "calculator mode to express" => {
                let deja = self.express;
                self.express = true;
                info!("registre : express");
                Reponse::new(
                    Reglage,
                    if deja {
                        "Mode is already express."
                    } else {
                        "Mode set to express."
                    },
                )
            }
            "calculator mode to regular" | "calculator mode to normal" => {
                let deja = !self.express;
                self.express = false;
                info!("registre : normal");
                Reponse::new(
                    Reglage,
                    if deja {
                        "The calculator is already in normal mode."
                    } else {
                        "The calculator is now in normal mode."
                    },
                )
            }
            _ => Reponse::new(
                GenreReponse::Incomprise,
                self.selon("Set parameters not understood, please try again.", "Parameters not understood."),
            ),
        }
    }

    fn obtenir(&mut self, parametre: &str) -> Reponse {
        match parametre {
            "previous answer" | "previous result" => {
                let v = self.expression.resultat_precedent();
                Reponse::new(
                    GenreReponse::Lecture,
                    if self.express {
                        v.to_string()
                    } else {
                        format!("The previous answer was {v}.")
                    },
                )
            }
            "answer" | "result" => {
                // Rien à recalculer tant qu’aucune expression n’a été entendue.
                let v = if self.expression.jetons().is_empty() {
                    self.expression.dernier_resultat()
                } else {
                    match self.expression.resultat() {
                        Ok(v) => v,
                        Err(_) => return self.incomprise(),
                    }
                };
                Reponse::new(
                    GenreReponse::Lecture,
                    if self.express {
                        v.to_string()
                    } else {
                        format!("The answer was {v}.")
                    },
                )
            }
            _ => Reponse::new(
                GenreReponse::Incomprise,
                self.selon("Get parameters not understood, please try again.", "Parameters not understood."),
            ),
        }
    }

    fn lire_mode_angle(&self) -> Reponse {
        let texte = match (self.expression.is_radian_mode(), self.express) {
            (true, false) => "The current angle mode is radians.",
            (false, false) => "The current angle mode is degrees.",
            (true, true) => "Radians.",
            (false, true) => "Degrees.",
        };
        Reponse::new(GenreReponse::Lecture, texte)
    }

    fn lire_mode_calculatrice(&self) -> Reponse {
        Reponse::new(
            GenreReponse::Lecture,
            self.selon("The calculator is currently in normal mode.", "Express mode."),
        )
    }

    /// answer -> case précédente, puis noyau (normalisation + évaluation).
    fn calculer(&mut self, enonce: &str) -> Reponse {
        let texte = self.expression.substituer_reponse(enonce);

        let resultat = self
            .expression
            .set_acoustic_representation(&texte)
            .and_then(|()| self.expression.resultat());

        match resultat {
            Ok(v) => Reponse::new(
                GenreReponse::Resultat,
                if self.express {
                    v.to_string()
                } else {
                    format!("The result of {enonce} is equal to {v}.")
                },
            ),
            Err(ErreurCalcul::ResultatIndefini(detail)) => {
                warn!(%detail, "résultat indéfini");
                Reponse::new(
                    GenreReponse::Indefini,
                    if self.express {
                        "Undefined.".to_string()
                    } else {
                        format!("The result of {enonce} is undefined.")
                    },
                )
            }
            Err(e) => {
                warn!(erreur = %e, "expression non comprise");
                Reponse::new(
                    GenreReponse::Incomprise,
                    self.selon(
                        "Calculator expression not understood, please try again.",
                        "Parameters not understood.",
                    ),
                )
            }
        }
    }

    fn incomprise(&self) -> Reponse {
        Reponse::new(
            GenreReponse::Incomprise,
            self.selon("Input not understood, please try again.", "Input not understood."),
        )
    }

    fn selon(&self, normal: &'static str, express: &'static str) -> &'static str {
        if self.express {
            express
        } else {
            normal
        }
    }
}
