// src/noyau/expression.rs
//
// Expression vivante (mémoire de la calculatrice)
// -----------------------------------------------
// Une seule instance par session, réutilisée d’un énoncé à l’autre.
//
// Invariants :
// - `jetons` est TOUJOURS le découpage sur espaces de `texte_normalise`,
//   pour le dernier texte acoustique accepté (jamais modifiés séparément)
// - `precedent` ne change que si un NOUVEAU résultat diffère du résultat courant ;
//   résultat égal => aucune case ne bouge
// - `calcule` : le résultat courant correspond aux jetons courants ; les lectures
//   suivantes ne réévaluent rien (même après un changement de mode d’angle)
//
// Pas de synchronisation : un seul appelant à la fois (ou une instance par session).

use num_rational::BigRational;
use num_traits::Zero;
use tracing::debug;

use super::erreur::Resultat;
use super::eval::evaluer;
use super::jetons::{format_tokens, tokenize, Tok};
use super::lecture::{texte_decimal, Decimal, PRECISION_TRAVAIL};
use super::nombres::remplacer_mots_nombres;
use super::phrases::substituer_phrases;
use super::trig::ModeAngle;
use super::validation::valider;

/// Mot qui désigne le dernier résultat dans un énoncé.
pub const MOT_REPONSE: &str = "answer";

#[derive(Clone, Debug)]
pub struct Expression {
    texte_acoustique: String,
    texte_normalise: String,
    jetons: Vec<Tok>,

    courant: BigRational,
    precedent: BigRational,
    calcule: bool,

    mode: ModeAngle,
}

impl Default for Expression {
    fn default() -> Self {
        Self {
            texte_acoustique: String::new(),
            texte_normalise: String::new(),
            jetons: Vec::new(),
            courant: BigRational::zero(),
            precedent: BigRational::zero(),
            calcule: false,
            mode: ModeAngle::Radians,
        }
    }
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /* ------------------------ Texte ------------------------ */

    /// Normalise (mots-nombres), substitue (phrases), découpe (jetons).
    /// En cas de nombre malformé, l’état précédent est conservé.
    pub fn set_acoustic_representation(&mut self, texte: &str) -> Resultat<()> {
        let avec_nombres = remplacer_mots_nombres(texte)?;
        let normalise = substituer_phrases(&avec_nombres);
        let jetons = tokenize(&normalise);

        debug!(acoustique = texte, normalise = %normalise, "énoncé normalisé");

        self.texte_acoustique = texte.to_string();
        self.texte_normalise = normalise;
        self.jetons = jetons;
        self.calcule = false;
        Ok(())
    }

    pub fn acoustic_representation(&self) -> &str {
        &self.texte_acoustique
    }

    pub fn texte_normalise(&self) -> &str {
        &self.texte_normalise
    }

    pub fn jetons(&self) -> &[Tok] {
        &self.jetons
    }

    /// Remplace chaque mot "answer" par le texte non arrondi de la case “précédent”.
    /// À appeler AVANT `set_acoustic_representation` (le noyau ne le fait pas).
    pub fn substituer_reponse(&self, texte: &str) -> String {
        let reponse = texte_decimal(&self.precedent, PRECISION_TRAVAIL);
        texte
            .split_whitespace()
            .map(|mot| if mot == MOT_REPONSE { reponse.as_str() } else { mot })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /* ------------------------ Résultats ------------------------ */

    /// Valide puis évalue les jetons courants, et met à jour les deux cases.
    pub fn calculer_resultat(&mut self) -> Resultat<()> {
        valider(&self.jetons)?;
        let nouveau = evaluer(&self.jetons, self.mode)?;

        debug!(
            jetons = %format_tokens(&self.jetons),
            resultat = %Decimal::depuis(&nouveau),
            "résultat calculé"
        );

        if nouveau != self.courant {
            self.precedent = std::mem::replace(&mut self.courant, nouveau);
        }
        self.calcule = true;
        Ok(())
    }

    /// Résultat courant, évalué seulement s’il ne l’est pas déjà, arrondi à 12 chiffres.
    pub fn resultat(&mut self) -> Resultat<Decimal> {
        if !self.calcule {
            self.calculer_resultat()?;
        }
        Ok(Decimal::depuis(&self.courant))
    }

    /// Case “précédent”, arrondie à 12 chiffres.
    pub fn resultat_precedent(&self) -> Decimal {
        Decimal::depuis(&self.precedent)
    }

    /// Case “courant” sans recalcul.
    pub fn dernier_resultat(&self) -> Decimal {
        Decimal::depuis(&self.courant)
    }

    /* ------------------------ Mode d’angle ------------------------ */

    pub fn set_angle_mode(&mut self, radians: bool) {
        self.mode = if radians {
            ModeAngle::Radians
        } else {
            ModeAngle::Degres
        };
    }

    pub fn is_radian_mode(&self) -> bool {
        self.mode == ModeAngle::Radians
    }

    pub fn mode_angle(&self) -> ModeAngle {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErreurCalcul;

    fn calcule(e: &mut Expression, s: &str) -> String {
        e.set_acoustic_representation(s)
            .unwrap_or_else(|err| panic!("{s:?}: {err}"));
        e.resultat()
            .unwrap_or_else(|err| panic!("{s:?}: {err}"))
            .to_string()
    }

    #[test]
    fn pipeline_complet() {
        let mut e = Expression::new();
        assert_eq!(calcule(&mut e, "two plus three times four"), "14");
        assert_eq!(e.texte_normalise(), "2 + 3 * 4");
        assert_eq!(e.acoustic_representation(), "two plus three times four");
        assert_eq!(e.jetons().len(), 5);
    }

    #[test]
    fn jetons_suivent_le_texte_normalise() {
        let mut e = Expression::new();
        e.set_acoustic_representation("open paren one plus two close paren factorial")
            .unwrap();
        assert_eq!(e.texte_normalise(), "( 1 + 2 ) !");
        assert_eq!(e.jetons(), tokenize(e.texte_normalise()).as_slice());
    }

    #[test]
    fn nombre_malforme_garde_l_etat() {
        let mut e = Expression::new();
        e.set_acoustic_representation("one plus one").unwrap();
        let err = e.set_acoustic_representation("one thousand one million").unwrap_err();
        assert!(matches!(err, ErreurCalcul::NombreMalforme(_)));
        assert_eq!(e.texte_normalise(), "1 + 1");
    }

    #[test]
    fn memoire_deux_cases() {
        let mut e = Expression::new();
        assert_eq!(e.resultat_precedent().to_string(), "0");

        calcule(&mut e, "five");
        assert_eq!(e.resultat_precedent().to_string(), "0");

        calcule(&mut e, "seven");
        assert_eq!(e.dernier_resultat().to_string(), "7");
        assert_eq!(e.resultat_precedent().to_string(), "5");

        // même valeur : rien ne bouge
        calcule(&mut e, "three plus four");
        assert_eq!(e.resultat_precedent().to_string(), "5");
    }

    #[test]
    fn requetes_repetees_idempotentes() {
        let mut e = Expression::new();
        calcule(&mut e, "two");
        calcule(&mut e, "nine");
        let a = e.resultat().unwrap();
        let b = e.resultat().unwrap();
        assert_eq!(a, b);
        assert_eq!(e.resultat_precedent().to_string(), "2");
    }

    #[test]
    fn erreur_ne_touche_pas_la_memoire() {
        let mut e = Expression::new();
        calcule(&mut e, "four");
        e.set_acoustic_representation("one divided by zero").unwrap();
        assert!(e.resultat().unwrap_err().est_indefini());
        assert_eq!(e.dernier_resultat().to_string(), "4");
        assert_eq!(e.resultat_precedent().to_string(), "0");
    }

    #[test]
    fn mode_angle() {
        let mut e = Expression::new();
        assert!(e.is_radian_mode());
        e.set_angle_mode(false);
        assert!(!e.is_radian_mode());
        assert_eq!(calcule(&mut e, "sine of thirty"), "0.5");
        e.set_angle_mode(true);
        assert_eq!(e.mode_angle(), ModeAngle::Radians);
    }

    #[test]
    fn lecture_stable_apres_changement_de_mode() {
        let mut e = Expression::new();
        calcule(&mut e, "five");
        let a = calcule(&mut e, "sine of thirty");
        let p1 = e.resultat_precedent();

        e.set_angle_mode(false);
        let b = e.resultat().unwrap().to_string();
        assert_eq!(a, b);
        assert_eq!(e.resultat_precedent(), p1);
        assert_eq!(p1.to_string(), "5");

        // nouvel énoncé => nouvelle évaluation, dans le nouveau mode
        assert_eq!(calcule(&mut e, "sine of thirty"), "0.5");
    }

    #[test]
    fn substitution_de_la_reponse() {
        let mut e = Expression::new();
        calcule(&mut e, "negative twelve point zero five");
        // "answer" lit la case précédente
        assert_eq!(e.substituer_reponse("answer plus one"), "0 plus one");

        calcule(&mut e, "two");
        let texte = e.substituer_reponse("answer plus one");
        assert_eq!(texte, "-12.05 plus one");
        assert_eq!(calcule(&mut e, &texte), "-11.05");
        // "answers" n’est pas le mot "answer"
        assert_eq!(e.substituer_reponse("answers"), "answers");
    }

    #[test]
    fn substitution_sans_arrondi() {
        let mut e = Expression::new();
        calcule(&mut e, "one divided by three");
        calcule(&mut e, "two");
        let texte = e.substituer_reponse("answer times three");
        assert!(texte.starts_with("0.3333333333333333333333"), "{texte}");
        assert_eq!(calcule(&mut e, &texte), "1");
    }
}
