// src/noyau/validation.rs
//
// Validation grammaticale (balayage d’adjacence)
// ----------------------------------------------
// Chaque jeton reçoit une catégorie, puis on vérifie la paire (précédent, courant) :
//   1. deux numéraux, ou deux opérateurs binaires, de suite        => invalide
//   2. "(" précédé d’un numéral, d’un postfixe ou de ")"             => invalide
//   3. ")" précédé d’un binaire ou d’une fonction préfixe            => invalide
//   4. après "(" : binaire, postfixe ou ")"                         => invalide
//   5. après ")" : numéral ou fonction préfixe                       => invalide
// + compteur de parenthèses jamais négatif, nul à la fin
// + un seul jeton : seulement un numéral
// + dernier jeton : jamais un binaire
//
// L’évaluateur suppose une entrée déjà validée.

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{format_tokens, Tok};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Categorie {
    Numeral,
    Binaire,
    Prefixe,
    Postfixe,
    Ouvrante,
    Fermante,
}

/// None pour un mot inconnu.
pub fn categorie(t: &Tok) -> Option<Categorie> {
    let c = match t {
        Tok::Num(_) => Categorie::Numeral,
        Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => Categorie::Binaire,
        Tok::Fonction(_) => Categorie::Prefixe,
        Tok::Bang => Categorie::Postfixe,
        Tok::LPar => Categorie::Ouvrante,
        Tok::RPar => Categorie::Fermante,
        Tok::Mot(_) => return None,
    };
    Some(c)
}

fn adjacence_valide(precedent: Categorie, courant: Categorie) -> bool {
    use Categorie::*;

    let interdit = match (precedent, courant) {
        (Numeral, Numeral) | (Binaire, Binaire) => true,
        (Numeral | Postfixe | Fermante, Ouvrante) => true,
        (Binaire | Prefixe, Fermante) => true,
        (Ouvrante, Binaire | Postfixe | Fermante) => true,
        (Fermante, Numeral | Prefixe) => true,
        _ => false,
    };
    !interdit
}

/// Vérifie qu’une suite de jetons est bien formée.
pub fn valider(tokens: &[Tok]) -> Resultat<()> {
    if est_bien_formee(tokens) {
        Ok(())
    } else {
        Err(ErreurCalcul::ExpressionMalformee(format_tokens(tokens)))
    }
}

fn est_bien_formee(tokens: &[Tok]) -> bool {
    let Some((premier, reste)) = tokens.split_first() else {
        return false;
    };

    // Premier jeton : numéral, "(" ou fonction préfixe.
    let mut courant = match categorie(premier) {
        Some(c @ (Categorie::Numeral | Categorie::Ouvrante | Categorie::Prefixe)) => c,
        _ => return false,
    };

    if reste.is_empty() {
        return courant == Categorie::Numeral;
    }

    let mut ouvertes: i64 = i64::from(courant == Categorie::Ouvrante);

    for t in reste {
        let precedent = courant;
        courant = match categorie(t) {
            Some(c) => c,
            None => return false,
        };

        if !adjacence_valide(precedent, courant) {
            return false;
        }

        match courant {
            Categorie::Ouvrante => ouvertes += 1,
            Categorie::Fermante => ouvertes -= 1,
            _ => {}
        }
        // ")(" garde un compte nul mais reste invalide
        if ouvertes < 0 {
            return false;
        }
    }

    ouvertes == 0 && courant != Categorie::Binaire
}
