// src/noyau/erreur.rs
//
// Erreurs du noyau
// ----------------
// Quatre familles, levées de façon synchrone par l’étape qui échoue :
// - NombreMalforme      : une suite de mots-nombres viole la grammaire
// - ExpressionMalformee : adjacence des jetons / parenthèses invalides
// - ResultatIndefini    : division par zéro, réciproque d’une valeur nulle, ...
// - ArgumentInvalide    : fonction appliquée hors de son domaine
//
// Aucune reprise, aucune valeur par défaut : l’appelant décide quoi dire.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("'{0}' n’est pas un nombre valide")]
    NombreMalforme(String),

    #[error("'{0}' n’est pas une expression valide")]
    ExpressionMalformee(String),

    #[error("résultat indéfini : {0}")]
    ResultatIndefini(String),

    #[error("argument invalide : {0}")]
    ArgumentInvalide(String),
}

impl ErreurCalcul {
    /// Vrai pour les erreurs que l’utilisateur entend comme “indéfini”.
    pub fn est_indefini(&self) -> bool {
        matches!(self, ErreurCalcul::ResultatIndefini(_))
    }
}

pub type Resultat<T> = Result<T, ErreurCalcul>;
