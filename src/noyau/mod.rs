//! Noyau : interprète d’expressions arithmétiques dictées
//!
//! Organisation interne (chaque étage consomme la sortie du précédent) :
//! - nombres.rs    : mots-nombres -> littéraux décimaux ("nine hundred eighty seven" -> 987)
//! - phrases.rs    : phrases de fonctions -> symboles ("divided by" -> "/")
//! - jetons.rs     : découpage en jetons
//! - validation.rs : balayage d’adjacence (bonne formation)
//! - eval.rs       : descente récursive à trois étages
//! - trig.rs       : sin/cos/tan/csc/sec/cot selon le mode d’angle
//! - lecture.rs    : modèle décimal exact (BigRational), arrondis, π, e, √
//! - expression.rs : l’objet vivant (texte, jetons, deux cases de résultat, mode)
//! - erreur.rs     : les quatre familles d’erreurs

pub mod erreur;
pub mod eval;
pub mod expression;
pub mod jetons;
pub mod lecture;
pub mod nombres;
pub mod phrases;
pub mod trig;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use expression::Expression;
pub use lecture::Decimal;
