//! Noyau du moteur d'expressions
//!
//! Organisation interne :
//! - erreur.rs    : taxonomie d'erreurs (toutes récupérables)
//! - jetons.rs    : normalisation des glyphes + tokenisation
//! - fonctions.rs : table des fonctions scientifiques (degrés)
//! - rpn.rs       : shunting-yard (infixe -> postfixe)
//! - eval.rs      : évaluation sur pile + pipeline complet
//! - format.rs    : affichage décimal / exponentiel

pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalc;
pub use eval::{eval_expression, eval_rpn, DemarcheNoyau};
pub use format::{format_nombre, format_nombre_groupe, MARQUEUR_ERREUR};
