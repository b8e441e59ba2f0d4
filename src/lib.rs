//! Calculatrice Or — moteur d'expressions de la calculatrice intégrée au
//! tableau de bord du cours de l'or.
//!
//! Le moteur est une calculette sûre : tokenisation explicite,
//! shunting-yard, évaluation sur pile. Aucune évaluation dynamique de
//! texte, aucune E/S, aucun état global : chaque appel est une fonction
//! pure du texte vers le résultat.
//!
//! Deux couches :
//! - [`noyau`] : le pipeline pur (jetons → RPN → pile f64 → format)
//! - [`etat`]  : la session interactive (saisie validée, aperçu en direct,
//!   historique borné) que le tableau de bord pilote depuis son pavé

pub mod etat;
pub mod noyau;

pub use etat::{EntreeHistorique, EtatCalc};
pub use noyau::{eval_expression, DemarcheNoyau, ErreurCalc};
