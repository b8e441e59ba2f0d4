// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs du moteur d'expressions.
///
/// Toutes sont locales et récupérables par l'appelant : aucune ne doit faire
/// tomber l'hôte. Le message `Display` est directement affichable tel quel
/// (le tableau de bord n'a jamais besoin de distinguer les variantes).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("Entrée vide")]
    EntreeVide,

    /// Run de lettres qui ne correspond à aucune fonction connue.
    #[error("identifiant inconnu: '{0}'")]
    IdentifiantInconnu(String),

    /// Littéral numérique mal formé (ex: deux points décimaux).
    #[error("nombre invalide: '{0}'")]
    NombreInvalide(String),

    #[error("parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    /// Arité opérateur/opérande incohérente, ou pile finale non unitaire.
    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("pourcentage sans opérande")]
    PourcentInvalide,

    #[error("fonction sans argument")]
    FonctionInvalide,

    /// Division par zéro, domaine refusé, ou résultat non fini.
    #[error("erreur de calcul: {0}")]
    ErreurMath(&'static str),
}
