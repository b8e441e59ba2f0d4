// src/noyau/fonctions.rs
//
// Table des fonctions unaires du moteur.
// Convention produit : trig en DEGRÉS (calculatrice grand public),
// log en base 10, ln népérien.

use super::erreur::ErreurCalc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Ln,
}

impl Fonction {
    /// Résolution d'un identifiant (déjà passé en minuscules).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "sqrt" => Some(Fonction::Sqrt),
            "log" => Some(Fonction::Log),
            "ln" => Some(Fonction::Ln),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
        }
    }

    /// Applique la fonction à une valeur.
    ///
    /// Les domaines refusés sont explicites (√ d'un négatif, log hors
    /// domaine) : jamais de NaN silencieux qui remonterait à l'affichage.
    pub fn appliquer(self, x: f64) -> Result<f64, ErreurCalc> {
        let v = match self {
            Fonction::Sin => x.to_radians().sin(),
            Fonction::Cos => x.to_radians().cos(),
            Fonction::Tan => x.to_radians().tan(),

            Fonction::Sqrt => {
                if x < 0.0 {
                    return Err(ErreurCalc::ErreurMath("racine d'un nombre négatif"));
                }
                x.sqrt()
            }

            Fonction::Log => {
                if x <= 0.0 {
                    return Err(ErreurCalc::ErreurMath("logarithme hors domaine"));
                }
                x.log10()
            }
            Fonction::Ln => {
                if x <= 0.0 {
                    return Err(ErreurCalc::ErreurMath("logarithme hors domaine"));
                }
                x.ln()
            }
        };

        if !v.is_finite() {
            return Err(ErreurCalc::ErreurMath("résultat non fini"));
        }
        Ok(v)
    }
}
