//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> tokenize -> RPN -> évaluation sur pile -> format
//!
//! Remarque : l'évaluation travaille directement sur la RPN avec une pile
//! de f64 ; aucune primitive d'évaluation dynamique de texte, les modes
//! d'échec sont énumérés dans ErreurCalc.

use log::debug;

use super::erreur::ErreurCalc;
use super::format::format_nombre;
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::to_rpn;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub note: String,
}

/// API publique : évalue une expression et retourne:
/// - la valeur (toujours finie)
/// - son affichage formaté
/// - la démarche (jetons, rpn)
///
/// Pure et rejouable : deux appels sur le même texte donnent le même
/// résultat, aucun état caché entre les appels.
pub fn eval_expression(expr_str: &str) -> Result<(f64, String, DemarcheNoyau), ErreurCalc> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::EntreeVide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons: {jetons_txt}");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!("rpn: {rpn_txt}");

    // 3) Pile
    let valeur = eval_rpn(&rpn)?;

    // 4) Affichage
    let affichage = format_nombre(valeur);

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        note: "Pipeline: jetons → RPN → pile f64 → format.".into(),
    };

    Ok((valeur, affichage, d))
}

/// Évalue une RPN avec une pile explicite de f64.
///
/// - Num : empilé.
/// - '%' : dépile x, empile x/100.
/// - fonction : dépile x, empile f(x) (trig en degrés).
/// - opérateur : dépile b puis a, empile a OP b.
/// - à la fin, exactement une valeur doit rester, et elle doit être finie.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurCalc> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Percent => {
                let x = st.pop().ok_or(ErreurCalc::PourcentInvalide)?;
                st.push(x / 100.0);
            }

            Tok::Fonction(f) => {
                let x = st.pop().ok_or(ErreurCalc::FonctionInvalide)?;
                st.push(f.appliquer(x)?);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(ErreurCalc::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurCalc::ExpressionInvalide)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => {
                        if b == 0.0 {
                            return Err(ErreurCalc::ErreurMath("division par zéro"));
                        }
                        a / b
                    }
                    Tok::Caret => a.powf(b),
                    _ => unreachable!(),
                };

                // Débordement / NaN intermédiaire : classé erreur, jamais
                // affiché comme un nombre.
                if !v.is_finite() {
                    return Err(ErreurCalc::ErreurMath("résultat non fini"));
                }
                st.push(v);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurCalc::ExpressionInvalide),
        }
    }

    if st.len() != 1 {
        return Err(ErreurCalc::ExpressionInvalide);
    }

    let v = st.pop().unwrap();
    if !v.is_finite() {
        return Err(ErreurCalc::ErreurMath("résultat non fini"));
    }
    Ok(v)
}
