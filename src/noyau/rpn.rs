// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
// Objectif:
// - Convertir une suite de Tok en RPN, précédences résolues
// - L'évaluation se fait ensuite sur pile, sans re-consulter les précédences
//
// Règles:
// - Précédences : ^ = 4, * / = 3, + - = 2 ; les fonctions lient plus fort
//   que tout opérateur binaire.
// - '^' associatif à droite, tout le reste à gauche.
// - '%' est unaire postfixé : émis immédiatement en sortie.
// - Moins unaire : en début d'expression ou juste après '(', on injecte 0 :
//   "-x" => "0 x -".

use super::erreur::ErreurCalc;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 2,
        Tok::Star | Tok::Slash => 3,
        Tok::Caret => 4,
        Tok::Fonction(_) => 5,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(30), RPar]
///   rpn:    [Num(30), Fonction(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à distinguer moins unaire et moins binaire.
    let mut prev_was_value = false;

    // Position d'injection du 0 : début d'expression ou juste après '('.
    let mut debut_de_groupe = true;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
                debut_de_groupe = false;
            }

            Tok::Fonction(_) => {
                // fonction : sur la pile, elle sortira après son argument
                ops.push(tok);
                prev_was_value = false;
                debut_de_groupe = false;
            }

            Tok::Percent => {
                // unaire postfixé : sortie immédiate, la valeur reste "fermée"
                out.push(tok);
                prev_was_value = true;
                debut_de_groupe = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
                debut_de_groupe = true;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                let mut ouvrante_trouvee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_trouvee = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_trouvee {
                    return Err(ErreurCalc::ParenthesesDesequilibrees);
                }

                // si une fonction est au sommet, elle enveloppait ce groupe
                if matches!(ops.last(), Some(Tok::Fonction(_))) {
                    out.push(ops.pop().unwrap());
                }

                prev_was_value = true;
                debut_de_groupe = false;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret => {
                depiler_operateurs(&tok, &mut ops, &mut out);
                ops.push(tok);
                prev_was_value = false;
                debut_de_groupe = false;
            }

            Tok::Minus => {
                // moins unaire : équivalent de la réécriture "0-"
                if !prev_was_value && debut_de_groupe {
                    out.push(Tok::Num(0.0));
                }

                depiler_operateurs(&Tok::Minus, &mut ops, &mut out);
                ops.push(Tok::Minus);
                prev_was_value = false;
                debut_de_groupe = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalc::ParenthesesDesequilibrees);
        }
        out.push(op);
    }

    Ok(out)
}

/// Dépile vers la sortie tant que la précédence/associativité l'exige.
/// Une '(' bloque toujours ; une fonction en sommet sort systématiquement
/// (elle lie plus fort que tout opérateur binaire entrant).
fn depiler_operateurs(tok: &Tok, ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }

        let p_top = precedence(top);
        let p_tok = precedence(tok);

        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if doit_pop {
            out.push(ops.pop().unwrap());
        } else {
            break;
        }
    }
}
