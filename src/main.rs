// src/main.rs
//
// Calculatrice Or — pilote ligne de commande
// ------------------------------------------
// But:
// - Exercer le moteur et la session hors du tableau de bord
// - Une ligne = une expression, committée dans la session
// - Commandes ':' pour l'historique / la démarche / la remise à zéro
//
// Le tableau de bord pilote exactement la même EtatCalc depuis son pavé ;
// ici on se contente de lignes brutes, sans mise en page.

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use calculatrice_or::etat::EtatCalc;
use calculatrice_or::noyau::{eval_expression, DemarcheNoyau};

/// Titre unique (bannière + invite).
const TITRE_APP: &str = "Calculatrice Or";

fn main() -> ExitCode {
    env_logger::init();

    // Mode one-shot : arguments joints = une expression, zéro interaction.
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        let expr = args.join(" ");
        return match eval_expression(&expr) {
            Ok((_valeur, affichage, _d)) => {
                println!("{affichage}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("erreur: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // Mode interactif.
    match repl() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("erreur E/S: {e}");
            ExitCode::FAILURE
        }
    }
}

/* ------------------------ Boucle interactive ------------------------ */

fn repl() -> io::Result<()> {
    println!("{TITRE_APP} — :q quitte, :historique, :demarche, :efface");

    let stdin = io::stdin();
    let mut etat = EtatCalc::default();
    let mut derniere_demarche: Option<DemarcheNoyau> = None;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut ligne = String::new();
        if stdin.lock().read_line(&mut ligne)? == 0 {
            break; // EOF
        }
        let ligne = ligne.trim();

        match ligne {
            "" => continue,
            ":q" => break,

            ":efface" => {
                etat.reset_total();
                derniere_demarche = None;
                println!("(remise à zéro)");
            }

            ":historique" => {
                if etat.historique.is_empty() {
                    println!("(vide)");
                }
                for entree in &etat.historique {
                    println!(
                        "{}  {} = {}",
                        entree.horodatage.format("%H:%M:%S"),
                        entree.expression,
                        entree.resultat
                    );
                }
            }

            ":demarche" => match &derniere_demarche {
                Some(d) => {
                    println!("jetons : {}", d.jetons);
                    println!("rpn    : {}", d.rpn);
                    println!("note   : {}", d.note);
                }
                None => println!("(aucune évaluation)"),
            },

            expr => {
                derniere_demarche = eval_expression(expr).ok().map(|(_, _, d)| d);

                // On passe par la session : la ligne devient la saisie,
                // le commit alimente l'historique comme depuis le pavé.
                etat.entree = expr.to_string();
                etat.evaluer_et_committer();

                if etat.erreur.is_empty() {
                    println!("= {}", etat.entree);
                } else {
                    println!("erreur: {}", etat.erreur);
                }
            }
        }
    }

    Ok(())
}
