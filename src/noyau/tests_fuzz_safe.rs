//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur doit être une variante énumérée, jamais une panique
//! - invariant clé : tout succès est fini et son affichage n'est pas
//!   le marqueur d'erreur

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::format::MARQUEUR_ERREUR;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn est_erreur_attendue(e: &ErreurCalc) -> bool {
    // Le générateur n'émet ni identifiants inconnus, ni nombres mal
    // formés, ni entrées vides : ces variantes signaleraient un bug du
    // tokenizer, pas une expression hors domaine.
    !matches!(
        e,
        ErreurCalc::IdentifiantInconnu(_)
            | ErreurCalc::NombreInvalide(_)
            | ErreurCalc::EntreeVide
    )
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = rng.pick(50);
    if rng.coin() {
        format!("{n}")
    } else {
        format!("{n}.{}", rng.pick(100))
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => gen_nombre(rng),
        2 => format!("{}%", rng.pick(500)),
        _ => format!("({})", gen_nombre(rng)),
    }
}

fn gen_fonction(rng: &mut Rng, arg: &str) -> String {
    let nom = match rng.pick(6) {
        0 => "sin",
        1 => "cos",
        2 => "tan",
        3 => "sqrt",
        4 => "log",
        _ => "ln",
    };
    format!("{nom}({arg})")
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(8) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("(-{})", gen_expr(rng, depth - 1)),
        6 => {
            // exposant borné : le débordement reste une erreur admise,
            // mais on évite de le provoquer à chaque tirage
            format!("({}^{})", gen_atome(rng), rng.pick(5))
        }
        _ => {
            let arg = gen_expr(rng, depth - 1);
            gen_fonction(rng, &arg)
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariant_fini_et_affichable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr) {
            Ok((valeur, affichage, _d)) => {
                assert!(valeur.is_finite(), "valeur non finie pour {expr:?}");
                assert_ne!(affichage, MARQUEUR_ERREUR, "succès non affichable: {expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    est_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne "balaye" rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop \"sage\"");
}

#[test]
fn fuzz_safe_rejouable() {
    let tirage = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        (0..60)
            .map(|_| {
                let expr = gen_expr(&mut rng, 3);
                match eval_expression(&expr) {
                    Ok((v, _, _)) => format!("{expr}={v}"),
                    Err(e) => format!("{expr}!{e}"),
                }
            })
            .collect()
    };

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    assert_eq!(tirage(0xBADC0DE), tirage(0xBADC0DE));
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let (v, _affichage, _d) =
        eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(0.5) = 400
    assert!((v - 400.0).abs() < 1e-9);
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    // pipeline itératif : l'imbrication ne consomme pas la pile d'appel
    let mut expr = String::new();
    for _ in 0..2000 {
        expr.push('(');
    }
    expr.push('1');
    for _ in 0..2000 {
        expr.push(')');
    }

    let (v, _affichage, _d) =
        eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, 1.0);
}
