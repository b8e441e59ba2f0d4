// src/noyau/format.rs

/// Marqueur d'erreur d'affichage : distinct de toute chaîne numérique
/// valide, pour que l'aval puisse brancher sans re-parser.
pub const MARQUEUR_ERREUR: &str = "Erreur";

/// Seuils de bascule en notation exponentielle.
const SEUIL_GRAND: f64 = 1e10;
const SEUIL_PETIT: f64 = 1e-6;

/// Décimales affichées avant élagage des zéros de queue.
const DECIMALES_MAX: usize = 10;

/* ------------------------ Affichage principal ------------------------ */

/// Formate une valeur pour l'affichage.
///
/// - |v| ≥ 1e10 ou 0 < |v| < 1e-6 : notation exponentielle normalisée
/// - sinon : au plus 10 décimales, zéros de queue (et point nu) élagués
/// - non fini : marqueur "Erreur", jamais un nombre
pub fn format_nombre(v: f64) -> String {
    if !v.is_finite() {
        return MARQUEUR_ERREUR.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if abs >= SEUIL_GRAND || abs < SEUIL_PETIT {
        return format!("{v:e}");
    }

    let mut s = format!("{v:.prec$}", prec = DECIMALES_MAX);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }

    // -0.0000000001 élagué en "-0" : on rend 0 tout court
    if s == "-0" {
        return "0".to_string();
    }
    s
}

/// Variante présentation : partie entière groupée par milliers.
///
/// Séparateur = virgule, que le tokenizer retire à la normalisation :
/// une sortie groupée reste ré-injectable en entrée.
pub fn format_nombre_groupe(v: f64) -> String {
    let s = format_nombre(v);
    if s == MARQUEUR_ERREUR || s.contains('e') {
        return s;
    }

    let (signe, reste) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s.as_str()),
    };
    let (entier, frac) = match reste.split_once('.') {
        Some((e, f)) => (e, Some(f)),
        None => (reste, None),
    };

    let groupe = grouper_milliers(entier);
    match frac {
        Some(f) => format!("{signe}{groupe}.{f}"),
        None => format!("{signe}{groupe}"),
    }
}

fn grouper_milliers(chiffres: &str) -> String {
    let n = chiffres.len();
    let mut out = String::with_capacity(n + n / 3);
    for (i, c) in chiffres.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
