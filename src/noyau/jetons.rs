// src/noyau/jetons.rs

use super::erreur::ErreurCalc;
use super::fonctions::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions scientifiques, résolues dès la tokenisation.
    // NOTE: le moteur n'a pas de variables — un run de lettres est une
    // fonction connue ou une erreur, jamais un atome.
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,   // ^
    Percent, // % (unaire postfixé)

    LPar,
    RPar,
}

/// Normalise le texte avant tokenisation :
/// - glyphes d'affichage ×, ÷, − vers les opérateurs ASCII canoniques
/// - séparateurs de milliers (virgules) retirés : "1,234" se lit 1234
///
/// Le pavé de la calculatrice insère ×, ÷ et − ; le moteur ne connaît
/// que *, / et -.
pub fn normaliser(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '×' => Some('*'),
            '÷' => Some('/'),
            '−' => Some('-'),
            ',' => None,
            _ => Some(c),
        })
        .collect()
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5) avec exposant optionnel (1e12)
/// - opérateurs + - * / ^ % (après normalisation de ×, ÷, −)
/// - parenthèses ( )
/// - fonctions sin/cos/tan/sqrt/log/ln (insensibles à la casse)
///
/// Contrat : les espaces et tout glyphe non reconnu hors lettres sont
/// ignorés silencieusement. Seuls font échouer la tokenisation :
/// - un run de lettres qui n'est pas une fonction connue
/// - un littéral numérique mal formé ou non fini
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let s = normaliser(s);
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : run de lettres, normalisé en minuscules.
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match Fonction::depuis_nom(&w) {
                Some(f) => out.push(Tok::Fonction(f)),
                None => return Err(ErreurCalc::IdentifiantInconnu(word)),
            }
            continue;
        }

        // Nombre décimal : chiffres + point(s). Un run à plusieurs points
        // ("1.2.3") ne parse pas en f64 => NombreInvalide.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }

            // Exposant optionnel ("1e12", "2.5e-7") : les affichages
            // exponentiels du formateur restent ré-injectables en entrée.
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let num_str: String = chars[start..i].iter().collect();
            let v: f64 = num_str
                .parse()
                .map_err(|_| ErreurCalc::NombreInvalide(num_str.clone()))?;

            // Contrat : aucun jeton ne porte une valeur non finie.
            if !v.is_finite() {
                return Err(ErreurCalc::NombreInvalide(num_str));
            }

            out.push(Tok::Num(v));
            continue;
        }

        // Glyphe non reconnu : ignoré (le tokenizer reste total).
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (debug/"démarche") : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Percent => "%".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
