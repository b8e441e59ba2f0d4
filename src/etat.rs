//! src/etat.rs
//!
//! État interactif de la calculatrice (sans vue).
//!
//! Rôle : contenir l'état de la session (saisie, aperçu, erreur, historique)
//! et offrir des opérations de saisie validées, sans logique d'affichage.
//!
//! Contrats (Loi de Clément, version session) :
//! - Aucune logique d'évaluation ici au-delà d'un appel au noyau.
//! - Après CHAQUE édition, l'aperçu reflète l'évaluation de la saisie
//!   courante ou le marqueur d'erreur, jamais une valeur périmée.
//! - L'historique n'est alimenté que par un commit explicite, jamais par
//!   l'aperçu.

use chrono::{DateTime, Local};

use crate::noyau::eval_expression;
use crate::noyau::fonctions::Fonction;
use crate::noyau::format::{format_nombre, format_nombre_groupe, MARQUEUR_ERREUR};

/// Capacité de l'historique (les plus récentes d'abord).
const HISTORIQUE_MAX: usize = 60;

/// Une évaluation committée.
#[derive(Clone, Debug)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
    pub horodatage: DateTime<Local>,
}

#[derive(Clone, Debug, Default)]
pub struct EtatCalc {
    // --- saisie utilisateur ---
    pub entree: String,

    // --- aperçu en direct ---
    pub apercu: String,
    pub apercu_dispo: bool, // false si vide ou non évaluable

    // --- dernier commit en échec ---
    pub erreur: String,

    // --- historique (plus récent en tête, borné) ---
    pub historique: Vec<EntreeHistorique>,
}

impl EtatCalc {
    /* ------------------------ Saisie (touches du pavé) ------------------------ */

    /// Presse une touche : chiffre, point, opérateur, parenthèse, '%'.
    ///
    /// La validation garde la saisie syntaxiquement sensée AVANT toute
    /// évaluation complète : pas de doubles opérateurs, pas de groupe
    /// vide, multiplication implicite devant '('.
    pub fn presser(&mut self, symbole: char) {
        match symbole {
            '0'..='9' => self.entree.push(symbole),
            '.' => self.presser_point(),
            '(' => self.presser_ouvrante(),
            ')' => self.presser_fermante(),
            '%' => self.presser_pourcent(),
            '+' | '-' | '−' | '*' | '×' | '/' | '÷' | '^' => self.presser_operateur(symbole),
            _ => {} // touche inconnue : ignorée
        }
        self.rafraichir_apercu();
    }

    fn presser_point(&mut self) {
        // un seul point par run numérique
        let deja_un_point = self
            .entree
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .any(|c| c == '.');
        if deja_un_point {
            return;
        }
        self.entree.push('.');
    }

    fn presser_ouvrante(&mut self) {
        match self.entree.chars().last() {
            None => self.entree.push('('),
            Some(c) if c.is_ascii_digit() || c == ')' || c == '%' => {
                // multiplication implicite : "5(" se lit "5×("
                self.entree.push('×');
                self.entree.push('(');
            }
            Some('(') => {} // doublon direct : ignoré
            Some(_) => self.entree.push('('), // après un opérateur
        }
    }

    fn presser_fermante(&mut self) {
        if self.entree.is_empty() || self.parentheses_ouvertes() == 0 {
            return;
        }
        match self.entree.chars().last() {
            Some('(') => {} // groupe vide refusé
            Some(c) if est_operateur(c) => {}
            _ => self.entree.push(')'),
        }
    }

    fn presser_pourcent(&mut self) {
        // '%' suit une valeur fermée
        match self.entree.chars().last() {
            Some(c) if c.is_ascii_digit() || c == ')' => self.entree.push('%'),
            _ => {}
        }
    }

    fn presser_operateur(&mut self, symbole: char) {
        let glyphe = glyphe_affichage(symbole);

        match self.entree.chars().last() {
            // seul le moins unaire peut ouvrir une expression ou un groupe
            // (le noyau le réécrit en "0-")
            None => {
                if glyphe == '−' {
                    self.entree.push('−');
                }
            }
            Some('(') => {
                if glyphe == '−' {
                    self.entree.push('−');
                }
            }
            Some(c) if est_operateur(c) => {} // pas de doubles opérateurs
            Some(_) => self.entree.push(glyphe),
        }
    }

    /// Insère une fonction scientifique ("sin", "log", ...) suivie de '('.
    /// Même règle de multiplication implicite que la parenthèse ouvrante.
    pub fn presser_fonction(&mut self, nom: &str) {
        if Fonction::depuis_nom(nom).is_none() {
            return; // pavé inconnu : ignoré
        }

        if let Some(c) = self.entree.chars().last() {
            if c.is_ascii_digit() || c == ')' || c == '%' {
                self.entree.push('×');
            }
        }
        self.entree.push_str(nom);
        self.entree.push('(');

        self.rafraichir_apercu();
    }

    /// Backspace "intelligent" : retire d'un coup un motif de fonction
    /// ("sin(", "ln(", ...), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        for pat in ["sqrt(", "sin(", "cos(", "tan(", "log(", "ln("] {
            if self.entree.ends_with(pat) {
                self.entree.truncate(self.entree.len() - pat.len());
                self.rafraichir_apercu();
                return;
            }
        }

        self.entree.pop();
        self.rafraichir_apercu();
    }

    /* ------------------------ Actions C / AC ------------------------ */

    /// C : efface seulement la saisie (historique conservé).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.rafraichir_apercu();
    }

    /// AC : remise à zéro totale, historique compris.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.historique.clear();
        self.rafraichir_apercu();
    }

    /* ------------------------ Commit ------------------------ */

    /// Évalue la saisie et la committe dans l'historique.
    ///
    /// - Saisie vide : on committe "0" (comportement pavé).
    /// - Succès : entrée {expression, résultat, horodatage} en tête,
    ///   éviction au-delà de la capacité, la saisie devient le résultat.
    /// - Échec : la saisie est effacée et le message conservé.
    ///   Choix UX assumé : un appelant peut préférer garder la saisie
    ///   fautive ; on reproduit ici le comportement du produit.
    pub fn evaluer_et_committer(&mut self) {
        let expression = if self.entree.trim().is_empty() {
            "0".to_string()
        } else {
            self.entree.clone()
        };

        match eval_expression(&expression) {
            Ok((valeur, _affichage, _d)) => {
                self.erreur.clear();

                self.historique.insert(
                    0,
                    EntreeHistorique {
                        expression,
                        resultat: format_nombre_groupe(valeur),
                        horodatage: Local::now(),
                    },
                );
                self.historique.truncate(HISTORIQUE_MAX);

                self.entree = format_nombre(valeur);
            }
            Err(e) => {
                self.erreur = e.to_string();
                self.entree.clear();
            }
        }

        self.rafraichir_apercu();
    }

    /* ------------------------ Aperçu ------------------------ */

    /// Recalcule l'aperçu en direct.
    /// Invariant : appelé après CHAQUE édition de `entree`.
    fn rafraichir_apercu(&mut self) {
        if self.entree.trim().is_empty() {
            self.apercu.clear();
            self.apercu_dispo = false;
            return;
        }

        match eval_expression(&self.entree) {
            Ok((_valeur, affichage, _d)) => {
                self.apercu = affichage;
                self.apercu_dispo = true;
            }
            Err(_) => {
                self.apercu = MARQUEUR_ERREUR.to_string();
                self.apercu_dispo = false;
            }
        }
    }

    fn parentheses_ouvertes(&self) -> usize {
        let ouvrantes = self.entree.chars().filter(|c| *c == '(').count();
        let fermantes = self.entree.chars().filter(|c| *c == ')').count();
        ouvrantes.saturating_sub(fermantes)
    }
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '−' | '*' | '×' | '/' | '÷' | '^')
}

fn glyphe_affichage(c: char) -> char {
    match c {
        '-' => '−',
        '*' => '×',
        '/' => '÷',
        autre => autre,
    }
}
