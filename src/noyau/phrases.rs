// src/noyau/phrases.rs
//
// Substitution des phrases de fonctions
// -------------------------------------
// "divided by" -> "/", "the square root of" -> "sqrt", "pi" -> 3.14159..., etc.
//
// Règles :
// - table ORDONNÉE : les motifs les plus spécifiques d’abord
//   ("co sign" avant "sign", "natural log" avant "log", ...)
// - chaque règle remplace toutes ses occurrences, sans chevauchement,
//   avant de passer à la suivante
// - dernière passe : un "e" isolé devient le littéral de e
//
// Syntaxe des motifs (mot à mot) :
//   mot        mot obligatoire
//   (a|b)      un mot parmi plusieurs
//   [a] [a|b]  mot optionnel

use std::sync::OnceLock;

use super::lecture::{euler, pi, texte_constante};

#[derive(Clone, Debug)]
struct Element {
    alternatives: Vec<&'static str>,
    optionnel: bool,
}

impl Element {
    fn accepte(&self, mot: &str) -> bool {
        self.alternatives.iter().any(|a| *a == mot)
    }
}

#[derive(Clone, Debug)]
pub struct Regle {
    motif: Vec<Element>,
    symboles: Vec<String>,
}

impl Regle {
    fn nouvelle(motif: &'static str, symbole: &str) -> Regle {
        let motif: Vec<Element> = motif.split_whitespace().map(lire_element).collect();
        debug_assert!(motif.iter().any(|e| !e.optionnel), "motif vide");
        Regle {
            motif,
            symboles: symbole.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Fin de la correspondance commençant en `debut`, s’il y en a une (non vide).
    fn correspond(&self, mots: &[String], debut: usize) -> Option<usize> {
        fn essaie(elements: &[Element], mots: &[String], i: usize) -> Option<usize> {
            let Some((premier, reste)) = elements.split_first() else {
                return Some(i);
            };

            if mots.get(i).is_some_and(|m| premier.accepte(m)) {
                if let Some(fin) = essaie(reste, mots, i + 1) {
                    return Some(fin);
                }
            }
            if premier.optionnel {
                return essaie(reste, mots, i);
            }
            None
        }

        essaie(&self.motif, mots, debut).filter(|&fin| fin > debut)
    }

    fn appliquer(&self, mots: Vec<String>) -> Vec<String> {
        let mut sortie = Vec::with_capacity(mots.len());
        let mut i = 0;
        while i < mots.len() {
            match self.correspond(&mots, i) {
                Some(fin) => {
                    sortie.extend(self.symboles.iter().cloned());
                    i = fin;
                }
                None => {
                    sortie.push(mots[i].clone());
                    i += 1;
                }
            }
        }
        sortie
    }
}

fn lire_element(brut: &'static str) -> Element {
    let (interieur, optionnel) = if let Some(x) = brut.strip_prefix('[') {
        (x.trim_end_matches(']'), true)
    } else if let Some(x) = brut.strip_prefix('(') {
        (x.trim_end_matches(')'), false)
    } else {
        (brut, false)
    };

    Element {
        alternatives: interieur.split('|').collect(),
        optionnel,
    }
}

static TABLE_PHRASES: OnceLock<Vec<Regle>> = OnceLock::new();

/// Table (motif, symbole), dans l’ordre d’application.
pub fn table_phrases() -> &'static [Regle] {
    TABLE_PHRASES.get_or_init(|| {
        let pi_txt = texte_constante(pi());

        [
            ("(left|open) (parentheses|parenthesis|paren|bracket)", "("),
            ("(right|close) (parentheses|parenthesis|paren|bracket)", ")"),
            ("plus", "+"),
            ("minus", "-"),
            ("divided by", "/"),
            ("over", "/"),
            ("multiplied by", "*"),
            ("times", "*"),
            ("to the power [of]", "^"),
            ("squared", "^ 2"),
            ("cubed", "^ 3"),
            ("[the] [square] root [of]", "sqrt"),
            ("percent", "* 0.01"),
            ("factorial", "!"),
            ("fact or eel", "!"),
            ("[the] co sign [of]", "cos"),
            ("[the] cosine [of]", "cos"),
            ("[the] co see can't [of]", "csc"),
            ("[the] cosecant [of]", "csc"),
            ("[the] co tangent [of]", "cot"),
            ("[the] cotangent [of]", "cot"),
            ("[the] (sign|sine) [of]", "sin"),
            ("[the] tangent [of]", "tan"),
            ("[the] see can't [of]", "sec"),
            ("[the] secant [of]", "sec"),
            ("[the] natural (log|logarithm) [of]", "ln"),
            ("[the] (log|logarithm) [of]", "log"),
            ("pi", pi_txt.as_str()),
        ]
        .into_iter()
        .map(|(motif, symbole)| Regle::nouvelle(motif, symbole))
        .collect()
    })
}

/// Applique toute la table, puis la passe "e isolé".
pub fn substituer_phrases(texte: &str) -> String {
    let mut mots: Vec<String> = texte.split_whitespace().map(str::to_string).collect();

    for regle in table_phrases() {
        mots = regle.appliquer(mots);
    }

    let e_txt = texte_constante(euler());
    for mot in mots.iter_mut() {
        if *mot == "e" {
            *mot = e_txt.clone();
        }
    }

    mots.join(" ")
}
