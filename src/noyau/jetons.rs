// src/noyau/jetons.rs

use num_rational::BigRational;

use super::lecture::{lire_numeral, texte_decimal, PRECISION_TRAVAIL};
use super::trig::TrigFn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (factorielle, postfixe)

    LPar,
    RPar,

    Fonction(Fonction),

    // Tout mot non reconnu : le validateur le rejette.
    Mot(String),
}

/// Fonctions préfixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Log,
    Ln,
    Trig(TrigFn),
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        let f = match nom {
            "sqrt" => Fonction::Sqrt,
            "log" => Fonction::Log,
            "ln" => Fonction::Ln,
            "sin" => Fonction::Trig(TrigFn::Sin),
            "cos" => Fonction::Trig(TrigFn::Cos),
            "tan" => Fonction::Trig(TrigFn::Tan),
            "csc" => Fonction::Trig(TrigFn::Csc),
            "sec" => Fonction::Trig(TrigFn::Sec),
            "cot" => Fonction::Trig(TrigFn::Cot),
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Trig(t) => t.nom(),
        }
    }
}

/// Découpe le texte substitué sur les espaces : un mot = un jeton.
/// Ne peut pas échouer ; un mot inconnu devient Tok::Mot.
pub fn tokenize(s: &str) -> Vec<Tok> {
    s.split_whitespace().map(jeton).collect()
}

fn jeton(mot: &str) -> Tok {
    match mot {
        "+" => Tok::Plus,
        "-" => Tok::Minus,
        "*" => Tok::Star,
        "/" => Tok::Slash,
        "^" => Tok::Caret,
        "!" => Tok::Bang,
        "(" => Tok::LPar,
        ")" => Tok::RPar,
        _ => {
            if let Some(r) = lire_numeral(mot) {
                return Tok::Num(r);
            }
            match Fonction::depuis_nom(mot) {
                Some(f) => Tok::Fonction(f),
                None => Tok::Mot(mot.to_string()),
            }
        }
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => texte_decimal(r, PRECISION_TRAVAIL),
            Tok::Fonction(f) => f.nom().to_string(),
            Tok::Mot(m) => format!("?{m}"),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
