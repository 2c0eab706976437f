// src/noyau/nombres.rs
//
// Normalisation lexicale : mots-nombres -> littéraux décimaux
// -----------------------------------------------------------
// Une suite maximale de mots-nombres (ou "point", ou "negative" en tête)
// devient UN littéral décimal signé, recollé à sa place.
//
// Grammaire d’une suite (ordre anglais canonique, imposé) :
//   suite     := ["negative"] entier? ["point" chiffre{0,12}]
//   entier    := "zero" | "oh" | groupe ("billion")? groupe ("million")? ...
//   groupe    := base, suivi d’un mot d’échelle strictement décroissant
//   base      := unité "hundred" [sous_cent] | sous_cent
//   sous_cent := unité | dix..dix-neuf | dizaine [unité]
//
// Toute suite hors grammaire => NombreMalforme (l’énoncé entier est rejeté).

use std::collections::HashMap;
use std::sync::OnceLock;

use super::erreur::{ErreurCalcul, Resultat};

/// Nombre maximal de chiffres après "point".
pub const DECIMALES_MAX: usize = 12;

const MOT_POINT: &str = "point";
const MOT_NEGATIF: &str = "negative";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotNombre {
    /// "zero" / "oh"
    Zero,
    /// 1..9
    Unite(u64),
    /// 10..19
    DixA19(u64),
    /// 20, 30, ..., 90
    Dizaine(u64),
    /// "hundred"
    Cent,
    /// thousand / million / billion
    Echelle(u64),
}

impl MotNombre {
    pub fn valeur(self) -> u64 {
        match self {
            MotNombre::Zero => 0,
            MotNombre::Unite(v) | MotNombre::DixA19(v) | MotNombre::Dizaine(v) => v,
            MotNombre::Cent => 100,
            MotNombre::Echelle(v) => v,
        }
    }

    /// Valeur d’un chiffre après "point" (0..9), sinon None.
    fn chiffre(self) -> Option<u64> {
        match self {
            MotNombre::Zero => Some(0),
            MotNombre::Unite(v) => Some(v),
            _ => None,
        }
    }
}

static TABLE_NOMBRES: OnceLock<HashMap<&'static str, MotNombre>> = OnceLock::new();

/// Table mot -> valeur, construite une fois, jamais modifiée.
pub fn table_nombres() -> &'static HashMap<&'static str, MotNombre> {
    TABLE_NOMBRES.get_or_init(|| {
        use MotNombre::*;

        let mut t = HashMap::new();
        t.insert("zero", Zero);
        t.insert("oh", Zero);

        let unites = [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        ];
        for (k, mot) in unites.into_iter().enumerate() {
            t.insert(mot, Unite(k as u64 + 1));
        }

        let dix_a_19 = [
            "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
            "seventeen", "eighteen", "nineteen",
        ];
        for (k, mot) in dix_a_19.into_iter().enumerate() {
            t.insert(mot, DixA19(k as u64 + 10));
        }

        let dizaines = [
            "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
        ];
        for (k, mot) in dizaines.into_iter().enumerate() {
            t.insert(mot, Dizaine((k as u64 + 2) * 10));
        }

        t.insert("hundred", Cent);
        t.insert("thousand", Echelle(1_000));
        t.insert("million", Echelle(1_000_000));
        t.insert("billion", Echelle(1_000_000_000));
        t
    })
}

fn mot_nombre(mot: &str) -> Option<MotNombre> {
    table_nombres().get(mot).copied()
}

fn fait_partie_d_une_suite(mot: &str) -> bool {
    mot == MOT_POINT || mot == MOT_NEGATIF || mot_nombre(mot).is_some()
}

/* ------------------------ Normalisation d’un énoncé ------------------------ */

/// Remplace chaque suite de mots-nombres par son littéral décimal.
/// Les autres mots passent tels quels ; le résultat est séparé par des espaces simples.
pub fn remplacer_mots_nombres(texte: &str) -> Resultat<String> {
    let mut sortie: Vec<String> = Vec::new();
    let mut suite: Vec<&str> = Vec::new();

    for mot in texte.split_whitespace() {
        if !fait_partie_d_une_suite(mot) {
            if !suite.is_empty() {
                sortie.push(convertir_suite(&suite)?);
                suite.clear();
            }
            sortie.push(mot.to_string());
            continue;
        }

        // "negative" ouvre toujours une nouvelle suite
        if mot == MOT_NEGATIF && !suite.is_empty() {
            sortie.push(convertir_suite(&suite)?);
            suite.clear();
        }
        suite.push(mot);
    }

    if !suite.is_empty() {
        sortie.push(convertir_suite(&suite)?);
    }

    Ok(sortie.join(" "))
}

/* ------------------------ Grammaire d’une suite ------------------------ */

/// Curseur sur les mots d’une suite.
struct Lecteur<'a> {
    mots: &'a [&'a str],
    pos: usize,
}

impl<'a> Lecteur<'a> {
    fn courant(&self) -> Option<&'a str> {
        self.mots.get(self.pos).copied()
    }

    fn courant_nombre(&self) -> Option<MotNombre> {
        self.courant().and_then(mot_nombre)
    }

    fn avance(&mut self) {
        self.pos += 1;
    }

    fn consomme(&mut self, mot: &str) -> bool {
        if self.courant() == Some(mot) {
            self.avance();
            true
        } else {
            false
        }
    }

    fn fini(&self) -> bool {
        self.pos >= self.mots.len()
    }

    /// sous_cent := unité | dix..dix-neuf | dizaine [unité]
    fn sous_cent(&mut self) -> Option<u64> {
        match self.courant_nombre()? {
            MotNombre::Unite(v) | MotNombre::DixA19(v) => {
                self.avance();
                Some(v)
            }
            MotNombre::Dizaine(d) => {
                self.avance();
                if let Some(MotNombre::Unite(u)) = self.courant_nombre() {
                    self.avance();
                    return Some(d + u);
                }
                Some(d)
            }
            _ => None,
        }
    }

    /// base := unité "hundred" [sous_cent] | sous_cent
    /// "hundred" ne multiplie que l’unité qui le précède ("twelve hundred" est rejeté).
    fn base(&mut self) -> Option<u64> {
        let v = self.sous_cent()?;
        if v < 10 && self.courant_nombre() == Some(MotNombre::Cent) {
            self.avance();
            let reste = self.sous_cent().unwrap_or(0);
            return Some(v * 100 + reste);
        }
        Some(v)
    }

    /// Partie entière ; None si aucun mot consommé.
    fn entier(&mut self) -> Result<Option<u64>, ()> {
        if self.courant_nombre() == Some(MotNombre::Zero) {
            self.avance();
            return Ok(Some(0));
        }

        let mut total: u64 = 0;
        let mut vu = false;
        let mut derniere_echelle = u64::MAX;

        while let Some(b) = self.base() {
            vu = true;
            match self.courant_nombre() {
                Some(MotNombre::Echelle(e)) => {
                    // échelles strictement décroissantes : billion > million > thousand
                    if e >= derniere_echelle {
                        return Err(());
                    }
                    self.avance();
                    total += b * e;
                    derniere_echelle = e;
                }
                _ => {
                    total += b;
                    break;
                }
            }
        }

        Ok(vu.then_some(total))
    }
}

/// Convertit une suite (déjà isolée) en littéral décimal canonique.
fn convertir_suite(mots: &[&str]) -> Resultat<String> {
    let malforme = || ErreurCalcul::NombreMalforme(mots.join(" "));

    let mut lecteur = Lecteur { mots, pos: 0 };
    let negatif = lecteur.consomme(MOT_NEGATIF);

    let entier = lecteur.entier().map_err(|_| malforme())?;

    let mut decimales = String::new();
    let a_point = lecteur.consomme(MOT_POINT);
    if a_point {
        while let Some(c) = lecteur.courant_nombre().and_then(MotNombre::chiffre) {
            if decimales.len() == DECIMALES_MAX {
                return Err(malforme());
            }
            decimales.push_str(&c.to_string());
            lecteur.avance();
        }
    }

    if !lecteur.fini() || (entier.is_none() && !a_point) {
        return Err(malforme());
    }

    let mut litteral = String::new();
    if negatif {
        litteral.push('-');
    }
    litteral.push_str(&entier.unwrap_or(0).to_string());
    if !decimales.is_empty() {
        litteral.push('.');
        litteral.push_str(&decimales);
    }
    Ok(litteral)
}
