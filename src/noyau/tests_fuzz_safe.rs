//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline dicté sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : un énoncé bien formé n’échoue jamais en "expression malformée"
//! - invariant mémoire : la case précédente ne bouge qu’avec un résultat différent

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::Expression;

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
    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’énoncés (bornée) ------------------------ */

const NOMBRES: &[&str] = &[
    "zero",
    "two",
    "seven",
    "twelve point five",
    "forty two",
    "negative three",
    "one hundred one",
    "point two five",
    "pi",
    "e",
];

const BINAIRES: &[&str] = &["plus", "minus", "times", "divided by", "over"];

const PREFIXES: &[&str] = &[
    "the square root of",
    "the natural log of",
    "the log of",
    "the sine of",
    "co sign of",
    "the tangent of",
];

/// Vocabulaire libre : mots utiles, mots parasites, mots-nombres isolés.
const VRAC: &[&str] = &[
    "one", "thousand", "hundred", "point", "negative", "plus", "minus", "times", "divided",
    "by", "open", "close", "paren", "the", "square", "root", "of", "sine", "co", "sign",
    "factorial", "squared", "percent", "answer", "banana", "e", "pi", "oh", "twenty",
];

fn gen_atome(rng: &mut Rng) -> String {
    rng.choose(NOMBRES).to_string()
}

/// Énoncé bien formé par construction.
fn gen_enonce(rng: &mut Rng, profondeur: usize) -> String {
    if profondeur == 0 {
        return gen_atome(rng);
    }

    match rng.pick(6) {
        0 => gen_atome(rng),
        1 | 2 => format!(
            "{} {} {}",
            gen_enonce(rng, profondeur - 1),
            rng.choose(BINAIRES),
            gen_enonce(rng, profondeur - 1)
        ),
        3 => format!(
            "open paren {} close paren",
            gen_enonce(rng, profondeur - 1)
        ),
        4 => format!(
            "{} open paren {} close paren",
            rng.choose(PREFIXES),
            gen_enonce(rng, profondeur - 1)
        ),
        _ => format!(
            "open paren {} close paren squared",
            gen_enonce(rng, profondeur - 1)
        ),
    }
}

fn gen_vrac(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(10) as usize;
    (0..n)
        .map(|_| rng.choose(VRAC))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exécute un énoncé et renvoie la sortie observable (texte ou famille d’erreur).
fn executer(e: &mut Expression, enonce: &str) -> Result<String, ErreurCalcul> {
    e.set_acoustic_representation(enonce)?;
    e.resultat().map(|d| d.to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_enonces_bien_formes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let enonce = gen_enonce(&mut rng, 4);
        let mut e = Expression::new();

        match executer(&mut e, &enonce) {
            Ok(_) => seen_ok += 1,
            Err(ErreurCalcul::ResultatIndefini(_) | ErreurCalcul::ArgumentInvalide(_)) => {
                seen_err += 1
            }
            Err(autre) => panic!("erreur non attendue: enonce={enonce:?} err={autre}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_vrac_sans_panique_et_memoire_coherente() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut e = Expression::new();

    for _ in 0..300 {
        budget(t0, max);

        let enonce = gen_vrac(&mut rng);
        let courant_avant = e.dernier_resultat();
        let precedent_avant = e.resultat_precedent();

        match executer(&mut e, &enonce) {
            Ok(texte) => {
                assert_eq!(texte, e.dernier_resultat().to_string());
                if e.dernier_resultat() != courant_avant {
                    assert_eq!(e.resultat_precedent(), courant_avant, "enonce={enonce:?}");
                }
            }
            Err(_) => {
                // échec : aucune case ne bouge
                assert_eq!(e.dernier_resultat(), courant_avant, "enonce={enonce:?}");
                assert_eq!(e.resultat_precedent(), precedent_avant, "enonce={enonce:?}");
            }
        }
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let sorties = |seed: u64| {
        let mut rng = Rng::new(seed);
        let mut e = Expression::new();
        (0..60)
            .map(|_| {
                let enonce = gen_enonce(&mut rng, 3);
                executer(&mut e, &enonce)
            })
            .collect::<Vec<_>>()
    };

    let a = sorties(0x5EED);
    budget(t0, max);
    let b = sorties(0x5EED);
    budget(t0, max);

    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_reponse_reinjectee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut e = Expression::new();
    executer(&mut e, "one").unwrap();
    executer(&mut e, "two").unwrap();

    // answer (= case précédente) plus two : chaque tour avance d’un cran
    for _ in 0..10 {
        budget(t0, max);
        let texte = e.substituer_reponse("answer plus two");
        executer(&mut e, &texte).unwrap_or_else(|err| panic!("{texte:?}: {err}"));
    }

    assert_eq!(e.dernier_resultat().to_string(), "12");
    assert_eq!(e.resultat_precedent().to_string(), "11");
}
