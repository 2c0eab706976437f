//! Tests scientifiques (campagne) : propriétés de bout en bout sur des énoncés dictés.
//!
//! But : vérifier le pipeline complet (mots -> nombres -> phrases -> jetons ->
//! validation -> évaluation -> mémoire) sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::Expression;

fn calcul(expr: &str) -> Result<String, ErreurCalcul> {
    let mut e = Expression::new();
    e.set_acoustic_representation(expr)?;
    e.resultat().map(|d| d.to_string())
}

fn calcul_degres(expr: &str) -> Result<String, ErreurCalcul> {
    let mut e = Expression::new();
    e.set_angle_mode(false);
    e.set_acoustic_representation(expr)?;
    e.resultat().map(|d| d.to_string())
}

fn assert_vaut(expr: &str, attendu: &str) {
    let v = calcul(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert_eq!(v, attendu, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Écrit n (< 10^12) en mots anglais, forme canonique.
fn en_mots(mut n: u64) -> String {
    const UNITES: [&str; 20] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
        "eighteen", "nineteen",
    ];
    const DIZAINES: [&str; 10] = [
        "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    ];

    fn moins_de_mille(n: u64, out: &mut Vec<&'static str>) {
        let (c, r) = (n / 100, n % 100);
        if c > 0 {
            out.push(UNITES[c as usize]);
            out.push("hundred");
        }
        if r >= 20 {
            out.push(DIZAINES[(r / 10) as usize]);
            if r % 10 > 0 {
                out.push(UNITES[(r % 10) as usize]);
            }
        } else if r > 0 {
            out.push(UNITES[r as usize]);
        }
    }

    if n == 0 {
        return "zero".to_string();
    }

    let mut out = Vec::new();
    for (echelle, nom) in [
        (1_000_000_000, "billion"),
        (1_000_000, "million"),
        (1_000, "thousand"),
    ] {
        if n >= echelle {
            moins_de_mille(n / echelle, &mut out);
            out.push(nom);
            n %= echelle;
        }
    }
    moins_de_mille(n, &mut out);
    out.join(" ")
}

/* ------------------------ Nombres dictés ------------------------ */

#[test]
fn sci_entiers_en_mots_exacts() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut n: u64 = 1;
    let mut echantillons = vec![0, 7, 13, 20, 99, 100, 101, 110, 999, 1_000, 1_001, 987];
    while n < 1_000_000_000_000 {
        echantillons.push(n);
        echantillons.push(n * 7 + 3);
        n = n * 13 + 11;
    }
    echantillons.push(999_999_999_999);

    for v in echantillons.into_iter().filter(|&v| v < 1_000_000_000_000) {
        budget(t0, max);
        assert_vaut(&en_mots(v), &v.to_string());
    }
}

#[test]
fn sci_exemples_de_nombres() {
    assert_eq!(en_mots(987), "nine hundred eighty seven");
    assert_vaut("nine hundred eighty seven", "987");
    assert_vaut("negative twelve point zero five", "-12.05");
}

#[test]
fn sci_numeral_nu_inchange() {
    for s in ["42", "-3.25", "0.000000000001", "123456789012"] {
        assert_vaut(s, s);
    }
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn sci_precedence() {
    assert_vaut("two plus three times four", "14");
    assert_vaut("open paren two plus three close paren times four", "20");
    assert_vaut("the square root of four plus one", "3");
    // ^ lie un atome à droite, qui porte lui-même son ^
    assert_vaut("two to the power of three squared", "512");
    assert_vaut("three squared plus one", "10");
    assert_vaut("ten minus four minus three", "3");
}

#[test]
fn sci_fonctions() {
    assert_vaut("five factorial", "120");
    assert_vaut("fifty percent", "0.5");
    assert_vaut("the log of one thousand", "3");
    assert_vaut("the natural log of e", "1");
    assert_vaut("pi", "3.14159265359");
    assert_vaut("co sign of zero", "1");
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_sinus_en_degres() {
    assert_eq!(calcul_degres("sine of thirty").unwrap(), "0.5");
    assert_eq!(calcul_degres("the co sign of sixty").unwrap(), "0.5");
    // l’opérande trig englobe l’additif
    assert_eq!(calcul_degres("sine of twenty plus ten").unwrap(), "0.5");
}

#[test]
fn sci_sinus_en_radians() {
    assert_vaut("sine of pi", "0");
    assert_vaut("sine of pi divided by two", "1");
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_division_par_zero() {
    match calcul("one divided by zero") {
        Err(ErreurCalcul::ResultatIndefini(_)) => {}
        autre => panic!("attendu indéfini, obtenu {autre:?}"),
    }
}

#[test]
fn sci_operateur_en_tete_rejete_avant_evaluation() {
    match calcul("plus two") {
        Err(ErreurCalcul::ExpressionMalformee(_)) => {}
        autre => panic!("attendu expression malformée, obtenu {autre:?}"),
    }
}

#[test]
fn sci_nombre_malforme() {
    match calcul("two thousand one thousand") {
        Err(ErreurCalcul::NombreMalforme(_)) => {}
        autre => panic!("attendu nombre malformé, obtenu {autre:?}"),
    }
}

/* ------------------------ Mémoire ------------------------ */

#[test]
fn sci_memoire_idempotente() {
    let mut e = Expression::new();
    e.set_acoustic_representation("six").unwrap();
    e.resultat().unwrap();
    e.set_acoustic_representation("six times seven").unwrap();

    let a = e.resultat().unwrap();
    let p1 = e.resultat_precedent();
    let b = e.resultat().unwrap();
    let p2 = e.resultat_precedent();

    assert_eq!(a, b);
    assert_eq!(p1, p2);
    assert_eq!(a.to_string(), "42");
    assert_eq!(p1.to_string(), "6");
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let profondeur = 60;
    let expr = format!(
        "{}one{}",
        "open paren ".repeat(profondeur),
        " plus one close paren".repeat(profondeur)
    );
    budget(t0, max);

    assert_vaut(&expr, &(profondeur + 1).to_string());
    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = vec!["one point five"; 200].join(" plus ");
    assert_vaut(&expr, "300");
    budget(t0, max);
}

#[test]
fn sci_stress_puissances_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2_000);

    let mut e = Expression::new();
    e.set_acoustic_representation(
        "open paren open paren one point one to the power of four thousand ninety six \
         close paren to the power of four thousand ninety six close paren \
         to the power of four thousand ninety six",
    )
    .unwrap();

    match e.resultat() {
        Err(ErreurCalcul::ResultatIndefini(_)) => {}
        autre => panic!("attendu indéfini, obtenu {autre:?}"),
    }
    budget(t0, max);
}
