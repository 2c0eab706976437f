// src/noyau/lecture.rs
//
// Modèle décimal du noyau
// -----------------------
// - Valeurs exactes : BigRational (pas de flottant pour + - * /)
// - Division / √ / constantes : arrondies à PRECISION_TRAVAIL chiffres
// - Sortie : arrondi demi-haut à CHIFFRES_SORTIE chiffres, zéros finaux retirés

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::sync::OnceLock;

use super::erreur::{ErreurCalcul, Resultat};

/// Chiffres après la virgule de toute valeur rendue à l’appelant.
pub const CHIFFRES_SORTIE: usize = 12;

/// Chiffres après la virgule des calculs intermédiaires inexacts.
pub const PRECISION_TRAVAIL: usize = 32;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal complet.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> round_half_up(r * 10^digits), ex-aequo éloignés de zéro.
fn rational_scaled_arrondi(r: &BigRational, digits: usize) -> BigInt {
    let den = r.denom();
    let deux = BigInt::from(2);
    let a = r.numer().abs() * pow10(digits);
    let q = (a * &deux + den) / (den * &deux);
    if r.is_negative() {
        -q
    } else {
        q
    }
}

/// Arrondi demi-haut à `digits` chiffres après la virgule.
pub fn arrondir(r: &BigRational, digits: usize) -> BigRational {
    BigRational::new(rational_scaled_arrondi(r, digits), pow10(digits))
}

/// Texte “plain” : arrondi, puis zéros finaux et point final retirés.
pub fn texte_decimal(r: &BigRational, digits: usize) -> String {
    let brut = scaled_to_decimal(rational_scaled_arrondi(r, digits), digits);
    if !brut.contains('.') {
        return brut;
    }
    brut.trim_end_matches('0').trim_end_matches('.').to_string()
}

/* ------------------------ Littéraux numériques ------------------------ */

/// Forme acceptée : `-?\d*\.\d*` ou `-?\d+`, avec au moins un chiffre.
pub fn est_numeral(s: &str) -> bool {
    let corps = s.strip_prefix('-').unwrap_or(s);
    let mut points = 0usize;
    let mut chiffres = 0usize;
    for c in corps.chars() {
        match c {
            '0'..='9' => chiffres += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    chiffres > 0 && points <= 1
}

/// Lit un littéral décimal de façon exacte ("-12.05" -> -1205/100).
pub fn lire_numeral(s: &str) -> Option<BigRational> {
    if !est_numeral(s) {
        return None;
    }
    let (neg, corps) = match s.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, s),
    };
    let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));

    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    let n = if neg { -n } else { n };

    Some(BigRational::new(n, pow10(frac.len())))
}

/* ------------------------ Valeur rendue à l’appelant ------------------------ */

/// Décimal déjà arrondi à CHIFFRES_SORTIE chiffres.
/// `Display` donne la forme “plain” sans zéros finaux (ex: "0.5", "-12.05", "14").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal(BigRational);

impl Decimal {
    pub fn depuis(r: &BigRational) -> Self {
        Decimal(arrondir(r, CHIFFRES_SORTIE))
    }

    pub fn valeur(&self) -> &BigRational {
        &self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&texte_decimal(&self.0, CHIFFRES_SORTIE))
    }
}

/* ------------------------ Opérations inexactes ------------------------ */

/// a / b arrondi à la précision de travail.
pub fn diviser(a: &BigRational, b: &BigRational) -> Resultat<BigRational> {
    if b.is_zero() {
        return Err(ErreurCalcul::ResultatIndefini(format!(
            "{} / 0",
            texte_decimal(a, CHIFFRES_SORTIE)
        )));
    }
    Ok(arrondir(&(a / b), PRECISION_TRAVAIL))
}

/// Retour d’un calcul flottant vers le modèle exact.
/// NaN / ±∞ => indéfini.
pub fn depuis_f64(x: f64, quoi: &str) -> Resultat<BigRational> {
    BigRational::from_float(x)
        .ok_or_else(|| ErreurCalcul::ResultatIndefini(format!("{quoi} n’est pas fini")))
}

pub fn vers_f64(r: &BigRational) -> Resultat<f64> {
    r.to_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| ErreurCalcul::ArgumentInvalide("valeur hors de portée".into()))
}

/* ------------------------ π (Machin) + e (série) + cache ------------------------ */

/// arctan(1/q) en entier scalé (troncature) via série:
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut sign_pos = true;

    let mut q_pow = q.clone();
    let mut sum = BigInt::zero();

    loop {
        let d = &q_pow * BigInt::from((2 * k + 1) as i64);

        let term = scale / &d;
        if term.is_zero() {
            break;
        }

        if sign_pos {
            sum += &term;
        } else {
            sum -= &term;
        }

        q_pow *= &q;
        q_pow *= &q;

        sign_pos = !sign_pos;
        k += 1;
    }

    sum
}

fn pi_scaled_compute(digits: usize) -> BigInt {
    // extra pour amortir les erreurs de troncature
    let extra = 10usize;
    let scale = pow10(digits + extra);

    // Machin : π = 16*atan(1/5) - 4*atan(1/239)
    let a = arctan_inv_q_scaled(5, &scale);
    let b = arctan_inv_q_scaled(239, &scale);

    (BigInt::from(16) * a - BigInt::from(4) * b) / pow10(extra)
}

/// e = Σ 1/k! en entier scalé.
fn e_scaled_compute(digits: usize) -> BigInt {
    let extra = 10usize;
    let scale = pow10(digits + extra);

    let mut terme = scale.clone();
    let mut sum = BigInt::zero();
    let mut k: u32 = 1;
    while !terme.is_zero() {
        sum += &terme;
        terme /= BigInt::from(k);
        k += 1;
    }

    sum / pow10(extra)
}

static PI_CACHE: OnceLock<BigRational> = OnceLock::new();
static E_CACHE: OnceLock<BigRational> = OnceLock::new();

pub fn pi() -> &'static BigRational {
    PI_CACHE.get_or_init(|| {
        BigRational::new(pi_scaled_compute(PRECISION_TRAVAIL), pow10(PRECISION_TRAVAIL))
    })
}

pub fn euler() -> &'static BigRational {
    E_CACHE.get_or_init(|| {
        BigRational::new(e_scaled_compute(PRECISION_TRAVAIL), pow10(PRECISION_TRAVAIL))
    })
}

/// Littéral décimal d’une constante, à la précision de travail.
pub fn texte_constante(c: &BigRational) -> String {
    scaled_to_decimal(rational_scaled_arrondi(c, PRECISION_TRAVAIL), PRECISION_TRAVAIL)
}

/* ------------------------ √ (racine entière scalée) ------------------------ */

/// sqrt(r) en entier scalé : floor( sqrt(r) * 10^digits ), r = n/d >= 0
fn rational_sqrt_scaled(r: &BigRational, digits: usize) -> BigInt {
    let n = r.numer().clone();
    let d = r.denom().clone();

    if n.is_zero() {
        return BigInt::zero();
    }

    // y^2 ≈ (n * 10^(2*digits)) / d  =>  y = isqrt(floor(...)) exactement
    let target = n * pow10(2 * digits);
    let mut y = (&target / &d).sqrt();

    // garde-fou (floor)
    while (&y + 1u32) * (&y + 1u32) * &d <= target {
        y += 1u32;
    }
    while &y * &y * &d > target {
        y -= 1u32;
    }
    y
}

pub fn racine_carree(r: &BigRational) -> Resultat<BigRational> {
    if r.is_negative() {
        return Err(ErreurCalcul::ArgumentInvalide(format!(
            "√ de {}",
            texte_decimal(r, CHIFFRES_SORTIE)
        )));
    }
    Ok(BigRational::new(
        rational_sqrt_scaled(r, PRECISION_TRAVAIL),
        pow10(PRECISION_TRAVAIL),
    ))
}

/* ------------------------ Puissance entière exacte ------------------------ */

pub fn puissance_entiere(base: &BigRational, exp: i64) -> Resultat<BigRational> {
    if exp < 0 {
        let pos = puissance_entiere(base, -exp)?;
        return diviser(&BigRational::one(), &pos);
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base.clone();

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    Ok(acc)
}
