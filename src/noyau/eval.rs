//! Noyau — évaluation (descente récursive)
//!
//! Trois étages, curseur explicite sur les jetons :
//! - additif        : chaîne gauche de `+` / `-` sur des termes multiplicatifs
//! - multiplicatif  : chaîne gauche de `*` / `/` sur des atomes
//! - atome          : `( additif )` | numéral | fonction préfixe + opérande,
//!                    puis au plus un `!`, puis au plus un `^ atome`
//!
//! Particularités de liaison :
//! - sqrt / log / ln prennent un ATOME  (`sqrt 4 + 1` = `(sqrt 4) + 1`)
//! - sin / cos / tan / csc / sec / cot prennent un ADDITIF (`sin 2 + 3` = `sin(2+3)`)
//! - `^` ne lie qu’un atome à droite (donc `2 ^ 3 ^ 2` = `2 ^ (3 ^ 2)`)

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{format_tokens, Fonction, Tok};
use super::lecture::{
    depuis_f64, diviser, puissance_entiere, racine_carree, texte_decimal, vers_f64,
    CHIFFRES_SORTIE,
};
use super::trig::{self, ModeAngle};

/// Plus grand n accepté pour n!.
pub const FACTORIELLE_MAX: u64 = 5_000;

/// Plus grand |n| calculé exactement pour x ^ n (au-delà : flottant).
pub const EXPOSANT_EXACT_MAX: i64 = 4_096;

/// Taille estimée (bits numérateur + dénominateur) au-delà de laquelle x ^ n passe en flottant.
pub const BITS_EXACT_MAX: u64 = 1 << 20;

/// Évalue une suite de jetons déjà validée.
pub fn evaluer(jetons: &[Tok], mode: ModeAngle) -> Resultat<BigRational> {
    let mut a = Analyseur {
        jetons,
        pos: 0,
        mode,
    };
    let x = a.additif()?;
    if a.pos != jetons.len() {
        return Err(a.inattendu());
    }
    Ok(x)
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    mode: ModeAngle,
}

impl Analyseur<'_> {
    fn courant(&self) -> Option<&Tok> {
        self.jetons.get(self.pos)
    }

    fn consomme(&mut self, t: &Tok) -> bool {
        if self.courant() == Some(t) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn inattendu(&self) -> ErreurCalcul {
        let (lu, reste) = self.jetons.split_at(self.pos);
        ErreurCalcul::ExpressionMalformee(format!(
            "{} ⟨ici⟩ {}",
            format_tokens(lu),
            format_tokens(reste)
        ))
    }

    fn additif(&mut self) -> Resultat<BigRational> {
        let mut x = self.multiplicatif()?;
        loop {
            if self.consomme(&Tok::Plus) {
                x += self.multiplicatif()?;
            } else if self.consomme(&Tok::Minus) {
                x -= self.multiplicatif()?;
            } else {
                return Ok(x);
            }
        }
    }

    fn multiplicatif(&mut self) -> Resultat<BigRational> {
        let mut x = self.atome()?;
        loop {
            if self.consomme(&Tok::Star) {
                x *= self.atome()?;
            } else if self.consomme(&Tok::Slash) {
                let d = self.atome()?;
                x = diviser(&x, &d)?;
            } else {
                return Ok(x);
            }
        }
    }

    fn atome(&mut self) -> Resultat<BigRational> {
        let Some(t) = self.courant().cloned() else {
            return Err(self.inattendu());
        };

        let mut x = match t {
            Tok::LPar => {
                self.pos += 1;
                let x = self.additif()?;
                if !self.consomme(&Tok::RPar) {
                    return Err(self.inattendu());
                }
                x
            }
            Tok::Num(r) => {
                self.pos += 1;
                r
            }
            Tok::Fonction(f) => {
                self.pos += 1;
                match f {
                    Fonction::Sqrt => racine_carree(&self.atome()?)?,
                    Fonction::Log => logarithme(&self.atome()?, f64::log10, "log")?,
                    Fonction::Ln => logarithme(&self.atome()?, f64::ln, "ln")?,
                    Fonction::Trig(tf) => trig::appliquer(tf, &self.additif()?, self.mode)?,
                }
            }
            _ => return Err(self.inattendu()),
        };

        if self.consomme(&Tok::Bang) {
            x = factorielle(&x)?;
        }
        if self.consomme(&Tok::Caret) {
            let y = self.atome()?;
            x = puissance(&x, &y)?;
        }
        Ok(x)
    }
}

fn txt(x: &BigRational) -> String {
    texte_decimal(x, CHIFFRES_SORTIE)
}

fn logarithme(x: &BigRational, f: fn(f64) -> f64, nom: &str) -> Resultat<BigRational> {
    if !x.is_positive() {
        return Err(ErreurCalcul::ArgumentInvalide(format!("{nom} de {}", txt(x))));
    }
    depuis_f64(f(vers_f64(x)?), nom)
}

/// n! pour n entier, 0 <= n <= FACTORIELLE_MAX.
pub fn factorielle(x: &BigRational) -> Resultat<BigRational> {
    let invalide = || ErreurCalcul::ArgumentInvalide(format!("{} !", txt(x)));

    if !x.is_integer() || x.is_negative() {
        return Err(invalide());
    }
    let n = x
        .to_integer()
        .to_u64()
        .filter(|&n| n <= FACTORIELLE_MAX)
        .ok_or_else(invalide)?;

    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= BigInt::from(k);
    }
    Ok(BigRational::from_integer(acc))
}

/// Bits du résultat de x ^ n, majorés.
fn taille_estimee(x: &BigRational, n: i64) -> u64 {
    (x.numer().bits() + x.denom().bits()).saturating_mul(n.unsigned_abs())
}

/// x ^ y : exact pour un exposant entier raisonnable, flottant sinon.
pub fn puissance(x: &BigRational, y: &BigRational) -> Resultat<BigRational> {
    if y.is_integer() {
        if let Some(n) = y
            .to_integer()
            .to_i64()
            .filter(|n| n.abs() <= EXPOSANT_EXACT_MAX)
            .filter(|n| taille_estimee(x, *n) <= BITS_EXACT_MAX)
        {
            return puissance_entiere(x, n);
        }
    } else if x.is_negative() {
        return Err(ErreurCalcul::ArgumentInvalide(format!(
            "{} ^ {}",
            txt(x),
            txt(y)
        )));
    }

    if x.is_zero() && y.is_negative() {
        return Err(ErreurCalcul::ResultatIndefini(format!("0 ^ {}", txt(y))));
    }
    depuis_f64(vers_f64(x)?.powf(vers_f64(y)?), "^")
}
