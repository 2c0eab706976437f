// src/noyau/trig.rs
//
// Trigonométrie selon le mode d’angle
// -----------------------------------
// - sin/cos/tan : fonction de base (f64) sur l’argument en radians
// - csc/sec/cot : réciproque exacte de la fonction de base
// - mode degrés : l’argument est converti degrés -> radians avant la base ;
//   pour csc/sec/cot, la réciproque repasse ENCORE par la formule degrés -> radians
//   (double conversion : csc(30°) = 2·π/180, pas 2).

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::Resultat;
use super::lecture::{depuis_f64, diviser, pi, vers_f64};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
}

impl TrigFn {
    pub fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::Csc => "csc",
            TrigFn::Sec => "sec",
            TrigFn::Cot => "cot",
        }
    }

    /// (fonction de base, réciproque ?)
    fn decompose(self) -> (fn(f64) -> f64, bool) {
        match self {
            TrigFn::Sin => (f64::sin, false),
            TrigFn::Cos => (f64::cos, false),
            TrigFn::Tan => (f64::tan, false),
            TrigFn::Csc => (f64::sin, true),
            TrigFn::Sec => (f64::cos, true),
            TrigFn::Cot => (f64::tan, true),
        }
    }
}

/// x° -> x·π/180 (π à la précision de travail).
pub fn degres_vers_radians(x: &BigRational) -> BigRational {
    x * pi() / BigRational::from_integer(BigInt::from(180))
}

/// Évalue f(x) dans le mode donné.
pub fn appliquer(f: TrigFn, x: &BigRational, mode: ModeAngle) -> Resultat<BigRational> {
    let (base, reciproque) = f.decompose();

    let angle = match mode {
        ModeAngle::Radians => x.clone(),
        ModeAngle::Degres => degres_vers_radians(x),
    };

    let quoi = f.nom();
    let v = depuis_f64(base(vers_f64(&angle)?), quoi)?;
    if !reciproque {
        return Ok(v);
    }

    let r = diviser(&BigRational::from_integer(BigInt::from(1)), &v)?;
    Ok(match mode {
        ModeAngle::Radians => r,
        ModeAngle::Degres => degres_vers_radians(&r),
    })
}
