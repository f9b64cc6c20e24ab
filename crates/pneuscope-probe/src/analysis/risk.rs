use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::{features::Features, round_to};

// =================== Umbrales (política por umbrales) ===================

pub const BASE_RISK_CAP: f64 = 0.3;

pub const PEAK_HIGH_DB: f64 = 60.0;
pub const PEAK_ELEVATED_DB: f64 = 45.0;
pub const PEAK_HIGH_RISK: f64 = 0.4;
pub const PEAK_ELEVATED_RISK: f64 = 0.2;

pub const STD_HIGH_DB: f64 = 15.0;
pub const STD_ELEVATED_DB: f64 = 10.0;
pub const STD_HIGH_RISK: f64 = 0.3;
pub const STD_ELEVATED_RISK: f64 = 0.15;

pub const SUSTAINED_HIGH_FRACTION: f64 = 0.30;
pub const SUSTAINED_ELEVATED_FRACTION: f64 = 0.15;
pub const SUSTAINED_HIGH_RISK: f64 = 0.35;
pub const SUSTAINED_ELEVATED_RISK: f64 = 0.2;

// =================== Pesos (mezcla continua) ===================

pub const BLEND_PEAK_WEIGHT: f64 = 0.6;
pub const BLEND_VARIABILITY_CAP: f64 = 0.3;
pub const BLEND_RANGE_CAP: f64 = 0.2;
/// Amplitud máxima de la perturbación uniforme.
pub const BLEND_NOISE: f64 = 0.05;

/// Cómo se traduce el vector de características a un riesgo en [0, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskPolicy {
    /// Suma de incrementos discretos por umbrales; determinista.
    #[default]
    Threshold,
    /// Combinación continua de pico, variabilidad y rango, con ruido acotado.
    ContinuousBlend,
}

/// Riesgo redondeado a 3 decimales y acotado a [0, 1].
///
/// `rng` solo se consulta con [`RiskPolicy::ContinuousBlend`].
pub fn score<R: Rng>(policy: RiskPolicy, features: &Features, rng: &mut R) -> f64 {
    let raw = match policy {
        RiskPolicy::Threshold => threshold_risk(features),
        RiskPolicy::ContinuousBlend => {
            blend_risk(features) + rng.random_range(-BLEND_NOISE..=BLEND_NOISE)
        }
    };

    round_to(raw.clamp(0.0, 1.0), 3)
}

fn threshold_risk(f: &Features) -> f64 {
    let base_risk = (f.mean / 100.0).min(BASE_RISK_CAP);

    let peak = if f.max > PEAK_HIGH_DB {
        PEAK_HIGH_RISK
    } else if f.max > PEAK_ELEVATED_DB {
        PEAK_ELEVATED_RISK
    } else {
        0.0
    };

    let variability = if f.std > STD_HIGH_DB {
        STD_HIGH_RISK
    } else if f.std > STD_ELEVATED_DB {
        STD_ELEVATED_RISK
    } else {
        0.0
    };

    let sustained = f.sustained_fraction();
    let sustained = if sustained > SUSTAINED_HIGH_FRACTION {
        SUSTAINED_HIGH_RISK
    } else if sustained > SUSTAINED_ELEVATED_FRACTION {
        SUSTAINED_ELEVATED_RISK
    } else {
        0.0
    };

    base_risk + peak + variability + sustained
}

fn blend_risk(f: &Features) -> f64 {
    let base = (f.max / 100.0).min(1.0);
    let variability = (f.std / 20.0).min(BLEND_VARIABILITY_CAP);
    let range_factor = (f.amplitude_range / 80.0).min(BLEND_RANGE_CAP);

    BLEND_PEAK_WEIGHT * base + variability + range_factor
}
