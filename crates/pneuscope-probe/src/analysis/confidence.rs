#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::{features::Features, round_to};

/// Muestras a partir de las cuales la calidad por volumen de datos se satura.
pub const FULL_QUALITY_SAMPLES: f64 = 100.0;
/// Muestras a partir de las cuales la confianza por recuento se satura.
pub const FULL_COUNT_SAMPLES: f64 = 60.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfidencePolicy {
    /// Media entre calidad (cantidad de muestras) y consistencia (std / |media|).
    #[default]
    Blended,
    /// Solo cuenta muestras: `min(1, n / 60)`.
    SampleCount,
}

/// Confianza redondeada a 3 decimales y acotada a [0, 1].
pub fn score(policy: ConfidencePolicy, features: &Features) -> f64 {
    let n = features.count as f64;

    let raw = match policy {
        ConfidencePolicy::Blended => {
            let data_quality = (n / FULL_QUALITY_SAMPLES).min(1.0);
            (data_quality + consistency(features)) / 2.0
        }
        ConfidencePolicy::SampleCount => (n / FULL_COUNT_SAMPLES).min(1.0),
    };

    round_to(raw, 3).clamp(0.0, 1.0)
}

/// `1 - min(std / |mean|, 1)`; con media nula el cociente cuenta como 0.
///
/// Es discontinuo en cero: una señal errática centrada en 0 (`[-10, 10, -10, 10, 0]`)
/// obtiene consistencia 1.0, mientras que la misma señal con media 0.001 obtiene 0.0.
fn consistency(f: &Features) -> f64 {
    let magnitude = f.mean.abs();
    let ratio = if magnitude > f64::EPSILON { f.std / magnitude } else { 0.0 };
    1.0 - ratio.min(1.0)
}
