#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::{confidence::ConfidencePolicy, risk::RiskPolicy};
use crate::validation::DEFAULT_MIN_SAMPLES;

/// Muestras por segundo con las que el front-end envía los niveles.
pub const DEFAULT_SAMPLES_PER_SECOND: f64 = 5.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub samples_per_second: f64, // para derivar la duración
    pub min_samples: usize,
    pub risk_policy: RiskPolicy,
    pub confidence_policy: ConfidencePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            samples_per_second: DEFAULT_SAMPLES_PER_SECOND,
            min_samples: DEFAULT_MIN_SAMPLES,
            risk_policy: RiskPolicy::default(),
            confidence_policy: ConfidencePolicy::default(),
        }
    }
}
