use rand::Rng;
use tracing::{Level, instrument};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    analysis::{
        confidence::{self, ConfidencePolicy},
        features,
        report::AnalysisReport,
        risk::{self, RiskPolicy},
    },
    error::Error,
    pipeline::config::EngineConfig,
    validation,
};

#[derive(Default)]
pub struct EngineBuilder {
    cfg: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn samples_per_second(mut self, sps: f64) -> Self {
        self.cfg.samples_per_second = sps;
        self
    }
    pub fn min_samples(mut self, n: usize) -> Self {
        self.cfg.min_samples = n;
        self
    }
    pub fn risk_policy(mut self, policy: RiskPolicy) -> Self {
        self.cfg.risk_policy = policy;
        self
    }
    pub fn confidence_policy(mut self, policy: ConfidencePolicy) -> Self {
        self.cfg.confidence_policy = policy;
        self
    }

    pub fn build(self) -> Engine {
        Engine { cfg: self.cfg }
    }
}

/// Motor de evaluación de riesgo. Sin estado: cada llamada es independiente.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    cfg: EngineConfig,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Evalúa una grabación con la frecuencia de muestreo configurada.
    pub fn assess<R: Rng>(&self, samples: &[f64], rng: &mut R) -> Result<Prediction, Error> {
        self.assess_at(samples, self.cfg.samples_per_second, rng)
    }

    /// Igual que [`Engine::assess`] pero con una frecuencia de muestreo explícita.
    #[instrument(level = Level::DEBUG, skip_all, fields(samples = samples.len(), sps = samples_per_second), err)]
    pub fn assess_at<R: Rng>(
        &self,
        samples: &[f64],
        samples_per_second: f64,
        rng: &mut R,
    ) -> Result<Prediction, Error> {
        let samples = validation::validate(samples, self.cfg.min_samples)?;
        let samples_per_second = validation::validate_sample_rate(samples_per_second)?;

        let features = features::extract(samples)?;
        let risk_score = risk::score(self.cfg.risk_policy, &features, rng);
        let confidence = confidence::score(self.cfg.confidence_policy, &features);
        let analysis = AnalysisReport::build(&features, risk_score, samples_per_second);

        if !analysis.duration_seconds.is_finite() {
            return Err(Error::Computation(format!(
                "non-finite duration ({} samples at {samples_per_second} Hz)",
                features.count
            )));
        }

        Ok(Prediction {
            risk_score,
            confidence,
            analysis,
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub risk_score: f64,
    pub confidence: f64,
    pub analysis: AnalysisReport,
}
