use std::sync::Arc;

use futures::{StreamExt, stream};
use pneuscope_probe::{Engine, Error as ProbeError, Prediction};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;
use tracing::{Level, debug, error, instrument, warn};

use crate::assessor_config::AssessorConfig;

/// Una grabación a evaluar, con override opcional de la frecuencia de muestreo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessRequest {
    pub samples: Vec<f64>,
    pub samples_per_second: Option<f64>,
}

impl AssessRequest {
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples,
            samples_per_second: None,
        }
    }
}

/// Resultado de un elemento del lote; `index` es su posición en la entrada.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub index: usize,
    pub result: Result<Prediction, ProbeError>,
}

#[derive(Debug, Clone)]
pub struct Assessor {
    engine: Arc<Engine>,
    config: Arc<AssessorConfig>,
    // compartido entre peticiones: acota la CPU total, no solo la de un lote
    permits: Arc<Semaphore>,
    max_threads: usize,
}

impl Assessor {
    pub fn new(config: AssessorConfig) -> Self {
        let max_threads = calc_max_threads(config.batch_cpu_percent);

        Assessor {
            engine: Arc::new(Engine::new(config.engine.clone())),
            config: config.into(),
            permits: Arc::new(Semaphore::new(max_threads)),
            max_threads,
        }
    }

    pub fn config(&self) -> &AssessorConfig {
        &self.config
    }

    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Evalúa una grabación en el hilo actual.
    pub fn assess(&self, request: &AssessRequest) -> Result<Prediction, ProbeError> {
        assess_indexed(&self.engine, self.config.rng_seed, 0, request)
    }

    /// Evalúa una grabación en el pool de tareas bloqueantes.
    pub async fn assess_async(&self, request: AssessRequest) -> Result<Prediction, ProbeError> {
        self.run_blocking(0, request).await
    }

    /// Evalúa cada elemento por separado; un fallo no detiene al resto.
    /// La salida conserva el orden de la entrada.
    #[instrument(level = Level::DEBUG, skip_all, fields(items = batch.len()))]
    pub async fn assess_batch(&self, batch: Vec<AssessRequest>) -> Vec<BatchEntry> {
        let futs = batch.into_iter().enumerate().map(|(index, request)| async move {
            let result = self.run_blocking(index, request).await;
            if let Err(e) = &result {
                warn!(index, error = %e, "batch item failed, continuing");
            }
            BatchEntry { index, result }
        });

        let entries: Vec<BatchEntry> = stream::iter(futs).buffered(self.max_threads).collect().await;

        debug!(
            ok = entries.iter().filter(|e| e.result.is_ok()).count(),
            failed = entries.iter().filter(|e| e.result.is_err()).count(),
            "batch finished"
        );

        entries
    }

    async fn run_blocking(&self, index: usize, request: AssessRequest) -> Result<Prediction, ProbeError> {
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ProbeError::Computation(format!("assessment pool closed: {e}")))?;

        let engine = self.engine.clone();
        let seed = self.config.rng_seed;

        match spawn_blocking(move || assess_indexed(&engine, seed, index, &request)).await {
            Ok(result) => result,
            Err(join_e) => {
                error!(index, error = %join_e, "panic while assessing, item marked as failed");
                Err(ProbeError::Computation(format!("assessment task failed: {join_e}")))
            }
        }
    }
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(AssessorConfig::default())
    }
}

fn calc_max_threads(cpu_percent: f32) -> usize {
    let max_threads = (num_cpus::get() as f32 * cpu_percent / 100.0).ceil() as usize;
    max_threads.clamp(1, 100)
}

/// Con semilla, cada índice tiene su propio generador: el lote es reproducible
/// sin importar el orden en que se ejecuten los elementos.
fn assess_indexed(
    engine: &Engine,
    seed: Option<u64>,
    index: usize,
    request: &AssessRequest,
) -> Result<Prediction, ProbeError> {
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            run(engine, request, &mut rng)
        }
        None => run(engine, request, &mut rand::rng()),
    }
}

fn run<R: Rng>(engine: &Engine, request: &AssessRequest, rng: &mut R) -> Result<Prediction, ProbeError> {
    match request.samples_per_second {
        Some(sps) => engine.assess_at(&request.samples, sps, rng),
        None => engine.assess(&request.samples, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessor_config::AssessorConfigBuilder;
    use pneuscope_probe::{EngineConfig, prelude::RiskPolicy};

    fn quiet() -> AssessRequest {
        AssessRequest::new(vec![10.0, 12.0, 11.0, 13.0, 12.0])
    }

    fn loud() -> AssessRequest {
        AssessRequest::new(vec![45.0, 72.0, 68.0, 51.0, 80.0, 66.0, 40.0])
    }

    #[tokio::test]
    async fn batch_isolates_failures_and_keeps_order() {
        let assessor = Assessor::default();
        let batch = vec![quiet(), AssessRequest::new(vec![]), loud()];

        let entries = assessor.assess_batch(batch).await;

        assert_eq!(entries.len(), 3);
        assert_eq!(entries.iter().map(|e| e.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(entries[0].result, assessor.assess(&quiet()));
        assert_eq!(entries[1].result, Err(ProbeError::EmptyInput));
        assert_eq!(entries[2].result, assessor.assess(&loud()));
    }

    #[tokio::test]
    async fn large_batch_preserves_input_order() {
        let assessor = Assessor::new(
            AssessorConfigBuilder::default()
                .batch_cpu_percent(100.0)
                .build()
                .unwrap(),
        );

        let batch: Vec<AssessRequest> = (0..64)
            .map(|i| {
                if i % 5 == 0 {
                    AssessRequest::new(vec![1.0; 3])
                } else {
                    AssessRequest::new((0..i * 10).map(|s| (s % 90) as f64).collect())
                }
            })
            .collect();
        let expected: Vec<_> = batch.iter().map(|r| assessor.assess(r)).collect();

        let entries = assessor.assess_batch(batch).await;

        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert_eq!(entry.result, expected[i]);
        }
    }

    #[tokio::test]
    async fn seeded_blend_is_replayable() {
        let config = AssessorConfigBuilder::default()
            .engine(EngineConfig {
                risk_policy: RiskPolicy::ContinuousBlend,
                ..EngineConfig::default()
            })
            .rng_seed(1234u64)
            .build()
            .unwrap();
        let assessor = Assessor::new(config);
        let batch = vec![loud(), loud(), quiet()];

        let first = assessor.assess_batch(batch.clone()).await;
        let second = assessor.assess_batch(batch).await;

        assert_eq!(first, second);
        assert_eq!(first[0].result, assessor.assess(&loud()));
    }

    #[tokio::test]
    async fn per_request_sample_rate_override() {
        let assessor = Assessor::default();
        let request = AssessRequest {
            samples: vec![30.0; 20],
            samples_per_second: Some(10.0),
        };

        let p = assessor.assess_async(request).await.unwrap();
        assert_eq!(p.analysis.duration_seconds, 2.0);

        let bad = AssessRequest {
            samples: vec![30.0; 20],
            samples_per_second: Some(-1.0),
        };
        assert_eq!(assessor.assess_async(bad).await, Err(ProbeError::InvalidSampleRate(-1.0)));
    }

    #[test]
    fn thread_budget_is_bounded() {
        assert_eq!(calc_max_threads(0.0), 1);
        assert!(calc_max_threads(100.0) >= 1);
        assert!(calc_max_threads(10_000.0) <= 100);
    }
}
