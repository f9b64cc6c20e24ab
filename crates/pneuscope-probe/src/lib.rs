//! Motor de evaluación de riesgo a partir de niveles de sonido de auscultación.

pub mod analysis;
pub mod error;
pub mod pipeline;
pub mod validation;

pub use analysis::report::{AnalysisReport, AnomalyFlags, RiskCategory};
pub use error::Error;
pub use pipeline::{
    config::EngineConfig,
    engine::{Engine, EngineBuilder, Prediction},
};

pub mod prelude {
    pub use crate::analysis::confidence::ConfidencePolicy;
    pub use crate::analysis::risk::RiskPolicy;
    pub use crate::{Engine, EngineConfig, Error, Prediction};
}
