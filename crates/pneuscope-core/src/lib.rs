pub mod assessor;
pub mod assessor_config;
pub mod error;

pub use assessor::{AssessRequest, Assessor, BatchEntry};
pub use assessor_config::{AssessorConfig, AssessorConfigBuilder};
pub use error::ConfigError;
