use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("No audio data provided")]
    EmptyInput,

    #[error("Insufficient audio data: got {got} samples, at least {required} are required")]
    InsufficientData { got: usize, required: usize },

    #[error("Invalid sample rate: {0} (must be a finite value greater than zero)")]
    InvalidSampleRate(f64),

    #[error("Prediction error: {0}")]
    Computation(String),
}

impl Error {
    /// `true` si el fallo lo provoca la petición del cliente y no el motor.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Computation(_))
    }

    /// Código estable para la capa de transporte.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EmptyInput => "empty_input",
            Error::InsufficientData { .. } => "insufficient_data",
            Error::InvalidSampleRate(_) => "invalid_sample_rate",
            Error::Computation(_) => "computation_error",
        }
    }
}
