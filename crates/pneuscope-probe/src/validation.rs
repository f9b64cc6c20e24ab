use crate::error::Error;

/// Mínimo de muestras por defecto para que las estadísticas tengan sentido.
pub const DEFAULT_MIN_SAMPLES: usize = 5;

/// Rechaza secuencias vacías o demasiado cortas; el resto pasa tal cual.
/// NaN / infinitos no se filtran aquí.
pub fn validate(samples: &[f64], min_samples: usize) -> Result<&[f64], Error> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }

    if samples.len() < min_samples {
        return Err(Error::InsufficientData {
            got: samples.len(),
            required: min_samples,
        });
    }

    Ok(samples)
}

pub fn validate_sample_rate(samples_per_second: f64) -> Result<f64, Error> {
    if samples_per_second.is_finite() && samples_per_second > 0.0 {
        Ok(samples_per_second)
    } else {
        Err(Error::InvalidSampleRate(samples_per_second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_rejected() {
        assert_eq!(validate(&[], DEFAULT_MIN_SAMPLES), Err(Error::EmptyInput));
    }

    #[test]
    fn short_sequences_are_insufficient() {
        for len in 1..DEFAULT_MIN_SAMPLES {
            let samples = vec![42.0; len];
            assert_eq!(
                validate(&samples, DEFAULT_MIN_SAMPLES),
                Err(Error::InsufficientData {
                    got: len,
                    required: DEFAULT_MIN_SAMPLES
                })
            );
        }
    }

    #[test]
    fn non_finite_values_pass_through() {
        let samples = [1.0, f64::NAN, 3.0, f64::INFINITY, 5.0];
        let out = validate(&samples, DEFAULT_MIN_SAMPLES).unwrap();
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn sample_rate_must_be_positive_and_finite() {
        assert_eq!(validate_sample_rate(5.0), Ok(5.0));
        assert!(validate_sample_rate(0.0).is_err());
        assert!(validate_sample_rate(-1.0).is_err());
        assert!(validate_sample_rate(f64::NAN).is_err());
        assert!(validate_sample_rate(f64::INFINITY).is_err());
    }
}
