use crate::error::Error;

/// Nivel (dB) a partir del cual un sonido sostenido se considera anómalo.
pub const SUSTAINED_LEVEL_DB: f64 = 50.0;
/// Nivel (dB) de los eventos de alta amplitud.
pub const HIGH_AMPLITUDE_DB: f64 = 60.0;

/// Estadísticas derivadas de una grabación. Efímeras: viven lo que dura la petición.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Desviación estándar poblacional.
    pub std: f64,
    pub amplitude_range: f64,
    /// Media de las muestras por encima de `mean + std` (0 si no hay ninguna).
    pub high_freq_energy: f64,
    /// Media de las muestras por debajo de `mean - std` (0 si no hay ninguna).
    pub low_freq_energy: f64,
    /// Muestras por encima de [`SUSTAINED_LEVEL_DB`].
    pub sustained_count: usize,
    /// Muestras por encima de [`HIGH_AMPLITUDE_DB`].
    pub high_amplitude_count: usize,
}

impl Features {
    /// Fracción de muestras por encima de [`SUSTAINED_LEVEL_DB`].
    pub fn sustained_fraction(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sustained_count as f64 / self.count as f64
    }
}

/// Cuenta las muestras estrictamente mayores que `threshold`.
pub fn high_level_count(samples: &[f64], threshold: f64) -> usize {
    samples.iter().filter(|&&s| s > threshold).count()
}

fn mean_where(samples: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    mean_of(samples.iter().copied().filter(|&s| pred(s)))
}

/// Media aritmética; si la suma directa desborda, se divide antes de sumar.
fn mean_of<I>(values: I) -> f64
where
    I: Iterator<Item = f64> + Clone,
{
    let (sum, n) = values.clone().fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    if sum.is_finite() {
        sum / n
    } else {
        values.map(|v| v / n).sum()
    }
}

/// Desviación estándar poblacional. Con magnitudes cercanas a `f64::MAX` las
/// desviaciones se calculan escaladas por el mayor valor absoluto.
fn population_std(samples: &[f64], mean: f64, scale: f64) -> f64 {
    let n = samples.len() as f64;
    let direct = (samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n).sqrt();
    if direct.is_finite() || !scale.is_finite() || scale == 0.0 {
        return direct;
    }

    let scaled_mean = mean / scale;
    let variance = samples
        .iter()
        .map(|s| (s / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt() * scale
}

/// Calcula las estadísticas de una secuencia ya validada (no vacía).
///
/// Falla con [`Error::Computation`] si alguna estadística no es finita, que es
/// como acaban manifestándose los NaN / infinitos de la entrada.
pub fn extract(samples: &[f64]) -> Result<Features, Error> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mean = mean_of(samples.iter().copied());
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let std = population_std(samples, mean, max.abs().max(min.abs()));

    // f64::max/min ignoran NaN, así que se revisa también la media
    for (name, value) in [("mean", mean), ("max", max), ("min", min), ("std", std)] {
        if !value.is_finite() {
            return Err(Error::Computation(format!("non-finite {name} ({value})")));
        }
    }

    let upper = mean + std;
    let lower = mean - std;

    Ok(Features {
        count: samples.len(),
        mean,
        max,
        min,
        std,
        // max - min puede desbordar con signos opuestos extremos
        amplitude_range: (max - min).min(f64::MAX),
        high_freq_energy: mean_where(samples, |s| s > upper),
        low_freq_energy: mean_where(samples, |s| s < lower),
        sustained_count: high_level_count(samples, SUSTAINED_LEVEL_DB),
        high_amplitude_count: high_level_count(samples, HIGH_AMPLITUDE_DB),
    })
}
