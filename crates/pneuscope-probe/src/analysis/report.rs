#[cfg(feature = "serde")]
use serde::Serialize;

use crate::analysis::{features::Features, round_to};

pub const CRITICAL_PEAK_DB: f64 = 70.0;
pub const ELEVATED_PEAK_DB: f64 = 55.0;
pub const IRREGULAR_STD_DB: f64 = 20.0;
pub const PERSISTENT_FRACTION: f64 = 0.4;
/// Por encima de esta desviación la variabilidad se etiqueta como "high".
pub const HIGH_VARIABILITY_STD_DB: f64 = 15.0;

pub const MODERATE_RISK: f64 = 0.3;
pub const HIGH_RISK: f64 = 0.7;

bitflags::bitflags! {
    /// Reglas clínicas que se dispararon para una grabación.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AnomalyFlags: u32 {
        const CRITICAL_PEAK       = 1 << 0;
        const ELEVATED_PEAK       = 1 << 1;
        const IRREGULAR_PATTERN   = 1 << 2;
        const PERSISTENT_ABNORMAL = 1 << 3;
    }
}

impl AnomalyFlags {
    /// Evalúa las reglas. Los dos niveles de pico son excluyentes.
    pub fn detect(f: &Features) -> Self {
        let mut flags = AnomalyFlags::empty();

        if f.max > CRITICAL_PEAK_DB {
            flags |= AnomalyFlags::CRITICAL_PEAK;
        } else if f.max > ELEVATED_PEAK_DB {
            flags |= AnomalyFlags::ELEVATED_PEAK;
        }

        if f.std > IRREGULAR_STD_DB {
            flags |= AnomalyFlags::IRREGULAR_PATTERN;
        }

        if f.sustained_count as f64 > f.count as f64 * PERSISTENT_FRACTION {
            flags |= AnomalyFlags::PERSISTENT_ABNORMAL;
        }

        flags
    }

    /// Nombres en snake_case, en orden de bit.
    pub fn names(&self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_ascii_lowercase()).collect()
    }
}

/// Textos asociados a cada regla, en el orden en que se añaden.
const RECOMMENDATIONS: &[(AnomalyFlags, [&str; 2])] = &[
    (
        AnomalyFlags::CRITICAL_PEAK,
        ["Immediate clinical evaluation recommended", "Consider chest X-ray or CT scan"],
    ),
    (
        AnomalyFlags::ELEVATED_PEAK,
        ["Monitor closely for 24-48 hours", "Consider follow-up examination"],
    ),
    (
        AnomalyFlags::IRREGULAR_PATTERN,
        ["Irregular breathing pattern detected", "Assess for respiratory distress"],
    ),
    (
        AnomalyFlags::PERSISTENT_ABNORMAL,
        ["Persistent abnormal sounds detected", "Consider antibiotic therapy evaluation"],
    ),
];

const ROUTINE: [&str; 2] = ["Continue routine monitoring", "Normal breathing patterns observed"];

pub fn recommendations(flags: AnomalyFlags) -> Vec<String> {
    let mut out: Vec<String> = RECOMMENDATIONS
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .flat_map(|(_, texts)| texts.iter().map(|t| t.to_string()))
        .collect();

    if out.is_empty() {
        out.extend(ROUTINE.iter().map(|t| t.to_string()));
    }

    out
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score >= HIGH_RISK {
            RiskCategory::High
        } else if risk_score >= MODERATE_RISK {
            RiskCategory::Moderate
        } else {
            RiskCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variability {
    Normal,
    High,
}

/// Estadísticas redondeadas a 2 decimales.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub mean_db: f64,
    pub max_db: f64,
    pub min_db: f64,
    pub std_db: f64,
    pub range_db: f64,
    pub high_freq_energy: f64,
    pub low_freq_energy: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyIndicators {
    /// Muestras por encima de 60 dB.
    pub high_amplitude_events: usize,
    pub amplitude_variability: Variability,
    /// Muestras por encima de 50 dB.
    pub sustained_abnormal_sounds: usize,
    pub flags: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub total_samples: usize,
    pub duration_seconds: f64,
    pub statistics: Statistics,
    pub anomaly_indicators: AnomalyIndicators,
    pub risk_category: RiskCategory,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    pub fn build(f: &Features, risk_score: f64, samples_per_second: f64) -> Self {
        let flags = AnomalyFlags::detect(f);

        AnalysisReport {
            total_samples: f.count,
            duration_seconds: f.count as f64 / samples_per_second,
            statistics: Statistics {
                mean_db: round_to(f.mean, 2),
                max_db: round_to(f.max, 2),
                min_db: round_to(f.min, 2),
                std_db: round_to(f.std, 2),
                range_db: round_to(f.amplitude_range, 2),
                high_freq_energy: round_to(f.high_freq_energy, 2),
                low_freq_energy: round_to(f.low_freq_energy, 2),
            },
            anomaly_indicators: AnomalyIndicators {
                high_amplitude_events: f.high_amplitude_count,
                amplitude_variability: if f.std > HIGH_VARIABILITY_STD_DB {
                    Variability::High
                } else {
                    Variability::Normal
                },
                sustained_abnormal_sounds: f.sustained_count,
                flags: flags.names(),
            },
            risk_category: RiskCategory::from_score(risk_score),
            recommendations: recommendations(flags),
        }
    }
}
