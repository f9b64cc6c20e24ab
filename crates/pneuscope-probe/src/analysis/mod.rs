pub mod confidence;
pub mod features;
pub mod report;
pub mod risk;

/// Redondeo a `digits` decimales (mitades lejos de cero).
///
/// Valores tan grandes que el escalado desborda se devuelven tal cual: a esa
/// magnitud un `f64` ya no tiene decimales que redondear.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10_f64.powi(digits);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
