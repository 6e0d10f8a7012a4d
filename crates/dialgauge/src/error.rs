use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaugeError {
    #[error("Parts count must be at least 1")]
    InvalidPartsCount,
    #[error("Angle range must satisfy start < end, got {start}..{end}")]
    InvalidAngleRange { start: f64, end: f64 },
    #[error("{name} must have a positive width and height, got {width}x{height}")]
    InvalidDialSize {
        name: &'static str,
        width: f64,
        height: f64,
    },
    #[error("{name} must be finite, got {value}")]
    NonFiniteValue { name: &'static str, value: f64 },
}
