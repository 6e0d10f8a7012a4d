use crate::color::Color;
use crate::error::GaugeError;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Arc covered by the dials, in radians. Angles grow clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub start: f64,
    pub end: f64,
}

impl AngleRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Linear interpolation over the range, `0.0` at `start` and `1.0` at `end`.
    pub fn lerp(&self, fraction: f64) -> f64 {
        self.start + fraction * self.span()
    }

    pub fn validate(&self) -> Result<(), GaugeError> {
        if self.start.is_finite() && self.end.is_finite() && self.start < self.end {
            Ok(())
        } else {
            Err(GaugeError::InvalidAngleRange {
                start: self.start,
                end: self.end,
            })
        }
    }
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::new(0.0, PI)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Number of parts the arc is divided into. There is one dial more than parts.
    pub parts_count: usize,
    pub angle_range: AngleRange,
    pub dial_size: Size,
    pub limit_dial_size: Size,
    pub dial_color: Color,
    /// Dials below the progress and below the limit.
    pub passed_dial_color: Color,
    /// Dials below the progress but beyond the limit.
    pub passed_limit_dial_color: Color,
    pub limit_dial_color: Color,
    pub limit: f64,
    pub progress: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            parts_count: 60,
            angle_range: AngleRange::default(),
            dial_size: Size::new(14.0, 3.0),
            limit_dial_size: Size::new(14.0, 3.0),
            dial_color: Color::gray(),
            passed_dial_color: Color::green(),
            passed_limit_dial_color: Color::orange(),
            limit_dial_color: Color::red(),
            limit: 0.5,
            progress: 0.5,
        }
    }
}

impl GaugeConfig {
    pub fn validate(&self) -> Result<(), GaugeError> {
        validate_parts_count(self.parts_count)?;
        self.angle_range.validate()?;
        validate_dial_size("dial_size", self.dial_size)?;
        validate_dial_size("limit_dial_size", self.limit_dial_size)?;
        validate_finite("limit", self.limit)?;
        validate_finite("progress", self.progress)
    }

    pub fn dial_count(&self) -> usize {
        self.parts_count + 1
    }

    pub fn limit_dial_offset(&self) -> i64 {
        self.threshold(self.limit)
    }

    pub fn active_dials_count(&self) -> i64 {
        self.threshold(self.progress)
    }

    /// Offset of the first dial not covered by `fraction` of the gauge.
    ///
    /// Uses `floor` so an exact boundary never lights the next dial.
    pub fn threshold(&self, fraction: f64) -> i64 {
        (fraction * self.dial_count() as f64).floor() as i64
    }

    /// Whether switching to `other` requires the dials to be rebuilt.
    pub fn geometry_differs(&self, other: &GaugeConfig) -> bool {
        self.parts_count != other.parts_count
            || self.angle_range != other.angle_range
            || self.dial_size != other.dial_size
            || self.limit_dial_size != other.limit_dial_size
            || self.limit != other.limit
    }

    /// Whether switching to `other` changes any dial color without touching geometry.
    pub fn colors_differ(&self, other: &GaugeConfig) -> bool {
        self.dial_color != other.dial_color
            || self.passed_dial_color != other.passed_dial_color
            || self.passed_limit_dial_color != other.passed_limit_dial_color
            || self.limit_dial_color != other.limit_dial_color
            || self.active_dials_count() != other.active_dials_count()
    }
}

pub fn validate_parts_count(parts_count: usize) -> Result<(), GaugeError> {
    if parts_count == 0 {
        return Err(GaugeError::InvalidPartsCount);
    }
    Ok(())
}

pub fn validate_dial_size(name: &'static str, size: Size) -> Result<(), GaugeError> {
    if size.is_positive() {
        Ok(())
    } else {
        Err(GaugeError::InvalidDialSize {
            name,
            width: size.width,
            height: size.height,
        })
    }
}

pub fn validate_finite(name: &'static str, value: f64) -> Result<(), GaugeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GaugeError::NonFiniteValue { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GaugeConfig {
        GaugeConfig {
            parts_count: 40,
            angle_range: AngleRange::new(PI * 5.0 / 6.0, PI * 13.0 / 6.0),
            limit: 0.5,
            progress: 0.4,
            ..GaugeConfig::default()
        }
    }

    #[test]
    fn test_thresholds_use_floor() {
        let config = sample();
        assert_eq!(config.limit_dial_offset(), 20);
        assert_eq!(config.active_dials_count(), 16);
        assert_eq!(config.threshold(0.7), 28);
        assert_eq!(config.threshold(1.0), 41);
        assert_eq!(config.threshold(0.0), 0);
        assert_eq!(config.threshold(-0.1), -5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = vec![
            (
                GaugeConfig {
                    parts_count: 0,
                    ..sample()
                },
                GaugeError::InvalidPartsCount,
            ),
            (
                GaugeConfig {
                    angle_range: AngleRange::new(1.0, 1.0),
                    ..sample()
                },
                GaugeError::InvalidAngleRange {
                    start: 1.0,
                    end: 1.0,
                },
            ),
            (
                GaugeConfig {
                    dial_size: Size::new(0.0, 3.0),
                    ..sample()
                },
                GaugeError::InvalidDialSize {
                    name: "dial_size",
                    width: 0.0,
                    height: 3.0,
                },
            ),
            (
                GaugeConfig {
                    limit: f64::INFINITY,
                    ..sample()
                },
                GaugeError::NonFiniteValue {
                    name: "limit",
                    value: f64::INFINITY,
                },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_change_classification() {
        let base = sample();

        let recolored = GaugeConfig {
            passed_dial_color: Color::red(),
            ..sample()
        };
        assert!(!base.geometry_differs(&recolored));
        assert!(base.colors_differ(&recolored));

        let limit_moved = GaugeConfig {
            limit: 0.6,
            ..sample()
        };
        assert!(base.geometry_differs(&limit_moved));

        // same active count, nothing to repaint
        let nudged = GaugeConfig {
            progress: 0.401,
            ..sample()
        };
        assert!(!base.geometry_differs(&nudged));
        assert!(!base.colors_differ(&nudged));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r##"{
            "parts_count": 40,
            "dial_size": { "width": 15.0, "height": 4.0 },
            "passed_dial_color": "#0fa3b1"
        }"##;
        let config: GaugeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.parts_count, 40);
        assert_eq!(config.dial_size, Size::new(15.0, 4.0));
        assert_eq!(config.passed_dial_color, "#0fa3b1".parse().unwrap());
        assert_eq!(config.limit_dial_color, Color::red());
        assert_eq!(config.angle_range, AngleRange::default());
    }
}
