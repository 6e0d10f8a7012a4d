use crate::color::Color;
use crate::config::GaugeConfig;
use crate::geometry::{Point, Rect, Size};

/// Rounded rectangle placed on the arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialShape {
    pub center: Point,
    pub size: Size,
    /// Rotation around `center`, in radians. Equal to the dial's angle so it points radially.
    pub rotation: f64,
    pub corner_radius: f64,
}

/// Where every dial goes for a given config and bounds.
#[derive(Debug, Clone, Copy)]
pub struct DialLayout<'a> {
    config: &'a GaugeConfig,
    frame: Rect,
    radius: f64,
}

impl<'a> DialLayout<'a> {
    pub fn new(config: &'a GaugeConfig, bounds: Rect) -> Self {
        let frame = bounds.inscribed_square();
        // one shared radius, so the widest dial still fits inside the circle
        let widest = config.dial_size.width.max(config.limit_dial_size.width);
        let radius = frame.height() / 2.0 - widest / 2.0;
        Self {
            config,
            frame,
            radius,
        }
    }

    /// The inscribed square the dials are laid out in.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angle(&self, offset: usize) -> f64 {
        let fraction = offset as f64 / self.config.parts_count as f64;
        self.config.angle_range.lerp(fraction)
    }

    pub fn position(&self, offset: usize) -> Point {
        self.frame
            .center()
            .polar_offset(self.radius, self.angle(offset))
    }

    pub fn size(&self, offset: usize) -> Size {
        if offset as i64 == self.config.limit_dial_offset() {
            self.config.limit_dial_size
        } else {
            self.config.dial_size
        }
    }

    pub fn shape(&self, offset: usize) -> DialShape {
        let size = self.size(offset);
        DialShape {
            center: self.position(offset),
            size,
            rotation: self.angle(offset),
            corner_radius: size.height / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialState {
    Limit,
    Passed,
    PassedLimit,
    Idle,
}

impl DialState {
    /// Determines the visual state of a dial based on priority:
    /// 1. Limit (always wins)
    /// 2. Passed, below the limit
    /// 3. Passed, beyond the limit
    /// 4. Idle (Default)
    pub fn resolve(offset: i64, active_dials_count: i64, limit_dial_offset: i64) -> Self {
        if offset == limit_dial_offset {
            Self::Limit
        } else if offset < active_dials_count && offset < limit_dial_offset {
            Self::Passed
        } else if offset < active_dials_count {
            Self::PassedLimit
        } else {
            Self::Idle
        }
    }

    pub fn color(&self, config: &GaugeConfig) -> Color {
        match self {
            Self::Limit => config.limit_dial_color,
            Self::Passed => config.passed_dial_color,
            Self::PassedLimit => config.passed_limit_dial_color,
            Self::Idle => config.dial_color,
        }
    }
}
