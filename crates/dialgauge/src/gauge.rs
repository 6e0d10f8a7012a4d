use crate::color::Color;
use crate::config::{
    AngleRange, GaugeConfig, validate_dial_size, validate_finite, validate_parts_count,
};
use crate::dial::{DialLayout, DialShape, DialState};
use crate::error::GaugeError;
use crate::geometry::{Rect, Size};
use crate::surface::{FillAnimation, Surface};
use std::time::Duration;

/// A ring of dials on a [`Surface`].
///
/// Dials below the progress are painted as passed, one dial marks the limit. Geometry
/// setters rebuild every dial, color and progress setters only repaint them, and
/// [`Gauge::set_bounds`] only moves them.
pub struct Gauge<S: Surface> {
    config: GaugeConfig,
    bounds: Rect,
    surface: S,
    dials: Vec<S::Layer>,
}

impl<S: Surface> Gauge<S> {
    pub fn new(config: GaugeConfig, bounds: Rect, surface: S) -> Result<Self, GaugeError> {
        config.validate()?;
        let mut gauge = Self {
            config,
            bounds,
            surface,
            dials: Vec::new(),
        };
        gauge.rebuild();
        Ok(gauge)
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Layer handles, indexed by offset.
    pub fn dials(&self) -> &[S::Layer] {
        &self.dials
    }

    pub fn dial_count(&self) -> usize {
        self.dials.len()
    }

    pub fn progress(&self) -> f64 {
        self.config.progress
    }

    pub fn limit(&self) -> f64 {
        self.config.limit
    }

    pub fn limit_dial_offset(&self) -> i64 {
        self.config.limit_dial_offset()
    }

    pub fn active_dials_count(&self) -> i64 {
        self.config.active_dials_count()
    }

    pub fn layout(&self) -> DialLayout<'_> {
        DialLayout::new(&self.config, self.bounds)
    }

    pub fn dial_shape(&self, offset: usize) -> Option<DialShape> {
        (offset < self.dials.len()).then(|| self.layout().shape(offset))
    }

    pub fn dial_state(&self, offset: usize) -> DialState {
        DialState::resolve(
            offset as i64,
            self.active_dials_count(),
            self.limit_dial_offset(),
        )
    }

    pub fn fill_color(&self, offset: usize) -> Color {
        self.dial_state(offset).color(&self.config)
    }

    /// Replaces the whole configuration with at most one rebuild.
    ///
    /// Falls back to a repaint when only colors or the active dial count change, and
    /// does nothing when the dials would look the same.
    pub fn apply_configuration(&mut self, config: GaugeConfig) -> Result<(), GaugeError> {
        config.validate()?;

        let rebuild = self.config.geometry_differs(&config);
        let recolor = self.config.colors_differ(&config);
        self.config = config;

        if rebuild {
            self.rebuild();
        } else if recolor {
            self.recolor();
        }
        Ok(())
    }

    pub fn set_parts_count(&mut self, parts_count: usize) -> Result<(), GaugeError> {
        validate_parts_count(parts_count)?;
        self.config.parts_count = parts_count;
        self.rebuild();
        Ok(())
    }

    pub fn set_angle_range(&mut self, angle_range: AngleRange) -> Result<(), GaugeError> {
        angle_range.validate()?;
        self.config.angle_range = angle_range;
        self.rebuild();
        Ok(())
    }

    pub fn set_dial_size(&mut self, size: Size) -> Result<(), GaugeError> {
        validate_dial_size("dial_size", size)?;
        self.config.dial_size = size;
        self.rebuild();
        Ok(())
    }

    pub fn set_limit_dial_size(&mut self, size: Size) -> Result<(), GaugeError> {
        validate_dial_size("limit_dial_size", size)?;
        self.config.limit_dial_size = size;
        self.rebuild();
        Ok(())
    }

    pub fn set_limit(&mut self, limit: f64) -> Result<(), GaugeError> {
        validate_finite("limit", limit)?;
        self.config.limit = limit;
        self.rebuild();
        Ok(())
    }

    pub fn set_dial_color(&mut self, color: Color) {
        self.config.dial_color = color;
        self.recolor();
    }

    pub fn set_passed_dial_color(&mut self, color: Color) {
        self.config.passed_dial_color = color;
        self.recolor();
    }

    pub fn set_passed_limit_dial_color(&mut self, color: Color) {
        self.config.passed_limit_dial_color = color;
        self.recolor();
    }

    pub fn set_limit_dial_color(&mut self, color: Color) {
        self.config.limit_dial_color = color;
        self.recolor();
    }

    /// Sets the progress and repaints immediately. Values outside `[0, 1]` are kept as is.
    pub fn set_progress(&mut self, progress: f64) -> Result<(), GaugeError> {
        validate_finite("progress", progress)?;
        self.config.progress = progress;
        self.recolor();
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.reframe();
    }

    /// Sets the progress and lets the dials that cross the threshold follow one by one.
    ///
    /// The stored progress changes right away. Every crossing dial gets an equal slice of
    /// `duration`, each one starting when the previous ends: upwards from the first
    /// newly passed dial, or downwards from the outermost one when progress shrinks.
    pub fn set_progress_animated(
        &mut self,
        progress: f64,
        duration: Duration,
    ) -> Result<(), GaugeError> {
        validate_finite("progress", progress)?;

        let before = self.active_dials_count();
        self.config.progress = progress;
        let after = self.active_dials_count();

        let last = self.dials.len() as i64;
        let low = before.min(after).clamp(0, last);
        let high = before.max(after).clamp(0, last);
        let count = u32::try_from(high - low).unwrap_or(u32::MAX);
        if count == 0 {
            log::trace!("Progress {} crosses no dial, nothing to animate", progress);
            return Ok(());
        }

        let offsets: Vec<usize> = if after > before {
            (low..high).map(|offset| offset as usize).collect()
        } else {
            (low..high).rev().map(|offset| offset as usize).collect()
        };

        let step = duration / count;
        log::trace!(
            "Animating {} dials from {} to {} over {:?}",
            count,
            before,
            after,
            duration
        );

        for (index, offset) in offsets.into_iter().enumerate() {
            let animation = FillAnimation {
                to: self.fill_color(offset),
                duration: step,
                delay: step * index as u32,
            };
            self.surface.animate_fill(&self.dials[offset], animation);
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        let layout = DialLayout::new(&self.config, self.bounds);
        log::debug!(
            "Rebuilding {} dials in {:?}",
            self.config.dial_count(),
            layout.frame()
        );

        self.surface.clear();
        self.surface.set_frame(layout.frame());

        let active = self.config.active_dials_count();
        let limit = self.config.limit_dial_offset();

        let mut dials = Vec::with_capacity(self.config.dial_count());
        for offset in 0..self.config.dial_count() {
            let fill = DialState::resolve(offset as i64, active, limit).color(&self.config);
            dials.push(self.surface.insert_dial(&layout.shape(offset), fill));
        }
        self.dials = dials;
    }

    fn recolor(&mut self) {
        for offset in 0..self.dials.len() {
            let color = self.fill_color(offset);
            self.surface.fill_dial(&self.dials[offset], color);
        }
    }

    fn reframe(&mut self) {
        let layout = DialLayout::new(&self.config, self.bounds);
        self.surface.set_frame(layout.frame());
        for (offset, dial) in self.dials.iter().enumerate() {
            self.surface.move_dial(dial, layout.position(offset));
        }
    }
}
