use crate::color::Color;
use crate::dial::DialShape;
use crate::geometry::{Point, Rect};
use std::time::Duration;

/// Declarative fill transition handed to a [`Surface`].
///
/// The transition starts `delay` after it is scheduled, runs for `duration`, and holds
/// `to` once finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillAnimation {
    pub to: Color,
    pub duration: Duration,
    pub delay: Duration,
}

/// Drawing backend the gauge places its dials on.
///
/// The gauge only issues commands; timing and playback of animations belong to the surface.
pub trait Surface {
    type Layer;

    /// Places the container holding every dial.
    fn set_frame(&mut self, frame: Rect);

    /// Removes every dial.
    fn clear(&mut self);

    fn insert_dial(&mut self, shape: &DialShape, fill: Color) -> Self::Layer;

    fn move_dial(&mut self, layer: &Self::Layer, center: Point);

    /// Sets the fill immediately.
    fn fill_dial(&mut self, layer: &Self::Layer, color: Color);

    fn animate_fill(&mut self, layer: &Self::Layer, animation: FillAnimation);
}
