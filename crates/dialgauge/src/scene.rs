//! Retained-mode [`Surface`] that keeps every dial in memory and plays fill
//! transitions back against a clock the host advances.

use crate::color::Color;
use crate::dial::DialShape;
use crate::geometry::{Point, Rect};
use crate::surface::{FillAnimation, Surface};
use derive_more::{Display, From, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct LayerId(usize);

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear time `t` in `[0, 1]` to transition progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A fill transition as placed on the scene's timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledFill {
    pub from: Color,
    pub to: Color,
    pub begin: Duration,
    pub duration: Duration,
}

impl ScheduledFill {
    /// Saturates at `Duration::MAX`, so a transition that long never finishes.
    pub fn end(&self) -> Duration {
        self.begin.saturating_add(self.duration)
    }

    fn progress(&self, now: Duration) -> f64 {
        if now <= self.begin {
            0.0
        } else if now >= self.end() || self.duration.is_zero() {
            1.0
        } else {
            (now - self.begin).as_secs_f64() / self.duration.as_secs_f64()
        }
    }

    fn sample(&self, now: Duration, easing: Easing) -> Color {
        self.from.mix(self.to, easing.apply(self.progress(now)))
    }
}

#[derive(Debug, Clone)]
pub struct SceneLayer {
    shape: DialShape,
    fill: Color,
    transition: Option<ScheduledFill>,
}

impl SceneLayer {
    pub fn shape(&self) -> &DialShape {
        &self.shape
    }

    /// The committed fill, ignoring any running transition.
    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn transition(&self) -> Option<&ScheduledFill> {
        self.transition.as_ref()
    }

    fn presented(&self, now: Duration, easing: Easing) -> Color {
        self.transition
            .map_or(self.fill, |transition| transition.sample(now, easing))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    frame: Rect,
    layers: Vec<SceneLayer>,
    clock: Duration,
    easing: Easing,
}

impl Scene {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&SceneLayer> {
        self.layers.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Color a dial shows at the current clock.
    pub fn presented_fill(&self, id: LayerId) -> Option<Color> {
        self.layer(id)
            .map(|layer| layer.presented(self.clock, self.easing))
    }

    /// Every dial with the color it shows at the current clock, in insertion order.
    pub fn draw_list(&self) -> impl Iterator<Item = (&DialShape, Color)> + '_ {
        self.layers
            .iter()
            .map(|layer| (&layer.shape, layer.presented(self.clock, self.easing)))
    }

    pub fn is_animating(&self) -> bool {
        self.layers.iter().any(|layer| layer.transition.is_some())
    }

    /// Moves the clock forward to `now` and commits finished transitions.
    ///
    /// The clock never runs backwards. Returns whether any transition is still pending.
    pub fn advance(&mut self, now: Duration) -> bool {
        self.clock = self.clock.max(now);
        let clock = self.clock;

        for layer in &mut self.layers {
            if let Some(transition) = layer.transition
                && transition.end() <= clock
            {
                layer.fill = transition.to;
                layer.transition = None;
            }
        }

        self.is_animating()
    }

    fn layer_mut(&mut self, id: &LayerId) -> Option<&mut SceneLayer> {
        let layer = self.layers.get_mut(id.0);
        if layer.is_none() {
            log::warn!("Ignoring command for unknown dial layer {}", id);
        }
        layer
    }
}

impl Surface for Scene {
    type Layer = LayerId;

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn clear(&mut self) {
        self.layers.clear();
    }

    fn insert_dial(&mut self, shape: &DialShape, fill: Color) -> LayerId {
        self.layers.push(SceneLayer {
            shape: *shape,
            fill,
            transition: None,
        });
        LayerId(self.layers.len() - 1)
    }

    fn move_dial(&mut self, id: &LayerId, center: Point) {
        if let Some(layer) = self.layer_mut(id) {
            layer.shape.center = center;
        }
    }

    fn fill_dial(&mut self, id: &LayerId, color: Color) {
        if let Some(layer) = self.layer_mut(id) {
            layer.fill = color;
            layer.transition = None;
        }
    }

    fn animate_fill(&mut self, id: &LayerId, animation: FillAnimation) {
        let (clock, easing) = (self.clock, self.easing);
        if let Some(layer) = self.layer_mut(id) {
            // restart from whatever is on screen right now
            let from = layer.presented(clock, easing);
            layer.transition = Some(ScheduledFill {
                from,
                to: animation.to,
                begin: clock.saturating_add(animation.delay),
                duration: animation.duration,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn shape() -> DialShape {
        DialShape {
            center: Point::new(10.0, 10.0),
            size: Size::new(14.0, 3.0),
            rotation: 0.0,
            corner_radius: 1.5,
        }
    }

    fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    fn fade(to: Color, delay_ms: u64, duration_ms: u64) -> FillAnimation {
        FillAnimation {
            to,
            duration: Duration::from_millis(duration_ms),
            delay: Duration::from_millis(delay_ms),
        }
    }

    #[test]
    fn test_easing_endpoints() {
        use strum::IntoEnumIterator;

        for easing in Easing::iter() {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing}");
            assert_eq!(easing.apply(-1.0), 0.0, "{easing}");
        }
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert_eq!("ease-in-out".parse::<Easing>().unwrap(), Easing::EaseInOut);
        assert_eq!("Linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!(Easing::EaseOut.to_string(), "ease-out");
    }

    #[test]
    fn test_transition_holds_start_then_end() {
        let mut scene = Scene::new(Easing::Linear);
        let id = scene.insert_dial(&shape(), black());

        scene.animate_fill(&id, fade(white(), 100, 100));
        assert_eq!(scene.presented_fill(id), Some(black()));

        scene.advance(Duration::from_millis(50));
        assert_eq!(scene.presented_fill(id), Some(black()));

        scene.advance(Duration::from_millis(150));
        let (r, g, b, _) = scene.presented_fill(id).unwrap().components();
        assert!((r - 0.5).abs() < 1e-9 && (g - 0.5).abs() < 1e-9 && (b - 0.5).abs() < 1e-9);
        assert_eq!(scene.layer(id).unwrap().fill(), black());

        assert!(!scene.advance(Duration::from_millis(200)));
        assert_eq!(scene.presented_fill(id), Some(white()));
        assert_eq!(scene.layer(id).unwrap().fill(), white());
        assert!(scene.layer(id).unwrap().transition().is_none());

        // final value persists
        scene.advance(Duration::from_secs(10));
        assert_eq!(scene.presented_fill(id), Some(white()));
    }

    #[test]
    fn test_new_animation_restarts_from_presented_color() {
        let mut scene = Scene::new(Easing::Linear);
        let id = scene.insert_dial(&shape(), black());

        scene.animate_fill(&id, fade(white(), 0, 100));
        scene.advance(Duration::from_millis(50));
        let midway = scene.presented_fill(id).unwrap();

        scene.animate_fill(&id, fade(black(), 0, 100));
        let transition = *scene.layer(id).unwrap().transition().unwrap();
        assert_eq!(transition.from, midway);
        assert_eq!(transition.to, black());
        assert_eq!(transition.begin, Duration::from_millis(50));

        scene.advance(Duration::from_millis(150));
        assert_eq!(scene.presented_fill(id), Some(black()));
    }

    #[test]
    fn test_fill_cancels_transition() {
        let mut scene = Scene::new(Easing::default());
        let id = scene.insert_dial(&shape(), black());

        scene.animate_fill(&id, fade(white(), 0, 1000));
        assert!(scene.is_animating());

        scene.fill_dial(&id, Color::red());
        assert!(!scene.is_animating());
        assert_eq!(scene.presented_fill(id), Some(Color::red()));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut scene = Scene::default();
        scene.advance(Duration::from_secs(2));
        scene.advance(Duration::from_secs(1));
        assert_eq!(scene.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_duration_transition_completes() {
        let mut scene = Scene::new(Easing::Linear);
        let id = scene.insert_dial(&shape(), black());

        scene.animate_fill(&id, fade(white(), 0, 0));
        assert!(!scene.advance(Duration::ZERO));
        assert_eq!(scene.presented_fill(id), Some(white()));
    }

    #[test]
    fn test_endless_transition_after_clock_moved() {
        let mut scene = Scene::new(Easing::Linear);
        let id = scene.insert_dial(&shape(), black());
        scene.advance(Duration::from_secs(10));

        scene.animate_fill(
            &id,
            FillAnimation {
                to: white(),
                duration: Duration::MAX,
                delay: Duration::MAX,
            },
        );
        let transition = *scene.layer(id).unwrap().transition().unwrap();
        assert_eq!(transition.begin, Duration::MAX);
        assert_eq!(transition.end(), Duration::MAX);

        assert!(scene.advance(Duration::from_secs(11)));
        assert_eq!(scene.presented_fill(id), Some(black()));
    }

    #[test]
    fn test_move_and_clear() {
        let mut scene = Scene::default();
        scene.set_frame(Rect::new(0.0, 0.0, 50.0, 50.0));
        let id = scene.insert_dial(&shape(), black());

        scene.move_dial(&id, Point::new(1.0, 2.0));
        assert_eq!(scene.layer(id).unwrap().shape().center, Point::new(1.0, 2.0));

        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.presented_fill(id), None);
        // stale handles are ignored
        scene.fill_dial(&id, white());
        assert!(scene.is_empty());
    }
}
