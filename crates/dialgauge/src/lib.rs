//! A ring of pill-shaped dials laid out along an arc.
//!
//! Dials below the progress are painted as "passed", dials passed beyond the limit get
//! their own color, and one dial marks the limit. [`Gauge`] computes the layout and
//! the color changes and hands them to a [`Surface`]; [`Scene`] is a retained surface
//! that plays the color transitions back against a host-driven clock.

pub mod color;
pub mod config;
pub mod dial;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod scene;
pub mod surface;

pub use color::{Color, ColorParseError};
pub use config::{AngleRange, GaugeConfig};
pub use dial::{DialLayout, DialShape, DialState};
pub use error::GaugeError;
pub use gauge::Gauge;
pub use geometry::{Point, Rect, Size};
pub use scene::{Easing, LayerId, Scene, SceneLayer, ScheduledFill};
pub use surface::{FillAnimation, Surface};
