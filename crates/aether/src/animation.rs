//! Per-particle animation effects layered on top of base integration.
//!
//! Each [`AnimationKind`] maps the particle's animation progress (seconds
//! since spawn) and the frame's time step to an [`AnimationStep`]: a set
//! of attribute changes the particle applies after it has integrated its
//! velocity. A particle with [`AnimationKind::None`] is untouched.

use core::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// Smallest size an animation may shrink a particle to.
pub const MIN_ANIMATED_SIZE: f64 = 1.0;

/// An animation effect applied to a particle every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    #[default]
    None,
    Bounce,
    Fade,
    Rotate,
    Scale,
    Wobble,
    Pulse,
    Sway,
    Shrink,
    Grow,
    Jiggle,
    Wave,
    Spin,
    Drift,
    Zoom,
    Flicker,
    Flash,
    BounceX,
    BounceY,
    Float,
    Expand,
    Contract,
    Shimmer,
    Bob,
}

/// Attribute changes produced by one animation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationStep {
    /// Added to the particle's position.
    pub offset: Vec2,
    /// Added to the particle's rotation, in radians.
    pub rotation: f64,
    /// Replacement size, if the animation changes it.
    pub size: Option<f64>,
    /// Replacement alpha for the particle's color.
    pub alpha: Option<f64>,
}

impl AnimationStep {
    fn offset(x: f64, y: f64) -> Self {
        Self {
            offset: Vec2::new(x, y),
            ..Self::default()
        }
    }

    fn rotation(radians: f64) -> Self {
        Self {
            rotation: radians,
            ..Self::default()
        }
    }

    fn size(size: f64) -> Self {
        Self {
            size: Some(size.max(MIN_ANIMATED_SIZE)),
            ..Self::default()
        }
    }

    fn alpha(alpha: f64) -> Self {
        Self {
            alpha: Some(alpha.clamp(0.0, 1.0)),
            ..Self::default()
        }
    }
}

impl AnimationKind {
    /// Every animation kind, in declaration order.
    pub const ALL: [AnimationKind; 24] = [
        Self::None,
        Self::Bounce,
        Self::Fade,
        Self::Rotate,
        Self::Scale,
        Self::Wobble,
        Self::Pulse,
        Self::Sway,
        Self::Shrink,
        Self::Grow,
        Self::Jiggle,
        Self::Wave,
        Self::Spin,
        Self::Drift,
        Self::Zoom,
        Self::Flicker,
        Self::Flash,
        Self::BounceX,
        Self::BounceY,
        Self::Float,
        Self::Expand,
        Self::Contract,
        Self::Shimmer,
        Self::Bob,
    ];

    /// Computes the attribute changes for one tick.
    ///
    /// * `progress` - seconds of animation elapsed before this tick
    /// * `delta_time` - length of this tick
    /// * `base_size` - the particle's configured size, the rest point for
    ///   oscillating size effects
    /// * `size` - the particle's current size
    ///
    /// Returned sizes never fall below [`MIN_ANIMATED_SIZE`].
    pub fn step(self, progress: f64, delta_time: f64, base_size: f64, size: f64) -> AnimationStep {
        let (s, c) = progress.sin_cos();
        match self {
            Self::None => AnimationStep::default(),
            Self::Bounce | Self::BounceY => AnimationStep::offset(0.0, s * 10.0),
            Self::BounceX => AnimationStep::offset(s * 10.0, 0.0),
            Self::Wobble => AnimationStep::offset(s * 5.0, 0.0),
            Self::Sway | Self::Wave => AnimationStep::offset(0.0, s * 5.0),
            Self::Bob => AnimationStep::offset(0.0, s * 4.0),
            Self::Float => AnimationStep::offset(0.0, s * 2.0),
            Self::Jiggle => AnimationStep::offset(s * 3.0, c * 3.0),
            Self::Drift => AnimationStep::offset(s * 2.0, c * 2.0),
            Self::Rotate => AnimationStep::rotation(delta_time * TAU),
            Self::Spin => AnimationStep::rotation(delta_time * 5.0),
            Self::Scale => AnimationStep::size(base_size + s * base_size),
            Self::Pulse => AnimationStep::size(base_size + s * base_size * 0.6),
            Self::Shrink => AnimationStep::size(size - delta_time * 2.0),
            Self::Grow => AnimationStep::size(size + delta_time * 2.0),
            Self::Zoom => AnimationStep::size(size + delta_time * 5.0),
            Self::Expand => AnimationStep::size(size + s * 5.0),
            Self::Contract => AnimationStep::size(size - s * 5.0),
            Self::Fade => AnimationStep::alpha(1.0 - progress / 10.0),
            Self::Flicker => AnimationStep::alpha(0.5 + 0.5 * s),
            Self::Flash => AnimationStep::alpha(s.abs() * 0.8),
            Self::Shimmer => AnimationStep::alpha(0.5 + 0.5 * s.abs()),
        }
    }
}
