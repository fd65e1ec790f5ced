//! A single simulated point.
//!
//! # Example
//!
//! ```rust
//! use aether::{Particle, Vec2};
//!
//! let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0);
//! p.advance(0.5);
//! assert_eq!(p.position(), Vec2::new(5.0, 0.0));
//! assert!(p.is_alive());
//! ```

use crate::animation::AnimationKind;
use crate::color::Rgba;
use crate::render::Surface;
use crate::vec2::{Rect, Vec2};

/// Size given to particles when none is configured.
pub const DEFAULT_PARTICLE_SIZE: f64 = 5.0;

/// A point with velocity, a remaining lifetime and visual attributes.
///
/// Lifetime counts down by the time step on every [`advance`](Self::advance)
/// and may go negative for one tick before the owning emitter culls the
/// particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    lifetime: f64,
    color: Rgba,
    size: f64,
    base_size: f64,
    rotation: f64,
    angular_velocity: f64,
    animation: AnimationKind,
    animation_progress: f64,
}

impl Particle {
    /// Creates a white particle of the default size with no rotation.
    pub fn new(position: Vec2, velocity: Vec2, lifetime: f64) -> Self {
        Self {
            position,
            velocity,
            lifetime,
            color: Rgba::WHITE,
            size: DEFAULT_PARTICLE_SIZE,
            base_size: DEFAULT_PARTICLE_SIZE,
            rotation: 0.0,
            angular_velocity: 0.0,
            animation: AnimationKind::None,
            animation_progress: 0.0,
        }
    }

    /// Sets the color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Sets the size, clamped at zero.
    pub fn with_size(mut self, size: f64) -> Self {
        self.set_size(size);
        self
    }

    /// Sets rotation and angular velocity, in radians and radians per unit time.
    pub fn with_spin(mut self, rotation: f64, angular_velocity: f64) -> Self {
        self.rotation = rotation;
        self.angular_velocity = angular_velocity;
        self
    }

    /// Sets the animation effect.
    pub fn with_animation(mut self, animation: AnimationKind) -> Self {
        self.animation = animation;
        self
    }

    /// Integrates one time step.
    ///
    /// Position moves by `velocity * delta_time`, lifetime drops by
    /// `delta_time` and rotation turns by `angular_velocity * delta_time`.
    /// A zero time step leaves the particle unchanged, animation included.
    /// Any animation effect is applied after integration.
    pub fn advance(&mut self, delta_time: f64) {
        self.position += self.velocity * delta_time;
        self.lifetime -= delta_time;
        self.rotation += self.angular_velocity * delta_time;

        if self.animation != AnimationKind::None && delta_time != 0.0 {
            self.animate(delta_time);
        }
    }

    fn animate(&mut self, delta_time: f64) {
        let step = self.animation.step(
            self.animation_progress,
            delta_time,
            self.base_size,
            self.size,
        );
        self.position += step.offset;
        self.rotation += step.rotation;
        if let Some(size) = step.size {
            self.size = size;
        }
        if let Some(alpha) = step.alpha {
            self.color = self.color.with_alpha(alpha);
        }
        self.animation_progress += delta_time;
    }

    /// Returns `true` while lifetime is strictly positive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Draws the particle as a rotated, filled circle.
    ///
    /// The surface state is saved before and restored after, so the
    /// transform does not leak into later draws.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let half = self.size / 2.0;
        surface.save();
        surface.translate(self.position + Vec2::splat(half));
        surface.rotate(self.rotation);
        surface.translate(Vec2::splat(-half));
        surface.set_fill_color(self.color);
        surface.fill_ellipse(Rect::new(0.0, 0.0, self.size, self.size));
        surface.restore();
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Adds `delta` to the velocity.
    #[inline]
    pub fn nudge(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Remaining lifetime; non-positive once expired.
    #[inline]
    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Diameter.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Sets the diameter. Negative values are clamped to zero.
    pub fn set_size(&mut self, size: f64) {
        let size = size.max(0.0);
        self.size = size;
        self.base_size = size;
    }

    /// Rotation in radians.
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Turns the particle by `radians`.
    #[inline]
    pub fn adjust_rotation_by(&mut self, radians: f64) {
        self.rotation += radians;
    }

    #[inline]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    #[inline]
    pub fn animation(&self) -> AnimationKind {
        self.animation
    }

    /// Seconds of animation applied so far.
    #[inline]
    pub fn animation_progress(&self) -> f64 {
        self.animation_progress
    }
}
