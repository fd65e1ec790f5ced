//! Damped springs anchored at a fixed point.
//!
//! A [`Spring`] pulls a particle toward its `end` anchor with a Hookean
//! term proportional to the stretch beyond `rest_length`, minus a damping
//! term proportional to the particle's velocity along the spring axis.
//! The resulting force is added straight to the particle's velocity.
//!
//! ```text
//! d         = end - position
//! distance  = |d|
//! magnitude = stiffness * (distance - rest_length)
//!           - damping * dot(velocity, d) / distance
//! force     = magnitude * d / distance
//! ```
//!
//! When the particle sits exactly on the anchor the axis is undefined and
//! the spring applies no force.

use tracing::{debug, trace};

use crate::error::{Result, ensure_coefficient};
use crate::particle::Particle;
use crate::vec2::Vec2;

/// A stateless damped spring.
///
/// `start` is informational; only `end` takes part in the force.
///
/// # Example
///
/// ```rust
/// use aether::{Particle, Spring, Vec2};
///
/// let spring = Spring::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.5, 0.0).unwrap();
/// let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0);
///
/// spring.apply_force_to(&mut p);
/// assert_eq!(p.velocity(), Vec2::new(5.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    start: Vec2,
    end: Vec2,
    stiffness: f64,
    damping: f64,
    rest_length: f64,
}

impl Spring {
    /// Creates a spring with zero rest length.
    ///
    /// # Errors
    ///
    /// Returns an error if `stiffness` or `damping` is negative or not finite.
    pub fn new(start: Vec2, end: Vec2, stiffness: f64, damping: f64) -> Result<Self> {
        let (stiffness, damping) = ensure_coefficient("stiffness", stiffness)
            .and_then(|s| ensure_coefficient("damping", damping).map(|d| (s, d)))
            .inspect_err(|err| {
                debug!(error = %err, "Rejected spring");
            })?;
        debug!(
            spring.stiffness = stiffness,
            spring.damping = damping,
            spring.end = ?end,
            "Spring created"
        );
        Ok(Self {
            start,
            end,
            stiffness,
            damping,
            rest_length: 0.0,
        })
    }

    /// Sets the equilibrium distance.
    ///
    /// # Errors
    ///
    /// Returns an error if `rest_length` is negative or not finite.
    pub fn with_rest_length(mut self, rest_length: f64) -> Result<Self> {
        self.set_rest_length(rest_length)?;
        Ok(self)
    }

    /// Returns the force the spring exerts on a point at `position` moving
    /// with `velocity`. Zero if the point coincides with the anchor.
    pub fn force_at(&self, position: Vec2, velocity: Vec2) -> Vec2 {
        let axis = self.end - position;
        let distance = axis.length();
        if distance == 0.0 {
            trace!(spring.end = ?self.end, "Particle on spring anchor, no force");
            return Vec2::ZERO;
        }

        // Normalize first: multiplying by the raw axis overflows long before
        // the distance itself does.
        let direction = axis / distance;
        let magnitude = self.stiffness * (distance - self.rest_length)
            - self.damping * velocity.dot(direction);
        direction * magnitude
    }

    /// Adds the spring force to `particle`'s velocity and returns it.
    pub fn apply_force_to(&self, particle: &mut Particle) -> Vec2 {
        let force = self.force_at(particle.position(), particle.velocity());
        particle.nudge(force);
        force
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn set_start(&mut self, start: Vec2) {
        self.start = start;
    }

    /// The anchor the spring pulls toward.
    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn set_end(&mut self, end: Vec2) {
        self.end = end;
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// # Errors
    ///
    /// Returns an error, leaving stiffness unchanged, if `stiffness` is
    /// negative or not finite.
    pub fn set_stiffness(&mut self, stiffness: f64) -> Result<()> {
        self.stiffness = ensure_coefficient("stiffness", stiffness).inspect_err(|err| {
            debug!(error = %err, "Rejected spring stiffness");
        })?;
        Ok(())
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// # Errors
    ///
    /// Returns an error, leaving damping unchanged, if `damping` is
    /// negative or not finite.
    pub fn set_damping(&mut self, damping: f64) -> Result<()> {
        self.damping = ensure_coefficient("damping", damping).inspect_err(|err| {
            debug!(error = %err, "Rejected spring damping");
        })?;
        Ok(())
    }

    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// # Errors
    ///
    /// Returns an error, leaving the rest length unchanged, if
    /// `rest_length` is negative or not finite.
    pub fn set_rest_length(&mut self, rest_length: f64) -> Result<()> {
        self.rest_length = ensure_coefficient("rest_length", rest_length).inspect_err(|err| {
            debug!(error = %err, "Rejected spring rest length");
        })?;
        Ok(())
    }
}
