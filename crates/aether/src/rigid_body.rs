//! Mass-bearing bodies driven by accumulated forces.
//!
//! Forces applied between two calls to [`RigidBody::advance`] are summed
//! into a single net force at the next advance and then discarded.
//!
//! # Example
//!
//! ```rust
//! use aether::{RigidBody, Vec2};
//!
//! let mut body = RigidBody::new(Vec2::ZERO, 2.0).unwrap();
//! body.apply_force(Vec2::new(4.0, 0.0));
//! body.advance(1.0);
//!
//! assert_eq!(body.velocity(), Vec2::new(2.0, 0.0));
//! assert_eq!(body.position(), Vec2::new(2.0, 0.0));
//! ```

use tracing::debug;

use crate::color::Rgba;
use crate::error::{AetherError, Result, ensure_coefficient, ensure_finite};
use crate::render::Surface;
use crate::vec2::{Rect, Vec2};

/// Side length of the square a body is drawn as.
pub const BODY_EXTENT: f64 = 20.0;

/// Fill color of rendered bodies.
pub const BODY_COLOR: Rgba = Rgba::BLUE;

/// A body with mass, velocity, friction and drag.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    position: Vec2,
    velocity: Vec2,
    mass: f64,
    friction: f64,
    drag_coefficient: f64,
    acceleration: Vec2,
    forces: Vec<Vec2>,
}

impl RigidBody {
    /// Creates a body at rest with no friction or drag.
    ///
    /// # Errors
    ///
    /// Returns [`AetherError::InvalidMass`] if `mass` is not strictly positive,
    /// or [`AetherError::NonFinite`] if it is NaN or infinite.
    pub fn new(position: Vec2, mass: f64) -> Result<Self> {
        let mass = validate_mass(mass)?;
        debug!(body.mass = mass, "Rigid body created");
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            mass,
            friction: 0.0,
            drag_coefficient: 0.0,
            acceleration: Vec2::ZERO,
            forces: Vec::new(),
        })
    }

    /// Sets the initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets friction.
    ///
    /// # Errors
    ///
    /// Returns [`AetherError::InvalidFriction`] if `friction` is outside `0.0..1.0`.
    pub fn with_friction(mut self, friction: f64) -> Result<Self> {
        self.set_friction(friction)?;
        Ok(self)
    }

    /// Sets the drag coefficient.
    ///
    /// # Errors
    ///
    /// Returns an error if `drag` is negative or not finite.
    pub fn with_drag(mut self, drag: f64) -> Result<Self> {
        self.set_drag_coefficient(drag)?;
        Ok(self)
    }

    /// Queues a force for the next [`advance`](Self::advance).
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.forces.push(force);
    }

    /// Same as [`apply_force`](Self::apply_force).
    #[inline]
    pub fn apply_external_force(&mut self, force: Vec2) {
        self.apply_force(force);
    }

    /// Integrates one time step.
    ///
    /// The pending forces are summed and cleared, then:
    ///
    /// ```text
    /// a  = F / m
    /// v += a * dt
    /// v *= 1 - friction
    /// v -= drag * v * dt
    /// p += v * dt
    /// ```
    ///
    /// Friction scales velocity once per call regardless of `dt`; drag
    /// works on the friction-scaled velocity.
    pub fn advance(&mut self, delta_time: f64) {
        let net_force: Vec2 = self.forces.drain(..).sum();

        self.acceleration = net_force / self.mass;
        self.velocity += self.acceleration * delta_time;
        self.velocity = self.velocity * (1.0 - self.friction);
        self.velocity -= self.velocity * self.drag_coefficient * delta_time;
        self.position += self.velocity * delta_time;
    }

    /// Draws the body as a fixed-size blue square at its position.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill_color(BODY_COLOR);
        surface.fill_rect(Rect::square(self.position, BODY_EXTENT));
    }

    /// Forces queued since the last advance, in application order.
    pub fn pending_forces(&self) -> &[Vec2] {
        &self.forces
    }

    /// Acceleration computed by the last advance.
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// # Errors
    ///
    /// Returns [`AetherError::InvalidMass`], leaving the mass unchanged, if
    /// `mass` is not strictly positive.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        self.mass = validate_mass(mass).inspect_err(|err| {
            debug!(error = %err, "Rejected rigid body mass");
        })?;
        Ok(())
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// # Errors
    ///
    /// Returns [`AetherError::InvalidFriction`], leaving friction unchanged,
    /// if `friction` is outside `0.0..1.0`.
    pub fn set_friction(&mut self, friction: f64) -> Result<()> {
        if !(0.0..1.0).contains(&friction) {
            debug!(body.friction = friction, "Rejected rigid body friction");
            return Err(AetherError::InvalidFriction(friction));
        }
        self.friction = friction;
        Ok(())
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    /// # Errors
    ///
    /// Returns an error, leaving drag unchanged, if `drag` is negative or
    /// not finite.
    pub fn set_drag_coefficient(&mut self, drag: f64) -> Result<()> {
        self.drag_coefficient = ensure_coefficient("drag_coefficient", drag).inspect_err(|err| {
            debug!(error = %err, "Rejected rigid body drag");
        })?;
        Ok(())
    }
}

fn validate_mass(mass: f64) -> Result<f64> {
    ensure_finite("mass", mass)?;
    if mass <= 0.0 {
        return Err(AetherError::InvalidMass(mass));
    }
    Ok(mass)
}
