#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]

//! # Aether
//!
//! Real-time 2D particle and rigid-body simulation, meant to be driven
//! once per frame by a host that owns the display loop and the renderer.
//!
//! Aether provides:
//! - **Particle**: a point with velocity, lifetime, rotation and visual attributes
//! - **ParticleEmitter**: spawns, integrates and culls particles under gravity and wind
//! - **ParticleSystem**: drives many emitters as one unit
//! - **RigidBody**: a mass integrated from accumulated forces with friction and drag
//! - **Spring**: a damped spring pulling particles toward an anchor
//!
//! The simulation never draws itself. Each frame the host advances it and
//! then asks it to render into a [`Surface`].
//!
//! ## Emitter Example
//!
//! ```rust
//! use aether::{ParticleEmitter, ParticleSystem, RecordingSurface, Vec2, SCREEN_GRAVITY};
//!
//! let mut fountain = ParticleEmitter::new(Vec2::new(160.0, 240.0), 5, 2.0, 40.0, 42).unwrap();
//! fountain.set_gravity(SCREEN_GRAVITY * 10.0);
//!
//! let mut system = ParticleSystem::new();
//! system.add_emitter(fountain);
//!
//! // Simulate one second at 60 FPS
//! for _ in 0..60 {
//!     system.advance_all(aether::fps(60));
//! }
//!
//! let mut surface = RecordingSurface::new();
//! system.render_all(&mut surface);
//! assert_eq!(surface.fill_count(), system.particle_count());
//! ```
//!
//! ## Rigid Body Example
//!
//! ```rust
//! use aether::{RigidBody, Vec2};
//!
//! let mut crate_body = RigidBody::new(Vec2::ZERO, 10.0)
//!     .unwrap()
//!     .with_friction(0.05)
//!     .unwrap();
//!
//! crate_body.apply_force(Vec2::new(100.0, 0.0));
//! crate_body.advance(1.0 / 60.0);
//! assert!(crate_body.velocity().x > 0.0);
//! ```
//!
//! ## Determinism
//!
//! Emitters own their random generator. Two emitters built from the same
//! seed and configuration and driven with the same time steps produce
//! identical particles.

mod animation;
mod color;
mod config;
mod emitter;
mod error;
mod particle;
mod render;
mod rigid_body;
mod spring;
mod system;
mod vec2;

pub use animation::{AnimationKind, AnimationStep, MIN_ANIMATED_SIZE};
pub use color::Rgba;
pub use config::{ConfigError, EmitterConfig, RigidBodyConfig, Scene, SceneConfig};
pub use emitter::{AnimationMode, ParticleEmitter, seeded_rng};
pub use error::{AetherError, Result};
pub use particle::{DEFAULT_PARTICLE_SIZE, Particle};
pub use render::{DrawCommand, RecordingSurface, Surface};
pub use rigid_body::{BODY_COLOR, BODY_EXTENT, RigidBody};
pub use spring::Spring;
pub use system::{EmitterId, ParticleSystem};
pub use vec2::{GRAVITY, Rect, SCREEN_GRAVITY, Vec2};

/// Returns the time step for a given number of frames per second.
///
/// Hosts usually supply their own measured frame time; this is handy for
/// fixed-step loops and tests.
///
/// ```rust
/// assert_eq!(aether::fps(4), 0.25);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::animation::AnimationKind;
    pub use crate::color::Rgba;
    pub use crate::emitter::{AnimationMode, ParticleEmitter};
    pub use crate::particle::Particle;
    pub use crate::render::Surface;
    pub use crate::rigid_body::RigidBody;
    pub use crate::spring::Spring;
    pub use crate::system::ParticleSystem;
    pub use crate::vec2::{GRAVITY, SCREEN_GRAVITY, Vec2};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps() {
        assert!((fps(60) - 1.0 / 60.0).abs() < 1e-12);
        assert!((fps(30) - 1.0 / 30.0).abs() < 1e-12);
    }
}
