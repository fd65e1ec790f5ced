//! Scene presets loaded from TOML or JSON.
//!
//! Every tunable is also reachable through getters and setters on the
//! runtime objects; these types only describe a starting configuration.
//! A [`SceneConfig`] builds a [`Scene`]: a [`ParticleSystem`] plus any
//! number of standalone [`RigidBody`]s, driven together.
//!
//! # Example
//!
//! ```rust
//! use aether::{RecordingSurface, SceneConfig};
//!
//! let config = SceneConfig::from_toml(r##"
//!     seed = 7
//!
//!     [[emitters]]
//!     position = { x = 100.0, y = 50.0 }
//!     emission_rate = 4
//!     particle_lifetime = 1.5
//!     velocity_range = 20.0
//!     particle_color = "#ff8800"
//!     gravity = { x = 0.0, y = 9.81 }
//!
//!     [[bodies]]
//!     mass = 2.0
//!     friction = 0.1
//! "##).unwrap();
//!
//! let mut scene = config.build().unwrap();
//! scene.advance(1.0 / 60.0);
//!
//! let mut surface = RecordingSurface::new();
//! scene.render(&mut surface);
//! assert_eq!(surface.fill_count(), 5);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::animation::AnimationKind;
use crate::color::Rgba;
use crate::emitter::{AnimationMode, ParticleEmitter, seeded_rng};
use crate::error::{AetherError, ensure_finite_vec};
use crate::particle::DEFAULT_PARTICLE_SIZE;
use crate::render::Surface;
use crate::rigid_body::RigidBody;
use crate::system::ParticleSystem;
use crate::vec2::Vec2;

/// Error loading or building a scene.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("{section}[{index}]: {source}")]
    Invalid {
        section: &'static str,
        index: usize,
        #[source]
        source: AetherError,
    },
}

/// Starting parameters for one [`ParticleEmitter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    pub position: Vec2,
    /// Particles spawned per update.
    pub emission_rate: u32,
    /// Lifetime granted to each new particle.
    pub particle_lifetime: f64,
    pub velocity_range: f64,
    pub particle_color: Rgba,
    pub particle_size: f64,
    pub angular_velocity_range: f64,
    /// Initial rotation of new particles.
    pub rotation: f64,
    pub gravity: Vec2,
    pub wind: Vec2,
    /// Animation given to every particle, unless `random_animation` is set.
    pub animation: AnimationKind,
    pub random_animation: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            emission_rate: 1,
            particle_lifetime: 1.0,
            velocity_range: 0.0,
            particle_color: Rgba::WHITE,
            particle_size: DEFAULT_PARTICLE_SIZE,
            angular_velocity_range: 0.0,
            rotation: 0.0,
            gravity: Vec2::ZERO,
            wind: Vec2::ZERO,
            animation: AnimationKind::None,
            random_animation: false,
        }
    }
}

impl EmitterConfig {
    /// Builds a seeded emitter.
    ///
    /// # Errors
    ///
    /// Returns an error if a range is negative or a vector is not finite.
    pub fn build(&self, seed: u64) -> crate::Result<ParticleEmitter> {
        let mut emitter = ParticleEmitter::with_rng(
            self.position,
            self.emission_rate,
            self.particle_lifetime,
            self.velocity_range,
            seeded_rng(seed),
        )?;
        emitter.set_angular_velocity_range(self.angular_velocity_range)?;
        emitter.set_gravity(ensure_finite_vec("gravity", self.gravity)?);
        emitter.set_wind(ensure_finite_vec("wind", self.wind)?);
        emitter.set_particle_color(self.particle_color);
        emitter.set_particle_size(self.particle_size);
        emitter.set_rotation(self.rotation);
        emitter.set_animation(if self.random_animation {
            AnimationMode::Random
        } else {
            AnimationMode::Fixed(self.animation)
        });
        Ok(emitter)
    }
}

/// Starting parameters for one [`RigidBody`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigidBodyConfig {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub friction: f64,
    pub drag_coefficient: f64,
}

impl Default for RigidBodyConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            friction: 0.0,
            drag_coefficient: 0.0,
        }
    }
}

impl RigidBodyConfig {
    /// # Errors
    ///
    /// Returns an error if mass, friction or drag is out of range.
    pub fn build(&self) -> crate::Result<RigidBody> {
        RigidBody::new(self.position, self.mass)?
            .with_velocity(self.velocity)
            .with_friction(self.friction)?
            .with_drag(self.drag_coefficient)
    }
}

/// A full scene: emitters and standalone bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Base seed. Emitter `i` is seeded with `seed + i`.
    pub seed: u64,
    pub emitters: Vec<EmitterConfig>,
    pub bodies: Vec<RigidBodyConfig>,
}

impl SceneConfig {
    /// Parses a scene from TOML text.
    ///
    /// # Errors
    /// Returns `ConfigError` if parsing fails.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Parses a scene from JSON text.
    ///
    /// # Errors
    /// Returns `ConfigError` if parsing fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a scene from a file, picking the format from its extension.
    ///
    /// # Errors
    /// Returns `ConfigError` if reading or parsing fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.into())),
            None => Err(ConfigError::UnsupportedFormat("unknown".into())),
        }
    }

    /// Builds every emitter and body.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first entry that fails
    /// validation.
    pub fn build(&self) -> Result<Scene, ConfigError> {
        let mut system = ParticleSystem::new();
        for (index, emitter) in self.emitters.iter().enumerate() {
            let seed = self.seed.wrapping_add(index as u64);
            let emitter = emitter.build(seed).map_err(|source| ConfigError::Invalid {
                section: "emitters",
                index,
                source,
            })?;
            system.add_emitter(emitter);
        }

        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(index, body)| {
                body.build().map_err(|source| ConfigError::Invalid {
                    section: "bodies",
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            scene.seed = self.seed,
            scene.emitters = system.len(),
            scene.bodies = bodies.len(),
            "Scene built"
        );
        Ok(Scene { system, bodies })
    }
}

/// A particle system and standalone bodies advanced as one.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub system: ParticleSystem,
    pub bodies: Vec<RigidBody>,
}

impl Scene {
    /// Advances the particle system, then every body.
    pub fn advance(&mut self, delta_time: f64) {
        self.system.advance_all(delta_time);
        for body in &mut self.bodies {
            body.advance(delta_time);
        }
    }

    /// Renders particles first, then bodies on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.system.render_all(surface);
        for body in &self.bodies {
            body.render(surface);
        }
    }
}
