//! Particle emitters.
//!
//! An emitter owns its particles. Every [`update`](ParticleEmitter::update)
//! spawns `emission_rate` new particles at the emitter's position, culls
//! every dead particle, then integrates the survivors and applies gravity
//! and wind to them.
//!
//! Randomness comes from a generator owned by the emitter, so a seeded
//! emitter produces the same particles on every run.
//!
//! # Example
//!
//! ```rust
//! use aether::{ParticleEmitter, Vec2};
//!
//! let mut emitter = ParticleEmitter::new(Vec2::ZERO, 10, 2.0, 30.0, 42).unwrap();
//! emitter.set_gravity(Vec2::new(0.0, 9.81));
//!
//! for _ in 0..60 {
//!     emitter.update(1.0 / 60.0);
//! }
//! assert!(emitter.particle_count() > 0);
//! ```

use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg64;
use tracing::{debug, trace};

use crate::animation::AnimationKind;
use crate::color::Rgba;
use crate::error::{Result, ensure_range};
use crate::particle::{DEFAULT_PARTICLE_SIZE, Particle};
use crate::render::Surface;
use crate::vec2::Vec2;

/// PCG stream used for seeded emitters.
const PCG_STREAM: u128 = 0x0a02_bdbf_7bb3_c0a7;

/// Creates the default generator for `seed`.
pub fn seeded_rng(seed: u64) -> Pcg64 {
    Pcg64::new(u128::from(seed), PCG_STREAM)
}

/// How an emitter picks the animation of each new particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// Every particle gets the same kind.
    Fixed(AnimationKind),
    /// Each particle draws a kind uniformly from [`AnimationKind::ALL`].
    Random,
}

impl Default for AnimationMode {
    fn default() -> Self {
        Self::Fixed(AnimationKind::None)
    }
}

/// Spawns, integrates and culls a collection of particles.
#[derive(Debug, Clone)]
pub struct ParticleEmitter<R = Pcg64> {
    position: Vec2,
    particles: Vec<Particle>,
    emission_rate: u32,
    particle_lifetime: f64,
    velocity_range: f64,
    particle_color: Rgba,
    particle_size: f64,
    angular_velocity_range: f64,
    rotation: f64,
    gravity: Vec2,
    wind: Vec2,
    animation: AnimationMode,
    rng: R,
}

impl ParticleEmitter<Pcg64> {
    /// Creates a seeded emitter with white particles of the default size,
    /// no spin and no environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `velocity_range` is negative or not finite.
    pub fn new(
        position: Vec2,
        emission_rate: u32,
        particle_lifetime: f64,
        velocity_range: f64,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(
            position,
            emission_rate,
            particle_lifetime,
            velocity_range,
            seeded_rng(seed),
        )
    }
}

impl<R: Rng> ParticleEmitter<R> {
    /// Creates an emitter that draws from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if `velocity_range` is negative or not finite.
    pub fn with_rng(
        position: Vec2,
        emission_rate: u32,
        particle_lifetime: f64,
        velocity_range: f64,
        rng: R,
    ) -> Result<Self> {
        let velocity_range = ensure_range("velocity_range", velocity_range)?;
        debug!(
            emitter.rate = emission_rate,
            emitter.lifetime = particle_lifetime,
            emitter.velocity_range = velocity_range,
            "Emitter created"
        );
        Ok(Self {
            position,
            particles: Vec::new(),
            emission_rate,
            particle_lifetime,
            velocity_range,
            particle_color: Rgba::WHITE,
            particle_size: DEFAULT_PARTICLE_SIZE,
            angular_velocity_range: 0.0,
            rotation: 0.0,
            gravity: Vec2::ZERO,
            wind: Vec2::ZERO,
            animation: AnimationMode::default(),
            rng,
        })
    }

    /// Appends exactly `emission_rate` particles at the emitter position.
    ///
    /// Velocity components and angular velocity are drawn independently
    /// and uniformly from their symmetric ranges. Returns the number of
    /// particles spawned.
    pub fn emit_particles(&mut self) -> usize {
        let count = self.emission_rate as usize;
        self.particles.reserve(count);
        for _ in 0..count {
            let velocity = Vec2::new(
                self.sample(self.velocity_range),
                self.sample(self.velocity_range),
            );
            let angular_velocity = self.sample(self.angular_velocity_range);
            let animation = match self.animation {
                AnimationMode::Fixed(kind) => kind,
                AnimationMode::Random => AnimationKind::ALL
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or_default(),
            };
            let particle = Particle::new(self.position, velocity, self.particle_lifetime)
                .with_color(self.particle_color)
                .with_size(self.particle_size)
                .with_spin(self.rotation, angular_velocity)
                .with_animation(animation);
            self.particles.push(particle);
        }
        count
    }

    /// Uniform sample from `[-range, range]`; a zero range draws nothing.
    ///
    /// Draws from the unit interval and scales, so ranges near `f64::MAX`
    /// never overflow the span.
    fn sample(&mut self, range: f64) -> f64 {
        if range > 0.0 {
            range * self.rng.random_range(-1.0..=1.0_f64)
        } else {
            0.0
        }
    }

    /// Advances the emitter by one tick.
    ///
    /// Runs, in order:
    /// 1. spawn new particles;
    /// 2. drop every dead particle;
    /// 3. advance every remaining particle, newborns included, then add
    ///    `gravity * delta_time` and `wind * delta_time` to its velocity.
    ///
    /// A particle that expires during step 3 stays in the collection until
    /// the next update. Newborns with a non-positive lifetime are dead on
    /// arrival and are dropped in the tick they spawn.
    pub fn update(&mut self, delta_time: f64) {
        let existing = self.particles.len();
        let spawned = self.emit_particles();

        self.particles.retain(Particle::is_alive);
        let culled = existing + spawned - self.particles.len();

        let gravity = self.gravity * delta_time;
        let wind = self.wind * delta_time;
        for particle in &mut self.particles {
            particle.advance(delta_time);
            particle.nudge(gravity);
            particle.nudge(wind);
        }

        trace!(
            emitter.spawned = spawned,
            emitter.culled = culled,
            emitter.live = self.particles.len(),
            "Emitter updated"
        );
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<R> ParticleEmitter<R> {
    /// Draws every particle. Particle state is not touched.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.render(surface);
        }
    }

    /// Current particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particles, e.g. for applying springs.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the spawn origin. Existing particles stay where they are.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn emission_rate(&self) -> u32 {
        self.emission_rate
    }

    pub fn set_emission_rate(&mut self, rate: u32) {
        debug!(emitter.rate = rate, "Emission rate changed");
        self.emission_rate = rate;
    }

    pub fn particle_lifetime(&self) -> f64 {
        self.particle_lifetime
    }

    /// Sets the lifetime granted to new particles.
    pub fn set_lifetime(&mut self, lifetime: f64) {
        debug!(emitter.lifetime = lifetime, "Particle lifetime changed");
        self.particle_lifetime = lifetime;
    }

    pub fn velocity_range(&self) -> f64 {
        self.velocity_range
    }

    /// # Errors
    ///
    /// Returns an error, leaving the range unchanged, if `range` is
    /// negative or not finite.
    pub fn set_velocity_range(&mut self, range: f64) -> Result<()> {
        self.velocity_range = ensure_range("velocity_range", range).inspect_err(|err| {
            debug!(error = %err, "Rejected emitter velocity range");
        })?;
        Ok(())
    }

    pub fn angular_velocity_range(&self) -> f64 {
        self.angular_velocity_range
    }

    /// # Errors
    ///
    /// Returns an error, leaving the range unchanged, if `range` is
    /// negative or not finite.
    pub fn set_angular_velocity_range(&mut self, range: f64) -> Result<()> {
        self.angular_velocity_range = ensure_range("angular_velocity_range", range)
            .inspect_err(|err| {
                debug!(error = %err, "Rejected emitter angular velocity range");
            })?;
        Ok(())
    }

    pub fn particle_color(&self) -> Rgba {
        self.particle_color
    }

    pub fn set_particle_color(&mut self, color: Rgba) {
        self.particle_color = color;
    }

    pub fn particle_size(&self) -> f64 {
        self.particle_size
    }

    /// Sets the size of new particles. Negative values are clamped to zero.
    pub fn set_particle_size(&mut self, size: f64) {
        self.particle_size = size.max(0.0);
    }

    /// Initial rotation of new particles, in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Sets gravity. Applies to every live particle from the next update.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        debug!(emitter.gravity = ?gravity, "Emitter gravity changed");
        self.gravity = gravity;
    }

    pub fn wind(&self) -> Vec2 {
        self.wind
    }

    /// Sets wind. Applies to every live particle from the next update.
    pub fn set_wind(&mut self, wind: Vec2) {
        debug!(emitter.wind = ?wind, "Emitter wind changed");
        self.wind = wind;
    }

    pub fn animation(&self) -> AnimationMode {
        self.animation
    }

    pub fn set_animation(&mut self, animation: AnimationMode) {
        debug!(emitter.animation = ?animation, "Emitter animation changed");
        self.animation = animation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AetherError;
    use crate::render::RecordingSurface;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn still_emitter(rate: u32, lifetime: f64) -> ParticleEmitter {
        ParticleEmitter::new(Vec2::ZERO, rate, lifetime, 0.0, 7).unwrap()
    }

    #[test]
    fn test_emit_appends_exact_rate() {
        let mut e = still_emitter(5, 1.0);
        assert_eq!(e.emit_particles(), 5);
        assert_eq!(e.particle_count(), 5);
        e.emit_particles();
        assert_eq!(e.particle_count(), 10);
    }

    #[test]
    fn test_emit_zero_rate_is_noop() {
        let mut e = still_emitter(0, 1.0);
        assert_eq!(e.emit_particles(), 0);
        assert_eq!(e.particle_count(), 0);
    }

    #[test]
    fn test_emit_copies_configuration() {
        let mut e = still_emitter(1, 2.5);
        e.set_position(Vec2::new(3.0, 4.0));
        e.set_particle_color(Rgba::RED);
        e.set_particle_size(8.0);
        e.set_rotation(0.75);
        e.emit_particles();

        let p = &e.particles()[0];
        assert_eq!(p.position(), Vec2::new(3.0, 4.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert!(approx_eq(p.lifetime(), 2.5));
        assert_eq!(p.color(), Rgba::RED);
        assert!(approx_eq(p.size(), 8.0));
        assert!(approx_eq(p.rotation(), 0.75));
        assert!(approx_eq(p.angular_velocity(), 0.0));
        assert_eq!(p.animation(), AnimationKind::None);
    }

    #[test]
    fn test_sampled_velocity_within_range() {
        let mut e = ParticleEmitter::new(Vec2::ZERO, 200, 1.0, 3.0, 11).unwrap();
        e.set_angular_velocity_range(0.5).unwrap();
        e.emit_particles();
        for p in e.particles() {
            assert!(p.velocity().x.abs() <= 3.0);
            assert!(p.velocity().y.abs() <= 3.0);
            assert!(p.angular_velocity().abs() <= 0.5);
        }
        // 200 draws should not all land on one side
        assert!(e.particles().iter().any(|p| p.velocity().x < 0.0));
        assert!(e.particles().iter().any(|p| p.velocity().x > 0.0));
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = ParticleEmitter::new(Vec2::ZERO, 20, 1.0, 5.0, 99).unwrap();
        let mut b = ParticleEmitter::new(Vec2::ZERO, 20, 1.0, 5.0, 99).unwrap();
        a.update(0.1);
        b.update(0.1);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_update_gravity_after_advance() {
        let mut e = still_emitter(1, 1.0);
        e.set_gravity(Vec2::new(0.0, -10.0));
        e.update(0.5);

        assert_eq!(e.particle_count(), 1);
        let p = &e.particles()[0];
        assert_eq!(p.position(), Vec2::ZERO);
        assert_eq!(p.velocity(), Vec2::new(0.0, -5.0));
        assert!(approx_eq(p.lifetime(), 0.5));
    }

    #[test]
    fn test_update_applies_wind() {
        let mut e = still_emitter(1, 10.0);
        e.set_wind(Vec2::new(2.0, 0.0));
        e.update(0.5);
        e.set_emission_rate(0);
        e.update(0.5);

        let p = &e.particles()[0];
        assert_eq!(p.velocity(), Vec2::new(2.0, 0.0));
        assert_eq!(p.position(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_expired_particle_survives_until_next_update() {
        let mut e = still_emitter(1, 0.5);
        e.update(0.5);
        assert_eq!(e.particle_count(), 1);
        assert!(!e.particles()[0].is_alive());

        e.set_emission_rate(0);
        e.update(0.5);
        assert_eq!(e.particle_count(), 0);
    }

    #[test]
    fn test_nonpositive_lifetime_culled_on_birth_tick() {
        let mut e = still_emitter(3, 0.0);
        e.update(0.1);
        assert_eq!(e.particle_count(), 0);

        e.set_lifetime(-1.0);
        e.update(0.1);
        assert_eq!(e.particle_count(), 0);
    }

    #[test]
    fn test_huge_range_samples_without_overflow() {
        let mut e = ParticleEmitter::new(Vec2::ZERO, 8, 1.0, f64::MAX, 0).unwrap();
        e.set_angular_velocity_range(f64::MAX).unwrap();
        e.update(0.0);
        assert_eq!(e.particle_count(), 8);
        for p in e.particles() {
            assert!(p.velocity().is_finite());
            assert!(p.angular_velocity().is_finite());
        }
    }

    #[test]
    fn test_negative_ranges_rejected() {
        assert_eq!(
            ParticleEmitter::new(Vec2::ZERO, 1, 1.0, -1.0, 0).unwrap_err(),
            AetherError::NegativeRange {
                name: "velocity_range",
                value: -1.0
            }
        );

        let mut e = ParticleEmitter::new(Vec2::ZERO, 1, 1.0, 2.0, 0).unwrap();
        assert!(e.set_velocity_range(-0.1).is_err());
        assert!(approx_eq(e.velocity_range(), 2.0));
        assert!(e.set_angular_velocity_range(f64::NAN).is_err());
        assert!(approx_eq(e.angular_velocity_range(), 0.0));
    }

    #[test]
    fn test_random_animation_mode_assigns_kinds() {
        let mut e = still_emitter(100, 1.0);
        e.set_animation(AnimationMode::Random);
        e.emit_particles();
        assert!(
            e.particles()
                .iter()
                .any(|p| p.animation() != AnimationKind::None)
        );
    }

    #[test]
    fn test_render_one_ellipse_per_particle() {
        let mut e = still_emitter(3, 1.0);
        e.update(0.1);
        let before = e.particles().to_vec();

        let mut surface = RecordingSurface::new();
        e.render(&mut surface);
        assert_eq!(surface.fill_count(), 3);
        assert_eq!(surface.commands().len(), 3 * 7);
        assert_eq!(e.particles(), before.as_slice());
    }

    #[test]
    fn test_clear() {
        let mut e = still_emitter(4, 1.0);
        e.update(0.1);
        e.clear();
        assert_eq!(e.particle_count(), 0);
    }
}
