//! A collection of emitters driven as one unit.

use rand::Rng;
use rand_pcg::Pcg64;
use tracing::trace;

use crate::emitter::ParticleEmitter;
use crate::render::Surface;

/// Identifies an emitter inside a [`ParticleSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(usize);

impl EmitterId {
    /// Position of the emitter in the system's update order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns emitters and fans updates and renders out to them in insertion order.
///
/// # Example
///
/// ```rust
/// use aether::{ParticleEmitter, ParticleSystem, RecordingSurface, Vec2};
///
/// let mut system = ParticleSystem::new();
/// let sparks = system.add_emitter(ParticleEmitter::new(Vec2::ZERO, 2, 1.0, 5.0, 1).unwrap());
/// system.add_emitter(ParticleEmitter::new(Vec2::new(50.0, 0.0), 3, 1.0, 5.0, 2).unwrap());
///
/// system.advance_all(0.016);
/// assert_eq!(system.particle_count(), 5);
/// assert_eq!(system.emitter(sparks).unwrap().particle_count(), 2);
///
/// let mut surface = RecordingSurface::new();
/// system.render_all(&mut surface);
/// assert_eq!(surface.fill_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSystem<R = Pcg64> {
    emitters: Vec<ParticleEmitter<R>>,
}

impl<R> Default for ParticleSystem<R> {
    fn default() -> Self {
        Self {
            emitters: Vec::new(),
        }
    }
}

impl<R> ParticleSystem<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `emitter` and appends it to the update order.
    pub fn add_emitter(&mut self, emitter: ParticleEmitter<R>) -> EmitterId {
        self.emitters.push(emitter);
        EmitterId(self.emitters.len() - 1)
    }

    /// Renders every emitter in insertion order.
    pub fn render_all<S: Surface + ?Sized>(&self, surface: &mut S) {
        for emitter in &self.emitters {
            emitter.render(surface);
        }
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&ParticleEmitter<R>> {
        self.emitters.get(id.0)
    }

    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut ParticleEmitter<R>> {
        self.emitters.get_mut(id.0)
    }

    pub fn emitters(&self) -> &[ParticleEmitter<R>] {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut [ParticleEmitter<R>] {
        &mut self.emitters
    }

    /// Number of emitters.
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Total live particles across all emitters.
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(ParticleEmitter::particle_count).sum()
    }
}

impl<R: Rng> ParticleSystem<R> {
    /// Updates every emitter in insertion order.
    pub fn advance_all(&mut self, delta_time: f64) {
        for emitter in &mut self.emitters {
            emitter.update(delta_time);
        }
        trace!(
            system.emitters = self.emitters.len(),
            system.particles = self.particle_count(),
            "Particle system advanced"
        );
    }
}
