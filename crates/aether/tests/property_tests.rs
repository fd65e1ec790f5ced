#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]

use aether::{Particle, ParticleEmitter, RigidBody, Spring, Vec2, fps};
use proptest::prelude::*;

fn vec2(range: core::ops::Range<f64>) -> impl Strategy<Value = Vec2> {
    (range.clone(), range).prop_map(|(x, y)| Vec2::new(x, y))
}

// =============================================================================
// Particle integration
// =============================================================================

proptest! {
    #[test]
    fn particle_advance_zero_is_identity(
        position in vec2(-1e4..1e4),
        velocity in vec2(-1e3..1e3),
        lifetime in -10.0f64..10.0,
        rotation in -10.0f64..10.0,
        angular_velocity in -10.0f64..10.0,
        size in 0.0f64..50.0,
    ) {
        let p = Particle::new(position, velocity, lifetime)
            .with_spin(rotation, angular_velocity)
            .with_size(size);
        let mut q = p.clone();
        q.advance(0.0);
        prop_assert_eq!(p, q);
    }

    #[test]
    fn particle_dies_after_lifetime(
        lifetime in 0.001f64..100.0,
        epsilon in 0.001f64..10.0,
    ) {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, lifetime);
        prop_assert!(p.is_alive());
        p.advance(lifetime + epsilon);
        prop_assert!(!p.is_alive(), "lifetime left: {}", p.lifetime());
    }

    #[test]
    fn particle_position_is_linear_in_time(
        velocity in vec2(-100.0..100.0),
        dt in 0.0f64..1.0,
    ) {
        let mut p = Particle::new(Vec2::ZERO, velocity, 10.0);
        p.advance(dt);
        prop_assert!((p.position().x - velocity.x * dt).abs() < 1e-9);
        prop_assert!((p.position().y - velocity.y * dt).abs() < 1e-9);
    }
}

// =============================================================================
// Emitter lifecycle
// =============================================================================

proptest! {
    #[test]
    fn zero_rate_emitter_never_grows(
        ticks in 1usize..200,
        dt in 0.0f64..0.5,
        seed in any::<u64>(),
    ) {
        let mut e = ParticleEmitter::new(Vec2::ZERO, 0, 1.0, 10.0, seed).unwrap();
        for _ in 0..ticks {
            e.update(dt);
            prop_assert_eq!(e.particle_count(), 0);
        }
    }

    #[test]
    fn emitter_steady_state_is_rate_times_k(
        rate in 1u32..10,
        k in 1u32..8,
        fps_pow in 1u32..6,
    ) {
        // Power-of-two steps keep lifetime countdown exact.
        let dt = 1.0 / f64::from(1u32 << fps_pow);
        let lifetime = f64::from(k) * dt;
        let mut e = ParticleEmitter::new(Vec2::ZERO, rate, lifetime, 1.0, 5).unwrap();

        for _ in 0..k + 5 {
            e.update(dt);
        }
        let expected = (rate * k) as usize;
        for _ in 0..20 {
            e.update(dt);
            prop_assert_eq!(e.particle_count(), expected);
        }
    }

    #[test]
    fn emitter_never_keeps_particles_dead_before_update(
        rate in 0u32..5,
        lifetime in 0.01f64..1.0,
        steps in proptest::collection::vec(0.0f64..0.3, 1..50),
    ) {
        let mut e = ParticleEmitter::new(Vec2::ZERO, rate, lifetime, 2.0, 17).unwrap();
        for dt in steps {
            let dead_before = e.particles().iter().filter(|p| !p.is_alive()).count();
            let total_before = e.particle_count();
            e.update(dt);
            // Everything dead before the tick is gone; survivors and newborns remain.
            prop_assert_eq!(e.particle_count(), total_before - dead_before + rate as usize);
        }
    }

    #[test]
    fn nonpositive_lifetime_emitter_stays_empty(
        rate in 0u32..16,
        lifetime in -10.0f64..=0.0,
        steps in proptest::collection::vec(0.0f64..0.3, 1..20),
    ) {
        let mut e = ParticleEmitter::new(Vec2::ZERO, rate, lifetime, 2.0, 3).unwrap();
        for dt in steps {
            e.update(dt);
            prop_assert_eq!(e.particle_count(), 0);
        }
    }

    #[test]
    fn emitted_velocities_within_range(
        range in 0.0f64..100.0,
        angular in 0.0f64..10.0,
        seed in any::<u64>(),
    ) {
        let mut e = ParticleEmitter::new(Vec2::ZERO, 32, 1.0, range, seed).unwrap();
        e.set_angular_velocity_range(angular).unwrap();
        e.emit_particles();
        for p in e.particles() {
            prop_assert!(p.velocity().x.abs() <= range);
            prop_assert!(p.velocity().y.abs() <= range);
            prop_assert!(p.angular_velocity().abs() <= angular);
        }
    }
}

// =============================================================================
// Rigid body integration
// =============================================================================

proptest! {
    #[test]
    fn rigid_body_matches_closed_form_velocity(
        mass in 0.1f64..100.0,
        force in vec2(-100.0..100.0),
        v0 in vec2(-10.0..10.0),
        frames in 1u32..240,
    ) {
        let dt = fps(60);
        let mut body = RigidBody::new(Vec2::ZERO, mass).unwrap().with_velocity(v0);
        for _ in 0..frames {
            body.apply_force(force);
            body.advance(dt);
        }

        let t = f64::from(frames) * dt;
        let expected = v0 + force / mass * t;
        let tolerance = 1e-9 * (1.0 + expected.length());
        prop_assert!((body.velocity().x - expected.x).abs() < tolerance);
        prop_assert!((body.velocity().y - expected.y).abs() < tolerance);
    }

    #[test]
    fn rigid_body_never_accepts_nonpositive_mass(mass in -1e6f64..=0.0) {
        prop_assert!(RigidBody::new(Vec2::ZERO, mass).is_err());
    }

    #[test]
    fn friction_and_drag_never_speed_up(
        friction in 0.0f64..0.99,
        drag in 0.0f64..5.0,
        v0 in vec2(-100.0..100.0),
        dt in 0.0f64..0.1,
    ) {
        let mut body = RigidBody::new(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(v0)
            .with_friction(friction)
            .unwrap()
            .with_drag(drag)
            .unwrap();
        body.advance(dt);
        prop_assert!(body.velocity().length() <= v0.length() + 1e-12);
    }
}

// =============================================================================
// Spring
// =============================================================================

proptest! {
    #[test]
    fn spring_at_rest_length_without_damping_is_zero(
        angle in 0.0f64..core::f64::consts::TAU,
        rest in 0.1f64..100.0,
        stiffness in 0.0f64..100.0,
        velocity in vec2(-10.0..10.0),
    ) {
        let end = Vec2::new(5.0, -3.0);
        let position = end - Vec2::new(angle.cos(), angle.sin()) * rest;
        let spring = Spring::new(Vec2::ZERO, end, stiffness, 0.0)
            .unwrap()
            .with_rest_length(rest)
            .unwrap();
        let force = spring.force_at(position, velocity);
        let tolerance = 1e-9 * (1.0 + stiffness * rest);
        prop_assert!(force.length() < tolerance, "force = {:?}", force);
    }

    #[test]
    fn spring_force_always_finite(
        position in vec2(-1e200..1e200),
        end in vec2(-1e200..1e200),
        velocity in vec2(-1e3..1e3),
        stiffness in 0.0f64..100.0,
        damping in 0.0f64..100.0,
    ) {
        let spring = Spring::new(Vec2::ZERO, end, stiffness, damping).unwrap();
        prop_assert!(spring.force_at(position, velocity).is_finite());
        prop_assert!(spring.force_at(end, velocity).is_finite());
    }
}
