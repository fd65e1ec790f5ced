//! Headless fountain simulation.
//!
//! Drives a scene at a fixed 60 FPS and renders every frame into a surface
//! that only measures what it is asked to draw, the way a host renderer
//! would receive the calls.
//!
//! ## Running
//!
//! ```bash
//! cargo run --example fountain
//! cargo run --example fountain -- path/to/scene.toml
//! RUST_LOG=aether=trace cargo run --example fountain
//! ```

use aether::{ConfigError, Rect, Rgba, SceneConfig, Surface, Vec2, fps};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENE: &str = r##"
seed = 42

[[emitters]]
position = { x = 160.0, y = 240.0 }
emission_rate = 6
particle_lifetime = 2.0
velocity_range = 40.0
angular_velocity_range = 2.0
particle_color = "#66ccff"
gravity = { x = 0.0, y = 98.1 }
wind = { x = 12.0, y = 0.0 }

[[emitters]]
position = { x = 320.0, y = 120.0 }
emission_rate = 2
particle_lifetime = 3.0
velocity_range = 15.0
particle_color = "#ffaa33"
random_animation = true

[[bodies]]
position = { x = 40.0, y = 40.0 }
velocity = { x = 30.0, y = 0.0 }
mass = 2.0
friction = 0.01
drag_coefficient = 0.2
"##;

/// Counts draw calls and tracks the area they cover.
#[derive(Debug, Default)]
struct MeasuringSurface {
    offset: Vec2,
    stack: Vec<Vec2>,
    ellipses: usize,
    rects: usize,
    min: Option<Vec2>,
    max: Option<Vec2>,
}

impl MeasuringSurface {
    fn cover(&mut self, rect: Rect) {
        let lo = self.offset + rect.origin;
        let hi = lo + Vec2::new(rect.width, rect.height);
        self.min = Some(self.min.map_or(lo, |m| Vec2::new(m.x.min(lo.x), m.y.min(lo.y))));
        self.max = Some(self.max.map_or(hi, |m| Vec2::new(m.x.max(hi.x), m.y.max(hi.y))));
    }
}

impl Surface for MeasuringSurface {
    fn save(&mut self) {
        self.stack.push(self.offset);
    }

    fn restore(&mut self) {
        self.offset = self.stack.pop().unwrap_or_default();
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
    }

    // Rotation only turns circles in place; ignored for bounds.
    fn rotate(&mut self, _radians: f64) {}

    fn set_fill_color(&mut self, _color: Rgba) {}

    fn fill_ellipse(&mut self, rect: Rect) {
        self.ellipses += 1;
        self.cover(rect);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.rects += 1;
        self.cover(rect);
    }
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::from_toml(DEFAULT_SCENE)?,
    };
    let mut scene = config.build()?;

    for frame in 1..=300 {
        scene.advance(fps(60));

        let mut surface = MeasuringSurface::default();
        scene.render(&mut surface);

        if frame % 60 == 0 {
            info!(
                frame,
                particles = scene.system.particle_count(),
                ellipses = surface.ellipses,
                rects = surface.rects,
                min = ?surface.min,
                max = ?surface.max,
                "Frame rendered"
            );
        }
    }

    Ok(())
}
