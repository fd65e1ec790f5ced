//! The drawing capability the simulation renders into.
//!
//! The host supplies a [`Surface`]; emitters and bodies issue a short,
//! deterministic sequence of calls against it and never read anything
//! back. [`RecordingSurface`] captures those calls as [`DrawCommand`]s,
//! which is convenient for hosts that batch draws and for tests.

use crate::color::Rgba;
use crate::vec2::{Rect, Vec2};

/// A 2D drawing surface with a transform stack.
pub trait Surface {
    /// Pushes the current transform and fill state.
    fn save(&mut self);
    /// Pops the state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);
    /// Translates the coordinate system.
    fn translate(&mut self, offset: Vec2);
    /// Rotates the coordinate system by `radians`.
    fn rotate(&mut self, radians: f64);
    /// Sets the fill color for subsequent shapes.
    fn set_fill_color(&mut self, color: Rgba);
    /// Fills the ellipse inscribed in `rect`.
    fn fill_ellipse(&mut self, rect: Rect);
    /// Fills `rect`.
    fn fill_rect(&mut self, rect: Rect);
}

/// A single recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f64),
    SetFillColor(Rgba),
    FillEllipse(Rect),
    FillRect(Rect),
}

/// A [`Surface`] that records every call in order.
///
/// # Example
///
/// ```rust
/// use aether::{DrawCommand, RecordingSurface, RigidBody, Vec2};
///
/// let body = RigidBody::new(Vec2::new(5.0, 5.0), 1.0).unwrap();
/// let mut surface = RecordingSurface::new();
/// body.render(&mut surface);
/// assert_eq!(surface.fill_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of filled shapes (ellipses and rectangles).
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillEllipse(_) | DrawCommand::FillRect(_)))
            .count()
    }

    /// Drops every recorded command, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Takes the recorded commands, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f64) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill_ellipse(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillEllipse(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut s = RecordingSurface::new();
        s.save();
        s.translate(Vec2::new(1.0, 2.0));
        s.set_fill_color(Rgba::RED);
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        s.restore();

        assert_eq!(
            s.commands(),
            &[
                DrawCommand::Save,
                DrawCommand::Translate(Vec2::new(1.0, 2.0)),
                DrawCommand::SetFillColor(Rgba::RED),
                DrawCommand::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)),
                DrawCommand::Restore,
            ]
        );
        assert_eq!(s.fill_count(), 1);
    }

    #[test]
    fn test_take_empties() {
        let mut s = RecordingSurface::new();
        s.fill_ellipse(Rect::default());
        let taken = s.take();
        assert_eq!(taken.len(), 1);
        assert!(s.commands().is_empty());
    }
}
