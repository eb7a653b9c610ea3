//! Position adjustments.
//!
//! A position belongs to a layer; it cannot be added to a plot on its own.

use super::role::{ComponentRole, HasRole};

/// How overlapping objects within a layer are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// Leave positions unchanged.
    #[default]
    Identity,
    /// Place side by side.
    Dodge {
        /// Dodging width, if not the geometry's width.
        width: Option<f32>,
    },
    /// Stack on top of each other.
    Stack,
    /// Stack and normalize to unit height.
    Fill,
    /// Add random noise.
    Jitter {
        /// Horizontal jitter amount.
        width: f32,
        /// Vertical jitter amount.
        height: f32,
    },
    /// Shift by a fixed offset.
    Nudge {
        /// Horizontal offset.
        x: f32,
        /// Vertical offset.
        y: f32,
    },
}

impl Position {
    /// Dodge with the geometry's own width.
    #[must_use]
    pub fn dodge() -> Self {
        Position::Dodge { width: None }
    }

    /// Jitter with the given amounts.
    #[must_use]
    pub fn jitter(width: f32, height: f32) -> Self {
        Position::Jitter { width, height }
    }

    /// Nudge by a fixed offset.
    #[must_use]
    pub fn nudge(x: f32, y: f32) -> Self {
        Position::Nudge { x, y }
    }
}

impl HasRole for Position {
    fn role(&self) -> ComponentRole {
        ComponentRole::Position
    }
}
