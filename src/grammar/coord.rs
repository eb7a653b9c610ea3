//! Coordinate systems for Grammar of Graphics.
//!
//! Describes how `x` and `y` reach the panel. The transform math lives
//! behind the rendering boundary; a plot holds exactly one coordinate system
//! and a later one replaces an earlier one.

use super::role::{ComponentRole, HasRole};

/// Axis limits as `(min, max)`.
pub type Limits = (f32, f32);

/// Coordinate system type.
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    /// Cartesian coordinates.
    Cartesian {
        /// X axis limits.
        xlim: Option<Limits>,
        /// Y axis limits.
        ylim: Option<Limits>,
    },
    /// Cartesian with x and y swapped.
    Flip {
        /// X axis limits (before flipping).
        xlim: Option<Limits>,
        /// Y axis limits (before flipping).
        ylim: Option<Limits>,
    },
    /// Fixed aspect ratio coordinates.
    Fixed {
        /// Aspect ratio (y/x).
        ratio: f32,
    },
    /// Polar coordinates; `x` maps to angle, `y` to radius.
    Polar {
        /// Start angle in radians.
        start: f32,
        /// 1 for clockwise, -1 for counter-clockwise.
        direction: i8,
    },
}

impl Default for Coord {
    fn default() -> Self {
        Coord::cartesian()
    }
}

impl Coord {
    /// Create a Cartesian coordinate system.
    #[must_use]
    pub fn cartesian() -> Self {
        Coord::Cartesian { xlim: None, ylim: None }
    }

    /// Create a flipped Cartesian coordinate system.
    #[must_use]
    pub fn flip() -> Self {
        Coord::Flip { xlim: None, ylim: None }
    }

    /// Create a fixed aspect ratio coordinate system.
    #[must_use]
    pub fn fixed(ratio: f32) -> Self {
        Coord::Fixed { ratio }
    }

    /// Create a polar coordinate system.
    #[must_use]
    pub fn polar() -> Self {
        Coord::Polar { start: 0.0, direction: 1 }
    }

    /// Set x-axis limits. Ignored outside Cartesian systems.
    #[must_use]
    pub fn xlim(mut self, min: f32, max: f32) -> Self {
        if let Coord::Cartesian { xlim, .. } | Coord::Flip { xlim, .. } = &mut self {
            *xlim = Some((min, max));
        }
        self
    }

    /// Set y-axis limits. Ignored outside Cartesian systems.
    #[must_use]
    pub fn ylim(mut self, min: f32, max: f32) -> Self {
        if let Coord::Cartesian { ylim, .. } | Coord::Flip { ylim, .. } = &mut self {
            *ylim = Some((min, max));
        }
        self
    }

    /// Set polar start angle and direction. Ignored outside polar systems.
    #[must_use]
    pub fn polar_origin(mut self, start_angle: f32, clockwise: bool) -> Self {
        if let Coord::Polar { start, direction } = &mut self {
            *start = start_angle;
            *direction = if clockwise { 1 } else { -1 };
        }
        self
    }

    /// Whether straight lines stay straight.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        !matches!(self, Coord::Polar { .. })
    }

    /// Whether `x` is drawn vertically.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        matches!(self, Coord::Flip { .. })
    }
}

impl HasRole for Coord {
    fn role(&self) -> ComponentRole {
        ComponentRole::Coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_cartesian_limits() {
        let c = Coord::cartesian().xlim(0.0, 10.0).ylim(-5.0, 5.0);
        assert_eq!(c, Coord::Cartesian { xlim: Some((0.0, 10.0)), ylim: Some((-5.0, 5.0)) });
        assert!(c.is_linear());
        assert!(!c.is_flipped());
    }

    #[test]
    fn test_coord_flip_limits() {
        let c = Coord::flip().ylim(1.0, 2.0);
        assert!(c.is_flipped());
        assert!(matches!(c, Coord::Flip { ylim: Some((1.0, 2.0)), .. }));
    }

    #[test]
    fn test_coord_polar() {
        let c = Coord::polar().polar_origin(std::f32::consts::PI, false);
        match c {
            Coord::Polar { start, direction } => {
                assert!((start - std::f32::consts::PI).abs() < 0.001);
                assert_eq!(direction, -1);
            }
            _ => panic!("Expected Polar"),
        }
        assert!(!Coord::polar().is_linear());
    }

    #[test]
    fn test_limits_ignored_on_polar_and_fixed() {
        assert_eq!(Coord::polar().xlim(0.0, 1.0), Coord::polar());
        assert_eq!(Coord::fixed(1.0).ylim(0.0, 1.0), Coord::fixed(1.0));
        assert_eq!(Coord::fixed(1.0).polar_origin(1.0, true), Coord::fixed(1.0));
    }

    #[test]
    fn test_coord_default_and_role() {
        assert_eq!(Coord::default(), Coord::cartesian());
        assert_eq!(Coord::default().role(), ComponentRole::Coord);
    }
}
