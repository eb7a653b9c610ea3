//! Watermark images drawn over the finished figure.

use std::path::{Path, PathBuf};

use super::role::{ComponentRole, HasRole};

/// An image overlaid on the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    source: PathBuf,
    xo: i32,
    yo: i32,
    alpha: Option<f32>,
    zorder: i32,
}

impl Watermark {
    /// Watermark from an image path, at the figure origin.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self { source: source.into(), xo: 0, yo: 0, alpha: None, zorder: 99 }
    }

    /// Offset in pixels from the bottom-left corner.
    #[must_use]
    pub fn offset(mut self, xo: i32, yo: i32) -> Self {
        self.xo = xo;
        self.yo = yo;
        self
    }

    /// Opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha.clamp(0.0, 1.0));
        self
    }

    /// Stacking order.
    #[must_use]
    pub fn zorder(mut self, zorder: i32) -> Self {
        self.zorder = zorder;
        self
    }

    /// Image path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Pixel offset.
    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.xo, self.yo)
    }

    /// Opacity, if set.
    #[must_use]
    pub fn opacity(&self) -> Option<f32> {
        self.alpha
    }

    /// Stacking order.
    #[must_use]
    pub fn z(&self) -> i32 {
        self.zorder
    }
}

impl HasRole for Watermark {
    fn role(&self) -> ComponentRole {
        ComponentRole::Watermark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watermark_builder() {
        let w = Watermark::new("logo.png").offset(10, 20).alpha(1.5).zorder(3);
        assert_eq!(w.source(), Path::new("logo.png"));
        assert_eq!(w.position(), (10, 20));
        assert_eq!(w.opacity(), Some(1.0));
        assert_eq!(w.z(), 3);
        assert_eq!(w.role(), ComponentRole::Watermark);
    }
}
