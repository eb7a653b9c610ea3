//! Themes: the non-data appearance of a plot.
//!
//! Element colors are [`ColorLike`] tokens so an element can be switched off
//! with `"none"`. A plot holds one theme; adding another replaces it.

use std::str::FromStr;

use crate::color::ColorLike;
use crate::error::{Error, Result};

use super::role::{ComponentRole, HasRole};

/// Where the legend sits relative to the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    /// Right of the panels.
    #[default]
    Right,
    /// Left of the panels.
    Left,
    /// Above the panels.
    Top,
    /// Below the panels.
    Bottom,
    /// No legend.
    None,
}

/// Theme specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: &'static str,
    /// Figure background.
    pub background: ColorLike,
    /// Panel background.
    pub panel_background: ColorLike,
    /// Panel border.
    pub panel_border: ColorLike,
    /// Major grid lines.
    pub grid: ColorLike,
    /// Axis lines.
    pub axis_line: ColorLike,
    /// Text.
    pub text: ColorLike,
    /// Facet strip background.
    pub strip_background: ColorLike,
    /// Facet strip text.
    pub strip_text: ColorLike,
    /// Base font size in points.
    pub base_size: f32,
    /// Legend placement.
    pub legend_position: LegendPosition,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`].
    pub const NAMES: [&'static str; 6] = ["grey", "minimal", "bw", "classic", "dark", "void"];

    fn base(name: &'static str) -> Self {
        Self {
            name,
            background: "white".into(),
            panel_background: "white".into(),
            panel_border: ColorLike::NoColor,
            grid: "#ebebeb".into(),
            axis_line: ColorLike::NoColor,
            text: "black".into(),
            strip_background: "#d9d9d9".into(),
            strip_text: "#1a1a1a".into(),
            base_size: 11.0,
            legend_position: LegendPosition::Right,
        }
    }

    /// Grey panel with white grid lines.
    #[must_use]
    pub fn grey() -> Self {
        Self { panel_background: "#ebebeb".into(), grid: "white".into(), ..Self::base("grey") }
    }

    /// No panel background or strip fill.
    #[must_use]
    pub fn minimal() -> Self {
        Self { strip_background: ColorLike::NoColor, ..Self::base("minimal") }
    }

    /// White panel with a dark border.
    #[must_use]
    pub fn bw() -> Self {
        Self {
            panel_border: "#333333".into(),
            strip_background: "#d9d9d9".into(),
            ..Self::base("bw")
        }
    }

    /// Axis lines and no grid.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            grid: ColorLike::NoColor,
            axis_line: "black".into(),
            strip_background: "white".into(),
            ..Self::base("classic")
        }
    }

    /// Dark panel.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            panel_background: "#7f7f7f".into(),
            grid: "#424242".into(),
            strip_background: "#262626".into(),
            strip_text: "white".into(),
            ..Self::base("dark")
        }
    }

    /// Nothing but data.
    #[must_use]
    pub fn void() -> Self {
        Self {
            background: ColorLike::NoColor,
            panel_background: ColorLike::NoColor,
            grid: ColorLike::NoColor,
            strip_background: ColorLike::NoColor,
            ..Self::base("void")
        }
    }

    /// Look a preset up by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTheme`] for names outside [`Theme::NAMES`].
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "grey" | "gray" => Ok(Self::grey()),
            "minimal" => Ok(Self::minimal()),
            "bw" => Ok(Self::bw()),
            "classic" => Ok(Self::classic()),
            "dark" => Ok(Self::dark()),
            "void" => Ok(Self::void()),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }

    /// Preset this theme started from.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Set the base font size.
    #[must_use]
    pub fn base_size(mut self, size: f32) -> Self {
        self.base_size = size;
        self
    }

    /// Set the legend position.
    #[must_use]
    pub fn legend_position(mut self, position: LegendPosition) -> Self {
        self.legend_position = position;
        self
    }

    /// Set the grid color; `"none"` hides it.
    #[must_use]
    pub fn grid(mut self, color: impl Into<ColorLike>) -> Self {
        self.grid = color.into();
        self
    }

    /// Set the strip background; `"none"` hides it.
    #[must_use]
    pub fn strip_background(mut self, color: impl Into<ColorLike>) -> Self {
        self.strip_background = color.into();
        self
    }

    /// Check every element color resolves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for the first bad token.
    pub fn validate(&self) -> Result<()> {
        for color in [
            &self.background,
            &self.panel_background,
            &self.panel_border,
            &self.grid,
            &self.axis_line,
            &self.text,
            &self.strip_background,
            &self.strip_text,
        ] {
            color.to_rgba()?;
        }
        Ok(())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s)
    }
}

impl HasRole for Theme {
    fn role(&self) -> ComponentRole {
        ComponentRole::Theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_by_name_all_presets() {
        for name in Theme::NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(theme.name(), name);
            theme.validate().unwrap();
        }
        assert_eq!(Theme::by_name("gray").unwrap(), Theme::grey());
    }

    #[test]
    fn test_by_name_unknown() {
        assert_eq!(Theme::by_name("solarized"), Err(Error::UnknownTheme("solarized".into())));
        assert!("fancy".parse::<Theme>().is_err());
    }

    #[test]
    fn test_grey_panel() {
        let t = Theme::default();
        assert_eq!(t.name(), "grey");
        assert_eq!(t.panel_background.to_rgba().unwrap(), Some(Rgba::rgb(235, 235, 235)));
    }

    #[test]
    fn test_none_elements_resolve_to_no_color() {
        let t = Theme::void();
        assert_eq!(t.grid.to_rgba().unwrap(), None);
        assert_eq!(t.background.to_rgba().unwrap(), None);
        assert!(Theme::classic().grid.is_none());
    }

    #[test]
    fn test_builders() {
        let t = Theme::minimal()
            .base_size(14.0)
            .legend_position(LegendPosition::Bottom)
            .grid("None")
            .strip_background("steelblue");
        assert!((t.base_size - 14.0).abs() < f32::EPSILON);
        assert_eq!(t.legend_position, LegendPosition::Bottom);
        assert!(t.grid.is_none());
        assert!(!t.strip_background.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let t = Theme::bw().grid("not-a-color");
        assert!(matches!(t.validate(), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_theme_role() {
        assert_eq!(Theme::dark().role(), ComponentRole::Theme);
    }
}
