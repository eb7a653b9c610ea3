//! Guides: legends and colorbars bound to an aesthetic.

use super::aes::Aesthetic;
use super::role::{ComponentRole, HasRole};
use super::scale::OverridePolicy;

/// How a scale is explained to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideKind {
    /// Discrete key/label legend.
    #[default]
    Legend,
    /// Continuous color bar.
    Colorbar,
    /// Hide the guide.
    None,
}

/// A guide for one aesthetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    aesthetic: Aesthetic,
    kind: GuideKind,
    title: Option<String>,
    on_duplicate: Option<OverridePolicy>,
}

impl Guide {
    /// Create a guide of a kind for an aesthetic.
    pub fn new(aesthetic: impl Into<Aesthetic>, kind: GuideKind) -> Self {
        Self { aesthetic: aesthetic.into(), kind, title: None, on_duplicate: None }
    }

    /// Legend guide.
    pub fn legend(aesthetic: impl Into<Aesthetic>) -> Self {
        Self::new(aesthetic, GuideKind::Legend)
    }

    /// Colorbar guide.
    pub fn colorbar(aesthetic: impl Into<Aesthetic>) -> Self {
        Self::new(aesthetic, GuideKind::Colorbar)
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace an earlier guide for the same aesthetic instead of failing.
    #[must_use]
    pub fn last_wins(mut self) -> Self {
        self.on_duplicate = Some(OverridePolicy::LastWins);
        self
    }

    /// Guided aesthetic.
    #[must_use]
    pub fn aesthetic(&self) -> &Aesthetic {
        &self.aesthetic
    }

    /// Guide kind.
    #[must_use]
    pub fn kind(&self) -> GuideKind {
        self.kind
    }

    /// Title, if set.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Policy when the aesthetic already has a guide; `None` defers to the plot.
    #[must_use]
    pub fn on_duplicate(&self) -> Option<OverridePolicy> {
        self.on_duplicate
    }
}

impl HasRole for Guide {
    fn role(&self) -> ComponentRole {
        ComponentRole::Guide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::aes::ScaledAesthetic;

    #[test]
    fn test_guide_builder() {
        let g = Guide::colorbar(ScaledAesthetic::Fill).title("Mass");
        assert_eq!(g.kind(), GuideKind::Colorbar);
        assert_eq!(g.aesthetic().name(), "fill");
        assert_eq!(g.title_text(), Some("Mass"));
        assert_eq!(g.on_duplicate(), None);
        assert_eq!(g.last_wins().on_duplicate(), Some(OverridePolicy::LastWins));
    }
}
