//! Scale declarations and the registry that decides which scale owns an
//! aesthetic.
//!
//! A scale claims one or more aesthetics. At most one scale may claim a given
//! aesthetic: a continuous and a discrete scale on the same key always
//! conflict, and a second scale of the same type is rejected unless it (or
//! the plot) opts into [`OverridePolicy::LastWins`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{hue_palette, ColorsLike, Rgba};
use crate::error::{Error, Result};

use super::aes::Aesthetic;
use super::role::{ComponentRole, HasRole};

/// What happens when a component binds an aesthetic that is already bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Fail with [`Error::DuplicateBinding`].
    #[default]
    Error,
    /// Replace the earlier binding.
    LastWins,
}

/// Transformation applied to a continuous scale before mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// No transformation.
    #[default]
    Identity,
    /// Base-10 logarithm.
    Log10,
    /// Square root.
    Sqrt,
    /// Reverse direction.
    Reverse,
}

/// Continuous or discrete, with the type-specific settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleKind {
    /// Numeric domain.
    Continuous {
        /// Domain limits.
        limits: Option<(f32, f32)>,
        /// Transformation.
        transform: Transform,
    },
    /// Categorical domain.
    Discrete {
        /// Levels, in display order.
        limits: Option<Vec<String>>,
        /// Output values for the levels (manual scales).
        values: Option<ColorsLike>,
    },
}

/// A scale bound to one or more aesthetics.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    aesthetics: Vec<Aesthetic>,
    kind: ScaleKind,
    name: Option<String>,
    on_duplicate: Option<OverridePolicy>,
}

impl Scale {
    fn with_kind(aesthetic: impl Into<Aesthetic>, kind: ScaleKind) -> Self {
        Self { aesthetics: vec![aesthetic.into()], kind, name: None, on_duplicate: None }
    }

    /// Continuous scale.
    pub fn continuous(aesthetic: impl Into<Aesthetic>) -> Self {
        Self::with_kind(
            aesthetic,
            ScaleKind::Continuous { limits: None, transform: Transform::Identity },
        )
    }

    /// Discrete scale.
    pub fn discrete(aesthetic: impl Into<Aesthetic>) -> Self {
        Self::with_kind(aesthetic, ScaleKind::Discrete { limits: None, values: None })
    }

    /// Discrete scale with explicit output values.
    pub fn manual(aesthetic: impl Into<Aesthetic>, values: impl Into<ColorsLike>) -> Self {
        Self::with_kind(
            aesthetic,
            ScaleKind::Discrete { limits: None, values: Some(values.into()) },
        )
    }

    /// Also claim another aesthetic (e.g. `color` and `fill` together).
    #[must_use]
    pub fn and(mut self, aesthetic: impl Into<Aesthetic>) -> Self {
        let aesthetic = aesthetic.into();
        if !self.aesthetics.contains(&aesthetic) {
            self.aesthetics.push(aesthetic);
        }
        self
    }

    /// Set the title used by the scale's guide.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set continuous limits. Ignored on discrete scales.
    #[must_use]
    pub fn limits(mut self, min: f32, max: f32) -> Self {
        if let ScaleKind::Continuous { limits, .. } = &mut self.kind {
            *limits = Some((min, max));
        }
        self
    }

    /// Set discrete levels. Ignored on continuous scales.
    #[must_use]
    pub fn levels<S: Into<String>>(mut self, levels: impl IntoIterator<Item = S>) -> Self {
        if let ScaleKind::Discrete { limits, .. } = &mut self.kind {
            *limits = Some(levels.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Set the transformation. Ignored on discrete scales.
    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        if let ScaleKind::Continuous { transform: t, .. } = &mut self.kind {
            *t = transform;
        }
        self
    }

    /// Replace an earlier scale for the same aesthetic instead of failing.
    #[must_use]
    pub fn last_wins(mut self) -> Self {
        self.on_duplicate = Some(OverridePolicy::LastWins);
        self
    }

    /// Claimed aesthetics.
    #[must_use]
    pub fn aesthetics(&self) -> &[Aesthetic] {
        &self.aesthetics
    }

    /// Kind and settings.
    #[must_use]
    pub fn kind(&self) -> &ScaleKind {
        &self.kind
    }

    /// Title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this scale claims `aesthetic`.
    #[must_use]
    pub fn claims(&self, aesthetic: &Aesthetic) -> bool {
        self.aesthetics.contains(aesthetic)
    }

    /// Policy when a claimed aesthetic already has a scale; `None` defers to
    /// the plot.
    #[must_use]
    pub fn on_duplicate(&self) -> Option<OverridePolicy> {
        self.on_duplicate
    }

    /// Colors for `n` levels of a discrete scale.
    ///
    /// Explicit values are used in order, with `none` entries resolving to
    /// `None`; values beyond `n` are dropped. Without values the hue palette
    /// is used. Continuous scales yield an empty list.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientScaleValues`] if fewer than `n` values were given.
    /// - [`Error::InvalidColor`] if a value is not a color.
    pub fn palette(&self, n: usize) -> Result<Vec<Option<Rgba>>> {
        match &self.kind {
            ScaleKind::Discrete { values: Some(values), .. } => {
                if values.len() < n {
                    let aesthetic = self.aesthetics.first().map(Aesthetic::name);
                    return Err(Error::InsufficientScaleValues {
                        aesthetic: aesthetic.unwrap_or_default().to_string(),
                        needed: n,
                        given: values.len(),
                    });
                }
                let mut colors = values.to_rgba()?;
                colors.truncate(n);
                Ok(colors)
            }
            ScaleKind::Discrete { values: None, .. } => {
                Ok(hue_palette(n).into_iter().map(Some).collect())
            }
            ScaleKind::Continuous { .. } => Ok(Vec::new()),
        }
    }
}

impl HasRole for Scale {
    fn role(&self) -> ComponentRole {
        match self.kind {
            ScaleKind::Continuous { .. } => ComponentRole::ScaleContinuous,
            ScaleKind::Discrete { .. } => ComponentRole::ScaleDiscrete,
        }
    }
}

/// The scales of a plot. Answers "which scale handles aesthetic K".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scales {
    scales: Vec<Scale>,
}

impl Scales {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scale, resolving clashes with `default_policy` unless the scale
    /// carries its own. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// - [`Error::ConflictingScaleType`] if a claimed aesthetic has a scale of
    ///   the other type.
    /// - [`Error::DuplicateBinding`] if it has a scale of the same type and
    ///   the policy is [`OverridePolicy::Error`].
    pub fn insert(&mut self, scale: Scale, default_policy: OverridePolicy) -> Result<()> {
        let policy = scale.on_duplicate.unwrap_or(default_policy);
        for aesthetic in &scale.aesthetics {
            let Some(existing) = self.find(aesthetic) else { continue };
            if existing.role() != scale.role() {
                return Err(Error::ConflictingScaleType {
                    aesthetic: aesthetic.name().to_string(),
                    existing: existing.role(),
                    received: scale.role(),
                });
            }
            if policy == OverridePolicy::Error {
                return Err(Error::DuplicateBinding {
                    role: scale.role(),
                    aesthetic: aesthetic.name().to_string(),
                });
            }
        }

        for existing in &mut self.scales {
            existing.aesthetics.retain(|a| !scale.aesthetics.contains(a));
        }
        let before = self.scales.len();
        self.scales.retain(|s| !s.aesthetics.is_empty());
        if self.scales.len() < before {
            debug!(replaced = before - self.scales.len(), "scale replaced");
        }
        self.scales.push(scale);
        Ok(())
    }

    /// The scale that handles `aesthetic`.
    #[must_use]
    pub fn find(&self, aesthetic: &Aesthetic) -> Option<&Scale> {
        self.scales.iter().find(|s| s.claims(aesthetic))
    }

    /// All scales, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Scale> {
        self.scales.iter()
    }

    /// Number of scales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Whether there are no scales.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorLike;
    use crate::grammar::aes::ScaledAesthetic;

    fn colour() -> Aesthetic {
        "colour".parse().unwrap()
    }

    #[test]
    fn test_scale_roles() {
        assert_eq!(Scale::continuous(ScaledAesthetic::X).role(), ComponentRole::ScaleContinuous);
        assert_eq!(Scale::discrete(ScaledAesthetic::Shape).role(), ComponentRole::ScaleDiscrete);
        let manual = Scale::manual(ScaledAesthetic::Fill, "red");
        assert_eq!(manual.role(), ComponentRole::ScaleDiscrete);
    }

    #[test]
    fn test_colour_and_color_are_one_key() {
        let mut scales = Scales::new();
        scales.insert(Scale::discrete(colour()), OverridePolicy::Error).unwrap();
        let err = scales
            .insert(Scale::discrete(ScaledAesthetic::Color), OverridePolicy::Error)
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateBinding {
                role: ComponentRole::ScaleDiscrete,
                aesthetic: "color".into(),
            }
        );
        assert_eq!(scales.len(), 1);
    }

    #[test]
    fn test_conflicting_type_checked_before_policy() {
        let mut scales = Scales::new();
        scales.insert(Scale::discrete(ScaledAesthetic::Size), OverridePolicy::LastWins).unwrap();
        let err = scales
            .insert(Scale::continuous(ScaledAesthetic::Size).last_wins(), OverridePolicy::LastWins)
            .unwrap_err();
        assert_eq!(
            err,
            Error::ConflictingScaleType {
                aesthetic: "size".into(),
                existing: ComponentRole::ScaleDiscrete,
                received: ComponentRole::ScaleContinuous,
            }
        );
    }

    #[test]
    fn test_last_wins_replaces() {
        let mut scales = Scales::new();
        let first = Scale::continuous(ScaledAesthetic::X).limits(0.0, 1.0);
        let second = Scale::continuous(ScaledAesthetic::X).limits(0.0, 5.0).last_wins();
        scales.insert(first, OverridePolicy::Error).unwrap();
        scales.insert(second, OverridePolicy::Error).unwrap();
        assert_eq!(scales.len(), 1);
        let x = scales.find(&ScaledAesthetic::X.into()).unwrap();
        assert_eq!(
            x.kind(),
            &ScaleKind::Continuous { limits: Some((0.0, 5.0)), transform: Transform::Identity }
        );
    }

    #[test]
    fn test_plot_policy_applies_when_scale_has_none() {
        let mut scales = Scales::new();
        scales.insert(Scale::discrete(ScaledAesthetic::Shape), OverridePolicy::LastWins).unwrap();
        let named = Scale::discrete(ScaledAesthetic::Shape).name("Kind");
        scales.insert(named, OverridePolicy::LastWins).unwrap();
        assert_eq!(scales.find(&ScaledAesthetic::Shape.into()).unwrap().title(), Some("Kind"));
    }

    #[test]
    fn test_partial_replace_keeps_other_claims() {
        let mut scales = Scales::new();
        let values = vec![ColorLike::from("red"), ColorLike::from("blue")];
        let both = Scale::manual(ScaledAesthetic::Color, values).and(ScaledAesthetic::Fill);
        scales.insert(both, OverridePolicy::Error).unwrap();
        let fill = Scale::discrete(ScaledAesthetic::Fill).last_wins();
        scales.insert(fill, OverridePolicy::Error).unwrap();
        assert_eq!(scales.len(), 2);
        assert_eq!(scales.find(&ScaledAesthetic::Color.into()).unwrap().aesthetics().len(), 1);
    }

    #[test]
    fn test_failed_insert_leaves_scales_unchanged() {
        let mut scales = Scales::new();
        scales.insert(Scale::continuous(ScaledAesthetic::Y), OverridePolicy::Error).unwrap();
        let before = scales.clone();
        let clash = Scale::continuous(ScaledAesthetic::Alpha).and(ScaledAesthetic::Y);
        assert!(scales.insert(clash, OverridePolicy::Error).is_err());
        assert_eq!(scales, before);
    }

    #[test]
    fn test_palette_uses_values_then_hue() {
        let values = vec![ColorLike::from("red"), ColorLike::from("none"), ColorLike::from("blue")];
        let manual = Scale::manual(ScaledAesthetic::Fill, values);
        assert_eq!(manual.palette(2).unwrap(), vec![Some(Rgba::RED), None]);
        assert_eq!(manual.palette(3).unwrap().len(), 3);

        let auto = Scale::discrete(ScaledAesthetic::Color).palette(3).unwrap();
        assert_eq!(auto.len(), 3);
        assert!(auto.iter().all(Option::is_some));

        assert!(Scale::continuous(ScaledAesthetic::Color).palette(4).unwrap().is_empty());
    }

    #[test]
    fn test_manual_palette_needs_a_value_per_level() {
        let manual = Scale::manual(ScaledAesthetic::Fill, vec![ColorLike::from("red")]);
        assert_eq!(
            manual.palette(3).unwrap_err(),
            Error::InsufficientScaleValues { aesthetic: "fill".into(), needed: 3, given: 1 }
        );
        assert_eq!(manual.palette(1).unwrap(), vec![Some(Rgba::RED)]);
    }

    #[test]
    fn test_settings_ignored_on_other_kind() {
        let d =
            Scale::discrete(ScaledAesthetic::Shape).limits(0.0, 1.0).transform(Transform::Log10);
        assert_eq!(d.kind(), &ScaleKind::Discrete { limits: None, values: None });
        let c = Scale::continuous(ScaledAesthetic::Size).levels(["a"]);
        assert!(matches!(c.kind(), ScaleKind::Continuous { limits: None, .. }));
    }
}
