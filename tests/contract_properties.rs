//! Contract properties of the plot grammar, checked end to end through the
//! public API.
//!
//! Run: cargo test --test contract_properties

#![allow(clippy::unwrap_used)]

use ggrammar::color::{ColorLike, ColorsLike};
use ggrammar::grammar::{
    normalize, AesValue, Aesthetic, AestheticMapping, Column, ComponentRole, DataShape, DataSource,
    DataValue, Facet, Geom, LabelError, LabelOptions, LabelStrategy, LabellerSpec, Plot, Scale,
    ScaledAesthetic, StripDimension, StripLabelDetails, TabularData,
};
use ggrammar::Error;
use proptest::prelude::*;

fn table(x: &[f32], labels: &[String]) -> TabularData {
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let mut df = TabularData::new();
    df.add_column_f32("x", x).unwrap();
    df.add_column_str("label", &refs).unwrap();
    df
}

fn details(variable: &str, value: &str) -> StripLabelDetails {
    StripLabelDetails::new(StripDimension::Wrap).with_variable(variable, value)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Normalizing a table returns an equal table.
    #[test]
    fn prop_normalize_is_identity_on_tables(
        rows in prop::collection::vec((-1.0e6f32..1.0e6, "[a-z]{0,8}"), 0..64)
    ) {
        let (x, labels): (Vec<f32>, Vec<String>) = rows.into_iter().unzip();
        let t = table(&x, &labels);

        prop_assert_eq!(normalize(&t, None).unwrap(), t.clone());
        prop_assert_eq!(normalize(&DataSource::from(t.clone()), None).unwrap(), t);
    }

    /// A producer returning a single value never yields a table.
    #[test]
    fn prop_non_tabular_producer_is_rejected(value in -1.0e6f32..1.0e6, text in "[a-z]{1,12}") {
        let number = DataSource::producer(move || DataShape::Value(DataValue::Number(value)));
        prop_assert!(matches!(normalize(&number, None), Err(Error::InvalidDataShape { .. })), "expected InvalidDataShape for numeric producer");

        let word = DataSource::producer(move || DataShape::Value(DataValue::Text(text.clone())));
        prop_assert!(matches!(normalize(&word, None), Err(Error::InvalidDataShape { .. })), "expected InvalidDataShape for text producer");
    }

    /// Columns of unequal length never form a table.
    #[test]
    fn prop_ragged_columns_are_rejected(a in 0usize..32, b in 0usize..32) {
        prop_assume!(a != b);
        let columns =
            vec![Column::from_f32("a", &vec![0.0; a]), Column::from_f32("b", &vec![1.0; b])];
        let source = DataSource::producer(move || columns.clone());
        prop_assert!(matches!(normalize(&source, None), Err(Error::InvalidDataShape { .. })), "expected InvalidDataShape for ragged columns");
    }

    /// `label_value` keeps the value; `label_both` prefixes the variable.
    #[test]
    fn prop_builtin_strategies(variable in "[a-z_]{1,10}", value in "[A-Za-z0-9 ]{0,16}") {
        let options = LabelOptions::default();
        let by_value = LabellerSpec::from("label_value").resolve(&options).unwrap();
        let by_both = LabellerSpec::from("label_both").resolve(&options).unwrap();

        prop_assert_eq!(by_value.text(details(&variable, &value)).unwrap(), value.clone());
        let both = by_both.text(details(&variable, &value)).unwrap();
        prop_assert_eq!(both, format!("{variable}: {value}"));
    }

    /// Dictionary misses fall back to the value.
    #[test]
    fn prop_dict_miss_keeps_value(value in "[A-Za-z]{1,12}") {
        let spec = LabellerSpec::dict([("species", "Species")]);
        let labeller = spec.resolve(&LabelOptions::default()).unwrap();
        prop_assert_eq!(labeller.text(details("island", &value)).unwrap(), value);
    }

    /// Explicit "none" survives serialization and never becomes a palette color.
    #[test]
    fn prop_none_round_trips(n in 1usize..8) {
        let colors = ColorsLike::from(vec![ColorLike::from("none"); n]);
        let json = serde_json::to_string(&colors).unwrap();
        let back: ColorsLike = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(&back, &colors);
        prop_assert!(back.as_slice().iter().all(ColorLike::is_none));
        prop_assert!(back.to_rgba().unwrap().iter().all(Option::is_none));
    }
}

#[test]
fn colour_and_color_scales_collide() {
    let colour: Aesthetic = "colour".parse().unwrap();
    let plot = Plot::new().with(Scale::discrete(colour)).unwrap();
    let err = plot.with(Scale::discrete(ScaledAesthetic::Color)).unwrap_err();

    assert_eq!(
        err,
        Error::DuplicateBinding { role: ComponentRole::ScaleDiscrete, aesthetic: "color".into() }
    );
}

#[test]
fn colour_and_color_mapping_share_a_key() {
    let mapping =
        AestheticMapping::new().map("colour", "species").unwrap().map("color", "island").unwrap();
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.column_for(ScaledAesthetic::Color), Some("island"));
}

#[test]
fn discrete_then_continuous_size_conflicts() {
    let plot = Plot::new().with(Scale::discrete(ScaledAesthetic::Size)).unwrap();
    let err = plot.with(Scale::continuous(ScaledAesthetic::Size)).unwrap_err();

    assert!(
        matches!(err, Error::ConflictingScaleType { ref aesthetic, .. } if aesthetic == "size")
    );
}

#[test]
fn two_continuous_size_scales_follow_the_scale_policy() {
    let plot = Plot::new().with(Scale::continuous(ScaledAesthetic::Size)).unwrap();

    assert!(plot.with(Scale::continuous(ScaledAesthetic::Size)).is_err());
    let wider = Scale::continuous(ScaledAesthetic::Size).limits(1.0, 6.0).last_wins();
    let replaced = plot.with(wider).unwrap();
    assert_eq!(replaced.scales().len(), 1);
}

#[test]
fn none_color_differs_from_omitted_color() {
    let explicit = AestheticMapping::new().color_value("none");
    let omitted = AestheticMapping::new();

    let bound = explicit.get(ScaledAesthetic::Color);
    assert!(matches!(bound, Some(AesValue::Color(c)) if c.as_slice()[0].is_none()));
    assert!(omitted.get(ScaledAesthetic::Color).is_none());
    assert_ne!(explicit, omitted);
}

#[test]
fn unknown_aesthetic_is_rejected() {
    let err = AestheticMapping::new().map("glow", "x").unwrap_err();
    assert_eq!(err, Error::UnknownAesthetic("glow".into()));
}

#[test]
fn unknown_labeller_name_is_rejected() {
    let err = LabellerSpec::from("label_everything").resolve(&LabelOptions::default()).unwrap_err();
    assert_eq!(err, Error::UnknownLabeller("label_everything".into()));
}

#[test]
fn labelling_function_error_names_the_variable() {
    let spec = LabellerSpec::function(|_| Err("no labels today".to_string()));
    let mut df = TabularData::new();
    df.add_column_str("species", &["setosa"]).unwrap();

    let err = Plot::new()
        .data(df)
        .with(Facet::wrap("species", 1).labeller(spec))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::LabellingFunction { ref variable, .. } if variable == "species"));
}

#[test]
fn labelling_function_error_names_the_failing_variable() {
    let spec = LabellerSpec::function(|d| match d.get("island") {
        Some(_) => Err(LabelError::for_variable("island", "island unsupported")),
        None => Ok(d),
    });
    let mut df = TabularData::new();
    df.add_column_str("species", &["setosa"]).unwrap();
    df.add_column_str("island", &["Dream"]).unwrap();

    let err = Plot::new()
        .data(df)
        .with(Facet::wrap_vars(&["species", "island"]).labeller(spec))
        .unwrap()
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::LabellingFunction { variable: "island".into(), message: "island unsupported".into() }
    );
}

#[test]
fn facet_variable_missing_from_all_data_is_rejected() {
    let mut df = TabularData::new();
    df.add_column_str("species", &["a", "b"]).unwrap();
    let plot = Plot::new().data(df).with(Geom::point()).unwrap();

    for facet in [Facet::wrap("year", 2), Facet::wrap_vars(&["species", "year"])] {
        let err = plot.with(facet).unwrap().build().unwrap_err();
        assert_eq!(err, Error::MissingFacetVariable { variable: "year".into() });
    }
}

#[test]
fn nan_facet_values_form_one_panel() {
    let mut df = TabularData::new();
    df.add_column_f32("year", &[f32::NAN, f32::NAN, f32::NAN]).unwrap();

    let built = Plot::new().data(df).with(Facet::wrap("year", 1)).unwrap().build().unwrap();
    assert_eq!(built.strips().len(), 1);
}

#[test]
fn single_line_strips_join_variables() {
    let mut df = TabularData::new();
    df.add_column_str("species", &["setosa", "virginica"]).unwrap();
    df.add_column_str("site", &["north", "south"]).unwrap();

    let built = Plot::new()
        .data(df)
        .with(
            Facet::wrap_vars(&["species", "site"]).labeller(LabelStrategy::Both).multi_line(false),
        )
        .unwrap()
        .build()
        .unwrap();
    let texts: Vec<String> = built.strips().iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec!["species: setosa, site: north", "species: virginica, site: south"]);
}

#[test]
fn failed_combine_keeps_previous_plot() {
    let plot = Plot::new().data_xy(&[1.0, 2.0], &[3.0, 4.0]).with(Geom::point()).unwrap();
    let before = plot.layers().len();

    assert!(plot.with(ggrammar::grammar::Position::Stack).is_err());
    assert_eq!(plot.layers().len(), before);
    assert_eq!(plot.build().unwrap().layers().len(), 1);
}
