//! End-to-end parsing scenarios

use pcp_core::report::{Diagnostic, FilterSortSummary};
use pcp_core::{CollectingReporter, NoopReporter, ScaleError, TracingReporter};
use pcp_data::rules::{Identity, KeepAll, KeepWithin, Reverse, SortByField};
use pcp_data::{DataError, Dataset};
use pcp_parse::spec::FixedIndex;
use pcp_parse::{
    parse, ColorSpec, HighlightSpec, ParseConfig, ParseError, PlotConfig, SpecKind, VariableSpec,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn designs() -> Dataset {
    Dataset::from_fields([
        ("x", vec![10.0, 20.0, 30.0, 40.0, 50.0]),
        ("y", vec![3.0, 1.0, 4.0, 1.0, 5.0]),
        ("cost", vec![5.0, 50.0, 500.0, 5000.0, 50000.0]),
    ])
    .unwrap()
}

fn config() -> ParseConfig {
    ParseConfig::new(ColorSpec::field("y", [0.0, 5.0]))
        .with_variable(VariableSpec::field("x", [0.0, 50.0]))
        .with_highlight(HighlightSpec::max_of("largest x", "x", "red"))
}

fn assert_close(actual: impl IntoIterator<Item = f64>, expected: &[f64]) {
    let actual: Vec<f64> = actual.into_iter().collect();
    assert_eq!(actual.len(), expected.len(), "{:?} != {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn test_keep_all_identity() {
    init_tracing();
    let result = parse(&designs(), &config(), &TracingReporter).unwrap();

    assert_eq!(result.n_sol(), 5);
    assert_close(result.variable.normalized_row(0).iter().copied(), &[0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(result.highlight.indices, vec![4]);
    assert_close(result.color.values.iter().copied(), &[0.6, 0.2, 0.8, 0.2, 1.0]);
}

#[test]
fn test_reverse_order_recomputes_highlights() {
    let config = config().with_sort(Reverse);
    let result = parse(&designs(), &config, &NoopReporter).unwrap();

    assert_close(result.variable.normalized_row(0).iter().copied(), &[1.0, 0.8, 0.6, 0.4, 0.2]);
    assert_eq!(result.highlight.indices, vec![0]);
    assert_close(result.color.values.iter().copied(), &[1.0, 0.2, 0.8, 0.2, 0.6]);
}

#[test]
fn test_all_blocks_share_sample_order() {
    let config = ParseConfig::new(ColorSpec::field("x", [0.0, 50.0]))
        .with_sort(SortByField::ascending("y"))
        .with_variable(VariableSpec::field("y", [0.0, 5.0]))
        .with_variable(VariableSpec::field("x", [0.0, 50.0]))
        .with_highlight(HighlightSpec::min_of("smallest y", "y", "blue"));
    let result = parse(&designs(), &config, &NoopReporter).unwrap();

    // y ascending, stable: samples 1, 3, 0, 2, 4
    assert_close(result.variable.raw_row(1).iter().copied(), &[20.0, 40.0, 10.0, 30.0, 50.0]);
    assert_close(result.color.values.iter().copied(), &[0.4, 0.8, 0.2, 0.6, 1.0]);
    assert_eq!(result.highlight.indices, vec![0]);

    for var in 0..result.variable.n_var() {
        assert_eq!(result.variable.normalized_row(var).len(), result.color.len());
    }
}

#[test]
fn test_filtering_selects_without_mutating() {
    let raw = designs();
    let config = config().with_filter(KeepWithin::new("y", 2.0, 10.0));
    let result = parse(&raw, &config, &NoopReporter).unwrap();

    assert_eq!(result.n_sol(), 3);
    assert_close(result.variable.raw_row(0).iter().copied(), &[10.0, 30.0, 50.0]);
    assert_eq!(result.highlight.indices, vec![2]);
}

#[test]
fn test_empty_filter_result() {
    let none = |d: &Dataset| -> anyhow::Result<Vec<bool>> { Ok(vec![false; d.len()]) };
    let config = ParseConfig::new(ColorSpec::field("y", [0.0, 5.0]))
        .with_filter(none)
        .with_variable(VariableSpec::field("x", [1.0, 50.0]).logarithmic().with_color("gray"));
    let result = parse(&designs(), &config, &NoopReporter).unwrap();

    assert_eq!(result.n_sol(), 0);
    assert_eq!(result.variable.n_var(), 1);
    assert!(result.color.is_empty());
    assert!(result.highlight.is_empty());
}

#[test]
fn test_highlight_on_empty_result_is_an_error() {
    let none = |d: &Dataset| -> anyhow::Result<Vec<bool>> { Ok(vec![false; d.len()]) };
    let config = config().with_filter(none);
    let err = parse(&designs(), &config, &NoopReporter).unwrap_err();
    assert!(matches!(err, ParseError::Select { ref name, .. } if name == "largest x"));
}

#[test]
fn test_logarithmic_variable() {
    let config = config().with_variable(VariableSpec::field("cost", [5.0, 50000.0]).logarithmic());
    let result = parse(&designs(), &config, &NoopReporter).unwrap();

    assert_close(result.variable.normalized_row(1).iter().copied(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn test_degenerate_range_is_reported() {
    let config = config().with_variable(VariableSpec::field("y", [5.0, 5.0]));
    let err = parse(&designs(), &config, &NoopReporter).unwrap_err();

    assert!(matches!(
        err,
        ParseError::Scale {
            kind: SpecKind::Variable,
            source: ScaleError::DegenerateRange { value },
            ..
        } if value == 5.0
    ));
}

#[test]
fn test_overflowing_variable_range_is_reported() {
    let config = config().with_variable(VariableSpec::field("x", [-1e308, 1e308]));
    let err = parse(&designs(), &config, &NoopReporter).unwrap_err();

    assert!(matches!(
        err,
        ParseError::Scale {
            kind: SpecKind::Variable,
            source: ScaleError::UnusableSpan { .. },
            ..
        }
    ));
}

#[test]
fn test_highlight_out_of_range() {
    let config = config().with_highlight(HighlightSpec::new("sixth", FixedIndex(5), "black"));
    let err = parse(&designs(), &config, &NoopReporter).unwrap_err();
    assert_eq!(err.to_string(), "highlight 'sixth': index 5 out of range for 5 samples");
}

#[test]
fn test_sort_rule_shape_error() {
    let broken = |_: &Dataset| -> anyhow::Result<Vec<usize>> { Ok(vec![0, 1, 2]) };
    let err = parse(&designs(), &config().with_sort(broken), &NoopReporter).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Data(DataError::PermutationLength { expected: 5, actual: 3 })
    ));
}

#[test]
fn test_diagnostics_in_stage_order() {
    let reporter = CollectingReporter::new();
    parse(&designs(), &config().with_filter(KeepAll).with_sort(Identity), &reporter).unwrap();

    let diagnostics = reporter.diagnostics();
    assert_eq!(diagnostics.len(), 4);
    assert_eq!(
        diagnostics[0],
        Diagnostic::FilterSort(FilterSortSummary { raw: 5, filtered: 5, sorted: 5 })
    );
    assert!(matches!(diagnostics[1], Diagnostic::Color(_)));
    assert!(matches!(diagnostics[2], Diagnostic::Highlight(_)));
    match &diagnostics[3] {
        Diagnostic::Variable(summary) => {
            assert_eq!(summary.name, "x");
            assert_eq!(summary.highlights, vec![("largest x".to_string(), 50.0)]);
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[test]
fn test_config_file_end_to_end() {
    let config = PlotConfig::from_json_str(
        r#"{
            "sort": "reverse",
            "variables": [
                {"name": "x", "range": [0, 50]},
                {"name": "cost", "range": [5, 50000], "scale": "logarithmic"}
            ],
            "color": {"name": "y", "range": [0, 2.5, 5]},
            "highlights": [{"name": "best", "selector": {"max": "x"}}]
        }"#,
    )
    .unwrap()
    .build();

    let result = parse(&designs(), &config, &NoopReporter).unwrap();
    assert_close(result.variable.normalized_row(0).iter().copied(), &[1.0, 0.8, 0.6, 0.4, 0.2]);
    assert_close(result.variable.normalized_row(1).iter().copied(), &[1.0, 0.75, 0.5, 0.25, 0.0]);
    assert_close(result.color.ticks.iter().copied(), &[0.0, 0.5, 1.0]);
    assert_eq!(result.highlight.indices, vec![0]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["highlight"]["names"][0], "best");
    assert_eq!(json["highlight"]["count"], 1);
    assert_eq!(json["variable"]["names"][1], "cost");
    assert_eq!(json["variable"]["n_var"], 2);
    assert_eq!(json["variable"]["n_sol"], 5);
}
