//! Filter/sort stage: reduces and reorders the raw dataset

use pcp_core::report::{Diagnostic, FilterSortSummary, Reporter};
use tracing::{debug, warn};

use crate::rules::{FilterRule, SortRule};
use crate::{DataError, Dataset, Stage};

/// Apply `filter` then `sort` to `dataset`
///
/// The returned dataset fixes the sample order used by every later stage.
/// Its length is the number of samples kept by the filter.
pub fn filter_sort(
    dataset: &Dataset,
    filter: &dyn FilterRule,
    sort: &dyn SortRule,
    reporter: &dyn Reporter,
) -> Result<Dataset, DataError> {
    let raw = dataset.len();

    let mask = filter
        .mask(dataset)
        .map_err(|source| DataError::Rule { stage: Stage::Filter, source })?;
    let filtered = dataset.filter(&mask)?;
    debug!(raw, filtered = filtered.len(), "filter applied");

    if filtered.is_empty() && raw > 0 {
        warn!(raw, "filter rule removed every sample");
    }

    let permutation = sort
        .permutation(&filtered)
        .map_err(|source| DataError::Rule { stage: Stage::Sort, source })?;
    check_permutation(&permutation, filtered.len())?;
    let sorted = filtered.take(&permutation);

    reporter.report(&Diagnostic::FilterSort(FilterSortSummary {
        raw,
        filtered: filtered.len(),
        sorted: sorted.len(),
    }));

    Ok(sorted)
}

fn check_permutation(permutation: &[usize], len: usize) -> Result<(), DataError> {
    if permutation.len() != len {
        return Err(DataError::PermutationLength {
            expected: len,
            actual: permutation.len(),
        });
    }

    let mut seen = vec![false; len];
    for (position, &index) in permutation.iter().enumerate() {
        if index >= len {
            return Err(DataError::PermutationIndex { position, index, len });
        }
        if std::mem::replace(&mut seen[index], true) {
            return Err(DataError::PermutationDuplicate { position, index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Identity, KeepAll, KeepWithin, Reverse};
    use pcp_core::{CollectingReporter, NoopReporter};

    fn dataset() -> Dataset {
        Dataset::from_fields([
            ("x", vec![10.0, 20.0, 30.0, 40.0, 50.0]),
            ("y", vec![3.0, 1.0, 4.0, 1.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_identity_returns_filtered_dataset() {
        let result = filter_sort(&dataset(), &KeepAll, &Identity, &NoopReporter).unwrap();
        assert_eq!(result, dataset());
    }

    #[test]
    fn test_filter_then_reverse() {
        let result = filter_sort(&dataset(), &KeepWithin::new("x", 15.0, 45.0), &Reverse, &NoopReporter).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.field("x").unwrap(), &[40.0, 30.0, 20.0]);
        assert_eq!(result.field("y").unwrap(), &[1.0, 4.0, 1.0]);
    }

    #[test]
    fn test_sort_sees_filtered_dataset() {
        let sort = |d: &Dataset| -> anyhow::Result<Vec<usize>> {
            assert_eq!(d.len(), 2);
            Ok(vec![1, 0])
        };
        let filter = |d: &Dataset| -> anyhow::Result<Vec<bool>> {
            Ok(d.field("y")?.iter().map(|&v| v > 3.5).collect())
        };

        let result = filter_sort(&dataset(), &filter, &sort, &NoopReporter).unwrap();
        assert_eq!(result.field("x").unwrap(), &[50.0, 30.0]);
    }

    #[test]
    fn test_empty_filter_result() {
        let filter = |d: &Dataset| -> anyhow::Result<Vec<bool>> { Ok(vec![false; d.len()]) };
        let result = filter_sort(&dataset(), &filter, &Reverse, &NoopReporter).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.field_count(), 2);
    }

    #[test]
    fn test_reports_counts() {
        let reporter = CollectingReporter::new();
        filter_sort(&dataset(), &KeepWithin::new("y", 2.0, 10.0), &Identity, &reporter).unwrap();

        assert_eq!(
            reporter.diagnostics(),
            vec![Diagnostic::FilterSort(FilterSortSummary { raw: 5, filtered: 3, sorted: 3 })]
        );
    }

    #[test]
    fn test_shape_errors() {
        let short_mask = |_: &Dataset| -> anyhow::Result<Vec<bool>> { Ok(vec![true]) };
        let err = filter_sort(&dataset(), &short_mask, &Identity, &NoopReporter).unwrap_err();
        assert!(matches!(err, DataError::MaskLength { expected: 5, actual: 1 }));

        let short = |_: &Dataset| -> anyhow::Result<Vec<usize>> { Ok(vec![0, 1]) };
        let err = filter_sort(&dataset(), &KeepAll, &short, &NoopReporter).unwrap_err();
        assert!(matches!(err, DataError::PermutationLength { expected: 5, actual: 2 }));

        let out_of_range = |_: &Dataset| -> anyhow::Result<Vec<usize>> { Ok(vec![0, 1, 2, 3, 5]) };
        let err = filter_sort(&dataset(), &KeepAll, &out_of_range, &NoopReporter).unwrap_err();
        assert!(matches!(err, DataError::PermutationIndex { position: 4, index: 5, len: 5 }));

        let repeated = |_: &Dataset| -> anyhow::Result<Vec<usize>> { Ok(vec![0, 1, 1, 3, 4]) };
        let err = filter_sort(&dataset(), &KeepAll, &repeated, &NoopReporter).unwrap_err();
        assert!(matches!(err, DataError::PermutationDuplicate { position: 2, index: 1 }));
    }

    #[test]
    fn test_rule_errors_propagate_with_stage() {
        let failing = |_: &Dataset| -> anyhow::Result<Vec<usize>> { anyhow::bail!("no criterion") };
        let err = filter_sort(&dataset(), &KeepAll, &failing, &NoopReporter).unwrap_err();

        match err {
            DataError::Rule { stage, source } => {
                assert_eq!(stage, Stage::Sort);
                assert_eq!(source.to_string(), "no criterion");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = filter_sort(&dataset(), &KeepWithin::new("z", 0.0, 1.0), &Identity, &NoopReporter).unwrap_err();
        assert_eq!(err.to_string(), "filter rule failed: missing field 'z'");
    }
}
