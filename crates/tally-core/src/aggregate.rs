//! Aggregation engine: raw per-category totals -> chart-ready series
//!
//! Turns the data layer's `(category, total)` rows for a period into a
//! bounded, legend-friendly series: every category whose share of the
//! period total clears a percentage threshold keeps its own slice, the
//! rest are folded into a single "Miscellaneous" bucket, and an all-zero
//! period degenerates to a one-slice "No Data" placeholder so the chart
//! always has something to draw.

use serde::{Deserialize, Serialize};

use crate::categories::{label_for_key, MISC_LABEL, NO_DATA_LABEL};
use crate::error::{Error, Result};

/// Categories below or at this share (percent of the period total) are
/// merged into the Miscellaneous bucket.
pub const MIN_CATEGORY_PERCENTAGE: f64 = 2.0;

/// Placeholder slice value for an all-zero period. Small but positive:
/// a zero-sum pie cannot be drawn.
pub const NO_DATA_VALUE: f64 = 0.001;

/// One category's summed spending for an aggregation period, as produced
/// by the data layer. Duplicate categories are not pre-merged; the engine
/// processes rows as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total: f64) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}

/// One chart slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub label: String,
    pub value: f64,
}

/// Ordered chart series with structurally unique labels.
///
/// Entries keep first-seen order; adding an existing label merges into
/// that entry instead of appending. The label index makes merge-or-append
/// O(1) and makes duplicate labels impossible by construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartSeries {
    entries: Vec<SeriesEntry>,
    #[serde(skip)]
    index: std::collections::HashMap<String, usize>,
}

impl ChartSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `label`, or add it into the existing entry
    /// with that label.
    pub fn push_or_merge(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        match self.index.get(&label) {
            Some(&i) => self.entries[i].value += value,
            None => {
                self.index.insert(label.clone(), self.entries.len());
                self.entries.push(SeriesEntry { label, value });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesEntry> {
        self.entries.iter()
    }

    /// Legend labels in series order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Slice values in series order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }
}

/// Aggregate raw per-category totals into a chart series.
///
/// Rules, in order:
/// - a zero period total (including empty input) short-circuits to the
///   single `("No Data", NO_DATA_VALUE)` placeholder;
/// - a category whose share is strictly above [`MIN_CATEGORY_PERCENTAGE`]
///   keeps its own slice, labeled via the registry (raw key if unmapped),
///   in input order;
/// - everything else with a non-zero amount accumulates into one trailing
///   "Miscellaneous" slice. If an input row's own label already resolved
///   to "Miscellaneous" (the `other` key), the accumulated remainder is
///   merged into that slice instead of appended again;
/// - zero-amount minority rows are dropped.
///
/// Negative or non-finite amounts are a caller error.
pub fn aggregate(entries: &[CategoryTotal]) -> Result<ChartSeries> {
    for entry in entries {
        if !entry.total.is_finite() || entry.total < 0.0 {
            return Err(Error::InvalidData(format!(
                "bad amount {} for category {}",
                entry.total, entry.category
            )));
        }
    }

    let total: f64 = entries.iter().map(|e| e.total).sum();

    let mut series = ChartSeries::new();

    if total == 0.0 {
        series.push_or_merge(NO_DATA_LABEL, NO_DATA_VALUE);
        return Ok(series);
    }

    let mut misc_total = 0.0;

    for entry in entries {
        let share = entry.total / total * 100.0;
        if share > MIN_CATEGORY_PERCENTAGE {
            let label = label_for_key(&entry.category).unwrap_or(entry.category.as_str());
            series.push_or_merge(label.to_string(), entry.total);
        } else if entry.total != 0.0 {
            misc_total += entry.total;
        }
    }

    if misc_total != 0.0 {
        series.push_or_merge(MISC_LABEL, misc_total);
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, f64)]) -> Vec<CategoryTotal> {
        pairs
            .iter()
            .map(|(k, v)| CategoryTotal::new(*k, *v))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_data_placeholder() {
        let series = aggregate(&[]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.entries()[0].label, "No Data");
        assert_eq!(series.entries()[0].value, NO_DATA_VALUE);
    }

    #[test]
    fn test_all_zero_totals_yield_no_data_placeholder() {
        let series = aggregate(&totals(&[("food_out", 0.0), ("tech", 0.0)])).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.entries()[0].label, "No Data");
        assert_eq!(series.entries()[0].value, NO_DATA_VALUE);
    }

    #[test]
    fn test_minority_categories_fold_into_misc() {
        // total 82.0; gifts is ~1.8%, debts ~0.6% -> merged
        let series = aggregate(&totals(&[
            ("food_out", 50.0),
            ("transport", 30.0),
            ("gifts", 1.5),
            ("debts", 0.5),
        ]))
        .unwrap();

        assert_eq!(
            series.labels(),
            vec!["Fast Food", "Transport", "Miscellaneous"]
        );
        assert_eq!(series.values(), vec![50.0, 30.0, 2.0]);
    }

    #[test]
    fn test_other_category_absorbs_minority_remainder() {
        // "other" resolves to Miscellaneous and is majority; gifts (~2%)
        // must merge into it, not create a second slice
        let series = aggregate(&totals(&[("other", 50.0), ("gifts", 1.0)])).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.entries()[0].label, "Miscellaneous");
        assert_eq!(series.entries()[0].value, 51.0);
    }

    #[test]
    fn test_share_equal_to_threshold_goes_to_misc() {
        // 2.0 of 100.0 is exactly the threshold; strict > sends it to misc
        let series = aggregate(&totals(&[("housing", 98.0), ("gifts", 2.0)])).unwrap();
        let labels = series.labels();
        assert_eq!(labels, vec!["Housing", "Miscellaneous"]);
        assert_eq!(series.entries()[1].value, 2.0);
    }

    #[test]
    fn test_share_just_above_threshold_keeps_own_slice() {
        let series = aggregate(&totals(&[("housing", 97.9), ("gifts", 2.1)])).unwrap();
        assert_eq!(series.labels(), vec!["Housing", "Gifts"]);
    }

    #[test]
    fn test_zero_amount_minority_dropped() {
        let series = aggregate(&totals(&[("housing", 100.0), ("gifts", 0.0)])).unwrap();
        assert_eq!(series.labels(), vec!["Housing"]);
    }

    #[test]
    fn test_sum_preserved_and_values_non_negative() {
        let input = totals(&[
            ("food_out", 12.35),
            ("groceries", 88.2),
            ("smoking", 1.0),
            ("beauty", 0.4),
            ("transport", 41.05),
        ]);
        let input_sum: f64 = input.iter().map(|e| e.total).sum();
        let series = aggregate(&input).unwrap();

        let output_sum: f64 = series.values().iter().sum();
        assert!((input_sum - output_sum).abs() < 1e-9);
        assert!(series.values().iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_no_duplicate_labels() {
        // duplicate input categories are processed as independent rows
        // but share one slice per label
        let series = aggregate(&totals(&[
            ("food_out", 30.0),
            ("food_out", 20.0),
            ("tech", 50.0),
        ]))
        .unwrap();

        let mut labels = series.labels();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), series.len());
        assert_eq!(series.entries()[0].value, 50.0);
    }

    #[test]
    fn test_unmapped_key_falls_back_to_raw_key() {
        let series = aggregate(&totals(&[("lottery", 100.0)])).unwrap();
        assert_eq!(series.labels(), vec!["lottery"]);
    }

    #[test]
    fn test_input_order_preserved() {
        let series = aggregate(&totals(&[
            ("tech", 25.0),
            ("food_out", 40.0),
            ("housing", 35.0),
        ]))
        .unwrap();
        assert_eq!(series.labels(), vec!["Electronics", "Fast Food", "Housing"]);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let err = aggregate(&totals(&[("food_out", -5.0)])).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidData(_)));
    }

    #[test]
    fn test_nan_amount_is_rejected() {
        let err = aggregate(&totals(&[("food_out", f64::NAN)])).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidData(_)));
    }
}
