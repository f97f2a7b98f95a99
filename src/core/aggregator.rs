use crate::domain::model::{Dataset, YearCount};
use std::collections::BTreeMap;

pub const DEFAULT_YEAR_THRESHOLD: i32 = 2000;

/// Counts rows per year for years `>= threshold`, ascending by year.
pub fn count_by_year(dataset: &Dataset, threshold: i32) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();

    for row in dataset.rows.iter().filter(|row| row.year >= threshold) {
        *counts.entry(row.year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}
