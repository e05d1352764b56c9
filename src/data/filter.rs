use std::cmp::Ordering;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Row predicate: which records a chart looks at
// ---------------------------------------------------------------------------

/// Conjunction of optional column constraints.
///
/// A record passes when:
/// * `region` is unset or equals the record's region
/// * `industry` is unset or equals the record's industry
/// * the record's country is not listed in `excluded_countries`
#[derive(Debug, Clone, Default)]
pub struct RowFilter<'a> {
    region: Option<&'a str>,
    industry: Option<&'a str>,
    excluded_countries: Vec<&'a str>,
}

impl<'a> RowFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: &'a str) -> Self {
        self.region = Some(region);
        self
    }

    pub fn industry(mut self, industry: &'a str) -> Self {
        self.industry = Some(industry);
        self
    }

    pub fn exclude_countries(mut self, countries: &[&'a str]) -> Self {
        self.excluded_countries.extend_from_slice(countries);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(region) = self.region {
            if record.region != region {
                return false;
            }
        }
        if let Some(industry) = self.industry {
            if record.industry != industry {
                return false;
            }
        }
        !self
            .excluded_countries
            .iter()
            .any(|c| *c == record.country)
    }

    /// Records passing the filter, in file order.
    pub fn apply<'d>(&self, dataset: &'d Dataset) -> Vec<&'d Record> {
        dataset.iter().filter(|r| self.matches(r)).collect()
    }
}

// ---------------------------------------------------------------------------
// Ordering and aggregation helpers
// ---------------------------------------------------------------------------

fn by_value(a: &Record, b: &Record) -> Ordering {
    a.value.total_cmp(&b.value)
}

/// Stable ascending sort on `value`; equal values keep file order.
pub fn sort_ascending(records: &mut [&Record]) {
    records.sort_by(|a, b| by_value(a, b));
}

/// The `n` largest records by value, largest first. Ties keep file order.
pub fn largest<'d>(mut records: Vec<&'d Record>, n: usize) -> Vec<&'d Record> {
    records.sort_by(|a, b| by_value(b, a));
    records.truncate(n);
    records
}

/// Arithmetic mean of `value`, `None` for an empty slice.
pub fn mean_value(records: &[&Record]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.value).sum();
    Some(sum / records.len() as f64)
}
