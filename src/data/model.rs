use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Well-known column values
// ---------------------------------------------------------------------------

pub const REGION_US: &str = "US";
pub const REGION_GLOBAL: &str = "Global";
pub const REGION_ASIA: &str = "Asia";

/// Country value used by worldwide aggregate rows.
pub const COUNTRY_GLOBAL: &str = "Global";

/// Industry value of rows that are not broken down by industry.
pub const ALL_INDUSTRIES: &str = "All Industries";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["region", "country", "industry", "value"];

// ---------------------------------------------------------------------------
// Record – one row of the input table
// ---------------------------------------------------------------------------

/// A single growth figure for a region/country/industry combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub region: String,
    pub country: String,
    pub industry: String,
    /// Growth figure, either percentage points or percent depending on the source.
    pub value: f64,
}

impl Record {
    pub fn new(region: &str, country: &str, industry: &str, value: f64) -> Self {
        Record {
            region: region.to_string(),
            country: country.to_string(),
            industry: industry.to_string(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All records in file order. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
