/// Data layer: record types, loading, and row selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, file order, read-only
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region / industry / country predicates, sort, top-N, mean
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
