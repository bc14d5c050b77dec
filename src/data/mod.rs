/// Data layer: dataset types, loading, and descriptive statistics.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SalaryDataset  │  Vec<SalaryRecord>, typed cells
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  describe() → per-column summaries
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod stats;
