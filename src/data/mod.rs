/// Data layer: core types, loading, filtering and statistics.
///
/// Architecture:
/// ```text
///   VNL2023.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV once per process → Arc<Dataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  positions + age range → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  counts, means, correlations, top-N, country summary
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
