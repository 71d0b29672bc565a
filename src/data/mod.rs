/// Data layer: catalog types, loading, filtering, chart series and export.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode sheets → Catalog { products, thermal }
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  type / compliance substrings → filtered products
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌─────────┐   ┌──────────┐   ┌──────────┐
///   │  group   │   │  series   │   │  export   │
///   └─────────┘   └──────────┘   └──────────┘
///   selector        scatter        CSV text
/// ```

pub mod export;
pub mod filter;
pub mod group;
pub mod loader;
pub mod model;
pub mod series;
