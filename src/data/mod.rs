//! Data layer: loading, normalization, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawTable (wide)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  unpivot year columns → Arc<Dataset> (long, read-only)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐     ┌───────────┐
//!   │  filter   │ ──▶ │ aggregate  │  Selection → Summary
//!   └──────────┘     └───────────┘
//!        ▲
//!        │ FilterEvent
//!   ┌──────────┐
//!   │ session   │  year → region → site reducer
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod session;
