//! Table engine for the health dashboard.
//!
//! This crate turns loosely-typed dashboard records into renderable tables:
//!
//! - **normalize**: label to lookup-key normalization
//! - **classify**: value classification into status bands
//! - **columns**: column discovery from record content
//! - **pivot**: group-keyed records to row × column matrix
//! - **format**: cell display formatting
//! - **table**: the configurable engine and its render tree
//! - **presets**: configurations for the dashboard's tables
//! - **ingest**: payload validation at the API boundary
//! - **navigation**: role-gated navigation tree

pub mod classify;
pub mod columns;
pub mod format;
pub mod ingest;
pub mod navigation;
pub mod normalize;
pub mod pivot;
pub mod presets;
pub mod table;

pub use classify::{classify, classify_key};
pub use columns::{derive_columns, derive_status_columns};
pub use normalize::normalize_key;
pub use pivot::pivot;
pub use presets::{TableKind, TablePreset};
pub use table::{LegendEntry, RenderedCell, RenderedRow, RenderedTable, TableBuilder, TableEngine};
