//! Presentation of rendered dashboard tables.
//!
//! - **terminal**: comfy-table rendering with colored status indicators and a legend
//! - **json**: machine-readable render tree

pub mod json;
pub mod terminal;

pub use json::{render_json, render_json_value};
pub use terminal::{TerminalOptions, accent_color, legend_table, render_terminal, table_view};
