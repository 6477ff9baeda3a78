//! CLI library components for the dashboard table renderer.

pub mod logging;
pub mod render;
