use hdash_core::table::RenderedTable;
use serde_json::Value;

/// Pretty-printed render tree.
pub fn render_json(table: &RenderedTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table)
}

pub fn render_json_value(table: &RenderedTable) -> serde_json::Result<Value> {
    serde_json::to_value(table)
}
