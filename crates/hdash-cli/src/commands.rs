use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use hdash_cli::render::{load_config, merge_title, render_file};
use hdash_core::navigation::{active_entry, default_navigation, filter_for_role};
use hdash_core::presets::TableKind;
use hdash_model::NavItem;
use hdash_report::{TerminalOptions, render_json, render_terminal};

use crate::cli::{NavArgs, OutputFormatArg, PresetArg, RenderArgs};

pub fn run_render(args: &RenderArgs, color: bool) -> Result<()> {
    let kind = table_kind(args.preset);
    let config = args.config.as_deref().map(load_config).transpose()?;
    let config = merge_title(config, args.title.clone());
    let table = render_file(kind, &args.input, config.as_ref())?;
    match args.format {
        OutputFormatArg::Table => {
            let options = TerminalOptions {
                color,
                width: args.width,
            };
            println!("{}", render_terminal(&table, options));
        }
        OutputFormatArg::Json => {
            println!("{}", render_json(&table).context("serialize table")?);
        }
    }
    Ok(())
}

pub fn run_presets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Preset", "Payload", "Description"]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        let preset = kind.preset();
        table.add_row(vec![kind.name(), preset.layout.shape(), kind.description()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_nav(args: &NavArgs) -> Result<()> {
    let navigation = default_navigation();
    let visible = filter_for_role(&navigation, args.role.as_deref());
    info!(role = ?args.role, entries = visible.len(), "navigation filtered");
    if visible.is_empty() {
        println!("No navigation entries for this role.");
        return Ok(());
    }
    let active = active_entry(&visible, &args.path);
    let mut table = Table::new();
    table.set_header(vec!["", "Entry", "Link"]);
    apply_table_style(&mut table);
    for item in &visible {
        add_nav_rows(&mut table, item, 0, active);
    }
    println!("{table}");
    Ok(())
}

fn add_nav_rows(table: &mut Table, item: &NavItem, depth: usize, active: Option<&NavItem>) {
    let marker = if active.is_some_and(|active| std::ptr::eq(active, item)) {
        "*"
    } else {
        ""
    };
    table.add_row(vec![
        marker.to_string(),
        format!("{}{}", "  ".repeat(depth), item.label),
        item.href.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    for child in &item.children {
        add_nav_rows(table, child, depth + 1, active);
    }
}

fn table_kind(preset: PresetArg) -> TableKind {
    match preset {
        PresetArg::NationalScorecard => TableKind::NationalScorecard,
        PresetArg::Scorecard => TableKind::Scorecard,
        PresetArg::LgaSummary => TableKind::LgaSummary,
        PresetArg::PopulationSummary => TableKind::PopulationSummary,
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
