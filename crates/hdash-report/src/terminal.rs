use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hdash_core::table::{LegendEntry, RenderedCell, RenderedTable};
use hdash_model::ColumnKind;

/// Indicator drawn in front of status cells and legend entries.
pub const STATUS_MARKER: &str = "●";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Emit ANSI styling even when stdout is not a terminal.
    pub color: bool,
    pub width: u16,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            color: false,
            width: 120,
        }
    }
}

/// Maps an accent identifier onto a terminal color.
pub fn accent_color(accent: &str) -> Option<Color> {
    let color = match accent.trim().to_ascii_lowercase().as_str() {
        "green" => Color::Green,
        "red" => Color::Red,
        "yellow" => Color::Yellow,
        "gray" | "grey" => Color::Grey,
        "white" => Color::White,
        "black" => Color::Black,
        "blue" => Color::Blue,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "orange" => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        _ => return None,
    };
    Some(color)
}

/// Title, table and legend as one printable block.
pub fn render_terminal(table: &RenderedTable, options: TerminalOptions) -> String {
    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    out.push_str(&table_view(table, options).to_string());
    out.push('\n');
    out.push_str("Legend:\n");
    out.push_str(&legend_table(&table.legend, options).to_string());
    out
}

/// The body table: one header cell per column, one row per group.
pub fn table_view(table: &RenderedTable, options: TerminalOptions) -> Table {
    let mut view = Table::new();
    apply_table_style(&mut view, options);
    view.set_header(
        table
            .columns
            .iter()
            .map(|column| header_cell(&column.label))
            .collect::<Vec<_>>(),
    );
    for (index, column) in table.columns.iter().enumerate() {
        if column.kind == ColumnKind::Status {
            align_column(&mut view, index, CellAlignment::Center);
        }
    }
    for row in &table.body {
        view.add_row(row.cells.iter().map(body_cell).collect::<Vec<_>>());
    }
    view
}

/// Every band of the table's style map, whether or not it occurs in the data.
pub fn legend_table(legend: &[LegendEntry], options: TerminalOptions) -> Table {
    let mut view = Table::new();
    apply_table_style(&mut view, options);
    view.set_header(vec![header_cell(""), header_cell("Status")]);
    for entry in legend {
        view.add_row(vec![marker_cell(&entry.accent), Cell::new(&entry.label)]);
    }
    view
}

fn body_cell(cell: &RenderedCell) -> Cell {
    match &cell.band {
        Some(band) if cell.text.is_empty() => marker_cell(&band.accent),
        Some(band) => colored(
            Cell::new(format!("{STATUS_MARKER} {}", cell.text)),
            &band.accent,
        ),
        None => Cell::new(&cell.text),
    }
}

fn marker_cell(accent: &str) -> Cell {
    colored(Cell::new(STATUS_MARKER), accent)
}

fn colored(cell: Cell, accent: &str) -> Cell {
    match accent_color(accent) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table, options: TerminalOptions) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(options.width);
    if options.color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
