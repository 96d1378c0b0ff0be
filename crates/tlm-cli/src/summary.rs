use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tlm_cli::types::{ConversionSummary, ConvertResult};

pub fn print_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    if result.dry_run {
        println!("Output: {} (dry run, not written)", result.output.display());
    } else {
        println!("Output: {}", result.output.display());
    }
    println!("{}", summary_table(&result.summary));
}

fn summary_table(summary: &ConversionSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Namespace"),
        header_cell("Records"),
        header_cell("Written"),
        header_cell("Empty"),
        header_cell("Renamed"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for namespace in &summary.namespaces {
        table.add_row(vec![
            Cell::new(format!("dataset_{}", namespace.index))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(namespace.records),
            Cell::new(namespace.written),
            count_cell(namespace.skipped_empty, Color::DarkYellow),
            count_cell(namespace.renamed, Color::Cyan),
            count_cell(namespace.warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total_records()).add_attribute(Attribute::Bold),
        Cell::new(summary.total_written()).add_attribute(Attribute::Bold),
        count_cell(summary.total_skipped_empty(), Color::DarkYellow)
            .add_attribute(Attribute::Bold),
        count_cell(summary.total_renamed(), Color::Cyan).add_attribute(Attribute::Bold),
        count_cell(summary.total_warnings(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
