use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tables_cli::pipeline::AuditSummary;
use tables_model::Check;

pub fn print_summary(summary: &AuditSummary) {
    let report = &summary.outcome.report;
    println!("Tables audited: {}", summary.record_count);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Field"),
        header_cell("Failing"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (check, failing) in report.iter() {
        table.add_row(vec![
            check_cell(check),
            Cell::new(check.field().name()),
            count_cell(failing.len()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(report.total_failures()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_violation_table(summary);

    let delivery = summary.delivery;
    if delivery.failed > 0 {
        eprintln!(
            "Notifications: {} delivered, {} failed",
            delivery.delivered, delivery.failed
        );
    } else if delivery.delivered > 0 {
        println!("Notifications: {} delivered", delivery.delivered);
    }
}

fn print_violation_table(summary: &AuditSummary) {
    let violations = &summary.outcome.violations;
    if violations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Check"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    let mut ordered: Vec<_> = violations.iter().collect();
    ordered.sort_by(|a, b| {
        a.record_id
            .cmp(&b.record_id)
            .then_with(|| a.check().cmp(&b.check()))
    });
    for violation in ordered {
        table.add_row(vec![
            Cell::new(&violation.record_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(violation.check().key()),
            Cell::new(violation.reason()),
        ]);
    }
    println!();
    println!("Violations:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn check_cell(check: Check) -> Cell {
    Cell::new(check.key()).fg(Color::Blue)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
