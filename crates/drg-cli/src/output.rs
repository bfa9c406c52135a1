//! Table and JSON rendering of query results.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use drg_ingest::CoercionWarning;
use drg_model::{
    BreakdownLevel, CaseRecord, ConsumableUsageRecord, ConsumableUsageSummary, CostBreakdown,
    DiseaseCostOverview, DiseaseSummary, QueryRows, TableKind,
};
use serde::Serialize;

/// Prints results as tables, or as pretty JSON with `--json`.
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints the rows, or the empty-result notice when there are none.
    pub fn rows<T: Serialize>(
        &self,
        result: &QueryRows<T>,
        render: impl FnOnce(&[T]) -> Table,
    ) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else if let Some(notice) = &result.notice {
            println!("{notice}");
        } else {
            println!("{}", render(&result.rows));
        }
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn value<T: Serialize>(&self, value: &T, render: impl FnOnce(&T) -> Table) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", render(value));
        }
        Ok(())
    }
}

/// Outcome of one ingestion.
#[derive(Debug, Serialize)]
pub struct IngestReport {
    pub table: TableKind,
    pub rows: usize,
    pub warnings: Vec<CoercionWarning>,
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|label| header_cell(label)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_columns(table: &mut Table, indices: &[usize], alignment: CellAlignment) {
    for index in indices {
        if let Some(column) = table.column_mut(*index) {
            column.set_cell_alignment(alignment);
        }
    }
}

pub fn amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn optional(value: Option<f64>, format: fn(f64) -> String) -> Cell {
    match value {
        Some(value) => Cell::new(format(value)),
        None => dim_cell("-"),
    }
}

fn text(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

/// Splits a yuan amount into 万 and remainder, e.g. `1万2345.60元`.
pub fn wan_yuan(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let wan = (abs / 10_000.0).floor();
    let rest = abs - wan * 10_000.0;
    if wan > 0.0 {
        format!("{sign}{wan:.0}万{rest:.2}元")
    } else {
        format!("{sign}{rest:.2}元")
    }
}

/// Loss ranking; `first_rank` is the 1-based rank of the first row.
pub fn loss_table(rows: &[DiseaseSummary], first_rank: usize) -> Table {
    let mut table = styled_table(&["Rank", "Disease", "DRG", "Cases", "Cost excess"]);
    for (idx, row) in rows.iter().enumerate() {
        let excess = Cell::new(amount(row.cost_excess)).fg(if row.cost_excess > 0.0 {
            Color::Red
        } else {
            Color::Green
        });
        table.add_row(vec![
            Cell::new(first_rank + idx),
            Cell::new(&row.name),
            Cell::new(&row.drg),
            Cell::new(count(row.case_count)),
            excess,
        ]);
    }
    align_columns(&mut table, &[0, 3, 4], CellAlignment::Right);
    table
}

pub fn search_table(rows: &[String]) -> Table {
    let mut table = styled_table(&["Disease"]);
    for name in rows {
        table.add_row(vec![Cell::new(name)]);
    }
    table
}

pub fn breakdown_table(rows: &[CostBreakdown]) -> Table {
    let label = match rows.first().map(|row| row.level) {
        Some(BreakdownLevel::TreatmentGroup) => "Treatment group",
        _ => "Department",
    };
    let total: f64 = rows.iter().map(|row| row.consumable_cost).sum();
    let mut table = styled_table(&[label, "DRG", "Cases", "Consumables", "Share", "Cost excess"]);
    for row in rows {
        let share = (total != 0.0).then(|| row.consumable_cost / total * 100.0);
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(&row.drg),
            Cell::new(count(row.case_count)),
            Cell::new(amount(row.consumable_cost)),
            optional(share, |pct| format!("{pct:.1}%")),
            Cell::new(amount(row.cost_excess)),
        ]);
    }
    align_columns(&mut table, &[2, 3, 4, 5], CellAlignment::Right);
    table
}

/// One value column per overview.
pub fn overview_table(overviews: &[DiseaseCostOverview]) -> Table {
    let mut headers = vec!["Metric"];
    headers.extend(overviews.iter().map(|o| o.name.as_str()));
    let mut table = styled_table(&headers);
    let metrics: [(&str, fn(&DiseaseCostOverview) -> Cell); 11] = [
        ("Cases", |o| Cell::new(count(o.case_count))),
        ("Average stay (days)", |o| optional(o.avg_length_of_stay, amount)),
        ("Total cost (万元)", |o| Cell::new(amount(o.total_cost))),
        ("DRG cost (万元)", |o| Cell::new(amount(o.drg_cost))),
        ("Insurance paid (万元)", |o| Cell::new(amount(o.insurance_paid_cost))),
        ("Payment rate", |o| {
            optional(o.payment_rate_pct, |pct| format!("{pct:.2}%"))
        }),
        ("Consumables per case", |o| optional(o.consumable_per_case, amount)),
        ("Reference per case", |o| {
            optional(o.consumable_reference_per_case, amount)
        }),
        ("Excess ratio", |o| optional(o.excess_ratio, amount)),
        ("Loss per case", |o| optional(o.loss_per_case, amount)),
        ("Total loss", |o| Cell::new(wan_yuan(o.cost_excess))),
    ];
    for (metric, value) in metrics {
        let mut row = vec![Cell::new(metric)];
        row.extend(overviews.iter().map(value));
        table.add_row(row);
    }
    let value_columns: Vec<usize> = (1..=overviews.len()).collect();
    align_columns(&mut table, &value_columns, CellAlignment::Right);
    table
}

/// Case list; rows that are `reference` are marked.
pub fn case_table(rows: &[CaseRecord], reference: Option<&CaseRecord>) -> Table {
    let mut table = styled_table(&[
        "",
        "Record",
        "Patient",
        "Class",
        "Stay",
        "Department",
        "Profit/loss",
        "Diagnosis",
        "Discharged",
    ]);
    for row in rows {
        let selected = reference.is_some_and(|reference| row.is_same_case(reference));
        table.add_row(vec![
            if selected {
                Cell::new("*").fg(Color::Yellow)
            } else {
                Cell::new("")
            },
            Cell::new(&row.record_number),
            Cell::new(&row.patient_name),
            Cell::new(&row.classification),
            optional(row.length_of_stay, count),
            text(row.discharge_department.as_deref()),
            optional(row.predicted_profit_loss, amount),
            Cell::new(&row.primary_diagnosis),
            text(row.discharge_date.as_deref()),
        ]);
    }
    align_columns(&mut table, &[4, 6], CellAlignment::Right);
    table
}

pub fn usage_table(rows: &[ConsumableUsageRecord]) -> Table {
    let mut table = styled_table(&["Item", "Name", "Quantity", "Amount", "Doctor", "Date"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.item_code),
            text(row.item_name.as_deref()),
            optional(row.quantity, count),
            optional(row.amount, amount),
            text(row.doctor.as_deref()),
            text(row.expense_date.as_deref()),
        ]);
    }
    align_columns(&mut table, &[2, 3], CellAlignment::Right);
    table
}

pub fn usage_summary_table(rows: &[ConsumableUsageSummary]) -> Table {
    let mut table = styled_table(&["Item", "Name", "Quantity", "Amount", "Doctor", "First used"]);
    let mut total = 0.0;
    for row in rows {
        total += row.amount;
        table.add_row(vec![
            Cell::new(&row.item_code),
            text(row.item_name.as_deref()),
            Cell::new(count(row.quantity)),
            Cell::new(amount(row.amount)),
            text(row.doctor.as_deref()),
            text(row.expense_date.as_deref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(amount(total)).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    align_columns(&mut table, &[2, 3], CellAlignment::Right);
    table
}

pub fn table_counts_table(counts: &[(TableKind, usize)]) -> Table {
    let mut table = styled_table(&["Table", "Name", "Rows"]);
    for (kind, rows) in counts {
        let rows_cell = if *rows == 0 {
            dim_cell(rows)
        } else {
            Cell::new(rows)
        };
        table.add_row(vec![
            Cell::new(kind.label()),
            dim_cell(kind.table_name()),
            rows_cell,
        ]);
    }
    align_columns(&mut table, &[2], CellAlignment::Right);
    table
}

pub fn ingest_table(report: &IngestReport) -> Table {
    let mut table = styled_table(&["Column", "Row", "Value"]);
    for warning in &report.warnings {
        table.add_row(vec![
            Cell::new(&warning.column),
            Cell::new(warning.row + 1),
            Cell::new(&warning.value).fg(Color::Yellow),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_drop_integral_fraction() {
        assert_eq!(count(15.0), "15");
        assert_eq!(count(100.0), "100");
        assert_eq!(count(2.5), "2.50");
    }

    #[test]
    fn losses_split_into_wan() {
        assert_eq!(wan_yuan(12_345.6), "1万2345.60元");
        assert_eq!(wan_yuan(-20.0), "-20.00元");
        assert_eq!(wan_yuan(30_000.0), "3万0.00元");
    }

    #[test]
    fn loss_table_numbers_ranks_from_offset() {
        let rows = vec![DiseaseSummary {
            name: "X".to_string(),
            case_count: 3.0,
            cost_excess: 100.0,
            drg: "XA1".to_string(),
        }];
        let rendered = loss_table(&rows, 16).to_string();
        assert!(rendered.contains("16"));
        assert!(rendered.contains("XA1"));
    }
}
