//! Output formatting helpers for the `fm` CLI.
//!
//! Provides JSON output, aligned tables, and the row/view shapes shared by
//! the reporting commands.

use serde::Serialize;
use std::io::{self, Write};

use formulary_core::formulation::Formulation;
use formulary_engine::display::{format_money, format_quantity};
use formulary_engine::indent::IndentLine;

/// Column alignment for [`output_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A catalog listing entry for JSON output.
#[derive(Serialize)]
pub struct FormulationSummaryView<'a> {
    pub id: u32,
    pub slug: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub base_yield: f64,
    pub ingredients: usize,
}

impl<'a> FormulationSummaryView<'a> {
    pub fn from_formulation(f: &'a Formulation) -> Self {
        Self {
            id: f.id,
            slug: &f.slug,
            name: &f.name,
            category: &f.category,
            base_yield: f.base_yield,
            ingredients: f.ingredients.len(),
        }
    }
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a table with headers and rows to stdout.
///
/// Columns missing from `align` default to left alignment.
pub fn output_table(headers: &[&str], align: &[Align], rows: &[Vec<String>]) {
    let rendered = render_table(headers, align, rows);
    if rendered.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = write!(handle, "{}", rendered);
}

/// Render a table as a string. Returns an empty string when there are no rows.
pub fn render_table(headers: &[&str], align: &[Align], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths, align);

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths, align);

    for row in rows {
        push_row(&mut out, row, &widths, align);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize], align: &[Align]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        match (widths.get(i), align.get(i).copied().unwrap_or(Align::Left)) {
            (Some(&width), Align::Right) => line.push_str(&format!("{:>width$}", cell)),
            (Some(&width), Align::Left) => line.push_str(&format!("{:<width$}", cell)),
            (None, _) => line.push_str(cell),
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Truncate `s` to at most `max` characters, ending with an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = s.chars().take(max - 1).collect();
    cut.push('\u{2026}');
    cut
}

/// Format an indent line as a table row.
///
/// Columns: material, unit, quantity, rate, amount.
pub fn format_indent_row(line: &IndentLine) -> Vec<String> {
    vec![
        line.name.clone(),
        line.unit.clone(),
        format_quantity(line.total_quantity),
        format_money(line.rate),
        format_money(line.total_amount),
    ]
}

/// Format an optional price; absent prices render as `-`.
pub fn format_optional_money(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            vec!["RO Water".into(), "7.5".into()],
            vec!["Pine Oil".into(), "12.25".into()],
        ];
        let table = render_table(&["MATERIAL", "QTY"], &[Align::Left, Align::Right], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "MATERIAL    QTY");
        assert_eq!(lines[1], "--------  -----");
        assert_eq!(lines[2], "RO Water    7.5");
        assert_eq!(lines[3], "Pine Oil  12.25");
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(render_table(&["A"], &[], &[]), "");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Floor Cleaner", 20), "Floor Cleaner");
        assert_eq!(truncate("Floor Cleaner", 6), "Floor\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn indent_row_uses_display_policy() {
        let line = IndentLine {
            name: "RO Water".into(),
            unit: "L".into(),
            total_quantity: 7.5,
            rate: 0.5,
            total_amount: 3.75,
            sources: vec!["floor-cleaner".into()],
            rate_conflict: false,
        };
        assert_eq!(
            format_indent_row(&line),
            vec!["RO Water", "L", "7.5", "0.50", "3.75"]
        );
    }

    #[test]
    fn optional_money() {
        assert_eq!(format_optional_money(Some(120.0)), "120.00");
        assert_eq!(format_optional_money(None), "-");
    }
}
