//! Value formatting and console table rendering
//!
//! Chart annotations and console tables share one formatting policy:
//! heights and points carry two decimals, bin counts stay integers.

/// Format a measurement (height, points) with two decimals.
pub fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a bin occupancy count.
pub fn count(n: u32) -> String {
    n.to_string()
}

/// Render rows as a left-aligned console table.
///
/// Column widths follow the widest cell (header included). Returns the
/// table as one string, trailing newline included, empty rows giving a
/// header-only table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    render_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, rule.into_iter(), &widths);
    for row in rows {
        render_row(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn render_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let cells: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect();
    out.push_str(cells.join("  ").trim_end());
    out.push('\n');
}
