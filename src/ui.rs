//! Terminal output helpers.
//!
//! - `Table` - box-drawn table sized to the terminal, used for the install
//!   summary
//! - `fetch_summary` - builds that table from a [`FetchReport`]

use crate::fetch::FetchReport;
use colored::*;
use std::fmt::Write as _;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        print!("{}", self.render(term_width as usize));
    }

    /// Render to a string no wider than `max_width` where possible.
    pub fn render(&self, max_width: usize) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| visible_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(visible_width(&flatten(cell)));
            }
        }
        shrink_to_fit(&mut widths, max_width);

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {left}{}{right}\n", segments.join(mid))
        };

        let mut out = String::new();
        out.push_str(&border("┌", "┬", "┐"));
        out.push_str("  │");
        for (header, width) in self.headers.iter().zip(&widths) {
            let cell = console::truncate_str(header, *width, "...");
            let pad = width.saturating_sub(visible_width(&cell));
            let _ = write!(out, " {}{} │", cell.to_string().bold(), " ".repeat(pad));
        }
        out.push('\n');
        out.push_str(&border("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str("  │");
            for (cell, width) in row.iter().zip(&widths) {
                let flat = flatten(cell);
                let cell = console::truncate_str(&flat, *width, "...");
                let pad = width.saturating_sub(visible_width(&cell));
                let _ = write!(out, " {}{} │", cell, " ".repeat(pad));
            }
            out.push('\n');
        }
        out.push_str(&border("└", "┴", "┘"));
        out
    }
}

// Narrow the widest column one step at a time, never below 8.
fn shrink_to_fit(widths: &mut [usize], max_width: usize) {
    let overhead = 3 + 3 * widths.len();
    let available = max_width.saturating_sub(overhead);
    while widths.iter().sum::<usize>() > available {
        let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            return;
        };
        if widest <= 8 {
            return;
        }
        widths[idx] -= 1;
    }
}

fn visible_width(s: &str) -> usize {
    console::measure_text_width(s)
}

fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            _ => c,
        })
        .collect()
}

pub fn fetch_summary(report: &FetchReport) -> Table {
    let mut table = Table::new(&["Package", "Pin", "Status"]);
    for outcome in &report.outcomes {
        let pin = outcome
            .reference
            .pin
            .clone()
            .unwrap_or_else(|| "-".to_string());
        let status = match &outcome.error {
            None => "✓ fetched".green().to_string(),
            Some(e) => format!("{} {}", "x".red(), e),
        };
        table.add_row(vec![outcome.reference.path.clone(), pin, status]);
    }
    table
}
