//! Fixed-column table rendering for the itemized transaction log.

use crate::cli::output::current_preferences;

const FALLBACK_WIDTH: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub min_width: usize,
    pub alignment: Alignment,
    /// Takes whatever terminal width the other columns leave over.
    pub flexible: bool,
}

impl TableColumn {
    pub const fn fixed(header: &'static str, min_width: usize, alignment: Alignment) -> Self {
        Self {
            header,
            min_width,
            alignment,
            flexible: false,
        }
    }

    pub const fn flexible(header: &'static str, min_width: usize) -> Self {
        Self {
            header,
            min_width,
            alignment: Alignment::Left,
            flexible: true,
        }
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub max_width: usize,
}

impl Table {
    /// Table sized to the current terminal, or 80 columns when there is none.
    pub fn for_terminal(columns: Vec<TableColumn>) -> Self {
        let max_width = crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH);
        Self {
            columns,
            rows: Vec::new(),
            max_width,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn compute_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count().max(column.min_width), usize::max)
            })
            .collect();

        let separators = self.columns.len().saturating_sub(1);
        let fixed: usize = self
            .columns
            .iter()
            .zip(&widths)
            .filter(|(column, _)| !column.flexible)
            .map(|(_, width)| *width)
            .sum();
        let budget = self.max_width.saturating_sub(fixed + separators);
        for (column, width) in self.columns.iter().zip(widths.iter_mut()) {
            if column.flexible {
                *width = (*width).min(budget.max(column.min_width));
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        let mut lines = vec![self.render_row(&header, &widths), horizontal_rule(&widths)];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }
}

fn truncate_text(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate_text(text, width);
    match alignment {
        Alignment::Left => format!("{:<width$}", fitted, width = width),
        Alignment::Right => format!("{:>width$}", fitted, width = width),
    }
}

fn horizontal_rule(widths: &[usize]) -> String {
    let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}
