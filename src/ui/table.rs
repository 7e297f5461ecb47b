//! Fixed-width text tables.

/// Column header with its width
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

pub const fn col(title: &'static str, width: usize) -> Column {
    Column { title, width }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    pub fn render(&self) -> String {
        let total: usize = self.columns.iter().map(|c| c.width + 2).sum();
        let mut out = String::new();

        let header: Vec<&str> = self.columns.iter().map(|c| c.title).collect();
        out.push_str(&self.line(header.iter().copied()));
        out.push_str(&"-".repeat(total.saturating_sub(2)));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&self.line(row.iter().map(String::as_str)));
        }
        out
    }

    fn line<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        let mut parts = Vec::with_capacity(self.columns.len());
        for (column, cell) in self.columns.iter().zip(cells) {
            parts.push(format!("{:<width$}", truncate(cell, column.width), width = column.width));
        }
        let mut line = parts.join("  ").trim_end().to_string();
        line.push('\n');
        line
    }
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
