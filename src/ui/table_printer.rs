use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const COLUMN_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
    left_pad: usize,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone that indents every printed line by `pad` spaces.
    pub fn with_left_pad(&self, pad: usize) -> Self {
        Self {
            left_pad: pad,
            ..self.clone()
        }
    }

    fn write_indented<W: Write + ?Sized>(&self, out: &mut W, s: &str) -> io::Result<()> {
        writeln!(out, "{}{s}", " ".repeat(self.left_pad))
    }

    fn write_separator<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> io::Result<()> {
        self.write_indented(out, &"-".repeat(width.max(1)))
    }

    /// Dashed rule, upper-cased title, dashed rule.
    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let w = width.max(self.util.visible_width(title));
        self.write_separator(out, w)?;
        self.write_indented(out, &title.to_uppercase())?;
        self.write_separator(out, w)
    }

    pub fn compute_table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        self.natural_width(&self.column_widths(headers, rows))
    }

    /// Render a titled table. An empty `rows` with `empty_message` prints the
    /// message in place of the header.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        table_name: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
        min_width: Option<usize>,
        out: &mut W,
    ) -> io::Result<()> {
        let col_widths = self.column_widths(headers, rows);
        let total_width = self.natural_width(&col_widths).max(min_width.unwrap_or(0));

        if let (true, Some(msg)) = (rows.is_empty(), empty_message) {
            let width = total_width
                .max(self.util.visible_width(table_name))
                .max(self.util.visible_width(msg));
            self.render_banner(table_name, width, out)?;
            self.write_indented(out, msg)?;
            return self.write_separator(out, width);
        }

        self.render_banner(table_name, total_width, out)?;
        if !headers.is_empty() {
            self.write_indented(out, &self.join_padded(headers, &col_widths))?;
            self.write_separator(out, total_width)?;
        }
        for row in rows {
            self.write_indented(out, &self.join_padded(row, &col_widths))?;
        }
        self.write_separator(out, total_width)
    }

    /// Titled two-column block of `label: value` lines, labels aligned.
    pub fn render_key_values<W: Write + ?Sized>(
        &self,
        title: &str,
        pairs: &[(String, String)],
        out: &mut W,
    ) -> io::Result<()> {
        let label_w = pairs
            .iter()
            .map(|(k, _)| self.util.visible_width(k))
            .max()
            .unwrap_or(0);
        let lines: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{} : {}", self.util.pad_visible(k, label_w), v))
            .collect();
        let width = lines
            .iter()
            .map(|l| self.util.visible_width(l))
            .max()
            .unwrap_or(0);

        self.render_banner(title, width, out)?;
        for line in &lines {
            self.write_indented(out, line)?;
        }
        self.write_separator(out, width.max(self.util.visible_width(title)))
    }

    fn column_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut widths: Vec<usize> = headers.iter().map(|h| self.util.visible_width(h)).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn natural_width(&self, col_widths: &[usize]) -> usize {
        if col_widths.is_empty() {
            return 0;
        }
        col_widths.iter().sum::<usize>() + (col_widths.len() - 1) * COLUMN_SEPARATOR.len()
    }

    fn join_padded<T: AsRef<str>>(&self, cells: &[T], col_widths: &[usize]) -> String {
        cells
            .iter()
            .zip(col_widths.iter())
            .map(|(cell, w)| self.util.pad_visible(cell.as_ref(), *w))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
            .trim_end()
            .to_string()
    }
}
