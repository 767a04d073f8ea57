use multihasher::Outcome;
use std::path::Path;

const FILENAME: &str = "Filename";
const SIZE: &str = "Size";

/// Output layout of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Columns padded with spaces.
    Aligned,
    /// Columns separated with a tab.
    Tab,
}

/// Table with one row per file: path, size, digests. A failed file has an error marker instead
/// of size and digests.
pub struct Report {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Report {
    pub fn new(algorithms: &[&str]) -> Self {
        let mut header = vec![FILENAME.to_owned(), SIZE.to_owned()];
        header.extend(algorithms.iter().map(|id| {
            let mut title = id.to_uppercase();
            if *id == "entropy" {
                title = String::from("Entropy");
            }
            title
        }));
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, path: &Path, outcome: &Outcome) {
        let mut row = vec![path.display().to_string()];
        match outcome {
            Ok(result) => {
                row.push(result.size.to_string());
                row.extend(result.digests.iter().map(|(_, digest)| digest.clone()));
            }
            Err(err) => row.push(format!("ERROR: {}", err.err)),
        }
        self.rows.push(row);
    }

    pub fn render(&self, layout: Layout) -> String {
        let lines = std::iter::once(&self.header).chain(self.rows.iter());
        match layout {
            Layout::Tab => lines
                .map(|row| row.join("\t"))
                .collect::<Vec<String>>()
                .join("\n"),
            Layout::Aligned => {
                let mut widths: Vec<usize> = vec![0; self.header.len()];
                for row in std::iter::once(&self.header).chain(self.rows.iter()) {
                    // Error marker takes the rest of the row and doesn't affect alignment
                    if row.len() < self.header.len() {
                        widths[0] = widths[0].max(row[0].chars().count());
                        continue;
                    }
                    for (n, cell) in row.iter().enumerate() {
                        widths[n] = widths[n].max(cell.chars().count());
                    }
                }
                lines
                    .map(|row| {
                        row.iter()
                            .zip(widths.iter().copied())
                            .map(|(cell, width)| format!("{cell:<width$}"))
                            .collect::<Vec<String>>()
                            .join("  ")
                            .trim_end()
                            .to_owned()
                    })
                    .collect::<Vec<String>>()
                    .join("\n")
            }
        }
    }
}
