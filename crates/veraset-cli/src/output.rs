// Output formatting and styling

use colored::Colorize;
use veraset_domain::{DegreeEligibility, ResultRow};

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }
}

impl OutputStyle {
    /// Plain output, used when writing to files and in tests
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format header
    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format a key-value pair
    pub fn key_value(&self, key: &str, value: &str) -> String {
        if self.use_colors {
            format!("  {}: {}", key.bold(), value)
        } else {
            format!("  {}: {}", key, value)
        }
    }

    /// One line per relative category: ✓ open, ✗ closed
    pub fn eligibility(&self, eligibility: &DegreeEligibility) -> String {
        let categories = [
            ("Spouse", eligibility.spouse_eligible),
            ("Children and descendants", eligibility.first_degree_eligible),
            ("Parents and siblings", eligibility.second_degree_eligible),
            ("Grandparents, uncles and aunts", eligibility.third_degree_eligible),
        ];
        let mut lines = vec![self.header("Relatives that may still be recorded")];
        for (label, open) in categories {
            lines.push(if open {
                self.success(label)
            } else {
                self.error(label)
            });
        }
        if let Some(degree) = eligibility.active_degree() {
            let degree = degree.to_string().to_lowercase();
            lines.push(self.info(&format!("Heirs are resolved in the {}", degree)));
        }
        lines.join("\n")
    }

    /// Result table: one row per person, heirs highlighted
    pub fn result_table(&self, rows: &[ResultRow], total_distributed: f64) -> String {
        let headings = ["Name", "Relation", "Share", "%"];
        let cells: Vec<[String; 4]> = rows
            .iter()
            .map(|row| {
                let name = if row.is_alive {
                    row.display_name.clone()
                } else {
                    format!("{} (deceased)", row.display_name)
                };
                [
                    name,
                    row.relation_label.to_string(),
                    row.display_share(),
                    row.display_percentage(),
                ]
            })
            .collect();

        let mut widths = headings.map(|heading| heading.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let pad = |text: &str, width: usize| {
            let fill = width.saturating_sub(text.chars().count());
            format!("{}{}", text, " ".repeat(fill))
        };

        let mut lines = Vec::with_capacity(cells.len() + 3);
        let heading_line = headings
            .iter()
            .zip(widths.iter())
            .map(|(heading, width)| pad(heading, *width))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(self.header(heading_line.trim_end()));
        lines.push("─".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

        for (row, cell) in rows.iter().zip(cells.iter()) {
            let line = cell
                .iter()
                .zip(widths.iter())
                .map(|(text, width)| pad(text, *width))
                .collect::<Vec<_>>()
                .join("  ");
            let line = line.trim_end().to_string();
            lines.push(if !self.use_colors {
                line
            } else if row.has_share() {
                line.green().to_string()
            } else {
                line.dimmed().to_string()
            });
        }

        lines.push(self.key_value("Total distributed", &format!("{:.2}", total_distributed)));
        lines.join("\n")
    }
}

/// Print an error message to stderr
pub fn print_error(msg: &str) {
    let style = OutputStyle::default();
    eprintln!("{}", style.error(msg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use veraset_domain::{PersonId, RelationLabel};

    fn row(name: &str, label: RelationLabel, share: f64, percentage: Option<f64>) -> ResultRow {
        ResultRow {
            id: PersonId::from(name),
            display_name: name.to_string(),
            relation_label: label,
            is_alive: share > 0.0,
            share,
            share_percentage: percentage,
        }
    }

    fn char_column(line: &str, needle: &str) -> Option<usize> {
        line.find(needle).map(|byte| line[..byte].chars().count())
    }

    #[test]
    fn test_plain_markers() {
        let style = OutputStyle::plain();
        assert_eq!(style.success("ok"), "✓ ok");
        assert_eq!(style.error("no"), "✗ no");
        assert_eq!(style.info("hi"), "ℹ hi");
    }

    #[test]
    fn test_result_table_aligns_columns() {
        let style = OutputStyle::plain();
        let rows = vec![
            row("Ayşe", RelationLabel::Spouse, 250.0, Some(25.0)),
            row("Ali", RelationLabel::Child, 0.0, None),
        ];
        let table = style.result_table(&rows, 250.0);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].contains("250.00"));
        assert!(lines[2].contains("25.00%"));
        assert!(lines[3].contains("Ali (deceased)"));
        assert!(lines[3].contains("—"));
        assert_eq!(
            char_column(lines[2], "spouse"),
            char_column(lines[3], "child"),
            "relation column misaligned"
        );
        assert!(table.ends_with("Total distributed: 250.00"));
    }
}
