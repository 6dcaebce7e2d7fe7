// Show which relative categories may still be recorded

use std::path::PathBuf;

use super::Command;
use crate::error::CliResult;
use crate::family_file::FamilyFile;
use crate::output::OutputStyle;

/// Replay a family file and report degree eligibility
pub struct EligibilityCommand {
    file: PathBuf,
}

impl EligibilityCommand {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Render the report without printing it
    pub fn render(&self, style: &OutputStyle) -> CliResult<String> {
        let relatives = FamilyFile::load(&self.file)?.to_relatives()?;
        let mut report = style.eligibility(&relatives.resolve());
        report.push('\n');
        report.push_str(&style.key_value("Recorded relatives", &relatives.len().to_string()));
        Ok(report)
    }
}

#[async_trait::async_trait]
impl Command for EligibilityCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.render(&OutputStyle::default())?);
        Ok(())
    }
}
