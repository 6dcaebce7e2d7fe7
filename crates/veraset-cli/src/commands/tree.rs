// Print the canonical tree sent to the calculation service

use std::path::PathBuf;

use veraset_domain::{CalculationRequest, EstateValue, TreeBuilder, WireNode};

use super::Command;
use crate::error::CliResult;
use crate::family_file::FamilyFile;

/// Replay a family file and print the request body as JSON
///
/// Without an estate value only the `family_tree` part is printed.
pub struct TreeCommand {
    file: PathBuf,
    estate: Option<f64>,
    deceased_name: String,
}

impl TreeCommand {
    pub fn new(file: impl Into<PathBuf>, deceased_name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            estate: None,
            deceased_name: deceased_name.into(),
        }
    }

    pub fn with_estate(mut self, estate: Option<f64>) -> Self {
        self.estate = estate;
        self
    }

    /// Render the JSON document without printing it
    pub fn render(&self) -> CliResult<String> {
        let family = FamilyFile::load(&self.file)?;
        let relatives = family.to_relatives()?;
        let builder = TreeBuilder::new()
            .with_deceased_name(family.deceased_name.as_deref().unwrap_or(&self.deceased_name));
        let tree = builder.build(&relatives)?;

        let json = match self.estate.or(family.estate_value) {
            Some(value) => {
                let request = CalculationRequest::new(EstateValue::new(value)?, &tree);
                serde_json::to_string_pretty(&request)?
            }
            None => serde_json::to_string_pretty(&WireNode::from(&tree))?,
        };
        Ok(json)
    }
}

#[async_trait::async_trait]
impl Command for TreeCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}
