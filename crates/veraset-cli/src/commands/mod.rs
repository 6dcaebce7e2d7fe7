// Command handlers for the veraset CLI

pub mod calculate;
pub mod eligibility;
pub mod tree;

pub use calculate::CalculateCommand;
pub use eligibility::EligibilityCommand;
pub use tree::TreeCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
