//! Veraset command-line front end
//!
//! `veraset eligibility|tree|calculate <FILE>` replays a JSON family file through
//! the relative collection and either reports degree eligibility, prints the
//! canonical request, or submits it to the calculation service.

pub mod commands;
pub mod error;
pub mod family_file;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use family_file::{FamilyFile, FamilyMember};
pub use router::{load_config, Cli, CommandRouter, Commands};
