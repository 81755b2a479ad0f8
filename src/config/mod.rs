pub mod toml_config;

use crate::core::policy::{LoanExclusivity, OutstandingLoanPolicy};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use toml_config::{CatalogConfig, MemberRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "library-catalog"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Run a scripted session against an in-memory library catalog")
)]
pub struct CliConfig {
    /// TOML file with the seed catalog, policy and actions. Runs the built-in
    /// demo when omitted.
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    /// Override `policy.exclusivity` from the config file
    #[cfg_attr(feature = "cli", arg(long, value_enum))]
    pub exclusivity: Option<LoanExclusivity>,

    /// Override `policy.on_outstanding_loans` from the config file
    #[cfg_attr(feature = "cli", arg(long, value_enum))]
    pub on_outstanding_loans: Option<OutstandingLoanPolicy>,

    /// Print notifications on stdout instead of logging them
    #[cfg_attr(feature = "cli", arg(long, conflicts_with = "json"))]
    pub console: bool,

    /// Print the session summary as JSON and log as JSON lines on stderr
    #[cfg_attr(feature = "cli", arg(long))]
    pub json: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl CliConfig {
    /// Load the config file named on the command line (or the empty config)
    /// with the command-line policy overrides applied.
    pub fn load_catalog(&self) -> crate::Result<CatalogConfig> {
        let mut catalog = match &self.config {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::default(),
        };
        catalog.override_policy(self.exclusivity, self.on_outstanding_loans);
        Ok(catalog)
    }
}
