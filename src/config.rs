//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront catalog and cart
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog and cart", long_about = None)]
pub struct Config {
    /// Product fixture file, the built-in sample set when omitted
    #[arg(short, long, global = true, env = "STOREFRONT_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Storefront subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the product overview, the product grid and the summary
    List {
        /// Only show products in this category
        #[arg(short, long, default_value = "All")]
        category: String,
    },

    /// Show the details of one product
    Show {
        /// Product id
        id: u64,
    },

    /// Show the category filter options
    Categories,

    /// Replay a session script and show the resulting cart
    Run {
        /// Session script (YAML)
        script: PathBuf,
    },
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn list_defaults_to_all_categories() -> TestResult {
        let config = Config::try_parse_from(["storefront", "list"])?;

        assert!(matches!(&config.command, Command::List { category } if category == "All"));
        assert!(config.fixture.is_none());

        Ok(())
    }

    #[test]
    fn global_flags_follow_subcommand() -> TestResult {
        let config = Config::try_parse_from([
            "storefront",
            "show",
            "3",
            "--fixture",
            "fixtures/products/default.yml",
            "--log-format",
            "json",
        ])?;

        assert!(matches!(config.command, Command::Show { id: 3 }));
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(
            config.fixture,
            Some(PathBuf::from("fixtures/products/default.yml"))
        );

        Ok(())
    }

    #[test]
    fn run_requires_script() {
        assert!(Config::try_parse_from(["storefront", "run"]).is_err());
    }
}
