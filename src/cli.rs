use clap::{Args, Parser, Subcommand};
use extcheck::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "extcheck",
    version,
    about = "Static validation for browser extension packages"
)]
pub struct Cli {
    /// Enable debug diagnostics on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate manifest.json and the files it references
    Structure(ValidateArgs),

    /// Validate popup.html and popup.js
    Ui(ValidateArgs),

    /// Validate content.js
    Content(ValidateArgs),

    /// Validate background.js
    Background(ValidateArgs),

    /// Run every validator and write the Markdown and JSON reports
    #[command(name = "run-all")]
    RunAll {
        /// Path to the unpacked extension (defaults to the configured directory)
        dir: Option<PathBuf>,

        /// Markdown report path
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// JSON report path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Run validators inside this process instead of spawning them
        #[arg(long)]
        in_process: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every built-in check
    ListRules,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the unpacked extension (defaults to the configured directory)
    pub dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "pretty", value_enum)]
    pub format: OutputFormat,

    /// Custom config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}
