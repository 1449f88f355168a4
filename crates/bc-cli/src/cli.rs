use std::path::PathBuf;

use bc_core::{LabelStyle, Locale};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bcr")]
#[command(about = "Redact identities from incident narratives", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print redaction annotations for a case file as JSON
    Annotate {
        /// Case file (JSON), or - for stdin
        case: String,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Print the redacted narrative for a case file
    Redact {
        /// Case file (JSON), or - for stdin
        case: String,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Apply previously computed annotations to a narrative
    Apply {
        /// Narrative text file, or - for stdin
        narrative: String,

        /// Annotations JSON file
        annotations: String,
    },

    /// Load recognizer resources and report timing
    Preload,

    /// Show the effective configuration
    Config,
}

/// Per-run overrides of configured defaults
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Locale tag, e.g. en-US or es-MX
    #[arg(long, env = "BCR_LOCALE")]
    pub locale: Option<Locale>,

    /// Leave officer names visible
    #[arg(long)]
    pub keep_officers: bool,

    /// Placeholder labels: verbatim or indexed
    #[arg(long)]
    pub label_style: Option<LabelStyle>,
}
