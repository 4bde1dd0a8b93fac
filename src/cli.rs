mod reference;

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
pub use reference::FilterReference;
use std::path::PathBuf;

/// Build alarm filter queries from the filter panel and keep its edit model in sync
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (edit model names, locale, translations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace file holding the filters configuration and edit models
    #[arg(short, long, global = true, default_value = "alarm-filter.json")]
    pub workspace: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a workspace with the built-in filters configuration
    Init {
        /// Overwrite an existing workspace
        #[arg(short, long)]
        force: bool,
    },
    /// Reconcile the edit model with the filters configuration, keeping values
    UpdateDefaults,
    /// Recreate the edit model, resetting every value to its default
    GenerateDefaults,
    /// Enable or disable an attribute or one of its criteria
    #[command(group(ArgGroup::new("state").required(true).args(["enable", "disable"])))]
    Visibility {
        /// Filter attribute, e.g. Priority
        attribute: String,

        /// Criterion of the attribute, e.g. Urgent
        criterion: Option<String>,

        #[arg(long)]
        enable: bool,

        #[arg(long)]
        disable: bool,
    },
    /// Show the filters configuration, the panel layout and the stored values
    Show,
    /// Print the query built from the stored filter values
    Query,
    /// Toggle a checkbox of the filter panel and refresh the query
    Filter {
        /// Browse name of the toggled criterion
        name: String,

        #[command(flatten)]
        edits: PanelEdits,
    },
    /// Refresh the query from the panel state
    Refresh {
        #[command(flatten)]
        edits: PanelEdits,
    },
    /// Save the panel state into the edit model and refresh the query
    Apply {
        #[command(flatten)]
        edits: PanelEdits,
    },
    /// Uncheck every filter, save and refresh the query
    ClearAll,
}

/// Changes made in the filter panel before the operation runs
#[derive(Args, Debug, Clone, Default)]
pub struct PanelEdits {
    /// Check a filter, e.g. Priority/Urgent (repeatable)
    #[arg(long, value_name = "ATTR/NAME")]
    pub check: Vec<FilterReference>,

    /// Uncheck a filter (repeatable)
    #[arg(long, value_name = "ATTR/NAME")]
    pub uncheck: Vec<FilterReference>,

    /// Lower bound of the event time picker (RFC 3339)
    #[arg(long)]
    pub from_time: Option<DateTime<Utc>>,

    /// Upper bound of the event time picker (RFC 3339)
    #[arg(long)]
    pub to_time: Option<DateTime<Utc>>,

    /// Text of the lower severity box
    #[arg(long)]
    pub from_severity: Option<String>,

    /// Text of the upper severity box
    #[arg(long)]
    pub to_severity: Option<String>,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
