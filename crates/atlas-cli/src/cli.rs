use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `atlas-publish` binary.
#[derive(Debug, Parser)]
#[command(
    name = "atlas-publish",
    version,
    about = "Publish entity and relationship record files into Apache Atlas"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Explicit config file, layered below ATLAS_* environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run one publish cycle: every entity file, then every relationship file.
    Publish(PublishArgs),
    /// Show both forms of a table or column identity.
    Key(KeyArgs),
}

/// Overrides applied on top of the loaded configuration.
#[derive(Clone, Debug, Default, Args)]
pub struct PublishArgs {
    /// Directory of entity record files
    #[arg(long)]
    pub entity_dir: Option<PathBuf>,

    /// Directory of relationship record files
    #[arg(long)]
    pub relation_dir: Option<PathBuf>,

    /// Maximum entities per bulk request
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Atlas base URL
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyKind {
    Table,
    Column,
}

#[derive(Clone, Debug, Args)]
pub struct KeyArgs {
    /// Identity kind
    #[arg(value_enum)]
    pub kind: KeyKind,

    /// Qualified name (`db.table@cluster`) or catalog key (`source://cluster.db/table`)
    pub raw: String,

    /// Source used when rendering a catalog key from a qualified name
    #[arg(long)]
    pub source: Option<String>,
}
