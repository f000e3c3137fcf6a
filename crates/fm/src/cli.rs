//! Clap CLI definitions for the `fm` command.

use clap::{Args, Parser, Subcommand};

/// fm -- formulation costing and procurement indents.
///
/// Scales recipes to a production yield, prices them per pack size, and
/// aggregates raw-material demand across planned production runs.
#[derive(Parser, Debug)]
#[command(
    name = "fm",
    about = "Formulation costing and procurement indents",
    long_about = "Scales recipes to a production yield, prices them per pack size, and aggregates raw-material demand across planned production runs.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Catalog file (default: from .formulary/config.yaml, else catalog.{toml,json,yaml}).
    #[arg(long, global = true, env = "FORMULARY_CATALOG")]
    pub catalog: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List formulations in the catalog.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a formulation scaled to a yield, with its cost summary.
    #[command(alias = "cost")]
    Show(ShowArgs),

    /// Aggregate raw-material demand across production runs.
    Indent(IndentArgs),

    /// Show the retail/bulk price list.
    Prices(PricesArgs),

    /// Load the catalog and report whether every record is valid.
    Validate,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Arguments for `fm list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show formulations in this category (case-insensitive).
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

/// Arguments for `fm show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Formulation id or slug.
    pub formulation: String,

    /// Target yield (default: the formulation's base yield).
    #[arg(long = "yield", short = 'y', allow_negative_numbers = true)]
    pub yield_quantity: Option<f64>,
}

/// Arguments for `fm indent`.
#[derive(Args, Debug)]
pub struct IndentArgs {
    /// Production runs as `<id|slug>=<quantity>`, repeatable.
    #[arg(required = true, num_args = 1..)]
    pub runs: Vec<String>,

    /// List contributing formulations on each line.
    #[arg(long)]
    pub sources: bool,
}

/// Arguments for `fm prices`.
#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Only show this product (exact name).
    pub product: Option<String>,
}

/// Arguments for `fm completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
