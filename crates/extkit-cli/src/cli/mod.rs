//! CLI argument definitions using the clap derive API.
//!
//! Argument names, aliases and help text live here and nowhere else.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "extkit",
    bin_name = "extkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold extension projects from templates",
    long_about = "extkit creates or extends an extension project from a template \
                  collection. A failed run leaves the target directory exactly as \
                  it found it.",
    after_help = "EXAMPLES:\n\
        \x20 extkit create checkout-ui ./my-ext --template typescript-react\n\
        \x20 extkit create product-subscription ./subs --template javascript --dry-run\n\
        \x20 extkit list --format json\n\
        \x20 extkit completions bash > ~/.local/share/bash-completion/completions/extkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold an extension into a directory.
    #[command(
        visible_alias = "c",
        about = "Create or extend an extension project",
        after_help = "EXAMPLES:\n\
            \x20 extkit create checkout-ui ./my-ext --template typescript-react\n\
            \x20 extkit create checkout-ui . --template react --yes\n\
            \x20 extkit create product-subscription ./subs --template javascript --dry-run"
    )]
    Create(CreateArgs),

    /// List extension types in the active template store.
    #[command(
        visible_alias = "ls",
        about = "List available extension types",
        after_help = "EXAMPLES:\n\
            \x20 extkit list\n\
            \x20 extkit list checkout-ui\n\
            \x20 extkit list --format json\n\
            \x20 extkit list --templates-dir ./my-templates"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 extkit init\n\
            \x20 extkit --config ./extkit.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 extkit completions bash > ~/.local/share/bash-completion/completions/extkit\n\
            \x20 extkit completions zsh  > ~/.zfunc/_extkit\n\
            \x20 extkit completions fish > ~/.config/fish/completions/extkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 extkit config get defaults.template\n\
            \x20 extkit config list\n\
            \x20 extkit config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Extension type, e.g. `checkout-ui`. Must exist in the template store.
    #[arg(value_name = "TYPE")]
    pub extension_type: String,

    /// Project root. Created if missing; merged into if it already exists.
    #[arg(value_name = "ROOT_DIR")]
    pub root_dir: PathBuf,

    #[arg(
        short = 'r',
        long = "renderer",
        value_name = "NAME",
        help = "Renderer recorded in the project metadata (default: config)"
    )]
    pub renderer: Option<String>,

    /// Template id. Picks the source flavor: ids containing `react` use the
    /// React body, ids containing `typescript` emit `.ts`/`.tsx`.
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        help = "Template id, e.g. typescript-react (default: config)"
    )]
    pub template: Option<String>,

    #[arg(long = "uuid", value_name = "UUID", help = "Use this UUID instead of a random one")]
    pub uuid: Option<Uuid>,

    #[arg(
        long = "build-dir",
        value_name = "DIR",
        help = "Build output directory recorded in the metadata (default: build)"
    )]
    pub build_dir: Option<String>,

    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Read templates from this directory instead of the built-ins"
    )]
    pub templates_dir: Option<PathBuf>,

    #[arg(
        short = 'y',
        long = "yes",
        help = "Do not ask before writing into a non-empty directory"
    )]
    pub yes: bool,

    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show only this extension type. Unknown names are an error.
    #[arg(value_name = "TYPE")]
    pub extension_type: Option<String>,

    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Read templates from this directory instead of the built-ins"
    )]
    pub templates_dir: Option<PathBuf>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.template`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}
