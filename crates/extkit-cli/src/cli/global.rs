//! Flags accepted by every `extkit` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so they may appear
//! before or after the subcommand name.

use clap::Args;
use std::path::PathBuf;

/// Flags shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level on stderr. Warnings are shown by default; each `-v` adds one
    /// level. `RUST_LOG` overrides the flag entirely.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)",
        long_help = "More log output on stderr:
    (none)  - Warnings and errors, e.g. an incomplete rollback
    -v      - Info: each scaffold step and every merged manifest
    -vv     - Debug: every file written, copied or restored
    -vvv    - Trace: everything, including template rendering
RUST_LOG, when set, replaces this setting."
    )]
    pub verbose: u8,

    /// Only errors reach stderr, and progress lines on stdout are dropped.
    /// JSON results are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Errors only; no progress output"
    )]
    pub quiet: bool,

    /// Plain, uncoloured output. Set by any non-false `NO_COLOR` value
    /// (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Settings file used instead of the platform default. Must exist,
    /// except for `extkit init`, which creates it.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "EXTKIT_CONFIG",
        help = "Use this settings file"
    )]
    pub config: Option<PathBuf>,

    /// `json` prints one document on stdout: the project descriptor for
    /// `create`, the plan for `create --dry-run`, the type list for `list`.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the config, else human on a terminal and plain
    /// when piped.
    #[default]
    Auto,
    /// Coloured, with status icons.
    Human,
    /// No colour codes.
    Plain,
    /// One JSON document on stdout; progress lines are suppressed.
    Json,
}

