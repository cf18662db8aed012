//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stackgen_core::domain::ModuleKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackgen",
    bin_name = "stackgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Generate full-stack projects from a declarative description",
    long_about = "Stackgen reads a project description (stackgen.yaml), validates it, \
                  and asks the generation service to build the project as a local \
                  archive or a new GitHub repository.",
    after_help = "EXAMPLES:\n\
        \x20 stackgen init --name my-app --domain example.com --owner dev@example.com\n\
        \x20 stackgen validate\n\
        \x20 stackgen generate --output ./out\n\
        \x20 stackgen generate --github --repo-name my-app --private\n\
        \x20 stackgen modules --kind code",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a project description file.
    #[command(
        about = "Create a project description",
        after_help = "EXAMPLES:\n\
            \x20 stackgen init                              # prompts for the details\n\
            \x20 stackgen init --name shop --domain shop.dev --owner me@shop.dev\n\
            \x20 stackgen init --file conf/stackgen.yaml --force"
    )]
    Init(InitArgs),

    /// Validate a project description.
    #[command(
        visible_alias = "check",
        about = "Validate a project description",
        after_help = "EXAMPLES:\n\
            \x20 stackgen validate\n\
            \x20 stackgen validate --file conf/stackgen.yaml\n\
            \x20 stackgen validate --output-format json"
    )]
    Validate(ValidateArgs),

    /// Generate the project through the remote service.
    #[command(
        visible_alias = "gen",
        about = "Generate a project",
        after_help = "EXAMPLES:\n\
            \x20 stackgen generate --output ./out\n\
            \x20 stackgen generate --output ./my-app.zip --yes\n\
            \x20 stackgen generate --github --repo-name my-app --private"
    )]
    Generate(GenerateArgs),

    /// List modules offered by the generation service.
    #[command(
        visible_alias = "ls",
        about = "List available modules",
        after_help = "EXAMPLES:\n\
            \x20 stackgen modules\n\
            \x20 stackgen modules --kind extension\n\
            \x20 stackgen modules --format json"
    )]
    Modules(ModulesArgs),

    /// Show the GitHub account behind the configured token.
    #[command(about = "Show the authenticated GitHub account")]
    Whoami,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackgen completions bash > ~/.local/share/bash-completion/completions/stackgen\n\
            \x20 stackgen completions zsh  > ~/.zfunc/_stackgen\n\
            \x20 stackgen completions fish > ~/.config/fish/completions/stackgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the application settings.
    #[command(
        about = "Application settings",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackgen config get http.timeout_secs\n\
            \x20 stackgen config list\n\
            \x20 stackgen config path"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the description.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Project description path (default: stackgen.yaml)"
    )]
    pub file: Option<PathBuf>,

    #[arg(short = 'n', long = "name", help = "Project name")]
    pub name: Option<String>,

    #[arg(short = 'd', long = "domain", help = "Project domain, e.g. example.com")]
    pub domain: Option<String>,

    #[arg(short = 'o', long = "owner", help = "Owner email address")]
    pub owner: Option<String>,

    #[arg(long = "description", help = "Short project description")]
    pub description: Option<String>,

    /// Overwrite an existing file without asking.
    #[arg(long = "force", help = "Overwrite an existing description")]
    pub force: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `stackgen validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Project description path (default: stackgen.yaml)"
    )]
    pub file: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stackgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Project description path (default: stackgen.yaml)"
    )]
    pub file: Option<PathBuf>,

    /// Directory (or `.zip` path) for the generated archive.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Write the generated archive to DIR (or to a .zip path)"
    )]
    pub output: Option<PathBuf>,

    /// Push to a new GitHub repository instead of writing locally.
    #[arg(long = "github", help = "Create a GitHub repository with the result")]
    pub github: bool,

    #[arg(
        long = "repo-name",
        value_name = "NAME",
        requires = "github",
        help = "Repository name (default: project name)"
    )]
    pub repo_name: Option<String>,

    #[arg(long = "private", requires = "github", help = "Make the repository private")]
    pub private: bool,

    #[arg(
        long = "api-url",
        value_name = "URL",
        help = "Generation API base URL (default: $STACKGEN_API_URL or https://api.stackgen.dev)"
    )]
    pub api_url: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── modules ───────────────────────────────────────────────────────────────────

/// Arguments for `stackgen modules`.
#[derive(Debug, Args)]
pub struct ModulesArgs {
    #[arg(long = "api-url", value_name = "URL", help = "Generation API base URL")]
    pub api_url: Option<String>,

    #[arg(short = 'k', long = "kind", value_enum, help = "Filter by module kind")]
    pub kind: Option<KindArg>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ModulesFormat,
}

/// Output format for the `modules` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModulesFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

/// Module kind filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum KindArg {
    Code,
    Extension,
    Provider,
    Vcs,
}

impl From<KindArg> for ModuleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Code => Self::Code,
            KindArg::Extension => Self::Extension,
            KindArg::Provider => Self::Provider,
            KindArg::Vcs => Self::Vcs,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a setting.
    Get {
        /// Dotted key path, e.g. `http.timeout_secs`.
        key: String,
    },
    /// Print all effective settings.
    List,
    /// Print the path to the settings file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
