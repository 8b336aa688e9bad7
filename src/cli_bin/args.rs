//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use matterpress::pipeline::settings::DEFAULT_ASSETS_DIR;
use matterpress::{StylePreset, Variant};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "matterpress",
    version,
    about = "Keeps markdown front matter consistent and generates cover images",
    long_about = "matterpress reconciles the YAML front matter of the markdown files changed \
                  by the latest commit of a notes repository, renders cover images for posts \
                  that have none, touches trigger files and commits the results back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fill titles and cover URLs, render missing covers and commit
    Covers(CoversArgs),
    /// Fill titles and descriptions, refresh dates and commit
    FrontMatter(FrontMatterArgs),
    /// Reconcile local markdown files in place
    Local(LocalArgs),
    /// Render a single cover image
    Render(RenderArgs),
}

/// Hosting API credentials
#[derive(Args, Debug, Clone)]
pub struct AuthOptions {
    /// Token used for every hosting API call
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Cover asset location
#[derive(Args, Debug, Clone)]
pub struct AssetOptions {
    /// Directory holding the background templates and fonts
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ASSETS_DIR)]
    pub assets: PathBuf,
}

/// Arguments for the covers command
#[derive(Args, Debug)]
pub struct CoversArgs {
    #[command(flatten)]
    pub auth: AuthOptions,

    #[command(flatten)]
    pub assets: AssetOptions,
}

/// Arguments for the front-matter command
#[derive(Args, Debug)]
pub struct FrontMatterArgs {
    #[command(flatten)]
    pub auth: AuthOptions,
}

/// Arguments for the local command
#[derive(Args, Debug)]
pub struct LocalArgs {
    /// Files or directories to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Which fields to manage
    #[arg(long, value_enum, default_value = "covers")]
    pub variant: VariantArg,

    /// Print reconciled documents instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Render cover jobs into this directory
    #[arg(long, value_name = "DIR")]
    pub covers_dir: Option<PathBuf>,

    #[command(flatten)]
    pub assets: AssetOptions,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Title to draw
    pub title: String,

    /// Output PNG file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Use this style instead of a random one
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,

    /// Seed for the random style choice
    #[arg(long, conflicts_with = "style")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub assets: AssetOptions,
}

/// Field sets for the CLI
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum VariantArg {
    /// Title, cover URL and date
    Covers,
    /// Title, description and date
    FrontMatter,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Covers => Variant::Covers,
            VariantArg::FrontMatter => Variant::FrontMatter,
        }
    }
}

/// Cover styles for the CLI
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StyleArg {
    /// Black/red template
    Dark,
    /// White/cyan template
    Light,
}

impl From<StyleArg> for StylePreset {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Dark => StylePreset::Dark,
            StyleArg::Light => StylePreset::Light,
        }
    }
}
