// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Feature, PackageManager};
use crate::inject::AnchorStyle;

#[derive(Parser, Debug)]
#[command(
    name = "react-scaffold", // Command name users type
    author,
    version,
    about = "Generates React + TypeScript projects pre-wired with the libraries you pick.",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Increase verbosity level (e.g., -v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Directory holding the bundled project templates
  #[arg(long, global = true)]
  #[clap(env = "REACT_SCAFFOLD_TEMPLATES_DIR")]
  pub templates_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List the features a project can be generated with
  Features,
  /// Generate a new React project
  #[command(visible_alias = "new")]
  Generate(GenerateArgs),
  /// Add an import and wrap the rendered tree of an existing file
  Inject(InjectArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
  /// Project name (lowercase letters, numbers, hyphens and underscores)
  pub name: Option<String>,

  /// Directory the project directory is created in
  #[arg(short, long, default_value = ".")]
  pub output_dir: PathBuf,

  /// Enable exactly these features and skip the feature prompts
  #[arg(long = "with", value_enum, value_delimiter = ',')]
  pub features: Option<Vec<Feature>>,

  /// Accept preset or default answers instead of prompting
  #[arg(short = 'y', long)]
  pub yes: bool,

  /// Render the bundled base template and skip every package-manager call
  #[arg(long)]
  pub no_install: bool,

  /// Package manager used to create the project and install dependencies
  #[arg(long, value_enum)]
  pub package_manager: Option<PackageManager>,

  /// Preset file with saved answers
  #[arg(long)]
  pub preset: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InjectArgs {
  /// Source file to edit in place
  pub file: PathBuf,

  /// Which expression of the file gets wrapped
  #[arg(long, value_enum)]
  pub style: AnchorStyle,

  /// Name of the wrapping element, e.g. Provider
  #[arg(long)]
  pub wrapper: String,

  /// Import line the wrapper needs
  #[arg(long = "import")]
  pub import_line: String,

  /// Raw attribute text, e.g. 'store={store}'
  #[arg(long)]
  pub props: Option<String>,

  /// Replace the expression with a self-closing wrapper
  #[arg(long)]
  pub self_closing: bool,

  /// Children that replace the located expression
  #[arg(long)]
  pub children: Option<String>,
}
