// src/main.rs
mod cli;
mod config;
mod error;
mod features;
mod generate;
mod inject;
mod list;
mod utils;

use clap::Parser;
use cli::{Cli, Commands, InjectArgs};
use console::style;
use error::ScaffoldError;
use inject::{TargetFile, WrapDirective};
use log::LevelFilter;
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
  let cli = Cli::parse();

  // Setup logging based on verbosity; RUST_LOG still applies on top.
  let log_level = match cli.verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new()
    .filter_level(log_level)
    .parse_default_env()
    .init();

  log::debug!("CLI args: {:?}", cli);

  if let Err(e) = run(cli) {
    eprintln!("{} {}", style("Error:").red().bold(), style(e).red());
    process::exit(1);
  }
}

fn run(cli: Cli) -> Result<(), ScaffoldError> {
  match cli.command {
    Commands::Features => list::run_list(),
    Commands::Generate(args) => {
      let templates_path = determine_templates_dir(cli.templates_dir)?;
      log::info!("Using templates directory: {}", templates_path.display());
      generate::run_generate(args, &templates_path)
    }
    Commands::Inject(args) => run_inject(args),
  }
}

fn run_inject(args: InjectArgs) -> Result<(), ScaffoldError> {
  let mut directive = WrapDirective::new(args.wrapper).self_closing(args.self_closing);
  if let Some(props) = args.props {
    directive = directive.with_props(props);
  }
  if let Some(children) = args.children {
    directive = directive.with_children(children);
  }

  let target = TargetFile::new(args.file, args.style);
  target.wrap(&args.import_line, &directive)?;
  println!(
    "{} Wrapped the {} of {} in <{}>",
    style("✔").green(),
    target.style(),
    target.path().display(),
    directive.wrapper
  );
  Ok(())
}

/// Determines the templates directory path.
/// Order of preference:
/// 1. --templates-dir CLI argument
/// 2. REACT_SCAFFOLD_TEMPLATES_DIR environment variable
/// 3. templates/ subdirectory relative to the executable
/// 4. templates/ subdirectory relative to the current working directory (fallback)
fn determine_templates_dir(cli_path: Option<PathBuf>) -> Result<PathBuf, ScaffoldError> {
  if let Some(path) = cli_path {
    if path.is_dir() {
      return Ok(path);
    } else {
      log::warn!(
        "Provided --templates-dir path does not exist or is not a directory: {}",
        path.display()
      );
    }
  }

  // Env variable check happens automatically via clap's `env` attribute

  // Relative to executable
  if let Ok(mut exe_path) = env::current_exe() {
    exe_path.pop(); // Remove the executable name
    let path = exe_path.join("templates");
    if path.is_dir() {
      return Ok(path);
    }
  }

  // Relative to current working directory as a last resort
  let path = PathBuf::from("templates");
  if path.is_dir() {
    return Ok(path);
  }

  Err(ScaffoldError::CannotDetermineTemplatesDir)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_templates_dir_wins() {
    let dir = tempfile::tempdir().unwrap();
    let found = determine_templates_dir(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(found, dir.path());
  }

  #[test]
  fn lookup_never_points_into_the_build_tree() {
    let build_tree = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates");
    let missing = PathBuf::from("/definitely/not/a/templates/dir");
    if let Ok(found) = determine_templates_dir(Some(missing)) {
      assert_ne!(found, build_tree);
    }
  }
}
