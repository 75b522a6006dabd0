// src/generate.rs
use crate::cli::GenerateArgs;
use crate::config::{self, Answers, Feature, PackageManager, Preset, DEFAULT_PROJECT_NAME};
use crate::error::ScaffoldError;
use crate::features::{self, FeatureContext, PlannedStep};
use crate::utils::CommandRunner;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static PROJECT_NAME_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("project name pattern is valid"));

pub fn run_generate(args: GenerateArgs, templates_dir: &Path) -> Result<(), ScaffoldError> {
  info!("Running generate command...");
  debug!(
    "Args: {:?}, Templates Dir: {}",
    args,
    templates_dir.display()
  );

  // --- 1. Load preset ---
  let preset = config::load_preset(args.preset.as_deref())?;
  debug!("Preset: {:?}", preset);
  let package_manager = args
    .package_manager
    .or(preset.package_manager)
    .unwrap_or_default();

  // --- 2. Gather answers ---
  println!("{}", style("⚛️  React project scaffolder").cyan().bold());
  let answers = gather_answers(&args, &preset)?;
  validate_project_name(&answers.project_name)?;
  info!(
    "Project '{}' with features {:?} using {}",
    answers.project_name,
    answers.features,
    package_manager.program()
  );

  // --- 3. Prepare output directory ---
  let output_path = &args.output_dir;
  if !output_path.exists() {
    fs::create_dir_all(output_path).map_err(|e| ScaffoldError::OutputDirCreation {
      path: output_path.to_path_buf(),
      source: e,
    })?;
    info!("Created output directory: {}", output_path.display());
  } else if !output_path.is_dir() {
    return Err(ScaffoldError::GenerationError(format!(
      "Output path '{}' exists but is not a directory.",
      output_path.display()
    )));
  }

  let project_path = output_path.join(&answers.project_name);
  if project_path.exists() {
    warn!(
      "Project directory '{}' already exists. Files may be overwritten.",
      project_path.display()
    );
  }

  // --- 4. Base project and features ---
  let runner = CommandRunner::new(package_manager, !args.no_install);
  let ctx = FeatureContext::new(project_path, templates_dir, &runner, &answers);
  features::base::setup(&ctx, output_path)?;
  features::run_pipeline(&ctx)?;

  info!(
    "Successfully generated project in '{}'!",
    ctx.project_path.display()
  );
  print_summary(&ctx);
  Ok(())
}

pub(crate) fn validate_project_name(name: &str) -> Result<(), ScaffoldError> {
  if PROJECT_NAME_RE.is_match(name) {
    Ok(())
  } else {
    Err(ScaffoldError::InvalidProjectName(name.to_string()))
  }
}

fn gather_answers(args: &GenerateArgs, preset: &Preset) -> Result<Answers, ScaffoldError> {
  let theme = ColorfulTheme::default();

  let project_name = match (&args.name, args.yes) {
    (Some(name), _) => name.clone(),
    (None, true) => default_name(preset),
    (None, false) => Input::with_theme(&theme)
      .with_prompt("What is your project name?")
      .default(default_name(preset))
      .validate_with(|input: &String| -> Result<(), String> {
        if PROJECT_NAME_RE.is_match(input) {
          Ok(())
        } else {
          Err("Project name may only include lowercase letters, numbers, hyphens, and underscores".to_string())
        }
      })
      .interact_text()?,
  };

  let features = match (&args.features, args.yes) {
    (Some(selected), _) => dedup_features(selected),
    (None, true) => preset_features(preset),
    (None, false) => prompt_features(&theme, preset)?,
  };

  Ok(Answers {
    project_name,
    features,
  })
}

fn default_name(preset: &Preset) -> String {
  preset
    .project_name
    .clone()
    .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}

fn dedup_features(selected: &[Feature]) -> Vec<Feature> {
  let mut features = selected.to_vec();
  features.sort();
  features.dedup();
  features
}

fn preset_features(preset: &Preset) -> Vec<Feature> {
  Feature::ALL
    .into_iter()
    .filter(|feature| preset.feature_default(*feature))
    .collect()
}

// Features with an unmet prerequisite are not asked about.
fn prompt_features(theme: &ColorfulTheme, preset: &Preset) -> Result<Vec<Feature>, ScaffoldError> {
  let mut features = Vec::new();
  for feature in Feature::ALL {
    if let Some(base) = feature.requires() {
      if !features.contains(&base) {
        debug!("Not asking about {}: {} was declined", feature, base);
        continue;
      }
    }
    let enabled = Confirm::with_theme(theme)
      .with_prompt(feature.prompt())
      .default(preset.feature_default(feature))
      .interact()?;
    if enabled {
      features.push(feature);
    }
  }
  Ok(features)
}

fn print_summary(ctx: &FeatureContext) {
  let package_manager: PackageManager = ctx.runner.package_manager();
  println!(
    "\n{}",
    style("🎉 Project created successfully!").green().bold()
  );

  let enabled: Vec<&str> = features::plan(ctx.answers)
    .into_iter()
    .filter_map(|step| match step {
      PlannedStep::Setup(feature) => Some(feature.label()),
      PlannedStep::Skip { .. } => None,
    })
    .collect();
  if !enabled.is_empty() {
    println!("\n{} {}", style("Features:").bold(), enabled.join(", "));
  }

  println!("\n{}", style("Next steps:").bold());
  println!("  cd {}", ctx.project_path.display());
  if !ctx.runner.installs() {
    println!(
      "  {} {}",
      package_manager.program(),
      package_manager.install_args().join(" ")
    );
    if ctx.enabled(Feature::Shadcn) {
      println!(
        "  {} init",
        package_manager.exec_hint("shadcn@latest")
      );
    }
  }
  println!("  {}", package_manager.dev_command());
}
