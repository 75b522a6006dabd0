// src/features/mod.rs
//! One setup step per optional library. Steps run strictly one after another;
//! the entry file and the App root are edited through [`crate::inject`], so the
//! order of this pipeline is the nesting order of the generated providers.

pub mod base;
pub mod forms;
pub mod header;
pub mod i18n;
pub mod redux;
pub mod router;
pub mod rtk_query;
pub mod shadcn;
pub mod tailwind;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use log::{debug, warn};

use crate::config::{Answers, Feature};
use crate::error::ScaffoldError;
use crate::inject::TargetFile;
use crate::utils::{self, CommandRunner, Status};

/// Setup order. Tailwind has to precede Shadcn, Redux has to precede RTK Query.
pub const PIPELINE_ORDER: [Feature; 8] = [
  Feature::Tailwind,
  Feature::Shadcn,
  Feature::Redux,
  Feature::RtkQuery,
  Feature::I18n,
  Feature::Router,
  Feature::Forms,
  Feature::Header,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedStep {
  Setup(Feature),
  /// Requested, but its prerequisite was not.
  Skip { feature: Feature, missing: Feature },
}

/// Decides which of the requested features get set up, in pipeline order.
pub fn plan(answers: &Answers) -> Vec<PlannedStep> {
  PIPELINE_ORDER
    .iter()
    .copied()
    .filter(|feature| answers.has(*feature))
    .map(|feature| match feature.requires() {
      Some(missing) if !answers.has(missing) => PlannedStep::Skip { feature, missing },
      _ => PlannedStep::Setup(feature),
    })
    .collect()
}

/// Shared state of one generation run.
pub struct FeatureContext<'a> {
  pub project_path: PathBuf,
  pub templates_dir: &'a Path,
  pub runner: &'a CommandRunner,
  pub answers: &'a Answers,
  pub substitutions: HashMap<String, String>,
}

impl<'a> FeatureContext<'a> {
  pub fn new(
    project_path: PathBuf,
    templates_dir: &'a Path,
    runner: &'a CommandRunner,
    answers: &'a Answers,
  ) -> Self {
    Self {
      project_path,
      templates_dir,
      runner,
      answers,
      substitutions: utils::compute_substitutions(&answers.project_name),
    }
  }

  /// Whether `feature` was requested and will actually be set up.
  pub fn enabled(&self, feature: Feature) -> bool {
    match feature.requires() {
      Some(base) => self.answers.has(feature) && self.answers.has(base),
      None => self.answers.has(feature),
    }
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.project_path.join(relative)
  }

  pub fn entry(&self) -> TargetFile {
    TargetFile::entry(&self.project_path)
  }

  pub fn app_root(&self) -> TargetFile {
    TargetFile::app_root(&self.project_path)
  }

  /// Renders `templates/<name>/` into the project root.
  pub fn copy_templates(&self, name: &str) -> Result<Vec<PathBuf>, ScaffoldError> {
    let written =
      utils::copy_template_dir(&self.templates_dir.join(name), &self.project_path, &self.substitutions)?;
    debug!("Template '{}' wrote {} file(s)", name, written.len());
    Ok(written)
  }

  /// Renders a single file of `templates/<name>/` to the same relative path.
  pub fn copy_template_file(&self, name: &str, relative: &str) -> Result<(), ScaffoldError> {
    let source = self.templates_dir.join(name).join(relative);
    let content = fs::read_to_string(&source).map_err(|e| ScaffoldError::FileRead {
      path: source.clone(),
      source: e,
    })?;
    utils::write_file(
      &self.path(relative),
      &utils::substitute_content(&content, &self.substitutions),
    )
  }

  pub fn read(&self, relative: &str) -> Result<String, ScaffoldError> {
    let path = self.path(relative);
    fs::read_to_string(&path).map_err(|e| ScaffoldError::FileRead { path, source: e })
  }
}

/// Runs every planned step. The first failing step aborts the run.
pub fn run_pipeline(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  for step in plan(ctx.answers) {
    match step {
      PlannedStep::Skip { feature, missing } => {
        warn!("Skipping {}: it requires {}", feature, missing);
        println!(
          "\n{}",
          style(format!(
            "⚠️  Skipping {} (requires {})",
            feature.label(),
            missing.label()
          ))
          .yellow()
        );
      }
      PlannedStep::Setup(feature) => setup(feature, ctx)?,
    }
  }
  Ok(())
}

fn setup(feature: Feature, ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  match feature {
    Feature::Tailwind => tailwind::setup(ctx),
    Feature::Shadcn => shadcn::setup(ctx),
    Feature::Redux => redux::setup(ctx),
    Feature::RtkQuery => rtk_query::setup(ctx),
    Feature::Router => router::setup(ctx),
    Feature::I18n => i18n::setup(ctx),
    Feature::Forms => forms::setup(ctx),
    Feature::Header => header::setup(ctx),
  }
}

/// Runs one step under a spinner. The spinner ends with `success`, or with
/// `failure` before the error is passed on.
pub(crate) fn run_step<F>(
  heading: &str,
  start: &str,
  success: &str,
  failure: &str,
  step: F,
) -> Result<(), ScaffoldError>
where
  F: FnOnce(&Status) -> Result<(), ScaffoldError>,
{
  println!("\n{}", style(heading).blue());
  let status = Status::start(start);
  match step(&status) {
    Ok(()) => {
      status.succeed(success);
      Ok(())
    }
    Err(e) => {
      status.fail(failure);
      Err(e)
    }
  }
}

pub(crate) fn print_hints(ready: &str, hints: &[&str]) {
  println!("{}", style(format!("✓ {}", ready)).green());
  for hint in hints {
    println!("{}", style(format!("  - {}", hint)).dim());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn answers(features: &[Feature]) -> Answers {
    Answers {
      project_name: "demo".to_string(),
      features: features.to_vec(),
    }
  }

  #[test]
  fn plan_follows_pipeline_order() {
    let steps = plan(&answers(&[Feature::Header, Feature::Router, Feature::Redux, Feature::Tailwind]));
    assert_eq!(
      steps,
      vec![
        PlannedStep::Setup(Feature::Tailwind),
        PlannedStep::Setup(Feature::Redux),
        PlannedStep::Setup(Feature::Router),
        PlannedStep::Setup(Feature::Header),
      ]
    );
  }

  #[test]
  fn plan_skips_features_without_prerequisite() {
    let steps = plan(&answers(&[Feature::Shadcn, Feature::RtkQuery, Feature::I18n]));
    assert_eq!(
      steps,
      vec![
        PlannedStep::Skip {
          feature: Feature::Shadcn,
          missing: Feature::Tailwind
        },
        PlannedStep::Skip {
          feature: Feature::RtkQuery,
          missing: Feature::Redux
        },
        PlannedStep::Setup(Feature::I18n),
      ]
    );
  }

  #[test]
  fn plan_of_nothing_is_empty() {
    assert!(plan(&answers(&[])).is_empty());
  }

  fn templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
  }

  fn generate_offline(parent: &Path, features: &[Feature]) -> PathBuf {
    let templates = templates();
    let runner = CommandRunner::new(crate::config::PackageManager::Npm, false);
    let answers = answers(features);
    let ctx = FeatureContext::new(parent.join("demo"), &templates, &runner, &answers);
    base::setup(&ctx, parent).unwrap();
    run_pipeline(&ctx).unwrap();
    ctx.project_path
  }

  #[test]
  fn offline_pipeline_wires_every_feature() {
    let out = tempfile::tempdir().unwrap();
    let project = generate_offline(out.path(), &Feature::ALL);

    let main = fs::read_to_string(project.join("src/main.tsx")).unwrap();
    let router = main.find("<Router>").unwrap();
    let provider = main.find("<Provider store={store}>").unwrap();
    assert!(router < provider);
    assert!(main.find("</Provider>").unwrap() < main.find("</Router>").unwrap());
    assert_eq!(main.matches("import './i18n';").count(), 1);
    assert_eq!(main.matches("import { Provider } from 'react-redux';").count(), 1);
    assert!(main.contains("import { BrowserRouter as Router } from 'react-router';"));

    let store = fs::read_to_string(project.join("src/store/store.ts")).unwrap();
    assert!(store.contains("[apiSlice.reducerPath]: apiSlice.reducer,"));
    assert!(store.contains("getDefaultMiddleware().concat(apiSlice.middleware)"));

    let layout = fs::read_to_string(project.join(header::PUBLIC_LAYOUT_FILE)).unwrap();
    assert_eq!(layout.matches("<Header />").count(), 1);
    assert!(layout.contains("import Header from './Header';"));

    let app = fs::read_to_string(project.join("src/App.tsx")).unwrap();
    assert!(!app.contains("AppLayout"));
    assert!(project.join("src/pages/Home.tsx").is_file());
    assert!(project.join("src/components/ExampleForm.tsx").is_file());
    assert!(project.join("src/assets/languages/fr/global.json").is_file());

    let html = fs::read_to_string(project.join("index.html")).unwrap();
    assert!(html.contains("<title>Demo</title>"));
  }

  #[test]
  fn header_without_router_wraps_app_in_layout() {
    let out = tempfile::tempdir().unwrap();
    let project = generate_offline(out.path(), &[Feature::Header]);

    let app = fs::read_to_string(project.join("src/App.tsx")).unwrap();
    assert!(app.contains("import AppLayout from './components/Layout/AppLayout';"));
    assert!(app.contains("return (\n  <AppLayout>\n"));
    assert_eq!(app.matches("export default App").count(), 1);
    assert!(project.join("src/components/Layout/AppLayout.tsx").is_file());
    assert!(!project.join(header::PUBLIC_LAYOUT_FILE).exists());
  }

  #[test]
  fn skipped_features_leave_no_files() {
    let out = tempfile::tempdir().unwrap();
    let project = generate_offline(out.path(), &[Feature::RtkQuery, Feature::Shadcn]);

    assert!(!project.join("src/services/api.ts").exists());
    assert!(!project.join("tailwind.config.js").exists());
    let main = fs::read_to_string(project.join("src/main.tsx")).unwrap();
    assert!(!main.contains("Provider"));
  }
}
