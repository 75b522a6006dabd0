// src/features/base.rs
use std::path::Path;

use log::info;

use super::{run_step, FeatureContext};
use crate::error::ScaffoldError;

/// Creates the Vite React + TypeScript project at `ctx.project_path`.
///
/// With installation enabled the project comes from the package manager's
/// `create vite` and its dependencies are installed right away. Otherwise the
/// bundled `base` template is rendered, so the rest of the pipeline has the same
/// files to edit.
pub fn setup(ctx: &FeatureContext, parent: &Path) -> Result<(), ScaffoldError> {
  let name = ctx.answers.project_name.as_str();
  run_step(
    "🚀 Creating Vite project...",
    "Creating Vite project with React + TypeScript...",
    "Vite project created successfully!",
    "Failed to create Vite project",
    |status| {
      if ctx.runner.installs() {
        ctx.runner.create_vite(status, parent, name)?;
        status.succeed_and_continue("Vite scaffold created!", "Installing dependencies...");
        ctx.runner.install_all(status, &ctx.project_path)?;
      } else {
        info!("Rendering the bundled base template for '{}'", name);
        ctx.copy_templates("base")?;
      }
      Ok(())
    },
  )
}
