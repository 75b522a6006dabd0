// src/features/tailwind.rs
use super::{print_hints, run_step, FeatureContext};
use crate::error::ScaffoldError;

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  run_step(
    "🎨 Setting up Tailwind CSS...",
    "Installing Tailwind CSS dependencies...",
    "Tailwind CSS configured successfully!",
    "Failed to setup Tailwind CSS",
    |status| {
      ctx
        .runner
        .add(status, &ctx.project_path, &["tailwindcss", "@tailwindcss/vite"], false)?;
      ctx.runner.add(status, &ctx.project_path, &["tw-animate-css"], true)?;
      status.succeed_and_continue(
        "Tailwind CSS dependencies installed!",
        "Creating Tailwind configuration...",
      );
      ctx.copy_templates("tailwind")?;
      Ok(())
    },
  )?;

  print_hints(
    "Tailwind CSS is ready to use!",
    &[
      "The Tailwind Vite plugin is registered in vite.config.ts",
      "src/index.css imports tailwindcss",
    ],
  );
  Ok(())
}
