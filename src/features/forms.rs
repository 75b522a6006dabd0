// src/features/forms.rs
use super::{print_hints, run_step, FeatureContext};
use crate::error::ScaffoldError;

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  run_step(
    "📝 Setting up React Hook Form...",
    "Installing form dependencies...",
    "React Hook Form configured successfully!",
    "Failed to setup React Hook Form",
    |status| {
      ctx.runner.add(
        status,
        &ctx.project_path,
        &["react-hook-form", "@hookform/resolvers", "arktype"],
        false,
      )?;
      status.succeed_and_continue("Form dependencies installed!", "Creating the example form...");
      ctx.copy_templates("forms")?;
      Ok(())
    },
  )?;

  print_hints(
    "React Hook Form is ready to use!",
    &["See src/components/ExampleForm.tsx for a form validated with arktype"],
  );
  Ok(())
}
