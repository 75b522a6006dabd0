// src/features/shadcn.rs
use super::{print_hints, run_step, FeatureContext};
use crate::error::ScaffoldError;

const SHADCN: &str = "shadcn@latest";

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  run_step(
    "🎯 Setting up Shadcn UI...",
    "Installing Shadcn UI dependencies...",
    "Shadcn UI configured successfully!",
    "Failed to setup Shadcn UI",
    |status| {
      ctx.runner.add(status, &ctx.project_path, &["lucide-react"], false)?;
      ctx.runner.add(status, &ctx.project_path, &["@types/node"], true)?;
      status.succeed_and_continue("Shadcn UI dependencies installed!", "Configuring path aliases...");

      ctx.copy_templates("shadcn")?;
      status.succeed_and_continue("Path aliases configured!", "Initializing Shadcn UI...");

      ctx.runner.exec(status, &ctx.project_path, SHADCN, &["init"])?;
      // init rewrites the Tailwind config with its own theme.
      ctx.copy_template_file("shadcn", "tailwind.config.js")?;
      status.succeed_and_continue("Shadcn UI initialized!", "Adding the button component...");

      ctx.runner.exec(status, &ctx.project_path, SHADCN, &["add", "button"])?;
      Ok(())
    },
  )?;

  let add_hint = format!(
    "Add more components with: {} add <component>",
    ctx.runner.package_manager().exec_hint(SHADCN)
  );
  print_hints(
    "Shadcn UI is ready to use!",
    &[
      "Components live in src/components/ui",
      "Import them through the @/ alias, e.g. @/components/ui/button",
      add_hint.as_str(),
    ],
  );
  Ok(())
}
