// src/features/i18n.rs
use super::{print_hints, run_step, FeatureContext};
use crate::error::ScaffoldError;

pub const I18N_IMPORT: &str = "import './i18n';";

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  run_step(
    "🌍 Setting up i18next...",
    "Installing i18next dependencies...",
    "i18next configured successfully!",
    "Failed to setup i18next",
    |status| {
      ctx.runner.add(
        status,
        &ctx.project_path,
        &["i18next", "react-i18next", "i18next-browser-languagedetector"],
        false,
      )?;
      status.succeed_and_continue("i18next dependencies installed!", "Creating translations...");

      ctx.copy_templates("i18n")?;
      ctx.entry().add_import(I18N_IMPORT)?;
      Ok(())
    },
  )?;

  print_hints(
    "i18next is ready to use!",
    &[
      "Translations live in src/assets/languages/<lang>/global.json",
      "Use const { t } = useTranslation() in components",
    ],
  );
  Ok(())
}
