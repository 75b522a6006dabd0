// src/features/redux.rs
use super::{print_hints, run_step, FeatureContext};
use crate::error::ScaffoldError;
use crate::inject::WrapDirective;

pub const PROVIDER_IMPORT: &str = "import { Provider } from 'react-redux';";
pub const STORE_IMPORT: &str = "import { store } from './store/store';";

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  run_step(
    "🔄 Setting up Redux Toolkit...",
    "Installing Redux Toolkit dependencies...",
    "Redux Toolkit configured successfully!",
    "Failed to setup Redux Toolkit",
    |status| {
      ctx
        .runner
        .add(status, &ctx.project_path, &["@reduxjs/toolkit", "react-redux"], false)?;
      status.succeed_and_continue("Redux Toolkit dependencies installed!", "Creating the store...");

      ctx.copy_templates("redux")?;
      status.succeed_and_continue("Store created!", "Wrapping the app in <Provider>...");

      let entry = ctx.entry();
      entry.add_import(PROVIDER_IMPORT)?;
      entry.add_import(STORE_IMPORT)?;
      entry.wrap(
        PROVIDER_IMPORT,
        &WrapDirective::new("Provider").with_props("store={store}"),
      )
    },
  )?;

  print_hints(
    "Redux Toolkit is ready to use!",
    &[
      "The store lives in src/store/store.ts",
      "Use useAppDispatch and useAppSelector from src/store/hooks.ts",
      "createAppSlice.ts supports async thunks inside slices",
    ],
  );
  Ok(())
}
