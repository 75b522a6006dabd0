// src/features/rtk_query.rs
use log::warn;

use super::{print_hints, run_step, FeatureContext};
use crate::error::ScaffoldError;
use crate::inject;

pub const STORE_FILE: &str = "src/store/store.ts";
const API_IMPORT: &str = "import { apiSlice } from '../services/api';";

const REDUCER_ANCHOR: &str = "counter: counterReducer,";
const REDUCER_ENTRY: &str = "[apiSlice.reducerPath]: apiSlice.reducer,";
const MIDDLEWARE_ANCHOR: &str = "getDefaultMiddleware()";
const MIDDLEWARE_CALL: &str = "getDefaultMiddleware().concat(apiSlice.middleware)";

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  run_step(
    "🌐 Setting up RTK Query...",
    "Creating the API service...",
    "RTK Query configured successfully!",
    "Failed to setup RTK Query",
    |status| {
      ctx.copy_templates("rtk-query")?;
      status.succeed_and_continue("API service created!", "Registering the API in the store...");
      register_api(ctx)
    },
  )?;

  print_hints(
    "RTK Query is ready to use!",
    &[
      "Define endpoints in src/services/api.ts",
      "Generated hooks such as useGetPostsQuery are exported from the same file",
    ],
  );
  Ok(())
}

/// Adds the API slice's reducer and middleware to the store. Running it twice
/// leaves the store unchanged.
fn register_api(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  let store = ctx.path(STORE_FILE);
  inject::add_import(&store, API_IMPORT)?;

  let content = ctx.read(STORE_FILE)?;
  if !content.contains(REDUCER_ENTRY) {
    let replacement = format!("{}\n    {}", REDUCER_ANCHOR, REDUCER_ENTRY);
    if !inject::replace_once(&store, REDUCER_ANCHOR, &replacement)? {
      warn!(
        "'{}' not found in {}; add the API reducer by hand",
        REDUCER_ANCHOR,
        store.display()
      );
    }
  }
  if !content.contains(MIDDLEWARE_CALL)
    && !inject::replace_once(&store, MIDDLEWARE_ANCHOR, MIDDLEWARE_CALL)?
  {
    warn!(
      "'{}' not found in {}; add the API middleware by hand",
      MIDDLEWARE_ANCHOR,
      store.display()
    );
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::path::Path;

  use super::*;
  use crate::config::{Answers, PackageManager};
  use crate::utils::CommandRunner;

  const STORE: &str = "import { configureStore } from '@reduxjs/toolkit';\nimport counterReducer from './counterSlice';\n\nexport const store = configureStore({\n  reducer: {\n    counter: counterReducer,\n  },\n  middleware: (getDefaultMiddleware) => getDefaultMiddleware(),\n});\n";

  #[test]
  fn registers_api_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join(STORE_FILE);
    fs::create_dir_all(store.parent().unwrap()).unwrap();
    fs::write(&store, STORE).unwrap();

    let runner = CommandRunner::new(PackageManager::Npm, false);
    let answers = Answers {
      project_name: "demo".to_string(),
      features: Vec::new(),
    };
    let ctx = FeatureContext::new(dir.path().to_path_buf(), Path::new("templates"), &runner, &answers);

    register_api(&ctx).unwrap();
    let once = fs::read_to_string(&store).unwrap();
    register_api(&ctx).unwrap();
    let twice = fs::read_to_string(&store).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.matches(API_IMPORT).count(), 1);
    assert!(once.contains("    counter: counterReducer,\n    [apiSlice.reducerPath]: apiSlice.reducer,\n"));
    assert!(once.contains("getDefaultMiddleware().concat(apiSlice.middleware)"));
    assert!(!once.contains("concat(apiSlice.middleware).concat"));
  }
}
