// src/features/router.rs
use super::{print_hints, run_step, FeatureContext};
use crate::config::Feature;
use crate::error::ScaffoldError;
use crate::inject::WrapDirective;
use crate::utils;

pub const ROUTER_IMPORT: &str = "import { BrowserRouter as Router } from 'react-router';";

struct Page {
  component: &'static str,
  file: &'static str,
  message_key: &'static str,
  fallback: &'static str,
}

const PAGES: [Page; 2] = [
  Page {
    component: "Home",
    file: "src/pages/Home.tsx",
    message_key: "home_message",
    fallback: "Welcome to the home page!",
  },
  Page {
    component: "About",
    file: "src/pages/About.tsx",
    message_key: "about_message",
    fallback: "This is the about page.",
  },
];

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  let with_i18n = ctx.enabled(Feature::I18n);
  run_step(
    "🧭 Setting up React Router...",
    "Installing React Router...",
    "React Router configured successfully!",
    "Failed to setup React Router",
    |status| {
      ctx.runner.add(status, &ctx.project_path, &["react-router"], false)?;
      status.succeed_and_continue("React Router installed!", "Creating pages and layout...");

      for page in &PAGES {
        utils::write_file(&ctx.path(page.file), &render_page(page, with_i18n))?;
      }
      ctx.copy_templates("router")?;
      status.succeed_and_continue("Pages created!", "Wrapping the app in <Router>...");

      ctx.entry().wrap(ROUTER_IMPORT, &WrapDirective::new("Router"))
    },
  )?;

  print_hints(
    "React Router is ready to use!",
    &[
      "Routes are declared in src/App.tsx",
      "Pages live in src/pages, the shared layout in src/components/Layout",
    ],
  );
  Ok(())
}

fn render_page(page: &Page, with_i18n: bool) -> String {
  let (import, hook, message) = if with_i18n {
    (
      "import { useTranslation } from 'react-i18next';\n\n",
      "  const { t } = useTranslation();\n\n",
      format!("{{t('{}')}}", page.message_key),
    )
  } else {
    ("", "", page.fallback.to_string())
  };
  format!(
    "{import}export default function {component}() {{\n{hook}  return (\n    <div className=\"flex justify-center\">\n      <p>{message}</p>\n    </div>\n  );\n}}\n",
    component = page.component,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pages_use_translations_when_available() {
    let home = render_page(&PAGES[0], true);
    assert!(home.starts_with("import { useTranslation } from 'react-i18next';"));
    assert!(home.contains("<p>{t('home_message')}</p>"));

    let about = render_page(&PAGES[1], false);
    assert!(!about.contains("useTranslation"));
    assert!(about.contains("export default function About() {\n  return (\n"));
    assert!(about.contains("<p>This is the about page.</p>"));
  }
}
