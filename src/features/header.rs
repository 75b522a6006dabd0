// src/features/header.rs
//! The Header component adapts to what else was generated: navigation links
//! need the router, the language switcher needs i18next, and the switcher is a
//! Shadcn `Select` when Shadcn is set up too.

use log::warn;

use super::{print_hints, run_step, FeatureContext};
use crate::config::Feature;
use crate::error::ScaffoldError;
use crate::inject::{self, WrapDirective};
use crate::utils;

pub const HEADER_FILE: &str = "src/components/Layout/Header.tsx";
pub const PUBLIC_LAYOUT_FILE: &str = "src/components/Layout/PublicLayout.tsx";
pub const APP_LAYOUT_IMPORT: &str = "import AppLayout from './components/Layout/AppLayout';";
const HEADER_IMPORT: &str = "import Header from './Header';";
/// Root element of the router's PublicLayout; the Header goes right inside it.
pub const LAYOUT_ROOT: &str = "<div className=\"h-screen overflow-x-hidden flex flex-col\">";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderOptions {
  pub router: bool,
  pub i18n: bool,
  pub shadcn: bool,
}

impl HeaderOptions {
  fn from_context(ctx: &FeatureContext) -> Self {
    Self {
      router: ctx.enabled(Feature::Router),
      i18n: ctx.enabled(Feature::I18n),
      shadcn: ctx.enabled(Feature::Shadcn),
    }
  }
}

pub fn setup(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  let options = HeaderOptions::from_context(ctx);
  let title = ctx
    .substitutions
    .get(utils::PROJECT_TITLE_PLACEHOLDER)
    .cloned()
    .unwrap_or_else(|| ctx.answers.project_name.clone());

  run_step(
    "🧩 Setting up the Header component...",
    "Creating the Header component...",
    "Header component configured successfully!",
    "Failed to setup the Header component",
    |status| {
      if options.shadcn && options.i18n {
        status.set_message("Adding the Shadcn select component...");
        ctx
          .runner
          .exec(status, &ctx.project_path, "shadcn@latest", &["add", "select"])?;
      }
      utils::write_file(&ctx.path(HEADER_FILE), &render_header(options, &title))?;
      status.succeed_and_continue("Header component created!", "Adding the Header to the layout...");

      if options.router {
        insert_into_public_layout(ctx)
      } else {
        ctx.copy_templates("layout")?;
        ctx
          .app_root()
          .wrap(APP_LAYOUT_IMPORT, &WrapDirective::new("AppLayout"))
      }
    },
  )?;

  let layout_hint = if options.router {
    "The Header is rendered by src/components/Layout/PublicLayout.tsx"
  } else {
    "The Header is rendered by src/components/Layout/AppLayout.tsx"
  };
  print_hints(
    "Header component is ready to use!",
    &["Edit src/components/Layout/Header.tsx to change the navigation", layout_hint],
  );
  Ok(())
}

fn insert_into_public_layout(ctx: &FeatureContext) -> Result<(), ScaffoldError> {
  let layout = ctx.path(PUBLIC_LAYOUT_FILE);
  if !layout.is_file() {
    warn!(
      "{} not found; render <Header /> in your layout by hand",
      layout.display()
    );
    return Ok(());
  }

  inject::add_import(&layout, HEADER_IMPORT)?;
  if ctx.read(PUBLIC_LAYOUT_FILE)?.contains("<Header") {
    return Ok(());
  }
  let replacement = format!("{}\n        <Header />", LAYOUT_ROOT);
  if !inject::replace_once(&layout, LAYOUT_ROOT, &replacement)? {
    warn!(
      "Layout root element not found in {}; render <Header /> by hand",
      layout.display()
    );
  }
  Ok(())
}

pub fn render_header(options: HeaderOptions, title: &str) -> String {
  let mut out = String::new();

  if options.router {
    out.push_str("import { Link, useLocation } from 'react-router';\n");
  }
  if options.i18n {
    out.push_str("import { useTranslation } from 'react-i18next';\n");
    if options.shadcn {
      out.push_str(
        "import {\n  Select,\n  SelectContent,\n  SelectItem,\n  SelectTrigger,\n  SelectValue,\n} from '@/components/ui/select';\n",
      );
    }
  }
  if !out.is_empty() {
    out.push('\n');
  }

  out.push_str("const Header = () => {\n");
  if options.router {
    out.push_str("  const { pathname } = useLocation();\n");
  }
  if options.i18n {
    out.push_str("  const { t, i18n } = useTranslation();\n");
  }
  if options.router {
    let (home, about) = if options.i18n {
      ("t('home')", "t('about')")
    } else {
      ("'Home'", "'About'")
    };
    out.push_str(&format!(
      "\n  const navItems = [\n    {{ href: '/', label: {home} }},\n    {{ href: '/about', label: {about} }},\n  ];\n"
    ));
  }
  if options.router || options.i18n {
    out.push('\n');
  }

  out.push_str("  return (\n");
  out.push_str("    <header className=\"sticky top-0 z-50 h-16 border-b bg-white/95 backdrop-blur\">\n");
  out.push_str("      <div className=\"mx-auto flex h-16 items-center justify-between px-4 xl:px-20\">\n");
  out.push_str("        <div className=\"flex items-center space-x-6\">\n");
  if options.router {
    out.push_str(&format!(
      "          <Link to=\"/\" className=\"text-lg font-semibold\">\n            {title}\n          </Link>\n"
    ));
    out.push_str(NAV_LINKS);
  } else {
    out.push_str(&format!(
      "          <span className=\"text-lg font-semibold\">{title}</span>\n"
    ));
  }
  out.push_str("        </div>\n");
  if options.i18n {
    out.push_str(if options.shadcn {
      LANGUAGE_SELECT_SHADCN
    } else {
      LANGUAGE_SELECT_NATIVE
    });
  }
  out.push_str("      </div>\n");
  out.push_str("    </header>\n");
  out.push_str("  );\n};\n\nexport default Header;\n");
  out
}

const NAV_LINKS: &str = r#"          <nav className="flex items-center space-x-4 text-sm">
            {navItems.map((item) => (
              <Link
                key={item.href}
                to={item.href}
                className={pathname === item.href ? 'font-medium' : 'text-gray-500 hover:text-gray-900'}
              >
                {item.label}
              </Link>
            ))}
          </nav>
"#;

const LANGUAGE_SELECT_SHADCN: &str = r#"        <Select value={i18n.language} onValueChange={(lang) => i18n.changeLanguage(lang)}>
          <SelectTrigger className="w-32" aria-label={t('language')}>
            <SelectValue placeholder={t('language')} />
          </SelectTrigger>
          <SelectContent>
            <SelectItem value="en">English</SelectItem>
            <SelectItem value="fr">Français</SelectItem>
          </SelectContent>
        </Select>
"#;

const LANGUAGE_SELECT_NATIVE: &str = r#"        <label className="flex items-center space-x-2 text-sm">
          <span>{t('language')}</span>
          <select
            className="rounded border px-2 py-1"
            value={i18n.language}
            onChange={(event) => i18n.changeLanguage(event.target.value)}
          >
            <option value="en">English</option>
            <option value="fr">Français</option>
          </select>
        </label>
"#;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_header_has_no_optional_imports() {
    let header = render_header(
      HeaderOptions {
        router: false,
        i18n: false,
        shadcn: false,
      },
      "My React App",
    );
    assert!(header.starts_with("const Header = () => {\n  return (\n"));
    assert!(header.contains("<span className=\"text-lg font-semibold\">My React App</span>"));
    assert!(!header.contains("navItems"));
    assert!(header.ends_with("export default Header;\n"));
  }

  #[test]
  fn full_header_uses_router_translations_and_select() {
    let header = render_header(
      HeaderOptions {
        router: true,
        i18n: true,
        shadcn: true,
      },
      "Demo",
    );
    assert!(header.starts_with("import { Link, useLocation } from 'react-router';\n"));
    assert!(header.contains("from '@/components/ui/select';"));
    assert!(header.contains("{ href: '/about', label: t('about') },"));
    assert!(header.contains("<SelectItem value=\"fr\">"));
    assert!(!header.contains("<select"));
  }

  #[test]
  fn i18n_without_shadcn_uses_native_select() {
    let header = render_header(
      HeaderOptions {
        router: true,
        i18n: true,
        shadcn: false,
      },
      "Demo",
    );
    assert!(!header.contains("@/components/ui/select"));
    assert!(header.contains("onChange={(event) => i18n.changeLanguage(event.target.value)}"));
  }
}
