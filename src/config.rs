// src/config.rs
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ScaffoldError;

pub const DEFAULT_PROJECT_NAME: &str = "my-react-app";
pub const PRESET_FILE_NAME: &str = "preset.yaml";

/// Optional libraries a generated project can be wired with.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
  Tailwind,
  Shadcn,
  Redux,
  RtkQuery,
  Router,
  I18n,
  Forms,
  Header,
}

impl Feature {
  /// Prompt order.
  pub const ALL: [Feature; 8] = [
    Feature::Tailwind,
    Feature::Shadcn,
    Feature::Redux,
    Feature::RtkQuery,
    Feature::Router,
    Feature::I18n,
    Feature::Forms,
    Feature::Header,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Feature::Tailwind => "Tailwind CSS",
      Feature::Shadcn => "Shadcn UI",
      Feature::Redux => "Redux Toolkit",
      Feature::RtkQuery => "RTK Query",
      Feature::Router => "React Router",
      Feature::I18n => "i18next",
      Feature::Forms => "React Hook Form",
      Feature::Header => "Header component",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Feature::Tailwind => "Utility-first CSS through the Tailwind Vite plugin",
      Feature::Shadcn => "Component library generated into src/components/ui",
      Feature::Redux => "Store, typed hooks and a sample counter slice",
      Feature::RtkQuery => "Sample API service registered in the Redux store",
      Feature::Router => "BrowserRouter with Home and About pages",
      Feature::I18n => "English and French translations with language detection",
      Feature::Forms => "Example form validated with arktype",
      Feature::Header => "Navigation header, wired into the layout",
    }
  }

  /// The feature that has to be enabled for this one to be set up.
  pub fn requires(self) -> Option<Feature> {
    match self {
      Feature::Shadcn => Some(Feature::Tailwind),
      Feature::RtkQuery => Some(Feature::Redux),
      _ => None,
    }
  }

  pub fn prompt(self) -> &'static str {
    match self {
      Feature::Tailwind => "Do you want to use Tailwind CSS?",
      Feature::Shadcn => "Do you want to use Shadcn UI? (requires Tailwind)",
      Feature::Redux => "Do you want to use Redux Toolkit?",
      Feature::RtkQuery => "Do you want to use RTK Query? (requires Redux Toolkit)",
      Feature::Router => "Do you want to use React Router?",
      Feature::I18n => "Do you want to use i18next for translations?",
      Feature::Forms => "Do you want to use React Hook Form?",
      Feature::Header => "Do you want to add a Header component?",
    }
  }

  /// Name used on the command line and in presets.
  pub fn key(self) -> &'static str {
    match self {
      Feature::Tailwind => "tailwind",
      Feature::Shadcn => "shadcn",
      Feature::Redux => "redux",
      Feature::RtkQuery => "rtk-query",
      Feature::Router => "router",
      Feature::I18n => "i18n",
      Feature::Forms => "forms",
      Feature::Header => "header",
    }
  }
}

impl fmt::Display for Feature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
  #[default]
  Npm,
  Pnpm,
  Yarn,
  Bun,
}

impl PackageManager {
  pub fn program(self) -> &'static str {
    match self {
      PackageManager::Npm => "npm",
      PackageManager::Pnpm => "pnpm",
      PackageManager::Yarn => "yarn",
      PackageManager::Bun => "bun",
    }
  }

  /// Arguments creating a Vite React + TypeScript project named `name`.
  pub fn create_vite_args(self, name: &str) -> Vec<String> {
    let mut args = vec!["create".to_string()];
    match self {
      PackageManager::Npm => args.extend(["vite@latest".to_string(), name.to_string(), "--".to_string()]),
      _ => args.extend(["vite".to_string(), name.to_string()]),
    }
    args.extend(["--template".to_string(), "react-ts".to_string()]);
    args
  }

  pub fn install_args(self) -> Vec<String> {
    match self {
      PackageManager::Yarn => Vec::new(),
      _ => vec!["install".to_string()],
    }
  }

  pub fn add_args(self, packages: &[&str], dev: bool) -> Vec<String> {
    let mut args = vec![match self {
      PackageManager::Npm => "install".to_string(),
      _ => "add".to_string(),
    }];
    if dev {
      args.push(match self {
        PackageManager::Bun => "-d".to_string(),
        _ => "-D".to_string(),
      });
    }
    args.extend(packages.iter().map(|p| p.to_string()));
    args
  }

  /// Program and leading arguments that run a package binary without installing it.
  pub fn exec_command(self) -> (&'static str, Vec<String>) {
    match self {
      PackageManager::Npm => ("npx", Vec::new()),
      PackageManager::Pnpm => ("pnpm", vec!["dlx".to_string()]),
      PackageManager::Yarn => ("yarn", vec!["dlx".to_string()]),
      PackageManager::Bun => ("bunx", Vec::new()),
    }
  }

  /// How a user runs `tool` by hand, for printed hints.
  pub fn exec_hint(self, tool: &str) -> String {
    let (program, mut args) = self.exec_command();
    args.push(tool.to_string());
    format!("{} {}", program, args.join(" "))
  }

  pub fn dev_command(self) -> String {
    match self {
      PackageManager::Npm => "npm run dev".to_string(),
      other => format!("{} dev", other.program()),
    }
  }
}

/// Saved answers, read from a YAML file.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
  #[serde(default)]
  pub project_name: Option<String>,
  #[serde(default)]
  pub package_manager: Option<PackageManager>,
  /// Missing entries fall back to the built-in default (enabled).
  #[serde(default)]
  pub features: BTreeMap<Feature, bool>,
}

impl Preset {
  pub fn feature_default(&self, feature: Feature) -> bool {
    self.features.get(&feature).copied().unwrap_or(true)
  }
}

/// Everything the generation pipeline needs to know about the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
  pub project_name: String,
  pub features: Vec<Feature>,
}

impl Answers {
  pub fn has(&self, feature: Feature) -> bool {
    self.features.contains(&feature)
  }
}

pub fn default_preset_path() -> Option<PathBuf> {
  ProjectDirs::from("", "", "react-scaffold").map(|dirs| dirs.config_dir().join(PRESET_FILE_NAME))
}

/// Loads the preset named on the command line, or the one in the user's config
/// directory when it exists. An explicit preset has to be readable.
pub fn load_preset(explicit: Option<&Path>) -> Result<Preset, ScaffoldError> {
  if let Some(path) = explicit {
    return read_preset(path);
  }

  match default_preset_path() {
    Some(path) if path.is_file() => {
      debug!("Using preset from {}", path.display());
      read_preset(&path)
    }
    Some(path) => {
      debug!("No preset at {}", path.display());
      Ok(Preset::default())
    }
    None => {
      warn!("Could not determine the user config directory; ignoring presets.");
      Ok(Preset::default())
    }
  }
}

pub(crate) fn read_preset(path: &Path) -> Result<Preset, ScaffoldError> {
  let content = fs::read_to_string(path).map_err(|e| ScaffoldError::PresetRead {
    path: path.to_path_buf(),
    source: e,
  })?;
  parse_preset(&content).map_err(|e| ScaffoldError::PresetParse {
    path: path.to_path_buf(),
    source: e,
  })
}

pub(crate) fn parse_preset(content: &str) -> Result<Preset, serde_yaml::Error> {
  if content.trim().is_empty() {
    return Ok(Preset::default());
  }
  serde_yaml::from_str(content)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_preset() {
    let preset = parse_preset(
      "projectName: shop-front\npackageManager: pnpm\nfeatures:\n  tailwind: true\n  rtk-query: false\n",
    )
    .unwrap();
    assert_eq!(preset.project_name.as_deref(), Some("shop-front"));
    assert_eq!(preset.package_manager, Some(PackageManager::Pnpm));
    assert!(preset.feature_default(Feature::Tailwind));
    assert!(!preset.feature_default(Feature::RtkQuery));
    assert!(preset.feature_default(Feature::Header));
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(parse_preset("projectNmae: typo\n").is_err());
    assert!(parse_preset("features:\n  vue: true\n").is_err());
  }

  #[test]
  fn empty_preset_is_default() {
    assert_eq!(parse_preset("  \n").unwrap(), Preset::default());
  }

  #[test]
  fn explicit_missing_preset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_preset(Some(&dir.path().join("nope.yaml"))).unwrap_err();
    assert!(matches!(err, ScaffoldError::PresetRead { .. }));
  }

  #[test]
  fn package_manager_commands() {
    assert_eq!(
      PackageManager::Npm.create_vite_args("app"),
      ["create", "vite@latest", "app", "--", "--template", "react-ts"]
    );
    assert_eq!(
      PackageManager::Pnpm.create_vite_args("app"),
      ["create", "vite", "app", "--template", "react-ts"]
    );
    assert_eq!(
      PackageManager::Npm.add_args(&["tw-animate-css"], true),
      ["install", "-D", "tw-animate-css"]
    );
    assert_eq!(PackageManager::Yarn.add_args(&["react-router"], false), ["add", "react-router"]);
    assert_eq!(PackageManager::Npm.exec_hint("shadcn@latest"), "npx shadcn@latest");
    assert_eq!(PackageManager::Pnpm.exec_hint("shadcn@latest"), "pnpm dlx shadcn@latest");
  }

  #[test]
  fn prompts_mention_prerequisites() {
    assert_eq!(
      Feature::Shadcn.prompt(),
      "Do you want to use Shadcn UI? (requires Tailwind)"
    );
    assert_eq!(
      Feature::RtkQuery.prompt(),
      "Do you want to use RTK Query? (requires Redux Toolkit)"
    );
    assert_eq!(Feature::Redux.prompt(), "Do you want to use Redux Toolkit?");
  }

  #[test]
  fn translation_prompt_names_its_purpose() {
    assert_eq!(
      Feature::I18n.prompt(),
      "Do you want to use i18next for translations?"
    );
    assert_eq!(Feature::Header.prompt(), "Do you want to add a Header component?");
  }
}
