use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use duct::cmd;
use heck::ToTitleCase;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::config::PackageManager;
use crate::error::ScaffoldError;

pub const PROJECT_NAME_PLACEHOLDER: &str = "__PROJECT_NAME__";
pub const PROJECT_TITLE_PLACEHOLDER: &str = "__PROJECT_TITLE__";

/// Placeholder -> value map used when rendering template files.
pub fn compute_substitutions(project_name: &str) -> HashMap<String, String> {
  let mut substitutions = HashMap::new();
  substitutions.insert(
    PROJECT_NAME_PLACEHOLDER.to_string(),
    project_name.to_string(),
  );
  substitutions.insert(
    PROJECT_TITLE_PLACEHOLDER.to_string(),
    project_name.to_title_case(),
  );
  substitutions
}

/// Performs simple string replacement of every placeholder.
pub fn substitute_content(content: &str, substitutions: &HashMap<String, String>) -> String {
  let mut current_content = content.to_string();
  for (placeholder, value) in substitutions {
    current_content = current_content.replace(placeholder, value);
  }
  current_content
}

/// Copies a template tree into `output_path`, substituting placeholders in every
/// file. Existing files are overwritten.
pub fn copy_template_dir(
  template_path: &Path,
  output_path: &Path,
  substitutions: &HashMap<String, String>,
) -> Result<Vec<PathBuf>, ScaffoldError> {
  if !template_path.is_dir() {
    return Err(ScaffoldError::TemplateNotFound(template_path.to_path_buf()));
  }
  debug!(
    "Copying template from {} to {}",
    template_path.display(),
    output_path.display()
  );

  let mut written = Vec::new();
  for entry_result in WalkDir::new(template_path).sort_by_file_name() {
    let entry = entry_result.map_err(|e| ScaffoldError::WalkDirError {
      path: template_path.to_path_buf(),
      source: e,
    })?;
    let current_path = entry.path();

    let relative_path = match current_path.strip_prefix(template_path) {
      Ok(p) if p.as_os_str().is_empty() => continue,
      Ok(p) => p,
      Err(e) => {
        warn!(
          "Failed to strip prefix {} from {}: {}. Skipping.",
          template_path.display(),
          current_path.display(),
          e
        );
        continue;
      }
    };
    let output_entry_path = output_path.join(relative_path);

    if entry.file_type().is_dir() {
      trace!("Creating directory: {}", output_entry_path.display());
      fs::create_dir_all(&output_entry_path).map_err(|e| ScaffoldError::OutputDirCreation {
        path: output_entry_path.clone(),
        source: e,
      })?;
    } else if entry.file_type().is_file() {
      let content = fs::read_to_string(current_path).map_err(|e| ScaffoldError::FileRead {
        path: current_path.to_path_buf(),
        source: e,
      })?;
      write_file(
        &output_entry_path,
        &substitute_content(&content, substitutions),
      )?;
      written.push(relative_path.to_path_buf());
    } else {
      debug!(
        "Skipping non-file/non-directory entry: {}",
        current_path.display()
      );
    }
  }

  Ok(written)
}

/// Writes `content`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), ScaffoldError> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      trace!("Creating parent directory for file: {}", parent.display());
      fs::create_dir_all(parent).map_err(|e| ScaffoldError::OutputDirCreation {
        path: parent.to_path_buf(),
        source: e,
      })?;
    }
  }
  trace!("Writing file: {}", path.display());
  fs::write(path, content).map_err(|e| ScaffoldError::FileWrite {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Spinner with success and failure markers for one pipeline step.
pub struct Status {
  pb: ProgressBar,
}

impl Status {
  pub fn start(message: impl Into<String>) -> Self {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
      ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .expect("Failed to set spinner style"),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(message.into());
    Self { pb }
  }

  pub fn set_message(&self, message: impl Into<String>) {
    self.pb.set_message(message.into());
  }

  /// Hides the spinner while `f` runs, so child processes own the terminal.
  pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
    self.pb.suspend(f)
  }

  pub fn succeed(&self, message: &str) {
    self.pb.finish_and_clear();
    println!("{} {}", style("✔").green(), style(message).green());
  }

  /// Marks the step as done and keeps the spinner for a follow-up phase.
  pub fn succeed_and_continue(&self, message: &str, next: impl Into<String>) {
    self
      .pb
      .suspend(|| println!("{} {}", style("✔").green(), style(message).green()));
    self.pb.set_message(next.into());
  }

  pub fn fail(&self, message: &str) {
    self.pb.finish_and_clear();
    eprintln!("{} {}", style("✖").red(), style(message).red());
  }
}

/// Runs package-manager and generator commands for one project.
#[derive(Debug, Clone)]
pub struct CommandRunner {
  package_manager: PackageManager,
  /// When false every command is logged and skipped.
  install: bool,
}

impl CommandRunner {
  pub fn new(package_manager: PackageManager, install: bool) -> Self {
    Self {
      package_manager,
      install,
    }
  }

  pub fn package_manager(&self) -> PackageManager {
    self.package_manager
  }

  pub fn installs(&self) -> bool {
    self.install
  }

  pub fn add(
    &self,
    status: &Status,
    cwd: &Path,
    packages: &[&str],
    dev: bool,
  ) -> Result<(), ScaffoldError> {
    let args = self.package_manager.add_args(packages, dev);
    let step_name = format!("install {}", packages.join(" "));
    self.run(status, &step_name, self.package_manager.program(), &args, cwd, &[])
  }

  pub fn install_all(&self, status: &Status, cwd: &Path) -> Result<(), ScaffoldError> {
    let args = self.package_manager.install_args();
    self.run(status, "install", self.package_manager.program(), &args, cwd, &[])
  }

  pub fn create_vite(&self, status: &Status, parent: &Path, name: &str) -> Result<(), ScaffoldError> {
    let args = self.package_manager.create_vite_args(name);
    self.run(
      status,
      "create vite project",
      self.package_manager.program(),
      &args,
      parent,
      &[("CI", "true")],
    )
  }

  /// Runs a package binary, e.g. `shadcn@latest init`.
  pub fn exec(
    &self,
    status: &Status,
    cwd: &Path,
    tool: &str,
    tool_args: &[&str],
  ) -> Result<(), ScaffoldError> {
    let (program, mut args) = self.package_manager.exec_command();
    args.push(tool.to_string());
    args.extend(tool_args.iter().map(|a| a.to_string()));
    let step_name = format!("{} {}", tool, tool_args.join(" "));
    self.run(status, step_name.trim(), program, &args, cwd, &[])
  }

  /// Runs a command with inherited standard streams. A non-zero exit is an error.
  pub fn run(
    &self,
    status: &Status,
    step_name: &str,
    program: &str,
    args: &[String],
    cwd: &Path,
    env: &[(&str, &str)],
  ) -> Result<(), ScaffoldError> {
    let command_line = format!("{} {}", program, args.join(" "));
    if !self.install {
      info!("Skipping `{}` (installation disabled)", command_line);
      return Ok(());
    }

    info!(
      "Executing step '{}': `{}` in {}",
      step_name,
      command_line,
      cwd.display()
    );

    let mut expression = cmd(program, args).dir(cwd).unchecked();
    for &(key, value) in env {
      expression = expression.env(key, value);
    }

    let output = status.suspend(|| expression.run()).map_err(|e| {
      if e.kind() == ErrorKind::NotFound {
        ScaffoldError::CommandExecError {
          step_name: step_name.to_string(),
          source: format!("'{}' was not found on PATH", program).into(),
        }
      } else {
        ScaffoldError::command_exec_error(step_name, e)
      }
    })?;

    if !output.status.success() {
      return Err(ScaffoldError::CommandFailedStatus {
        step_name: step_name.to_string(),
        status: output.status,
      });
    }
    debug!("Step '{}' finished. Status: {:?}", step_name, output.status);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn substitutions_include_title_case() {
    let subs = compute_substitutions("shop-front_v2");
    assert_eq!(subs[PROJECT_NAME_PLACEHOLDER], "shop-front_v2");
    assert_eq!(subs[PROJECT_TITLE_PLACEHOLDER], "Shop Front V2");
    assert_eq!(
      substitute_content("<title>__PROJECT_TITLE__</title> __PROJECT_NAME__", &subs),
      "<title>Shop Front V2</title> shop-front_v2"
    );
  }

  #[test]
  fn copies_nested_template_tree() {
    let template = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::create_dir_all(template.path().join("src/store")).unwrap();
    fs::write(template.path().join("src/store/store.ts"), "// __PROJECT_NAME__\n").unwrap();
    fs::write(template.path().join("index.html"), "<title>__PROJECT_TITLE__</title>").unwrap();

    let written =
      copy_template_dir(template.path(), output.path(), &compute_substitutions("demo")).unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(
      fs::read_to_string(output.path().join("src/store/store.ts")).unwrap(),
      "// demo\n"
    );
    assert_eq!(
      fs::read_to_string(output.path().join("index.html")).unwrap(),
      "<title>Demo</title>"
    );
  }

  #[test]
  fn missing_template_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = copy_template_dir(&dir.path().join("nope"), dir.path(), &HashMap::new()).unwrap_err();
    assert!(matches!(err, ScaffoldError::TemplateNotFound(_)));
  }

  #[test]
  fn write_file_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a/b/c.txt");
    write_file(&path, "x").unwrap();
    write_file(&path, "y").unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "y");
  }

  #[test]
  fn runner_without_install_skips_commands() {
    let runner = CommandRunner::new(PackageManager::Npm, false);
    let status = Status::start("testing");
    let missing = Path::new("/definitely/not/a/dir");
    runner
      .run(&status, "noop", "definitely-not-a-program", &[], missing, &[])
      .unwrap();
    status.succeed("done");
  }

  #[cfg(unix)]
  #[test]
  fn runner_reports_non_zero_exit() {
    let runner = CommandRunner::new(PackageManager::Npm, true);
    let status = Status::start("testing");
    let dir = tempfile::tempdir().unwrap();
    let err = runner
      .run(&status, "fail", "sh", &["-c".to_string(), "exit 3".to_string()], dir.path(), &[])
      .unwrap_err();
    status.fail("failed");
    match err {
      ScaffoldError::CommandFailedStatus { step_name, status } => {
        assert_eq!(step_name, "fail");
        assert_eq!(status.code(), Some(3));
      }
      other => panic!("unexpected error: {other}"),
    }
  }
}
