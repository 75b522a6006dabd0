// src/error.rs
use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;

use crate::inject::InjectError;

#[derive(Error, Debug)]
pub enum ScaffoldError {
  #[error("IO Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Could not read '{path}': {source}")]
  FileRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Could not write '{path}': {source}")]
  FileWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to inject into '{path}': {source}")]
  Injection {
    path: PathBuf,
    #[source]
    source: InjectError,
  },

  #[error("Could not read preset '{path}': {source}")]
  PresetRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Could not parse preset '{path}': {source}")]
  PresetParse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("Template directory not found at path: {0}")]
  TemplateNotFound(PathBuf),

  #[error("Failed to create output directory '{path}': {source}")]
  OutputDirCreation {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Error walking template directory '{path}': {source}")]
  WalkDirError {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error(
    "Invalid project name '{0}': only lowercase letters, numbers, hyphens, and underscores are allowed"
  )]
  InvalidProjectName(String),

  #[error("Error during project generation: {0}")]
  GenerationError(String),

  #[error("Command Execution Error for step '{step_name}': {source}")]
  CommandExecError {
    step_name: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("Command for step '{step_name}' failed with status {status}")]
  CommandFailedStatus {
    step_name: String,
    status: ExitStatus,
  },

  #[error("User interaction failed: {0}")]
  DialoguerError(#[from] dialoguer::Error),

  #[error("Could not determine templates directory")]
  CannotDetermineTemplatesDir,
}

impl ScaffoldError {
  pub(crate) fn command_exec_error<E>(step_name: &str, error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ScaffoldError::CommandExecError {
      step_name: step_name.to_string(),
      source: Box::new(error),
    }
  }
}
