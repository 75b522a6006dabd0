// src/inject.rs
//! Text splicing for generated React sources.
//!
//! Feature steps use this module to add an import line to a generated file and
//! wrap the tree that file renders in one more element, without parsing it.
//! The rendered tree (the *anchor*) is found again on every call by trying an
//! ordered list of patterns against the current text, so a file that was
//! already wrapped by an earlier step still matches and the new wrapper lands
//! outside the old one.
//!
//! Calls are read-transform-write transactions on a single file and are not
//! safe to run concurrently against the same file.

use std::fmt;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::ScaffoldError;

/// Which expression of a file gets wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AnchorStyle {
  /// The parenthesised expression of a component's `return ( ... )`.
  Return,
  /// The sole argument of a `.render( ... )` call.
  Render,
}

impl fmt::Display for AnchorStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AnchorStyle::Return => f.write_str("return-statement"),
      AnchorStyle::Render => f.write_str("render-call"),
    }
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
  #[error("no {0} anchor found")]
  AnchorNotFound(AnchorStyle),
}

/// A request to wrap the anchor in one more element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapDirective {
  pub wrapper: String,
  /// Raw attribute text, e.g. `store={store}`.
  pub props: Option<String>,
  pub self_closing: bool,
  /// Replaces the located expression instead of nesting it.
  pub children: Option<String>,
}

impl WrapDirective {
  pub fn new(wrapper: impl Into<String>) -> Self {
    Self {
      wrapper: wrapper.into(),
      ..Self::default()
    }
  }

  pub fn with_props(mut self, props: impl Into<String>) -> Self {
    self.props = Some(props.into());
    self
  }

  pub fn self_closing(mut self, self_closing: bool) -> Self {
    self.self_closing = self_closing;
    self
  }

  pub fn with_children(mut self, children: impl Into<String>) -> Self {
    self.children = Some(children.into());
    self
  }
}

/// The located anchor of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
  /// Byte range that gets replaced.
  pub span: Range<usize>,
  /// Trimmed expression text inside the anchor.
  pub inner: String,
  /// Whether `span` also swallowed the `}` closing the enclosing block.
  pub closes_block: bool,
}

// Group 1 is the expression, group 2 the last token that belongs to the span.
struct AnchorPattern {
  regex: Regex,
  closes_block: bool,
}

impl AnchorPattern {
  fn new(pattern: &str, closes_block: bool) -> Self {
    Self {
      regex: Regex::new(pattern).expect("anchor pattern is valid"),
      closes_block,
    }
  }
}

static IMPORT_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"import\s+.*?from\s+['"].*?['"];?"#).expect("import pattern is valid"));

// Most specific first. Repeated wraps shift whitespace and the shape of the
// closing brace around, so later entries only need the bare call shape.
static RETURN_PATTERNS: Lazy<Vec<AnchorPattern>> = Lazy::new(|| {
  vec![
    AnchorPattern::new(
      r"return\s*\(\s*([\s\S]*?)\s*\)[ \t]*;?[ \t]*\r?\n\s*(\})",
      true,
    ),
    AnchorPattern::new(r"return\s*\(\s*([\s\S]*?)\s*(\))", false),
    AnchorPattern::new(r"return\s+(<[\s\S]*?>)\s*(;)[ \t]*\r?\n\s*\}", false),
  ]
});

static RENDER_PATTERNS: Lazy<Vec<AnchorPattern>> = Lazy::new(|| {
  vec![
    AnchorPattern::new(r"\.render\s*\(\s*([\s\S]*?)\s*(\))\s*;?\s*\z", false),
    AnchorPattern::new(
      r"\.render\s*\(\s*([\s\S]*?)\s*(\))[ \t]*;?[ \t]*\r?\n",
      false,
    ),
    AnchorPattern::new(r"\.render\s*\(\s*([\s\S]*?)\s*(\))", false),
  ]
});

/// Makes sure `import_line` is present once, right after the last
/// `import ... from '...'` statement, or at the top of the file when there is none.
pub fn ensure_import(text: &str, import_line: &str) -> String {
  let line = import_line.trim();
  if text.contains(line) {
    return text.to_string();
  }

  match IMPORT_RE.find_iter(text).last() {
    Some(last) => {
      let at = last.end();
      format!("{}\n{}{}", &text[..at], line, &text[at..])
    }
    None => format!("{}\n{}", line, text),
  }
}

/// Finds the expression to wrap, trying each pattern of `style` in order.
pub fn locate_anchor(text: &str, style: AnchorStyle) -> Result<Anchor, InjectError> {
  let patterns = match style {
    AnchorStyle::Return => &*RETURN_PATTERNS,
    AnchorStyle::Render => &*RENDER_PATTERNS,
  };

  for (i, pattern) in patterns.iter().enumerate() {
    let Some(caps) = pattern.regex.captures(text) else {
      continue;
    };
    let (Some(whole), Some(inner), Some(end)) = (caps.get(0), caps.get(1), caps.get(2)) else {
      continue;
    };
    // A candidate that ran past its own closing paren swallowed trailing code.
    if !balanced_parens(inner.as_str()) {
      trace!("{} anchor pattern #{} overran its call, skipping", style, i + 1);
      continue;
    }
    trace!("{} anchor matched pattern #{}", style, i + 1);
    return Ok(Anchor {
      span: whole.start()..end.end(),
      inner: inner.as_str().trim().to_string(),
      closes_block: pattern.closes_block,
    });
  }

  Err(InjectError::AnchorNotFound(style))
}

fn balanced_parens(expr: &str) -> bool {
  let mut depth = 0usize;
  for c in expr.chars() {
    match c {
      '(' => depth += 1,
      ')' => match depth.checked_sub(1) {
        Some(d) => depth = d,
        None => return false,
      },
      _ => {}
    }
  }
  depth == 0
}

/// Builds the wrapped expression for `inner`.
pub fn apply_wrap(inner: &str, directive: &WrapDirective) -> String {
  let wrapper = &directive.wrapper;
  let props = directive
    .props
    .as_deref()
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .map_or_else(String::new, |p| format!(" {}", p));

  match &directive.children {
    Some(children) => format!(
      "<{wrapper}{props}>\n  {}\n</{wrapper}>",
      children.trim()
    ),
    None if directive.self_closing => format!("<{wrapper}{props} />"),
    None => format!(
      "<{wrapper}{props}>\n  {}\n</{wrapper}>",
      strip_trailing_separators(inner)
    ),
  }
}

// A render argument usually ends with `,` and a returned tree may end with `;`;
// neither is valid once the expression becomes a JSX child.
fn strip_trailing_separators(expr: &str) -> &str {
  expr
    .trim()
    .trim_end_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
}

fn splice(text: &str, anchor: &Anchor, wrapped: &str, style: AnchorStyle) -> String {
  let replacement = match style {
    AnchorStyle::Return if anchor.closes_block => format!("return (\n  {}\n)\n}}", wrapped),
    AnchorStyle::Return => format!("return (\n  {}\n)", wrapped),
    AnchorStyle::Render => format!(".render(\n  {}\n)", wrapped),
  };

  let mut out = String::with_capacity(text.len() + replacement.len());
  out.push_str(&text[..anchor.span.start]);
  out.push_str(&replacement);
  out.push_str(&text[anchor.span.end..]);
  out
}

/// Adds `import_line` and wraps the anchor of `text` in `directive`.
pub fn inject(
  text: &str,
  import_line: &str,
  style: AnchorStyle,
  directive: &WrapDirective,
) -> Result<String, InjectError> {
  let text = ensure_import(text, import_line);
  let anchor = locate_anchor(&text, style)?;
  debug!(
    "Wrapping {} anchor at {:?} in <{}>",
    style, anchor.span, directive.wrapper
  );
  let wrapped = apply_wrap(&anchor.inner, directive);
  Ok(splice(&text, &anchor, &wrapped, style))
}

/// A generated source file together with the anchor style used to edit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
  path: PathBuf,
  style: AnchorStyle,
}

impl TargetFile {
  pub fn new(path: impl Into<PathBuf>, style: AnchorStyle) -> Self {
    Self {
      path: path.into(),
      style,
    }
  }

  /// `src/App.tsx`, edited through its component's return statement.
  pub fn app_root(project_path: &Path) -> Self {
    Self::new(project_path.join("src").join("App.tsx"), AnchorStyle::Return)
  }

  /// `src/main.tsx`, edited through its `createRoot(...).render(...)` call.
  pub fn entry(project_path: &Path) -> Self {
    Self::new(project_path.join("src").join("main.tsx"), AnchorStyle::Render)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn style(&self) -> AnchorStyle {
    self.style
  }

  /// Adds the import and wraps the anchor, rewriting the whole file.
  /// Nothing is written when the anchor cannot be found.
  pub fn wrap(&self, import_line: &str, directive: &WrapDirective) -> Result<(), ScaffoldError> {
    let content = read_source(&self.path)?;
    let updated = inject(&content, import_line, self.style, directive).map_err(|source| {
      ScaffoldError::Injection {
        path: self.path.clone(),
        source,
      }
    })?;
    write_source(&self.path, &updated)?;
    debug!(
      "Wrapped {} in <{}>",
      self.path.display(),
      directive.wrapper
    );
    Ok(())
  }

  pub fn add_import(&self, import_line: &str) -> Result<bool, ScaffoldError> {
    add_import(&self.path, import_line)
  }
}

/// Adds an import line to the file at `path`. Returns whether the file changed.
pub fn add_import(path: &Path, import_line: &str) -> Result<bool, ScaffoldError> {
  let content = read_source(path)?;
  let updated = ensure_import(&content, import_line);
  if updated == content {
    trace!("'{}' already imports `{}`", path.display(), import_line.trim());
    return Ok(false);
  }
  write_source(path, &updated)?;
  Ok(true)
}

/// Replaces the first occurrence of `search`. Returns false, leaving the file
/// untouched, when `search` does not occur.
pub fn replace_once(path: &Path, search: &str, replacement: &str) -> Result<bool, ScaffoldError> {
  let content = read_source(path)?;
  if !content.contains(search) {
    return Ok(false);
  }
  write_source(path, &content.replacen(search, replacement, 1))?;
  Ok(true)
}

fn read_source(path: &Path) -> Result<String, ScaffoldError> {
  fs::read_to_string(path).map_err(|source| ScaffoldError::FileRead {
    path: path.to_path_buf(),
    source,
  })
}

// Whole-file overwrite through a sibling temp file and a rename.
fn write_source(path: &Path, content: &str) -> Result<(), ScaffoldError> {
  let write_err = |source: std::io::Error| ScaffoldError::FileWrite {
    path: path.to_path_buf(),
    source,
  };
  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));

  let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
  tmp.write_all(content.as_bytes()).map_err(write_err)?;
  if let Ok(meta) = fs::metadata(path) {
    tmp
      .as_file()
      .set_permissions(meta.permissions())
      .map_err(write_err)?;
  }
  tmp.persist(path).map_err(|e| write_err(e.error))?;
  Ok(())
}
