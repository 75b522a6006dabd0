// src/list.rs
use crate::config::Feature;
use crate::error::ScaffoldError;
use crate::features::PIPELINE_ORDER;

pub fn run_list() -> Result<(), ScaffoldError> {
  println!("Available features (setup order):");
  println!("{:<12} | {:<10} | {}", "Name", "Requires", "Description");
  println!("{:-<12}-+-{:-<10}-+-{:-<50}", "", "", ""); // Separator

  for feature in PIPELINE_ORDER {
    println!("{}", feature_row(feature));
  }

  Ok(())
}

fn feature_row(feature: Feature) -> String {
  let requires = feature.requires().map_or("-", Feature::key);
  format!(
    "{:<12} | {:<10} | {}",
    feature.key(),
    requires,
    feature.description()
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rows_show_prerequisites() {
    assert!(feature_row(Feature::Shadcn).starts_with("shadcn       | tailwind   | "));
    assert!(feature_row(Feature::Router).starts_with("router       | -          | "));
  }
}
