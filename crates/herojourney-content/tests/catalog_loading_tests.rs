//! Integration tests for loading content documents from disk.

use std::path::PathBuf;

use herojourney_content::application::loader::{load_catalog, load_or_fallback};
use herojourney_content::domain::catalog::FALLBACK_NODE_ID;
use herojourney_content::domain::nodes::DifficultyTier;

fn shipped_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/story_nodes.json")
}

// --- shipped content ---

#[test]
fn test_shipped_catalog_loads_cleanly() {
    let report = load_catalog(&shipped_catalog_path()).unwrap();

    assert!(report.rejected.is_empty(), "rejected: {:?}", report.rejected);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    assert_eq!(report.catalog.len(), 14);
}

#[test]
fn test_shipped_catalog_covers_every_tier() {
    let catalog = load_catalog(&shipped_catalog_path()).unwrap().catalog;

    for tier in DifficultyTier::ALL {
        assert!(
            catalog
                .nodes()
                .any(|node| node.outcomes.iter().any(|o| o.difficulty == tier)),
            "no outcome at {tier:?}"
        );
    }
    assert!(catalog.nodes().any(|node| node.initially_locked));
    assert!(catalog.nodes().any(|node| !node.repeatable));
}

// --- YAML documents ---

#[test]
fn test_yaml_document_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nodes.yml");
    std::fs::write(
        &path,
        r"
nodes:
  - id: well
    title: The Village Well
    category: social
    outcomes:
      - description: Draw water
        difficulty: easy
        effects:
          motivationChange: 1
          statChanges:
            social: 1
          resultText: The water is cold and clear.
  - id: broken
    title: No outcomes here
",
    )
    .unwrap();

    let report = load_catalog(&path).unwrap();
    assert_eq!(report.catalog.len(), 1);
    assert!(report.catalog.contains("well"));
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].id, "broken");
}

// --- fallback ---

#[test]
fn test_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_or_fallback(&dir.path().join("absent.json"));

    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains(FALLBACK_NODE_ID));
}
