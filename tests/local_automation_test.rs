//! End-to-end tests against the directory-backed automation service

use notebook_converter::adapters::automation::{
    AutomationService, CreateFileType, HierarchyScope, LocalAutomation, SchemaVersion,
};
use notebook_converter::adapters::automation::local::SIDECAR_FILE;
use notebook_converter::config::ConverterConfig;
use notebook_converter::core::convert::ConversionCoordinator;
use notebook_converter::core::notebook::Notebook;
use notebook_converter::core::progress::ProgressReporter;
use notebook_converter::domain::ConverterError;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_notebook(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("A.one"), b"alpha pages").unwrap();
    std::fs::write(dir.join("B.one"), b"").unwrap();
    std::fs::write(dir.join("C.one"), b"gamma pages").unwrap();
    std::fs::write(
        dir.join(SIDECAR_FILE),
        r##"{"sections":[{"name":"C","color":"#111111"},{"name":"A","color":"#222222"},{"name":"B"}]}"##,
    )
    .unwrap();
}

fn sidecar_order(dir: &Path) -> Vec<(String, Option<String>)> {
    let contents = std::fs::read_to_string(dir.join(SIDECAR_FILE)).unwrap();
    let sidecar: Value = serde_json::from_str(&contents).unwrap();
    sidecar["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            (
                entry["name"].as_str().unwrap().to_string(),
                entry["color"].as_str().map(str::to_string),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_load_follows_sidecar_order() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Work");
    write_notebook(&dir);
    let mut notebook = Notebook::new(Arc::new(LocalAutomation::new(".one")), &dir);

    notebook.load_hierarchy().await.unwrap();

    let sections = notebook.sections();
    assert_eq!(sections.names(), vec!["C", "A", "B"]);
    assert_eq!(sections.get("C").unwrap().color.as_deref(), Some("#111111"));
    assert!(sections.get("A").unwrap().has_pages);
    assert!(!sections.get("B").unwrap().has_pages);
}

#[tokio::test]
async fn test_convert_current_restores_order_in_destination() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("source");
    let destination = root.path().join("destination");
    write_notebook(&source.join("Work"));
    std::fs::create_dir_all(&destination).unwrap();

    let mut config = ConverterConfig::default();
    config.conversion.source_path = source.display().to_string();
    config.conversion.destination_path = destination.display().to_string();
    config.retry.wait_interval_ms = 1;
    config.retry.max_attempts = 2;
    let coordinator =
        ConversionCoordinator::new(&config, Arc::new(LocalAutomation::new(".one"))).unwrap();
    let mut progress = ProgressReporter::new();

    let summary = coordinator.execute(&mut progress).await.unwrap();

    assert!(summary.is_successful());
    assert_eq!(summary.sections_exported, 2);
    let converted = destination.join("Work");
    assert_eq!(
        std::fs::read(converted.join("A.one")).unwrap(),
        b"alpha pages".to_vec()
    );
    assert_eq!(
        std::fs::read(converted.join("C.one")).unwrap(),
        b"gamma pages".to_vec()
    );
    assert_eq!(
        sidecar_order(&converted),
        vec![
            ("C".to_string(), Some("#111111".to_string())),
            ("A".to_string(), Some("#222222".to_string())),
            ("B".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn test_open_missing_notebook_fails_unless_created() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("Missing");
    let automation = LocalAutomation::new(".one");

    let err = automation
        .open_hierarchy(&missing, CreateFileType::None)
        .await
        .unwrap_err();
    assert!(matches!(err, ConverterError::Automation(_)));

    let id = automation
        .open_hierarchy(&missing, CreateFileType::Notebook)
        .await
        .unwrap();
    assert!(missing.is_dir());

    let again = automation
        .open_hierarchy(&missing, CreateFileType::None)
        .await
        .unwrap();
    assert_eq!(id, again);
}

#[tokio::test]
async fn test_notebook_scope_lists_no_sections() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Work");
    write_notebook(&dir);
    let automation = LocalAutomation::new(".one");
    let id = automation
        .open_hierarchy(&dir, CreateFileType::None)
        .await
        .unwrap();

    let markup = automation
        .get_hierarchy(&id, HierarchyScope::Notebooks, SchemaVersion::V2013)
        .await
        .unwrap();

    assert!(!markup.contains("Section"));
}

#[tokio::test]
async fn test_closed_notebook_is_unknown() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Work");
    write_notebook(&dir);
    let automation = LocalAutomation::new(".one");
    let id = automation
        .open_hierarchy(&dir, CreateFileType::None)
        .await
        .unwrap();

    automation.close_notebook(&id, false).await.unwrap();

    assert!(automation
        .get_hierarchy(&id, HierarchyScope::Pages, SchemaVersion::V2013)
        .await
        .is_err());
    assert!(automation.close_notebook(&id, false).await.is_err());
}
