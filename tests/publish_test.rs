//! Integration tests for section export and destination reordering

mod common;

use common::{fast_retry, notebook_markup, section, FakeAutomation};
use notebook_converter::adapters::automation::PublishFormat;
use notebook_converter::core::notebook::Notebook;
use notebook_converter::core::progress::{ProgressEvent, ProgressReporter};
use notebook_converter::core::publish::Publisher;
use notebook_converter::domain::ConverterError;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    source: PathBuf,
    destination: PathBuf,
    fake: Arc<FakeAutomation>,
}

/// Source notebook with sections A, B, C (coloured) and an empty one
fn fixture(destination_sections: &[common::SectionFixture]) -> Fixture {
    let root = TempDir::new().unwrap();
    let source = root.path().join("source").join("Work");
    let destination = root.path().join("destination").join("Work");
    std::fs::create_dir_all(&source).unwrap();

    let fake = Arc::new(FakeAutomation::new());
    fake.script(
        &source,
        "nb-src",
        vec![notebook_markup(
            "nb-src",
            &[
                section("A", "src-a").color("#FF0000"),
                section("B", "src-b").color("#00FF00"),
                section("C", "src-c").color("#0000FF"),
                section("Empty", "src-e").empty(),
            ],
        )],
    );
    fake.script(
        &destination,
        "nb-dest",
        vec![notebook_markup("nb-dest", destination_sections)],
    );

    Fixture {
        _root: root,
        source,
        destination,
        fake,
    }
}

fn reordered_destination() -> Vec<common::SectionFixture> {
    vec![section("B", "id2"), section("A", "id1"), section("C", "id3")]
}

fn messages(events: &mut tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>) -> Vec<String> {
    std::iter::from_fn(|| events.try_recv().ok())
        .filter_map(|event| match event {
            ProgressEvent::Step { message, .. } => Some(message),
            ProgressEvent::Finished { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn test_publish_current_exports_non_empty_sections_once() {
    let f = fixture(&reordered_destination());
    let publisher = Publisher::new(f.fake.clone()).with_retry_policy(fast_retry(3));
    let mut notebook = Notebook::new(f.fake.clone(), &f.source).with_retry_policy(fast_retry(3));
    let mut progress = ProgressReporter::new();
    let mut events = progress.subscribe();

    let report = publisher
        .publish_current(&mut notebook, &f.destination, &mut progress)
        .await
        .unwrap();

    assert_eq!(report.exported, 3);
    assert_eq!(report.skipped, 1);
    assert!(report.reordered);

    let published = f.fake.published();
    assert_eq!(published.len(), 3);
    for (name, (section, destination, format)) in ["A", "B", "C"].iter().zip(&published) {
        assert_eq!(section, &format!("src-{}", name.to_lowercase()));
        assert_eq!(destination, &f.destination.join(format!("{name}.one")));
        assert_eq!(*format, PublishFormat::Current);
    }

    assert_eq!(
        messages(&mut events),
        vec![
            "Loading notebook",
            "Loading sections and pages",
            "Starting exporting",
            "Starting converting section 'A'",
            "Starting converting section 'B'",
            "Starting converting section 'C'",
            "Skipping empty section 'Empty'",
            "Ordering sections",
        ]
    );
    assert_eq!(progress.current(), 8);
    assert_eq!(progress.total(), 8);
}

#[tokio::test]
async fn test_publish_current_restores_source_order_and_colours() {
    let f = fixture(&reordered_destination());
    let publisher = Publisher::new(f.fake.clone()).with_retry_policy(fast_retry(3));
    let mut notebook = Notebook::new(f.fake.clone(), &f.source).with_retry_policy(fast_retry(3));
    let mut progress = ProgressReporter::new();

    publisher
        .publish(&mut notebook, &f.destination, PublishFormat::Current, &mut progress)
        .await
        .unwrap();

    let updates = f.fake.updates();
    assert_eq!(updates.len(), 1);
    let markup = &updates[0];
    assert!(markup.contains("ID=\"nb-dest\""));

    let a = markup
        .find(r##"<one:Section name="A" ID="id1" color="#FF0000" />"##)
        .unwrap();
    let b = markup
        .find(r##"<one:Section name="B" ID="id2" color="#00FF00" />"##)
        .unwrap();
    let c = markup
        .find(r##"<one:Section name="C" ID="id3" color="#0000FF" />"##)
        .unwrap();
    let empty = markup.find(r#"<one:Section name="Empty" />"#).unwrap();
    assert!(a < b && b < c && c < empty, "{markup}");

    assert_eq!(f.fake.closed(), vec!["nb-dest".to_string()]);
}

#[tokio::test]
async fn test_publish_legacy_skips_reordering() {
    let f = fixture(&reordered_destination());
    let publisher = Publisher::new(f.fake.clone()).with_retry_policy(fast_retry(3));
    let mut notebook = Notebook::new(f.fake.clone(), &f.source).with_retry_policy(fast_retry(3));
    let mut progress = ProgressReporter::new();

    let report = publisher
        .publish_legacy(&mut notebook, &f.destination, &mut progress)
        .await
        .unwrap();

    assert!(!report.reordered);
    assert!(f.fake.updates().is_empty());
    assert!(f
        .fake
        .published()
        .iter()
        .all(|(_, _, format)| *format == PublishFormat::Legacy));
    assert_eq!(progress.total(), 7);
    assert!(!f.fake.calls().contains(&common::Call::Open(f.destination.clone())));
}

#[tokio::test]
async fn test_unknown_destination_section_fails_and_closes_destination() {
    let mut destination = reordered_destination();
    destination.push(section("Stray", "id9"));
    let f = fixture(&destination);
    let publisher = Publisher::new(f.fake.clone()).with_retry_policy(fast_retry(3));
    let mut notebook = Notebook::new(f.fake.clone(), &f.source).with_retry_policy(fast_retry(3));
    let mut progress = ProgressReporter::new();

    let err = publisher
        .publish_current(&mut notebook, &f.destination, &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConverterError::ReconciliationMismatch { ref section } if section == "Stray"
    ));
    assert!(!err.is_recoverable());
    assert!(f.fake.updates().is_empty());
    assert_eq!(f.fake.closed(), vec!["nb-dest".to_string()]);
}

#[tokio::test]
async fn test_dry_run_exports_nothing() {
    let f = fixture(&reordered_destination());
    let publisher = Publisher::new(f.fake.clone())
        .with_retry_policy(fast_retry(3))
        .with_dry_run(true);
    let mut notebook = Notebook::new(f.fake.clone(), &f.source).with_retry_policy(fast_retry(3));
    let mut progress = ProgressReporter::new();

    let report = publisher
        .publish_current(&mut notebook, &f.destination, &mut progress)
        .await
        .unwrap();

    assert_eq!(report.exported, 0);
    assert!(!report.reordered);
    assert!(f.fake.published().is_empty());
    assert!(f.fake.updates().is_empty());
    assert!(!f.destination.exists());
    assert_eq!(progress.current(), 8);
}
