//! Logical/physical File records and their content.

mod common;

use common::{iri, TestHarness};
use semjobs::rdf::Term;
use semjobs::VOCAB;

#[tokio::test]
async fn test_create_file_writes_both_records() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;

    let created = files
        .create_file("/share/", "pdf", 1024, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();

    assert_ne!(created.logical_file, created.physical_file);
    assert!(created.physical_file.as_str().starts_with("share://"));
    assert!(created.physical_file_path.starts_with("/share/"));
    assert!(created.physical_file_path.ends_with(".pdf"));

    for file in [&created.logical_file, &created.physical_file] {
        let facts = harness.store.describe(file).await;
        assert!(!facts.is_empty());
        assert!(facts.iter().all(|q| q.graph == harness.data_graph));
        assert_eq!(
            harness.objects(file, &VOCAB.format).await,
            vec![Term::string("application/pdf")]
        );
        assert_eq!(
            harness.objects(file, &VOCAB.file_size).await,
            vec![Term::integer(1024u64)]
        );
    }
    assert_eq!(
        harness.objects(&created.physical_file, &VOCAB.data_source).await,
        vec![Term::Iri(created.logical_file.clone())]
    );
    assert_eq!(
        files.find_physical_file(&created.logical_file).await.unwrap(),
        Some(created.physical_file.clone())
    );
}

#[tokio::test]
async fn test_consecutive_files_get_distinct_ids() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;
    let a = files
        .create_file("/share/", "ttl", 1, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();
    let b = files
        .create_file("/share/", "ttl", 1, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();

    assert_ne!(a.logical_file, b.logical_file);
    assert_ne!(a.physical_file, b.physical_file);
    assert_ne!(a.physical_file_path, b.physical_file_path);
}

#[tokio::test]
async fn test_update_file_replaces_size_on_both_records() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;
    let created = files
        .create_file("/share/", "html", 10, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();

    files.update_file(&created.logical_file, 2048).await.unwrap();

    for file in [&created.logical_file, &created.physical_file] {
        assert_eq!(
            harness.objects(file, &VOCAB.file_size).await,
            vec![Term::integer(2048u64)]
        );
        assert_eq!(harness.objects(file, &VOCAB.modified).await.len(), 1);
    }
}

#[tokio::test]
async fn test_update_and_remove_of_unknown_file_are_silent() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;
    let created = files
        .create_file("/share/", "pdf", 10, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();
    let before = harness.store.len().await;

    files.update_file(&iri("files/unknown"), 5).await.unwrap();
    files.remove_file(&iri("files/unknown")).await.unwrap();

    assert_eq!(harness.store.len().await, before);
    assert!(!harness.store.describe(&created.logical_file).await.is_empty());
}

#[tokio::test]
async fn test_remove_file_drops_both_records() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;
    let kept = files
        .create_file("/share/", "pdf", 10, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();
    let removed = files
        .create_file("/share/", "pdf", 10, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();

    files.remove_file(&removed.logical_file).await.unwrap();

    assert!(harness.store.describe(&removed.logical_file).await.is_empty());
    assert!(harness.store.describe(&removed.physical_file).await.is_empty());
    assert!(!harness.store.describe(&kept.logical_file).await.is_empty());
    assert!(!harness.store.describe(&kept.physical_file).await.is_empty());
}

#[tokio::test]
async fn test_remove_file_with_content_deletes_bytes() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;
    let created = files
        .create_file("/share/", "txt", 5, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();
    let on_disk = harness.write_content(&created.physical_file_path, b"hello");
    assert!(on_disk.exists());

    files
        .remove_file_with_content(&created.logical_file, &harness.content_store())
        .await
        .unwrap();

    assert!(!on_disk.exists());
    assert!(harness.store.describe(&created.logical_file).await.is_empty());
}

#[tokio::test]
async fn test_remove_file_with_missing_content_succeeds() {
    let harness = TestHarness::new();
    let files = &harness.graph.files;
    let created = files
        .create_file("/share/", "txt", 5, harness.graph.creator(), &harness.data_graph)
        .await
        .unwrap();

    files
        .remove_file_with_content(&created.logical_file, &harness.content_store())
        .await
        .unwrap();

    assert!(harness.store.describe(&created.physical_file).await.is_empty());
}
