//! End-to-end registry builds against the fixtures in `tests/fixtures/`
//!
//! Every test uses an in-memory metadata source, so nothing here touches
//! the network.

mod common;

use chrono::{TimeZone, Utc};
use plugindex_core::enrich::{LicenseInfo, RepoMetadata, StaticSource};
use plugindex_core::{Category, InstallType, Pipeline, PipelineConfig, Record, RegistryError};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn metadata(stars: u64, language: &str, spdx: Option<&str>) -> RepoMetadata {
    RepoMetadata {
        stars,
        language: Some(language.to_string()),
        license: spdx.map(|id| LicenseInfo {
            spdx_id: Some(id.to_string()),
        }),
        pushed_at: Some(Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap()),
    }
}

/// Metadata for every fixture repository except `ghosts/vanished`
fn fixture_source() -> StaticSource {
    StaticSource::new()
        .with_entry("acme/hub", metadata(300, "Python", Some("MIT")))
        .with_entry(
            "modelcontextprotocol/servers",
            metadata(70000, "TypeScript", Some("MIT")),
        )
        .with_entry("tiny/lite-db", metadata(40, "Rust", Some("Apache-2.0")))
        .with_entry("graphs/store", metadata(40, "JavaScript", None))
        .with_entry("gophers/golint", metadata(900, "Go", Some("BSD-3-Clause")))
}

fn test_config() -> PipelineConfig {
    PipelineConfig {
        request_delay_ms: 0,
        ..Default::default()
    }
}

fn find<'a>(records: &'a [Record], name: &str) -> &'a Record {
    records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no record named {name}"))
}

#[tokio::test]
async fn test_catalog_only_build() {
    common::init_test_logging();
    let pipeline = Pipeline::new(test_config(), fixture_source());

    let report = pipeline.build(&fixture("catalog.md"), None).await.unwrap();
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["Postgres", "Go Lint", "Hub", "Graph Store", "Lite DB", "Ghost"]
    );
    assert_eq!(report.extracted, 6);
    assert_eq!(report.enrichment.enriched, 5);
    assert_eq!(report.enrichment.degraded, 1);

    // One request per record, in catalog order
    assert_eq!(
        pipeline.source().requested(),
        vec![
            "acme/hub",
            "modelcontextprotocol/servers",
            "tiny/lite-db",
            "graphs/store",
            "gophers/golint",
            "ghosts/vanished",
        ]
    );
}

#[tokio::test]
async fn test_catalog_fields_after_enrichment() {
    let pipeline = Pipeline::new(test_config(), fixture_source());
    let records = pipeline.build(&fixture("catalog.md"), None).await.unwrap().records;

    let postgres = find(&records, "Postgres");
    assert!(postgres.official);
    assert_eq!(postgres.category, Category::Data);
    assert_eq!(postgres.author, "modelcontextprotocol");
    assert_eq!(postgres.install_type, InstallType::Manual);
    assert_eq!(postgres.package, "modelcontextprotocol/servers");
    assert_eq!(
        postgres.repository,
        "https://github.com/modelcontextprotocol/servers/tree/main/src/postgres"
    );

    let hub = find(&records, "Hub");
    assert_eq!(hub.category, Category::Utility);
    assert_eq!(hub.install_type, InstallType::Pip);
    assert_eq!(hub.package, "hub");
    assert_eq!(hub.license.as_deref(), Some("MIT"));

    let graph = find(&records, "Graph Store");
    assert_eq!(graph.category, Category::Data);
    assert_eq!(graph.install_type, InstallType::Npm);
    assert_eq!(graph.package, "graphs/store");
    assert_eq!(graph.license, None);

    let lint = find(&records, "Go Lint");
    assert_eq!(lint.category, Category::Development);
    assert_eq!(lint.package, "github.com/gophers/golint@latest");

    let ghost = find(&records, "Ghost");
    assert_eq!(ghost.install_type, InstallType::Manual);
    assert_eq!(ghost.package, "");
    assert_eq!(ghost.popularity, 0);
    assert_eq!(ghost.updated_at, None);
    assert_eq!(ghost.primary_language, "");
}

#[tokio::test]
async fn test_overrides_replace_and_extend() {
    let pipeline = Pipeline::new(test_config(), fixture_source());

    let report = pipeline
        .build(&fixture("catalog.md"), Some(&fixture("overrides.json")))
        .await
        .unwrap();
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(report.overrides, 2);
    assert_eq!(
        names,
        vec![
            "Postgres",
            "Go Lint",
            "Hub",
            "Graph Store",
            "Internal Tool",
            "Ghost",
            "Lite DB",
        ]
    );

    let lite = find(&report.records, "Lite DB");
    assert!(lite.verified);
    assert_eq!(lite.id, "lite-db");
    assert_eq!(lite.author, "tiny");
    assert_eq!(lite.package, "lite-db-fork");
    assert_eq!(lite.install_type, InstallType::Pip);
    // Whole-record replacement: enrichment from the catalog pass is gone
    assert_eq!(lite.popularity, 0);
    assert_eq!(lite.license, None);

    let internal = find(&report.records, "Internal Tool");
    assert_eq!(internal.id, "internal-tool");
    assert_eq!(internal.author, "ops");
    assert_eq!(internal.tags, vec!["internal", "beta"]);
    assert_eq!(internal.popularity, 12);

    // Overrides are never looked up unless asked to be
    assert_eq!(pipeline.source().requested().len(), 6);
}

#[tokio::test]
async fn test_rerun_with_output_as_overrides_is_identical() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    Pipeline::new(test_config(), fixture_source())
        .run(&fixture("catalog.md"), Some(&fixture("overrides.json")), &first)
        .await
        .unwrap();

    Pipeline::new(test_config(), fixture_source())
        .run(&fixture("catalog.md"), Some(&first), &second)
        .await
        .unwrap();

    let first_doc = std::fs::read_to_string(&first).unwrap();
    let second_doc = std::fs::read_to_string(&second).unwrap();
    assert_eq!(first_doc, second_doc);
}

#[tokio::test]
async fn test_output_document_shape() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("registry.json");

    Pipeline::new(test_config(), fixture_source())
        .run(&fixture("catalog.md"), None, &output)
        .await
        .unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let entries = doc.as_array().unwrap();
    assert_eq!(entries.len(), 6);

    let postgres = &entries[0];
    assert_eq!(postgres["id"], "postgres");
    assert_eq!(postgres["stars"], 70000);
    assert_eq!(postgres["language"], "TypeScript");
    assert_eq!(postgres["updated_at"], "2025-01-10T09:30:00Z");
    assert_eq!(postgres["install_type"], "manual");
    assert_eq!(postgres["official"], true);
    assert_eq!(postgres["verified"], false);

    let ghost = &entries[5];
    assert_eq!(ghost["id"], "ghost");
    assert_eq!(ghost["updated_at"], "0001-01-01T00:00:00Z");
    assert!(ghost.get("stars").is_none());
    assert!(ghost.get("package").is_none());
}

#[tokio::test]
async fn test_malformed_overrides_abort_without_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("registry.json");
    let pipeline = Pipeline::new(test_config(), fixture_source());

    let err = pipeline
        .run(
            &fixture("catalog.md"),
            Some(&fixture("malformed_overrides.json")),
            &output,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::OverrideParse { .. }));
    assert!(!output.exists());
    assert!(pipeline.source().requested().is_empty());
}

#[tokio::test]
async fn test_missing_catalog_is_fatal() {
    let pipeline = Pipeline::new(test_config(), fixture_source());
    let err = pipeline
        .build(&fixture("does-not-exist.md"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::CatalogRead { .. }));
}
