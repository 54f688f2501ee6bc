//! Test fixtures for message feeds and project directories.

use std::io::Cursor;
use tempfile::TempDir;
use tokio::io::BufReader;

/// The card scenario: a Card wrapping a Column with a single bound Text.
pub const CARD_FEED: &str = r#"{"beginRendering": {"surfaceId": "main", "root": "card"}}
{"surfaceUpdate": {"surfaceId": "main", "components": [{"id": "card", "component": {"Card": {"child": "col"}}}, {"id": "col", "component": {"Column": {"children": {"explicitList": ["t1"]}}}}, {"id": "t1", "component": {"Text": {"text": {"path": "name"}}}}]}}
{"dataModelUpdate": {"surfaceId": "main", "path": "/", "contents": [{"key": "name", "valueString": "Ada"}]}}
"#;

/// A contact list rendered from a keyed collection through a template.
pub const LIST_FEED: &str = r##"{"beginRendering": {"surfaceId": "contacts", "root": "list", "styles": {"primaryColor": "#00BFFF"}}}
{"surfaceUpdate": {"surfaceId": "contacts", "components": [{"id": "list", "component": {"List": {"children": {"template": {"componentId": "row", "dataBinding": "/people"}}}}}, {"id": "row", "component": {"Text": {"text": {"path": "name"}}}}]}}
{"dataModelUpdate": {"surfaceId": "contacts", "path": "/people", "contents": [{"key": "p2", "valueMap": [{"key": "name", "valueString": "Grace"}]}, {"key": "p1", "valueMap": [{"key": "name", "valueString": "Alan"}]}]}}
"##;

/// Wrap a static feed as an async reader.
#[allow(dead_code)]
pub fn feed_reader(feed: &'static str) -> BufReader<Cursor<&'static [u8]>> {
    BufReader::new(Cursor::new(feed.as_bytes()))
}

/// Create a temporary project with `.a2ui/config.toml`.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(config_toml: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let config_dir = temp_dir.path().join(".a2ui");
    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(config_dir.join("config.toml"), config_toml)?;
    Ok(temp_dir)
}
