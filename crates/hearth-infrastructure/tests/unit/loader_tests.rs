//! Tests for the layered YAML configuration loader

use std::fs;
use std::path::PathBuf;

use hearth_domain::error::Error;
use hearth_domain::ports::ConfigurationSource;
use hearth_domain::value_objects::ConfigValue;
use hearth_infrastructure::YamlConfigLoader;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn isolated() -> YamlConfigLoader {
    YamlConfigLoader::new()
        .with_environment(false)
        .with_search_paths(Vec::<PathBuf>::new())
}

// ============================================================================
// Layering
// ============================================================================

#[test]
fn test_empty_loader_yields_empty_store() {
    let store = isolated().load().store;

    assert!(store.is_empty());
}

#[test]
fn test_later_sources_override_top_level_keys() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "first.yaml", "name: first\nkeep: yes-please\nnested: {a: 1, b: 2}\n");
    let second = write(&dir, "second.yaml", "name: second\nnested: {a: 10}\n");

    let store = isolated()
        .with_bundled("bundled", "name: bundled\nbase: true\n")
        .with_search_paths([first, second])
        .load()
        .store;

    assert_eq!(store.get_string("name").as_deref(), Some("second"));
    assert_eq!(store.get("base"), Some(&ConfigValue::Bool(true)));
    assert_eq!(store.get_string("keep").as_deref(), Some("yes-please"));
    assert_eq!(store.get("nested.a"), Some(&ConfigValue::Integer(10)));
    // whole-value replacement, no deep merge
    assert!(store.get("nested.b").is_none());
}

#[test]
fn test_missing_search_paths_are_skipped() {
    let dir = TempDir::new().unwrap();
    let present = write(&dir, "present.yaml", "found: 1\n");

    let store = isolated()
        .with_search_paths([dir.path().join("absent.yaml"), present])
        .load()
        .store;

    assert_eq!(store.get("found"), Some(&ConfigValue::Integer(1)));
}

#[test]
fn test_explicit_file_is_mounted_last() {
    let dir = TempDir::new().unwrap();
    let searched = write(&dir, "searched.yaml", "name: searched\n");
    let explicit = write(&dir, "explicit.yaml", "name: explicit\n");

    let store = isolated()
        .with_search_paths([searched])
        .with_config_file(&explicit)
        .load()
        .store;

    assert_eq!(store.get_string("name").as_deref(), Some("explicit"));
}

#[test]
fn test_config_file_property_selects_explicit_file() {
    let dir = TempDir::new().unwrap();
    let explicit = write(&dir, "by-property.yaml", "name: by-property\n");

    let loader = isolated().with_property("hearth.configFile", explicit.display().to_string());
    let store = loader.load().store;

    assert_eq!(loader.explicit_config_file(), Some(explicit));
    assert_eq!(store.get_string("name").as_deref(), Some("by-property"));
}

#[test]
fn test_missing_explicit_file_is_skipped() {
    let dir = TempDir::new().unwrap();

    let loaded = isolated()
        .with_bundled("bundled", "name: bundled\n")
        .with_config_file(dir.path().join("nowhere.yaml"))
        .load();

    assert_eq!(loaded.store.get_string("name").as_deref(), Some("bundled"));
    assert_eq!(loaded.skipped.len(), 1);
    assert!(matches!(loaded.skipped[0].error, Error::Configuration { .. }));
}

#[test]
fn test_broken_file_is_skipped_and_layering_continues() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.yaml", "greeter.configured: from-good\n");
    let bad = write(&dir, "bad.yaml", "name: ${UNTERMINATED\n");
    let last = write(&dir, "last.yaml", "name: last\n");

    let loaded = isolated()
        .with_bundled("bundled", "base: kept\n")
        .with_search_paths([good, bad.clone(), last])
        .load();

    assert!(!loaded.is_complete());
    assert_eq!(loaded.skipped[0].target, bad.display().to_string());
    assert_eq!(loaded.store.get_string("base").as_deref(), Some("kept"));
    assert_eq!(loaded.store.get_string("greeter.configured").as_deref(), Some("from-good"));
    assert_eq!(loaded.store.get_string("name").as_deref(), Some("last"));
}

// ============================================================================
// Properties and Interpolation
// ============================================================================

#[test]
fn test_properties_are_the_lowest_layer() {
    let store = isolated()
        .with_property("region", "eu-west")
        .with_property("name", "from-property")
        .with_bundled("bundled", "name: from-document\n")
        .load()
        .store;

    assert_eq!(store.get_string("region").as_deref(), Some("eu-west"));
    assert_eq!(store.get_string("name").as_deref(), Some("from-document"));
}

#[test]
fn test_documents_are_interpolated_before_parsing() {
    let store = isolated()
        .with_property("PORT", "7070")
        .with_bundled("bundled", "port: ${PORT}\nhost: ${HOST:localhost}\n")
        .load()
        .store;

    assert_eq!(store.get("port"), Some(&ConfigValue::Integer(7070)));
    assert_eq!(store.get_string("host").as_deref(), Some("localhost"));
}

#[test]
fn test_multi_document_stream_merges_in_order() {
    let map = isolated()
        .parse("a: 1\nb: 1\n---\n---\nb: 2\n", "stream")
        .unwrap();

    assert_eq!(map.get("a"), Some(&ConfigValue::Integer(1)));
    assert_eq!(map.get("b"), Some(&ConfigValue::Integer(2)));
}

#[test]
fn test_non_mapping_document_is_rejected() {
    let err = isolated().parse("- just\n- a list\n", "list.yaml").unwrap_err();

    assert!(err.to_string().contains("list.yaml"));
}

#[test]
fn test_interpolation_error_skips_the_bundled_document() {
    let loaded = isolated()
        .with_property("region", "eu-west")
        .with_bundled("bundled", "ok: 1\nbroken: ${UNTERMINATED\n")
        .load();

    assert_eq!(loaded.skipped[0].target, "bundled");
    assert!(matches!(loaded.skipped[0].error, Error::Interpolation { line: 2, .. }));
    assert!(loaded.store.get("ok").is_none());
    assert_eq!(loaded.store.get_string("region").as_deref(), Some("eu-west"));
}

// ============================================================================
// Key Spellings
// ============================================================================

#[test]
fn test_nested_override_replaces_flat_bundled_keys() {
    let dir = TempDir::new().unwrap();
    let nested = write(
        &dir,
        "nested.yaml",
        "hearth:\n  container:\n    packages: ['app::core']\n",
    );

    let store = isolated()
        .with_bundled(
            "bundled",
            "hearth.container.teardown_order: reverse\nhearth.container.packages: []\n",
        )
        .with_search_paths([nested])
        .load()
        .store;

    assert_eq!(store.get_string_list("hearth.container.packages").unwrap(), vec!["app::core"]);
    // the nested layer replaces everything under `hearth`
    assert!(store.get("hearth.container.teardown_order").is_none());
}

#[test]
fn test_flat_override_beats_earlier_nested_document() {
    let dir = TempDir::new().unwrap();
    let flat = write(&dir, "flat.yaml", "hearth.container.name: flat\n");

    let store = isolated()
        .with_bundled("bundled", "hearth:\n  container:\n    name: nested\n")
        .with_search_paths([flat])
        .load()
        .store;

    assert_eq!(store.get_string("hearth.container.name").as_deref(), Some("flat"));
}
