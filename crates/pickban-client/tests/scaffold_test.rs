// Sanity checks for the files shipped alongside the binary.

use std::collections::HashSet;
use std::path::Path;

use pickban_client::catalog::load_catalog;

/// Verify that defaults/client.toml is valid TOML with every section.
#[test]
fn client_defaults_are_valid_toml() {
    let content = std::fs::read_to_string("defaults/client.toml")
        .expect("defaults/client.toml should exist");
    let config: toml::Value = toml::from_str(&content).expect("defaults/client.toml should parse");

    for section in ["api", "polling", "data_paths"] {
        assert!(config.get(section).is_some(), "missing [{section}] section");
    }
    let polling = &config["polling"];
    assert_eq!(polling["interval_ms"].as_integer(), Some(3000));
    assert_eq!(polling["countdown_tick_ms"].as_integer(), Some(1000));
    assert_eq!(polling["warning_threshold_secs"].as_integer(), Some(10));
    assert!(config["api"]["base_url"]
        .as_str()
        .is_some_and(|u| u.starts_with("https://")));
}

/// Verify that defaults/player.toml.example is valid TOML.
#[test]
fn player_example_is_valid_toml() {
    let content = std::fs::read_to_string("defaults/player.toml.example")
        .expect("defaults/player.toml.example should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(
        parsed.is_ok(),
        "defaults/player.toml.example is not valid TOML: {:?}",
        parsed.err()
    );
}

/// The configured catalog path resolves to the shipped file.
#[test]
fn catalog_path_points_at_shipped_data() {
    let content = std::fs::read_to_string("defaults/client.toml").unwrap();
    let config: toml::Value = toml::from_str(&content).unwrap();
    let catalog = config["data_paths"]["catalog"].as_str().unwrap();
    assert!(Path::new(catalog).is_file(), "{catalog} should exist");
}

/// Verify the shipped catalog loads with unique ids and an element each.
#[test]
fn shipped_catalog_is_well_formed() {
    let catalog = load_catalog(Path::new("data/resonators.json")).expect("catalog should load");
    assert!(!catalog.is_empty());

    let mut ids = HashSet::new();
    for r in catalog.resonators() {
        assert!(ids.insert(r.id.clone()), "duplicate resonator id {}", r.id);
        assert!(!r.name.is_empty(), "{} has no display name", r.id);
        assert!(!r.elements.is_empty(), "{} has no element", r.id);
    }
    assert!(catalog.get("jiyan").is_some());
    assert!(catalog.elements().len() > 1);
}
