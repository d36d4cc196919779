//! The data files shipped with the crate load and match the engine tables.

use std::fs;

use tactics_content::{ContentFactory, RosterLoader};
use tactics_core::{CatalogSnapshot, GameConfig, UnitClass};

#[test]
fn bundled_catalog_matches_the_builtin_tables() {
    let catalog = ContentFactory::bundled().load_catalog().unwrap();
    assert_eq!(catalog, CatalogSnapshot::standard());
}

#[test]
fn bundled_config_matches_the_defaults() {
    let config = ContentFactory::bundled().load_config().unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn bundled_rosters_are_playable() {
    let factory = ContentFactory::bundled();
    let catalog = factory.load_catalog().unwrap();
    let book = factory.load_rosters(&catalog).unwrap();

    assert!(book.names().any(|name| name == "standard"));
    let heroes = book.get("heroes").unwrap();
    assert_eq!(heroes.len(), GameConfig::UNITS_PER_SIDE);
    assert_eq!(heroes[0].class, UnitClass::Spearman);
    assert_eq!(heroes[0].hero.as_ref().map(|h| h.as_str()), Some("warden"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).load_config().unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn malformed_catalog_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("catalog.ron"), "(classes: [").unwrap();

    let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
    assert!(err.to_string().contains("catalog.ron"), "{err}");
}

#[test]
fn rosters_parse_without_a_catalog() {
    let book = RosterLoader::parse(r#"(presets: {})"#).unwrap();
    assert_eq!(book.names().count(), 0);
}
