use classclock::config::migrate::{fill_missing_keys, missing_keys};
use classclock::config::{Config, DEFAULT_STORAGE_KEY};
use std::env;
use std::fs;

#[test]
fn test_partial_yaml_gets_defaults() {
    let cfg = Config::from_yaml("database: /tmp/x.sqlite\ntick_interval_ms: 250\n").unwrap();
    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.tick_interval_ms, 250);
    assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
    assert!(!cfg.allow_past_schedule);
    assert_eq!(cfg.urgent_threshold_minutes, 10);
    assert_eq!(cfg.follow_interval_secs, 5);
}

#[test]
fn test_missing_keys_detection() {
    let missing = missing_keys("database: a\nstorage_key: b\n");
    assert_eq!(
        missing,
        vec![
            "tick_interval_ms",
            "allow_past_schedule",
            "urgent_threshold_minutes",
            "follow_interval_secs"
        ]
    );
    assert_eq!(missing_keys("not: [valid").len(), Config::KEYS.len());

    let full = serde_yaml::to_string(&Config::default()).unwrap();
    assert!(missing_keys(&full).is_empty());
}

#[test]
fn test_fill_missing_keys_keeps_existing_values() {
    let mut path = env::temp_dir();
    path.push("classclock_fill_missing.conf");
    fs::write(&path, "database: /tmp/keep.sqlite\ntick_interval_ms: 500\n").unwrap();

    let added = fill_missing_keys(&path).unwrap();
    assert_eq!(added.len(), 4);

    let cfg = Config::from_yaml(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(cfg.database, "/tmp/keep.sqlite");
    assert_eq!(cfg.tick_interval_ms, 500);
    assert!(missing_keys(&fs::read_to_string(&path).unwrap()).is_empty());

    // Second run changes nothing
    assert!(fill_missing_keys(&path).unwrap().is_empty());
    fs::remove_file(&path).ok();
}
