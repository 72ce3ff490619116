//! Tests for the riskgraph configuration system.

use std::sync::Mutex;

use riskgraph_core::config::{CliOverrides, RiskGraphConfig};
use riskgraph_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    for key in [
        "RISKGRAPH_RUNTIME_THREADS",
        "RISKGRAPH_GUARANTEE_HUB_OUT_DEGREE",
        "RISKGRAPH_GUARANTEE_FOCUS_IN_DEGREE",
        "RISKGRAPH_COLLECTION_MAX_DAY_GAP",
        "RISKGRAPH_COLLECTION_MIN_RATIO",
        "RISKGRAPH_COLLECTION_MAX_RATIO",
        "RISKGRAPH_EXPORT_OUTPUT_DIR",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_defaults_without_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let config = RiskGraphConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.guarantee.effective_hub_out_degree(), 3);
    assert_eq!(config.guarantee.effective_focus_in_degree(), 3);
    assert_eq!(config.collection.effective_max_day_gap(), 5);
    assert!((config.collection.effective_min_ratio() - 0.9).abs() < f64::EPSILON);
    assert!((config.collection.effective_max_ratio() - 1.0).abs() < f64::EPSILON);

    let exposure = config.guarantee.effective_weight_range();
    assert_eq!((exposure.min, exposure.max, exposure.flat), (5.0, 25.0, 15.0));
    let net = config.collection.effective_weight_range();
    assert_eq!((net.min, net.max, net.flat), (5.0, 14.0, 9.0));

    assert_eq!(config.ingest.effective_id_normalize_len(), 15);
    assert_eq!(config.ingest.effective_id_suffix(), "00");
    assert_eq!(config.ingest.effective_transfer_codes().len(), 4);
    assert!(config.ingest.effective_loan_codes().contains(&"DK05".to_string()));
    assert_eq!(config.export.effective_guarantee_chunk_nodes(), 2950);
    assert_eq!(config.runtime.effective_threads(), 0);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("riskgraph.toml"),
        r#"
[collection]
max_day_gap = 7
min_ratio = 0.85

[runtime]
threads = 2
"#,
    )
    .unwrap();

    std::env::set_var("RISKGRAPH_COLLECTION_MAX_DAY_GAP", "10");

    let cli = CliOverrides {
        threads: Some(8),
        ..Default::default()
    };
    let config = RiskGraphConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project for threads
    assert_eq!(config.runtime.threads, Some(8));
    // Env beats project for day gap
    assert_eq!(config.collection.max_day_gap, Some(10));
    // Project value survives where nothing overrides it
    assert_eq!(config.collection.min_ratio, Some(0.85));

    clear_env_vars();
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("riskgraph.toml"), "not = [valid").unwrap();

    match RiskGraphConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_validation_rejects_inverted_ratio_bounds() {
    let config = RiskGraphConfig::from_toml(
        r#"
[collection]
min_ratio = 0.95
max_ratio = 0.9
"#,
    )
    .unwrap();
    match RiskGraphConfig::validate(&config) {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "collection.max_ratio");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_validation_rejects_flat_weight_outside_range() {
    let config = RiskGraphConfig::from_toml(
        r#"
[guarantee]
weight_min = 5.0
weight_max = 10.0
weight_flat = 12.0
"#,
    )
    .unwrap();
    assert!(RiskGraphConfig::validate(&config).is_err());
}

#[test]
fn test_validation_rejects_zero_thresholds_and_chunks() {
    let hub = RiskGraphConfig::from_toml("[guarantee]\nhub_out_degree = 0\n").unwrap();
    assert!(RiskGraphConfig::validate(&hub).is_err());

    let chunk = RiskGraphConfig::from_toml("[export]\ncontrol_chunk_nodes = 0\n").unwrap();
    assert!(RiskGraphConfig::validate(&chunk).is_err());
}

#[test]
fn test_custom_columns_and_codes() {
    let config = RiskGraphConfig::from_toml(
        r#"
[ingest]
transfer_codes = ["T1"]

[ingest.collection_columns]
own_account = 2
counterpart = 3
"#,
    )
    .unwrap();
    assert_eq!(config.ingest.effective_transfer_codes(), vec!["T1".to_string()]);
    assert_eq!(config.ingest.collection_columns.own_account, 2);
    assert_eq!(config.ingest.collection_columns.counterpart, 3);
    // Unset columns keep their defaults
    assert_eq!(config.ingest.collection_columns.amount, 7);
}

#[test]
fn test_explicit_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        RiskGraphConfig::load_file(&missing, None),
        Err(ConfigError::FileNotFound { .. })
    ));
}

#[test]
fn test_toml_roundtrip_keeps_overrides() {
    let config = RiskGraphConfig::from_toml("[guarantee]\nfocus_in_degree = 4\n").unwrap();
    let text = config.to_toml().unwrap();
    let back = RiskGraphConfig::from_toml(&text).unwrap();
    assert_eq!(back.guarantee.focus_in_degree, Some(4));
}
