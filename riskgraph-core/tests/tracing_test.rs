//! Tests for the tracing setup.

use std::sync::Mutex;

use riskgraph_core::tracing::setup::{init_tracing, LOG_ENV_VAR};

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "===not a filter===");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_metric_field_names_are_distinct_snake_case() {
    use riskgraph_core::tracing::metrics::*;

    let names = [
        SUBGRAPH_COUNT,
        REJECTED_COUNT,
        TRIAD_COUNT,
        DATASET_TIME_MS,
        ROWS_ACCEPTED,
        ROWS_SKIPPED,
    ];
    for name in names {
        assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{name}");
    }
    let unique: std::collections::HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
}
