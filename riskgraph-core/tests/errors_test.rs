//! Tests for the riskgraph error handling system.

use std::collections::HashSet;

use riskgraph_core::errors::*;

#[test]
fn test_every_error_has_a_code() {
    let errors: Vec<Box<dyn Fn() -> &'static str>> = vec![
        Box::new(|| ConfigError::FileNotFound { path: "x".into() }.error_code()),
        Box::new(|| {
            IngestError::Io {
                path: "x".into(),
                message: "m".into(),
            }
            .error_code()
        }),
        Box::new(|| {
            GraphError::SelfLoop {
                subgraph: 0,
                entity: "a".into(),
            }
            .error_code()
        }),
        Box::new(|| {
            ExportError::Io {
                path: "x".into(),
                message: "m".into(),
            }
            .error_code()
        }),
        Box::new(|| PipelineError::ThreadPool("x".into()).error_code()),
    ];
    for code in errors {
        assert!(!code().is_empty());
    }
}

#[test]
fn test_malformed_rows_have_distinct_code() {
    let row = IngestError::MalformedField {
        line: 3,
        field: "amount",
        value: "abc".into(),
    };
    let io = IngestError::Io {
        path: "a.csv".into(),
        message: "denied".into(),
    };
    assert_ne!(row.error_code(), io.error_code());
}

#[test]
fn test_pipeline_error_preserves_inner_code() {
    let graph = GraphError::InvalidAmount {
        subgraph: 2,
        from: "a".into(),
        to: "b".into(),
        amount: f64::NAN,
    };
    let code = graph.error_code();
    let pipeline: PipelineError = graph.into();
    assert!(matches!(pipeline, PipelineError::Graph(_)));
    assert_eq!(pipeline.error_code(), code);
}

#[test]
fn test_tagged_string_format() {
    let err = ConfigError::ValidationFailed {
        field: "collection.min_ratio".into(),
        message: "must be a positive number".into(),
    };
    let s = err.tagged_string();
    assert!(s.starts_with("[CONFIG_ERROR] "));
    assert!(s.contains("collection.min_ratio"));
}

#[test]
fn test_pipeline_result_accumulates() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1, 2]);
    assert!(result.is_clean());
    result.add_error(GraphError::SelfLoop {
        subgraph: 1,
        entity: "x".into(),
    });
    result.add_error(IngestError::MissingColumn { line: 4, column: 29 });
    assert_eq!(result.error_count(), 2);
    assert_eq!(result.data, vec![1, 2]);

    let codes: HashSet<&str> = result.errors.iter().map(|e| e.error_code()).collect();
    assert_eq!(codes.len(), 2);
}
