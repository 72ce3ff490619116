//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "RISKGRAPH_LOG";

/// Initialize the riskgraph tracing/logging system.
///
/// Reads `RISKGRAPH_LOG` for per-subsystem log levels.
/// Format: `RISKGRAPH_LOG=riskgraph_analysis=debug,riskgraph_core=warn`
///
/// Falls back to `riskgraph=info` if the variable is unset or invalid.
/// Idempotent; later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("riskgraph=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
