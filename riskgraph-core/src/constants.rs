//! Shared constants for the riskgraph engine.

/// riskgraph version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "riskgraph.toml";

/// Default number of worker threads (0 = rayon auto-detect).
pub const DEFAULT_THREADS: usize = 0;

// ---- Guarantee rules ----

/// Out-degree at which a guarantor becomes a hub ("cross").
pub const DEFAULT_HUB_OUT_DEGREE: usize = 3;

/// In-degree at which a guaranteed entity becomes a concentration sink ("focus").
pub const DEFAULT_FOCUS_IN_DEGREE: usize = 3;

/// Exposure visual-weight range and flat fallback.
pub const DEFAULT_EXPOSURE_WEIGHT_MIN: f64 = 5.0;
pub const DEFAULT_EXPOSURE_WEIGHT_MAX: f64 = 25.0;
pub const DEFAULT_EXPOSURE_WEIGHT_FLAT: f64 = 15.0;

// ---- Fund-collection rules ----

/// Maximum days between a loan and the transfer that passes it on.
pub const DEFAULT_MAX_DAY_GAP: u32 = 5;

/// Accepted transfer/loan amount ratio bounds (inclusive).
pub const DEFAULT_MIN_RATIO: f64 = 0.9;
pub const DEFAULT_MAX_RATIO: f64 = 1.0;

/// Net-flow visual-weight range and flat fallback.
pub const DEFAULT_NET_FLOW_WEIGHT_MIN: f64 = 5.0;
pub const DEFAULT_NET_FLOW_WEIGHT_MAX: f64 = 14.0;
pub const DEFAULT_NET_FLOW_WEIGHT_FLAT: f64 = 9.0;

// ---- Ingestion ----

/// Account IDs at least this long get their trailing two characters replaced.
pub const DEFAULT_ID_NORMALIZE_LEN: usize = 15;

/// Replacement for the trailing two characters of long account IDs.
pub const DEFAULT_ID_SUFFIX: &str = "00";

/// Minimum amount for a transfer row to be kept.
pub const DEFAULT_TRANSFER_MIN_AMOUNT: f64 = 90_000.0;

/// Minimum amount for a loan row to be kept.
pub const DEFAULT_LOAN_MIN_AMOUNT: f64 = 100_000.0;

/// Transaction codes that identify an intra-account transfer.
pub const DEFAULT_TRANSFER_CODES: &[&str] = &["EK95", "8002", "8003", "7743"];

/// Transaction codes that identify a loan disbursement.
pub const DEFAULT_LOAN_CODES: &[&str] = &[
    "6101", "6102", "6104", "61", "6151", "2202", "6002", "6003", "6005", "6006", "7641",
    "7799", "7810", "DK06", "DK05",
];

/// Abstract phrases marking loan rows that are repayments or interest, not disbursements.
pub const DEFAULT_LOAN_EXCLUDED_ABSTRACTS: &[&str] = &[
    "贷款还款",
    "委托贷款收回利息",
    "委托贷款收回本金",
    "现金管理子账户占用上存金额补足本次扣款",
    "公积金放款",
    "贷款并账",
];

// ---- Export ----

/// Node budget per two-node guarantee chunk file.
pub const DEFAULT_GUARANTEE_CHUNK_NODES: usize = 2950;

/// Node budget per fund-collection chunk file.
pub const DEFAULT_COLLECTION_CHUNK_NODES: usize = 1500;

/// Node budget per control chunk file.
pub const DEFAULT_CONTROL_CHUNK_NODES: usize = 3000;

/// Divisor applied to √amount for transaction link width.
pub const LINK_WIDTH_DIVISOR: f64 = 1800.0;
