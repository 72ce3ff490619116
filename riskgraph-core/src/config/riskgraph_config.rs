//! Top-level riskgraph configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CollectionColumns, CollectionConfig, ExportConfig, GuaranteeConfig, IngestConfig,
    RuntimeConfig, WeightRange,
};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RISKGRAPH_*`)
/// 3. Project config (`riskgraph.toml` in the working root)
/// 4. User config (`~/.riskgraph/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskGraphConfig {
    pub guarantee: GuaranteeConfig,
    pub collection: CollectionConfig,
    pub ingest: IngestConfig,
    pub export: ExportConfig,
    pub runtime: RuntimeConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threads: Option<usize>,
    pub output_dir: Option<String>,
    pub max_day_gap: Option<u32>,
    pub pretty: Option<bool>,
}

impl RiskGraphConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from an explicit file, then apply env and CLI layers.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        Self::merge_toml_file(&mut config, path)?;
        Self::apply_env_overrides(&mut config);
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskGraphConfig) -> Result<(), ConfigError> {
        if config.guarantee.hub_out_degree == Some(0) {
            return Err(invalid("guarantee.hub_out_degree", "must be greater than 0"));
        }
        if config.guarantee.focus_in_degree == Some(0) {
            return Err(invalid("guarantee.focus_in_degree", "must be greater than 0"));
        }
        check_range("guarantee.weight", &config.guarantee.effective_weight_range())?;
        check_range("collection.weight", &config.collection.effective_weight_range())?;

        let min_ratio = config.collection.effective_min_ratio();
        let max_ratio = config.collection.effective_max_ratio();
        if !(min_ratio.is_finite() && min_ratio > 0.0) {
            return Err(invalid("collection.min_ratio", "must be a positive number"));
        }
        if !max_ratio.is_finite() || max_ratio < min_ratio {
            return Err(invalid(
                "collection.max_ratio",
                "must be finite and not below collection.min_ratio",
            ));
        }

        if config.ingest.effective_id_normalize_len() < 2 {
            return Err(invalid("ingest.id_normalize_len", "must be at least 2"));
        }
        if config.ingest.effective_id_suffix().chars().count() != 2 {
            return Err(invalid("ingest.id_suffix", "must be exactly two characters"));
        }

        for (field, value) in [
            ("export.guarantee_chunk_nodes", config.export.guarantee_chunk_nodes),
            ("export.collection_chunk_nodes", config.export.collection_chunk_nodes),
            ("export.control_chunk_nodes", config.export.control_chunk_nodes),
        ] {
            if value == Some(0) {
                return Err(invalid(field, "must be greater than 0"));
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.riskgraph/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RiskGraphConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskGraphConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value (or a non-empty list).
    fn merge(base: &mut RiskGraphConfig, other: &RiskGraphConfig) {
        // Guarantee
        let g = &other.guarantee;
        if g.hub_out_degree.is_some() {
            base.guarantee.hub_out_degree = g.hub_out_degree;
        }
        if g.focus_in_degree.is_some() {
            base.guarantee.focus_in_degree = g.focus_in_degree;
        }
        if g.weight_min.is_some() {
            base.guarantee.weight_min = g.weight_min;
        }
        if g.weight_max.is_some() {
            base.guarantee.weight_max = g.weight_max;
        }
        if g.weight_flat.is_some() {
            base.guarantee.weight_flat = g.weight_flat;
        }

        // Collection
        let c = &other.collection;
        if c.max_day_gap.is_some() {
            base.collection.max_day_gap = c.max_day_gap;
        }
        if c.min_ratio.is_some() {
            base.collection.min_ratio = c.min_ratio;
        }
        if c.max_ratio.is_some() {
            base.collection.max_ratio = c.max_ratio;
        }
        if c.weight_min.is_some() {
            base.collection.weight_min = c.weight_min;
        }
        if c.weight_max.is_some() {
            base.collection.weight_max = c.weight_max;
        }
        if c.weight_flat.is_some() {
            base.collection.weight_flat = c.weight_flat;
        }

        // Ingest
        let i = &other.ingest;
        if i.id_normalize_len.is_some() {
            base.ingest.id_normalize_len = i.id_normalize_len;
        }
        if i.id_suffix.is_some() {
            base.ingest.id_suffix = i.id_suffix.clone();
        }
        if i.transfer_min_amount.is_some() {
            base.ingest.transfer_min_amount = i.transfer_min_amount;
        }
        if i.loan_min_amount.is_some() {
            base.ingest.loan_min_amount = i.loan_min_amount;
        }
        if !i.transfer_codes.is_empty() {
            base.ingest.transfer_codes = i.transfer_codes.clone();
        }
        if !i.loan_codes.is_empty() {
            base.ingest.loan_codes = i.loan_codes.clone();
        }
        if !i.loan_excluded_abstracts.is_empty() {
            base.ingest.loan_excluded_abstracts = i.loan_excluded_abstracts.clone();
        }
        if i.collection_columns != CollectionColumns::default() {
            base.ingest.collection_columns = i.collection_columns;
        }

        // Export
        let e = &other.export;
        if e.output_dir.is_some() {
            base.export.output_dir = e.output_dir.clone();
        }
        if e.guarantee_chunk_nodes.is_some() {
            base.export.guarantee_chunk_nodes = e.guarantee_chunk_nodes;
        }
        if e.collection_chunk_nodes.is_some() {
            base.export.collection_chunk_nodes = e.collection_chunk_nodes;
        }
        if e.control_chunk_nodes.is_some() {
            base.export.control_chunk_nodes = e.control_chunk_nodes;
        }
        if e.pretty.is_some() {
            base.export.pretty = e.pretty;
        }

        // Runtime
        if other.runtime.threads.is_some() {
            base.runtime.threads = other.runtime.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RISKGRAPH_RUNTIME_THREADS`, `RISKGRAPH_COLLECTION_MAX_DAY_GAP`, etc.
    fn apply_env_overrides(config: &mut RiskGraphConfig) {
        if let Some(v) = env_parse::<usize>("RISKGRAPH_RUNTIME_THREADS") {
            config.runtime.threads = Some(v);
        }
        if let Some(v) = env_parse::<usize>("RISKGRAPH_GUARANTEE_HUB_OUT_DEGREE") {
            config.guarantee.hub_out_degree = Some(v);
        }
        if let Some(v) = env_parse::<usize>("RISKGRAPH_GUARANTEE_FOCUS_IN_DEGREE") {
            config.guarantee.focus_in_degree = Some(v);
        }
        if let Some(v) = env_parse::<u32>("RISKGRAPH_COLLECTION_MAX_DAY_GAP") {
            config.collection.max_day_gap = Some(v);
        }
        if let Some(v) = env_parse::<f64>("RISKGRAPH_COLLECTION_MIN_RATIO") {
            config.collection.min_ratio = Some(v);
        }
        if let Some(v) = env_parse::<f64>("RISKGRAPH_COLLECTION_MAX_RATIO") {
            config.collection.max_ratio = Some(v);
        }
        if let Ok(val) = std::env::var("RISKGRAPH_EXPORT_OUTPUT_DIR") {
            config.export.output_dir = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RiskGraphConfig, cli: &CliOverrides) {
        if let Some(v) = cli.threads {
            config.runtime.threads = Some(v);
        }
        if let Some(ref v) = cli.output_dir {
            config.export.output_dir = Some(v.clone());
        }
        if let Some(v) = cli.max_day_gap {
            config.collection.max_day_gap = Some(v);
        }
        if let Some(v) = cli.pretty {
            config.export.pretty = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_range(prefix: &str, range: &WeightRange) -> Result<(), ConfigError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(invalid(
            prefix,
            "weight_min <= weight_flat <= weight_max must hold",
        ))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

/// Returns the user-level config directory: `~/.riskgraph/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".riskgraph"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
