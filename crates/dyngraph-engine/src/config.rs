//! Graph configuration, validation, and error types.
//!
//! [`GraphConfig`] is the input for constructing a [`Graph`](crate::Graph).
//! [`validate()`](GraphConfig::validate) checks it once at construction;
//! [`from_env()`](GraphConfig::from_env) reads overrides from the process
//! environment for embedders that cannot pass a config explicitly.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the trace directory.
pub const ENV_TRACE_DIR: &str = "DYNGRAPH_TRACE_DIR";
/// Environment variable selecting append mode for trace files (`1`/`true`).
pub const ENV_TRACE_APPEND: &str = "DYNGRAPH_TRACE_APPEND";
/// Environment variable bounding the upstream walk of a recompute.
pub const ENV_MAX_RECOMPUTE_DEPTH: &str = "DYNGRAPH_MAX_RECOMPUTE_DEPTH";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`GraphConfig::validate()`] or
/// [`GraphConfig::from_env()`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The trace directory does not exist or is not a directory.
    #[error("trace directory '{}' is not a directory", .path.display())]
    TraceDirMissing {
        /// The configured directory.
        path: PathBuf,
    },
    /// `max_recompute_depth` must be at least 1.
    #[error("max_recompute_depth must be at least 1")]
    ZeroRecomputeDepth,
    /// An environment variable holds an unusable value.
    #[error("environment variable {var}={value:?} is invalid: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

// ── GraphConfig ────────────────────────────────────────────────────

/// Tunables of a [`Graph`](crate::Graph).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphConfig {
    /// Directory relative trace filenames resolve against. `None` means
    /// the working directory.
    pub trace_dir: Option<PathBuf>,
    /// Append to existing trace files instead of truncating them.
    /// Default: `false`.
    pub trace_append: bool,
    /// Longest upstream chain a recompute will follow. Default: 1024.
    pub max_recompute_depth: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            trace_dir: None,
            trace_append: false,
            max_recompute_depth: 1024,
        }
    }
}

impl GraphConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_recompute_depth == 0 {
            return Err(ConfigError::ZeroRecomputeDepth);
        }
        if let Some(dir) = &self.trace_dir {
            if !dir.is_dir() {
                return Err(ConfigError::TraceDirMissing { path: dir.clone() });
            }
        }
        Ok(())
    }

    /// Defaults overridden by the `DYNGRAPH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `DYNGRAPH_*` variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_TRACE_DIR).filter(|d| !d.is_empty()) {
            config.trace_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_TRACE_APPEND) {
            config.trace_append = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_TRACE_APPEND,
                        value: raw.clone(),
                        reason: "expected a boolean".into(),
                    })
                }
            };
        }
        if let Some(raw) = lookup(ENV_MAX_RECOMPUTE_DEPTH) {
            config.max_recompute_depth =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnv {
                        var: ENV_MAX_RECOMPUTE_DEPTH,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }
        Ok(config)
    }
}
