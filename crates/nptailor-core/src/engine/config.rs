use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MAX_COMBINATIONS: usize = 1000;
pub const DEFAULT_MAX_COMBINATION_SCAN: usize = 1_000_000;
pub const DEFAULT_MAX_SCAFFOLDS: usize = 10_000;
pub const DEFAULT_PLANS_PER_REACTION: usize = 500;
pub const DEFAULT_SAMPLING_SEED: u64 = 0;
pub const DEFAULT_MAX_SAMPLING_ATTEMPTS: usize = 10_000;

pub const DEFAULT_LASSO_MIN_LENGTH: usize = 9;
pub const DEFAULT_LASSO_RING_START: usize = 6;
pub const DEFAULT_LASSO_RING_END: usize = 9;
pub const DEFAULT_SACTIPEPTIDE_MIN_SEPARATION: usize = 6;
pub const DEFAULT_SACTIPEPTIDE_ACCEPTOR_SPACING: usize = 3;
pub const DEFAULT_SACTIPEPTIDE_TERMINAL_MARGIN: usize = 2;
pub const DEFAULT_AZOLE_LAP_SLACK: usize = 4;
pub const DEFAULT_MIN_DEHYDRATION_SUBSET: usize = 2;
pub const DEFAULT_PYRIDINE_MIN_SPAN: usize = 8;
pub const DEFAULT_PYRIDINE_MAX_SPAN: usize = 13;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Ceilings that bound the combinatorial search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchLimits {
    /// Accepted plan combinations per backbone.
    pub max_combinations: usize,
    /// Raw product tuples examined per backbone, accepted or not.
    pub max_combination_scan: usize,
    /// Final scaffolds returned by one run.
    pub max_scaffolds: usize,
    /// Candidate substrate sets produced by one annotator call.
    pub plans_per_reaction: usize,
    /// Seed for the sampler used when a subset or permutation space is too large.
    pub sampling_seed: u64,
    /// Draws attempted by the sampler before it gives up on finding new members.
    pub max_sampling_attempts: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_combination_scan: DEFAULT_MAX_COMBINATION_SCAN,
            max_scaffolds: DEFAULT_MAX_SCAFFOLDS,
            plans_per_reaction: DEFAULT_PLANS_PER_REACTION,
            sampling_seed: DEFAULT_SAMPLING_SEED,
            max_sampling_attempts: DEFAULT_MAX_SAMPLING_ATTEMPTS,
        }
    }
}

/// Positional windows used by individual annotators.
///
/// These values encode ring sizes and distances reported for characterized
/// clusters and are kept configurable rather than derived.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotatorWindows {
    pub lasso_min_length: usize,
    pub lasso_ring_start: usize,
    pub lasso_ring_end: usize,
    pub sactipeptide_min_separation: usize,
    pub sactipeptide_acceptor_spacing: usize,
    pub sactipeptide_terminal_margin: usize,
    pub azole_lap_slack: usize,
    pub min_dehydration_subset: usize,
    /// Distance between the two serines joined into a thiopeptide pyridine.
    pub pyridine_min_span: usize,
    pub pyridine_max_span: usize,
}

impl Default for AnnotatorWindows {
    fn default() -> Self {
        Self {
            lasso_min_length: DEFAULT_LASSO_MIN_LENGTH,
            lasso_ring_start: DEFAULT_LASSO_RING_START,
            lasso_ring_end: DEFAULT_LASSO_RING_END,
            sactipeptide_min_separation: DEFAULT_SACTIPEPTIDE_MIN_SEPARATION,
            sactipeptide_acceptor_spacing: DEFAULT_SACTIPEPTIDE_ACCEPTOR_SPACING,
            sactipeptide_terminal_margin: DEFAULT_SACTIPEPTIDE_TERMINAL_MARGIN,
            azole_lap_slack: DEFAULT_AZOLE_LAP_SLACK,
            min_dehydration_subset: DEFAULT_MIN_DEHYDRATION_SUBSET,
            pyridine_min_span: DEFAULT_PYRIDINE_MIN_SPAN,
            pyridine_max_span: DEFAULT_PYRIDINE_MAX_SPAN,
        }
    }
}

/// Complete configuration of a tailoring run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TailoringConfig {
    pub limits: SearchLimits,
    pub windows: AnnotatorWindows,
}

impl TailoringConfig {
    /// Loads a configuration from a TOML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Toml`] when the file cannot be
    /// read or parsed, and [`ConfigError::InvalidParameter`] when a value fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        let windows = &self.windows;
        let positive = [
            ("max_combinations", limits.max_combinations),
            ("max_combination_scan", limits.max_combination_scan),
            ("max_scaffolds", limits.max_scaffolds),
            ("plans_per_reaction", limits.plans_per_reaction),
            ("max_sampling_attempts", limits.max_sampling_attempts),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if limits.max_combination_scan < limits.max_combinations {
            return Err(ConfigError::InvalidParameter {
                name: "max_combination_scan",
                reason: format!(
                    "{} is smaller than max_combinations ({})",
                    limits.max_combination_scan, limits.max_combinations
                ),
            });
        }
        if windows.lasso_ring_start > windows.lasso_ring_end {
            return Err(ConfigError::InvalidParameter {
                name: "lasso_ring_start",
                reason: format!(
                    "{} exceeds lasso_ring_end ({})",
                    windows.lasso_ring_start, windows.lasso_ring_end
                ),
            });
        }
        if windows.pyridine_min_span == 0 || windows.pyridine_min_span > windows.pyridine_max_span {
            return Err(ConfigError::InvalidParameter {
                name: "pyridine_min_span",
                reason: format!(
                    "{} must be positive and at most pyridine_max_span ({})",
                    windows.pyridine_min_span, windows.pyridine_max_span
                ),
            });
        }
        if windows.sactipeptide_acceptor_spacing == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "sactipeptide_acceptor_spacing",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TailoringConfigBuilder {
    max_combinations: Option<usize>,
    max_combination_scan: Option<usize>,
    max_scaffolds: Option<usize>,
    plans_per_reaction: Option<usize>,
    sampling_seed: Option<u64>,
    max_sampling_attempts: Option<usize>,
    windows: Option<AnnotatorWindows>,
}

impl TailoringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_combinations(mut self, n: usize) -> Self {
        self.max_combinations = Some(n);
        self
    }
    pub fn max_combination_scan(mut self, n: usize) -> Self {
        self.max_combination_scan = Some(n);
        self
    }
    pub fn max_scaffolds(mut self, n: usize) -> Self {
        self.max_scaffolds = Some(n);
        self
    }
    pub fn plans_per_reaction(mut self, n: usize) -> Self {
        self.plans_per_reaction = Some(n);
        self
    }
    pub fn sampling_seed(mut self, seed: u64) -> Self {
        self.sampling_seed = Some(seed);
        self
    }
    pub fn max_sampling_attempts(mut self, n: usize) -> Self {
        self.max_sampling_attempts = Some(n);
        self
    }
    pub fn windows(mut self, windows: AnnotatorWindows) -> Self {
        self.windows = Some(windows);
        self
    }

    pub fn build(self) -> Result<TailoringConfig, ConfigError> {
        let defaults = SearchLimits::default();
        let config = TailoringConfig {
            limits: SearchLimits {
                max_combinations: self.max_combinations.unwrap_or(defaults.max_combinations),
                max_combination_scan: self
                    .max_combination_scan
                    .unwrap_or(defaults.max_combination_scan),
                max_scaffolds: self.max_scaffolds.unwrap_or(defaults.max_scaffolds),
                plans_per_reaction: self
                    .plans_per_reaction
                    .unwrap_or(defaults.plans_per_reaction),
                sampling_seed: self.sampling_seed.unwrap_or(defaults.sampling_seed),
                max_sampling_attempts: self
                    .max_sampling_attempts
                    .unwrap_or(defaults.max_sampling_attempts),
            },
            windows: self.windows.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
