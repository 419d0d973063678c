//! Analysis configuration
//!
//! Default thresholds and limits for the analysis queries, loadable from a
//! YAML file. Every field has a default, so a file only needs to name the
//! values it changes.

use crate::algo::{SimilarityOptions, TieBreak};
use crate::graph::{BuildOptions, ScorePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Analysis defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Threshold for listing a node's associations
    pub association_threshold: f64,
    /// Threshold for common-neighbor queries
    pub common_threshold: f64,
    /// Threshold for similarity ranking
    pub similarity_threshold: f64,
    /// Threshold for connectivity ranking
    pub ranking_threshold: f64,
    /// Number of similar nodes to return
    pub similarity_top_n: usize,
    /// Number of nodes in a connectivity ranking
    pub ranking_limit: usize,
    /// Degree a node must exceed to join a hub subgraph
    pub hub_min_degree: usize,
    pub tie_break: TieBreak,
    pub include_unrelated: bool,
    pub score_policy: ScorePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            association_threshold: 0.0,
            common_threshold: 0.5,
            similarity_threshold: 0.6,
            ranking_threshold: 0.6,
            similarity_top_n: 5,
            ranking_limit: 5,
            hub_min_degree: 15,
            tie_break: TieBreak::InsertionOrder,
            include_unrelated: false,
            score_policy: ScorePolicy::PassThrough,
        }
    }
}

impl AnalysisConfig {
    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded analysis configuration from {:?}", path);
        Ok(config)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            score_policy: self.score_policy,
        }
    }

    pub fn similarity_options(&self) -> SimilarityOptions {
        SimilarityOptions {
            tie_break: self.tie_break,
            include_unrelated: self.include_unrelated,
        }
    }
}
