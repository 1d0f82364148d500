// Dweve BenchPair - Paired Benchmark Result Analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Centralized analysis configuration.
//!
//! Replaces the fixed query/trial counts and column templates of the
//! benchmark schema with one value that is passed into the parser, the
//! aggregator and the pipeline.

use crate::classify::Engine;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of benchmark queries per result file.
pub const DEFAULT_QUERIES_NUMBER: usize = 14;

/// Number of trials recorded per query.
pub const DEFAULT_TEST_NUMBER: usize = 10;

/// Default field delimiter of result files.
pub const DEFAULT_DELIMITER: char = ';';

/// Column holding the averaged duration in the extended schema.
pub const DEFAULT_AGGREGATE_COLUMN: &str = "average[ns]";

/// Column holding the single duration in the simple schema.
pub const SIMPLE_AGGREGATE_COLUMN: &str = "time[ns]";

/// Column holding the query id written by the benchmark harness.
pub const DEFAULT_QUERY_ID_COLUMN: &str = "queryID";

/// Default maximum result file size (1 GB).
///
/// Can be overridden via the `BENCHPAIR_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "BENCHPAIR_MAX_FILE_SIZE";

/// Read the maximum file size from the environment or use the default.
fn default_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// How one engine is recognised and presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineProfile {
    /// File name marker, matched case-sensitively (e.g. `aMOR-`).
    pub marker: String,
    /// Legend label used in charts.
    pub label: String,
    /// Trace color handed to the renderer.
    pub color: String,
}

impl EngineProfile {
    /// Create a profile from its parts.
    pub fn new(
        marker: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            marker: marker.into(),
            label: label.into(),
            color: color.into(),
        }
    }

    /// Default baseline profile (aMOR).
    pub fn baseline() -> Self {
        Self::new("aMOR-", "aMOR", "rgb(49,130,189)")
    }

    /// Default competitor profile (OWL-API).
    pub fn competitor() -> Self {
        Self::new("OWLAPI-", "OWL-API", "rgb(204,50,50)")
    }
}

/// Configuration shared by the classifier, parser, aggregator and pipeline.
///
/// Every field has a default, so a JSON configuration file only needs to
/// name the values it changes.
///
/// # Examples
///
/// ```
/// use benchpair_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default()
///     .with_queries_number(4)
///     .with_test_number(3)
///     .with_delimiter(',');
///
/// assert_eq!(config.trial_column(2), "time2[ns]");
/// assert_eq!(config.trial_columns().len(), 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Expected data rows per file.
    pub queries_number: usize,
    /// Expected per-trial columns per row.
    pub test_number: usize,
    /// Field delimiter; must be a single ASCII character.
    pub delimiter: char,
    /// Column read in aggregate mode.
    pub aggregate_column: String,
    /// Prefix of per-trial column names.
    pub trial_column_prefix: String,
    /// Suffix of per-trial column names.
    pub trial_column_suffix: String,
    /// Optional query id column cross-checked against row order.
    pub query_id_column: Option<String>,
    /// Baseline engine profile.
    pub baseline: EngineProfile,
    /// Competitor engine profile.
    pub competitor: EngineProfile,
    /// Files larger than this many bytes are rejected before reading.
    pub max_file_size: u64,
    /// Substrings removed from a run id to form chart labels.
    pub label_strip: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            queries_number: DEFAULT_QUERIES_NUMBER,
            test_number: DEFAULT_TEST_NUMBER,
            delimiter: DEFAULT_DELIMITER,
            aggregate_column: DEFAULT_AGGREGATE_COLUMN.to_string(),
            trial_column_prefix: "time".to_string(),
            trial_column_suffix: "[ns]".to_string(),
            query_id_column: Some(DEFAULT_QUERY_ID_COLUMN.to_string()),
            baseline: EngineProfile::baseline(),
            competitor: EngineProfile::competitor(),
            max_file_size: default_max_file_size(),
            label_strip: vec!["uni".to_string(), "dep".to_string()],
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from JSON text; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::invalid_config(format!("malformed JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io_error(path, e))?;
        Self::from_json_str(&text)
    }

    /// Sets the expected query count.
    pub fn with_queries_number(mut self, queries_number: usize) -> Self {
        self.queries_number = queries_number;
        self
    }

    /// Sets the expected trial count.
    pub fn with_test_number(mut self, test_number: usize) -> Self {
        self.test_number = test_number;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the aggregate column name.
    pub fn with_aggregate_column(mut self, column: impl Into<String>) -> Self {
        self.aggregate_column = column.into();
        self
    }

    /// Sets both engine markers.
    pub fn with_markers(mut self, baseline: impl Into<String>, competitor: impl Into<String>) -> Self {
        self.baseline.marker = baseline.into();
        self.competitor.marker = competitor.into();
        self
    }

    /// Sets the query id column, or disables the cross-check with `None`.
    pub fn with_query_id_column(mut self, column: Option<String>) -> Self {
        self.query_id_column = column;
        self
    }

    /// Sets the maximum accepted file size in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Name of the per-trial column for a 1-based trial index.
    pub fn trial_column(&self, trial: usize) -> String {
        format!(
            "{}{}{}",
            self.trial_column_prefix, trial, self.trial_column_suffix
        )
    }

    /// All per-trial column names in trial order.
    pub fn trial_columns(&self) -> Vec<String> {
        (1..=self.test_number).map(|k| self.trial_column(k)).collect()
    }

    /// Profile of the given engine.
    pub fn profile(&self, engine: Engine) -> &EngineProfile {
        match engine {
            Engine::Baseline => &self.baseline,
            Engine::Competitor => &self.competitor,
        }
    }

    /// Delimiter as the byte the reader and writer expect.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(AnalysisError::invalid_config(format!(
                "delimiter '{}' is not a single ASCII character",
                self.delimiter
            )))
        }
    }

    /// Chart label of a run id: the run id with `label_strip` removed.
    ///
    /// Falls back to the run id itself when stripping leaves nothing.
    pub fn chart_label(&self, run_id: &str) -> String {
        let label = self
            .label_strip
            .iter()
            .filter(|s| !s.is_empty())
            .fold(run_id.to_string(), |acc, s| acc.replace(s.as_str(), ""));
        if label.is_empty() {
            run_id.to_string()
        } else {
            label
        }
    }

    /// Check the configuration for values no result file could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.queries_number == 0 {
            return Err(AnalysisError::invalid_config("queries_number must be at least 1"));
        }
        if self.test_number == 0 {
            return Err(AnalysisError::invalid_config("test_number must be at least 1"));
        }
        self.delimiter_byte()?;
        if self.delimiter == '"' || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(AnalysisError::invalid_config(format!(
                "delimiter {:?} cannot separate fields",
                self.delimiter
            )));
        }
        if self.aggregate_column.trim().is_empty() {
            return Err(AnalysisError::invalid_config("aggregate_column must not be empty"));
        }
        for (name, profile) in [("baseline", &self.baseline), ("competitor", &self.competitor)] {
            if profile.marker.is_empty() {
                return Err(AnalysisError::invalid_config(format!(
                    "{} marker must not be empty",
                    name
                )));
            }
        }
        if self.baseline.marker == self.competitor.marker {
            return Err(AnalysisError::invalid_config(format!(
                "baseline and competitor markers are both '{}'",
                self.baseline.marker
            )));
        }
        let (baseline, competitor) = (&self.baseline.marker, &self.competitor.marker);
        if baseline.contains(competitor.as_str()) || competitor.contains(baseline.as_str()) {
            return Err(AnalysisError::invalid_config(format!(
                "markers '{}' and '{}' overlap; every name carrying the longer one would contain both",
                baseline, competitor
            )));
        }
        Ok(())
    }
}
