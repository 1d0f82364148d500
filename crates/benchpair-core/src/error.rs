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

//! Error types for classification, pairing, parsing and aggregation.

use crate::classify::{Engine, RunId};
use std::path::PathBuf;
use thiserror::Error;

/// Coarse fault category used for reporting.
///
/// Every [`AnalysisError`] maps onto exactly one category so that the
/// command-line summary can group failures the way operators think about
/// them (file naming problems, missing partners, broken tables, I/O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaultKind {
    /// File name matches both markers or carries a misplaced marker.
    ClassificationAmbiguity,
    /// A run id does not have exactly one file per engine.
    PairingIncompleteGroup,
    /// Parsed row count differs from the configured query count.
    SchemaRowCountMismatch,
    /// A duration cell (or a required column) is missing or not numeric.
    SchemaFieldParseFailure,
    /// File could not be read.
    IoFailure,
    /// Parsed tables violate an aggregation invariant.
    AggregationInvariant,
    /// Configuration is unusable.
    Configuration,
}

impl FaultKind {
    /// Short stable name used in summaries and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::ClassificationAmbiguity => "classification-ambiguity",
            FaultKind::PairingIncompleteGroup => "pairing-incomplete-group",
            FaultKind::SchemaRowCountMismatch => "schema-row-count-mismatch",
            FaultKind::SchemaFieldParseFailure => "schema-field-parse-failure",
            FaultKind::IoFailure => "io-failure",
            FaultKind::AggregationInvariant => "aggregation-invariant",
            FaultKind::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while turning a result tree into comparison series.
///
/// Implements `Clone` so pair outcomes can be carried out of a parallel
/// fan-out and reported afterwards.
///
/// # Examples
///
/// ```
/// use benchpair_core::{AnalysisError, FaultKind};
///
/// let err = AnalysisError::RowCountMismatch {
///     path: "aMOR-uni0dep0.csv".into(),
///     expected: 14,
///     actual: 13,
/// };
/// assert_eq!(err.kind(), FaultKind::SchemaRowCountMismatch);
/// assert_eq!(
///     err.to_string(),
///     "'aMOR-uni0dep0.csv' has 13 data rows, expected 14"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// File name cannot be attributed to exactly one engine.
    #[error("Ambiguous result file name '{file_name}': {reason}")]
    ClassificationAmbiguity {
        /// The offending file name.
        file_name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A run id is missing a partner or has duplicates.
    #[error(
        "Run '{run_id}' has {baseline} baseline and {competitor} competitor files, expected exactly one of each"
    )]
    IncompleteGroup {
        /// The run id of the group.
        run_id: String,
        /// Number of baseline files found.
        baseline: usize,
        /// Number of competitor files found.
        competitor: usize,
    },

    /// Data row count differs from the configured query count.
    #[error("'{path}' has {actual} data rows, expected {expected}")]
    RowCountMismatch {
        /// File that was parsed.
        path: PathBuf,
        /// Configured query count.
        expected: usize,
        /// Rows actually seen (may stop early at `expected + 1`).
        actual: usize,
    },

    /// A required header column is absent.
    #[error("'{path}' is missing required column '{column}'")]
    MissingColumn {
        /// File that was parsed.
        path: PathBuf,
        /// Column name looked up.
        column: String,
    },

    /// A duration cell is not a non-negative integer.
    #[error("'{path}' row {row}, column '{column}': '{value}' is not a duration in nanoseconds")]
    FieldParse {
        /// File that was parsed.
        path: PathBuf,
        /// Data row number (1-based, header excluded).
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// Malformed delimited text reported by the reader.
    #[error("'{path}' is not a readable timing table: {message}")]
    Csv {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying reader message.
        message: String,
    },

    /// I/O failure on a file or directory.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// File exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// Path that was rejected.
        path: PathBuf,
        /// Size on disk.
        actual: u64,
        /// Configured limit.
        max: u64,
    },

    /// The two tables of a pair were parsed in different modes.
    #[error("Run '{run_id}': {engine} table was parsed in {actual} mode, expected {expected}")]
    ModeMismatch {
        /// Run id of the pair.
        run_id: String,
        /// Engine whose table disagrees.
        engine: Engine,
        /// Expected mode name.
        expected: &'static str,
        /// Actual mode name.
        actual: &'static str,
    },

    /// A table does not cover exactly the queries `1..=N`.
    #[error("Run '{run_id}': {engine} queries do not cover 1..={expected} (found {found} records)")]
    DomainMismatch {
        /// Run id of the pair.
        run_id: String,
        /// Engine whose table disagrees.
        engine: Engine,
        /// Configured query count.
        expected: usize,
        /// Records present.
        found: usize,
    },

    /// A per-trial sample list has the wrong length.
    #[error("Run '{run_id}': {engine} query {query} has {actual} trials, expected {expected}")]
    TrialCountMismatch {
        /// Run id of the pair.
        run_id: String,
        /// Engine whose table disagrees.
        engine: Engine,
        /// Query index.
        query: usize,
        /// Configured trial count.
        expected: usize,
        /// Samples present.
        actual: usize,
    },

    /// Configuration rejected before any processing.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for `Result` with `AnalysisError`.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Create an I/O error carrying the failing path.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a size-limit error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
        }
    }

    /// Wrap a reader error, promoting I/O failures to [`AnalysisError::Io`].
    pub fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        if err.is_io_error() {
            let message = err.to_string();
            return Self::Io { path, message };
        }
        Self::Csv {
            path,
            message: err.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Fault category of this error.
    pub fn kind(&self) -> FaultKind {
        match self {
            AnalysisError::ClassificationAmbiguity { .. } => FaultKind::ClassificationAmbiguity,
            AnalysisError::IncompleteGroup { .. } => FaultKind::PairingIncompleteGroup,
            AnalysisError::RowCountMismatch { .. } => FaultKind::SchemaRowCountMismatch,
            AnalysisError::MissingColumn { .. }
            | AnalysisError::FieldParse { .. }
            | AnalysisError::Csv { .. } => FaultKind::SchemaFieldParseFailure,
            AnalysisError::Io { .. } | AnalysisError::FileTooLarge { .. } => FaultKind::IoFailure,
            AnalysisError::ModeMismatch { .. }
            | AnalysisError::DomainMismatch { .. }
            | AnalysisError::TrialCountMismatch { .. } => FaultKind::AggregationInvariant,
            AnalysisError::InvalidConfig(_) => FaultKind::Configuration,
        }
    }
}

/// A recorded, non-fatal fault attributed to a run and/or a file.
///
/// Faults never abort a batch; they are collected while the remaining runs
/// are processed and reported at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    /// Run the fault belongs to, when known.
    pub run_id: Option<RunId>,
    /// File involved, when the fault concerns a single file.
    pub path: Option<PathBuf>,
    /// The underlying error.
    pub error: AnalysisError,
}

impl Fault {
    /// Create a fault for a whole run.
    pub fn for_run(run_id: RunId, error: AnalysisError) -> Self {
        Self {
            run_id: Some(run_id),
            path: None,
            error,
        }
    }

    /// Create a fault for a single file.
    pub fn for_file(path: impl Into<PathBuf>, run_id: Option<RunId>, error: AnalysisError) -> Self {
        Self {
            run_id,
            path: Some(path.into()),
            error,
        }
    }

    /// Fault category.
    pub fn kind(&self) -> FaultKind {
        self.error.kind()
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.run_id {
            Some(run_id) => write!(f, "[{}] {}: {}", self.kind(), run_id, self.error),
            None => write!(f, "[{}] {}", self.kind(), self.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_group_display() {
        let err = AnalysisError::IncompleteGroup {
            run_id: "uni0dep1".to_string(),
            baseline: 2,
            competitor: 0,
        };
        assert_eq!(
            err.to_string(),
            "Run 'uni0dep1' has 2 baseline and 0 competitor files, expected exactly one of each"
        );
        assert_eq!(err.kind(), FaultKind::PairingIncompleteGroup);
    }

    #[test]
    fn test_field_parse_display() {
        let err = AnalysisError::FieldParse {
            path: PathBuf::from("a.csv"),
            row: 3,
            column: "time2[ns]".to_string(),
            value: "fast".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'a.csv' row 3, column 'time2[ns]': 'fast' is not a duration in nanoseconds"
        );
        assert_eq!(err.kind(), FaultKind::SchemaFieldParseFailure);
    }

    #[test]
    fn test_missing_column_is_schema_fault() {
        let err = AnalysisError::MissingColumn {
            path: PathBuf::from("a.csv"),
            column: "average[ns]".to_string(),
        };
        assert_eq!(err.kind(), FaultKind::SchemaFieldParseFailure);
        assert!(err.to_string().contains("average[ns]"));
    }

    #[test]
    fn test_io_error_helper() {
        let err = AnalysisError::io_error(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.csv"));
        assert!(msg.contains("file not found"));
        assert_eq!(err.kind(), FaultKind::IoFailure);
    }

    #[test]
    fn test_file_too_large_is_io_fault() {
        let err = AnalysisError::file_too_large("big.csv", 2048, 1024);
        assert_eq!(err.kind(), FaultKind::IoFailure);
        assert!(err.to_string().contains("2048 bytes"));
    }

    #[test]
    fn test_fault_kind_names() {
        assert_eq!(
            FaultKind::ClassificationAmbiguity.to_string(),
            "classification-ambiguity"
        );
        assert_eq!(FaultKind::IoFailure.as_str(), "io-failure");
    }

    #[test]
    fn test_fault_display_includes_run_and_kind() {
        let fault = Fault::for_run(
            RunId::new("uni0dep0"),
            AnalysisError::IncompleteGroup {
                run_id: "uni0dep0".to_string(),
                baseline: 1,
                competitor: 0,
            },
        );
        let text = fault.to_string();
        assert!(text.starts_with("[pairing-incomplete-group] uni0dep0:"));
        assert_eq!(fault.kind(), FaultKind::PairingIncompleteGroup);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisError>();
    }
}
