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

//! Structured error types for the BenchPair CLI.
//!
//! This module provides a comprehensive error type hierarchy using `thiserror`
//! for all CLI operations. Analysis errors keep their own type and are wrapped
//! as they are, so their fault category survives up to the exit summary.

use benchpair_core::AnalysisError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for BenchPair CLI operations.
///
/// All variants implement `Clone` so chart writing failures can be carried
/// into the final summary.
///
/// # Examples
///
/// ```rust,no_run
/// use benchpair_cli::error::CliError;
/// use std::fs;
///
/// fn read_config(path: &str) -> Result<String, CliError> {
///     fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Analysis could not start or a chart could not be built.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// I/O operation failed.
    ///
    /// This error includes the file path and the error kind/message.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON serialization failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// Detailed error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use benchpair_cli::error::CliError;
    ///
    /// let err = CliError::invalid_input("--format must be 'text' or 'json'");
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

// Automatic conversion from serde_json::Error
impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}
