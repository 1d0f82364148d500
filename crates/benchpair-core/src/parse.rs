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

//! Timing table parsing.
//!
//! A result file is a delimited table with a header row and one data row per
//! benchmark query:
//!
//! ```text
//! timestamp[ms];uniID;depID;queryID;time1[ns];...;time10[ns];average[ns];Complexity;resultSize;resultMapToString
//! 1489402126000;0;0;1;5061312;...;2312846;2957071;5;4;{...}
//! ```
//!
//! Columns are looked up by header name. Row order is authoritative for the
//! query index: the first data row is query 1. Only the columns that are read
//! must be UTF-8; free-text columns may carry any encoding.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use csv::ByteRecord;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which columns of a timing table are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// One duration per query from the aggregate column.
    Aggregate,
    /// One duration per trial from the per-trial columns.
    PerTrial,
}

impl ParseMode {
    /// Lowercase mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Aggregate => "aggregate",
            ParseMode::PerTrial => "per-trial",
        }
    }
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durations recorded for one query, in nanoseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timing {
    /// Single aggregate duration.
    Aggregate(u64),
    /// One duration per trial, in trial order.
    Samples(Vec<u64>),
}

impl Timing {
    /// Mode this timing was parsed in.
    pub fn mode(&self) -> ParseMode {
        match self {
            Timing::Aggregate(_) => ParseMode::Aggregate,
            Timing::Samples(_) => ParseMode::PerTrial,
        }
    }
}

/// One data row of a timing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// 1-based query index taken from the row position.
    pub query_index: usize,
    /// Parsed durations.
    pub timing: Timing,
}

/// Ordered query records parsed from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingTable {
    /// Source of the table (file path or a caller-supplied label).
    pub path: PathBuf,
    /// Mode the table was parsed in.
    pub mode: ParseMode,
    /// Records in query order.
    pub records: Vec<QueryRecord>,
}

impl TimingTable {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Column positions resolved from the header row.
struct ColumnLayout {
    /// `(header name, index)` of every duration column, in output order.
    durations: Vec<(String, usize)>,
    query_id: Option<(String, usize)>,
}

impl ColumnLayout {
    fn resolve(
        headers: &ByteRecord,
        path: &Path,
        mode: ParseMode,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let wanted = match mode {
            ParseMode::Aggregate => vec![config.aggregate_column.clone()],
            ParseMode::PerTrial => config.trial_columns(),
        };

        let mut durations = Vec::with_capacity(wanted.len());
        for column in wanted {
            let idx = find_column(headers, &column).ok_or_else(|| AnalysisError::MissingColumn {
                path: path.to_path_buf(),
                column: column.clone(),
            })?;
            durations.push((column, idx));
        }

        let query_id = config
            .query_id_column
            .as_ref()
            .and_then(|name| find_column(headers, name).map(|idx| (name.clone(), idx)));

        Ok(Self {
            durations,
            query_id,
        })
    }
}

fn find_column(headers: &ByteRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name.as_bytes())
}

/// Text of one cell; absent cells are empty.
fn cell(record: &ByteRecord, idx: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(record.get(idx).unwrap_or_default())
}

fn parse_duration(record: &ByteRecord, idx: usize, column: &str, row: usize, path: &Path) -> Result<u64> {
    let raw = cell(record, idx);
    raw.parse::<u64>().map_err(|_| AnalysisError::FieldParse {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a timing table from any reader.
///
/// `source` names the table in errors and in the returned [`TimingTable`].
///
/// # Errors
///
/// - [`AnalysisError::MissingColumn`] if a required header is absent
/// - [`AnalysisError::RowCountMismatch`] if the table does not have exactly
///   `queries_number` data rows
/// - [`AnalysisError::FieldParse`] if a duration cell is absent, negative or
///   not an integer
/// - [`AnalysisError::Csv`] / [`AnalysisError::Io`] if the text cannot be read
///
/// # Examples
///
/// ```
/// use benchpair_core::{parse_timing_reader, AnalysisConfig, ParseMode, Timing};
///
/// let config = AnalysisConfig::default().with_queries_number(2);
/// let text = "queryID;average[ns]\n1;250\n2;300\n";
///
/// let table = parse_timing_reader(text.as_bytes(), "inline", ParseMode::Aggregate, &config)?;
/// assert_eq!(table.records[1].timing, Timing::Aggregate(300));
/// # Ok::<(), benchpair_core::AnalysisError>(())
/// ```
pub fn parse_timing_reader<R: Read>(
    reader: R,
    source: impl AsRef<Path>,
    mode: ParseMode,
    config: &AnalysisConfig,
) -> Result<TimingTable> {
    let path = source.as_ref();
    let delimiter = config.delimiter_byte()?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .byte_headers()
        .map_err(|e| AnalysisError::from_csv(path, e))?
        .clone();
    let layout = ColumnLayout::resolve(&headers, path, mode, config)?;

    let expected = config.queries_number;
    let mut records = Vec::with_capacity(expected);
    let mut record = ByteRecord::new();
    let mut row = 0usize;

    while csv_reader
        .read_byte_record(&mut record)
        .map_err(|e| AnalysisError::from_csv(path, e))?
    {
        row += 1;
        if row > expected {
            return Err(AnalysisError::RowCountMismatch {
                path: path.to_path_buf(),
                expected,
                actual: row,
            });
        }

        if let Some((column, idx)) = &layout.query_id {
            let declared = cell(&record, *idx);
            if declared.parse::<usize>().ok() != Some(row) {
                warn!(
                    path = %path.display(),
                    row,
                    column = %column,
                    declared = %declared,
                    "query id disagrees with row position; using row position"
                );
            }
        }

        let timing = match mode {
            ParseMode::Aggregate => {
                let (column, idx) = &layout.durations[0];
                Timing::Aggregate(parse_duration(&record, *idx, column, row, path)?)
            }
            ParseMode::PerTrial => {
                let samples = layout
                    .durations
                    .iter()
                    .map(|(column, idx)| parse_duration(&record, *idx, column, row, path))
                    .collect::<Result<Vec<u64>>>()?;
                Timing::Samples(samples)
            }
        };

        records.push(QueryRecord {
            query_index: row,
            timing,
        });
    }

    if row != expected {
        return Err(AnalysisError::RowCountMismatch {
            path: path.to_path_buf(),
            expected,
            actual: row,
        });
    }

    debug!(path = %path.display(), mode = %mode, rows = row, "parsed timing table");

    Ok(TimingTable {
        path: path.to_path_buf(),
        mode,
        records,
    })
}

/// Parse a timing table from a file, enforcing the configured size limit.
pub fn parse_timing_file(path: &Path, mode: ParseMode, config: &AnalysisConfig) -> Result<TimingTable> {
    let metadata = std::fs::metadata(path).map_err(|e| AnalysisError::io_error(path, e))?;
    if metadata.len() > config.max_file_size {
        return Err(AnalysisError::file_too_large(
            path,
            metadata.len(),
            config.max_file_size,
        ));
    }

    let file = File::open(path).map_err(|e| AnalysisError::io_error(path, e))?;
    parse_timing_reader(BufReader::new(file), path, mode, config)
}
