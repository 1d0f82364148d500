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

//! Builder pattern for timing tables and result trees.
//!
//! This module provides fluent builders for the text of a timing table and
//! for on-disk result trees laid out the way the benchmark harness writes
//! them (`<root>/<runId>/<marker><runId>.csv`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Timestamp of the first row, in milliseconds.
const BASE_TIMESTAMP_MS: u64 = 1_489_402_126_000;

/// Header layout of a generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingSchema {
    /// `timestamp[ms];uniID;depID;queryID;time1[ns]..timeN[ns];average[ns];Complexity;resultSize;resultMapToString`
    Extended,
    /// `timestamp[ms];uniID;depID;queryID;time[ns]`
    Simple,
}

/// Builder for the text of one timing table.
///
/// Samples are deterministic: trial `k` of query `q` takes
/// `seed + q * 1_000_000 + k * 1_000` nanoseconds unless overridden.
///
/// # Examples
///
/// ```
/// use benchpair_test::fixtures::builders::TimingFileBuilder;
///
/// let text = TimingFileBuilder::new(2, 3).seed(500).build();
/// let mut lines = text.lines();
/// assert!(lines.next().unwrap().starts_with("timestamp[ms];uniID;depID;queryID;time1[ns]"));
/// assert_eq!(lines.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TimingFileBuilder {
    schema: TimingSchema,
    delimiter: char,
    trials: usize,
    seed: u64,
    samples: BTreeMap<usize, Vec<u64>>,
    queries: usize,
    overrides: BTreeMap<(usize, String), String>,
    omitted: Vec<String>,
    extra_rows: usize,
    swapped_ids: bool,
}

impl TimingFileBuilder {
    /// Creates a builder for `queries` rows of `trials` samples each.
    pub fn new(queries: usize, trials: usize) -> Self {
        Self {
            schema: TimingSchema::Extended,
            delimiter: ';',
            trials,
            seed: 0,
            samples: BTreeMap::new(),
            queries,
            overrides: BTreeMap::new(),
            omitted: Vec::new(),
            extra_rows: 0,
            swapped_ids: false,
        }
    }

    /// Sets the seed added to every generated sample.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the header layout.
    pub fn schema(mut self, schema: TimingSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the samples of one query (1-based).
    pub fn samples(mut self, query: usize, samples: Vec<u64>) -> Self {
        self.samples.insert(query, samples);
        self
    }

    /// Replaces one cell of one query row with raw text.
    pub fn cell(mut self, query: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert((query, column.into()), value.into());
        self
    }

    /// Drops a column from the header and every row.
    pub fn omit_column(mut self, column: impl Into<String>) -> Self {
        self.omitted.push(column.into());
        self
    }

    /// Appends rows beyond the query count.
    pub fn extra_rows(mut self, rows: usize) -> Self {
        self.extra_rows = rows;
        self
    }

    /// Writes the query ids of the first two rows in swapped order.
    pub fn swap_first_query_ids(mut self) -> Self {
        self.swapped_ids = true;
        self
    }

    /// Samples of a query, generated or overridden.
    pub fn row_samples(&self, query: usize) -> Vec<u64> {
        match self.samples.get(&query) {
            Some(samples) => samples.clone(),
            None => (1..=self.trials)
                .map(|k| self.seed + query as u64 * 1_000_000 + k as u64 * 1_000)
                .collect(),
        }
    }

    /// Integer average of a query's samples.
    pub fn row_average(&self, query: usize) -> u64 {
        let samples = self.row_samples(query);
        if samples.is_empty() {
            return 0;
        }
        samples.iter().sum::<u64>() / samples.len() as u64
    }

    fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = ["timestamp[ms]", "uniID", "depID", "queryID"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        match self.schema {
            TimingSchema::Extended => {
                header.extend((1..=self.trials).map(|k| format!("time{}[ns]", k)));
                header.extend(
                    ["average[ns]", "Complexity", "resultSize", "resultMapToString"]
                        .iter()
                        .map(|s| s.to_string()),
                );
            }
            TimingSchema::Simple => header.push("time[ns]".to_string()),
        }
        header
    }

    fn row(&self, header: &[String], row: usize) -> Vec<String> {
        let query = row.min(self.queries.max(1));
        let declared_id = match (self.swapped_ids, row) {
            (true, 1) => 2,
            (true, 2) => 1,
            _ => row,
        };
        let samples = self.row_samples(query);

        header
            .iter()
            .map(|column| {
                if let Some(value) = self.overrides.get(&(row, column.clone())) {
                    return value.clone();
                }
                match column.as_str() {
                    "timestamp[ms]" => (BASE_TIMESTAMP_MS + row as u64 * 37).to_string(),
                    "uniID" | "depID" => "0".to_string(),
                    "queryID" => declared_id.to_string(),
                    "average[ns]" | "time[ns]" => self.row_average(query).to_string(),
                    "Complexity" => (row % 5).to_string(),
                    "resultSize" => (row * 3).to_string(),
                    "resultMapToString" => format!("{{?X=[Student{}, Course{}]}}", row, row),
                    trial => trial
                        .strip_prefix("time")
                        .and_then(|rest| rest.strip_suffix("[ns]"))
                        .and_then(|k| k.parse::<usize>().ok())
                        .and_then(|k| k.checked_sub(1))
                        .and_then(|i| samples.get(i))
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Builds the table text.
    pub fn build(&self) -> String {
        let header: Vec<String> = self
            .header()
            .into_iter()
            .filter(|c| !self.omitted.contains(c))
            .collect();
        let delimiter = self.delimiter.to_string();

        let mut out = header.join(&delimiter);
        out.push('\n');
        for row in 1..=self.queries + self.extra_rows {
            out.push_str(&self.row(&header, row).join(&delimiter));
            out.push('\n');
        }
        out
    }
}

/// Builder for an on-disk result tree in a temporary directory.
///
/// # Examples
///
/// ```
/// use benchpair_test::fixtures::builders::{ResultTreeBuilder, TimingFileBuilder};
///
/// let table = TimingFileBuilder::new(14, 10).build();
/// let tree = ResultTreeBuilder::new()
///     .run("uni0dep0", &table, &table)
///     .build();
///
/// assert!(tree.path().join("uni0dep0/aMOR-uni0dep0.csv").exists());
/// assert!(tree.path().join("uni0dep0/OWLAPI-uni0dep0.csv").exists());
/// ```
#[derive(Debug, Clone)]
pub struct ResultTreeBuilder {
    baseline_marker: String,
    competitor_marker: String,
    extension: String,
    files: Vec<(PathBuf, String)>,
}

impl Default for ResultTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultTreeBuilder {
    /// Creates a builder with the `aMOR-` / `OWLAPI-` markers.
    pub fn new() -> Self {
        Self {
            baseline_marker: "aMOR-".to_string(),
            competitor_marker: "OWLAPI-".to_string(),
            extension: "csv".to_string(),
            files: Vec::new(),
        }
    }

    /// Sets the engine markers used by [`run`](Self::run).
    pub fn markers(mut self, baseline: impl Into<String>, competitor: impl Into<String>) -> Self {
        self.baseline_marker = baseline.into();
        self.competitor_marker = competitor.into();
        self
    }

    /// Adds a run directory holding one file per engine.
    pub fn run(self, run_id: &str, baseline: &str, competitor: &str) -> Self {
        let baseline_name = format!("{}/{}{}.{}", run_id, self.baseline_marker, run_id, self.extension);
        let competitor_name =
            format!("{}/{}{}.{}", run_id, self.competitor_marker, run_id, self.extension);
        self.file(baseline_name, baseline).file(competitor_name, competitor)
    }

    /// Adds a baseline file without a competitor partner.
    pub fn baseline_only(self, run_id: &str, contents: &str) -> Self {
        let name = format!("{}/{}{}.{}", run_id, self.baseline_marker, run_id, self.extension);
        self.file(name, contents)
    }

    /// Adds a file at a path relative to the root.
    pub fn file(mut self, relative: impl Into<PathBuf>, contents: &str) -> Self {
        self.files.push((relative.into(), contents.to_string()));
        self
    }

    /// Writes every file into a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or a file cannot be created.
    pub fn build(self) -> ResultTree {
        let dir = TempDir::new().expect("create temporary result tree");
        for (relative, contents) in &self.files {
            let path = dir.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create run directory");
            }
            fs::write(&path, contents).expect("write result file");
        }
        ResultTree { dir }
    }
}

/// A result tree on disk, removed when dropped.
#[derive(Debug)]
pub struct ResultTree {
    dir: TempDir,
}

impl ResultTree {
    /// Root directory of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_samples_are_deterministic() {
        let builder = TimingFileBuilder::new(3, 2).seed(7);
        assert_eq!(builder.row_samples(1), vec![1_001_007, 1_002_007]);
        assert_eq!(builder.row_average(1), 1_001_507);
        assert_eq!(builder.build(), TimingFileBuilder::new(3, 2).seed(7).build());
    }

    #[test]
    fn test_extended_row_layout() {
        let text = TimingFileBuilder::new(1, 2).samples(1, vec![10, 21]).build();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp[ms];uniID;depID;queryID;time1[ns];time2[ns];average[ns];Complexity;resultSize;resultMapToString"
        );
        let cells: Vec<&str> = lines[1].split(';').collect();
        assert_eq!(&cells[3..7], &["1", "10", "21", "15"]);
    }

    #[test]
    fn test_simple_schema() {
        let text = TimingFileBuilder::new(1, 2)
            .schema(TimingSchema::Simple)
            .samples(1, vec![4, 6])
            .build();
        assert!(text.starts_with("timestamp[ms];uniID;depID;queryID;time[ns]\n"));
        assert!(text.lines().nth(1).unwrap().ends_with(";1;5"));
    }

    #[test]
    fn test_cell_override_and_omitted_column() {
        let text = TimingFileBuilder::new(2, 1)
            .cell(2, "time1[ns]", "slow")
            .omit_column("resultMapToString")
            .build();
        assert!(!text.contains("resultMapToString"));
        assert!(text.lines().nth(2).unwrap().contains(";slow;"));
    }

    #[test]
    fn test_extra_rows() {
        let text = TimingFileBuilder::new(2, 1).extra_rows(1).build();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_tree_layout() {
        let tree = ResultTreeBuilder::new()
            .markers("Baseline-", "Competitor-")
            .run("uniX", "a", "b")
            .baseline_only("uniY", "c")
            .file("notes.txt", "hello")
            .build();
        assert!(tree.path().join("uniX/Baseline-uniX.csv").is_file());
        assert!(tree.path().join("uniX/Competitor-uniX.csv").is_file());
        assert!(tree.path().join("uniY/Baseline-uniY.csv").is_file());
        assert!(tree.path().join("notes.txt").is_file());
    }
}
