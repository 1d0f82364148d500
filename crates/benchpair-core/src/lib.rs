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

//! Paired benchmark result analysis.
//!
//! Two query engines (a baseline and a competitor) run the same benchmark
//! and each writes one timing table per run. This crate finds those tables
//! in a directory tree, pairs them by run id, parses them and shapes their
//! timings into per-query series ready for charting.
//!
//! # Features
//!
//! - **Classification**: engine and run id from a file name marker
//! - **Keyed pairing**: files are grouped by run id, never by position
//! - **Schema checks**: row count, column presence and numeric cells are verified
//! - **Aggregation**: grouped averages or per-trial distributions per query
//! - **Rendering seam**: a [`ComparisonRenderer`] turns series into charts
//! - **Fault isolation**: a broken run is reported, the others still complete
//!
//! # Examples
//!
//! ```no_run
//! use benchpair_core::{Analyzer, AnalysisConfig, ParseMode};
//! use std::path::Path;
//!
//! let config = AnalysisConfig::default();
//! let report = Analyzer::new(config).analyze(Path::new("results"), ParseMode::Aggregate)?;
//!
//! for series in report.series() {
//!     println!(
//!         "{}: {:?} vs {:?}",
//!         series.run_id,
//!         series.baseline.averages(),
//!         series.competitor.averages()
//!     );
//! }
//! for fault in report.faults() {
//!     eprintln!("{}", fault);
//! }
//! # Ok::<(), benchpair_core::AnalysisError>(())
//! ```
//!
//! ## Parsing a single table
//!
//! ```
//! use benchpair_core::{parse_timing_reader, AnalysisConfig, ParseMode, Timing};
//!
//! let config = AnalysisConfig::default().with_queries_number(1).with_test_number(2);
//! let text = "queryID;time1[ns];time2[ns];average[ns]\n1;100;300;200\n";
//!
//! let table = parse_timing_reader(text.as_bytes(), "inline", ParseMode::PerTrial, &config)?;
//! assert_eq!(table.records[0].timing, Timing::Samples(vec![100, 300]));
//! # Ok::<(), benchpair_core::AnalysisError>(())
//! ```

#![warn(missing_docs)]

mod classify;
mod config;
mod error;
mod pairing;
mod parse;
mod pipeline;
mod render;
mod series;
mod stats;
mod write;

pub use classify::{Classification, Classifier, Engine, ResultFile, RunId};
pub use config::{
    AnalysisConfig, EngineProfile, DEFAULT_AGGREGATE_COLUMN, DEFAULT_DELIMITER,
    DEFAULT_MAX_FILE_SIZE, DEFAULT_QUERIES_NUMBER, DEFAULT_QUERY_ID_COLUMN, DEFAULT_TEST_NUMBER,
    MAX_FILE_SIZE_ENV, SIMPLE_AGGREGATE_COLUMN,
};
pub use error::{AnalysisError, Fault, FaultKind, Result};
pub use pairing::{discover, group_by_run, pair_results, Discovery, PairingReport, ResultPair};
pub use parse::{parse_timing_file, parse_timing_reader, ParseMode, QueryRecord, Timing, TimingTable};
pub use pipeline::{AnalysisReport, Analyzer, PairOutcome, ProcessorConfig};
pub use render::{render_series_pair, ChartKind, ComparisonRenderer, RenderedChart, RenderedCharts};
pub use series::{build_series, EngineSeries, SeriesPair};
pub use stats::DistributionSummary;
pub use write::{timing_table_to_string, write_timing_table};
