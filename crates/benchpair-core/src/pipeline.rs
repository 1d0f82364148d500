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

//! Pair processing pipeline.
//!
//! Runs the pairing pass over a result tree, then parses and aggregates
//! every pair. Pairs are independent: a fault ends the processing of its own
//! pair and is recorded, the remaining pairs carry on.
//!
//! # Performance
//!
//! Small batches are processed serially. Once the number of pairs reaches
//! [`ProcessorConfig::parallel_threshold`] they are fanned out over a rayon
//! pool. `par_iter` keeps input order, so outcomes always come back in run
//! id order.

use crate::classify::{Engine, RunId};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Fault, Result};
use crate::pairing::{pair_results, ResultPair};
use crate::parse::{parse_timing_file, ParseMode};
use crate::series::{build_series, SeriesPair};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Controls how pairs are scheduled.
///
/// # Examples
///
/// ```rust
/// use benchpair_core::ProcessorConfig;
///
/// let processor = ProcessorConfig {
///     parallel_threshold: 4, // Parallelize from 4 pairs on
///     max_threads: Some(2),  // Use at most 2 threads
/// };
/// assert_eq!(ProcessorConfig::default().parallel_threshold, 10);
/// # let _ = processor;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Minimum number of pairs to trigger parallel processing.
    ///
    /// Default: 10
    pub parallel_threshold: usize,

    /// Maximum number of threads for parallel processing.
    ///
    /// None means rayon's default (typically number of CPU cores).
    pub max_threads: Option<usize>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
        }
    }
}

impl ProcessorConfig {
    /// Process every pair on the calling thread.
    pub fn serial() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            max_threads: None,
        }
    }
}

/// Result of processing one pair.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    /// The processed pair.
    pub pair: ResultPair,
    /// Series on success, the fault that ended processing otherwise.
    pub result: std::result::Result<SeriesPair, Fault>,
}

impl PairOutcome {
    /// Run id of the pair.
    pub fn run_id(&self) -> &RunId {
        &self.pair.run_id
    }

    /// Check if the pair produced series.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything one analysis pass produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    root: PathBuf,
    mode: ParseMode,
    outcomes: Vec<PairOutcome>,
    pairing_faults: Vec<Fault>,
    scanned: usize,
    classified: usize,
    elapsed_ms: u128,
}

impl AnalysisReport {
    /// Scanned root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mode the tables were parsed in.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Per-pair outcomes in run id order.
    pub fn outcomes(&self) -> &[PairOutcome] {
        &self.outcomes
    }

    /// Successfully aggregated series, in run id order.
    pub fn series(&self) -> impl Iterator<Item = &SeriesPair> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Consume the report, keeping the successful series.
    pub fn into_series(self) -> Vec<SeriesPair> {
        self.outcomes.into_iter().filter_map(|o| o.result.ok()).collect()
    }

    /// Pairing faults followed by pair faults.
    pub fn faults(&self) -> Vec<&Fault> {
        self.pairing_faults
            .iter()
            .chain(self.outcomes.iter().filter_map(|o| o.result.as_ref().err()))
            .collect()
    }

    /// Faults raised before any pair was processed.
    pub fn pairing_faults(&self) -> &[Fault] {
        &self.pairing_faults
    }

    /// Check if no fault was recorded.
    pub fn all_succeeded(&self) -> bool {
        self.pairing_faults.is_empty() && self.outcomes.iter().all(PairOutcome::is_success)
    }

    /// Regular files inspected during discovery.
    pub fn scanned_files(&self) -> usize {
        self.scanned
    }

    /// Files recognised as result files.
    pub fn classified_files(&self) -> usize {
        self.classified
    }

    /// Complete pairs found.
    pub fn pair_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Pairs that produced series.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Pairs that failed while parsing or aggregating.
    pub fn failure_count(&self) -> usize {
        self.pair_count() - self.success_count()
    }

    /// Run ids of pairs that failed.
    pub fn failed_run_ids(&self) -> Vec<&RunId> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(PairOutcome::run_id)
            .collect()
    }

    /// Run ids excluded by the pairing pass.
    pub fn skipped_run_ids(&self) -> Vec<&RunId> {
        self.pairing_faults
            .iter()
            .filter_map(|f| f.run_id.as_ref())
            .collect()
    }

    /// Wall-clock duration of the pass in milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed_ms
    }
}

/// Turns a result tree into comparison series.
///
/// # Examples
///
/// ```no_run
/// use benchpair_core::{Analyzer, AnalysisConfig, ParseMode, ProcessorConfig};
/// use std::path::Path;
///
/// let analyzer = Analyzer::new(AnalysisConfig::default())
///     .with_processor(ProcessorConfig::default());
/// let report = analyzer.analyze(Path::new("results/2017-03-01"), ParseMode::PerTrial)?;
///
/// for series in report.series() {
///     println!("{}: {:?}", series.run_id, series.baseline.averages());
/// }
/// # Ok::<(), benchpair_core::AnalysisError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    processor: ProcessorConfig,
}

impl Analyzer {
    /// Create an analyzer with the default processor settings.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            processor: ProcessorConfig::default(),
        }
    }

    /// Sets the processor settings.
    pub fn with_processor(mut self, processor: ProcessorConfig) -> Self {
        self.processor = processor;
        self
    }

    /// The analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every pair under `root`.
    ///
    /// # Errors
    ///
    /// Fails only before processing starts: on an invalid configuration, a
    /// missing or non-directory root, or a thread pool that cannot be built.
    /// Everything else is recorded in the report.
    pub fn analyze(&self, root: &Path, mode: ParseMode) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        self.config.validate()?;

        let pairing = pair_results(root, &self.config)?;
        info!(
            root = %root.display(),
            mode = %mode,
            pairs = pairing.pairs.len(),
            skipped = pairing.faults.len(),
            "starting analysis"
        );

        let outcomes = self.process(pairing.pairs, mode)?;

        let report = AnalysisReport {
            root: root.to_path_buf(),
            mode,
            outcomes,
            pairing_faults: pairing.faults,
            scanned: pairing.scanned,
            classified: pairing.classified,
            elapsed_ms: start_time.elapsed().as_millis(),
        };

        info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            elapsed_ms = report.elapsed_ms,
            "analysis complete"
        );

        Ok(report)
    }

    /// Parse and aggregate one pair.
    ///
    /// The baseline file is parsed first; its failure ends the pair without
    /// touching the competitor file.
    pub fn analyze_pair(
        &self,
        pair: &ResultPair,
        mode: ParseMode,
    ) -> std::result::Result<SeriesPair, Fault> {
        let run_id = &pair.run_id;
        let parse = |path: &Path| {
            parse_timing_file(path, mode, &self.config)
                .map_err(|e| Fault::for_file(path, Some(run_id.clone()), e))
        };

        let baseline = parse(pair.file(Engine::Baseline).path.as_path())?;
        let competitor = parse(pair.file(Engine::Competitor).path.as_path())?;

        build_series(pair, mode, baseline, competitor, &self.config)
            .map_err(|e| Fault::for_run(run_id.clone(), e))
    }

    fn process(&self, pairs: Vec<ResultPair>, mode: ParseMode) -> Result<Vec<PairOutcome>> {
        if pairs.len() < self.processor.parallel_threshold {
            debug!(pairs = pairs.len(), "processing pairs serially");
            return Ok(pairs
                .into_iter()
                .map(|pair| self.outcome(pair, mode))
                .collect());
        }

        debug!(pairs = pairs.len(), "processing pairs in parallel");
        let run = || {
            pairs
                .into_par_iter()
                .map(|pair| self.outcome(pair, mode))
                .collect::<Vec<_>>()
        };

        match self.processor.max_threads.filter(|&t| t > 0) {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        AnalysisError::invalid_config(format!(
                            "failed to create thread pool: {}",
                            e
                        ))
                    })?;
                Ok(pool.install(run))
            }
            None => Ok(run()),
        }
    }

    fn outcome(&self, pair: ResultPair, mode: ParseMode) -> PairOutcome {
        let result = self.analyze_pair(&pair, mode);
        if let Err(fault) = &result {
            warn!(run_id = %pair.run_id, fault = %fault.error, "run failed");
        }
        PairOutcome { pair, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;
    use std::fs;
    use tempfile::TempDir;

    fn write_run(root: &Path, run: &str, baseline: &str, competitor: &str) {
        let dir = root.join(run);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("aMOR-{}.csv", run)), baseline).unwrap();
        fs::write(dir.join(format!("OWLAPI-{}.csv", run)), competitor).unwrap();
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
            .with_queries_number(2)
            .with_test_number(2)
    }

    const GOOD: &str = "queryID;time1[ns];time2[ns];average[ns]\n1;10;20;15\n2;30;40;35\n";

    #[test]
    fn test_analyze_aggregate() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "uni0dep0", GOOD, GOOD);

        let report = Analyzer::new(config())
            .analyze(dir.path(), ParseMode::Aggregate)
            .unwrap();
        assert!(report.all_succeeded());
        assert_eq!(report.pair_count(), 1);
        let series: Vec<&SeriesPair> = report.series().collect();
        assert_eq!(series[0].baseline.averages(), vec![15, 35]);
    }

    #[test]
    fn test_broken_pair_does_not_stop_siblings() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "uni0dep0", GOOD, GOOD);
        write_run(dir.path(), "uni0dep1", "queryID;average[ns]\n1;5\n", GOOD);
        write_run(dir.path(), "uni0dep2", GOOD, GOOD);

        let report = Analyzer::new(config())
            .analyze(dir.path(), ParseMode::Aggregate)
            .unwrap();
        assert!(!report.all_succeeded());
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failed_run_ids(), vec![&RunId::new("uni0dep1")]);

        let faults = report.faults();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind(), FaultKind::SchemaRowCountMismatch);
        assert!(faults[0]
            .path
            .as_ref()
            .unwrap()
            .ends_with("uni0dep1/aMOR-uni0dep1.csv"));
    }

    #[test]
    fn test_baseline_failure_short_circuits() {
        let dir = TempDir::new().unwrap();
        // Both files are broken; only the baseline fault is reported.
        write_run(dir.path(), "uni0dep0", "bad", "also bad");

        let report = Analyzer::new(config())
            .analyze(dir.path(), ParseMode::PerTrial)
            .unwrap();
        let faults = report.faults();
        assert_eq!(faults.len(), 1);
        assert!(matches!(faults[0].error, AnalysisError::MissingColumn { .. }));
        assert!(faults[0]
            .path
            .as_ref()
            .unwrap()
            .to_string_lossy()
            .contains("aMOR-"));
    }

    #[test]
    fn test_incomplete_group_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_run(dir.path(), "uni0dep0", GOOD, GOOD);
        fs::write(dir.path().join("aMOR-uni9dep9.csv"), GOOD).unwrap();

        let report = Analyzer::new(config())
            .analyze(dir.path(), ParseMode::PerTrial)
            .unwrap();
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.skipped_run_ids(), vec![&RunId::new("uni9dep9")]);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = Analyzer::new(config().with_queries_number(0))
            .analyze(dir.path(), ParseMode::Aggregate)
            .unwrap_err();
        assert_eq!(err.kind(), FaultKind::Configuration);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let dir = TempDir::new().unwrap();
        for i in 0..6 {
            write_run(dir.path(), &format!("uni0dep{}", i), GOOD, GOOD);
        }
        write_run(dir.path(), "uni1dep0", GOOD, "queryID;time1[ns]\n1;1\n2;2\n");

        let serial = Analyzer::new(config())
            .with_processor(ProcessorConfig::serial())
            .analyze(dir.path(), ParseMode::PerTrial)
            .unwrap();
        let parallel = Analyzer::new(config())
            .with_processor(ProcessorConfig {
                parallel_threshold: 1,
                max_threads: Some(3),
            })
            .analyze(dir.path(), ParseMode::PerTrial)
            .unwrap();

        let ids = |r: &AnalysisReport| -> Vec<String> {
            r.outcomes().iter().map(|o| o.run_id().to_string()).collect()
        };
        assert_eq!(ids(&serial), ids(&parallel));
        assert_eq!(serial.failure_count(), 1);
        assert_eq!(parallel.failure_count(), 1);
        assert_eq!(serial.into_series(), parallel.into_series());
    }
}
