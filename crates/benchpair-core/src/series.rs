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

//! Series aggregation.
//!
//! Turns the two parsed tables of a [`ResultPair`] into per-engine series
//! keyed by query index. Aggregation performs no I/O; every check it makes
//! is against the configuration and the tables it is handed.

use crate::classify::{Engine, RunId};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::pairing::ResultPair;
use crate::parse::{ParseMode, Timing, TimingTable};
use crate::stats::DistributionSummary;
use std::collections::BTreeMap;

/// Timings of one engine for one run, keyed by query index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSeries {
    /// Engine the timings belong to.
    pub engine: Engine,
    /// Run the timings belong to.
    pub run_id: RunId,
    /// Mode shared by every entry of `per_query`.
    pub mode: ParseMode,
    /// Timing per query index, covering `1..=queries_number`.
    pub per_query: BTreeMap<usize, Timing>,
}

impl EngineSeries {
    /// Query indices in ascending order.
    pub fn queries(&self) -> Vec<usize> {
        self.per_query.keys().copied().collect()
    }

    /// Samples of one query; `None` for aggregate series or unknown queries.
    pub fn samples(&self, query: usize) -> Option<&[u64]> {
        match self.per_query.get(&query) {
            Some(Timing::Samples(samples)) => Some(samples),
            _ => None,
        }
    }

    /// One duration per query, in query order.
    ///
    /// Aggregate series return their stored values. Per-trial series are
    /// normalized by the trial count: the integer average of each query's
    /// samples.
    pub fn averages(&self) -> Vec<u64> {
        self.per_query
            .values()
            .map(|timing| match timing {
                Timing::Aggregate(ns) => *ns,
                Timing::Samples(samples) => {
                    let sum: u128 = samples.iter().map(|&s| s as u128).sum();
                    let count = samples.len().max(1) as u128;
                    (sum / count) as u64
                }
            })
            .collect()
    }

    /// Distribution summary per query.
    ///
    /// Aggregate entries summarize a single sample.
    pub fn summaries(&self) -> BTreeMap<usize, DistributionSummary> {
        self.per_query
            .iter()
            .filter_map(|(&query, timing)| {
                let summary = match timing {
                    Timing::Aggregate(ns) => DistributionSummary::from_samples(&[*ns]),
                    Timing::Samples(samples) => DistributionSummary::from_samples(samples),
                };
                summary.map(|s| (query, s))
            })
            .collect()
    }

    /// All samples of all queries, concatenated in query order.
    pub fn combined_samples(&self) -> Vec<u64> {
        self.per_query
            .values()
            .flat_map(|timing| match timing {
                Timing::Aggregate(ns) => vec![*ns],
                Timing::Samples(samples) => samples.clone(),
            })
            .collect()
    }
}

/// Both engines' series for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPair {
    /// Run shared by both series.
    pub run_id: RunId,
    /// Mode of both series.
    pub mode: ParseMode,
    /// Baseline series.
    pub baseline: EngineSeries,
    /// Competitor series.
    pub competitor: EngineSeries,
}

impl SeriesPair {
    /// Series of the given engine.
    pub fn series(&self, engine: Engine) -> &EngineSeries {
        match engine {
            Engine::Baseline => &self.baseline,
            Engine::Competitor => &self.competitor,
        }
    }

    /// Query indices shared by both series.
    pub fn queries(&self) -> Vec<usize> {
        self.baseline.queries()
    }
}

/// Build the series pair of `pair` from its two parsed tables.
///
/// # Errors
///
/// - [`AnalysisError::ModeMismatch`] if a table or one of its records was
///   not parsed in `mode`
/// - [`AnalysisError::DomainMismatch`] if a table's query indices are not
///   exactly `1..=queries_number`
/// - [`AnalysisError::TrialCountMismatch`] if a sample list does not hold
///   `test_number` samples
pub fn build_series(
    pair: &ResultPair,
    mode: ParseMode,
    baseline: TimingTable,
    competitor: TimingTable,
    config: &AnalysisConfig,
) -> Result<SeriesPair> {
    let baseline = engine_series(&pair.run_id, Engine::Baseline, mode, baseline, config)?;
    let competitor = engine_series(&pair.run_id, Engine::Competitor, mode, competitor, config)?;

    Ok(SeriesPair {
        run_id: pair.run_id.clone(),
        mode,
        baseline,
        competitor,
    })
}

fn engine_series(
    run_id: &RunId,
    engine: Engine,
    mode: ParseMode,
    table: TimingTable,
    config: &AnalysisConfig,
) -> Result<EngineSeries> {
    let mode_mismatch = |actual: ParseMode| AnalysisError::ModeMismatch {
        run_id: run_id.to_string(),
        engine,
        expected: mode.as_str(),
        actual: actual.as_str(),
    };

    if table.mode != mode {
        return Err(mode_mismatch(table.mode));
    }

    let expected = config.queries_number;
    let found = table.records.len();
    let mut per_query = BTreeMap::new();

    for record in table.records {
        let timing_mode = record.timing.mode();
        if timing_mode != mode {
            return Err(mode_mismatch(timing_mode));
        }

        if let Timing::Samples(samples) = &record.timing {
            if samples.len() != config.test_number {
                return Err(AnalysisError::TrialCountMismatch {
                    run_id: run_id.to_string(),
                    engine,
                    query: record.query_index,
                    expected: config.test_number,
                    actual: samples.len(),
                });
            }
        }

        per_query.insert(record.query_index, record.timing);
    }

    let covers_domain = per_query.len() == expected
        && found == expected
        && per_query.keys().copied().eq(1..=expected);
    if !covers_domain {
        return Err(AnalysisError::DomainMismatch {
            run_id: run_id.to_string(),
            engine,
            expected,
            found,
        });
    }

    Ok(EngineSeries {
        engine,
        run_id: run_id.clone(),
        mode,
        per_query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ResultFile;
    use crate::error::FaultKind;
    use crate::parse::QueryRecord;
    use std::path::PathBuf;

    fn pair() -> ResultPair {
        let run_id = RunId::new("uni0dep0");
        ResultPair {
            run_id: run_id.clone(),
            baseline: ResultFile {
                path: PathBuf::from("aMOR-uni0dep0.csv"),
                engine: Engine::Baseline,
                run_id: run_id.clone(),
            },
            competitor: ResultFile {
                path: PathBuf::from("OWLAPI-uni0dep0.csv"),
                engine: Engine::Competitor,
                run_id,
            },
        }
    }

    fn table(mode: ParseMode, rows: Vec<(usize, Timing)>) -> TimingTable {
        TimingTable {
            path: PathBuf::from("t.csv"),
            mode,
            records: rows
                .into_iter()
                .map(|(query_index, timing)| QueryRecord { query_index, timing })
                .collect(),
        }
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
            .with_queries_number(2)
            .with_test_number(3)
    }

    fn samples_table(a: Vec<u64>, b: Vec<u64>) -> TimingTable {
        table(
            ParseMode::PerTrial,
            vec![(1, Timing::Samples(a)), (2, Timing::Samples(b))],
        )
    }

    #[test]
    fn test_aggregate_series() {
        let base = table(
            ParseMode::Aggregate,
            vec![(1, Timing::Aggregate(10)), (2, Timing::Aggregate(20))],
        );
        let comp = table(
            ParseMode::Aggregate,
            vec![(1, Timing::Aggregate(30)), (2, Timing::Aggregate(40))],
        );
        let series = build_series(&pair(), ParseMode::Aggregate, base, comp, &config()).unwrap();
        assert_eq!(series.queries(), vec![1, 2]);
        assert_eq!(series.baseline.averages(), vec![10, 20]);
        assert_eq!(series.competitor.averages(), vec![30, 40]);
        assert_eq!(series.series(Engine::Competitor).engine, Engine::Competitor);
    }

    #[test]
    fn test_per_trial_series() {
        let base = samples_table(vec![1, 2, 4], vec![10, 10, 10]);
        let comp = samples_table(vec![5, 5, 6], vec![0, 0, 1]);
        let series = build_series(&pair(), ParseMode::PerTrial, base, comp, &config()).unwrap();

        assert_eq!(series.baseline.samples(1), Some(&[1, 2, 4][..]));
        assert_eq!(series.baseline.averages(), vec![2, 10]);
        assert_eq!(series.competitor.averages(), vec![5, 0]);
        assert_eq!(
            series.baseline.combined_samples(),
            vec![1, 2, 4, 10, 10, 10]
        );
        assert_eq!(series.baseline.queries(), series.competitor.queries());
    }

    #[test]
    fn test_summaries_per_query() {
        let base = samples_table(vec![1, 2, 3], vec![4, 4, 4]);
        let comp = samples_table(vec![1, 1, 1], vec![2, 2, 2]);
        let series = build_series(&pair(), ParseMode::PerTrial, base, comp, &config()).unwrap();
        let summaries = series.baseline.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[&1].median, 2.0);
        assert_eq!(summaries[&2].std_dev, 0.0);
    }

    #[test]
    fn test_mode_mismatch() {
        let base = samples_table(vec![1, 2, 3], vec![4, 5, 6]);
        let comp = table(
            ParseMode::Aggregate,
            vec![(1, Timing::Aggregate(1)), (2, Timing::Aggregate(2))],
        );
        let err = build_series(&pair(), ParseMode::PerTrial, base, comp, &config()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ModeMismatch {
                run_id: "uni0dep0".to_string(),
                engine: Engine::Competitor,
                expected: "per-trial",
                actual: "aggregate",
            }
        );
        assert_eq!(err.kind(), FaultKind::AggregationInvariant);
    }

    #[test]
    fn test_domain_mismatch_missing_query() {
        let base = table(ParseMode::Aggregate, vec![(1, Timing::Aggregate(1))]);
        let comp = table(
            ParseMode::Aggregate,
            vec![(1, Timing::Aggregate(1)), (2, Timing::Aggregate(2))],
        );
        let err = build_series(&pair(), ParseMode::Aggregate, base, comp, &config()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DomainMismatch { engine: Engine::Baseline, expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_domain_mismatch_duplicate_query() {
        let base = table(
            ParseMode::Aggregate,
            vec![(1, Timing::Aggregate(1)), (1, Timing::Aggregate(2))],
        );
        let comp = table(
            ParseMode::Aggregate,
            vec![(1, Timing::Aggregate(1)), (2, Timing::Aggregate(2))],
        );
        let err = build_series(&pair(), ParseMode::Aggregate, base, comp, &config()).unwrap_err();
        assert!(matches!(err, AnalysisError::DomainMismatch { found: 2, .. }));
    }

    #[test]
    fn test_trial_count_mismatch() {
        let base = samples_table(vec![1, 2, 3], vec![4, 5, 6]);
        let comp = samples_table(vec![1, 2, 3], vec![4, 5]);
        let err = build_series(&pair(), ParseMode::PerTrial, base, comp, &config()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::TrialCountMismatch {
                engine: Engine::Competitor,
                query: 2,
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_averages_do_not_overflow() {
        let base = samples_table(vec![u64::MAX, u64::MAX, u64::MAX], vec![0, 0, 0]);
        let comp = samples_table(vec![0, 0, 0], vec![0, 0, 0]);
        let series = build_series(&pair(), ParseMode::PerTrial, base, comp, &config()).unwrap();
        assert_eq!(series.baseline.averages()[0], u64::MAX);
    }
}
