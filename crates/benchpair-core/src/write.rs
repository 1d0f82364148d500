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

//! Timing table writing.

use crate::config::{AnalysisConfig, DEFAULT_QUERY_ID_COLUMN};
use crate::error::{AnalysisError, Result};
use crate::parse::{ParseMode, Timing, TimingTable};
use std::io::Write;

/// Write a timing table in the schema [`parse_timing_reader`] reads.
///
/// The header holds the query id column followed by the aggregate column
/// (aggregate tables) or the per-trial columns (per-trial tables).
///
/// [`parse_timing_reader`]: crate::parse_timing_reader
pub fn write_timing_table<W: Write>(
    table: &TimingTable,
    config: &AnalysisConfig,
    writer: W,
) -> Result<()> {
    let path = table.path.as_path();
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(writer);

    let id_column = config
        .query_id_column
        .clone()
        .unwrap_or_else(|| DEFAULT_QUERY_ID_COLUMN.to_string());

    let mut header = vec![id_column];
    match table.mode {
        ParseMode::Aggregate => header.push(config.aggregate_column.clone()),
        ParseMode::PerTrial => header.extend(config.trial_columns()),
    }
    let width = header.len() - 1;

    wtr.write_record(&header)
        .map_err(|e| AnalysisError::from_csv(path, e))?;

    for record in &table.records {
        let mut row = vec![record.query_index.to_string()];
        match (&record.timing, table.mode) {
            (Timing::Aggregate(ns), ParseMode::Aggregate) => row.push(ns.to_string()),
            (Timing::Samples(samples), ParseMode::PerTrial) if samples.len() == width => {
                row.extend(samples.iter().map(u64::to_string));
            }
            (timing, mode) => {
                return Err(AnalysisError::Csv {
                    path: path.to_path_buf(),
                    message: format!(
                        "query {} holds {} timing that does not fit a {} table of {} duration columns",
                        record.query_index,
                        timing.mode(),
                        mode,
                        width
                    ),
                });
            }
        }
        wtr.write_record(&row)
            .map_err(|e| AnalysisError::from_csv(path, e))?;
    }

    wtr.flush()
        .map_err(|e| AnalysisError::io_error(path, e))?;
    Ok(())
}

/// Write a timing table into a `String`.
pub fn timing_table_to_string(table: &TimingTable, config: &AnalysisConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_timing_table(table, config, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| AnalysisError::Csv {
        path: table.path.clone(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_timing_reader, QueryRecord};
    use std::path::PathBuf;

    fn table(mode: ParseMode, timings: Vec<Timing>) -> TimingTable {
        TimingTable {
            path: PathBuf::from("out.csv"),
            mode,
            records: timings
                .into_iter()
                .enumerate()
                .map(|(i, timing)| QueryRecord {
                    query_index: i + 1,
                    timing,
                })
                .collect(),
        }
    }

    #[test]
    fn test_write_aggregate() {
        let config = AnalysisConfig::default().with_queries_number(2);
        let t = table(
            ParseMode::Aggregate,
            vec![Timing::Aggregate(15), Timing::Aggregate(40)],
        );
        let text = timing_table_to_string(&t, &config).unwrap();
        assert_eq!(text, "queryID;average[ns]\n1;15\n2;40\n");
    }

    #[test]
    fn test_write_per_trial_round_trip() {
        let config = AnalysisConfig::default()
            .with_queries_number(2)
            .with_test_number(3);
        let t = table(
            ParseMode::PerTrial,
            vec![
                Timing::Samples(vec![1, 2, 3]),
                Timing::Samples(vec![40, 0, u64::MAX]),
            ],
        );
        let text = timing_table_to_string(&t, &config).unwrap();
        assert!(text.starts_with("queryID;time1[ns];time2[ns];time3[ns]\n"));

        let parsed =
            parse_timing_reader(text.as_bytes(), "out.csv", ParseMode::PerTrial, &config).unwrap();
        assert_eq!(parsed, t);
    }

    #[test]
    fn test_write_rejects_wrong_sample_count() {
        let config = AnalysisConfig::default().with_test_number(3);
        let t = table(ParseMode::PerTrial, vec![Timing::Samples(vec![1, 2])]);
        let err = timing_table_to_string(&t, &config).unwrap_err();
        assert!(err.to_string().contains("3 duration columns"));
    }

    #[test]
    fn test_write_rejects_mixed_modes() {
        let config = AnalysisConfig::default();
        let t = table(ParseMode::Aggregate, vec![Timing::Samples(vec![1])]);
        assert!(timing_table_to_string(&t, &config).is_err());
    }
}
