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

//! CLI command definitions and argument parsing.
//!
//! Every command takes the root of a result tree plus the same set of
//! analysis options ([`CommonArgs`]). Options given on the command line
//! override the values of a `--config` file.

use crate::commands::{self, RunStatus};
use crate::error::CliError;
use benchpair_core::{AnalysisConfig, ProcessorConfig};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Options shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Root directory of the result tree
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// JSON analysis configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter of the result files
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Number of queries per result file
    #[arg(long, value_name = "N")]
    pub queries: Option<usize>,

    /// Number of trials per query
    #[arg(long, value_name = "N")]
    pub trials: Option<usize>,

    /// Output root for charts (defaults to ROOT)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Maximum worker threads
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Analyze and list the charts without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load the configuration file (if any) and apply command line overrides.
    pub fn load_config(&self) -> Result<AnalysisConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(delimiter) = self.delimiter {
            config = config.with_delimiter(delimiter);
        }
        if let Some(queries) = self.queries {
            config = config.with_queries_number(queries);
        }
        if let Some(trials) = self.trials {
            config = config.with_test_number(trials);
        }

        config.validate()?;
        Ok(config)
    }

    /// Processor settings derived from `--jobs`.
    pub fn processor(&self) -> ProcessorConfig {
        match self.jobs {
            Some(1) => ProcessorConfig::serial(),
            Some(jobs) => ProcessorConfig {
                max_threads: Some(jobs),
                ..ProcessorConfig::default()
            },
            None => ProcessorConfig::default(),
        }
    }

    /// Root below which charts are written.
    pub fn output_root(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.root)
    }
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use benchpair_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grouped bar chart of the average time per query
    ///
    /// Reads the aggregate column of every paired result file and writes
    /// <OUT>/<runId>/Charts/average-time-Chart-<label>.json per run.
    Average {
        #[command(flatten)]
        common: CommonArgs,

        /// Aggregate column to read (e.g. "time[ns]" for the simple schema)
        #[arg(long, value_name = "NAME")]
        column: Option<String>,
    },

    /// Box plots of the per-trial times, per query and combined
    ///
    /// Writes one chart per query under
    /// <OUT>/<runId>/Charts/single-query-stddev/ and a combined chart
    /// <OUT>/<runId>/Charts/total-stddev-Chart-<label>.json per run.
    Distribution {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print per-query distribution statistics of every run
    Summary {
        #[command(flatten)]
        common: CommonArgs,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Commands {
    /// Arguments shared by every command.
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Average { common, .. }
            | Commands::Distribution { common }
            | Commands::Summary { common, .. } => common,
        }
    }

    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for failures that prevent any processing (invalid
    /// configuration, missing root). Faults in individual runs are reported
    /// through [`RunStatus::Faulted`].
    pub fn execute(self) -> Result<RunStatus, CliError> {
        match self {
            Commands::Average { common, column } => commands::average(&common, column),
            Commands::Distribution { common } => commands::distribution(&common),
            Commands::Summary { common, format } => commands::summary(&common, &format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        TestCli::try_parse_from(std::iter::once("benchpair").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_common_options_parse() {
        let cmd = parse(&[
            "distribution",
            "results",
            "--queries",
            "4",
            "--trials",
            "3",
            "-d",
            ",",
            "-j",
            "2",
            "--dry-run",
        ]);
        let common = cmd.common();
        assert_eq!(common.root, PathBuf::from("results"));
        assert!(common.dry_run);
        assert_eq!(common.processor().max_threads, Some(2));

        let config = common.load_config().unwrap();
        assert_eq!(config.queries_number, 4);
        assert_eq!(config.test_number, 3);
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_output_defaults_to_root() {
        let cmd = parse(&["average", "results"]);
        assert_eq!(cmd.common().output_root(), Path::new("results"));

        let cmd = parse(&["average", "results", "-o", "out", "--column", "time[ns]"]);
        assert_eq!(cmd.common().output_root(), Path::new("out"));
        assert!(matches!(cmd, Commands::Average { column: Some(ref c), .. } if c == "time[ns]"));
    }

    #[test]
    fn test_single_job_is_serial() {
        let cmd = parse(&["summary", "results", "--jobs", "1"]);
        assert_eq!(cmd.common().processor(), ProcessorConfig::serial());
    }

    #[test]
    fn test_zero_queries_rejected() {
        let cmd = parse(&["average", "results", "--queries", "0"]);
        assert!(cmd.common().load_config().is_err());
    }

    #[test]
    fn test_config_file_overridden_by_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(&path, r#"{"queries_number": 7, "test_number": 5}"#).unwrap();

        let cmd = parse(&[
            "summary",
            "results",
            "--config",
            path.to_str().unwrap(),
            "--trials",
            "2",
        ]);
        let config = cmd.common().load_config().unwrap();
        assert_eq!(config.queries_number, 7);
        assert_eq!(config.test_number, 2);
    }
}
