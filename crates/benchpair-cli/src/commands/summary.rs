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

use super::RunStatus;
use crate::cli::CommonArgs;
use crate::error::CliError;
use crate::report::print_summary;
use benchpair_core::{
    AnalysisConfig, Analyzer, DistributionSummary, Engine, ParseMode, SeriesPair,
};
use serde::Serialize;

#[derive(Serialize)]
struct RunSummary<'a> {
    run_id: &'a str,
    label: String,
    queries: Vec<QuerySummary>,
}

#[derive(Serialize)]
struct QuerySummary {
    query: usize,
    baseline: DistributionSummary,
    competitor: DistributionSummary,
}

impl QuerySummary {
    fn of(&self, engine: Engine) -> &DistributionSummary {
        match engine {
            Engine::Baseline => &self.baseline,
            Engine::Competitor => &self.competitor,
        }
    }
}

/// Print per-query distribution statistics of every run to stdout.
pub fn summary(common: &CommonArgs, format: &str) -> Result<RunStatus, CliError> {
    if !matches!(format, "text" | "json") {
        return Err(CliError::invalid_input(format!(
            "unknown format '{}', expected 'text' or 'json'",
            format
        )));
    }

    let config = common.load_config()?;
    let analyzer = Analyzer::new(config).with_processor(common.processor());
    let report = analyzer.analyze(&common.root, ParseMode::PerTrial)?;

    let runs: Vec<RunSummary> = report
        .series()
        .map(|series| summarize(series, analyzer.config()))
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&runs)?);
    } else {
        print_text(&runs, analyzer.config());
    }

    print_summary("summary", &report, None);
    Ok(RunStatus::of(&report, None))
}

fn summarize<'a>(series: &'a SeriesPair, config: &AnalysisConfig) -> RunSummary<'a> {
    let [baseline, mut competitor] = Engine::ALL.map(|engine| series.series(engine).summaries());

    let queries = baseline
        .into_iter()
        .filter_map(|(query, b)| {
            competitor.remove(&query).map(|c| QuerySummary {
                query,
                baseline: b,
                competitor: c,
            })
        })
        .collect();

    RunSummary {
        run_id: series.run_id.as_str(),
        label: config.chart_label(series.run_id.as_str()),
        queries,
    }
}

fn print_text(runs: &[RunSummary], config: &AnalysisConfig) {
    for run in runs {
        println!("{} ({})", run.run_id, run.label);
        println!(
            "  {:>5}  {:<10} {:>14} {:>14} {:>14} {:>14}",
            "query", "engine", "mean[ns]", "median[ns]", "stddev[ns]", "iqr[ns]"
        );
        for q in &run.queries {
            for engine in Engine::ALL {
                let s = q.of(engine);
                println!(
                    "  {:>5}  {:<10} {:>14.1} {:>14.1} {:>14.1} {:>14.1}",
                    q.query,
                    config.profile(engine).label,
                    s.mean,
                    s.median,
                    s.std_dev,
                    s.iqr()
                );
            }
        }
        println!();
    }
}
