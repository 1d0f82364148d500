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

//! Command implementations.

mod average;
mod distribution;
mod summary;

pub use average::average;
pub use distribution::distribution;
pub use summary::summary;

use crate::error::CliError;
use crate::render::{chart_path, FigureRenderer};
use crate::report::ChartOutput;
use benchpair_core::{render_series_pair, AnalysisConfig, AnalysisReport, SeriesPair};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How a command that ran to completion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every run was processed and every chart produced.
    Clean,
    /// At least one run, file or chart was reported as faulted.
    Faulted,
}

impl RunStatus {
    /// Status of a report, counting chart failures when charts were written.
    pub fn of(report: &AnalysisReport, charts: Option<&ChartOutput>) -> Self {
        let charts_complete = charts.map_or(true, ChartOutput::is_complete);
        if report.all_succeeded() && charts_complete {
            RunStatus::Clean
        } else {
            RunStatus::Faulted
        }
    }
}

/// Render every successful run of `report` and write its charts.
///
/// A run whose charts cannot be rendered or written is recorded in
/// [`ChartOutput::failures`]; the remaining runs are still written.
pub(crate) fn write_charts(
    report: &AnalysisReport,
    config: &AnalysisConfig,
    output_root: &Path,
    dry_run: bool,
) -> ChartOutput {
    let renderer = FigureRenderer::new(config);
    let mut output = ChartOutput::default();

    for series in report.series() {
        let before = output.written.len();
        match write_run_charts(series, &renderer, config, output_root, dry_run, &mut output.written) {
            Ok(()) => {
                debug!(
                    run_id = %series.run_id,
                    charts = output.written.len() - before,
                    "charts written"
                );
            }
            Err(e) => {
                let partial = output.written.len() - before;
                warn!(run_id = %series.run_id, error = %e, partial, "chart output failed");
                let message = if partial > 0 {
                    format!("{} ({} charts of this run already written)", e, partial)
                } else {
                    e.to_string()
                };
                output.failures.push((series.run_id.clone(), message));
            }
        }
    }

    info!(
        charts = output.written.len(),
        failed_runs = output.failures.len(),
        dry_run,
        "chart output finished"
    );
    output
}

/// Writes the charts of one run, recording each path in `written` as soon
/// as its file exists.
fn write_run_charts(
    series: &SeriesPair,
    renderer: &FigureRenderer,
    config: &AnalysisConfig,
    output_root: &Path,
    dry_run: bool,
    written: &mut Vec<PathBuf>,
) -> Result<(), CliError> {
    let rendered = render_series_pair(series, renderer, config)?;
    let label = config.chart_label(series.run_id.as_str());

    for chart in rendered.charts {
        let path = chart_path(output_root, &rendered.run_id, chart.kind, &label);
        if !dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| CliError::io_error(parent, e))?;
            }
            let json = serde_json::to_string_pretty(&chart.artifact)?;
            fs::write(&path, json).map_err(|e| CliError::io_error(&path, e))?;
        }
        written.push(path);
    }

    Ok(())
}

/// Print the planned chart paths of a dry run to stdout.
pub(crate) fn print_planned(output: &ChartOutput) {
    for path in &output.written {
        println!("{}", path.display());
    }
}
