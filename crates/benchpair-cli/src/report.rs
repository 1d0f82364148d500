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

//! End-of-run summary printed to stderr.

use benchpair_core::{AnalysisReport, RunId};
use colored::Colorize;
use std::path::PathBuf;

/// Charts produced by one command.
#[derive(Debug, Clone, Default)]
pub struct ChartOutput {
    /// Files written (or planned, in a dry run).
    pub written: Vec<PathBuf>,
    /// Runs whose charts could not be built or written.
    pub failures: Vec<(RunId, String)>,
}

impl ChartOutput {
    /// Check if every chart was produced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Print the processed, failed and skipped run ids of a report.
pub fn print_summary(operation: &str, report: &AnalysisReport, charts: Option<&ChartOutput>) {
    let failed_runs = report.failure_count() + charts.map_or(0, |c| c.failures.len());

    eprintln!();
    eprintln!("{}", "═".repeat(60).bright_blue());
    eprintln!(
        "{} {}",
        "Operation:".bright_blue().bold(),
        operation.bright_white()
    );
    eprintln!("{}", "═".repeat(60).bright_blue());
    eprintln!(
        "  {} {}",
        "Root:".bright_cyan(),
        report.root().display().to_string().bright_white()
    );
    eprintln!(
        "  {} {} scanned, {} classified",
        "Files:".bright_cyan(),
        report.scanned_files(),
        report.classified_files()
    );
    eprintln!(
        "  {} {}",
        "Runs processed:".bright_cyan(),
        report.pair_count().to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Succeeded:".green().bold(),
        (report.success_count().saturating_sub(charts.map_or(0, |c| c.failures.len())))
            .to_string()
            .bright_white()
    );
    eprintln!(
        "  {} {}",
        "Failed:".red().bold(),
        failed_runs.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Skipped:".yellow().bold(),
        report.skipped_run_ids().len().to_string().bright_white()
    );

    let mut failed: Vec<String> = report.failed_run_ids().iter().map(|id| id.to_string()).collect();
    if let Some(charts) = charts {
        failed.extend(charts.failures.iter().map(|(id, _)| id.to_string()));
    }
    if !failed.is_empty() {
        eprintln!("  {} {}", "Failed runs:".red(), failed.join(", "));
    }
    let skipped = report.skipped_run_ids();
    if !skipped.is_empty() {
        let skipped: Vec<String> = skipped.iter().map(|id| id.to_string()).collect();
        eprintln!("  {} {}", "Skipped runs:".yellow(), skipped.join(", "));
    }
    if let Some(charts) = charts {
        eprintln!(
            "  {} {}",
            "Charts:".bright_cyan(),
            charts.written.len().to_string().bright_white()
        );
    }
    eprintln!(
        "  {} {:.2}s",
        "Elapsed:".bright_cyan(),
        report.elapsed_ms() as f64 / 1000.0
    );

    let faults = report.faults();
    let chart_failures = charts.map(|c| c.failures.as_slice()).unwrap_or_default();
    if !faults.is_empty() || !chart_failures.is_empty() {
        eprintln!("{}", "─".repeat(60).bright_blue());
        for fault in faults {
            eprintln!("  {} {}", "✗".red().bold(), fault);
        }
        for (run_id, message) in chart_failures {
            eprintln!("  {} [chart-output] {}: {}", "✗".red().bold(), run_id, message);
        }
    }
    eprintln!("{}", "═".repeat(60).bright_blue());
}
