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

//! BenchPair Command Line Interface

use benchpair_cli::cli::Commands;
use benchpair_cli::commands::RunStatus;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// BenchPair - paired benchmark result analysis
///
/// Pairs the result files of a baseline and a competitor engine by run id
/// and charts their query timings side by side.
///
/// # Examples
///
/// ```bash
/// # Average-time charts for every run below results/
/// benchpair average results/
///
/// # Distribution charts, written to a separate directory
/// benchpair distribution results/ --output charts/
///
/// # Statistics as JSON
/// benchpair summary results/ --format json
/// ```
#[derive(Parser)]
#[command(name = "benchpair")]
#[command(author, version, about = "BenchPair - paired benchmark result analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = if cli.command.common().verbose {
        "benchpair=debug"
    } else {
        "benchpair=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(directive.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.execute() {
        Ok(RunStatus::Clean) => ExitCode::SUCCESS,
        Ok(RunStatus::Faulted) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
