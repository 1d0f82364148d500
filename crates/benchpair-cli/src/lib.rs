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

//! BenchPair CLI library for command-line parsing and execution.
//!
//! This library provides the command implementations behind the `benchpair`
//! binary. Each command walks a result tree, pairs baseline and competitor
//! result files by run id and acts on the resulting series.
//!
//! # Commands
//!
//! - **average**: grouped bar chart of the average time per query
//! - **distribution**: box plots of every trial, per query and combined
//! - **summary**: per-query distribution statistics as text or JSON
//!
//! # Exit status
//!
//! - `0`: every run processed and every chart written
//! - `1`: at least one run was faulted, or the command could not start
//!   (invalid configuration, missing root). Charts of the successful runs
//!   are still written.
//!
//! # Examples
//!
//! ```no_run
//! use benchpair_cli::cli::Commands;
//! use benchpair_cli::commands::RunStatus;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(subcommand)]
//!     command: Commands,
//! }
//!
//! # fn main() -> Result<(), benchpair_cli::error::CliError> {
//! let cli = Cli::parse_from(["benchpair", "average", "results", "--dry-run"]);
//! if cli.command.execute()? == RunStatus::Faulted {
//!     eprintln!("some runs were skipped");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod report;
