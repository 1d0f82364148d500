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

use super::{print_planned, write_charts, RunStatus};
use crate::cli::CommonArgs;
use crate::error::CliError;
use crate::report::print_summary;
use benchpair_core::{Analyzer, ParseMode};

/// Per-query and combined distribution charts for every run below the root.
pub fn distribution(common: &CommonArgs) -> Result<RunStatus, CliError> {
    let config = common.load_config()?;
    let analyzer = Analyzer::new(config).with_processor(common.processor());
    let report = analyzer.analyze(&common.root, ParseMode::PerTrial)?;

    let charts = write_charts(&report, analyzer.config(), common.output_root(), common.dry_run);
    if common.dry_run {
        print_planned(&charts);
    }

    print_summary("distribution", &report, Some(&charts));
    Ok(RunStatus::of(&report, Some(&charts)))
}
