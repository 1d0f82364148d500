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

//! Malformed timing tables.
//!
//! Each sample is a full LUBM-sized table with exactly one defect, together
//! with the fault category the analysis reports for it and the parse modes
//! that notice the defect.

use super::{lubm_baseline, LUBM_QUERIES};

/// One malformed table.
#[derive(Debug, Clone)]
pub struct InvalidTimingSample {
    /// Short identifier.
    pub name: &'static str,
    /// Table text.
    pub text: String,
    /// Fault category name the defect maps to.
    pub kind: &'static str,
    /// Whether aggregate parsing rejects the table.
    pub fails_aggregate: bool,
    /// Whether per-trial parsing rejects the table.
    pub fails_per_trial: bool,
}

fn sample(
    name: &'static str,
    text: String,
    kind: &'static str,
    fails_aggregate: bool,
    fails_per_trial: bool,
) -> InvalidTimingSample {
    InvalidTimingSample {
        name,
        text,
        kind,
        fails_aggregate,
        fails_per_trial,
    }
}

/// Returns every malformed table sample.
pub fn invalid_timing_samples() -> Vec<InvalidTimingSample> {
    let full = lubm_baseline().build();
    let mut lines: Vec<&str> = full.lines().collect();
    lines.truncate(LUBM_QUERIES);
    let missing_row = lines.join("\n") + "\n";

    vec![
        sample("missing_row", missing_row, "schema-row-count-mismatch", true, true),
        sample(
            "extra_row",
            lubm_baseline().extra_rows(1).build(),
            "schema-row-count-mismatch",
            true,
            true,
        ),
        sample(
            "non_numeric_trial",
            lubm_baseline().cell(3, "time4[ns]", "n/a").build(),
            "schema-field-parse-failure",
            false,
            true,
        ),
        sample(
            "negative_average",
            lubm_baseline().cell(5, "average[ns]", "-12").build(),
            "schema-field-parse-failure",
            true,
            false,
        ),
        sample(
            "empty_trial_cell",
            lubm_baseline().cell(14, "time10[ns]", "").build(),
            "schema-field-parse-failure",
            false,
            true,
        ),
        sample(
            "missing_average_column",
            lubm_baseline().omit_column("average[ns]").build(),
            "schema-field-parse-failure",
            true,
            false,
        ),
        sample(
            "missing_trial_column",
            lubm_baseline().omit_column("time7[ns]").build(),
            "schema-field-parse-failure",
            false,
            true,
        ),
    ]
}
