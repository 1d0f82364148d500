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

//! Canonical result fixtures.
//!
//! - **builders**: fluent builders for timing tables and result trees
//! - **errors**: malformed timing tables and the fault each one triggers

pub mod builders;
pub mod errors;

use builders::{ResultTree, ResultTreeBuilder, TimingFileBuilder};

/// Queries per table in the LUBM benchmark.
pub const LUBM_QUERIES: usize = 14;

/// Trials per query in the LUBM benchmark.
pub const LUBM_TRIALS: usize = 10;

/// Seed of generated baseline samples.
pub const BASELINE_SEED: u64 = 2_000;

/// Seed of generated competitor samples.
pub const COMPETITOR_SEED: u64 = 9_000;

/// Baseline table of a full LUBM run.
pub fn lubm_baseline() -> TimingFileBuilder {
    TimingFileBuilder::new(LUBM_QUERIES, LUBM_TRIALS).seed(BASELINE_SEED)
}

/// Competitor table of a full LUBM run.
pub fn lubm_competitor() -> TimingFileBuilder {
    TimingFileBuilder::new(LUBM_QUERIES, LUBM_TRIALS).seed(COMPETITOR_SEED)
}

/// A tree holding one complete LUBM pair per run id.
pub fn lubm_tree(run_ids: &[&str]) -> ResultTree {
    let baseline = lubm_baseline().build();
    let competitor = lubm_competitor().build();
    run_ids
        .iter()
        .fold(ResultTreeBuilder::new(), |tree, run_id| {
            tree.run(run_id, &baseline, &competitor)
        })
        .build()
}
