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

//! Shared test fixtures for BenchPair.
//!
//! This crate builds timing tables and on-disk result trees so the core and
//! CLI test suites do not each hand-write CSV text.
//!
//! # Quick Start
//!
//! ```rust
//! use benchpair_test::fixtures;
//! use benchpair_test::fixtures::builders::{ResultTreeBuilder, TimingFileBuilder};
//!
//! // A ready-made tree with two complete runs
//! let tree = fixtures::lubm_tree(&["uni0dep0", "uni0dep1"]);
//! assert!(tree.path().join("uni0dep1").is_dir());
//!
//! // A custom tree with a broken competitor table
//! let good = fixtures::lubm_baseline().build();
//! let bad = fixtures::lubm_competitor().cell(2, "time3[ns]", "oops").build();
//! let tree = ResultTreeBuilder::new().run("uni1dep0", &good, &bad).build();
//!
//! // Malformed tables for error handling tests
//! for sample in fixtures::errors::invalid_timing_samples() {
//!     assert!(!sample.text.is_empty(), "{} ({})", sample.name, sample.kind);
//! }
//! # let _ = tree;
//! ```

pub mod fixtures;

pub use fixtures::builders::{ResultTree, ResultTreeBuilder, TimingFileBuilder, TimingSchema};
