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

//! Statistical summary of timing samples.

use serde::Serialize;

/// Distribution of a set of durations, in nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Total number of samples.
    pub count: usize,
    /// Minimum duration.
    pub min: u64,
    /// Maximum duration.
    pub max: u64,
    /// Mean duration.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Median duration.
    pub median: f64,
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
}

impl DistributionSummary {
    /// Summarize `samples`; `None` when there are no samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchpair_core::DistributionSummary;
    ///
    /// let summary = DistributionSummary::from_samples(&[4, 1, 3, 2]).unwrap();
    /// assert_eq!(summary.min, 1);
    /// assert_eq!(summary.max, 4);
    /// assert_eq!(summary.median, 2.5);
    /// ```
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let total: f64 = sorted.iter().map(|&s| s as f64).sum();
        let mean = total / count as f64;

        let variance = sorted
            .iter()
            .map(|&s| {
                let diff = s as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / count as f64;

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            std_dev: variance.sqrt(),
            median: quantile(&sorted, 0.5),
            q1: quantile(&sorted, 0.25),
            q3: quantile(&sorted, 0.75),
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quantile of sorted, non-empty data with linear interpolation between
/// the closest ranks.
fn quantile(sorted: &[u64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    sorted[lower] as f64 + (sorted[upper] as f64 - sorted[lower] as f64) * weight
}
