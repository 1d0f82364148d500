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

//! Figure renderer.
//!
//! Charts are emitted as JSON figure descriptions (`data` traces plus a
//! `layout`) that plotly-compatible viewers can display directly:
//!
//! - grouped averages become two `bar` traces with `barmode: group`
//! - distributions become two `box` traces showing every point
//! - the combined view of a run lays every per-query box trace side by side

use benchpair_core::{AnalysisConfig, ChartKind, ComparisonRenderer, Engine, Result, RunId};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Directory, below a run directory, holding that run's charts.
pub const CHARTS_DIR: &str = "Charts";

/// Directory, below [`CHARTS_DIR`], holding the per-query distributions.
pub const SINGLE_QUERY_DIR: &str = "single-query-stddev";

/// Builds JSON figures coloured by engine.
#[derive(Debug, Clone)]
pub struct FigureRenderer {
    baseline_color: String,
    competitor_color: String,
}

impl FigureRenderer {
    /// Create a renderer using the configured engine colors.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            baseline_color: config.profile(Engine::Baseline).color.clone(),
            competitor_color: config.profile(Engine::Competitor).color.clone(),
        }
    }

    fn distribution_layout() -> Value {
        json!({
            "width": 1250,
            "height": 1100,
            "yaxis": { "title": "Standard Deviation", "zeroline": false },
        })
    }

    fn box_trace(samples: &[u64], label: &str, color: &str) -> Value {
        json!({
            "type": "box",
            "y": samples,
            "name": label,
            "boxpoints": "all",
            "jitter": 0.3,
            "marker": { "color": color },
        })
    }
}

impl ComparisonRenderer for FigureRenderer {
    type Artifact = Value;

    fn render_grouped_comparison(
        &self,
        queries: &[String],
        baseline: &[u64],
        competitor: &[u64],
        baseline_label: &str,
        competitor_label: &str,
    ) -> Result<Value> {
        Ok(json!({
            "data": [
                {
                    "type": "bar",
                    "x": queries,
                    "y": baseline,
                    "name": baseline_label,
                    "marker": { "color": self.baseline_color },
                },
                {
                    "type": "bar",
                    "x": queries,
                    "y": competitor,
                    "name": competitor_label,
                    "marker": { "color": self.competitor_color },
                },
            ],
            "layout": {
                "xaxis": { "tickangle": -45 },
                "barmode": "group",
            },
        }))
    }

    fn render_distribution_comparison(
        &self,
        baseline: &[u64],
        competitor: &[u64],
        baseline_label: &str,
        competitor_label: &str,
    ) -> Result<Value> {
        Ok(json!({
            "data": [
                Self::box_trace(baseline, baseline_label, &self.baseline_color),
                Self::box_trace(competitor, competitor_label, &self.competitor_color),
            ],
            "layout": Self::distribution_layout(),
        }))
    }

    /// Every trace of the per-query figures side by side, in query order.
    fn render_combined_distribution(
        &self,
        per_query: &[&Value],
        _baseline: &[u64],
        _competitor: &[u64],
        _baseline_label: &str,
        _competitor_label: &str,
    ) -> Result<Value> {
        let traces: Vec<Value> = per_query
            .iter()
            .copied()
            .filter_map(|figure| figure["data"].as_array())
            .flatten()
            .cloned()
            .collect();
        Ok(json!({
            "data": traces,
            "layout": Self::distribution_layout(),
        }))
    }
}

/// Where a chart of a run is written below `output_root`.
///
/// ```text
/// <out>/<runId>/Charts/average-time-Chart-<label>.json
/// <out>/<runId>/Charts/single-query-stddev/query-<n>-Chart-<label>.json
/// <out>/<runId>/Charts/total-stddev-Chart-<label>.json
/// ```
pub fn chart_path(output_root: &Path, run_id: &RunId, kind: ChartKind, label: &str) -> PathBuf {
    let charts = output_root.join(run_id.as_str()).join(CHARTS_DIR);
    match kind {
        ChartKind::Average => charts.join(format!("average-time-Chart-{}.json", label)),
        ChartKind::Query(n) => charts
            .join(SINGLE_QUERY_DIR)
            .join(format!("query-{}-Chart-{}.json", n, label)),
        ChartKind::Combined => charts.join(format!("total-stddev-Chart-{}.json", label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_figure() {
        let renderer = FigureRenderer::new(&AnalysisConfig::default());
        let queries = vec!["1".to_string(), "2".to_string()];
        let figure = renderer
            .render_grouped_comparison(&queries, &[10, 20], &[30, 40], "aMOR", "OWL-API")
            .unwrap();

        assert_eq!(figure["layout"]["barmode"], "group");
        assert_eq!(figure["data"][0]["type"], "bar");
        assert_eq!(figure["data"][0]["x"], json!(["1", "2"]));
        assert_eq!(figure["data"][0]["y"], json!([10, 20]));
        assert_eq!(figure["data"][0]["marker"]["color"], "rgb(49,130,189)");
        assert_eq!(figure["data"][1]["name"], "OWL-API");
        assert_eq!(figure["data"][1]["marker"]["color"], "rgb(204,50,50)");
    }

    #[test]
    fn test_distribution_figure() {
        let renderer = FigureRenderer::new(&AnalysisConfig::default());
        let figure = renderer
            .render_distribution_comparison(&[1, 2, 3], &[4, 5], "aMOR query-1", "OWL-API query-1")
            .unwrap();

        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["type"], "box");
        assert_eq!(data[0]["boxpoints"], "all");
        assert_eq!(data[0]["jitter"], 0.3);
        assert_eq!(data[0]["name"], "aMOR query-1");
        assert_eq!(data[1]["y"], json!([4, 5]));
        assert_eq!(figure["layout"]["yaxis"]["title"], "Standard Deviation");
    }

    #[test]
    fn test_combined_figure_keeps_every_query_trace() {
        let renderer = FigureRenderer::new(&AnalysisConfig::default());
        let queries: Vec<Value> = (1..=3)
            .map(|n| {
                renderer
                    .render_distribution_comparison(
                        &[n],
                        &[n * 10],
                        &format!("aMOR query-{}", n),
                        &format!("OWL-API query-{}", n),
                    )
                    .unwrap()
            })
            .collect();
        let parts: Vec<&Value> = queries.iter().collect();

        let figure = renderer
            .render_combined_distribution(&parts, &[1, 2, 3], &[10, 20, 30], "aMOR", "OWL-API")
            .unwrap();

        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 6);
        assert_eq!(data[0]["name"], "aMOR query-1");
        assert_eq!(data[1]["name"], "OWL-API query-1");
        assert_eq!(data[4]["name"], "aMOR query-3");
        assert_eq!(data[5]["y"], json!([30]));
        assert_eq!(data[5]["marker"]["color"], "rgb(204,50,50)");
        assert_eq!(figure["layout"]["width"], 1250);
    }

    #[test]
    fn test_custom_colors() {
        let mut config = AnalysisConfig::default();
        config.baseline.color = "#000".to_string();
        let renderer = FigureRenderer::new(&config);
        let figure = renderer
            .render_distribution_comparison(&[1], &[2], "a", "b")
            .unwrap();
        assert_eq!(figure["data"][0]["marker"]["color"], "#000");
    }

    #[test]
    fn test_chart_paths() {
        let root = Path::new("/results");
        let run = RunId::new("uni0dep1");
        assert_eq!(
            chart_path(root, &run, ChartKind::Average, "01"),
            PathBuf::from("/results/uni0dep1/Charts/average-time-Chart-01.json")
        );
        assert_eq!(
            chart_path(root, &run, ChartKind::Query(7), "01"),
            PathBuf::from("/results/uni0dep1/Charts/single-query-stddev/query-7-Chart-01.json")
        );
        assert_eq!(
            chart_path(root, &run, ChartKind::Combined, "01"),
            PathBuf::from("/results/uni0dep1/Charts/total-stddev-Chart-01.json")
        );
    }
}
