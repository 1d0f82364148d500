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

//! Rendering seam.
//!
//! The core never draws anything. It hands shaped series to a
//! [`ComparisonRenderer`] and collects whatever artifacts the renderer
//! produces, one per chart.

use crate::classify::RunId;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::parse::ParseMode;
use crate::series::SeriesPair;
use tracing::debug;

/// Draws baseline/competitor comparisons.
pub trait ComparisonRenderer {
    /// What one rendered chart is (a figure description, a file path, ...).
    type Artifact;

    /// Grouped comparison of one value per query and engine.
    ///
    /// `queries`, `baseline` and `competitor` have the same length.
    fn render_grouped_comparison(
        &self,
        queries: &[String],
        baseline: &[u64],
        competitor: &[u64],
        baseline_label: &str,
        competitor_label: &str,
    ) -> Result<Self::Artifact>;

    /// Distribution comparison of two sample sets.
    fn render_distribution_comparison(
        &self,
        baseline: &[u64],
        competitor: &[u64],
        baseline_label: &str,
        competitor_label: &str,
    ) -> Result<Self::Artifact>;

    /// Combined view of a run, given its per-query distribution charts in
    /// query order and every sample of each engine in the same order.
    ///
    /// The default draws one distribution per engine over all samples.
    /// Renderers that can lay several distributions side by side should
    /// override it to combine `per_query` instead.
    fn render_combined_distribution(
        &self,
        per_query: &[&Self::Artifact],
        baseline: &[u64],
        competitor: &[u64],
        baseline_label: &str,
        competitor_label: &str,
    ) -> Result<Self::Artifact> {
        let _ = per_query;
        self.render_distribution_comparison(baseline, competitor, baseline_label, competitor_label)
    }
}

/// Which chart of a run an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartKind {
    /// Grouped averages of all queries.
    Average,
    /// Distribution of one query.
    Query(usize),
    /// Distribution of all queries combined.
    Combined,
}

/// One rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart<A> {
    /// Chart identity.
    pub kind: ChartKind,
    /// Renderer output.
    pub artifact: A,
}

/// Every chart rendered for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCharts<A> {
    /// Run the charts describe.
    pub run_id: RunId,
    /// Charts in rendering order.
    pub charts: Vec<RenderedChart<A>>,
}

/// Render every chart of a series pair.
///
/// Aggregate pairs produce a single grouped chart labelled `"1"..="N"`.
/// Per-trial pairs produce one distribution chart per query, labelled
/// `"<engine label> query-<n>"`, followed by a combined chart built by
/// [`ComparisonRenderer::render_combined_distribution`].
pub fn render_series_pair<R: ComparisonRenderer>(
    pair: &SeriesPair,
    renderer: &R,
    config: &AnalysisConfig,
) -> Result<RenderedCharts<R::Artifact>> {
    let baseline_label = config.baseline.label.as_str();
    let competitor_label = config.competitor.label.as_str();
    let mut charts = Vec::new();

    match pair.mode {
        ParseMode::Aggregate => {
            let queries: Vec<String> = pair.queries().iter().map(|q| q.to_string()).collect();
            let artifact = renderer.render_grouped_comparison(
                &queries,
                &pair.baseline.averages(),
                &pair.competitor.averages(),
                baseline_label,
                competitor_label,
            )?;
            charts.push(RenderedChart {
                kind: ChartKind::Average,
                artifact,
            });
        }
        ParseMode::PerTrial => {
            for query in pair.queries() {
                let baseline = pair.baseline.samples(query).unwrap_or_default();
                let competitor = pair.competitor.samples(query).unwrap_or_default();
                let artifact = renderer.render_distribution_comparison(
                    baseline,
                    competitor,
                    &format!("{} query-{}", baseline_label, query),
                    &format!("{} query-{}", competitor_label, query),
                )?;
                charts.push(RenderedChart {
                    kind: ChartKind::Query(query),
                    artifact,
                });
            }

            let per_query: Vec<&R::Artifact> = charts.iter().map(|c| &c.artifact).collect();
            let artifact = renderer.render_combined_distribution(
                &per_query,
                &pair.baseline.combined_samples(),
                &pair.competitor.combined_samples(),
                baseline_label,
                competitor_label,
            )?;
            charts.push(RenderedChart {
                kind: ChartKind::Combined,
                artifact,
            });
        }
    }

    debug!(run_id = %pair.run_id, charts = charts.len(), "rendered run");

    Ok(RenderedCharts {
        run_id: pair.run_id.clone(),
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Engine;
    use crate::parse::Timing;
    use crate::series::EngineSeries;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl ComparisonRenderer for Recorder {
        type Artifact = usize;

        fn render_grouped_comparison(
            &self,
            queries: &[String],
            baseline: &[u64],
            competitor: &[u64],
            baseline_label: &str,
            competitor_label: &str,
        ) -> Result<usize> {
            self.calls.borrow_mut().push(format!(
                "grouped {:?} {:?} {:?} {} {}",
                queries, baseline, competitor, baseline_label, competitor_label
            ));
            Ok(queries.len())
        }

        fn render_distribution_comparison(
            &self,
            baseline: &[u64],
            competitor: &[u64],
            baseline_label: &str,
            competitor_label: &str,
        ) -> Result<usize> {
            self.calls.borrow_mut().push(format!(
                "distribution {:?} {:?} {} {}",
                baseline, competitor, baseline_label, competitor_label
            ));
            Ok(baseline.len() + competitor.len())
        }
    }

    fn series(engine: Engine, mode: ParseMode, timings: Vec<Timing>) -> EngineSeries {
        let per_query: BTreeMap<usize, Timing> = timings
            .into_iter()
            .enumerate()
            .map(|(i, t)| (i + 1, t))
            .collect();
        EngineSeries {
            engine,
            run_id: RunId::new("uni0dep0"),
            mode,
            per_query,
        }
    }

    #[test]
    fn test_aggregate_renders_one_grouped_chart() {
        let mode = ParseMode::Aggregate;
        let pair = SeriesPair {
            run_id: RunId::new("uni0dep0"),
            mode,
            baseline: series(Engine::Baseline, mode, vec![Timing::Aggregate(1), Timing::Aggregate(2)]),
            competitor: series(Engine::Competitor, mode, vec![Timing::Aggregate(3), Timing::Aggregate(4)]),
        };
        let recorder = Recorder::default();
        let rendered = render_series_pair(&pair, &recorder, &AnalysisConfig::default()).unwrap();

        assert_eq!(rendered.charts.len(), 1);
        assert_eq!(rendered.charts[0].kind, ChartKind::Average);
        assert_eq!(rendered.charts[0].artifact, 2);
        assert_eq!(
            recorder.calls.borrow()[0],
            r#"grouped ["1", "2"] [1, 2] [3, 4] aMOR OWL-API"#
        );
    }

    #[test]
    fn test_per_trial_renders_query_and_combined_charts() {
        let mode = ParseMode::PerTrial;
        let pair = SeriesPair {
            run_id: RunId::new("uni0dep0"),
            mode,
            baseline: series(
                Engine::Baseline,
                mode,
                vec![Timing::Samples(vec![1, 2]), Timing::Samples(vec![3, 4])],
            ),
            competitor: series(
                Engine::Competitor,
                mode,
                vec![Timing::Samples(vec![5, 6]), Timing::Samples(vec![7, 8])],
            ),
        };
        let recorder = Recorder::default();
        let rendered = render_series_pair(&pair, &recorder, &AnalysisConfig::default()).unwrap();

        let kinds: Vec<ChartKind> = rendered.charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChartKind::Query(1), ChartKind::Query(2), ChartKind::Combined]
        );

        let calls = recorder.calls.borrow();
        assert_eq!(calls[0], "distribution [1, 2] [5, 6] aMOR query-1 OWL-API query-1");
        assert_eq!(calls[1], "distribution [3, 4] [7, 8] aMOR query-2 OWL-API query-2");
        assert_eq!(calls[2], "distribution [1, 2, 3, 4] [5, 6, 7, 8] aMOR OWL-API");
        assert_eq!(rendered.charts[2].artifact, 8);
    }

    struct Stacking;

    impl ComparisonRenderer for Stacking {
        type Artifact = Vec<String>;

        fn render_grouped_comparison(
            &self,
            queries: &[String],
            _baseline: &[u64],
            _competitor: &[u64],
            _baseline_label: &str,
            _competitor_label: &str,
        ) -> Result<Vec<String>> {
            Ok(queries.to_vec())
        }

        fn render_distribution_comparison(
            &self,
            _baseline: &[u64],
            _competitor: &[u64],
            baseline_label: &str,
            competitor_label: &str,
        ) -> Result<Vec<String>> {
            Ok(vec![baseline_label.to_string(), competitor_label.to_string()])
        }

        fn render_combined_distribution(
            &self,
            per_query: &[&Vec<String>],
            _baseline: &[u64],
            _competitor: &[u64],
            _baseline_label: &str,
            _competitor_label: &str,
        ) -> Result<Vec<String>> {
            Ok(per_query.iter().flat_map(|labels| labels.iter().cloned()).collect())
        }
    }

    #[test]
    fn test_combined_chart_receives_query_charts_in_order() {
        let mode = ParseMode::PerTrial;
        let pair = SeriesPair {
            run_id: RunId::new("uni0dep0"),
            mode,
            baseline: series(
                Engine::Baseline,
                mode,
                vec![Timing::Samples(vec![1]), Timing::Samples(vec![2]), Timing::Samples(vec![3])],
            ),
            competitor: series(
                Engine::Competitor,
                mode,
                vec![Timing::Samples(vec![4]), Timing::Samples(vec![5]), Timing::Samples(vec![6])],
            ),
        };
        let rendered = render_series_pair(&pair, &Stacking, &AnalysisConfig::default()).unwrap();

        let combined = &rendered.charts[3];
        assert_eq!(combined.kind, ChartKind::Combined);
        assert_eq!(combined.artifact.len(), 6);
        assert_eq!(combined.artifact[0], "aMOR query-1");
        assert_eq!(combined.artifact[1], "OWL-API query-1");
        assert_eq!(combined.artifact[5], "OWL-API query-3");
    }
}
