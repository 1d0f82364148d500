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

//! Discovery of result files and pairing by run id.
//!
//! # Algorithm
//!
//! 1. Walk the tree (entries sorted by file name, symlinks not followed) and
//!    classify every regular file.
//! 2. Group the classified files by run id in a single pass.
//! 3. Accept a group only when it holds exactly one baseline and exactly one
//!    competitor file; every other group is reported as incomplete.
//!
//! Pairs are emitted in run id order. A stray or missing file only affects
//! its own run id.

use crate::classify::{Classification, Classifier, Engine, ResultFile, RunId};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Fault, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// A baseline and a competitor result file for the same run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPair {
    /// Run shared by both files.
    pub run_id: RunId,
    /// Baseline result file.
    pub baseline: ResultFile,
    /// Competitor result file.
    pub competitor: ResultFile,
}

impl ResultPair {
    /// Result file of the given engine.
    pub fn file(&self, engine: Engine) -> &ResultFile {
        match engine {
            Engine::Baseline => &self.baseline,
            Engine::Competitor => &self.competitor,
        }
    }
}

/// Files collected by a directory walk.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Classified result files in traversal order.
    pub files: Vec<ResultFile>,
    /// Ambiguous names and unreadable entries.
    pub faults: Vec<Fault>,
    /// Regular files inspected.
    pub scanned: usize,
}

/// Outcome of one pairing pass.
#[derive(Debug, Clone, Default)]
pub struct PairingReport {
    /// Complete pairs in run id order.
    pub pairs: Vec<ResultPair>,
    /// Classification, walk and grouping faults.
    pub faults: Vec<Fault>,
    /// Regular files inspected.
    pub scanned: usize,
    /// Files classified as result files.
    pub classified: usize,
}

#[derive(Debug, Default)]
struct PairSlot {
    baseline: Vec<ResultFile>,
    competitor: Vec<ResultFile>,
}

impl PairSlot {
    fn push(&mut self, file: ResultFile) {
        match file.engine {
            Engine::Baseline => self.baseline.push(file),
            Engine::Competitor => self.competitor.push(file),
        }
    }

    fn into_pair(mut self, run_id: RunId) -> std::result::Result<ResultPair, Fault> {
        if self.baseline.len() == 1 && self.competitor.len() == 1 {
            if let (Some(baseline), Some(competitor)) = (self.baseline.pop(), self.competitor.pop())
            {
                return Ok(ResultPair {
                    run_id,
                    baseline,
                    competitor,
                });
            }
        }

        let error = AnalysisError::IncompleteGroup {
            run_id: run_id.to_string(),
            baseline: self.baseline.len(),
            competitor: self.competitor.len(),
        };
        Err(Fault::for_run(run_id, error))
    }
}

/// Walk `root` and classify every regular file.
///
/// # Errors
///
/// Fails only when `root` itself is missing or not a directory. Problems
/// with individual entries are recorded in [`Discovery::faults`].
pub fn discover(root: &Path, classifier: &Classifier) -> Result<Discovery> {
    let metadata = std::fs::metadata(root).map_err(|e| AnalysisError::io_error(root, e))?;
    if !metadata.is_dir() {
        return Err(AnalysisError::Io {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                let error = AnalysisError::Io {
                    path: path.clone(),
                    message: err.to_string(),
                };
                discovery.faults.push(Fault::for_file(path, None, error));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        discovery.scanned += 1;

        let path = entry.path();
        match classifier.classify_path(path) {
            Classification::Matched { engine, run_id } => {
                debug!(path = %path.display(), %engine, %run_id, "classified result file");
                discovery.files.push(ResultFile {
                    path: path.to_path_buf(),
                    engine,
                    run_id,
                });
            }
            Classification::Unmatched => {
                trace!(path = %path.display(), "ignoring non-result file");
            }
            Classification::Ambiguous { reason } => {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                warn!(path = %path.display(), %reason, "skipping ambiguous result file");
                let error = AnalysisError::ClassificationAmbiguity { file_name, reason };
                discovery.faults.push(Fault::for_file(path, None, error));
            }
        }
    }

    Ok(discovery)
}

/// Group classified files by run id and keep complete groups.
///
/// Returns the pairs in run id order and one fault per incomplete group.
pub fn group_by_run(files: Vec<ResultFile>) -> (Vec<ResultPair>, Vec<Fault>) {
    let mut slots: BTreeMap<RunId, PairSlot> = BTreeMap::new();
    for file in files {
        slots.entry(file.run_id.clone()).or_default().push(file);
    }

    let mut pairs = Vec::with_capacity(slots.len());
    let mut faults = Vec::new();

    for (run_id, slot) in slots {
        match slot.into_pair(run_id) {
            Ok(pair) => pairs.push(pair),
            Err(fault) => {
                warn!(fault = %fault.error, "skipping incomplete run");
                faults.push(fault);
            }
        }
    }

    (pairs, faults)
}

/// Discover and pair all result files under `root`.
///
/// # Examples
///
/// ```no_run
/// use benchpair_core::{pair_results, AnalysisConfig};
/// use std::path::Path;
///
/// let report = pair_results(Path::new("results/2017-03-01"), &AnalysisConfig::default())?;
/// for pair in &report.pairs {
///     println!("{}: {} vs {}", pair.run_id,
///         pair.baseline.path.display(), pair.competitor.path.display());
/// }
/// # Ok::<(), benchpair_core::AnalysisError>(())
/// ```
pub fn pair_results(root: &Path, config: &AnalysisConfig) -> Result<PairingReport> {
    let classifier = Classifier::from_config(config);
    let discovery = discover(root, &classifier)?;

    let classified = discovery.files.len();
    let (pairs, group_faults) = group_by_run(discovery.files);

    let mut faults = discovery.faults;
    faults.extend(group_faults);

    debug!(
        root = %root.display(),
        scanned = discovery.scanned,
        classified,
        pairs = pairs.len(),
        faults = faults.len(),
        "pairing pass complete"
    );

    Ok(PairingReport {
        pairs,
        faults,
        scanned: discovery.scanned,
        classified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn file(name: &str, engine: Engine, run: &str) -> ResultFile {
        ResultFile {
            path: PathBuf::from(name),
            engine,
            run_id: RunId::new(run),
        }
    }

    #[test]
    fn test_group_assigns_members_by_engine_not_position() {
        let files = vec![
            file("OWLAPI-a.csv", Engine::Competitor, "a"),
            file("aMOR-a.csv", Engine::Baseline, "a"),
        ];
        let (pairs, faults) = group_by_run(files);
        assert!(faults.is_empty());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].baseline.path, PathBuf::from("aMOR-a.csv"));
        assert_eq!(pairs[0].competitor.path, PathBuf::from("OWLAPI-a.csv"));
    }

    #[test]
    fn test_group_ignores_interleaving() {
        // Adjacent entries belong to different runs; keyed grouping still pairs them.
        let files = vec![
            file("aMOR-a.csv", Engine::Baseline, "a"),
            file("aMOR-b.csv", Engine::Baseline, "b"),
            file("OWLAPI-b.csv", Engine::Competitor, "b"),
            file("OWLAPI-a.csv", Engine::Competitor, "a"),
        ];
        let (pairs, faults) = group_by_run(files);
        assert!(faults.is_empty());
        let ids: Vec<&str> = pairs.iter().map(|p| p.run_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_group_reports_duplicates_and_missing_partner() {
        let files = vec![
            file("x/aMOR-a.csv", Engine::Baseline, "a"),
            file("y/aMOR-a.csv", Engine::Baseline, "a"),
            file("aMOR-b.csv", Engine::Baseline, "b"),
            file("OWLAPI-b.csv", Engine::Competitor, "b"),
            file("OWLAPI-c.csv", Engine::Competitor, "c"),
        ];
        let (pairs, faults) = group_by_run(files);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].run_id.as_str(), "b");

        assert_eq!(faults.len(), 2);
        assert_eq!(faults[0].run_id, Some(RunId::new("a")));
        assert_eq!(
            faults[0].error,
            AnalysisError::IncompleteGroup {
                run_id: "a".to_string(),
                baseline: 2,
                competitor: 0,
            }
        );
        assert_eq!(faults[1].run_id, Some(RunId::new("c")));
        assert!(faults
            .iter()
            .all(|f| f.kind() == FaultKind::PairingIncompleteGroup));
    }

    #[test]
    fn test_discover_missing_root_is_error() {
        let classifier = Classifier::new("aMOR-", "OWLAPI-");
        let err = discover(Path::new("/nonexistent/benchpair/root"), &classifier).unwrap_err();
        assert_eq!(err.kind(), FaultKind::IoFailure);
    }

    #[test]
    fn test_discover_file_root_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aMOR-a.csv");
        fs::write(&path, "x").unwrap();
        let classifier = Classifier::new("aMOR-", "OWLAPI-");
        let err = discover(&path, &classifier).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_pair_results_walks_nested_directories() {
        let dir = TempDir::new().unwrap();
        for run in ["uni0dep0", "uni0dep1"] {
            let run_dir = dir.path().join(run);
            fs::create_dir_all(&run_dir).unwrap();
            fs::write(run_dir.join(format!("aMOR-{}.csv", run)), "").unwrap();
            fs::write(run_dir.join(format!("OWLAPI-{}.csv", run)), "").unwrap();
            fs::write(run_dir.join(format!("{}-enquired.owl", run)), "").unwrap();
        }
        fs::write(dir.path().join("aMOR-OWLAPI-bad.csv"), "").unwrap();

        let report = pair_results(dir.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.scanned, 7);
        assert_eq!(report.classified, 4);
        assert_eq!(report.pairs.len(), 2);
        assert_eq!(report.pairs[0].run_id.as_str(), "uni0dep0");
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].kind(), FaultKind::ClassificationAmbiguity);
    }
}
