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

//! Result file classification.
//!
//! A result file belongs to an engine when its name contains that engine's
//! marker. The run id is what remains after the marker prefix and the
//! extension suffix are removed:
//!
//! ```text
//! aMOR-uni0dep1.csv    -> (Baseline,   "uni0dep1")
//! OWLAPI-uni0dep1.csv  -> (Competitor, "uni0dep1")
//! notes.txt            -> not a result file
//! ```

use crate::config::AnalysisConfig;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// One of the two engines being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// The reference engine (aMOR).
    Baseline,
    /// The engine compared against the baseline (OWL-API).
    Competitor,
}

impl Engine {
    /// Both engines, baseline first.
    pub const ALL: [Engine; 2] = [Engine::Baseline, Engine::Competitor];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Baseline => "baseline",
            Engine::Competitor => "competitor",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a benchmark scenario shared by its two result files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Wrap a run id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The run id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RunId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A discovered, classified result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultFile {
    /// Location as discovered under the scanned root.
    pub path: PathBuf,
    /// Engine that produced the file.
    pub engine: Engine,
    /// Run the file belongs to.
    pub run_id: RunId,
}

/// Outcome of classifying one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Exactly one marker, in prefix position, leaving a usable run id.
    Matched {
        /// Engine owning the marker.
        engine: Engine,
        /// Extracted run id.
        run_id: RunId,
    },
    /// Neither marker occurs; the file is not a result file.
    Unmatched,
    /// A marker occurs but the name cannot be attributed safely.
    Ambiguous {
        /// Human-readable diagnostic.
        reason: String,
    },
}

/// Classifies file names by engine marker.
///
/// # Examples
///
/// ```
/// use benchpair_core::{Classifier, Engine};
///
/// let classifier = Classifier::new("aMOR-", "OWLAPI-");
///
/// let (engine, run_id) = classifier.classify("OWLAPI-uni0dep1.csv").unwrap();
/// assert_eq!(engine, Engine::Competitor);
/// assert_eq!(run_id.as_str(), "uni0dep1");
///
/// assert!(classifier.classify("README.md").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    baseline_marker: String,
    competitor_marker: String,
}

impl Classifier {
    /// Create a classifier from the two markers.
    pub fn new(baseline_marker: impl Into<String>, competitor_marker: impl Into<String>) -> Self {
        Self {
            baseline_marker: baseline_marker.into(),
            competitor_marker: competitor_marker.into(),
        }
    }

    /// Create a classifier from the configured engine profiles.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.baseline.marker.clone(), config.competitor.marker.clone())
    }

    /// Marker of the given engine.
    pub fn marker(&self, engine: Engine) -> &str {
        match engine {
            Engine::Baseline => &self.baseline_marker,
            Engine::Competitor => &self.competitor_marker,
        }
    }

    /// Classify a file name, returning `None` for anything that is not an
    /// unambiguous result file.
    pub fn classify(&self, file_name: &str) -> Option<(Engine, RunId)> {
        match self.classify_detailed(file_name) {
            Classification::Matched { engine, run_id } => Some((engine, run_id)),
            Classification::Unmatched | Classification::Ambiguous { .. } => None,
        }
    }

    /// Classify a file name, explaining rejections.
    pub fn classify_detailed(&self, file_name: &str) -> Classification {
        let has_baseline = file_name.contains(self.baseline_marker.as_str());
        let has_competitor = file_name.contains(self.competitor_marker.as_str());

        match (has_baseline, has_competitor) {
            (false, false) => Classification::Unmatched,
            (true, true) => Classification::Ambiguous {
                reason: format!(
                    "contains both markers '{}' and '{}'",
                    self.baseline_marker, self.competitor_marker
                ),
            },
            (true, false) => self.extract(file_name, Engine::Baseline),
            (false, true) => self.extract(file_name, Engine::Competitor),
        }
    }

    /// Classify the final component of a path.
    ///
    /// Names that are not valid UTF-8 are treated as unmatched.
    pub fn classify_path(&self, path: &Path) -> Classification {
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => self.classify_detailed(name),
            None => Classification::Unmatched,
        }
    }

    /// Strip the marker prefix and the extension suffix.
    fn extract(&self, file_name: &str, engine: Engine) -> Classification {
        let marker = self.marker(engine);

        let Some(rest) = file_name.strip_prefix(marker) else {
            return Classification::Ambiguous {
                reason: format!("marker '{}' is not a prefix of the name", marker),
            };
        };

        // A leading dot starts the name, not an extension.
        let run_id = match rest.rfind('.') {
            Some(dot) if dot > 0 => &rest[..dot],
            _ => rest,
        };

        if run_id.is_empty() {
            return Classification::Ambiguous {
                reason: "no run id left after removing marker and extension".to_string(),
            };
        }

        // Run ids name output directories.
        if run_id == "." || run_id == ".." || run_id.contains(['/', '\\']) {
            return Classification::Ambiguous {
                reason: format!("run id '{}' is not a usable directory name", run_id),
            };
        }

        if run_id.contains(self.baseline_marker.as_str())
            || run_id.contains(self.competitor_marker.as_str())
        {
            return Classification::Ambiguous {
                reason: format!("run id '{}' still contains an engine marker", run_id),
            };
        }

        Classification::Matched {
            engine,
            run_id: RunId::new(run_id),
        }
    }
}
