//! Versioned exam tables: job and agent keyword tables plus the fixed
//! baseline, toggle and audiometry entries.
//!
//! The bundled copy is compiled in from `resources/exam_tables.json`.
//! An external JSON file with the same shape can replace it at startup.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::TableError;

const BUNDLED_JSON: &str = include_str!("../../resources/exam_tables.json");

static BUNDLED: LazyLock<ExamTables> = LazyLock::new(|| {
    ExamTables::from_json(BUNDLED_JSON).expect("Invalid bundled exam tables")
});

/// One keyword row of the job or agent table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Lower-case substring looked up in the normalised input.
    pub keyword: String,
    pub tests: Vec<String>,
}

/// Tests appended when a toggle is on, with the factor label it reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleExtra {
    pub marker: String,
    pub tests: Vec<String>,
}

/// Pure-tone audiometry rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudiometryBands {
    /// Any test item containing this substring is an audiometry variant.
    pub marker: String,
    /// Canonical item for pre-placement exams.
    pub pre_placement: String,
    /// Canonical item for periodic exams.
    pub periodic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamTables {
    pub version: String,
    pub baseline: Vec<String>,
    pub jobs: Vec<KeywordEntry>,
    pub agents: Vec<KeywordEntry>,
    pub outdoor: ToggleExtra,
    pub vibration: ToggleExtra,
    pub audiometry: AudiometryBands,
}

impl ExamTables {
    /// Tables compiled into the binary.
    pub fn bundled() -> &'static ExamTables {
        &BUNDLED
    }

    /// Parse and validate a tables document.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tables: ExamTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// External file when given, bundled tables otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, TableError> {
        let tables = match path {
            Some(p) => {
                let tables = Self::load(p)?;
                tracing::info!(
                    path = %p.display(),
                    version = %tables.version,
                    jobs = tables.jobs.len(),
                    agents = tables.agents.len(),
                    "Loaded exam tables from file"
                );
                tables
            }
            None => {
                let tables = Self::bundled().clone();
                tracing::debug!(version = %tables.version, "Using bundled exam tables");
                tables
            }
        };
        Ok(tables)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.version.trim().is_empty() {
            return Err(TableError::Invalid("version is empty".into()));
        }
        if self.baseline.is_empty() {
            return Err(TableError::Invalid("baseline test list is empty".into()));
        }

        for (name, table) in [("jobs", &self.jobs), ("agents", &self.agents)] {
            let mut seen = HashSet::new();
            for entry in table {
                if entry.keyword.trim().is_empty() {
                    return Err(TableError::Invalid(format!("{name}: empty keyword")));
                }
                if entry.keyword != entry.keyword.to_lowercase() {
                    return Err(TableError::Invalid(format!(
                        "{name}: keyword '{}' is not lower-case and can never match",
                        entry.keyword
                    )));
                }
                if !seen.insert(entry.keyword.as_str()) {
                    return Err(TableError::Invalid(format!(
                        "{name}: duplicate keyword '{}'",
                        entry.keyword
                    )));
                }
                if entry.tests.is_empty() {
                    return Err(TableError::Invalid(format!(
                        "{name}: keyword '{}' has no tests",
                        entry.keyword
                    )));
                }
            }
        }

        for (name, extra) in [("outdoor", &self.outdoor), ("vibration", &self.vibration)] {
            if extra.marker.trim().is_empty() || extra.tests.is_empty() {
                return Err(TableError::Invalid(format!(
                    "{name}: marker and tests are required"
                )));
            }
        }

        let bands = &self.audiometry;
        if bands.marker.is_empty() {
            return Err(TableError::Invalid("audiometry marker is empty".into()));
        }
        if bands.pre_placement == bands.periodic {
            return Err(TableError::Invalid(
                "audiometry bands must differ".into(),
            ));
        }

        Ok(())
    }

    /// True for any test item that names pure-tone audiometry.
    pub fn is_audiometry(&self, item: &str) -> bool {
        item.contains(self.audiometry.marker.as_str())
    }

    /// Canonical audiometry item for the exam type.
    pub fn audiometry_band(&self, pre_placement: bool) -> &str {
        if pre_placement {
            &self.audiometry.pre_placement
        } else {
            &self.audiometry.periodic
        }
    }

    /// Job table first, then agent table, in document order.
    pub fn keyword_entries(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.jobs.iter().chain(self.agents.iter())
    }
}
