//! YAML run manifest and its merge with command-line settings.
//!
//! ```yaml
//! reports:
//!   - year: 2012
//!     path: raw/2012-clearance-rates.txt
//!   - year: 2013
//!     path: raw/2013-clearance-rates.txt
//! crosswalk: crosswalk.csv
//! out_dir: out
//! split_by_year: true
//! ```
//!
//! Relative paths are resolved against the manifest's own directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ClearanceError;
use crate::export::ExtractOptions;
use crate::report::ReportSource;

/// The contents of a run manifest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub reports: Vec<ReportSource>,
    pub crosswalk: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub split_by_year: bool,
    #[serde(default)]
    pub split_by_state: bool,
}

impl RunConfig {
    /// Reads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ClearanceError> {
        let data = fs::read_to_string(path).map_err(ClearanceError::Io)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_yaml_str(&data, base).map_err(|source| {
            ClearanceError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(
            "Loaded run config {} ({} reports)",
            path.display(),
            config.reports.len()
        );
        Ok(config)
    }

    /// Parses a manifest, resolving relative paths against `base`.
    pub fn from_yaml_str(data: &str, base: &Path) -> Result<Self, serde_yaml::Error> {
        let mut config: RunConfig = serde_yaml::from_str(data)?;
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for source in &mut self.reports {
            source.path = resolve(base, &source.path);
        }
        if let Some(path) = self.crosswalk.as_mut() {
            *path = resolve(base, path);
        }
        if let Some(path) = self.out_dir.as_mut() {
            *path = resolve(base, path);
        }
    }

    /// Combines the manifest with command-line settings.
    ///
    /// Command-line values win. Reports given on the command line replace
    /// the manifest's list entirely; the split flags are enabled if either
    /// side enables them.
    ///
    /// # Errors
    /// [`ClearanceError::ConfigInvalid`] if no report, crosswalk or output
    /// directory is known after merging.
    pub fn merge(self, overrides: BuildOverrides) -> Result<BuildSettings, ClearanceError> {
        let reports = if overrides.reports.is_empty() {
            self.reports
        } else {
            overrides.reports
        };
        if reports.is_empty() {
            return Err(missing("no report files given"));
        }

        let crosswalk = overrides
            .crosswalk
            .or(self.crosswalk)
            .ok_or_else(|| missing("no agency crosswalk given"))?;
        let out_dir = overrides
            .out_dir
            .or(self.out_dir)
            .ok_or_else(|| missing("no output directory given"))?;

        Ok(BuildSettings {
            reports,
            crosswalk,
            out_dir,
            extracts: ExtractOptions {
                split_by_year: self.split_by_year || overrides.split_by_year,
                split_by_state: self.split_by_state || overrides.split_by_state,
            },
        })
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn missing(message: &str) -> ClearanceError {
    ClearanceError::ConfigInvalid {
        message: message.to_string(),
    }
}

/// Build settings taken from the command line.
#[derive(Clone, Debug, Default)]
pub struct BuildOverrides {
    pub reports: Vec<ReportSource>,
    pub crosswalk: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub split_by_year: bool,
    pub split_by_state: bool,
}

/// Fully resolved settings of a `build` run.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildSettings {
    pub reports: Vec<ReportSource>,
    pub crosswalk: PathBuf,
    pub out_dir: PathBuf,
    pub extracts: ExtractOptions,
}
