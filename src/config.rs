use crate::error::{AppError, Result};
use crate::util::DateFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "atividades.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Bundled activity export.
    pub dataset: PathBuf,
    /// Where CSV/JSON exports are written.
    pub output_dir: PathBuf,
    /// Date layout the export is expected to use.
    pub date_format: DateFormat,
    /// Rows shown in console previews.
    pub preview_rows: usize,
    /// When set, monthly tables are seeded with all twelve months of this year.
    pub skeleton_year: Option<i32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            dataset: PathBuf::from("data/atividades.json"),
            output_dir: PathBuf::from("reports"),
            date_format: DateFormat::DayMonthYear,
            preview_rows: 5,
            skeleton_year: None,
        }
    }
}

impl ReportConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path must exist; otherwise the default file is read when
    /// present and defaults are used when it is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };
        log::info!("Reading config from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml(&text, &path)
    }
}
