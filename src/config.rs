use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FatalError;
use crate::ops::manifest::VersionPattern;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub trackers: Option<Vec<Tracker>>,
}

impl Config {
    pub fn update(&mut self, source: &Config) {
        if let Some(trackers) = source.trackers.as_ref() {
            self.trackers = Some(trackers.clone());
        }
    }

    /// Tracked files, defaulting to the package manifest alone.
    pub fn trackers(&self) -> Vec<Tracker> {
        self.trackers
            .clone()
            .unwrap_or_else(|| vec![Tracker::new("Cargo.toml")])
    }
}

/// Pairs a file with the pattern that locates its version field.
///
/// This is the explicit form of the reader/writer hook records a release
/// tool is configured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tracker {
    pub file: PathBuf,
    /// Anchor on `name = "<package>"` when the file lists more than one
    /// version field (lock files).
    pub package: Option<String>,
}

impl Tracker {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Tracker {
            file: file.into(),
            package: None,
        }
    }

    pub fn for_package(file: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Tracker {
            file: file.into(),
            package: Some(package.into()),
        }
    }

    pub fn pattern(&self) -> VersionPattern {
        match self.package.as_deref() {
            Some(package) => VersionPattern::anchored(package),
            None => VersionPattern::line(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct CargoPackage {
    metadata: Option<CargoMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct CargoMetadata {
    track: Option<Config>,
}

fn get_config_from_manifest(manifest_path: &Path) -> Result<Option<Config>, FatalError> {
    if manifest_path.exists() {
        let m = std::fs::read_to_string(manifest_path).map_err(FatalError::from)?;
        let c: CargoManifest = toml::from_str(&m).map_err(FatalError::from)?;
        Ok(c.package.and_then(|p| p.metadata).and_then(|m| m.track))
    } else {
        Ok(None)
    }
}

fn get_config_from_file(file_path: &Path) -> Result<Option<Config>, FatalError> {
    if file_path.exists() {
        let c = std::fs::read_to_string(file_path).map_err(FatalError::from)?;
        let config = toml::from_str(&c).map_err(FatalError::from)?;
        Ok(Some(config))
    } else {
        Ok(None)
    }
}

pub fn resolve_custom_config(file_path: &Path) -> Result<Option<Config>, FatalError> {
    get_config_from_file(file_path)
}

/// Try to resolve configuration source.
///
/// This tries the following sources in order, merging the results:
/// 1. $(pwd)/Cargo.toml `package.metadata.track`
/// 2. $(pwd)/track.toml
///
pub fn resolve_config(manifest_path: &Path) -> Result<Config, FatalError> {
    let mut config = Config::default();

    // Crate manifest.
    let manifest_config = get_config_from_manifest(manifest_path)?;
    if let Some(cfg) = manifest_config {
        config.update(&cfg);
    };

    // Project tracker file.
    let default_config = manifest_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("track.toml");
    let current_dir_config = get_config_from_file(&default_config)?;
    if let Some(cfg) = current_dir_config {
        config.update(&cfg);
    };

    Ok(config)
}
