//! This module controls configuration parsing from the end user, providing a
//! convenience mechanism for the rest of the program. Without a configuration
//! file the defaults write `large_test_file.txt` in the working directory
//! with a 50 MiB target.
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use byte_unit::Byte;
use serde::{Deserialize, Serialize};

use crate::filler::{Filler, Measure};

/// Errors produced by [`Config`]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error for a serde [`serde_yaml`].
    #[error("Failed to deserialize yaml: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    /// Error reading config file
    #[error("Failed to read config file {path:?}: {source}")]
    ReadFile {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: Box<io::Error>,
    },
}

fn default_path() -> PathBuf {
    PathBuf::from("large_test_file.txt")
}

fn default_target_size() -> Byte {
    Byte::from_u64(50 * 1024 * 1024)
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
/// Main configuration struct for this program
pub struct Config {
    /// The file to write. Truncated if it already exists.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// The size the file must reach before the footer is written.
    #[serde(default = "default_target_size")]
    pub target_size: Byte,
    /// How the file size is measured after each filler line.
    #[serde(default)]
    pub measure: Measure,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: default_path(),
            target_size: default_target_size(),
            measure: Measure::default(),
        }
    }
}

impl Config {
    /// Parse a YAML document into a [`Config`]. Absent fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML or names a field
    /// this program does not know.
    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load a [`Config`] from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        Self::from_yaml(&contents)
    }

    /// Replace each field for which an override is present.
    #[must_use]
    pub fn with_overrides(
        mut self,
        path: Option<PathBuf>,
        target_size: Option<Byte>,
        measure: Option<Measure>,
    ) -> Self {
        if let Some(path) = path {
            self.path = path;
        }
        if let Some(target_size) = target_size {
            self.target_size = target_size;
        }
        if let Some(measure) = measure {
            self.measure = measure;
        }
        self
    }

    /// Build the [`Filler`] this configuration describes.
    #[must_use]
    pub fn filler(&self) -> Filler {
        Filler::new(self.path.clone(), self.target_size.as_u64()).measure(self.measure)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use byte_unit::Unit;

    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let config = Config::default();
        assert_eq!(config.path, PathBuf::from("large_test_file.txt"));
        assert_eq!(config.target_size.as_u64(), 52_428_800);
        assert_eq!(config.measure, Measure::Counted);
    }

    #[test]
    fn empty_document_takes_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_deserializes() {
        let contents = r#"
path: /tmp/upload_fixture.txt
target_size: "4 MiB"
measure: stat
"#;
        let config = Config::from_yaml(contents).unwrap();
        assert_eq!(
            config,
            Config {
                path: PathBuf::from("/tmp/upload_fixture.txt"),
                target_size: Byte::from_u64_with_unit(4, Unit::MiB).expect("valid bytes"),
                measure: Measure::Stat,
            }
        );
    }

    #[test]
    fn plain_integer_target_size() {
        let config = Config::from_yaml("target_size: 100").unwrap();
        assert_eq!(config.target_size.as_u64(), 100);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::from_yaml("path: a.txt\nduplicates: 4\n");
        assert!(matches!(result, Err(Error::SerdeYaml(_))));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "path: fixture.txt").unwrap();
        writeln!(file, "target_size: 2048").unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.path, PathBuf::from("fixture.txt"));
        assert_eq!(config.target_size.as_u64(), 2048);
        assert_eq!(config.measure, Measure::Counted);
    }

    #[test]
    fn from_path_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.yaml");

        let result = Config::from_path(&path);
        assert!(matches!(result, Err(Error::ReadFile { path: p, .. }) if p == path));
    }

    #[test]
    fn overrides_replace_only_present_fields() {
        let config = Config::default().with_overrides(
            None,
            Some(Byte::from_u64(100)),
            Some(Measure::Stat),
        );
        assert_eq!(config.path, PathBuf::from("large_test_file.txt"));
        assert_eq!(config.target_size.as_u64(), 100);
        assert_eq!(config.measure, Measure::Stat);

        let config = config.with_overrides(Some(PathBuf::from("other.txt")), None, None);
        assert_eq!(config.path, PathBuf::from("other.txt"));
        assert_eq!(config.target_size.as_u64(), 100);
    }

    #[test]
    fn filler_writes_configured_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("configured.txt");
        let config = Config::default().with_overrides(
            Some(path.clone()),
            Some(Byte::from_u64(1024)),
            None,
        );

        let report = config.filler().generate().unwrap();
        assert_eq!(report.path, path);
        assert!(report.bytes >= 1024);
    }
}
