use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::*;

pub const SNAPSHOT: &str = "SNAPSHOT";

pub const DEFAULT_EXTENSION: &str = "jar";

static COORDINATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^: ]+):([^: ]+)(:([^: ]*)(:([^: ]+))?)?:([^: ]+)$").unwrap()
});

static SNAPSHOT_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*-)?([0-9]{8}\.[0-9]{6}-[0-9]+)$").unwrap());

/// An Artifact is a versioned build output, addressed by its group, artifact id, version,
/// classifier, and extension.
///
/// Artifacts are immutable. Binding an artifact to the file it was resolved to creates a new
/// value via [Artifact::with_file].
///
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    group_id: String,
    artifact_id: String,
    version: String,
    base_version: String,
    classifier: String,
    extension: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<PathBuf>,
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        extension: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let version = version.into();
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            base_version: base_version_of(&version),
            version,
            classifier: classifier.into(),
            extension: extension.into(),
            file: None,
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The version used for directory names. Timestamped snapshots such as
    /// `1.0-20100720.132618-1` share the base version `1.0-SNAPSHOT`.
    pub fn base_version(&self) -> &str {
        &self.base_version
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_snapshot(&self) -> bool {
        self.base_version.ends_with(SNAPSHOT)
    }

    pub fn with_file<P: Into<PathBuf>>(&self, file: P) -> Self {
        Self {
            file: Some(file.into()),
            ..self.clone()
        }
    }

    pub fn with_version<V: Into<String>>(&self, version: V) -> Self {
        let version = version.into();
        Self {
            base_version: base_version_of(&version),
            version,
            ..self.clone()
        }
    }
}

fn base_version_of(version: &str) -> String {
    match SNAPSHOT_TIMESTAMP.captures(version) {
        Some(caps) => format!(
            "{}{}",
            caps.get(1).map(|m| m.as_str()).unwrap_or_default(),
            SNAPSHOT
        ),
        None => version.to_string(),
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactParseError {
    #[error("Bad artifact coordinates {0}, expected format is <groupId>:<artifactId>[:<extension>[:<classifier>]]:<version>")]
    BadCoordinates(String),
}

impl FromStr for Artifact {
    type Err = ArtifactParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = COORDINATES
            .captures(s)
            .ok_or_else(|| ArtifactParseError::BadCoordinates(s.to_string()))?;

        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();

        let extension = match group(4) {
            "" => DEFAULT_EXTENSION,
            ext => ext,
        };

        Ok(Self::new(group(1), group(2), group(6), extension, group(7)))
    }
}
