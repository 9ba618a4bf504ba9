use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which kind of versions a piece of metadata describes.
#[derive(Default, Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataNature {
    Release,
    Snapshot,
    #[default]
    ReleaseOrSnapshot,
}

/// Repository-level bookkeeping, such as a version index. Any of the group, artifact, and
/// version may be empty, in which case the metadata lives at a shallower level of the repository.
///
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    group_id: String,
    artifact_id: String,
    version: String,
    metadata_type: String,
    nature: MetadataNature,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<PathBuf>,
}

impl Metadata {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        metadata_type: impl Into<String>,
        nature: MetadataNature,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            metadata_type: metadata_type.into(),
            nature,
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

    /// The file name of the metadata, e.g. `maven-metadata.xml`.
    pub fn metadata_type(&self) -> &str {
        &self.metadata_type
    }

    pub fn nature(&self) -> MetadataNature {
        self.nature
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn with_file<P: Into<PathBuf>>(&self, file: P) -> Self {
        Self {
            file: Some(file.into()),
            ..self.clone()
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords = [&self.group_id, &self.artifact_id, &self.version]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join(":");

        if coords.is_empty() {
            write!(f, "{}", self.metadata_type)
        } else {
            write!(f, "{}/{}", coords, self.metadata_type)
        }
    }
}
