use super::ConfigBuilder;
use crate::model::{ChecksumPolicy, RemoteRepository, DEFAULT_CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::*;
use tracing::{debug, instrument};
use url::Url;

/// User settings, read from a JSON file such as:
///
/// ```json
/// {
///   "localRepository": "/home/me/.depot/repository",
///   "checksumPolicy": "fail",
///   "repositories": [
///     { "id": "central", "url": "file:///srv/central/" },
///     { "id": "nexus", "url": "file:///srv/nexus/", "manager": true, "mirrorOf": ["central"] }
///   ]
/// }
/// ```
///
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    local_repository: Option<PathBuf>,

    #[serde(default)]
    checksum_policy: Option<ChecksumPolicy>,

    #[serde(default)]
    repositories: Vec<RepositorySettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySettings {
    id: String,
    url: String,

    #[serde(default)]
    layout: Option<String>,

    #[serde(default)]
    mirror_of: Vec<String>,

    #[serde(default)]
    manager: bool,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings from {path:?}: {err}")]
    Io { path: PathBuf, err: std::io::Error },

    #[error(transparent)]
    Parse(serde_json::Error),

    #[error("Repository {id} has an invalid url {url}: {err}")]
    InvalidUrl {
        id: String,
        url: String,
        err: url::ParseError,
    },
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Settings {
    #[instrument(name = "Settings::from_file")]
    pub async fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| SettingsError::Io {
                path: path.to_path_buf(),
                err,
            })?;
        let settings: Self = serde_json::from_str(&json)?;
        debug!(
            "Loaded settings with {} repositories",
            settings.repositories.len()
        );
        Ok(settings)
    }

    pub fn local_repository(&self) -> Option<&PathBuf> {
        self.local_repository.as_ref()
    }

    pub fn checksum_policy(&self) -> Option<ChecksumPolicy> {
        self.checksum_policy
    }

    pub fn remote_repositories(&self) -> Result<Vec<RemoteRepository>, SettingsError> {
        self.repositories.iter().map(|r| r.to_repository()).collect()
    }

    /// Set everything these settings specify on `builder`, leaving the rest as it was.
    pub fn apply(&self, builder: &mut ConfigBuilder) -> Result<(), SettingsError> {
        if let Some(root) = &self.local_repository {
            builder.local_repository_root(root.clone());
        }
        if let Some(policy) = self.checksum_policy {
            builder.checksum_policy(policy);
        }
        builder.remote_repositories(self.remote_repositories()?);
        Ok(())
    }
}

impl RepositorySettings {
    fn to_repository(&self) -> Result<RemoteRepository, SettingsError> {
        let url = Url::parse(&self.url).map_err(|err| SettingsError::InvalidUrl {
            id: self.id.clone(),
            url: self.url.clone(),
            err,
        })?;

        let repository = if self.manager {
            RemoteRepository::manager(&self.id, url, self.mirror_of.clone())
        } else {
            RemoteRepository::new(&self.id, url)
        };

        Ok(repository.with_content_type(
            self.layout.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE),
        ))
    }
}
