//! # Local Repository
//!
//! The local repository is the cache every downloaded artifact ends up in, and the place locally
//! built artifacts are installed to. A [LocalRepositoryManager] decides where in that cache each
//! artifact and piece of metadata lives.
//!
mod simple;

pub use simple::*;

use crate::model::{Artifact, LocalRepository, Metadata, RemoteRepository};
use std::fmt::Debug;
use std::path::PathBuf;
use thiserror::*;

pub trait LocalRepositoryManager: Send + Sync + Debug {
    fn repository(&self) -> &LocalRepository;

    /// Path of a locally installed artifact, relative to the repository base directory.
    fn path_for_local_artifact(&self, artifact: &Artifact) -> String;

    /// Path of an artifact downloaded from `repository`, relative to the repository base
    /// directory.
    fn path_for_remote_artifact(
        &self,
        artifact: &Artifact,
        repository: &RemoteRepository,
        context: &str,
    ) -> String;

    fn path_for_local_metadata(&self, metadata: &Metadata) -> String;

    fn path_for_remote_metadata(
        &self,
        metadata: &Metadata,
        repository: &RemoteRepository,
        context: &str,
    ) -> String;

    /// Look an artifact up in the cache. Not finding it is not an error.
    fn find(&self, request: LocalArtifactRequest) -> LocalArtifactResult;

    fn add_local_artifact(&self, artifact: &Artifact);

    fn add_remote_artifact(
        &self,
        artifact: &Artifact,
        repository: &RemoteRepository,
        contexts: &[String],
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifactRequest {
    artifact: Artifact,
    repositories: Vec<RemoteRepository>,
    context: String,
}

impl LocalArtifactRequest {
    pub fn new(
        artifact: Artifact,
        repositories: Vec<RemoteRepository>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            artifact,
            repositories,
            context: context.into(),
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn repositories(&self) -> &[RemoteRepository] {
        &self.repositories
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifactResult {
    request: LocalArtifactRequest,
    file: Option<PathBuf>,
    available: bool,
}

impl LocalArtifactResult {
    pub fn new(request: LocalArtifactRequest, file: Option<PathBuf>, available: bool) -> Self {
        Self {
            request,
            file,
            available,
        }
    }

    pub fn request(&self) -> &LocalArtifactRequest {
        &self.request
    }

    pub fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}

#[derive(Error, Debug)]
pub enum LocalRepositoryError {
    #[error("The local repository needs a base directory")]
    MissingBaseDirectory,

    #[error(transparent)]
    CouldNotGetCurrentDir(std::io::Error),
}
