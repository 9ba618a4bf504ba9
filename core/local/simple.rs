use super::*;
use crate::layout::{metadata_path, repository_key, Layout, LOCAL_REPOSITORY_KEY};
use crate::Config;
use tracing::{debug, instrument, trace};

pub const SIMPLE_CONTENT_TYPE: &str = "simple";

/// A local repository manager that uses the standard layout for everything, and keeps metadata
/// apart per repository it came from.
///
#[derive(Debug, Clone)]
pub struct SimpleLocalRepositoryManager {
    repository: LocalRepository,
    layout: Layout,
}

impl SimpleLocalRepositoryManager {
    pub fn new<P: Into<PathBuf>>(basedir: P) -> Result<Self, LocalRepositoryError> {
        let basedir: PathBuf = basedir.into();
        if basedir.as_os_str().is_empty() {
            return Err(LocalRepositoryError::MissingBaseDirectory);
        }

        let basedir = if basedir.is_absolute() {
            basedir
        } else {
            std::env::current_dir()
                .map_err(LocalRepositoryError::CouldNotGetCurrentDir)?
                .join(basedir)
        };

        Ok(Self {
            repository: LocalRepository::new(basedir, SIMPLE_CONTENT_TYPE),
            layout: Layout::default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LocalRepositoryError> {
        Self::new(config.local_repository_root())
    }
}

impl LocalRepositoryManager for SimpleLocalRepositoryManager {
    fn repository(&self) -> &LocalRepository {
        &self.repository
    }

    fn path_for_local_artifact(&self, artifact: &Artifact) -> String {
        self.layout.path_for_artifact(artifact)
    }

    fn path_for_remote_artifact(
        &self,
        artifact: &Artifact,
        _repository: &RemoteRepository,
        _context: &str,
    ) -> String {
        self.path_for_local_artifact(artifact)
    }

    fn path_for_local_metadata(&self, metadata: &Metadata) -> String {
        metadata_path(metadata, Some(LOCAL_REPOSITORY_KEY))
    }

    fn path_for_remote_metadata(
        &self,
        metadata: &Metadata,
        repository: &RemoteRepository,
        context: &str,
    ) -> String {
        metadata_path(metadata, Some(&repository_key(repository, context)))
    }

    #[instrument(name = "SimpleLocalRepositoryManager::find", skip(self))]
    fn find(&self, request: LocalArtifactRequest) -> LocalArtifactResult {
        let path = self
            .repository
            .basedir()
            .join(self.path_for_local_artifact(request.artifact()));

        if path.is_file() {
            debug!("Found {} at {:?}", request.artifact(), path);
            LocalArtifactResult::new(request, Some(path), true)
        } else {
            LocalArtifactResult::new(request, None, false)
        }
    }

    fn add_local_artifact(&self, artifact: &Artifact) {
        trace!("Not tracking locally installed {}", artifact);
    }

    fn add_remote_artifact(
        &self,
        artifact: &Artifact,
        repository: &RemoteRepository,
        contexts: &[String],
    ) {
        trace!(
            "Not tracking {} downloaded from {} for {:?}",
            artifact,
            repository.id(),
            contexts
        );
    }
}
