use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

pub const LOCAL_REPOSITORY_ID: &str = "local";

pub const DEFAULT_CONTENT_TYPE: &str = "default";

/// A repository that artifacts are uploaded to and downloaded from.
///
/// A `Managed` repository is a repository manager that composes its content out of the
/// repositories it mirrors, so anything cached from it has to be told apart by the request
/// context and by what it mirrors, not only by its id.
///
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteRepository {
    Static {
        id: String,
        content_type: String,
        url: Url,
    },
    Managed {
        id: String,
        content_type: String,
        url: Url,
        mirrored_ids: Vec<String>,
    },
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: Url) -> Self {
        Self::Static {
            id: id.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            url,
        }
    }

    pub fn manager(id: impl Into<String>, url: Url, mirrored_ids: Vec<String>) -> Self {
        Self::Managed {
            id: id.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            url,
            mirrored_ids,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Static { id, .. } | Self::Managed { id, .. } => id,
        }
    }

    pub fn content_type(&self) -> &str {
        match self {
            Self::Static { content_type, .. } | Self::Managed { content_type, .. } => content_type,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            Self::Static { url, .. } | Self::Managed { url, .. } => url,
        }
    }

    pub fn mirrored_ids(&self) -> &[String] {
        match self {
            Self::Static { .. } => &[],
            Self::Managed { mirrored_ids, .. } => mirrored_ids,
        }
    }

    pub fn is_repository_manager(&self) -> bool {
        matches!(self, Self::Managed { .. })
    }

    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        match self {
            Self::Static { id, url, .. } => Self::Static {
                id,
                content_type,
                url,
            },
            Self::Managed {
                id,
                url,
                mirrored_ids,
                ..
            } => Self::Managed {
                id,
                content_type,
                url,
                mirrored_ids,
            },
        }
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id(), self.url(), self.content_type())
    }
}

/// The local cache. There is one per session and its id is always `local`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRepository {
    basedir: PathBuf,
    content_type: String,
}

impl LocalRepository {
    pub fn new<P: Into<PathBuf>>(basedir: P, content_type: impl Into<String>) -> Self {
        Self {
            basedir: basedir.into(),
            content_type: content_type.into(),
        }
    }

    pub fn id(&self) -> &str {
        LOCAL_REPOSITORY_ID
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl fmt::Display for LocalRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.basedir.display(), self.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_repositories_mirror_nothing() {
        let repo = RemoteRepository::new("central", Url::parse("file:///tmp/repo").unwrap());
        assert_eq!(repo.id(), "central");
        assert!(repo.mirrored_ids().is_empty());
        assert!(!repo.is_repository_manager());
        assert_eq!(repo.to_string(), "central (file:///tmp/repo, default)");
    }

    #[test]
    fn managers_keep_their_mirrors() {
        let repo = RemoteRepository::manager(
            "nexus",
            Url::parse("file:///tmp/nexus").unwrap(),
            vec!["central".to_string(), "snapshots".to_string()],
        )
        .with_content_type("custom");
        assert!(repo.is_repository_manager());
        assert_eq!(repo.mirrored_ids(), ["central", "snapshots"]);
        assert_eq!(repo.content_type(), "custom");
    }

    #[test]
    fn local_repository_is_always_local() {
        let repo = LocalRepository::new("/var/cache/depot", "simple");
        assert_eq!(repo.id(), "local");
        assert_eq!(repo.to_string(), "/var/cache/depot (simple)");
    }
}
