use super::{Direction, TransferItem};
use crate::checksum::{ChecksumError, ChecksumFailure};
use crate::model::{Artifact, Metadata, RemoteRepository};
use thiserror::*;

/// The broad class of a [TransferError], for consumers that only need to know how to react.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransferErrorKind {
    NotFound,
    ChecksumFailure,
    TransferFailure,
}

#[derive(Error, Debug)]
pub enum TransferCause {
    #[error(transparent)]
    Io(std::io::Error),

    #[error(transparent)]
    Checksum(ChecksumFailure),

    #[error(transparent)]
    Digest(ChecksumError),
}

impl From<std::io::Error> for TransferCause {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ChecksumFailure> for TransferCause {
    fn from(err: ChecksumFailure) -> Self {
        Self::Checksum(err)
    }
}

impl From<ChecksumError> for TransferCause {
    fn from(err: ChecksumError) -> Self {
        Self::Digest(err)
    }
}

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Could not find artifact {artifact} in {repository}")]
    ArtifactNotFound {
        artifact: Artifact,
        repository: RemoteRepository,
    },

    #[error("Could not find metadata {metadata} in {repository}")]
    MetadataNotFound {
        metadata: Metadata,
        repository: RemoteRepository,
    },

    #[error("Could not transfer artifact {artifact} from/to {repository}: {cause}")]
    ArtifactTransfer {
        artifact: Artifact,
        repository: RemoteRepository,
        cause: TransferCause,
    },

    #[error("Could not transfer metadata {metadata} from/to {repository}: {cause}")]
    MetadataTransfer {
        metadata: Metadata,
        repository: RemoteRepository,
        cause: TransferCause,
    },
}

impl TransferError {
    pub fn not_found(item: &TransferItem, repository: &RemoteRepository) -> Self {
        match item {
            TransferItem::Artifact(artifact) => Self::ArtifactNotFound {
                artifact: artifact.clone(),
                repository: repository.clone(),
            },
            TransferItem::Metadata(metadata) => Self::MetadataNotFound {
                metadata: metadata.clone(),
                repository: repository.clone(),
            },
        }
    }

    pub fn transfer_failed(
        item: &TransferItem,
        repository: &RemoteRepository,
        cause: TransferCause,
    ) -> Self {
        match item {
            TransferItem::Artifact(artifact) => Self::ArtifactTransfer {
                artifact: artifact.clone(),
                repository: repository.clone(),
                cause,
            },
            TransferItem::Metadata(metadata) => Self::MetadataTransfer {
                metadata: metadata.clone(),
                repository: repository.clone(),
                cause,
            },
        }
    }

    pub fn kind(&self) -> TransferErrorKind {
        match self {
            Self::ArtifactNotFound { .. } | Self::MetadataNotFound { .. } => {
                TransferErrorKind::NotFound
            }
            Self::ArtifactTransfer { cause, .. } | Self::MetadataTransfer { cause, .. } => {
                match cause {
                    TransferCause::Checksum(_) => TransferErrorKind::ChecksumFailure,
                    _ => TransferErrorKind::TransferFailure,
                }
            }
        }
    }

    pub fn repository(&self) -> &RemoteRepository {
        match self {
            Self::ArtifactNotFound { repository, .. }
            | Self::MetadataNotFound { repository, .. }
            | Self::ArtifactTransfer { repository, .. }
            | Self::MetadataTransfer { repository, .. } => repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("Cannot access {0} with the file connector, only file: URLs are supported")]
    UnsupportedRepository(RemoteRepository),

    #[error("The connector to {0} has been closed")]
    Closed(String),

    #[error("Expected only {expected:?} transfers, but {item} was a {found:?}")]
    DirectionMismatch {
        expected: Direction,
        found: Direction,
        item: String,
    },

    #[error(transparent)]
    WorkerPanicked(tokio::task::JoinError),
}

impl From<tokio::task::JoinError> for ConnectorError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::WorkerPanicked(err)
    }
}
