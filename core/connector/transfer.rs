use super::TransferError;
use crate::events::event::RequestType;
use crate::model::{Artifact, ChecksumPolicy, Metadata};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransferState {
    #[default]
    New,
    Active,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Upload,
    Download,
}

impl Direction {
    pub fn request_type(&self) -> RequestType {
        match self {
            Self::Upload => RequestType::Put,
            Self::Download => RequestType::Get,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransferItem {
    Artifact(Artifact),
    Metadata(Metadata),
}

impl TransferItem {
    /// The name transfer events refer to this item by, `group:artifact:version`.
    pub fn resource_name(&self) -> String {
        match self {
            Self::Artifact(a) => format!("{}:{}:{}", a.group_id(), a.artifact_id(), a.version()),
            Self::Metadata(m) => format!("{}:{}:{}", m.group_id(), m.artifact_id(), m.version()),
        }
    }
}

impl fmt::Display for TransferItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artifact(a) => write!(f, "{}", a),
            Self::Metadata(m) => write!(f, "{}", m),
        }
    }
}

/// A single upload or download, and what became of it.
///
/// The state of a transfer only ever moves forward, and once an error has been recorded later
/// errors are dropped so the first cause of a failure is kept.
///
#[derive(Debug)]
pub struct Transfer {
    item: TransferItem,
    direction: Direction,
    file: PathBuf,
    context: String,
    checksum_policy: ChecksumPolicy,
    state: TransferState,
    error: Option<TransferError>,
}

impl Transfer {
    fn new(
        item: TransferItem,
        direction: Direction,
        file: PathBuf,
        context: String,
        checksum_policy: ChecksumPolicy,
    ) -> Self {
        Self {
            item,
            direction,
            file,
            context,
            checksum_policy,
            state: TransferState::New,
            error: None,
        }
    }

    /// Upload the local `file` as `artifact`.
    pub fn artifact_upload<P: Into<PathBuf>>(artifact: Artifact, file: P) -> Self {
        Self::new(
            TransferItem::Artifact(artifact),
            Direction::Upload,
            file.into(),
            String::new(),
            ChecksumPolicy::default(),
        )
    }

    /// Download `artifact` into the local `file`.
    pub fn artifact_download<P: Into<PathBuf>>(
        artifact: Artifact,
        file: P,
        context: impl Into<String>,
        checksum_policy: ChecksumPolicy,
    ) -> Self {
        Self::new(
            TransferItem::Artifact(artifact),
            Direction::Download,
            file.into(),
            context.into(),
            checksum_policy,
        )
    }

    pub fn metadata_upload<P: Into<PathBuf>>(metadata: Metadata, file: P) -> Self {
        Self::new(
            TransferItem::Metadata(metadata),
            Direction::Upload,
            file.into(),
            String::new(),
            ChecksumPolicy::default(),
        )
    }

    pub fn metadata_download<P: Into<PathBuf>>(
        metadata: Metadata,
        file: P,
        checksum_policy: ChecksumPolicy,
    ) -> Self {
        Self::new(
            TransferItem::Metadata(metadata),
            Direction::Download,
            file.into(),
            String::new(),
            checksum_policy,
        )
    }

    pub fn item(&self) -> &TransferItem {
        &self.item
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The local side of the transfer.
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn checksum_policy(&self) -> ChecksumPolicy {
        self.checksum_policy
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn error(&self) -> Option<&TransferError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<PathBuf, TransferError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.file),
        }
    }

    pub(crate) fn set_state(&mut self, state: TransferState) {
        if state > self.state {
            self.state = state;
        }
    }

    pub(crate) fn set_error(&mut self, error: TransferError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::ChecksumFailure;
    use crate::connector::TransferCause;
    use crate::model::RemoteRepository;
    use url::Url;

    fn artifact() -> Artifact {
        Artifact::new("g", "a", "", "jar", "1.0")
    }

    #[test]
    fn state_never_goes_back() {
        let mut transfer = Transfer::artifact_upload(artifact(), "/tmp/a.jar");
        assert_eq!(transfer.state(), TransferState::New);

        transfer.set_state(TransferState::Active);
        transfer.set_state(TransferState::New);
        assert_eq!(transfer.state(), TransferState::Active);

        transfer.set_state(TransferState::Done);
        transfer.set_state(TransferState::Active);
        assert_eq!(transfer.state(), TransferState::Done);
    }

    #[test]
    fn first_error_wins() {
        let repo = RemoteRepository::new("central", Url::parse("file:///tmp/central").unwrap());
        let mut transfer =
            Transfer::artifact_download(artifact(), "/tmp/a.jar", "", ChecksumPolicy::Fail);

        transfer.set_error(TransferError::not_found(transfer.item(), &repo));
        let later = TransferError::transfer_failed(
            transfer.item(),
            &repo,
            TransferCause::Checksum(ChecksumFailure::NoUsableAlgorithm),
        );
        transfer.set_error(later);

        assert_matches!(
            transfer.into_result(),
            Err(TransferError::ArtifactNotFound { .. })
        );
    }

    #[test]
    fn resources_are_named_by_coordinates() {
        let item = TransferItem::Artifact(Artifact::new("g", "a", "sources", "jar", "1.0"));
        assert_eq!(item.resource_name(), "g:a:1.0");

        let item = TransferItem::Metadata(Metadata::new(
            "g",
            "a",
            "",
            "maven-metadata.xml",
            Default::default(),
        ));
        assert_eq!(item.resource_name(), "g:a:");
    }

    #[test]
    fn directions_map_to_request_types() {
        assert_eq!(Direction::Upload.request_type(), RequestType::Put);
        assert_eq!(Direction::Download.request_type(), RequestType::Get);
    }
}
