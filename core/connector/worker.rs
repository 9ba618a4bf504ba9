use super::*;
use crate::checksum::{self, TRANSFER_ALGORITHMS};
use crate::events::event::{EventError, TransferEvent, TransferEventType, TransferResource};
use crate::events::TransferListener;
use crate::layout::Layout;
use crate::model::{ChecksumPolicy, RemoteRepository};
use crate::{Config, CountDownLatch};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Carries out one [Transfer] against a repository on the local file system.
///
/// A worker is meant to be run exactly once, as a unit of blocking work. It reports everything
/// it does to the configured [TransferListener], and hands the transfer back when it is done
/// with its final state and error.
///
#[derive(Debug)]
pub struct FileRepositoryWorker {
    transfer: Transfer,
    repository: RemoteRepository,
    base_dir: PathBuf,
    layout: Arc<Layout>,
    listener: Arc<dyn TransferListener>,
    chunk_size: usize,
    latch: Option<Arc<CountDownLatch>>,
    resource: TransferResource,
    transferred: u64,
}

/// Counts the latch down when the worker finishes, however it finishes.
struct CountDownOnDrop(Arc<CountDownLatch>);

impl Drop for CountDownOnDrop {
    fn drop(&mut self) {
        self.0.count_down()
    }
}

enum Failure {
    SourceMissing,
    Cause(TransferCause),
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Self::Cause(err.into())
    }
}

impl From<TransferCause> for Failure {
    fn from(cause: TransferCause) -> Self {
        Self::Cause(cause)
    }
}

impl FileRepositoryWorker {
    pub fn new(
        transfer: Transfer,
        repository: RemoteRepository,
        config: &Config,
    ) -> Result<Self, ConnectorError> {
        let base_dir = repository_base_dir(&repository)?;

        let resource = TransferResource {
            repository_url: repository.url().clone(),
            resource_name: transfer.item().resource_name(),
            file: transfer.file().to_path_buf(),
        };

        Ok(Self {
            transfer,
            repository,
            base_dir,
            layout: Arc::new(Layout::default()),
            listener: config.transfer_listener(),
            chunk_size: config.transfer_chunk_size().max(1),
            latch: None,
            resource,
            transferred: 0,
        })
    }

    pub fn with_layout(self, layout: Arc<Layout>) -> Self {
        Self { layout, ..self }
    }

    pub fn with_latch(self, latch: Arc<CountDownLatch>) -> Self {
        Self {
            latch: Some(latch),
            ..self
        }
    }

    /// The file on the repository side of the transfer.
    pub fn repository_file(&self) -> PathBuf {
        let path = match self.transfer.item() {
            TransferItem::Artifact(artifact) => self.layout.path_for_artifact(artifact),
            TransferItem::Metadata(metadata) => self.layout.path_for_metadata(metadata),
        };
        self.base_dir.join(path)
    }

    #[instrument(name = "FileRepositoryWorker::run", skip(self), fields(resource = %self.resource))]
    pub fn run(mut self) -> Transfer {
        let _countdown = self.latch.take().map(CountDownOnDrop);

        self.emit(TransferEventType::Initiated, 0);

        let repository_file = self.repository_file();
        let local_file = self.transfer.file().to_path_buf();
        let (src, target) = match self.transfer.direction() {
            Direction::Upload => (local_file, repository_file),
            Direction::Download => (repository_file, local_file),
        };

        let result = self.transfer_file(&src, &target);

        self.transfer.set_state(TransferState::Done);

        match result {
            Ok(()) => {
                debug!("Transferred {} bytes to {:?}", self.transferred, target);
                self.emit(TransferEventType::Succeeded, self.transferred);
            }
            Err(failure) => {
                let error = match failure {
                    Failure::SourceMissing => {
                        TransferError::not_found(self.transfer.item(), &self.repository)
                    }
                    Failure::Cause(cause) => TransferError::transfer_failed(
                        self.transfer.item(),
                        &self.repository,
                        cause,
                    ),
                };
                debug!("Transfer failed: {}", error);

                self.clean_up(&target);

                let event_error = EventError {
                    kind: error.kind(),
                    message: error.to_string(),
                };
                self.transfer.set_error(error);
                self.emit(
                    TransferEventType::Failed { error: event_error },
                    self.transferred,
                );
            }
        }

        self.transfer
    }

    fn transfer_file(&mut self, src: &Path, target: &Path) -> Result<(), Failure> {
        self.transfer.set_state(TransferState::Active);
        self.emit(TransferEventType::Started, 0);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        self.copy(src, target)?;

        let names: Vec<&str> = TRANSFER_ALGORITHMS.iter().map(|a| a.name()).collect();
        let checksums = checksum::compute(src, &names)?;

        match self.transfer.direction() {
            Direction::Upload => {
                for algorithm in TRANSFER_ALGORITHMS {
                    match checksums.get(algorithm.name()) {
                        Some(Ok(digest)) => {
                            checksum::write_checksum_file(&algorithm.side_file(target), digest)?
                        }
                        Some(Err(err)) => return Err(TransferCause::from(err.clone()).into()),
                        None => (),
                    }
                }
            }
            Direction::Download => {
                if self.transfer.checksum_policy() == ChecksumPolicy::Ignore {
                    return Ok(());
                }

                if let Err(failure) = checksum::verify(src, &checksums, &TRANSFER_ALGORITHMS) {
                    match self.transfer.checksum_policy() {
                        ChecksumPolicy::Fail => return Err(TransferCause::from(failure).into()),
                        _ => {
                            warn!("{} for {}", failure, self.resource);
                            let error = EventError {
                                kind: TransferErrorKind::ChecksumFailure,
                                message: failure.to_string(),
                            };
                            self.emit(TransferEventType::Corrupted { error }, self.transferred);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn copy(&mut self, src: &Path, target: &Path) -> Result<(), Failure> {
        let mut input = File::open(src).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Failure::SourceMissing,
            _ => Failure::from(err),
        })?;
        let mut output = File::create(target)?;

        let mut buffer = vec![0; self.chunk_size];
        loop {
            let read = match input.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            output.write_all(&buffer[..read])?;

            let offset = self.transferred;
            self.transferred += read as u64;
            self.emit(
                TransferEventType::Progressed {
                    data: Arc::from(&buffer[..read]),
                    offset,
                },
                self.transferred,
            );
        }

        output.flush()?;
        Ok(())
    }

    fn clean_up(&self, target: &Path) {
        remove_if_present(target);
        if self.transfer.direction() == Direction::Upload {
            for algorithm in TRANSFER_ALGORITHMS {
                remove_if_present(&algorithm.side_file(target));
            }
        }
    }

    fn emit(&self, event_type: TransferEventType, transferred_bytes: u64) {
        self.listener.on_event(TransferEvent::new(
            self.transfer.direction().request_type(),
            event_type,
            self.resource.clone(),
            transferred_bytes,
        ));
    }
}

fn remove_if_present(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            warn!("Could not remove {:?}: {}", path, err);
        }
    }
}

pub(crate) fn repository_base_dir(
    repository: &RemoteRepository,
) -> Result<PathBuf, ConnectorError> {
    let url = repository.url();
    if url.scheme() != "file" {
        return Err(ConnectorError::UnsupportedRepository(repository.clone()));
    }
    url.to_file_path()
        .map_err(|()| ConnectorError::UnsupportedRepository(repository.clone()))
}
