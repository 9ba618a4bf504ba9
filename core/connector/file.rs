use super::worker::repository_base_dir;
use super::*;
use crate::layout::Layout;
use crate::model::RemoteRepository;
use crate::{Config, CountDownLatch};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A [RepositoryConnector] for repositories that live on a local or mounted file system, with
/// `file:` URLs.
///
/// Every transfer in a batch gets its own [FileRepositoryWorker] on the blocking thread pool.
///
#[derive(Debug)]
pub struct FileRepositoryConnector {
    config: Config,
    repository: RemoteRepository,
    layout: Arc<Layout>,
    closed: AtomicBool,
}

impl FileRepositoryConnector {
    pub fn new(config: Config, repository: RemoteRepository) -> Result<Self, ConnectorError> {
        let base_dir = repository_base_dir(&repository)?;
        debug!("Connecting to {} at {:?}", repository, base_dir);
        Ok(Self {
            config,
            repository,
            layout: Arc::new(Layout::default()),
            closed: AtomicBool::new(false),
        })
    }

    pub fn with_layout(self, layout: Layout) -> Self {
        Self {
            layout: Arc::new(layout),
            ..self
        }
    }

    pub fn repository(&self) -> &RemoteRepository {
        &self.repository
    }

    #[instrument(name = "FileRepositoryConnector::run_batch", skip(self, transfers))]
    async fn run_batch(
        &self,
        transfers: Vec<Transfer>,
        direction: Direction,
    ) -> Result<Vec<Transfer>, ConnectorError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ConnectorError::Closed(self.repository.id().to_string()));
        }

        if let Some(transfer) = transfers.iter().find(|t| t.direction() != direction) {
            return Err(ConnectorError::DirectionMismatch {
                expected: direction,
                found: transfer.direction(),
                item: transfer.item().to_string(),
            });
        }

        let latch = Arc::new(CountDownLatch::new(transfers.len()));

        let mut workers = vec![];
        for transfer in transfers {
            let worker = FileRepositoryWorker::new(transfer, self.repository.clone(), &self.config)?
                .with_layout(self.layout.clone())
                .with_latch(latch.clone());
            workers.push(worker);
        }

        debug!("Running {} transfers", workers.len());
        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| tokio::task::spawn_blocking(move || worker.run()))
            .collect();

        tokio::task::spawn_blocking(move || latch.wait()).await?;

        let mut done = Vec::with_capacity(handles.len());
        for handle in handles {
            done.push(handle.await?);
        }
        Ok(done)
    }
}

#[async_trait]
impl RepositoryConnector for FileRepositoryConnector {
    async fn get(&self, downloads: Vec<Transfer>) -> Result<Vec<Transfer>, ConnectorError> {
        self.run_batch(downloads, Direction::Download).await
    }

    async fn put(&self, uploads: Vec<Transfer>) -> Result<Vec<Transfer>, ConnectorError> {
        self.run_batch(uploads, Direction::Upload).await
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::Event;
    use crate::events::{RecordingTransferListener, TransferListener};
    use crate::model::{Artifact, ChecksumPolicy};
    use assert_fs::prelude::*;
    use url::Url;

    fn setup() -> (assert_fs::TempDir, FileRepositoryConnector) {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("remote").create_dir_all().unwrap();
        let repository = RemoteRepository::new(
            "test",
            Url::from_directory_path(tmp.child("remote").path()).unwrap(),
        );
        let config = Config::builder()
            .local_repository_root(tmp.child("local").path().to_path_buf())
            .transfer_listener(
                Arc::new(RecordingTransferListener::new()) as Arc<dyn TransferListener>
            )
            .build()
            .unwrap();
        let connector = FileRepositoryConnector::new(config, repository).unwrap();
        (tmp, connector)
    }

    fn artifact(name: &str) -> Artifact {
        Artifact::new("org.example", name, "", "jar", "1.0")
    }

    #[tokio::test]
    async fn batches_come_back_in_submission_order() {
        let (tmp, connector) = setup();
        let names = ["a", "b", "c", "d", "e"];

        let uploads = names
            .iter()
            .map(|name| {
                let file = tmp.child(format!("{}.jar", name));
                file.write_str(name).unwrap();
                Transfer::artifact_upload(artifact(name), file.path())
            })
            .collect();
        let uploaded = connector.put(uploads).await.unwrap();
        assert_eq!(uploaded.len(), names.len());
        assert!(uploaded.iter().all(|t| t.error().is_none()));

        let downloads = names
            .iter()
            .map(|name| {
                Transfer::artifact_download(
                    artifact(name),
                    tmp.child("local").child(format!("{}.jar", name)).path(),
                    "",
                    ChecksumPolicy::Fail,
                )
            })
            .collect();
        let downloaded = connector.get(downloads).await.unwrap();

        for (transfer, name) in downloaded.iter().zip(names) {
            assert_eq!(transfer.item(), &TransferItem::Artifact(artifact(name)));
            assert!(transfer.error().is_none());
            assert_eq!(std::fs::read_to_string(transfer.file()).unwrap(), name);
        }
    }

    #[tokio::test]
    async fn empty_batches_are_fine() {
        let (_tmp, connector) = setup();
        assert!(connector.get(vec![]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn directions_must_match() {
        let (tmp, connector) = setup();
        let upload = Transfer::artifact_upload(artifact("a"), tmp.child("a.jar").path());
        assert_matches!(
            connector.get(vec![upload]).await,
            Err(ConnectorError::DirectionMismatch {
                expected: Direction::Download,
                found: Direction::Upload,
                ..
            })
        );
    }

    #[tokio::test]
    async fn closed_connectors_refuse_work() {
        let (_tmp, connector) = setup();
        connector.close();
        assert_matches!(
            connector.put(vec![]).await,
            Err(ConnectorError::Closed(id)) if id == "test"
        );
    }

    #[tokio::test]
    async fn default_sessions_do_not_queue_transferred_bytes() {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("remote").create_dir_all().unwrap();
        let file = tmp.child("big.jar");
        file.write_binary(&vec![3u8; 3_000_000]).unwrap();

        let config = Config::builder()
            .local_repository_root(tmp.child("local").path().to_path_buf())
            .build()
            .unwrap();
        let event_channel = config.event_channel();
        let repository = RemoteRepository::new(
            "test",
            Url::from_directory_path(tmp.child("remote").path()).unwrap(),
        );
        let connector = FileRepositoryConnector::new(config, repository).unwrap();

        let uploaded = connector
            .put(vec![Transfer::artifact_upload(artifact("big"), file.path())])
            .await
            .unwrap();
        assert!(uploaded[0].error().is_none());

        let queued: usize = event_channel
            .consumer()
            .drain()
            .iter()
            .map(|event| match event {
                Event::TransferEvent(e) => e.data_length(),
                _ => 0,
            })
            .sum();
        assert_eq!(queued, 0);
        assert!(event_channel.is_empty());
    }

    #[test]
    fn only_file_urls_are_supported() {
        let repository =
            RemoteRepository::new("central", Url::parse("https://repo.example.com/").unwrap());
        assert_matches!(
            FileRepositoryConnector::new(Config::default(), repository),
            Err(ConnectorError::UnsupportedRepository(_))
        );
    }
}
