mod settings;
pub use settings::*;

use crate::events::{EventChannel, LoggingTransferListener, TransferListener};
use crate::model::{ChecksumPolicy, RemoteRepository};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::*;

pub const DEPOT_HOME: &str = "DEPOT_HOME";

pub const DEFAULT_TRANSFER_CHUNK_SIZE: usize = 200_000;

/// A collection of options that affect how artifacts are stored and transferred during a
/// session.
///
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(error = "ConfigError"))]
pub struct Config {
    /// The environment at the time this config was created. This is separated to assist with
    /// testing.
    #[builder(default = "self.default_env()?")]
    env: HashMap<String, String>,

    /// The base directory of the local repository.
    #[builder(setter(into), default = "self.default_local_repository_root()")]
    local_repository_root: PathBuf,

    /// How downloads react to missing or mismatched checksums.
    #[builder(default)]
    checksum_policy: ChecksumPolicy,

    /// The number of bytes copied, and reported, at a time.
    #[builder(default = "DEFAULT_TRANSFER_CHUNK_SIZE")]
    transfer_chunk_size: usize,

    /// Repositories known to this session, usually read from a settings file.
    #[builder(default = "vec![]")]
    remote_repositories: Vec<RemoteRepository>,

    /// The Event Channel be used across the application.
    /// NOTE: this is safe to clone since it is really an [Arc] to a queue.
    #[builder(default = "self.default_event_channel()")]
    event_channel: Arc<EventChannel>,

    /// Where transfer events go. Unless set, they are only logged. Sessions that consume the
    /// event channel have to set it here themselves.
    #[builder(default = "self.default_transfer_listener()")]
    transfer_listener: Arc<dyn TransferListener>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build().unwrap()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    pub fn local_repository_root(&self) -> &PathBuf {
        &self.local_repository_root
    }

    pub fn checksum_policy(&self) -> ChecksumPolicy {
        self.checksum_policy
    }

    pub fn transfer_chunk_size(&self) -> usize {
        self.transfer_chunk_size
    }

    pub fn remote_repositories(&self) -> &[RemoteRepository] {
        &self.remote_repositories
    }

    pub fn remote_repository(&self, id: &str) -> Option<&RemoteRepository> {
        self.remote_repositories.iter().find(|r| r.id() == id)
    }

    pub fn event_channel(&self) -> Arc<EventChannel> {
        self.event_channel.clone()
    }

    pub fn transfer_listener(&self) -> Arc<dyn TransferListener> {
        self.transfer_listener.clone()
    }
}

impl ConfigBuilder {
    fn _env_var(&self, name: &str) -> Option<String> {
        match &self.env {
            Some(env) => env.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    fn default_local_repository_root(&self) -> PathBuf {
        if let Some(home) = self._env_var(DEPOT_HOME).filter(|h| !h.is_empty()) {
            return PathBuf::from(home).join("repository");
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".depot").join("repository"))
            .unwrap_or_else(|| PathBuf::from(".depot").join("repository"))
    }

    fn default_event_channel(&self) -> Arc<EventChannel> {
        EventChannel::new().into()
    }

    fn default_transfer_listener(&self) -> Arc<dyn TransferListener> {
        Arc::new(LoggingTransferListener)
    }

    fn default_env(&self) -> Result<HashMap<String, String>, ConfigError> {
        let env = std::env::vars_os()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                _ => None,
            })
            .collect();
        Ok(env)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    SettingsError(SettingsError),

    #[error("Attempted to build a Config struct while missing fields: {0:?}")]
    BuilderError(derive_builder::UninitializedFieldError),
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::BuilderError(err)
    }
}

impl From<SettingsError> for ConfigError {
    fn from(err: SettingsError) -> Self {
        Self::SettingsError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::*;
    use crate::events::RecordingTransferListener;
    use url::Url;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::builder().env(env(&[])).build().unwrap();
        assert_eq!(config.checksum_policy(), ChecksumPolicy::Warn);
        assert_eq!(config.transfer_chunk_size(), 200_000);
        assert!(config.remote_repositories().is_empty());
        assert!(config.local_repository_root().ends_with(".depot/repository"));
    }

    #[test]
    fn depot_home_moves_the_local_repository() {
        let config = Config::builder()
            .env(env(&[("DEPOT_HOME", "/opt/depot")]))
            .build()
            .unwrap();
        assert_eq!(
            config.local_repository_root(),
            &PathBuf::from("/opt/depot/repository")
        );
    }

    #[test]
    fn explicit_roots_win() {
        let config = Config::builder()
            .env(env(&[("DEPOT_HOME", "/opt/depot")]))
            .local_repository_root("/var/cache/depot")
            .build()
            .unwrap();
        assert_eq!(
            config.local_repository_root(),
            &PathBuf::from("/var/cache/depot")
        );
    }

    fn succeeded() -> TransferEvent {
        TransferEvent::new(
            RequestType::Get,
            TransferEventType::Succeeded,
            TransferResource {
                repository_url: Url::parse("file:///tmp/repo/").unwrap(),
                resource_name: "g:a:1.0".to_string(),
                file: PathBuf::from("/tmp/a.jar"),
            },
            0,
        )
    }

    #[test]
    fn transfer_events_are_not_queued_by_default() {
        let config = Config::default();
        let consumer = config.event_channel().consumer();
        config.transfer_listener().on_event(succeeded());
        assert!(consumer.is_empty());
    }

    #[test]
    fn the_event_channel_can_be_the_listener() {
        let event_channel = Arc::new(EventChannel::new());
        let config = Config::builder()
            .event_channel(event_channel.clone())
            .transfer_listener(event_channel as Arc<dyn TransferListener>)
            .build()
            .unwrap();
        let consumer = config.event_channel().consumer();
        config.transfer_listener().on_event(succeeded());
        assert!(!consumer.is_empty());
    }

    #[test]
    fn transfer_listeners_can_be_replaced() {
        let recorder = Arc::new(RecordingTransferListener::new());
        let config = Config::builder()
            .transfer_listener(recorder.clone() as Arc<dyn TransferListener>)
            .build()
            .unwrap();
        config.transfer_listener().on_event(succeeded());
        assert_eq!(recorder.events().len(), 1);
        assert!(config.event_channel().is_empty());
    }

    #[test]
    fn repositories_are_found_by_id() {
        let central = RemoteRepository::new("central", Url::parse("file:///tmp/central").unwrap());
        let config = Config::builder()
            .remote_repositories(vec![central.clone()])
            .build()
            .unwrap();
        assert_eq!(config.remote_repository("central"), Some(&central));
        assert_eq!(config.remote_repository("other"), None);
    }
}
