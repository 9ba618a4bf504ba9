use depot_core::events::{EventChannel, TransferListener};
use depot_core::model::ChecksumPolicy;
use depot_core::{Config, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;

#[derive(Default, Debug, Clone, StructOpt)]
pub struct Flags {
    #[structopt(
        help = r"The base directory of the local repository.

Defaults to $DEPOT_HOME/repository, or ~/.depot/repository.
",
        long = "local-repository",
        parse(from_os_str)
    )]
    pub(crate) local_repository: Option<PathBuf>,

    #[structopt(
        help = r"A JSON settings file with the local repository, checksum policy, and remote repositories to use.",
        long = "settings",
        parse(from_os_str)
    )]
    pub(crate) settings: Option<PathBuf>,

    #[structopt(
        help = r"What to do when a downloaded file does not match its checksums: ignore, warn, or fail.",
        long = "checksum-policy"
    )]
    pub(crate) checksum_policy: Option<ChecksumPolicy>,
}

impl Flags {
    /// Build a config out of the settings file, if any, with these flags on top. Transfer events
    /// are sent to the config's event channel for the status reporter to drain.
    pub async fn config(&self) -> Result<Config, anyhow::Error> {
        let event_channel = Arc::new(EventChannel::new());
        let mut config = Config::builder();
        config
            .event_channel(event_channel.clone())
            .transfer_listener(event_channel as Arc<dyn TransferListener>);

        if let Some(path) = &self.settings {
            Settings::from_file(path).await?.apply(&mut config)?;
        }

        if let Some(root) = &self.local_repository {
            config.local_repository_root(root.clone());
        }

        if let Some(policy) = self.checksum_policy {
            config.checksum_policy(policy);
        }

        Ok(config.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::events::event::*;
    use url::Url;

    #[tokio::test]
    async fn transfer_events_reach_the_status_reporter_channel() {
        let config = Flags::default().config().await.unwrap();
        let consumer = config.event_channel().consumer();

        config.transfer_listener().on_event(TransferEvent::new(
            RequestType::Put,
            TransferEventType::Initiated,
            TransferResource {
                repository_url: Url::parse("file:///tmp/repo/").unwrap(),
                resource_name: "g:a:1.0".to_string(),
                file: PathBuf::from("/tmp/a.jar"),
            },
            0,
        ));

        assert!(!consumer.is_empty());
    }
}
