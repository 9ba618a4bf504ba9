use super::resolve_repository;
use crate::flags::Flags;
use crate::reporter::StatusReporter;
use depot_core::connector::{FileRepositoryConnector, RepositoryConnector, Transfer};
use depot_core::model::Artifact;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "deploy",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Uploads a file as an artifact to a remote repository, with its checksums",
)]
pub struct DeployCommand {
    #[structopt(help = r"The coordinates of the artifact to deploy.

Example: org.example:lib:jar:sources:1.0
")]
    coordinates: String,

    #[structopt(help = r"The file to upload.", long = "file", parse(from_os_str))]
    file: PathBuf,

    #[structopt(
        help = r"The id of a repository from the settings, or the url or path of a repository.",
        long = "repository"
    )]
    repository: String,

    #[structopt(flatten)]
    flags: Flags,
}

impl DeployCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let config = self.flags.config().await?;
        let artifact: Artifact = self.coordinates.parse()?;
        let repository = resolve_repository(&config, &self.repository)?;

        let upload = Transfer::artifact_upload(artifact, self.file);
        let connector = FileRepositoryConnector::new(config.clone(), repository)?;
        let reporter = StatusReporter::new(config.event_channel());
        let ec = config.event_channel();

        let (results, _) = futures::future::join(
            async {
                let result = connector.put(vec![upload]).await;
                ec.shutdown();
                result
            },
            reporter.run(),
        )
        .await;

        for transfer in results? {
            transfer.into_result()?;
        }

        Ok(())
    }
}
