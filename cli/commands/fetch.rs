use super::resolve_repository;
use crate::flags::Flags;
use crate::reporter::StatusReporter;
use depot_core::connector::{FileRepositoryConnector, RepositoryConnector, Transfer};
use depot_core::local::{LocalArtifactRequest, LocalRepositoryManager, SimpleLocalRepositoryManager};
use depot_core::model::Artifact;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "fetch",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Downloads an artifact into the local repository, unless it is already there",
)]
pub struct FetchCommand {
    #[structopt(help = r"The coordinates of the artifact to fetch.

Example: org.example:lib:1.0
")]
    coordinates: String,

    #[structopt(
        help = r"The id of a repository from the settings, or the url or path of a repository.",
        long = "repository"
    )]
    repository: String,

    #[structopt(
        help = r"The context the artifact is requested in, such as project or plugin.",
        long = "context",
        default_value = ""
    )]
    context: String,

    #[structopt(flatten)]
    flags: Flags,
}

impl FetchCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let config = self.flags.config().await?;
        let artifact: Artifact = self.coordinates.parse()?;
        let repository = resolve_repository(&config, &self.repository)?;
        let manager = SimpleLocalRepositoryManager::from_config(&config)?;

        let found = manager.find(LocalArtifactRequest::new(
            artifact.clone(),
            vec![repository.clone()],
            &self.context,
        ));
        if let Some(file) = found.file() {
            println!("{}", file.display());
            return Ok(());
        }

        let file = manager.repository().basedir().join(manager.path_for_remote_artifact(
            &artifact,
            &repository,
            &self.context,
        ));

        let connector = FileRepositoryConnector::new(config.clone(), repository.clone())?;
        let reporter = StatusReporter::new(config.event_channel());
        let ec = config.event_channel();

        let download = Transfer::artifact_download(
            artifact.clone(),
            &file,
            &self.context,
            config.checksum_policy(),
        );

        let (results, _) = futures::future::join(
            async {
                let result = connector.get(vec![download]).await;
                ec.shutdown();
                result
            },
            reporter.run(),
        )
        .await;

        for transfer in results? {
            transfer.into_result()?;
        }

        manager.add_remote_artifact(&artifact, &repository, &[self.context.clone()]);
        println!("{}", file.display());

        Ok(())
    }
}
