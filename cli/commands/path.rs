use crate::flags::Flags;
use depot_core::local::{LocalRepositoryManager, SimpleLocalRepositoryManager};
use depot_core::model::Artifact;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "path",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Prints where an artifact lives in the local repository",
)]
pub struct PathCommand {
    #[structopt(help = r"The coordinates of the artifact.")]
    coordinates: String,

    #[structopt(flatten)]
    flags: Flags,
}

impl PathCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let config = self.flags.config().await?;
        let artifact: Artifact = self.coordinates.parse()?;
        let manager = SimpleLocalRepositoryManager::from_config(&config)?;

        let path = manager
            .repository()
            .basedir()
            .join(manager.path_for_local_artifact(&artifact));
        println!("{}", path.display());

        Ok(())
    }
}
