mod commands;
pub mod flags;
mod reporter;

use commands::*;
use structopt::StructOpt;
use tracing::{error, log};

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "depot",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Deploy, fetch, and verify artifacts in file based repositories"
)]
struct Depot {
    #[structopt(subcommand, help = "the command to run")]
    cmd: Command,
}

impl Depot {
    async fn run(self) -> Result<(), anyhow::Error> {
        human_panic::setup_panic!(Metadata {
            name: "depot".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            authors: "".into(),
            homepage: "".into(),
        });

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .format_timestamp_micros()
            .format_module_path(false)
            .parse_env("DEPOT_LOG")
            .try_init()?;

        let result = self.cmd.run().await;

        if let Err(ref err) = result {
            error!("{:?}", &err);
        };

        result
    }
}

#[derive(StructOpt, Debug, Clone)]
enum Command {
    Checksum(ChecksumCommand),
    Deploy(DeployCommand),
    Fetch(FetchCommand),
    Path(PathCommand),
}

impl Command {
    async fn run(self) -> Result<(), anyhow::Error> {
        match self {
            Command::Checksum(x) => x.run().await,
            Command::Deploy(x) => x.run().await,
            Command::Fetch(x) => x.run().await,
            Command::Path(x) => x.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    Depot::from_args().run().await
}
