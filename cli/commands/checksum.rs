use depot_core::checksum;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "checksum",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Prints the digests of a file",
)]
pub struct ChecksumCommand {
    #[structopt(help = r"The file to digest.", parse(from_os_str))]
    file: PathBuf,

    #[structopt(
        help = r"The algorithms to use: SHA-1, MD5, SHA-256, or SHA-512.",
        short = "a",
        long = "algorithm",
        default_value = "SHA-1"
    )]
    algorithms: Vec<String>,
}

impl ChecksumCommand {
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let file = self.file;
        let algorithms = self.algorithms;
        let checksums =
            tokio::task::spawn_blocking(move || checksum::compute(&file, &algorithms)).await??;

        for (name, digest) in checksums.iter() {
            match digest {
                Ok(digest) => println!("{:<8} {}", name, digest),
                Err(err) => anyhow::bail!(err.clone()),
            }
        }

        Ok(())
    }
}
