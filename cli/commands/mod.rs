mod checksum;
mod deploy;
mod fetch;
mod path;

pub use checksum::*;
pub use deploy::*;
pub use fetch::*;
pub use path::*;

use depot_core::model::RemoteRepository;
use depot_core::Config;
use url::Url;

/// Find a repository by its id in the config, or treat `repository` as the url of a new one.
pub(crate) fn resolve_repository(
    config: &Config,
    repository: &str,
) -> Result<RemoteRepository, anyhow::Error> {
    if let Some(repository) = config.remote_repository(repository) {
        return Ok(repository.clone());
    }

    let url = Url::parse(repository).or_else(|_| {
        let path = std::path::Path::new(repository);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Url::from_directory_path(&path)
            .map_err(|()| anyhow::anyhow!("{} is neither a repository id nor a url", repository))
    })?;

    Ok(RemoteRepository::new("remote", url))
}
