use crate::model::Metadata;

/// The relative path of a piece of metadata.
///
/// Metadata is stored at `groupIdDirs/artifactId/version/<type>`, stopping at the first empty
/// coordinate. When a repository `key` is given it is inserted into the file name before its
/// first `.`, so caches of the same metadata from different repositories do not collide.
///
pub fn metadata_path(metadata: &Metadata, key: Option<&str>) -> String {
    let mut path = String::new();

    if !metadata.group_id().is_empty() {
        path.push_str(&metadata.group_id().replace('.', "/"));
        path.push('/');

        if !metadata.artifact_id().is_empty() {
            path.push_str(metadata.artifact_id());
            path.push('/');

            if !metadata.version().is_empty() {
                path.push_str(metadata.version());
                path.push('/');
            }
        }
    }

    match key {
        Some(key) => path.push_str(&insert_repository_key(metadata.metadata_type(), key)),
        None => path.push_str(metadata.metadata_type()),
    }

    path
}

fn insert_repository_key(file_name: &str, key: &str) -> String {
    match file_name.split_once('.') {
        Some((stem, rest)) => format!("{}-{}.{}", stem, key, rest),
        None => format!("{}-{}", file_name, key),
    }
}
