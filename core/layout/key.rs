use crate::model::RemoteRepository;
use sha1::{Digest, Sha1};
use std::collections::BTreeSet;

pub const LOCAL_REPOSITORY_KEY: &str = "local";

/// The digest used to tell apart content cached from a repository manager.
///
/// `Sha1` is the default. `Simple` is a polynomial string hash that needs no digest
/// implementation at all and is kept for caches that were keyed with it.
///
#[derive(Debug, Clone)]
pub enum RepositoryKeyDigest {
    Sha1(Sha1),
    Simple(i64),
}

impl RepositoryKeyDigest {
    pub fn new() -> Self {
        Self::Sha1(Sha1::new())
    }

    pub fn simple() -> Self {
        Self::Simple(13)
    }

    pub fn update(&mut self, data: &str) {
        match self {
            Self::Sha1(hasher) => hasher.update(data.as_bytes()),
            Self::Simple(hash) => {
                *hash = hash.wrapping_mul(31).wrapping_add(string_hash(data) as i64);
            }
        }
    }

    pub fn digest(self) -> String {
        match self {
            Self::Sha1(hasher) => format!("{:x}", hasher.finalize()),
            Self::Simple(hash) => format!("{:x}", hash as u64),
        }
    }
}

impl Default for RepositoryKeyDigest {
    fn default() -> Self {
        Self::new()
    }
}

// 31-polynomial over UTF-16 code units, wrapping at 32 bits.
fn string_hash(data: &str) -> i32 {
    data.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// The key under which content from `repository` is cached for requests made in `context`.
pub fn repository_key(repository: &RemoteRepository, context: &str) -> String {
    repository_key_with(repository, context, RepositoryKeyDigest::new())
}

pub fn repository_key_with(
    repository: &RemoteRepository,
    context: &str,
    mut digest: RepositoryKeyDigest,
) -> String {
    match repository {
        RemoteRepository::Static { id, .. } => id.clone(),
        RemoteRepository::Managed {
            id, mirrored_ids, ..
        } => {
            digest.update(context);
            let mirrored: BTreeSet<&String> = mirrored_ids.iter().collect();
            for mirrored_id in mirrored {
                digest.update(mirrored_id);
            }
            format!("{}-{}", id, digest.digest())
        }
    }
}
