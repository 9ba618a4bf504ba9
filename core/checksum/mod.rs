//! # Checksums
//!
//! Digests of files computed in a single streaming pass, plus reading and writing of the
//! checksum side-files that repositories keep next to every artifact.
//!
mod algorithm;
mod error;
mod file;

pub use algorithm::*;
pub use error::*;
pub use file::*;

use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, instrument};

const BUFFER_SIZE: usize = 16 * 1024;

/// The outcome of [compute], keyed by algorithm name in the order the algorithms were
/// requested.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Checksums(IndexMap<String, Result<String, ChecksumError>>);

impl Checksums {
    pub fn get(&self, name: &str) -> Option<&Result<String, ChecksumError>> {
        self.0.get(name)
    }

    pub fn for_algorithm(&self, algorithm: ChecksumAlgorithm) -> Option<&str> {
        match self.0.get(algorithm.name()) {
            Some(Ok(digest)) => Some(digest),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<String, ChecksumError>)> {
        self.0.iter().map(|(name, digest)| (name.as_str(), digest))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute every requested digest of `file` while reading it only once.
///
/// Names that are not a known [ChecksumAlgorithm] get an error entry of their own; the rest
/// are still computed. Failing to read the file fails the whole call.
///
#[instrument(name = "checksum::compute", skip(algorithms))]
pub fn compute<S: AsRef<str>>(file: &Path, algorithms: &[S]) -> io::Result<Checksums> {
    let mut results = IndexMap::new();
    let mut hashers = vec![];

    for name in algorithms {
        let name = name.as_ref();
        if results.contains_key(name) {
            continue;
        }
        match name.parse::<ChecksumAlgorithm>() {
            Ok(algorithm) => {
                results.insert(name.to_string(), Ok(String::new()));
                hashers.push((name.to_string(), algorithm.hasher()));
            }
            Err(err) => {
                results.insert(name.to_string(), Err(err));
            }
        }
    }

    let mut reader = File::open(file)?;
    let mut buffer = vec![0; BUFFER_SIZE];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        for (_, hasher) in hashers.iter_mut() {
            hasher.update(&buffer[..read]);
        }
    }

    for (name, hasher) in hashers {
        let digest = hex(&hasher.finalize());
        debug!("{} of {:?} is {}", name, file, digest);
        results.insert(name, Ok(digest));
    }

    Ok(Checksums(results))
}

/// Check `checksums` of a file against the side-files that sit next to `file`.
///
/// The algorithms are tried in order and the first side-file that can be read decides the
/// outcome; side-files that cannot be read are skipped. When none of them can be read the
/// file cannot be verified at all.
///
pub fn verify(
    file: &Path,
    checksums: &Checksums,
    algorithms: &[ChecksumAlgorithm],
) -> Result<ChecksumAlgorithm, ChecksumFailure> {
    for algorithm in algorithms {
        let actual = match checksums.for_algorithm(*algorithm) {
            Some(actual) => actual,
            None => continue,
        };

        let side_file = algorithm.side_file(file);
        let expected = match read_checksum_file(&side_file) {
            Ok(expected) => expected,
            Err(err) => {
                debug!("Could not read {:?}: {}", side_file, err);
                continue;
            }
        };

        if expected.eq_ignore_ascii_case(actual) {
            return Ok(*algorithm);
        }

        return Err(ChecksumFailure::Mismatch {
            expected,
            actual: actual.to_string(),
        });
    }

    Err(ChecksumFailure::NoUsableAlgorithm)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    const NAMES: [&str; 4] = ["SHA-1", "MD5", "SHA-256", "SHA-512"];

    #[test]
    fn computes_known_digests() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("hello.txt");
        file.write_str("hello world").unwrap();

        let checksums = compute(file.path(), &NAMES).unwrap();
        assert_eq!(
            checksums.for_algorithm(ChecksumAlgorithm::Sha1),
            Some("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        assert_eq!(
            checksums.for_algorithm(ChecksumAlgorithm::Md5),
            Some("5eb63bbbe01eeed093cb22bb8f5acdc3")
        );
        assert_eq!(
            checksums.for_algorithm(ChecksumAlgorithm::Sha256),
            Some("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
        );
        assert_eq!(checksums.len(), 4);
    }

    #[test]
    fn empty_files_have_digests_too() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("empty");
        file.touch().unwrap();

        let checksums = compute(file.path(), &["SHA-1"]).unwrap();
        assert_eq!(
            checksums.for_algorithm(ChecksumAlgorithm::Sha1),
            Some("da39a3ee5e6b4b0d3255bfef95601890afd80709")
        );
    }

    #[test]
    fn results_keep_the_requested_order() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("a");
        file.write_str("a").unwrap();

        let checksums = compute(file.path(), &["MD5", "BOGUS", "SHA-1"]).unwrap();
        let names: Vec<&str> = checksums.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["MD5", "BOGUS", "SHA-1"]);
    }

    #[test]
    fn unsupported_algorithms_fail_alone() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("a");
        file.write_str("a").unwrap();

        let checksums = compute(file.path(), &["SHA-1", "WHIRLPOOL"]).unwrap();
        assert_matches!(checksums.get("SHA-1"), Some(Ok(_)));
        assert_matches!(
            checksums.get("WHIRLPOOL"),
            Some(Err(ChecksumError::UnsupportedAlgorithm(_)))
        );
    }

    #[test]
    fn missing_files_fail_the_whole_computation() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let err = compute(&tmp.path().join("missing"), &NAMES).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn digests_span_many_buffers() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("big");
        let contents: Vec<u8> = (0..(3 * BUFFER_SIZE + 17)).map(|i| i as u8).collect();
        file.write_binary(&contents).unwrap();

        let streamed = compute(file.path(), &["SHA-256"]).unwrap();

        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let expected = format!("{:x}", hasher.finalize());

        assert_eq!(
            streamed.for_algorithm(ChecksumAlgorithm::Sha256),
            Some(expected.as_str())
        );
    }

    #[quickcheck]
    fn single_byte_changes_change_the_digest(contents: Vec<u8>, index: usize) -> bool {
        if contents.is_empty() {
            return true;
        }
        let tmp = assert_fs::TempDir::new().unwrap();
        let a = tmp.child("a");
        let b = tmp.child("b");
        a.write_binary(&contents).unwrap();

        let mut changed = contents.clone();
        let index = index % changed.len();
        changed[index] = changed[index].wrapping_add(1);
        b.write_binary(&changed).unwrap();

        let first = compute(a.path(), &NAMES).unwrap();
        let again = compute(a.path(), &NAMES).unwrap();
        let other = compute(b.path(), &NAMES).unwrap();

        first == again
            && NAMES
                .iter()
                .all(|name| first.get(name) != other.get(name))
    }

    #[test]
    fn verification_uses_the_first_readable_side_file() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("a.jar");
        file.write_str("contents").unwrap();
        let checksums = compute(file.path(), &["SHA-1", "MD5"]).unwrap();

        // no sha1 side-file, so md5 decides
        let md5 = checksums.for_algorithm(ChecksumAlgorithm::Md5).unwrap();
        tmp.child("a.jar.md5").write_str(md5).unwrap();
        assert_eq!(
            verify(file.path(), &checksums, &TRANSFER_ALGORITHMS),
            Ok(ChecksumAlgorithm::Md5)
        );

        // a bad sha1 side-file wins over a good md5 one
        tmp.child("a.jar.sha1").write_str("deadbeef").unwrap();
        assert_matches!(
            verify(file.path(), &checksums, &TRANSFER_ALGORITHMS),
            Err(ChecksumFailure::Mismatch { expected, .. }) if expected == "deadbeef"
        );
    }

    #[test]
    fn verification_ignores_digest_case() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("a.jar");
        file.write_str("contents").unwrap();
        let checksums = compute(file.path(), &["SHA-1"]).unwrap();

        let sha1 = checksums.for_algorithm(ChecksumAlgorithm::Sha1).unwrap();
        tmp.child("a.jar.sha1")
            .write_str(&sha1.to_ascii_uppercase())
            .unwrap();
        assert_eq!(
            verify(file.path(), &checksums, &TRANSFER_ALGORITHMS),
            Ok(ChecksumAlgorithm::Sha1)
        );
    }

    #[test]
    fn verification_without_side_files_is_a_failure() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("a.jar");
        file.write_str("contents").unwrap();
        let checksums = compute(file.path(), &["SHA-1", "MD5"]).unwrap();

        assert_eq!(
            verify(file.path(), &checksums, &TRANSFER_ALGORITHMS),
            Err(ChecksumFailure::NoUsableAlgorithm)
        );
    }
}
