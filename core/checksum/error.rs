use thiserror::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    #[error("Unsupported checksum algorithm {0}")]
    UnsupportedAlgorithm(String),
}

/// Why a downloaded file could not be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumFailure {
    #[error("Checksum validation failed, expected {expected} but is {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("Checksum validation failed, no checksums available from the repository")]
    NoUsableAlgorithm,
}
