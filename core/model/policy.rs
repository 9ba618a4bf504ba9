use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::*;

/// How a download reacts to checksums that are missing or do not match.
#[derive(Default, Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Skip verification entirely.
    Ignore,

    /// Report the problem as a `Corrupted` event and keep the file.
    #[default]
    Warn,

    /// Fail the transfer and remove the file.
    Fail,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown checksum policy {0}, expected one of ignore, warn, fail")]
pub struct ChecksumPolicyParseError(String);

impl FromStr for ChecksumPolicy {
    type Err = ChecksumPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            _ => Err(ChecksumPolicyParseError(s.to_string())),
        }
    }
}

impl fmt::Display for ChecksumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ignore => "ignore",
            Self::Warn => "warn",
            Self::Fail => "fail",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("FAIL".parse::<ChecksumPolicy>().unwrap(), ChecksumPolicy::Fail);
        assert_eq!("warn".parse::<ChecksumPolicy>().unwrap(), ChecksumPolicy::Warn);
        assert!("strict".parse::<ChecksumPolicy>().is_err());
    }

    #[test]
    fn defaults_to_warn() {
        assert_eq!(ChecksumPolicy::default(), ChecksumPolicy::Warn);
    }
}
