//! # Layouts
//!
//! A layout maps the coordinates of an artifact or a piece of metadata to the relative path it is
//! stored under, both in remote repositories and in the local cache.
//!
//! Artifact layouts are templates such as `{groupIdDirs}/{artifactId}/{artifactId}-{version}.jar`
//! that are validated once, when the layout is created, and then rendered per artifact.
//!
mod key;
mod metadata;

pub use key::*;
pub use metadata::*;

use crate::model::{Artifact, Metadata};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::*;

/// The standard repository layout.
pub const DEFAULT_TEMPLATE: &str =
    "{groupIdDirs}/{artifactId}/{baseVersion}/{artifactId}-{version}-{classifier}.{extension}";

static TOKENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\{[^}]*\})|([^{]+)").unwrap());

const SUPPORTED_VARIABLES: [&str; 7] = [
    "artifactId",
    "baseVersion",
    "classifier",
    "extension",
    "groupId",
    "groupIdDirs",
    "version",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid variable '{variable}' in layout, supported variables are [{}]", supported.join(", "))]
    InvalidVariable {
        variable: String,
        supported: Vec<String>,
    },
}

impl LayoutError {
    fn invalid_variable(variable: &str) -> Self {
        Self::InvalidVariable {
            variable: variable.to_string(),
            supported: SUPPORTED_VARIABLES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    GroupId,
    GroupIdDirs,
    ArtifactId,
    Version,
    BaseVersion,
    Classifier,
    Extension,
}

impl Token {
    fn variable(name: &str) -> Option<Self> {
        match name {
            "groupId" => Some(Self::GroupId),
            "groupIdDirs" => Some(Self::GroupIdDirs),
            "artifactId" => Some(Self::ArtifactId),
            "version" => Some(Self::Version),
            "baseVersion" => Some(Self::BaseVersion),
            "classifier" => Some(Self::Classifier),
            "extension" => Some(Self::Extension),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    template: String,
    tokens: Vec<Token>,
}

impl Layout {
    pub fn new<S: Into<String>>(template: S) -> Result<Self, LayoutError> {
        let template = template.into();
        let tokens = tokenize(&template)?;
        Ok(Self { template, tokens })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the path of an artifact.
    ///
    /// An empty classifier also removes the `-` or `_` right before it, so that
    /// `{artifactId}-{version}-{classifier}.{extension}` renders as `lib-1.0.jar`.
    ///
    pub fn path_for_artifact(&self, artifact: &Artifact) -> String {
        let mut path = String::new();
        let mut previous: Option<&Token> = None;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => path.push_str(text),
                Token::GroupId => path.push_str(artifact.group_id()),
                Token::GroupIdDirs => path.push_str(&artifact.group_id().replace('.', "/")),
                Token::ArtifactId => path.push_str(artifact.artifact_id()),
                Token::Version => path.push_str(artifact.version()),
                Token::BaseVersion => path.push_str(artifact.base_version()),
                Token::Extension => path.push_str(artifact.extension()),
                Token::Classifier if artifact.classifier().is_empty() => {
                    if let Some(Token::Literal(text)) = previous {
                        if matches!(text.chars().last(), Some('-' | '_')) {
                            path.pop();
                        }
                    }
                }
                Token::Classifier => path.push_str(artifact.classifier()),
            }
            previous = Some(token);
        }

        path
    }

    /// Render the path of a piece of metadata as stored in a remote repository.
    pub fn path_for_metadata(&self, metadata: &Metadata) -> String {
        metadata_path(metadata, None)
    }
}

fn tokenize(template: &str) -> Result<Vec<Token>, LayoutError> {
    let mut tokens = vec![];
    let mut last_end = 0;

    for m in TOKENS.find_iter(template) {
        // the pattern only skips over a `{` that is never closed
        if m.start() != last_end {
            return Err(LayoutError::invalid_variable(&template[last_end..]));
        }
        last_end = m.end();

        let text = m.as_str();
        match text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            Some(name) => {
                let token =
                    Token::variable(name).ok_or_else(|| LayoutError::invalid_variable(name))?;
                tokens.push(token);
            }
            None => tokens.push(Token::Literal(text.to_string())),
        }
    }

    if last_end != template.len() {
        return Err(LayoutError::invalid_variable(&template[last_end..]));
    }

    Ok(tokens)
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            tokens: vec![
                Token::GroupIdDirs,
                Token::Literal("/".to_string()),
                Token::ArtifactId,
                Token::Literal("/".to_string()),
                Token::BaseVersion,
                Token::Literal("/".to_string()),
                Token::ArtifactId,
                Token::Literal("-".to_string()),
                Token::Version,
                Token::Literal("-".to_string()),
                Token::Classifier,
                Token::Literal(".".to_string()),
                Token::Extension,
            ],
        }
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}
