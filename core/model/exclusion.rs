use super::Artifact;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates of artifacts to leave out of a dependency graph. Versions are not part of an
/// exclusion.
#[derive(Default, Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    group_id: String,
    artifact_id: String,
    classifier: String,
    extension: String,
}

impl Exclusion {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier: classifier.into(),
            extension: extension.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn matches(&self, artifact: &Artifact) -> bool {
        self.group_id == artifact.group_id()
            && self.artifact_id == artifact.artifact_id()
            && self.classifier == artifact.classifier()
            && self.extension == artifact.extension()
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignoring_version() {
        let exclusion = Exclusion::new("org.example", "lib", "", "jar");
        assert!(exclusion.matches(&Artifact::new("org.example", "lib", "", "jar", "1.0")));
        assert!(exclusion.matches(&Artifact::new("org.example", "lib", "", "jar", "2.0")));
        assert!(!exclusion.matches(&Artifact::new("org.example", "lib", "tests", "jar", "1.0")));
        assert!(!exclusion.matches(&Artifact::new("org.example", "lib", "", "pom", "1.0")));
    }

    #[test]
    fn displays_classifier_only_when_present() {
        assert_eq!(Exclusion::new("g", "a", "", "jar").to_string(), "g:a:jar");
        assert_eq!(
            Exclusion::new("g", "a", "sources", "jar").to_string(),
            "g:a:jar:sources"
        );
    }
}
