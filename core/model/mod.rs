//! Coordinates of the things that get moved around: artifacts, metadata, and the repositories
//! they live in.
//!
mod artifact;
mod exclusion;
mod metadata;
mod policy;
mod repository;

pub use artifact::*;
pub use exclusion::*;
pub use metadata::*;
pub use policy::*;
pub use repository::*;
