//! # Depot Core
//!
//! Moves build artifacts and their metadata between a local repository and remote ones, and
//! decides where on disk everything lives.
//!
//! The flow begins by creating a `Config` and using it to build a `SimpleLocalRepositoryManager`
//! and a `FileRepositoryConnector`. The manager tells where an artifact belongs in the local
//! repository, and the connector runs batches of `Transfer`s against a remote repository,
//! verifying checksums and reporting every step as a `TransferEvent`.
//!

pub mod checksum;
pub(crate) mod config;
pub mod connector;
pub mod events;
pub mod graph;
pub mod layout;
pub mod local;
pub mod model;
pub(crate) mod sync;

pub use config::*;
pub use sync::CountDownLatch;

#[macro_use]
extern crate derive_builder;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
