//! # Repository Connectors
//!
//! A connector moves batches of [Transfer]s between the local file system and one remote
//! repository. Each transfer is carried out by a worker that copies the bytes, protects them with
//! checksums, and reports its progress as transfer events.
//!
mod error;
mod file;
mod transfer;
mod worker;

pub use error::*;
pub use file::*;
pub use transfer::*;
pub use worker::*;

use async_trait::async_trait;

#[async_trait]
pub trait RepositoryConnector: Send + Sync {
    /// Run every download and return the finished transfers in the order they were given.
    async fn get(&self, downloads: Vec<Transfer>) -> Result<Vec<Transfer>, ConnectorError>;

    /// Run every upload and return the finished transfers in the order they were given.
    async fn put(&self, uploads: Vec<Transfer>) -> Result<Vec<Transfer>, ConnectorError>;

    /// Stop accepting new batches.
    fn close(&self);
}
