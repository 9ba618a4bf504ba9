//! # Transfer Events
//!
//! Events describing the lifecycle of every upload and download. They hold no references to the
//! transfers themselves, so they can be queued on an [EventChannel] and consumed on another
//! thread, like the CLI's status reporter does.
//!
mod channel;
mod consumer;
pub mod event;
mod listener;

pub use channel::*;
pub use consumer::*;
pub use listener::*;
