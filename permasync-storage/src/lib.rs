//! # permasync-storage
//!
//! Artifact publishing to the durable content-addressed storage network.
//!
//! [`Publisher`] validates the blob and tag set, then hands the upload to a
//! [`StorageClient`]. The production client is [`HttpStorageClient`], a thin
//! gateway wrapper; tests substitute a double.

pub mod error;
pub mod http;
pub mod publisher;

pub use error::PublishError;
pub use http::HttpStorageClient;
pub use publisher::{Publisher, StorageClient};
