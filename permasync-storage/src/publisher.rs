//! Publisher — validation in front of the storage client.

use permasync_core::tags::Tag;

use crate::error::PublishError;

/// The operation the storage network exposes to this crate: submit bytes plus
/// metadata, receive a permanent reference identifier.
pub trait StorageClient {
    fn submit(&self, data: &[u8], tags: &[Tag]) -> Result<String, PublishError>;
}

/// Validates and publishes one archive blob per sync.
///
/// Publishing is at-most-once per invocation: this type never retries, since
/// each accepted submission consumes resources on the network whether or not
/// the caller sees the response. Retry policy belongs to the orchestrator.
pub struct Publisher<C: StorageClient> {
    client: C,
}

impl<C: StorageClient> Publisher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Publish `blob` with `tags`; returns the permanent reference.
    pub fn publish(&self, blob: &[u8], tag_set: &[Tag]) -> Result<String, PublishError> {
        if blob.is_empty() {
            return Err(PublishError::EmptyBlob);
        }
        require_tag(tag_set, "Content-Type")?;
        require_tag(tag_set, "App-Name")?;

        let reference = self.client.submit(blob, tag_set)?;
        log::info!(
            "published {} bytes as '{reference}' ({} tags)",
            blob.len(),
            tag_set.len()
        );
        Ok(reference)
    }
}

fn require_tag(tag_set: &[Tag], name: &'static str) -> Result<(), PublishError> {
    if tag_set.iter().any(|t| t.name == name) {
        Ok(())
    } else {
        Err(PublishError::MissingTag { name })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
