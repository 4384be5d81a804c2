//! Artifact tag construction.
//!
//! The tag set attached to every published archive is a pure function of
//! (title, description, publish kind) — nothing else may influence it, so the
//! same sync inputs always produce the same metadata.

use serde::{Deserialize, Serialize};

use crate::types::PublishKind;

/// Archive format marker attached to every artifact.
pub const CONTENT_TYPE: &str = "application/gzip";
/// Application identifier attached to every artifact.
pub const APP_NAME: &str = "permasync";
/// Protocol version marker; bump when the archive or record layout changes.
pub const SYNC_VERSION: &str = "permasync-v1";

/// One name/value metadata pair on a published artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Build the fixed tag set for a publish.
pub fn build_tags(title: &str, description: &str, kind: PublishKind) -> Vec<Tag> {
    vec![
        Tag::new("Content-Type", CONTENT_TYPE),
        Tag::new("App-Name", APP_NAME),
        Tag::new("Sync-Version", SYNC_VERSION),
        Tag::new("Title", title),
        Tag::new("Description", description),
        Tag::new("Publish-Kind", kind.as_str()),
    ]
}
