//! HTTP gateway client for the storage network.
//!
//! Uploads go to `POST <base>/tx` as a JSON document carrying the
//! base64url-encoded payload, the tag set, and the submitting owner. The
//! gateway answers `{"id": "<reference>"}` once the submission is accepted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use permasync_core::tags::Tag;

use crate::error::PublishError;
use crate::publisher::StorageClient;

/// Storage-network gateway client over plain HTTP.
pub struct HttpStorageClient {
    base_url: String,
    owner: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

impl HttpStorageClient {
    /// `base_url` without a trailing slash; `owner` is the wallet address the
    /// submission is attributed to.
    pub fn new(base_url: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            owner: owner.into(),
            agent: ureq::Agent::new(),
        }
    }
}

impl StorageClient for HttpStorageClient {
    fn submit(&self, data: &[u8], tags: &[Tag]) -> Result<String, PublishError> {
        let url = format!("{}/tx", self.base_url);
        let body = json!({
            "data": URL_SAFE_NO_PAD.encode(data),
            "tags": tags,
            "owner": self.owner,
        });

        log::debug!("uploading {} bytes to {url}", data.len());
        let response = self.agent.post(&url).send_json(body).map_err(|e| match e {
            ureq::Error::Status(status, resp) => PublishError::Rejected {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => PublishError::Transport(t.to_string()),
        })?;

        let parsed: UploadResponse = response
            .into_json()
            .map_err(|e| PublishError::BadResponse(e.to_string()))?;
        if parsed.id.is_empty() {
            return Err(PublishError::BadResponse(
                "gateway returned an empty reference id".to_string(),
            ));
        }
        Ok(parsed.id)
    }
}
