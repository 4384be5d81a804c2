//! HTTP gateway client for the ledger contract.
//!
//! Queries go to `POST <base>/contracts/<contract>/view`; state transitions
//! to `POST <base>/contracts/<contract>/interactions`. Both carry the
//! caller's address so the gateway can attribute the interaction.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::{
    LedgerClient, SubmissionStatus, ViewRequest, WriteReceipt, WriteRequest,
};
use crate::error::{QueryError, WriteError};

/// Ledger gateway client over plain HTTP, bound to one contract and caller.
pub struct HttpLedgerClient {
    base_url: String,
    contract_id: String,
    caller: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct InteractionResponse {
    id: String,
    #[serde(default)]
    finalized: bool,
}

impl HttpLedgerClient {
    pub fn new(
        base_url: impl Into<String>,
        contract_id: impl Into<String>,
        caller: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            contract_id: contract_id.into(),
            caller: caller.into(),
            agent: ureq::Agent::new(),
        }
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/contracts/{}/{suffix}", self.base_url, self.contract_id)
    }
}

impl LedgerClient for HttpLedgerClient {
    fn view_state(&self, request: &ViewRequest) -> Result<Value, QueryError> {
        let url = self.endpoint("view");
        let body = json!({
            "function": request.function,
            "payload": request.payload,
            "caller": self.caller,
        });
        log::debug!("ledger view '{}' via {url}", request.function);
        let response = self.agent.post(&url).send_json(body).map_err(|e| match e {
            ureq::Error::Status(status, resp) => QueryError::Rejected {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => QueryError::Transport(t.to_string()),
        })?;
        response
            .into_json()
            .map_err(|e| QueryError::BadResponse(e.to_string()))
    }

    fn write_interaction(&self, request: &WriteRequest) -> Result<WriteReceipt, WriteError> {
        let url = self.endpoint("interactions");
        let body = json!({
            "function": request.function,
            "payload": request.payload,
            "caller": self.caller,
        });
        log::debug!("ledger write '{}' via {url}", request.function);
        let response = self.agent.post(&url).send_json(body).map_err(|e| match e {
            ureq::Error::Status(status, resp) => WriteError::Rejected {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => WriteError::Transport(t.to_string()),
        })?;

        let parsed: InteractionResponse = response
            .into_json()
            .map_err(|e| WriteError::BadResponse(e.to_string()))?;
        if parsed.id.is_empty() {
            return Err(WriteError::BadResponse(
                "gateway returned an empty interaction id".to_string(),
            ));
        }
        Ok(WriteReceipt {
            interaction_id: parsed.id,
            status: if parsed.finalized {
                SubmissionStatus::Finalized
            } else {
                SubmissionStatus::Submitted
            },
        })
    }
}
