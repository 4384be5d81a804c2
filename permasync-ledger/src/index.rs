//! Repository index operations: list, create, update.
//!
//! Writes pace themselves with a fixed pre-submission delay to respect the
//! ledger's submission-rate constraints. The delay is a courtesy, not a
//! confirmation wait, and is configurable so tests can pass zero.

use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use permasync_core::types::OwnedRepo;

use crate::client::{LedgerClient, ViewRequest, WriteRequest};
use crate::error::{QueryError, WriteError};
use crate::observer::IndexObserver;

/// Default pre-write pacing delay.
pub const DEFAULT_WRITE_PACING: Duration = Duration::from_millis(500);

/// Outcome of a create or update submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWrite {
    /// The repository record id the write targeted (fresh for creates).
    pub record_id: String,
    pub status: crate::client::SubmissionStatus,
}

/// Stateless façade over the shared repository-index contract.
pub struct RepoIndex<C: LedgerClient, O: IndexObserver = ()> {
    client: C,
    observer: O,
    write_pacing: Duration,
}

impl<C: LedgerClient> RepoIndex<C, ()> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            observer: (),
            write_pacing: DEFAULT_WRITE_PACING,
        }
    }
}

impl<C: LedgerClient, O: IndexObserver> RepoIndex<C, O> {
    pub fn with_observer(client: C, observer: O) -> Self {
        Self {
            client,
            observer,
            write_pacing: DEFAULT_WRITE_PACING,
        }
    }

    /// Override the pre-write pacing delay (tests pass `Duration::ZERO`).
    pub fn with_write_pacing(mut self, pacing: Duration) -> Self {
        self.write_pacing = pacing;
        self
    }

    /// Query the ledger for every repository owned by `owner`.
    ///
    /// A failure here means the caller's view of existing records is
    /// unknown; it must never be read as "no repositories exist".
    pub fn list_owned(&self, owner: &str) -> Result<Vec<OwnedRepo>, QueryError> {
        let request = ViewRequest {
            function: "getRepositoriesByOwner".to_string(),
            payload: json!({ "owner": owner }),
        };
        let value = self.client.view_state(&request)?;
        let result = value
            .get("result")
            .cloned()
            .unwrap_or(value);
        let repos: Vec<OwnedRepo> = serde_json::from_value(result)
            .map_err(|e| QueryError::BadResponse(e.to_string()))?;
        log::debug!("owner {owner} has {} repositories on the ledger", repos.len());
        Ok(repos)
    }

    /// Register a new repository record with a freshly generated id.
    pub fn create(
        &self,
        name: &str,
        description: &str,
        reference: &str,
    ) -> Result<RecordWrite, WriteError> {
        if name.is_empty() {
            return Err(WriteError::MissingField { field: "name" });
        }
        if reference.is_empty() {
            return Err(WriteError::MissingField { field: "reference" });
        }

        let id = Uuid::new_v4().to_string();
        let request = WriteRequest {
            function: "initialize".to_string(),
            payload: json!({
                "id": id,
                "name": name,
                "description": description,
                "dataTxId": reference,
            }),
        };

        match self.submit(&request, &id) {
            Ok(write) => {
                self.observer.on_create_succeeded(&write.record_id);
                log::info!("created repository record '{id}' for '{name}'");
                Ok(write)
            }
            Err(err) => {
                self.observer.on_create_failed(&err);
                Err(err)
            }
        }
    }

    /// Replace the artifact reference on an existing record.
    pub fn update(
        &self,
        id: &str,
        name: &str,
        description: &str,
        reference: &str,
    ) -> Result<RecordWrite, WriteError> {
        if id.is_empty() {
            return Err(WriteError::MissingField { field: "id" });
        }
        if name.is_empty() {
            return Err(WriteError::MissingField { field: "name" });
        }
        if reference.is_empty() {
            return Err(WriteError::MissingField { field: "reference" });
        }

        let request = WriteRequest {
            function: "updateRepositoryTxId".to_string(),
            payload: json!({
                "id": id,
                "name": name,
                "description": description,
                "dataTxId": reference,
            }),
        };

        match self.submit(&request, id) {
            Ok(write) => {
                self.observer.on_update_succeeded(&write.record_id);
                log::info!("updated repository record '{id}' for '{name}'");
                Ok(write)
            }
            Err(err) => {
                self.observer.on_update_failed(&err);
                Err(err)
            }
        }
    }

    fn submit(&self, request: &WriteRequest, record_id: &str) -> Result<RecordWrite, WriteError> {
        // Rate-limiting courtesy toward the ledger; not a confirmation wait.
        if !self.write_pacing.is_zero() {
            std::thread::sleep(self.write_pacing);
        }
        let receipt = self.client.write_interaction(request)?;
        Ok(RecordWrite {
            record_id: record_id.to_string(),
            status: receipt.status,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
