//! End-to-end protocol scenarios driven through test doubles.
//!
//! No network, no real archives: every collaborator is a counting double so
//! the tests can assert exactly which steps ran.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use permasync_archive::ArchiveError;
use permasync_core::tags::Tag;
use permasync_core::types::PublishKind;
use permasync_core::{SyncConfig, Wallet};
use permasync_ledger::{
    LedgerClient, QueryError, RepoIndex, SubmissionStatus, ViewRequest, WriteError,
    WriteReceipt, WriteRequest,
};
use permasync_storage::{PublishError, Publisher, StorageClient};
use permasync_sync::{run, Archiver, SyncError, SyncOptions};

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CountingArchiver {
    calls: Cell<u32>,
}

impl Archiver for &CountingArchiver {
    fn archive(
        &self,
        _root: &Path,
        _include: &Path,
        _use_ignore_file: bool,
    ) -> Result<Vec<u8>, ArchiveError> {
        self.calls.set(self.calls.get() + 1);
        Ok(b"archive-bytes".to_vec())
    }
}

#[derive(Default)]
struct CountingStorage {
    calls: Cell<u32>,
    last_tags: RefCell<Vec<Tag>>,
}

impl StorageClient for &CountingStorage {
    fn submit(&self, _data: &[u8], tags: &[Tag]) -> Result<String, PublishError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_tags.borrow_mut() = tags.to_vec();
        Ok("ref123".to_string())
    }
}

#[derive(Default)]
struct ScriptedLedger {
    /// `None` makes `view_state` fail (listing unavailable).
    owned: RefCell<Option<serde_json::Value>>,
    fail_writes: Cell<bool>,
    writes: RefCell<Vec<WriteRequest>>,
    view_calls: Cell<u32>,
}

impl ScriptedLedger {
    fn with_owned(repos: serde_json::Value) -> Self {
        let ledger = Self::default();
        *ledger.owned.borrow_mut() = Some(repos);
        ledger
    }
}

impl LedgerClient for &ScriptedLedger {
    fn view_state(&self, _request: &ViewRequest) -> Result<serde_json::Value, QueryError> {
        self.view_calls.set(self.view_calls.get() + 1);
        match self.owned.borrow().clone() {
            Some(repos) => Ok(serde_json::json!({ "result": repos })),
            None => Err(QueryError::Transport("gateway down".into())),
        }
    }

    fn write_interaction(&self, request: &WriteRequest) -> Result<WriteReceipt, WriteError> {
        self.writes.borrow_mut().push(request.clone());
        if self.fail_writes.get() {
            return Err(WriteError::Rejected {
                status: 502,
                body: "sequencer unavailable".into(),
            });
        }
        Ok(WriteReceipt {
            interaction_id: "int-1".into(),
            status: SubmissionStatus::Submitted,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn config(dir: &TempDir, title: &str) -> SyncConfig {
    let wallet_path = dir.path().join("wallet.json");
    std::fs::write(&wallet_path, r#"{"kty":"RSA","n":"AQAB","e":"AQAB"}"#).unwrap();
    SyncConfig {
        title: title.to_string(),
        description: "a demo repository".to_string(),
        wallet: Wallet::load(&wallet_path).unwrap(),
        contract_id: "contract-1".to_string(),
        ledger_url: "http://ledger.invalid".to_string(),
        storage_url: "http://storage.invalid".to_string(),
    }
}

fn options() -> SyncOptions {
    SyncOptions {
        root: PathBuf::from("."),
        include: PathBuf::from("."),
        use_ignore_file: true,
        reuse_reference: None,
    }
}

fn tag_value(tags: &[Tag], name: &str) -> Option<String> {
    tags.iter().find(|t| t.name == name).map(|t| t.value.clone())
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn new_repository_is_created_with_a_fresh_id() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "my-repo");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger = ScriptedLedger::with_owned(serde_json::json!([]));
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    let outcome = run(&config, &options(), &&archiver, &publisher, &index).unwrap();

    assert_eq!(outcome.kind, PublishKind::New);
    assert_eq!(outcome.reference, "ref123");
    assert!(!outcome.record_id.is_empty());

    let writes = ledger.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].function, "initialize");
    assert_eq!(writes[0].payload["id"], outcome.record_id.as_str());
    assert_eq!(
        tag_value(&storage.last_tags.borrow(), "Publish-Kind").as_deref(),
        Some("new")
    );
}

#[test]
fn existing_repository_is_updated_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "My-Repo");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger =
        ScriptedLedger::with_owned(serde_json::json!([{"id": "abc", "name": "my-repo"}]));
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    let outcome = run(&config, &options(), &&archiver, &publisher, &index).unwrap();

    assert_eq!(outcome.kind, PublishKind::Update);
    assert_eq!(outcome.record_id, "abc");

    let writes = ledger.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].function, "updateRepositoryTxId");
    assert_eq!(writes[0].payload["id"], "abc");
    assert_eq!(
        tag_value(&storage.last_tags.borrow(), "Publish-Kind").as_deref(),
        Some("update")
    );
}

#[test]
fn invalid_name_fails_before_any_collaborator_is_touched() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "bad name!");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger = ScriptedLedger::with_owned(serde_json::json!([]));
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    let err = run(&config, &options(), &&archiver, &publisher, &index).unwrap_err();

    assert!(matches!(err, SyncError::Validation(_)));
    assert_eq!(err.phase(), "validating");
    assert_eq!(ledger.view_calls.get(), 0);
    assert_eq!(archiver.calls.get(), 0);
    assert_eq!(storage.calls.get(), 0);
    assert!(ledger.writes.borrow().is_empty());
}

#[test]
fn listing_failure_stops_before_archive_and_publish() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "my-repo");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger = ScriptedLedger::default(); // view_state fails
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    let err = run(&config, &options(), &&archiver, &publisher, &index).unwrap_err();

    assert!(matches!(err, SyncError::Query(_)));
    assert_eq!(err.phase(), "listing");
    assert_eq!(archiver.calls.get(), 0, "archiver must not run");
    assert_eq!(storage.calls.get(), 0, "publisher must not run");
}

#[test]
fn write_failure_after_publish_names_the_orphaned_reference() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "my-repo");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger = ScriptedLedger::with_owned(serde_json::json!([]));
    ledger.fail_writes.set(true);
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    let err = run(&config, &options(), &&archiver, &publisher, &index).unwrap_err();

    assert_eq!(err.phase(), "writing");
    assert_eq!(err.published_reference(), Some("ref123"));
    assert!(
        err.to_string().contains("ref123"),
        "diagnostic must name the orphaned artifact: {err}"
    );
    assert_eq!(storage.calls.get(), 1, "publish ran exactly once");
}

#[test]
fn reuse_reference_skips_archive_and_publish() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "my-repo");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger = ScriptedLedger::with_owned(serde_json::json!([]));
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    let mut options = options();
    options.reuse_reference = Some("ref-earlier".to_string());

    let outcome = run(&config, &options, &&archiver, &publisher, &index).unwrap();

    assert_eq!(outcome.reference, "ref-earlier");
    assert_eq!(archiver.calls.get(), 0);
    assert_eq!(storage.calls.get(), 0);
    let writes = ledger.writes.borrow();
    assert_eq!(writes[0].payload["dataTxId"], "ref-earlier");
}

#[test]
fn every_sync_writes_unconditionally_even_for_a_repeat_reference() {
    // A sync is an unconditional write: no skip when the new reference could
    // equal the recorded one.
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "my-repo");
    let archiver = CountingArchiver::default();
    let storage = CountingStorage::default();
    let ledger =
        ScriptedLedger::with_owned(serde_json::json!([{"id": "abc", "name": "my-repo"}]));
    let publisher = Publisher::new(&storage);
    let index = RepoIndex::new(&ledger).with_write_pacing(Duration::ZERO);

    run(&config, &options(), &&archiver, &publisher, &index).unwrap();
    run(&config, &options(), &&archiver, &publisher, &index).unwrap();

    assert_eq!(ledger.writes.borrow().len(), 2);
}
