//! The sync state machine.
//!
//! `Validating → Listing → Archiving → Publishing → Deciding → Writing →
//! Done`, failing out of any state. The three network steps run strictly in
//! sequence: the create/update decision needs the listing, and the ledger
//! write needs the published reference. Once publishing succeeds the sync has
//! crossed its irreversible boundary — an artifact exists on the storage
//! network whether or not the ledger write lands.

use std::path::{Path, PathBuf};

use permasync_archive::ArchiveError;
use permasync_core::tags::build_tags;
use permasync_core::types::{OwnedRepo, PublishKind, RepoName};
use permasync_core::SyncConfig;
use permasync_ledger::{IndexObserver, LedgerClient, RepoIndex, SubmissionStatus};
use permasync_storage::{Publisher, StorageClient};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Archiver seam
// ---------------------------------------------------------------------------

/// The one operation the orchestrator needs from the archiving layer.
pub trait Archiver {
    fn archive(
        &self,
        root: &Path,
        include: &Path,
        use_ignore_file: bool,
    ) -> Result<Vec<u8>, ArchiveError>;
}

/// Production archiver backed by [`permasync_archive::archive`].
pub struct TreeArchiver;

impl Archiver for TreeArchiver {
    fn archive(
        &self,
        root: &Path,
        include: &Path,
        use_ignore_file: bool,
    ) -> Result<Vec<u8>, ArchiveError> {
        permasync_archive::archive(root, include, use_ignore_file)
    }
}

// ---------------------------------------------------------------------------
// Options and outcome
// ---------------------------------------------------------------------------

/// Per-invocation knobs that are not part of [`SyncConfig`].
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory the sync operates from.
    pub root: PathBuf,
    /// Subtree to archive, relative to `root` (usually `.`).
    pub include: PathBuf,
    /// Honor the project's `.gitignore` when archiving.
    pub use_ignore_file: bool,
    /// Skip archive + publish and write this already-published reference.
    /// Recovery path for a previous run that published but failed to write.
    pub reuse_reference: Option<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include: PathBuf::from("."),
            use_ignore_file: true,
            reuse_reference: None,
        }
    }
}

/// Terminal result of a successful sync.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Id of the repository record the write targeted.
    pub record_id: String,
    /// Storage-network reference now recorded (or pending) on the ledger.
    pub reference: String,
    /// Whether this sync created a new record or updated an existing one.
    pub kind: PublishKind,
    /// How far the ledger write had progressed when the call returned.
    pub status: SubmissionStatus,
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run one full sync.
///
/// Every network step is awaited and checked before `Done`; the function
/// never reports success on an unconfirmed submission. Concurrent syncs of
/// the same name are resolved by the ledger's own ordering (last accepted
/// write wins).
pub fn run<A, C, L, O>(
    config: &SyncConfig,
    options: &SyncOptions,
    archiver: &A,
    publisher: &Publisher<C>,
    index: &RepoIndex<L, O>,
) -> Result<SyncOutcome, SyncError>
where
    A: Archiver,
    C: StorageClient,
    L: LedgerClient,
    O: IndexObserver,
{
    // Validating: the only place the name rule is checked.
    let name = RepoName::parse(&config.title)?;
    log::info!("starting sync for repository '{name}'");

    // Listing: a query failure means unknown state; stop before any
    // destructive action.
    let owned = index.list_owned(config.wallet.address())?;
    let existing = find_existing(&name, &owned);
    let kind = match existing {
        Some(_) => PublishKind::Update,
        None => PublishKind::New,
    };
    log::debug!("decision for '{name}': {kind}");

    // Archiving + Publishing, unless the caller is recovering a previous
    // publish whose ledger write failed.
    let reference = match &options.reuse_reference {
        Some(reference) => {
            log::info!("reusing previously published artifact '{reference}'");
            reference.clone()
        }
        None => {
            let blob = archiver.archive(&options.root, &options.include, options.use_ignore_file)?;
            let tags = build_tags(name.as_str(), &config.description, kind);
            publisher.publish(&blob, &tags)?
        }
    };

    // Deciding + Writing: a failure here orphans the artifact above, so the
    // error carries the reference for a same-reference retry.
    let write = match existing {
        Some(repo) => index.update(&repo.id, name.as_str(), &config.description, &reference),
        None => index.create(name.as_str(), &config.description, &reference),
    }
    .map_err(|source| SyncError::Write {
        reference: reference.clone(),
        source,
    })?;

    log::info!(
        "sync done for '{name}': record {} -> {reference} ({kind})",
        write.record_id
    );
    Ok(SyncOutcome {
        record_id: write.record_id,
        reference,
        kind,
        status: write.status,
    })
}

/// Case-insensitive lookup of the name among the owner's existing records.
fn find_existing<'a>(name: &RepoName, owned: &'a [OwnedRepo]) -> Option<&'a OwnedRepo> {
    owned.iter().find(|repo| name.matches(&repo.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_match_ignores_case() {
        let name = RepoName::parse("My-Repo").unwrap();
        let owned = vec![OwnedRepo {
            id: "abc".into(),
            name: "my-repo".into(),
        }];
        assert_eq!(find_existing(&name, &owned).unwrap().id, "abc");
    }

    #[test]
    fn no_match_for_unknown_name() {
        let name = RepoName::parse("other").unwrap();
        let owned = vec![OwnedRepo {
            id: "abc".into(),
            name: "my-repo".into(),
        }];
        assert!(find_existing(&name, &owned).is_none());
    }
}
