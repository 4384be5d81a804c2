//! # permasync-ledger
//!
//! Repository index client over the shared ledger.
//!
//! [`RepoIndex`] is a stateless façade: the ledger itself is the source of
//! truth and may be mutated concurrently by other identities. Reads go
//! through `list_owned`; writes are durable, append-only submissions that can
//! only be superseded, never retracted.

pub mod client;
pub mod error;
pub mod http;
pub mod index;
pub mod observer;

pub use client::{LedgerClient, SubmissionStatus, ViewRequest, WriteReceipt, WriteRequest};
pub use error::{QueryError, WriteError};
pub use http::HttpLedgerClient;
pub use index::{RecordWrite, RepoIndex};
pub use observer::IndexObserver;
