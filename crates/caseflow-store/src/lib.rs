//! # caseflow-store
//!
//! An in-memory case store that upholds the engine's idempotency guarantee
//! under concurrency.
//!
//! ## Overview
//!
//! Reminder deduplication scans the case's current task list. Two `apply`
//! calls racing on the same stale snapshot would both conclude a reminder is
//! missing and both create it. The store prevents this two ways:
//!
//! - `apply_workflow` reads, applies and writes a case under one lock
//! - `commit` accepts an externally edited case only if the caller presents
//!   the fingerprint it read (optimistic concurrency)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caseflow_store::InMemoryCaseStore;
//!
//! let store = InMemoryCaseStore::new();
//! store.insert(case)?;
//! let report = store.apply_workflow("case-1", &engine)?;
//! ```

pub mod fingerprint;
pub mod memory;
pub mod versioned;

pub use fingerprint::fingerprint;
pub use memory::InMemoryCaseStore;
pub use versioned::{ApplyReport, VersionedCase};

// ── Tests ─────────────────────────────────────────────────────────────────────
