//! Capabilities the engine consumes from its host.
//!
//! - `Clock`    — the single source of "now" for every age computation
//! - `IdSource` — mints ids for generated tasks and log entries
//!
//! Both are injected into [`WorkflowEngine`](crate::WorkflowEngine) so that
//! every rule stays a pure function of (case, now). Tests use `FixedClock`
//! and `SequentialIds` to make output fully deterministic.

use chrono::{DateTime, Utc};

/// Supplies the reference instant for one engine invocation.
///
/// The engine reads the clock once per call and threads the value through
/// every rule, so one invocation never observes two different "nows".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Mints globally unique identifiers.
///
/// The returned id must be `prefix`, a `-`, then one suffix accepted by
/// [`is_minted_suffix`](crate::ids::is_minted_suffix) (a UUID or decimal
/// digits). Reminder deduplication relies on this: a reminder's prefix is
/// its idempotency key.
pub trait IdSource: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}
