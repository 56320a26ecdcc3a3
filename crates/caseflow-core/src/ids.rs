//! `IdSource` implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::traits::IdSource;

/// Random v4 UUID suffixes. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

/// Monotonic counter suffixes starting at 1, for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}

/// True when `suffix` is exactly one id suffix as minted by [`UuidIds`] or
/// [`SequentialIds`]: a UUID or a run of decimal digits.
pub fn is_minted_suffix(suffix: &str) -> bool {
    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    Uuid::parse_str(suffix).is_ok()
}
