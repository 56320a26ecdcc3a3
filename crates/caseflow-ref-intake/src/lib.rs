//! # caseflow-ref-intake
//!
//! Personal-injury intake reference runtime for the caseflow engine.
//!
//! Demonstrates three workflow scenarios over a fictional caseload:
//!
//! 1. **Onboarding** a freshly accepted case: initial tasks, the activity
//!    log entry and an idempotent second pass.
//! 2. **Reminder escalation** on a case with unanswered requests, replayed
//!    at later dates so reminders climb the age buckets.
//! 3. **Dashboard** alerts across the whole caseload, before and after the
//!    workflow has been applied.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod mock_data;
pub mod scenarios;
