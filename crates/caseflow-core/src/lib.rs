//! # caseflow-core
//!
//! The case-workflow and reminder engine for legal intake.
//!
//! This crate provides:
//! - The `Clock` and `IdSource` capabilities and their stock implementations
//! - Day arithmetic over ISO timestamps (`clock`)
//! - The stage evaluator, initial task generator, reminder generator and
//!   alert aggregator
//! - `WorkflowEngine`, which wires them together for callers
//!
//! Every rule is a pure function of a case snapshot and an instant. Nothing
//! here performs I/O or holds state between calls.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caseflow_core::WorkflowEngine;
//!
//! let engine = WorkflowEngine::system();
//! let updated = engine.apply(&case);
//! ```

pub mod alerts;
pub mod clock;
mod draft;
pub mod engine;
pub mod ids;
pub mod onboarding;
pub mod reminders;
pub mod stages;
pub mod traits;

#[cfg(test)]
mod fixtures;

pub use clock::{FixedClock, SystemClock};
pub use engine::{WorkflowEngine, WorkflowRun};
pub use ids::{SequentialIds, UuidIds};
