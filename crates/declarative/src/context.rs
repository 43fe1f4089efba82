//! Progress reporting hooks
//!
//! These let callers render progress without the executor depending on
//! a particular terminal library.

use crate::types::{ApplyResult, TeardownOutcome};

/// Progress callback for execution operations
///
/// Every method has an empty default so implementors only override
/// what they display.
pub trait ProgressCallback {
    /// Called before the first resource of a run
    fn on_start(&mut self, _count: usize) {}

    /// Called when starting work on a single resource
    fn on_resource_start(&mut self, _resource_type: &str, _id: &str) {}

    /// Called when a resource has been converged
    fn on_applied(&mut self, _resource_type: &str, _id: &str, _result: ApplyResult) {}

    /// Called when a resource has been torn down (or skipped, or failed)
    fn on_torn_down(&mut self, _resource_type: &str, _id: &str, _outcome: &TeardownOutcome) {}

    /// Called after the last resource of a run
    fn on_complete(&mut self) {}
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {}
