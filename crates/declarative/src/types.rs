//! Core types for declarative resource management

use serde::{Deserialize, Serialize};

/// Current state of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceState {
    /// Resource exists
    Present,
    /// Resource does not exist
    Absent,
}

impl ResourceState {
    /// Map an existence check onto a state
    pub fn from_exists(exists: bool) -> Self {
        if exists { Self::Present } else { Self::Absent }
    }

    /// Check if state represents absence
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Result of converging a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyResult {
    /// Resource was created
    Created,
    /// Resource already existed and was left alone
    Existing,
}

/// One converged resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyEntry {
    pub resource_type: String,
    pub id: String,
    pub result: ApplyResult,
}

/// Summary of a successful convergence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupSummary {
    /// Entries in the order they were converged
    pub entries: Vec<ApplyEntry>,
}

impl SetupSummary {
    /// Number of resources created
    pub fn created(&self) -> usize {
        self.count(ApplyResult::Created)
    }

    /// Number of resources that already existed
    pub fn existing(&self) -> usize {
        self.count(ApplyResult::Existing)
    }

    /// Total number of resources processed
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    fn count(&self, result: ApplyResult) -> usize {
        self.entries.iter().filter(|e| e.result == result).count()
    }

    /// Add a result to the summary
    pub fn add_result(&mut self, resource_type: &str, id: &str, result: ApplyResult) {
        self.entries.push(ApplyEntry {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
            result,
        });
    }
}

/// Outcome of tearing down a single resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeardownOutcome {
    /// Resource existed and was destroyed
    Destroyed,
    /// Resource did not exist
    SkippedNotFound,
    /// Lookup or destruction failed; teardown continued
    Failed { reason: String },
}

impl TeardownOutcome {
    /// Check if the outcome is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// One torn-down resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownEntry {
    pub resource_type: String,
    pub id: String,
    pub outcome: TeardownOutcome,
}

/// Per-resource record of a teardown run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeardownReport {
    /// Entries in the order they were attempted
    pub entries: Vec<TeardownEntry>,
}

impl TeardownReport {
    /// Number of resources destroyed
    pub fn destroyed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == TeardownOutcome::Destroyed)
            .count()
    }

    /// Number of resources that were already gone
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == TeardownOutcome::SkippedNotFound)
            .count()
    }

    /// Entries that failed
    pub fn failures(&self) -> impl Iterator<Item = &TeardownEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }

    /// Check if every resource was destroyed or already gone
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Add an outcome to the report
    pub fn add_outcome(&mut self, resource_type: &str, id: &str, outcome: TeardownOutcome) {
        self.entries.push(TeardownEntry {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
            outcome,
        });
    }
}
