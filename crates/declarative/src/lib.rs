//! # Declarative
//!
//! A framework for ordered, idempotent resource provisioning.
//!
//! ## Core Concepts
//!
//! - **Resource**: Something that exists or not, and can be created or destroyed
//! - **ResourceState**: Whether a resource is present
//! - **ExecutionPlan**: Resources in dependency order
//! - **Executor**: Converges a plan (fail-fast) or tears it down (best-effort)
//!
//! ## Example
//!
//! ```
//! use declarative::{ExecutionPlan, Resource, ResourceState, converge_simple, teardown_simple};
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! #[derive(Debug, Default)]
//! struct Flag(AtomicBool);
//!
//! impl Resource for Flag {
//!     fn id(&self) -> String { "flag".into() }
//!     fn description(&self) -> String { "a flag".into() }
//!     fn resource_type(&self) -> &'static str { "flag" }
//!
//!     fn current_state(&self) -> anyhow::Result<ResourceState> {
//!         Ok(ResourceState::from_exists(self.0.load(Ordering::SeqCst)))
//!     }
//!
//!     fn create(&self) -> anyhow::Result<()> {
//!         self.0.store(true, Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     fn destroy(&self) -> anyhow::Result<()> {
//!         self.0.store(false, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! let mut plan = ExecutionPlan::new();
//! plan.push(Box::new(Flag::default()));
//!
//! let summary = converge_simple(&plan).unwrap();
//! assert_eq!(summary.created(), 1);
//!
//! let report = teardown_simple(&plan);
//! assert_eq!(report.destroyed(), 1);
//! ```
//!
//! ## Provider Traits
//!
//! - [`ProgressCallback`]: Receives progress updates
//!
//! This allows the crate to be used without hard dependencies on
//! specific UI frameworks.

pub mod context;
pub mod error;
pub mod executor;
pub mod planner;
pub mod resource;
pub mod types;

// Re-export main types at crate root
pub use context::{NoProgress, ProgressCallback};
pub use error::{Error, Result};
pub use executor::{converge, converge_simple, teardown, teardown_simple};
pub use planner::ExecutionPlan;
pub use resource::{BoxedResource, Resource};
pub use types::{
    ApplyEntry, ApplyResult, ResourceState, SetupSummary, TeardownEntry, TeardownOutcome,
    TeardownReport,
};
