//! Resource trait for declarative state management
//!
//! A Resource is something that either exists or does not, and can be
//! brought into existence or removed again.

use crate::types::ResourceState;
use anyhow::Result;
use std::fmt;

/// Core trait for declarative resources
///
/// Every resource provides:
/// - Identity (id, description, type)
/// - State detection (present or absent)
/// - Creation and destruction
///
/// # Example
///
/// ```
/// use declarative::{Resource, ResourceState};
///
/// #[derive(Debug)]
/// struct DirResource {
///     path: std::path::PathBuf,
/// }
///
/// impl Resource for DirResource {
///     fn id(&self) -> String {
///         self.path.display().to_string()
///     }
///
///     fn description(&self) -> String {
///         format!("directory {}", self.path.display())
///     }
///
///     fn resource_type(&self) -> &'static str {
///         "directory"
///     }
///
///     fn current_state(&self) -> anyhow::Result<ResourceState> {
///         Ok(ResourceState::from_exists(self.path.is_dir()))
///     }
///
///     fn create(&self) -> anyhow::Result<()> {
///         std::fs::create_dir_all(&self.path)?;
///         Ok(())
///     }
///
///     fn destroy(&self) -> anyhow::Result<()> {
///         std::fs::remove_dir(&self.path)?;
///         Ok(())
///     }
/// }
/// ```
pub trait Resource: Send + Sync + fmt::Debug {
    /// Unique identifier for this resource
    ///
    /// Stable and unique within its type, e.g. a machine name for a
    /// domain or an absolute path for a volume.
    fn id(&self) -> String;

    /// Human-readable description of this resource
    fn description(&self) -> String;

    /// Resource type category, used in log lines and reports
    fn resource_type(&self) -> &'static str;

    /// Detect whether the resource currently exists
    ///
    /// An error here means the state could not be determined; a missing
    /// resource is `Ok(ResourceState::Absent)`.
    fn current_state(&self) -> Result<ResourceState>;

    /// Create the resource. Only called when it is absent.
    fn create(&self) -> Result<()>;

    /// Destroy the resource. Only called when it is present.
    fn destroy(&self) -> Result<()>;
}

/// A boxed resource for type-erased storage
pub type BoxedResource = Box<dyn Resource>;
