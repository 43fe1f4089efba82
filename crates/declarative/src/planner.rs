//! Execution plan - an ordered list of resources

use crate::resource::{BoxedResource, Resource};

/// Resources in the order they must be processed
///
/// Dependencies are expressed by position: a resource may rely on every
/// resource before it.
#[derive(Default)]
pub struct ExecutionPlan {
    resources: Vec<BoxedResource>,
}

impl ExecutionPlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource to the plan
    pub fn push(&mut self, resource: BoxedResource) {
        self.resources.push(resource);
    }

    /// Iterate resources in plan order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.iter().map(|resource| &**resource)
    }

    /// "type id" pairs in plan order, for display and tests
    pub fn ids(&self) -> Vec<String> {
        self.iter()
            .map(|r| format!("{} {}", r.resource_type(), r.id()))
            .collect()
    }

    /// Total number of resources in the plan
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if plan is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<BoxedResource> for ExecutionPlan {
    fn from_iter<I: IntoIterator<Item = BoxedResource>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}
