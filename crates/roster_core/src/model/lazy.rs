//! Capability-typed lazy collection for inverse-side associations.

use serde::{Deserialize, Serialize};

/// A to-many association that is either resolved in memory or still at rest.
///
/// Freshly constructed owners start with loaded empty content; owners
/// materialized by a repository start as `NotLoaded` until a repository
/// resolves them. The unresolved state is visible in the type rather than
/// triggering a hidden fetch on access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LazyList<T> {
    /// Association content is present in memory.
    Loaded(Vec<T>),
    /// Association exists at rest but has not been fetched yet.
    NotLoaded,
}

impl<T> LazyList<T> {
    /// Empty resolved list, the state of a newly constructed owner.
    pub fn empty() -> Self {
        Self::Loaded(Vec::new())
    }

    /// Resolved list holding `items`.
    pub fn loaded(items: Vec<T>) -> Self {
        Self::Loaded(items)
    }

    /// Unresolved handle, the state of a repository-materialized owner.
    pub const fn not_loaded() -> Self {
        Self::NotLoaded
    }

    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Returns the resolved items, or `None` when nothing has been fetched.
    pub fn as_slice(&self) -> Option<&[T]> {
        match self {
            Self::Loaded(items) => Some(items),
            Self::NotLoaded => None,
        }
    }

    /// Replaces the content with freshly resolved items.
    pub fn set_loaded(&mut self, items: Vec<T>) {
        *self = Self::Loaded(items);
    }
}

impl<T> Default for LazyList<T> {
    fn default() -> Self {
        Self::empty()
    }
}
