//! Human domain model and its embedded address value.
//!
//! # Responsibility
//! - Define the human record persisted by the repository layer.
//! - Keep the embedded address a plain value with no identity of its own.
//!
//! # Invariants
//! - `id` stays `None` until the storage layer assigns it on first save.
//! - `address` always travels inside its owning human; it is never stored
//!   or loaded on its own.

use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the storage layer on first save.
pub type HumanId = i64;

/// Postal address embedded inline in the owning human record.
///
/// Carries no identifier and no lifecycle: at rest its fields live as
/// columns of the `humans` table and the value is reassembled on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            zipcode: zipcode.into(),
        }
    }
}

/// Person-shaped record with a name, an age and an optional embedded address.
///
/// All fields are plain public data; constraint enforcement (identifier
/// uniqueness, nullability) belongs to the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Human {
    /// `None` until first persistence; immutable once assigned.
    pub id: Option<HumanId>,
    pub name: String,
    pub age: i32,
    /// Embedded value, flattened into the same row at rest.
    pub address: Option<Address>,
}

impl Human {
    /// Creates an unsaved human with no address.
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            address: None,
        }
    }
}
