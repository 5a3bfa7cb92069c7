//! Host document model.
//!
//! This module is the in-process rendition of the CAD platform's
//! element/document/transaction API. The engine treats its operations as
//! fixed contracts:
//!
//! - [`Document::copy_elements`] preserves relative topology and severs
//!   links that leave the copied set
//! - [`Document::set_segment_line`] re-cuts in place, keeping the element
//!   id (cached wrappers must be refreshed afterwards)
//! - [`Document::transaction`] scopes every command; dropping the guard
//!   without committing restores the pre-transaction state
//!
//! Everything the network wrappers read (connector origins, directions,
//! profiles, link state) lives here; the wrappers never carry state of
//! their own.

mod connector;
mod document;
mod element;
mod error;
mod transaction;

pub use connector::{Connector, ConnectorKind, ConnectorRef, ConnectorSpec, Domain, Profile};
pub use document::Document;
pub use element::{Body, Category, Element};
pub use error::{HostError, HostResult};
pub use transaction::Transaction;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque id of a document element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ElementId(i64);

impl ElementId {
    /// Creates an id from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A building level: a named elevation that per-level copies target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name (e.g. "Level 2").
    pub name: String,
    /// Elevation in internal length units.
    pub elevation: f64,
}

impl Level {
    /// Creates a level.
    pub fn new(name: impl Into<String>, elevation: f64) -> Self {
        Self {
            name: name.into(),
            elevation,
        }
    }
}
