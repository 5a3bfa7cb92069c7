//! Network wrappers over host elements.
//!
//! Wrappers are read-only snapshots: an [`Endpoint`] captures a
//! connector's position, orientation, profile and connection state at
//! construction time, and a [`Segment`] captures a linear member's line
//! and its two extremity endpoints. After the underlying element is
//! mutated (re-cut, connected) the snapshot is stale; the [`Inventory`]
//! refreshes wrappers as the operation reshapes the network.

mod endpoint;
mod inventory;
mod segment;

pub use endpoint::Endpoint;
pub use inventory::Inventory;
pub use segment::{Fitting, NetworkMember, Segment};
