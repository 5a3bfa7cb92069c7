//! Endpoint wrappers.

use crate::geometry::{Point3, Vector3};
use crate::host::{Connector, ConnectorKind, ConnectorRef, Domain, ElementId, Profile};

/// Cosine tolerance for the opposite-direction test: two unit directions
/// are opposite when their dot product is at most -(1 - 0.001), about
/// 2.6 degrees off exactly anti-parallel.
const OPPOSITE_TOLERANCE: f64 = 0.001;

/// An oriented attachment point on a network member.
///
/// Captured from a document connector at wrapper construction time and
/// never mutated afterwards; connection state changes go through
/// [`crate::host::Document::connect`], after which the wrapper is stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    owner: ElementId,
    index: usize,
    origin: Point3,
    direction: Vector3,
    profile: Profile,
    domain: Domain,
    kind: ConnectorKind,
    connected: bool,
}

impl Endpoint {
    /// Captures an endpoint from a connector of the given element.
    #[must_use]
    pub fn capture(owner: ElementId, index: usize, connector: &Connector) -> Self {
        Self {
            owner,
            index,
            origin: connector.origin,
            direction: connector.direction,
            profile: connector.profile,
            domain: connector.domain,
            kind: connector.kind,
            connected: !connector.is_open(),
        }
    }

    /// The owning element.
    #[must_use]
    pub const fn owner(&self) -> ElementId {
        self.owner
    }

    /// Position of the attachment point.
    #[must_use]
    pub const fn origin(&self) -> Point3 {
        self.origin
    }

    /// Outward unit normal.
    #[must_use]
    pub const fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Cross-section profile.
    #[must_use]
    pub const fn profile(&self) -> Profile {
        self.profile
    }

    /// Physical system family.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// True for a physical end connector (as opposed to a mid-span tap).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind == ConnectorKind::End
    }

    /// Connection state at capture time.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Document reference to the underlying connector.
    #[must_use]
    pub const fn connector_ref(&self) -> ConnectorRef {
        ConnectorRef::new(self.owner, self.index)
    }

    /// True when the two endpoints face each other within the fixed
    /// angular tolerance.
    #[must_use]
    pub fn is_opposite(&self, other: &Self) -> bool {
        self.direction
            .is_anti_parallel(other.direction, OPPOSITE_TOLERANCE)
    }

    /// True when the two endpoints are physically compatible: same
    /// domain and matching cross-section profile.
    #[must_use]
    pub fn profile_matches(&self, other: &Self) -> bool {
        self.domain == other.domain && self.profile.matches(&other.profile)
    }
}
