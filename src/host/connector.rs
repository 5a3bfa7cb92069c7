//! Connector records: attachment points carried by every network element.
//!
//! A connector is an oriented attachment point with a cross-section
//! profile and a physical domain. Connection state lives in the document
//! (a symmetric pair of [`ConnectorRef`] links), never on wrapper types.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point3, Vector3};

use super::ElementId;

/// Physical system family a connector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Hydronic and sanitary piping.
    Piping,
    /// Air ducting.
    Ducting,
    /// Cable tray and conduit.
    Electrical,
}

/// Cross-section profile of a connector.
///
/// Dimensions are in internal length units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum Profile {
    /// Circular cross-section (pipes, round duct).
    Round {
        /// Radius.
        radius: f64,
    },
    /// Rectangular cross-section (rectangular duct, cable tray).
    Rectangular {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Flat-oval cross-section (oval duct).
    Oval {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
}

/// Dimension tolerance for profile compatibility, in internal length
/// units.
const PROFILE_TOLERANCE: f64 = 0.01;

impl Profile {
    /// True when two profiles are close enough to splice together.
    ///
    /// Shapes must be equal. Round profiles compare radii; rectangular
    /// and oval profiles compare width and height. All comparisons use
    /// the same 0.01-unit tolerance.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Round { radius: a }, Self::Round { radius: b }) => {
                (a - b).abs() <= PROFILE_TOLERANCE
            }
            (
                Self::Rectangular { width: w1, height: h1 },
                Self::Rectangular { width: w2, height: h2 },
            )
            | (Self::Oval { width: w1, height: h1 }, Self::Oval { width: w2, height: h2 }) => {
                (w1 - w2).abs() <= PROFILE_TOLERANCE && (h1 - h2).abs() <= PROFILE_TOLERANCE
            }
            _ => false,
        }
    }
}

/// Connector kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Physical end of a run; the only kind that participates in splice
    /// detection and far-mate search.
    #[default]
    End,
    /// Mid-span tap.
    Tap,
}

/// Reference to one connector of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRef {
    /// Owning element.
    pub element: ElementId,
    /// Connector index on that element.
    pub index: usize,
}

impl ConnectorRef {
    /// Creates a connector reference.
    #[must_use]
    pub const fn new(element: ElementId, index: usize) -> Self {
        Self { element, index }
    }
}

/// A connector as stored on a document element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Position of the attachment point.
    pub origin: Point3,
    /// Outward unit normal (points away from the owning element).
    pub direction: Vector3,
    /// Cross-section profile.
    pub profile: Profile,
    /// Physical system family.
    pub domain: Domain,
    /// Connector kind.
    pub kind: ConnectorKind,
    /// Symmetric link to the mated connector, if connected.
    pub linked: Option<ConnectorRef>,
}

impl Connector {
    /// True when the connector has no mate.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.linked.is_none()
    }
}

/// Connector description used by element builders; the document assigns
/// indices and normalises directions on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorSpec {
    /// Position of the attachment point.
    pub origin: Point3,
    /// Outward direction (any length; normalised on insertion).
    pub direction: Vector3,
    /// Cross-section profile.
    pub profile: Profile,
    /// Physical system family.
    pub domain: Domain,
    /// Connector kind.
    pub kind: ConnectorKind,
}

impl ConnectorSpec {
    /// Creates an end-connector spec.
    #[must_use]
    pub const fn end(origin: Point3, direction: Vector3, profile: Profile, domain: Domain) -> Self {
        Self {
            origin,
            direction,
            profile,
            domain,
            kind: ConnectorKind::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_profiles_match_within_tolerance() {
        let a = Profile::Round { radius: 0.25 };
        let b = Profile::Round { radius: 0.255 };
        assert!(a.matches(&b));
        assert!(b.matches(&a));
    }

    #[test]
    fn round_profiles_reject_above_tolerance() {
        let a = Profile::Round { radius: 0.25 };
        let b = Profile::Round { radius: 0.27 };
        assert!(!a.matches(&b));
    }

    #[test]
    fn rectangular_needs_both_dimensions() {
        let a = Profile::Rectangular { width: 1.0, height: 0.5 };
        let near = Profile::Rectangular { width: 1.005, height: 0.495 };
        let off = Profile::Rectangular { width: 1.0, height: 0.55 };
        assert!(a.matches(&near));
        assert!(!a.matches(&off));
    }

    #[test]
    fn cross_shape_never_matches() {
        let round = Profile::Round { radius: 0.5 };
        let rect = Profile::Rectangular { width: 1.0, height: 1.0 };
        let oval = Profile::Oval { width: 1.0, height: 1.0 };
        assert!(!round.matches(&rect));
        assert!(!rect.matches(&oval));
        assert!(!oval.matches(&round));
    }

    #[test]
    fn match_is_symmetric() {
        let profiles = [
            Profile::Round { radius: 0.3 },
            Profile::Round { radius: 0.31 },
            Profile::Rectangular { width: 2.0, height: 1.0 },
            Profile::Oval { width: 2.0, height: 1.0 },
        ];
        for a in &profiles {
            for b in &profiles {
                assert_eq!(a.matches(b), b.matches(a), "{a:?} vs {b:?}");
            }
        }
    }
}
