//! Split-point detection.
//!
//! A split point marks where a freshly duplicated member's open end
//! lands in the interior of an existing segment: the place a previously
//! continuous run must be cut so the duplicate can be spliced in.

use crate::geometry::Point3;
use crate::host::{Document, ElementId, HostResult};
use crate::network::{Endpoint, Inventory, NetworkMember, Segment};

/// Positional tolerance for interior coincidence, in internal length
/// units.
pub(crate) const COINCIDENCE_TOLERANCE: f64 = 1.0e-4;

/// An open endpoint of a duplicated member lying on the interior of an
/// existing segment. Ephemeral: lives for one duplication pass.
#[derive(Debug, Clone)]
pub struct SplitPoint {
    /// The open endpoint.
    pub endpoint: Endpoint,
    /// The inventory segment it lands on.
    pub host: ElementId,
}

impl SplitPoint {
    /// Position of the split point.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        self.endpoint.origin()
    }
}

/// True when `point` lies on the segment's interior: farther than the
/// coincidence tolerance from both extremities, projecting within the
/// line's bound, and within the same tolerance of the line itself.
#[must_use]
pub fn is_on_interior(point: Point3, segment: &Segment) -> bool {
    let line = segment.line();
    if point.distance_to(line.start()) <= COINCIDENCE_TOLERANCE
        || point.distance_to(line.end()) <= COINCIDENCE_TOLERANCE
    {
        return false;
    }
    let t = line.closest_parameter(point);
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    line.distance_to_axis(point) <= COINCIDENCE_TOLERANCE
}

/// Finds the split points produced by one duplication step.
///
/// Every open terminal endpoint of every duplicated element is tested
/// against every inventory segment with a different owner. An endpoint
/// yields at most one split point, on the first segment it coincides
/// with.
///
/// # Errors
///
/// Returns an error when one of the duplicate ids is unknown.
pub fn find_split_points(
    doc: &Document,
    duplicates: &[ElementId],
    inventory: &Inventory,
) -> HostResult<Vec<SplitPoint>> {
    let mut splits = Vec::new();

    for &id in duplicates {
        let element = doc.element(id)?;
        if element.category.is_insulation() {
            continue;
        }
        let member = match NetworkMember::wrap(element) {
            Ok(member) => member,
            Err(error) => {
                tracing::debug!(%id, %error, "skipping unwrappable duplicate");
                continue;
            }
        };

        for endpoint in member.endpoints() {
            if !endpoint.is_terminal() || endpoint.is_connected() {
                continue;
            }
            for segment in inventory.iter() {
                if segment.id() == endpoint.owner() {
                    continue;
                }
                if !is_on_interior(endpoint.origin(), segment) {
                    continue;
                }
                if !endpoint.profile_matches(segment.endpoint_near(endpoint.origin())) {
                    continue;
                }
                splits.push(SplitPoint {
                    endpoint: endpoint.clone(),
                    host: segment.id(),
                });
                break;
            }
        }
    }

    tracing::debug!(count = splits.len(), "detected split points");
    Ok(splits)
}
