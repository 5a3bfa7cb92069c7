//! Splice repair: restoring a continuous run through a host segment.
//!
//! For a pair `(first, second)` on host `H`, the repair rebuilds the run
//! as
//!
//! ```text
//! [trimmed H] - [first] ... duplicated network ... [second] - [bridge] - [far mate]
//! ```
//!
//! `H` keeps the portion on `first`'s outward side and is re-cut so its
//! moved extremity lands exactly on `first`'s origin. The portion on
//! `second`'s side is rebuilt as a bridging segment: a zero-offset copy
//! of the trimmed host (inheriting its type, thickness and system)
//! re-cut between `second`'s origin and the host's original extremity on
//! that side. Whatever the host used to continue into beyond that
//! extremity (the far mate) is reconnected to the bridge's far end.

use crate::geometry::Line3;
use crate::host::{ConnectorKind, ConnectorRef, Document, ElementId, HostError, HostResult};
use crate::network::{Inventory, Segment};

use super::SplicePair;

/// Pairs whose origins are closer than this produce no bridging segment;
/// the degenerate splice is skipped outright. In internal length units.
const MIN_SPLICE_GAP: f64 = 0.1;

/// Splices the duplicated network into the pair's host segment.
///
/// Returns the id of the synthesised bridging segment, or `None` when
/// the pair was skipped (degenerate gap, or a pair whose endpoints do
/// not straddle the host axis).
///
/// # Errors
///
/// Propagates host failures (stale ids, busy connectors, re-cut of a
/// non-straight body). The caller is expected to roll back the enclosing
/// transaction on error.
pub fn repair(
    doc: &mut Document,
    inventory: &mut Inventory,
    pair: &SplicePair,
) -> HostResult<Option<ElementId>> {
    let gap = pair.gap();
    if gap < MIN_SPLICE_GAP {
        tracing::debug!(host = %pair.host(), gap, "degenerate splice pair skipped");
        return Ok(None);
    }

    let host_id = pair.host();
    let Some(host) = inventory.get(host_id) else {
        tracing::warn!(host = %host_id, "splice pair references a segment missing from the inventory");
        return Ok(None);
    };

    let line = host.line();
    let axis = host.axis();
    let first = &pair.first.endpoint;
    let second = &pair.second.endpoint;

    // Each split point faces the host extremity its side of the run
    // continues toward. The pair must straddle: one toward the start,
    // one toward the end.
    let first_toward_end = first.direction().dot(axis) > 0.0;
    let second_toward_end = second.direction().dot(axis) > 0.0;
    if first_toward_end == second_toward_end {
        tracing::debug!(host = %host_id, "splice pair does not straddle the host axis; skipped");
        return Ok(None);
    }

    // The host keeps the portion on `first`'s side; the extremity on
    // `second`'s side moves onto `first`'s origin. Capture that
    // extremity and its connector before anything moves.
    let (trimmed_line, moved_extremity) = if first_toward_end {
        (Line3::new(first.origin(), line.end()), line.start())
    } else {
        (Line3::new(line.start(), first.origin()), line.end())
    };
    let moved_ref = host.endpoint_near(moved_extremity).connector_ref();

    // The far mate: the terminal endpoint of a different owner that the
    // host's sacrificed extremity was connected to.
    let far_mate: Option<ConnectorRef> = match doc.connector(moved_ref)?.linked {
        Some(mate) if mate.element != host_id => {
            if doc.connector(mate)?.kind == ConnectorKind::End {
                Some(mate)
            } else {
                None
            }
        }
        _ => None,
    };

    // Trim the host and take `first` onto the exposed connector.
    doc.disconnect(moved_ref)?;
    doc.set_segment_line(host_id, trimmed_line)?;
    doc.connect(first.connector_ref(), moved_ref)?;

    // Synthesise the bridging segment: duplicate the trimmed host in
    // place, then re-cut it between `second`'s origin and the captured
    // original extremity.
    let bridge_id = doc
        .copy_elements(&[host_id], crate::geometry::Vector3::ZERO)?
        .first()
        .copied()
        .ok_or(HostError::CopyFailed {
            requested: 1,
            produced: 0,
        })?;
    let bridge_line = if first_toward_end {
        Line3::new(moved_extremity, second.origin())
    } else {
        Line3::new(second.origin(), moved_extremity)
    };
    doc.set_segment_line(bridge_id, bridge_line)?;

    let bridge = Segment::wrap(doc.element(bridge_id)?)?;
    let near_ref = bridge.endpoint_near(second.origin()).connector_ref();
    doc.connect(second.connector_ref(), near_ref)?;
    if let Some(mate) = far_mate {
        let far_ref = bridge.endpoint_near(moved_extremity).connector_ref();
        doc.connect(far_ref, mate)?;
    }

    // Both the trimmed host and the new bridge must be visible to later
    // splice passes in this operation.
    inventory.refresh(doc, host_id)?;
    inventory.register(Segment::wrap(doc.element(bridge_id)?)?);

    tracing::debug!(
        host = %host_id,
        bridge = %bridge_id,
        gap,
        far_mate = far_mate.is_some(),
        "spliced duplicated run into host segment"
    );
    Ok(Some(bridge_id))
}
