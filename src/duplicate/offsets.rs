//! Offset generation for the three copy policies.

use crate::geometry::{Line3, Point3, Vector3};
use crate::host::{Body, Document, ElementId, HostError, HostResult, Level};

/// Offsets for a per-level copy: each selected level gets one offset
/// lifting the batch's lowest bound onto the level elevation.
///
/// # Errors
///
/// Returns an error for an unknown id or an empty batch.
pub fn level_offsets(
    doc: &Document,
    batch: &[ElementId],
    levels: &[Level],
) -> HostResult<Vec<Vector3>> {
    let bbox = doc.bounding_box_of(batch)?;
    Ok(levels
        .iter()
        .map(|level| Vector3::new(0.0, 0.0, level.elevation - bbox.min.z))
        .collect())
}

/// Offsets for a fixed-step vertical copy: `step * i` for each enabled
/// direction, upward steps first.
#[must_use]
pub fn step_offsets(step: f64, count: u32, upward: bool, downward: bool) -> Vec<Vector3> {
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let mut offsets = Vec::new();
    for i in 1..=count {
        if upward {
            offsets.push(Vector3::UP * (step * f64::from(i)));
        }
    }
    for i in 1..=count {
        if downward {
            offsets.push(Vector3::UP * (-step * f64::from(i)));
        }
    }
    offsets
}

/// Offsets for a copy along a picked reference line.
///
/// The direction is the reference line's, oriented toward the farthest
/// projection of the batch geometry onto that line. Without an explicit
/// step, the batch's extent along the direction is used, so successive
/// copies tile without overlap.
///
/// # Errors
///
/// Returns an error for a degenerate reference line, an unknown id, or
/// when no positive step distance can be inferred.
pub fn direction_offsets(
    doc: &Document,
    batch: &[ElementId],
    reference: &Line3,
    step: Option<f64>,
    count: u32,
) -> HostResult<Vec<Vector3>> {
    let direction = reference
        .direction()
        .ok_or_else(|| HostError::invalid_geometry("reference line has zero length"))?;

    let length = reference.length();
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for &id in batch {
        for point in element_points(doc, id)? {
            let t = reference.closest_parameter(point) * length;
            t_min = t_min.min(t);
            t_max = t_max.max(t);
        }
    }
    if t_min > t_max {
        return Err(HostError::invalid_geometry(
            "batch has no geometry to project onto the reference",
        ));
    }

    let step = step.unwrap_or(t_max - t_min);
    if !step.is_finite() || step <= 0.0 {
        return Err(HostError::invalid_geometry(
            "cannot infer a positive step distance",
        ));
    }

    let direction = if t_max.abs() >= t_min.abs() {
        direction
    } else {
        -direction
    };
    Ok((1..=count)
        .map(|i| direction * (step * f64::from(i)))
        .collect())
}

/// Representative geometry points of an element for projection.
fn element_points(doc: &Document, id: ElementId) -> HostResult<Vec<Point3>> {
    let element = doc.element(id)?;
    let mut points: Vec<Point3> = match element.body {
        Body::Linear { line } => vec![line.start(), line.end()],
        Body::Fitting { origin } => vec![origin],
    };
    points.extend(element.connectors.iter().map(|c| c.origin));
    Ok(points)
}
