//! Segment and fitting wrappers.

use crate::geometry::{Line3, Point3, Vector3};
use crate::host::{ConnectorKind, Element, ElementId, HostError, HostResult};

use super::Endpoint;

/// Wrapper over a straight linear network member.
///
/// Holds a snapshot of the element's line and its two end connectors,
/// ordered so that [`Segment::first`] is the endpoint nearest the line's
/// start and [`Segment::second`] the one nearest its end. The snapshot
/// goes stale when the underlying element is re-cut; re-wrap it via
/// [`super::Inventory::refresh`].
#[derive(Debug, Clone)]
pub struct Segment {
    id: ElementId,
    line: Line3,
    axis: Vector3,
    endpoints: [Endpoint; 2],
}

impl Segment {
    /// Wraps a linear element.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NotACurve`] for a fitting body and
    /// [`HostError::InvalidGeometry`] for a degenerate line or a
    /// connector layout without exactly two end connectors.
    pub fn wrap(element: &Element) -> HostResult<Self> {
        let line = element.line().ok_or(HostError::NotACurve { id: element.id })?;
        let axis = line.direction().ok_or_else(|| {
            HostError::invalid_geometry(format!("segment {} has a zero-length line", element.id))
        })?;

        let ends: Vec<(usize, &crate::host::Connector)> = element
            .connectors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ConnectorKind::End)
            .collect();
        let [a, b] = ends[..] else {
            return Err(HostError::invalid_geometry(format!(
                "segment {} must carry exactly two end connectors",
                element.id
            )));
        };

        let (near_start, near_end) = if a.1.origin.distance_squared_to(line.start())
            <= b.1.origin.distance_squared_to(line.start())
        {
            (a, b)
        } else {
            (b, a)
        };

        Ok(Self {
            id: element.id,
            line,
            axis,
            endpoints: [
                Endpoint::capture(element.id, near_start.0, near_start.1),
                Endpoint::capture(element.id, near_end.0, near_end.1),
            ],
        })
    }

    /// The wrapped element's id.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// The location line.
    #[must_use]
    pub const fn line(&self) -> Line3 {
        self.line
    }

    /// Unit direction of the line, start to end.
    #[must_use]
    pub const fn axis(&self) -> Vector3 {
        self.axis
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.line.length()
    }

    /// Endpoint nearest the line's start.
    #[must_use]
    pub const fn first(&self) -> &Endpoint {
        &self.endpoints[0]
    }

    /// Endpoint nearest the line's end.
    #[must_use]
    pub const fn second(&self) -> &Endpoint {
        &self.endpoints[1]
    }

    /// Both endpoints, first then second.
    #[must_use]
    pub const fn endpoints(&self) -> &[Endpoint; 2] {
        &self.endpoints
    }

    /// The endpoint whose origin is nearer to `point`.
    #[must_use]
    pub fn endpoint_near(&self, point: Point3) -> &Endpoint {
        if self.endpoints[0].origin().distance_squared_to(point)
            <= self.endpoints[1].origin().distance_squared_to(point)
        {
            &self.endpoints[0]
        } else {
            &self.endpoints[1]
        }
    }
}

/// Wrapper over a fitting (elbow, tee, equipment).
#[derive(Debug, Clone)]
pub struct Fitting {
    id: ElementId,
    endpoints: Vec<Endpoint>,
}

impl Fitting {
    /// Wraps a fitting element.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidGeometry`] for a linear element,
    /// which should be wrapped as a [`Segment`] instead.
    pub fn wrap(element: &Element) -> HostResult<Self> {
        if element.line().is_some() {
            return Err(HostError::invalid_geometry(format!(
                "element {} is linear; wrap it as a segment",
                element.id
            )));
        }
        let endpoints = element
            .connectors
            .iter()
            .enumerate()
            .map(|(index, connector)| Endpoint::capture(element.id, index, connector))
            .collect();
        Ok(Self {
            id: element.id,
            endpoints,
        })
    }

    /// The wrapped element's id.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// All endpoints of the fitting.
    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}

/// A network member of either kind, with uniform endpoint access.
#[derive(Debug, Clone)]
pub enum NetworkMember {
    /// A straight linear member.
    Segment(Segment),
    /// A fitting.
    Fitting(Fitting),
}

impl NetworkMember {
    /// Wraps any element with connectors.
    ///
    /// # Errors
    ///
    /// Propagates the wrapping errors of [`Segment::wrap`] and
    /// [`Fitting::wrap`].
    pub fn wrap(element: &Element) -> HostResult<Self> {
        if element.line().is_some() {
            Segment::wrap(element).map(Self::Segment)
        } else {
            Fitting::wrap(element).map(Self::Fitting)
        }
    }

    /// The wrapped element's id.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        match self {
            Self::Segment(s) => s.id(),
            Self::Fitting(f) => f.id(),
        }
    }

    /// All endpoints of the member.
    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        match self {
            Self::Segment(s) => s.endpoints(),
            Self::Fitting(f) => f.endpoints(),
        }
    }
}
