//! The in-memory host document.
//!
//! Holds the element table and implements the platform primitives the
//! engine drives: element builders, the translate-copy primitive,
//! in-place segment re-cutting, and connector link maintenance.
//!
//! # Copy contract
//!
//! [`Document::copy_elements`] produces exactly one duplicate per source
//! id with identical relative topology: links between two copied elements
//! are remapped onto their duplicates, links that leave the copied set
//! are severed on the duplicate (the source keeps its own link). It is
//! this severing that creates the open endpoints the splice passes look
//! for.
//!
//! # Re-cut contract
//!
//! [`Document::set_segment_line`] mutates the existing element id rather
//! than deleting and recreating it; any cached wrapper over the element
//! is stale afterwards and must be refreshed.

use indexmap::IndexMap;

use crate::geometry::{BoundingBox, Line3, Point3, Vector3};

use super::element::{Body, Category, Element};
use super::error::{HostError, HostResult};
use super::{Connector, ConnectorKind, ConnectorRef, ConnectorSpec, Domain, ElementId, Profile};

/// Snapshot of everything a transaction must be able to restore.
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentState {
    /// Element table. Insertion order is the iteration order the
    /// detection pass sees, which keeps tie-breaks deterministic.
    pub(crate) elements: IndexMap<ElementId, Element>,
    /// Next id to allocate.
    pub(crate) next_id: i64,
}

/// An in-memory host document.
#[derive(Debug, Default)]
pub struct Document {
    pub(crate) state: DocumentState,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> ElementId {
        self.state.next_id += 1;
        ElementId::new(self.state.next_id)
    }

    /// Returns the number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.elements.len()
    }

    /// Returns true if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.elements.is_empty()
    }

    /// Looks up an element by id.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ElementNotFound`] for an unknown id.
    pub fn element(&self, id: ElementId) -> HostResult<&Element> {
        self.state.elements.get(&id).ok_or(HostError::not_found(id))
    }

    /// Returns an iterator over all elements, in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.state.elements.values()
    }

    /// Looks up a connector by reference.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown element or connector index.
    pub fn connector(&self, r: ConnectorRef) -> HostResult<&Connector> {
        self.element(r.element)?
            .connectors
            .get(r.index)
            .ok_or(HostError::ConnectorOutOfRange {
                id: r.element,
                index: r.index,
            })
    }

    /// Adds a straight segment with an end connector at each extremity.
    ///
    /// Both connectors take the segment's profile and domain; their
    /// directions point outward along the line axis.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidGeometry`] for a zero-length line.
    pub fn add_segment(
        &mut self,
        category: Category,
        domain: Domain,
        profile: Profile,
        line: Line3,
    ) -> HostResult<ElementId> {
        let dir = line
            .direction()
            .ok_or_else(|| HostError::invalid_geometry("zero-length segment line"))?;

        let id = self.alloc_id();
        let connectors = vec![
            Connector {
                origin: line.start(),
                direction: -dir,
                profile,
                domain,
                kind: ConnectorKind::End,
                linked: None,
            },
            Connector {
                origin: line.end(),
                direction: dir,
                profile,
                domain,
                kind: ConnectorKind::End,
                linked: None,
            },
        ];

        self.state.elements.insert(
            id,
            Element {
                id,
                category,
                body: Body::Linear { line },
                connectors,
            },
        );
        Ok(id)
    }

    /// Adds a fitting with the given connectors.
    ///
    /// Connector directions are normalised on insertion.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidGeometry`] when a connector direction
    /// has zero length.
    pub fn add_fitting(
        &mut self,
        category: Category,
        origin: Point3,
        specs: Vec<ConnectorSpec>,
    ) -> HostResult<ElementId> {
        let mut connectors = Vec::with_capacity(specs.len());
        for spec in specs {
            let direction = spec
                .direction
                .normalized()
                .ok_or_else(|| HostError::invalid_geometry("zero-length connector direction"))?;
            connectors.push(Connector {
                origin: spec.origin,
                direction,
                profile: spec.profile,
                domain: spec.domain,
                kind: spec.kind,
                linked: None,
            });
        }

        let id = self.alloc_id();
        self.state.elements.insert(
            id,
            Element {
                id,
                category,
                body: Body::Fitting { origin },
                connectors,
            },
        );
        Ok(id)
    }

    /// Links two open connectors to each other.
    ///
    /// # Errors
    ///
    /// Returns an error when either reference is invalid or either
    /// connector already has a mate.
    pub fn connect(&mut self, a: ConnectorRef, b: ConnectorRef) -> HostResult<()> {
        for r in [a, b] {
            let c = self.connector(r)?;
            if !c.is_open() {
                return Err(HostError::AlreadyConnected {
                    id: r.element,
                    index: r.index,
                });
            }
        }

        self.set_link(a, Some(b))?;
        self.set_link(b, Some(a))?;
        Ok(())
    }

    /// Opens a connector, clearing the mate's side of the link as well.
    /// A connector that is already open is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error when the reference is invalid.
    pub fn disconnect(&mut self, a: ConnectorRef) -> HostResult<()> {
        let mate = self.connector(a)?.linked;
        if let Some(mate) = mate {
            self.set_link(mate, None)?;
        }
        self.set_link(a, None)?;
        Ok(())
    }

    fn set_link(&mut self, r: ConnectorRef, link: Option<ConnectorRef>) -> HostResult<()> {
        let element = self
            .state
            .elements
            .get_mut(&r.element)
            .ok_or(HostError::not_found(r.element))?;
        let connector =
            element
                .connectors
                .get_mut(r.index)
                .ok_or(HostError::ConnectorOutOfRange {
                    id: r.element,
                    index: r.index,
                })?;
        connector.linked = link;
        Ok(())
    }

    /// Translate-copies a batch of elements.
    ///
    /// Produces exactly one duplicate per source id, in input order.
    /// Links between two copied elements are remapped onto the
    /// duplicates; links leaving the copied set are severed on the
    /// duplicate while the source element keeps its own link.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ElementNotFound`] for an unknown source id
    /// and [`HostError::CopyFailed`] for an empty batch.
    pub fn copy_elements(
        &mut self,
        ids: &[ElementId],
        offset: Vector3,
    ) -> HostResult<Vec<ElementId>> {
        if ids.is_empty() {
            return Err(HostError::CopyFailed {
                requested: 0,
                produced: 0,
            });
        }
        for &id in ids {
            self.element(id)?;
        }

        let mapping: IndexMap<ElementId, ElementId> =
            ids.iter().map(|&old| (old, self.alloc_id())).collect();

        for (&old_id, &new_id) in &mapping {
            let mut dup = self.state.elements[&old_id].clone();
            dup.id = new_id;
            match &mut dup.body {
                Body::Linear { line } => *line = line.translated(offset),
                Body::Fitting { origin } => *origin = origin.translated(offset),
            }
            for connector in &mut dup.connectors {
                connector.origin = connector.origin.translated(offset);
                connector.linked = connector.linked.and_then(|mate| {
                    mapping
                        .get(&mate.element)
                        .map(|&remapped| ConnectorRef::new(remapped, mate.index))
                });
            }
            self.state.elements.insert(new_id, dup);
        }

        let new_ids: Vec<ElementId> = mapping.values().copied().collect();
        tracing::debug!(count = new_ids.len(), "copied elements");
        Ok(new_ids)
    }

    /// Re-cuts a segment's location line in place.
    ///
    /// The element id is preserved. The end connector nearer the old
    /// start takes the new start extremity, its mate the new end; both
    /// get outward directions along the new axis. Links are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NotACurve`] for a fitting body and
    /// [`HostError::InvalidGeometry`] for a zero-length replacement line.
    pub fn set_segment_line(&mut self, id: ElementId, line: Line3) -> HostResult<()> {
        let dir = line
            .direction()
            .ok_or_else(|| HostError::invalid_geometry("zero-length segment line"))?;

        let element = self
            .state
            .elements
            .get_mut(&id)
            .ok_or(HostError::not_found(id))?;
        let old = match &mut element.body {
            Body::Linear { line: existing } => {
                let old = *existing;
                *existing = line;
                old
            }
            Body::Fitting { .. } => return Err(HostError::NotACurve { id }),
        };

        let ends: Vec<usize> = element
            .connectors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ConnectorKind::End)
            .map(|(i, _)| i)
            .collect();
        if let [a, b] = ends[..] {
            let a_from_start = element.connectors[a].origin.distance_squared_to(old.start());
            let b_from_start = element.connectors[b].origin.distance_squared_to(old.start());
            let (at_start, at_end) = if a_from_start <= b_from_start {
                (a, b)
            } else {
                (b, a)
            };
            element.connectors[at_start].origin = line.start();
            element.connectors[at_start].direction = -dir;
            element.connectors[at_end].origin = line.end();
            element.connectors[at_end].direction = dir;
        }
        Ok(())
    }

    /// Combined bounding box of a batch of elements.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id or an empty batch.
    pub fn bounding_box_of(&self, ids: &[ElementId]) -> HostResult<BoundingBox> {
        let mut combined: Option<BoundingBox> = None;
        for &id in ids {
            let bbox = self.element(id)?.bounding_box();
            combined = Some(match combined {
                Some(existing) => existing.union(&bbox),
                None => bbox,
            });
        }
        combined.ok_or_else(|| HostError::invalid_geometry("bounding box of empty batch"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(radius: f64) -> Profile {
        Profile::Round { radius }
    }

    fn pipe(doc: &mut Document, x1: f64, x2: f64) -> ElementId {
        doc.add_segment(
            Category::Pipe,
            Domain::Piping,
            round(0.25),
            Line3::new(Point3::new(x1, 0.0, 0.0), Point3::new(x2, 0.0, 0.0)),
        )
        .unwrap()
    }

    #[test]
    fn segment_gets_outward_end_connectors() {
        let mut doc = Document::new();
        let id = pipe(&mut doc, 0.0, 10.0);
        let element = doc.element(id).unwrap();

        assert_eq!(element.connectors.len(), 2);
        assert_eq!(element.connectors[0].origin, Point3::new(0.0, 0.0, 0.0));
        assert!((element.connectors[0].direction.x + 1.0).abs() < 1e-12);
        assert_eq!(element.connectors[1].origin, Point3::new(10.0, 0.0, 0.0));
        assert!((element.connectors[1].direction.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn connect_is_symmetric_and_rejects_busy_connectors() {
        let mut doc = Document::new();
        let a = pipe(&mut doc, 0.0, 10.0);
        let b = pipe(&mut doc, 10.0, 20.0);

        doc.connect(ConnectorRef::new(a, 1), ConnectorRef::new(b, 0))
            .unwrap();
        assert_eq!(
            doc.connector(ConnectorRef::new(a, 1)).unwrap().linked,
            Some(ConnectorRef::new(b, 0))
        );
        assert_eq!(
            doc.connector(ConnectorRef::new(b, 0)).unwrap().linked,
            Some(ConnectorRef::new(a, 1))
        );

        let c = pipe(&mut doc, 20.0, 30.0);
        let err = doc
            .connect(ConnectorRef::new(a, 1), ConnectorRef::new(c, 0))
            .unwrap_err();
        assert!(matches!(err, HostError::AlreadyConnected { .. }));
    }

    #[test]
    fn disconnect_opens_both_sides() {
        let mut doc = Document::new();
        let a = pipe(&mut doc, 0.0, 10.0);
        let b = pipe(&mut doc, 10.0, 20.0);
        doc.connect(ConnectorRef::new(a, 1), ConnectorRef::new(b, 0))
            .unwrap();

        doc.disconnect(ConnectorRef::new(b, 0)).unwrap();
        assert!(doc.connector(ConnectorRef::new(a, 1)).unwrap().is_open());
        assert!(doc.connector(ConnectorRef::new(b, 0)).unwrap().is_open());

        // Disconnecting an open connector is a no-op.
        doc.disconnect(ConnectorRef::new(b, 0)).unwrap();
    }

    #[test]
    fn copy_preserves_internal_links_and_severs_external_ones() {
        let mut doc = Document::new();
        let a = pipe(&mut doc, 0.0, 10.0);
        let b = pipe(&mut doc, 10.0, 20.0);
        let c = pipe(&mut doc, 20.0, 30.0);
        doc.connect(ConnectorRef::new(a, 1), ConnectorRef::new(b, 0))
            .unwrap();
        doc.connect(ConnectorRef::new(b, 1), ConnectorRef::new(c, 0))
            .unwrap();

        // Copy only a and b; the b-c link leaves the copied set.
        let new_ids = doc
            .copy_elements(&[a, b], Vector3::new(0.0, 5.0, 0.0))
            .unwrap();
        assert_eq!(new_ids.len(), 2);
        let (na, nb) = (new_ids[0], new_ids[1]);

        // Internal link remapped onto the duplicates.
        assert_eq!(
            doc.connector(ConnectorRef::new(na, 1)).unwrap().linked,
            Some(ConnectorRef::new(nb, 0))
        );
        // External link severed on the duplicate only.
        assert!(doc.connector(ConnectorRef::new(nb, 1)).unwrap().is_open());
        assert_eq!(
            doc.connector(ConnectorRef::new(b, 1)).unwrap().linked,
            Some(ConnectorRef::new(c, 0))
        );

        // Geometry translated.
        let line = doc.element(na).unwrap().line().unwrap();
        assert_eq!(line.start(), Point3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn copy_of_empty_batch_fails() {
        let mut doc = Document::new();
        let err = doc.copy_elements(&[], Vector3::ZERO).unwrap_err();
        assert!(matches!(
            err,
            HostError::CopyFailed {
                requested: 0,
                produced: 0
            }
        ));
    }

    #[test]
    fn recut_relocates_end_connectors() {
        let mut doc = Document::new();
        let id = pipe(&mut doc, 0.0, 10.0);

        doc.set_segment_line(
            id,
            Line3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)),
        )
        .unwrap();

        let element = doc.element(id).unwrap();
        assert_eq!(element.connectors[0].origin, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(element.connectors[1].origin, Point3::new(4.0, 0.0, 0.0));
        assert!((element.connectors[1].direction.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn recut_rejects_fittings() {
        let mut doc = Document::new();
        let id = doc
            .add_fitting(Category::PipeFitting, Point3::ORIGIN, Vec::new())
            .unwrap();
        let err = doc
            .set_segment_line(
                id,
                Line3::new(Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)),
            )
            .unwrap_err();
        assert!(matches!(err, HostError::NotACurve { .. }));
    }

    #[test]
    fn batch_bounding_box() {
        let mut doc = Document::new();
        let a = pipe(&mut doc, 0.0, 10.0);
        let b = doc
            .add_segment(
                Category::Pipe,
                Domain::Piping,
                round(0.25),
                Line3::new(Point3::new(0.0, 0.0, 4.0), Point3::new(2.0, 0.0, 8.0)),
            )
            .unwrap();

        let bbox = doc.bounding_box_of(&[a, b]).unwrap();
        assert_eq!(bbox.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max, Point3::new(10.0, 0.0, 8.0));
    }
}
