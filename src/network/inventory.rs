//! The working-set inventory of network segments.

use indexmap::IndexMap;

use crate::host::{Document, ElementId, HostResult};

use super::Segment;

/// The set of segment wrappers for one duplication operation.
///
/// Built once before the first offset step, then kept current for the
/// rest of the operation: re-cut hosts are refreshed in place and
/// bridging segments synthesised during repair are registered, so later
/// offset steps splice against the network as it now stands.
#[derive(Debug, Default)]
pub struct Inventory {
    segments: IndexMap<ElementId, Segment>,
}

impl Inventory {
    /// Builds the inventory from every linear member of the document.
    ///
    /// Insulation and lining wrappers are not splice-relevant and are
    /// filtered out. Members that cannot be wrapped (no straight-line
    /// body, unexpected connector layout) are skipped with a debug
    /// event rather than failing the operation.
    #[must_use]
    pub fn build(doc: &Document) -> Self {
        let mut segments = IndexMap::new();
        for element in doc.elements() {
            if element.category.is_insulation() || element.line().is_none() {
                continue;
            }
            match Segment::wrap(element) {
                Ok(segment) => {
                    segments.insert(element.id, segment);
                }
                Err(error) => {
                    tracing::debug!(id = %element.id, %error, "skipping member");
                }
            }
        }
        tracing::debug!(count = segments.len(), "built network inventory");
        Self { segments }
    }

    /// Registers a freshly created segment (e.g. a bridging segment) so
    /// subsequent splice passes can see it.
    pub fn register(&mut self, segment: Segment) {
        self.segments.insert(segment.id(), segment);
    }

    /// Re-wraps a segment after its element was re-cut.
    ///
    /// # Errors
    ///
    /// Returns an error when the element no longer exists or can no
    /// longer be wrapped.
    pub fn refresh(&mut self, doc: &Document, id: ElementId) -> HostResult<()> {
        let segment = Segment::wrap(doc.element(id)?)?;
        self.segments.insert(id, segment);
        Ok(())
    }

    /// Looks up a segment wrapper by element id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// Returns an iterator over the segments, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Number of segments in the inventory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the inventory holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
