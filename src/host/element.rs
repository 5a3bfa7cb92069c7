//! Document elements: linear members and fittings.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Line3, Point3};

use super::{Connector, ElementId};

/// Host element category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Pipe run.
    Pipe,
    /// Duct run.
    Duct,
    /// Pipe elbow/tee/transition.
    PipeFitting,
    /// Duct elbow/tee/transition.
    DuctFitting,
    /// Insulation wrapped around a pipe.
    PipeInsulation,
    /// Insulation wrapped around a duct.
    DuctInsulation,
    /// Lining inside a duct.
    DuctLining,
}

impl Category {
    /// True for the wrapper categories (insulation and lining) that
    /// follow their host geometry and are never splice candidates.
    #[must_use]
    pub const fn is_insulation(self) -> bool {
        matches!(
            self,
            Self::PipeInsulation | Self::DuctInsulation | Self::DuctLining
        )
    }
}

/// Geometric body of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Body {
    /// A straight run located by a bounded line.
    Linear {
        /// The location line.
        line: Line3,
    },
    /// A fitting located by its insertion point.
    Fitting {
        /// Insertion point.
        origin: Point3,
    },
}

/// An element of the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Document-assigned id.
    pub id: ElementId,
    /// Host category.
    pub category: Category,
    /// Geometric body.
    pub body: Body,
    /// Connectors, indexed by position in this list.
    pub connectors: Vec<Connector>,
}

impl Element {
    /// The location line, when the element has a straight-line body.
    #[must_use]
    pub const fn line(&self) -> Option<Line3> {
        match self.body {
            Body::Linear { line } => Some(line),
            Body::Fitting { .. } => None,
        }
    }

    /// Axis-aligned bounding box of the element's body.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        match self.body {
            Body::Linear { line } => line.bounding_box(),
            Body::Fitting { origin } => BoundingBox::from_point(origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insulation_categories() {
        assert!(Category::PipeInsulation.is_insulation());
        assert!(Category::DuctInsulation.is_insulation());
        assert!(Category::DuctLining.is_insulation());
        assert!(!Category::Pipe.is_insulation());
        assert!(!Category::DuctFitting.is_insulation());
    }
}
