//! Pair finding: turning a flat list of split points into disjoint
//! splice pairs.

use indexmap::IndexMap;

use crate::host::ElementId;

use super::SplitPoint;

/// Two split points on the same host segment, selected as the entry and
/// exit of one repair. Ephemeral, like the split points themselves.
#[derive(Debug, Clone)]
pub struct SplicePair {
    /// One side of the splice.
    pub first: SplitPoint,
    /// The other side.
    pub second: SplitPoint,
}

impl SplicePair {
    /// Distance between the two split-point origins.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.first.origin().distance_to(self.second.origin())
    }

    /// The host segment both split points land on.
    #[must_use]
    pub const fn host(&self) -> ElementId {
        self.first.host
    }
}

/// Selects at most one splice pair per host segment.
///
/// Split points are grouped by host segment; a group of one is an
/// isolated touch point and cannot be spliced. Within each group every
/// unordered pair is tested: it qualifies when the two endpoints face
/// each other within the angular tolerance, and among qualifying pairs
/// the one with the smallest origin distance wins. Ties keep the first
/// qualifying pair encountered, so the result is deterministic for a
/// fixed input order.
#[must_use]
pub fn find_pairs(splits: Vec<SplitPoint>) -> Vec<SplicePair> {
    let mut groups: IndexMap<ElementId, Vec<SplitPoint>> = IndexMap::new();
    for split in splits {
        groups.entry(split.host).or_default().push(split);
    }

    let mut pairs = Vec::new();
    for (host, group) in groups {
        if group.len() < 2 {
            tracing::debug!(%host, "isolated touch point; nothing to splice");
            continue;
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                if !group[i].endpoint.is_opposite(&group[j].endpoint) {
                    continue;
                }
                let distance = group[i].origin().distance_to(group[j].origin());
                if best.map_or(true, |(_, _, smallest)| distance < smallest) {
                    best = Some((i, j, distance));
                }
            }
        }

        if let Some((i, j, distance)) = best {
            tracing::debug!(%host, distance, "selected splice pair");
            pairs.push(SplicePair {
                first: group[i].clone(),
                second: group[j].clone(),
            });
        }
    }
    pairs
}
