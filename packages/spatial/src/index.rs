//! R-tree over trail envelopes.
//!
//! Per-region clipping only needs to look at trails whose bounding box
//! intersects the region's bounding box; everything else clips to nothing.

use geo::BoundingRect;
use rstar::{AABB, RTree, RTreeObject};

use crate::{ClosedRegion, OpenPath};

/// A trail's position in the caller's list, stored with its envelope.
struct TrailEntry {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for TrailEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index of trail paths, keyed by their position in the list the
/// index was built from.
pub struct TrailIndex {
    tree: RTree<TrailEntry>,
}

impl TrailIndex {
    /// Bulk-loads `(position, path)` pairs.
    pub fn build<'a>(paths: impl IntoIterator<Item = (usize, &'a OpenPath)>) -> Self {
        let entries: Vec<TrailEntry> = paths
            .into_iter()
            .filter_map(|(position, path)| {
                let rect = path.line_string().bounding_rect()?;
                Some(TrailEntry {
                    position,
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();

        log::debug!("Indexed {} trail envelope(s)", entries.len());

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Positions of trails whose envelope intersects the region's
    /// envelope, in ascending order.
    #[must_use]
    pub fn candidates(&self, region: &ClosedRegion) -> Vec<usize> {
        let Some(rect) = region.polygon().bounding_rect() else {
            return Vec::new();
        };
        let query = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.position)
            .collect();
        positions.sort_unstable();
        positions
    }
}
