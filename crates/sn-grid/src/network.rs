//! The sensor registry and its adjacency.
//!
//! # Data layout
//!
//! Nodes are stored Structure-of-Arrays style and addressed by `NodeId`:
//!
//! ```text
//! node_pos[id]    : Cartesian position, computed once at build time
//! node_axial[id]  : (q, r) address
//! adjacency[id]   : [Option<NodeId>; 6], indexed by Direction::index()
//! ```
//!
//! Neighbor links are plain `NodeId`s into this registry, never owning
//! references, so a rebuild that discards the whole `HexGrid` cannot leave
//! a dangling link behind.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(x, y)` to `NodeId`.  It answers both the
//! selection hit-test and the per-wave "every node within the final radius"
//! scan without an O(nodes) pass.

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use sn_core::{NodeId, Point, SimConfig, Viewport};

use crate::{Axial, Direction, GridError, GridResult};

/// Largest accepted `ceil(max_dimension / spacing)`.  Beyond this the
/// candidate square holds over four million cells.
const MAX_AXIAL_RADIUS: i64 = 1_000;

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── GridParams ────────────────────────────────────────────────────────────────

/// Geometry inputs for [`HexGrid::build`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridParams {
    pub viewport:   Viewport,
    pub spacing_px: f64,
    pub margin_px:  f64,
}

impl GridParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            viewport:   config.viewport,
            spacing_px: config.spacing_px(),
            margin_px:  config.margin_px,
        }
    }

    fn validate(&self) -> GridResult<()> {
        if !self.viewport.is_valid() {
            return Err(GridError::InvalidViewport {
                width:  self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.spacing_px.is_finite() || self.spacing_px <= 0.0 {
            return Err(GridError::InvalidSpacing(self.spacing_px));
        }
        let min_dim = self.viewport.width.min(self.viewport.height);
        if !self.margin_px.is_finite() || self.margin_px < 0.0 || 2.0 * self.margin_px >= min_dim {
            return Err(GridError::InvalidMargin(self.margin_px));
        }
        Ok(())
    }
}

// ── HexGrid ───────────────────────────────────────────────────────────────────

/// The full sensor network: registry, adjacency, and spatial index.
///
/// Do not construct directly; use [`HexGrid::build`].  The grid is immutable
/// after construction; changing spacing or viewport means building a new one.
pub struct HexGrid {
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// Axial address of each node.  Indexed by `NodeId`.
    pub node_axial: Vec<Axial>,

    adjacency:   Vec<[Option<NodeId>; 6]>,
    registry:    HashMap<Axial, NodeId>,
    spatial_idx: RTree<NodeEntry>,
    params:      GridParams,
}

impl HexGrid {
    /// Lay out nodes over the axial square `[-radius, radius]²` with
    /// `radius = ceil(max_dimension / spacing)`, keep those inside the inset
    /// viewport, then link every node to its existing neighbors.
    ///
    /// # Errors
    ///
    /// Any invalid parameter is rejected before a single node is created.
    pub fn build(params: &GridParams) -> GridResult<HexGrid> {
        params.validate()?;

        let radius = (params.viewport.max_dimension() / params.spacing_px).ceil() as i64;
        if radius > MAX_AXIAL_RADIUS {
            return Err(GridError::TooDense { radius, limit: MAX_AXIAL_RADIUS });
        }
        let radius = radius as i32;
        let center = params.viewport.center();

        let mut node_pos   = Vec::new();
        let mut node_axial = Vec::new();
        let mut registry   = HashMap::new();

        for q in -radius..=radius {
            for r in -radius..=radius {
                let axial = Axial::new(q, r);
                let pos = axial.to_pixel(params.spacing_px, center);
                if !params.viewport.contains_inset(pos, params.margin_px) {
                    continue;
                }
                let id = NodeId(node_pos.len() as u32);
                node_pos.push(pos);
                node_axial.push(axial);
                registry.insert(axial, id);
            }
        }

        // Second pass: link along the six directions, in table order.
        let adjacency: Vec<[Option<NodeId>; 6]> = node_axial
            .iter()
            .map(|&axial| {
                let mut links = [None; 6];
                for dir in Direction::ALL {
                    links[dir.index()] = registry.get(&axial.step(dir)).copied();
                }
                links
            })
            .collect();

        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, p)| NodeEntry { point: [p.x, p.y], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        debug!(nodes = node_pos.len(), radius, spacing_px = params.spacing_px, "hex grid built");

        Ok(HexGrid {
            node_pos,
            node_axial,
            adjacency,
            registry,
            spatial_idx,
            params: *params,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// Iterator over all `NodeId`s in ascending index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_pos.len() as u32).map(NodeId)
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    #[inline]
    pub fn axial(&self, node: NodeId) -> Axial {
        self.node_axial[node.index()]
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Registry lookups ──────────────────────────────────────────────────

    pub fn by_axial(&self, axial: Axial) -> Option<NodeId> {
        self.registry.get(&axial).copied()
    }

    /// Look a node up by its `"q,r"` key.
    pub fn by_key(&self, key: &str) -> GridResult<Option<NodeId>> {
        let axial: Axial = key.parse()?;
        Ok(self.by_axial(axial))
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    #[inline]
    pub fn neighbor(&self, node: NodeId, dir: Direction) -> Option<NodeId> {
        self.adjacency[node.index()][dir.index()]
    }

    /// Linked neighbors of `node` in direction-table order.  At most six.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(node, dir).map(|n| (dir, n)))
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].iter().flatten().count()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest to `pos`, if it lies within `hit_radius` pixels.
    ///
    /// Returns `None` both for an empty grid and for a point that misses
    /// every node's hitbox; neither is an error.
    pub fn find_node(&self, pos: Point, hit_radius: f64) -> Option<NodeId> {
        let entry = self.spatial_idx.nearest_neighbor(&[pos.x, pos.y])?;
        (entry.distance_2(&[pos.x, pos.y]) <= hit_radius * hit_radius).then_some(entry.id)
    }

    /// Every node strictly closer than `radius` to `center`, paired with its
    /// distance.  Sorted by ascending `NodeId`.
    pub fn nodes_within(&self, center: Point, radius: f64) -> Vec<(NodeId, f64)> {
        if radius.is_nan() || radius <= 0.0 {
            return Vec::new();
        }
        let mut hits: Vec<(NodeId, f64)> = self
            .spatial_idx
            .locate_within_distance([center.x, center.y], radius * radius)
            .map(|e| (e.id, center.distance(Point::new(e.point[0], e.point[1]))))
            .filter(|&(_, d)| d < radius)
            .collect();
        hits.sort_unstable_by_key(|&(id, _)| id);
        hits
    }
}
