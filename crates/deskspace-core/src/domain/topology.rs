//! Display topology resolution: physical monitor bounds → unified logical space.
//!
//! Every monitor reports its bounds in physical pixels and carries its own
//! scale factor.  Dividing each monitor's bounds by its own scale is not enough:
//! a 2x monitor at physical x=2000 to the right of a 1x monitor that is 2000
//! pixels wide must start at logical x=2000, not x=1000.  The logical position
//! of a monitor therefore depends on the monitor it is attached to.
//!
//! # Algorithm
//!
//! 1. **Root selection** – the monitor whose raw placement is at the origin
//!    (or, failing that, the one nearest to it) anchors the logical space.  Its
//!    logical bounds are simply its physical bounds divided by its scale.
//! 2. **Traversal** – starting at the root, every not-yet-visited monitor that
//!    *touches* the current one (shares an edge coordinate in physical space)
//!    becomes its child.  Children are visited depth-first in enumeration
//!    order, so each monitor is resolved exactly once and always after its
//!    parent.
//! 3. **Placement** – a child's logical size is its physical size divided by
//!    its own scale.  Its position is glued to the edge of the parent it
//!    touches; the coordinate along that edge is divided by the *parent's*
//!    scale so both sides of the shared edge agree.
//!
//! # Enumeration order
//!
//! A monitor is adopted by the first resolved monitor it touches.  When every
//! monitor has exactly one candidate parent the result does not depend on the
//! order the platform enumerated them in.  When a monitor touches two
//! monitors that are both resolved before it (for example one beside it and
//! one above it), the one visited first becomes its parent, and the two
//! parents can glue it to different logical positions.
//!
//! The traversal forms a spanning tree over the touching relation.  A monitor
//! that the tree never reaches is a configuration error
//! ([`TopologyError::DisconnectedTopology`]) rather than a silently zeroed
//! record.

use thiserror::Error;
use tracing::{debug, error};

use super::display::{Display, RawDisplay};
use super::geometry::{approximately_equal, Point, Rect};

/// Errors that can occur while resolving a display topology.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TopologyError {
    /// No display records were supplied.
    #[error("cannot resolve an empty display topology")]
    EmptyTopology,

    /// A record's scale factor is zero, negative, or not finite.
    #[error("display {index} has invalid scale factor {scale}")]
    InvalidScale { index: usize, scale: f64 },

    /// A record does not touch any display reachable from the root.
    #[error("display {index} is not connected to the root display")]
    DisconnectedTopology { index: usize },

    /// A child was attached to a parent it shares no edge with.
    ///
    /// The traversal only links touching displays, so this indicates a bug in
    /// the resolver rather than bad input.
    #[error("display {child} was attached to display {parent} but shares no edge with it")]
    NoMatchingEdge { child: usize, parent: usize },
}

/// Which side of an anchor rectangle another rectangle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Above,
    Below,
}

/// Returns the side of `anchor` that `other` touches, if any.
///
/// Sides are checked in the order left, right, above, below and the first
/// match wins, so a rectangle that meets `anchor` only at a corner resolves to
/// a horizontal neighbour.  Only edge coordinates are compared: the two edges
/// do not need to overlap along the perpendicular axis.
pub fn touching_side(anchor: &Rect, other: &Rect) -> Option<Side> {
    if approximately_equal(other.right(), anchor.x) {
        Some(Side::Left)
    } else if approximately_equal(other.x, anchor.right()) {
        Some(Side::Right)
    } else if approximately_equal(other.bottom(), anchor.y) {
        Some(Side::Above)
    } else if approximately_equal(other.y, anchor.bottom()) {
        Some(Side::Below)
    } else {
        None
    }
}

/// Returns `true` if the two rectangles share an edge coordinate.
pub fn are_touching(a: &Rect, b: &Rect) -> bool {
    touching_side(a, b).is_some()
}

/// Picks the index of the display that anchors the logical origin.
///
/// The first display whose raw placement starts exactly at `(0, 0)` wins.  If
/// none does (e.g. a virtual desktop with negative coordinates), the display
/// whose raw top-left is nearest the origin is chosen, ties going to the
/// earlier record.
///
/// # Errors
///
/// Returns [`TopologyError::EmptyTopology`] if `displays` is empty.
pub fn select_root(displays: &[RawDisplay]) -> Result<usize, TopologyError> {
    if displays.is_empty() {
        return Err(TopologyError::EmptyTopology);
    }

    if let Some(index) = displays
        .iter()
        .position(|d| d.raw_placement.top_left().is_origin())
    {
        return Ok(index);
    }

    let mut root = 0;
    let mut min_distance = f64::MAX;
    for (index, display) in displays.iter().enumerate() {
        let distance = display.raw_placement.top_left().distance_from(Point::ORIGIN);
        if distance < min_distance {
            min_distance = distance;
            root = index;
        }
    }
    Ok(root)
}

/// Resolves the logical bounds of every display in `displays`.
///
/// The returned records are in the same order as the input.
///
/// # Errors
///
/// See [`TopologyError`].
pub fn resolve(displays: &[RawDisplay]) -> Result<Vec<Display>, TopologyError> {
    TopologyResolver::new(displays).resolve().map(|t| t.displays)
}

/// A resolved topology plus the spanning tree that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTopology {
    /// Resolved records, in enumeration order.
    pub displays: Vec<Display>,
    /// Index of the root display.
    pub root: usize,
    /// `parents[i]` is the index of the display `i` was positioned against.
    /// The root is its own parent.
    pub parents: Vec<usize>,
}

/// Per-display scratch state for one resolution pass.
#[derive(Debug, Clone, Copy, Default)]
struct TopologyNode {
    is_root: bool,
    /// Index of the resolving parent; the root points at itself.
    parent: Option<usize>,
    /// Valid once the node has been visited.
    logical_area: Rect,
}

/// One resolution pass over a borrowed sequence of raw records.
///
/// Nodes live in an arena indexed by record position, so parent links are
/// plain indices.
pub struct TopologyResolver<'a> {
    displays: &'a [RawDisplay],
    nodes: Vec<TopologyNode>,
}

impl<'a> TopologyResolver<'a> {
    pub fn new(displays: &'a [RawDisplay]) -> Self {
        Self {
            displays,
            nodes: vec![TopologyNode::default(); displays.len()],
        }
    }

    /// Runs the pass, consuming the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyTopology`] for no records,
    /// [`TopologyError::InvalidScale`] for an unusable scale factor, and
    /// [`TopologyError::DisconnectedTopology`] naming the first record the
    /// traversal could not reach.
    pub fn resolve(mut self) -> Result<ResolvedTopology, TopologyError> {
        if self.displays.is_empty() {
            return Err(TopologyError::EmptyTopology);
        }
        for (index, display) in self.displays.iter().enumerate() {
            if !display.has_valid_scale() {
                return Err(TopologyError::InvalidScale {
                    index,
                    scale: display.scale,
                });
            }
        }

        if let [only] = self.displays {
            // Nothing to be adjacent to: the record is its own root.
            let logical = only.raw_placement / only.scale;
            let user = only.user_area / only.scale;
            return Ok(ResolvedTopology {
                displays: vec![Display::resolved(only, logical, user)],
                root: 0,
                parents: vec![0],
            });
        }

        let root = select_root(self.displays)?;
        debug!(
            "selected display {root} as topology root (raw placement {:?})",
            self.displays[root].raw_placement.top_left()
        );
        self.nodes[root].is_root = true;
        self.nodes[root].parent = Some(root);

        let mut pending = vec![root];
        while let Some(current) = pending.pop() {
            self.nodes[current].logical_area = self.logical_area_of(current)?;
            debug!(
                "resolved display {current}: physical {:?} → logical {:?}",
                self.displays[current].physical_bounds, self.nodes[current].logical_area
            );

            let children = self.adopt_touching(current);
            // Reverse so the first child is popped first.
            pending.extend(children.into_iter().rev());
        }

        let mut parents = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            match node.parent {
                Some(parent) => parents.push(parent),
                None => return Err(TopologyError::DisconnectedTopology { index }),
            }
        }

        let displays = self
            .displays
            .iter()
            .zip(&self.nodes)
            .map(|(raw, node)| {
                let logical = node.logical_area;
                let user = (raw.user_area - raw.raw_placement.top_left()) / raw.scale
                    + logical.top_left();
                Display::resolved(raw, logical, user)
            })
            .collect();

        Ok(ResolvedTopology {
            displays,
            root,
            parents,
        })
    }

    /// Links every unvisited display touching `current` to it and returns
    /// their indices in enumeration order.
    fn adopt_touching(&mut self, current: usize) -> Vec<usize> {
        let bounds = self.displays[current].physical_bounds;
        let mut children = Vec::new();

        for (index, node) in self.nodes.iter_mut().enumerate() {
            if node.parent.is_some() {
                continue;
            }
            if are_touching(&bounds, &self.displays[index].physical_bounds) {
                node.parent = Some(current);
                children.push(index);
            }
        }
        children
    }

    /// Computes the logical area of `index`, whose parent is already resolved.
    fn logical_area_of(&self, index: usize) -> Result<Rect, TopologyError> {
        let display = &self.displays[index];
        let physical = display.physical_bounds;
        let node = &self.nodes[index];

        if node.is_root {
            return Ok(physical / display.scale);
        }

        let parent = node
            .parent
            .ok_or(TopologyError::DisconnectedTopology { index })?;
        let parent_display = &self.displays[parent];
        let parent_logical = self.nodes[parent].logical_area;
        let parent_scale = parent_display.scale;

        let width = physical.width / display.scale;
        let height = physical.height / display.scale;

        let side = touching_side(&parent_display.physical_bounds, &physical).ok_or_else(|| {
            error!("display {index} has no edge in common with its parent {parent}");
            TopologyError::NoMatchingEdge {
                child: index,
                parent,
            }
        })?;

        let position = match side {
            Side::Left => Point::new(parent_logical.x - width, physical.y / parent_scale),
            Side::Right => Point::new(parent_logical.right(), physical.y / parent_scale),
            Side::Above => Point::new(physical.x / parent_scale, parent_logical.y - height),
            Side::Below => Point::new(physical.x / parent_scale, parent_logical.bottom()),
        };

        Ok(Rect::new(position.x, position.y, width, height))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
