//! # deskspace-core
//!
//! Resolves a unified logical coordinate space across a set of monitors that
//! each report physical pixel bounds and their own scale factor, and converts
//! points and rectangles between the two spaces.
//!
//! The crate is pure computation: no OS APIs, no I/O, no threads.  Platform
//! code feeds it raw monitor records through the [`DisplayEnumerator`] trait.
//!
//! # Architecture overview
//!
//! - **`domain`** – Geometry, Display Records, the topology resolver, and the
//!   coordinate mapper.  The resolver is the interesting part: it builds a
//!   spanning tree over monitors whose physical edges touch and glues every
//!   monitor's logical bounds to its parent's, so a 2x panel next to a 1x
//!   monitor meets it edge to edge in logical pixels.
//!
//! - **`registry`** – Owns the current resolved topology, re-resolves it on
//!   refresh, and keeps the last good topology when a refresh fails.
//!
//! # Example
//!
//! ```rust
//! use deskspace_core::{resolve, CoordinateMapper, Point, RawDisplay, Rect};
//!
//! let displays = resolve(&[
//!     RawDisplay::new(Rect::new(0.0, 0.0, 1000.0, 800.0), 1.0).main(),
//!     RawDisplay::new(Rect::new(1000.0, 0.0, 200.0, 800.0), 2.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(displays[1].logical_bounds, Rect::new(1000.0, 0.0, 100.0, 400.0));
//!
//! let mapper = CoordinateMapper::new(&displays);
//! let logical = mapper.physical_to_logical_point(Point::new(1100.0, 200.0), None);
//! assert_eq!(logical, Point::new(1050.0, 100.0));
//! ```

pub mod domain;
pub mod registry;

// Re-export the most-used types at the crate root so callers can write
// `deskspace_core::Rect` instead of `deskspace_core::domain::geometry::Rect`.
pub use domain::display::{Display, Insets, RawDisplay};
pub use domain::geometry::{Point, Rect};
pub use domain::mapper::{CoordinateMapper, Space};
pub use domain::topology::{resolve, ResolvedTopology, TopologyError, TopologyResolver};
pub use registry::{
    DisplayChangeListener, DisplayEnumerator, DisplayRegistry, EnumerationError, RefreshError,
    RefreshOutcome, StaticDisplayEnumerator,
};
