//! Domain entities for display topology resolution.
//!
//! Pure logic with no infrastructure dependencies: everything here can be
//! compiled and tested on any platform with synthetic monitor layouts.
//!
//! Dependency order, leaves first:
//!
//! 1. [`geometry`] – points, rectangles, tolerant float comparison.
//! 2. [`display`] – raw and resolved Display Records.
//! 3. [`topology`] – adjacency test, root selection, logical bounds resolver.
//! 4. [`mapper`] – physical ↔ logical conversion and display lookup.

pub mod display;
pub mod geometry;
pub mod mapper;
pub mod topology;
