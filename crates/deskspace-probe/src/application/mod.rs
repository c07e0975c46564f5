//! Application layer use cases for the probe.
//!
//! Use cases here orchestrate `deskspace_core` types and contain no file
//! system access; the binary hands them an already refreshed registry.
//!
//! # Sub-modules
//!
//! - **`describe_topology`** – Summarises the resolved displays and converts
//!   points or rectangles between physical and logical space, naming the
//!   display that governed each conversion.

pub mod describe_topology;
