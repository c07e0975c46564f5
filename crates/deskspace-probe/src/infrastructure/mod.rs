//! Infrastructure layer for the probe.
//!
//! Contains the file-system adapter that turns a TOML layout file into raw
//! display records.
//!
//! **Dependency rule**: this layer may depend on `deskspace_core`, but MUST
//! NOT be imported by the `application` layer.

pub mod storage;
