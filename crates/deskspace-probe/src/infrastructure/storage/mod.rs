//! Storage infrastructure: layout file persistence.
//!
//! The `config` sub-module reads and writes the TOML layout files the probe
//! runs against, and adapts a loaded file into a display enumerator.

pub mod config;
