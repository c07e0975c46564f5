//! Display registry: owns the current resolved topology.
//!
//! The platform layer implements [`DisplayEnumerator`] to report raw monitor
//! records.  [`DisplayRegistry::refresh`] asks the enumerator for a fresh list,
//! resolves it, and swaps it in wholesale.  Queries go through
//! [`DisplayRegistry::mapper`], which borrows whatever topology is current.
//!
//! # Failure policy
//!
//! A refresh that fails (enumeration error, disconnected layout, bad scale
//! factor) is reported once, to the caller of `refresh`, and leaves the
//! previous good topology in place.  Queries never see a partially resolved
//! set.  A refresh that finds no displays at all is not a failure: it clears
//! the registry.  While the registry is empty, before the first successful
//! refresh or after every monitor is gone, queries degrade to `None` or
//! passthrough.
//!
//! # Threading
//!
//! The registry has no interior locking.  Refresh takes `&mut self` and
//! queries take `&self`, so the borrow checker already rules out a refresh
//! interleaving with an in-flight query on the owning thread.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::display::{Display, RawDisplay};
use crate::domain::geometry::Rect;
use crate::domain::mapper::CoordinateMapper;
use crate::domain::topology::{ResolvedTopology, TopologyError, TopologyResolver};

/// Error type for display enumeration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EnumerationError {
    /// The platform API call to enumerate monitors failed.
    #[error("platform API error while enumerating displays: {0}")]
    PlatformError(String),
}

/// Error returned by [`DisplayRegistry::refresh`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RefreshError {
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    #[error("display topology could not be resolved: {0}")]
    Topology(#[from] TopologyError),
}

/// Source of raw display records (the OS monitor list, a config file, a test
/// fixture).
#[cfg_attr(test, mockall::automock)]
pub trait DisplayEnumerator {
    /// Returns the connected displays in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::PlatformError`] if the platform query fails.
    fn enumerate_displays(&self) -> Result<Vec<RawDisplay>, EnumerationError>;
}

/// Receives the new display set whenever a refresh changes it.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayChangeListener {
    fn displays_changed(&mut self, displays: &[Display]);
}

/// An enumerator that always returns the same records.
///
/// Used by tests, benchmarks, and file-backed front ends that have no live
/// platform to query.
#[derive(Debug, Clone, Default)]
pub struct StaticDisplayEnumerator {
    pub displays: Vec<RawDisplay>,
}

impl StaticDisplayEnumerator {
    pub fn new(displays: Vec<RawDisplay>) -> Self {
        Self { displays }
    }

    /// A single 1920×1080 primary display at scale 1.
    pub fn single_1080p() -> Self {
        Self::new(vec![
            RawDisplay::new(Rect::new(0.0, 0.0, 1920.0, 1080.0), 1.0).main()
        ])
    }

    /// A 2x laptop panel at the origin with a 1x 2560×1440 monitor on its right.
    pub fn laptop_with_external() -> Self {
        Self::new(vec![
            RawDisplay::new(Rect::new(0.0, 0.0, 2880.0, 1800.0), 2.0)
                .main()
                .with_user_area(Rect::new(0.0, 50.0, 2880.0, 1750.0)),
            RawDisplay::new(Rect::new(2880.0, 0.0, 2560.0, 1440.0), 1.0),
        ])
    }
}

impl DisplayEnumerator for StaticDisplayEnumerator {
    fn enumerate_displays(&self) -> Result<Vec<RawDisplay>, EnumerationError> {
        Ok(self.displays.clone())
    }
}

/// Whether a successful refresh changed the installed topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Changed,
    Unchanged,
}

/// Holds the current resolved topology and the listeners interested in it.
#[derive(Default)]
pub struct DisplayRegistry {
    topology: Option<ResolvedTopology>,
    listeners: Vec<Box<dyn DisplayChangeListener>>,
}

impl DisplayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener notified after every refresh that changes the set.
    pub fn add_listener(&mut self, listener: Box<dyn DisplayChangeListener>) {
        self.listeners.push(listener);
    }

    /// Re-enumerates, re-resolves, and installs the new topology.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if enumeration or resolution fails; the
    /// previously installed topology is kept in that case.
    pub fn refresh(
        &mut self,
        enumerator: &dyn DisplayEnumerator,
    ) -> Result<RefreshOutcome, RefreshError> {
        let raw = enumerator.enumerate_displays().map_err(|e| {
            warn!("display enumeration failed, keeping previous topology: {e}");
            e
        })?;
        Ok(self.apply(&raw)?)
    }

    /// Resolves `raw` and installs it, notifying listeners if it differs from
    /// the current set.
    ///
    /// An empty `raw` means every monitor is gone: the registry is cleared and
    /// queries degrade to `None` or passthrough.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] if a non-empty `raw` cannot be resolved; the
    /// previously installed topology is kept in that case.
    pub fn apply(&mut self, raw: &[RawDisplay]) -> Result<RefreshOutcome, TopologyError> {
        if raw.is_empty() {
            return Ok(self.clear());
        }

        let resolved = TopologyResolver::new(raw).resolve().map_err(|e| {
            warn!("display topology rejected, keeping previous topology: {e}");
            e
        })?;

        if self.displays() == resolved.displays.as_slice() {
            debug!("display refresh produced an identical topology");
            self.topology = Some(resolved);
            return Ok(RefreshOutcome::Unchanged);
        }

        info!(
            "installed display topology: {} display(s), root {}",
            resolved.displays.len(),
            resolved.root
        );
        self.topology = Some(resolved);

        if let Some(topology) = &self.topology {
            for listener in &mut self.listeners {
                listener.displays_changed(&topology.displays);
            }
        }
        Ok(RefreshOutcome::Changed)
    }

    fn clear(&mut self) -> RefreshOutcome {
        if self.topology.take().is_none() {
            debug!("display refresh found no displays, registry already empty");
            return RefreshOutcome::Unchanged;
        }

        info!("all displays removed, cleared display topology");
        for listener in &mut self.listeners {
            listener.displays_changed(&[]);
        }
        RefreshOutcome::Changed
    }

    /// The currently installed displays, empty before the first success.
    pub fn displays(&self) -> &[Display] {
        self.topology
            .as_ref()
            .map(|t| t.displays.as_slice())
            .unwrap_or(&[])
    }

    /// The installed topology including its spanning tree.
    pub fn topology(&self) -> Option<&ResolvedTopology> {
        self.topology.as_ref()
    }

    /// Query interface over the installed displays.
    pub fn mapper(&self) -> CoordinateMapper<'_> {
        CoordinateMapper::new(self.displays())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
