//! Display Records: the per-monitor data the resolver consumes and produces.
//!
//! A [`RawDisplay`] is what a platform enumerator reports: everything in
//! physical pixels.  A [`Display`] is the same monitor after topology
//! resolution, carrying its bounds in the unified logical space as well.
//!
//! The two are separate types so that raw placement and resolved logical
//! bounds can never be confused: the resolver reads one and writes the other.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// DPI of a monitor running at scale factor 1.0.
pub const BASE_DPI: f64 = 96.0;

/// Border sizes in logical pixels, e.g. a notch or an on-screen keyboard.
///
/// These are informational: resolution carries them through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub right: f64,
}

/// One monitor as reported by the platform, before resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDisplay {
    /// OS-reported bounds in physical pixels.  Used for adjacency and for
    /// physical-space queries.
    pub physical_bounds: Rect,
    /// Placement as reported by the platform, in physical space.  Used to pick
    /// the root monitor and as the reference origin of `user_area`.
    pub raw_placement: Rect,
    /// Usable area excluding OS chrome (menu bar, dock, taskbar), in
    /// physical space.
    pub user_area: Rect,
    /// Physical pixels per logical pixel.  Must be finite and positive.
    pub scale: f64,
    /// Whether this is the platform's primary monitor.
    pub is_main: bool,
    /// Reported DPI.
    pub dpi: f64,
    pub safe_area_insets: Insets,
    pub keyboard_insets: Insets,
}

impl RawDisplay {
    /// Creates a non-primary record whose placement and user area both equal
    /// `physical_bounds`, with DPI derived from `scale`.
    pub fn new(physical_bounds: Rect, scale: f64) -> Self {
        Self {
            physical_bounds,
            raw_placement: physical_bounds,
            user_area: physical_bounds,
            scale,
            is_main: false,
            dpi: BASE_DPI * scale,
            safe_area_insets: Insets::default(),
            keyboard_insets: Insets::default(),
        }
    }

    /// Marks the record as the primary monitor.
    pub fn main(mut self) -> Self {
        self.is_main = true;
        self
    }

    pub fn with_user_area(mut self, user_area: Rect) -> Self {
        self.user_area = user_area;
        self
    }

    pub fn with_raw_placement(mut self, raw_placement: Rect) -> Self {
        self.raw_placement = raw_placement;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_safe_area_insets(mut self, insets: Insets) -> Self {
        self.safe_area_insets = insets;
        self
    }

    pub fn with_keyboard_insets(mut self, insets: Insets) -> Self {
        self.keyboard_insets = insets;
        self
    }

    /// Returns `true` if `scale` can be divided by safely.
    pub fn has_valid_scale(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }
}

/// One monitor after topology resolution.
///
/// Produced only by [`crate::domain::topology::resolve`]; the
/// [`CoordinateMapper`](crate::domain::mapper::CoordinateMapper) reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    /// OS-reported bounds in physical pixels.
    pub physical_bounds: Rect,
    /// Bounds in the unified logical coordinate space.
    pub logical_bounds: Rect,
    /// Usable area in the unified logical coordinate space.
    pub user_bounds: Rect,
    /// Physical pixels per logical pixel.
    pub scale: f64,
    pub is_main: bool,
    pub dpi: f64,
    pub safe_area_insets: Insets,
    pub keyboard_insets: Insets,
}

impl Display {
    /// Builds the resolved record for `raw` from its computed logical bounds.
    pub(crate) fn resolved(raw: &RawDisplay, logical_bounds: Rect, user_bounds: Rect) -> Self {
        Self {
            physical_bounds: raw.physical_bounds,
            logical_bounds,
            user_bounds,
            scale: raw.scale,
            is_main: raw.is_main,
            dpi: raw.dpi,
            safe_area_insets: raw.safe_area_insets,
            keyboard_insets: raw.keyboard_insets,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_display_new_defaults_placement_and_user_area_to_bounds() {
        let bounds = Rect::new(0.0, 0.0, 2560.0, 1440.0);
        let raw = RawDisplay::new(bounds, 2.0);

        assert_eq!(raw.raw_placement, bounds);
        assert_eq!(raw.user_area, bounds);
        assert!(!raw.is_main);
        assert_eq!(raw.dpi, 192.0);
    }

    #[test]
    fn test_raw_display_builders_override_fields() {
        let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let user = Rect::new(0.0, 25.0, 1920.0, 1055.0);
        let insets = Insets { top: 32.0, ..Insets::default() };

        let raw = RawDisplay::new(bounds, 1.0)
            .main()
            .with_user_area(user)
            .with_dpi(110.0)
            .with_safe_area_insets(insets);

        assert!(raw.is_main);
        assert_eq!(raw.user_area, user);
        assert_eq!(raw.dpi, 110.0);
        assert_eq!(raw.safe_area_insets.top, 32.0);
        assert_eq!(raw.keyboard_insets, Insets::default());
    }

    #[test]
    fn test_has_valid_scale_rejects_zero_negative_and_nan() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(RawDisplay::new(bounds, 1.25).has_valid_scale());
        assert!(!RawDisplay::new(bounds, 0.0).has_valid_scale());
        assert!(!RawDisplay::new(bounds, -1.0).has_valid_scale());
        assert!(!RawDisplay::new(bounds, f64::NAN).has_valid_scale());
        assert!(!RawDisplay::new(bounds, f64::INFINITY).has_valid_scale());
    }
}
