//! Coordinate conversion and display lookup over a resolved topology.
//!
//! [`CoordinateMapper`] borrows the resolved [`Display`] records and answers
//! queries about them.  It owns no state, so it is cheap to construct for every
//! query batch and can never observe a half-updated topology.
//!
//! None of these queries fail.  They are called from rendering and input
//! handling paths, so an empty display set degrades to `None` or to returning
//! the input unchanged.

use super::display::Display;
use super::geometry::{Point, Rect};

/// Which coordinate space a lookup is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Physical,
    Logical,
}

impl Space {
    fn bounds_of(self, display: &Display) -> Rect {
        match self {
            Space::Physical => display.physical_bounds,
            Space::Logical => display.logical_bounds,
        }
    }
}

/// Stateless queries over a resolved display sequence.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    displays: &'a [Display],
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(displays: &'a [Display]) -> Self {
        Self { displays }
    }

    /// The records this mapper reads.
    pub fn displays(&self) -> &'a [Display] {
        self.displays
    }

    /// Returns the display whose bounds in `space` overlap `rect` the most.
    ///
    /// Logical bounds are snapped to whole pixels before measuring, so a rect
    /// straddling a fractional logical edge is attributed the same way as its
    /// integer counterpart.  Ties, including a zero-area overlap with every
    /// display, go to the later record.  Returns `None` only when there are no
    /// displays; an unorderable (NaN) rect falls back to the first display.
    pub fn display_for_rect(&self, rect: Rect, space: Space) -> Option<&'a Display> {
        let mut max_area = -1.0;
        let mut found = self.displays.first();

        for display in self.displays {
            let bounds = match space {
                Space::Physical => display.physical_bounds,
                Space::Logical => display.logical_bounds.to_nearest_int(),
            };
            let area = bounds.intersection(&rect).area();
            if area >= max_area {
                max_area = area;
                found = Some(display);
            }
        }
        found
    }

    /// Returns the first display whose bounds in `space` contain `point`, or
    /// else the display whose centre is nearest to it (ties go to the later
    /// record).  Returns `None` only when there are no displays; an unorderable
    /// (NaN) point falls back to the first display.
    pub fn display_for_point(&self, point: Point, space: Space) -> Option<&'a Display> {
        let mut min_distance = f64::MAX;
        let mut found = self.displays.first();

        for display in self.displays {
            let bounds = space.bounds_of(display);
            if bounds.contains(point) {
                return Some(display);
            }

            let distance = bounds.centre().distance_from(point);
            if distance <= min_distance {
                min_distance = distance;
                found = Some(display);
            }
        }
        found
    }

    /// Converts a physical point to logical space.
    ///
    /// Uses `display`'s transform when given, otherwise the display found by
    /// [`display_for_point`](Self::display_for_point) in physical space.
    pub fn physical_to_logical_point(&self, point: Point, display: Option<&Display>) -> Point {
        match display.or_else(|| self.display_for_point(point, Space::Physical)) {
            Some(d) => (point - d.physical_bounds.top_left()) / d.scale + d.logical_bounds.top_left(),
            None => point,
        }
    }

    /// Converts a logical point to physical space; the inverse of
    /// [`physical_to_logical_point`](Self::physical_to_logical_point).
    pub fn logical_to_physical_point(&self, point: Point, display: Option<&Display>) -> Point {
        match display.or_else(|| self.display_for_point(point, Space::Logical)) {
            Some(d) => (point - d.logical_bounds.top_left()) * d.scale + d.physical_bounds.top_left(),
            None => point,
        }
    }

    /// Converts a physical rectangle to logical space.
    ///
    /// The top-left corner is transformed like a point and the extent is
    /// divided by the display's scale.  Without an explicit display the one
    /// overlapping `rect` the most is used.
    pub fn physical_to_logical_rect(&self, rect: Rect, display: Option<&Display>) -> Rect {
        match display.or_else(|| self.display_for_rect(rect, Space::Physical)) {
            Some(d) => (rect - d.physical_bounds.top_left()) / d.scale + d.logical_bounds.top_left(),
            None => rect,
        }
    }

    /// Converts a logical rectangle to physical space; the inverse of
    /// [`physical_to_logical_rect`](Self::physical_to_logical_rect).
    pub fn logical_to_physical_rect(&self, rect: Rect, display: Option<&Display>) -> Rect {
        match display.or_else(|| self.display_for_rect(rect, Space::Logical)) {
            Some(d) => (rect - d.logical_bounds.top_left()) * d.scale + d.physical_bounds.top_left(),
            None => rect,
        }
    }

    /// The platform's primary display, if any record is marked as main.
    pub fn primary_display(&self) -> Option<&'a Display> {
        self.displays.iter().find(|d| d.is_main)
    }

    /// Logical (or user-area) rectangles of every display, in record order.
    pub fn rectangle_list(&self, user_areas_only: bool) -> Vec<Rect> {
        self.displays
            .iter()
            .map(|d| if user_areas_only { d.user_bounds } else { d.logical_bounds })
            .collect()
    }

    /// Bounding box of [`rectangle_list`](Self::rectangle_list); an empty
    /// rectangle at the origin when there are no displays.
    pub fn total_bounds(&self, user_areas_only: bool) -> Rect {
        self.rectangle_list(user_areas_only)
            .iter()
            .fold(Rect::default(), |acc, r| acc.union(r))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::display::RawDisplay;
    use crate::domain::topology::resolve;

    /// 1x monitor at the origin with a 2x monitor to its right, vertically offset.
    fn two_monitor_topology() -> Vec<Display> {
        resolve(&[
            RawDisplay::new(Rect::new(0.0, 0.0, 1920.0, 1080.0), 1.0)
                .main()
                .with_user_area(Rect::new(0.0, 0.0, 1920.0, 1040.0)),
            RawDisplay::new(Rect::new(1920.0, 200.0, 3840.0, 2160.0), 2.0),
        ])
        .expect("touching layout must resolve")
    }

    // ── display_for_rect ──────────────────────────────────────────────────────

    #[test]
    fn test_display_for_rect_returns_none_for_empty_set() {
        let mapper = CoordinateMapper::new(&[]);
        assert!(mapper.display_for_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Space::Physical).is_none());
    }

    #[test]
    fn test_display_for_rect_picks_largest_overlap() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        // Mostly on the second monitor in physical space.
        let rect = Rect::new(1800.0, 300.0, 400.0, 100.0);
        let found = mapper.display_for_rect(rect, Space::Physical).unwrap();

        assert_eq!(found, &displays[1]);
    }

    #[test]
    fn test_display_for_rect_tie_goes_to_later_display() {
        let displays = resolve(&[
            RawDisplay::new(Rect::new(0.0, 0.0, 100.0, 100.0), 1.0),
            RawDisplay::new(Rect::new(100.0, 0.0, 100.0, 100.0), 1.0),
        ])
        .unwrap();
        let mapper = CoordinateMapper::new(&displays);

        // Straddles the shared edge evenly.
        let rect = Rect::new(50.0, 0.0, 100.0, 10.0);
        assert_eq!(mapper.display_for_rect(rect, Space::Physical), Some(&displays[1]));

        // No overlap at all: zero area ties everywhere.
        let far = Rect::new(5000.0, 5000.0, 1.0, 1.0);
        assert_eq!(mapper.display_for_rect(far, Space::Logical), Some(&displays[1]));
    }

    #[test]
    fn test_display_for_rect_measures_snapped_logical_bounds() {
        // Root at 1.5x ends at logical x 666.67, which snaps to 667.
        let displays = resolve(&[
            RawDisplay::new(Rect::new(0.0, 0.0, 1000.0, 900.0), 1.5),
            RawDisplay::new(Rect::new(1000.0, 0.0, 500.0, 600.0), 1.0),
        ])
        .unwrap();
        let mapper = CoordinateMapper::new(&displays);

        // Fractional bounds would favour the second display (99.87 vs 100.13);
        // snapped ones give the first 100.2 against 99.8.
        let rect = Rect::new(566.8, 0.0, 200.0, 10.0);

        assert_eq!(mapper.display_for_rect(rect, Space::Logical), Some(&displays[0]));
    }

    // ── display_for_point ─────────────────────────────────────────────────────

    #[test]
    fn test_display_for_point_returns_containing_display() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let physical = mapper.display_for_point(Point::new(2000.0, 300.0), Space::Physical);
        let logical = mapper.display_for_point(Point::new(2000.0, 300.0), Space::Logical);

        assert_eq!(physical, Some(&displays[1]));
        // Logical space: monitor 2 spans x 1920..3840, y 200/1 = 200..1280.
        assert_eq!(logical, Some(&displays[1]));
    }

    #[test]
    fn test_display_for_point_falls_back_to_nearest_centre() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let found = mapper.display_for_point(Point::new(-500.0, 540.0), Space::Physical);

        assert_eq!(found, Some(&displays[0]));
    }

    #[test]
    fn test_display_for_point_nearest_tie_goes_to_later_display() {
        let displays = resolve(&[
            RawDisplay::new(Rect::new(0.0, 0.0, 100.0, 100.0), 1.0),
            RawDisplay::new(Rect::new(100.0, 0.0, 100.0, 100.0), 1.0),
        ])
        .unwrap();
        let mapper = CoordinateMapper::new(&displays);

        // Equidistant from both centres (50,50) and (150,50).
        let found = mapper.display_for_point(Point::new(100.0, 500.0), Space::Physical);

        assert_eq!(found, Some(&displays[1]));
    }

    #[test]
    fn test_lookups_with_nan_coordinates_fall_back_to_first_display() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let point = mapper.display_for_point(Point::new(f64::NAN, 10.0), Space::Physical);
        let rect = mapper.display_for_rect(Rect::new(f64::NAN, 0.0, 10.0, 10.0), Space::Logical);

        assert!(point.is_some());
        assert!(rect.is_some());
    }

    #[test]
    fn test_display_for_point_returns_none_for_empty_set() {
        let mapper = CoordinateMapper::new(&[]);
        assert!(mapper.display_for_point(Point::ORIGIN, Space::Logical).is_none());
    }

    // ── conversions ───────────────────────────────────────────────────────────

    #[test]
    fn test_physical_to_logical_point_on_scaled_display() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let logical = mapper.physical_to_logical_point(Point::new(2920.0, 1200.0), None);

        // (2920 - 1920) / 2 + 1920, (1200 - 200) / 2 + 200
        assert_eq!(logical, Point::new(2420.0, 700.0));
    }

    #[test]
    fn test_logical_to_physical_point_inverts_conversion() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let physical = mapper.logical_to_physical_point(Point::new(2420.0, 700.0), None);

        assert_eq!(physical, Point::new(2920.0, 1200.0));
    }

    #[test]
    fn test_conversion_uses_explicit_display() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        // Point lies on the first monitor, but the second monitor's transform is requested.
        let logical = mapper.physical_to_logical_point(Point::new(1000.0, 200.0), Some(&displays[1]));

        assert_eq!(logical, Point::new(1460.0, 200.0));
    }

    #[test]
    fn test_physical_to_logical_rect_scales_extent() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let logical = mapper.physical_to_logical_rect(Rect::new(2120.0, 400.0, 800.0, 600.0), None);

        assert_eq!(logical, Rect::new(2020.0, 300.0, 400.0, 300.0));
        assert_eq!(
            mapper.logical_to_physical_rect(logical, None),
            Rect::new(2120.0, 400.0, 800.0, 600.0)
        );
    }

    #[test]
    fn test_conversions_pass_through_on_empty_set() {
        let mapper = CoordinateMapper::new(&[]);
        let point = Point::new(12.5, -3.0);
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        assert_eq!(mapper.physical_to_logical_point(point, None), point);
        assert_eq!(mapper.logical_to_physical_point(point, None), point);
        assert_eq!(mapper.physical_to_logical_rect(rect, None), rect);
        assert_eq!(mapper.logical_to_physical_rect(rect, None), rect);
    }

    // ── primary / totals ──────────────────────────────────────────────────────

    #[test]
    fn test_primary_display_returns_main_record() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);
        assert_eq!(mapper.primary_display(), Some(&displays[0]));
    }

    #[test]
    fn test_primary_display_is_none_without_main_flag() {
        let displays = resolve(&[RawDisplay::new(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0)]).unwrap();
        assert!(CoordinateMapper::new(&displays).primary_display().is_none());
    }

    #[test]
    fn test_total_bounds_spans_all_logical_bounds() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        assert_eq!(mapper.total_bounds(false), Rect::new(0.0, 0.0, 3840.0, 1280.0));
        // The first monitor's user area stops at 1040 but the second still reaches 1280.
        assert_eq!(mapper.total_bounds(true), Rect::new(0.0, 0.0, 3840.0, 1280.0));
    }

    #[test]
    fn test_rectangle_list_selects_user_areas() {
        let displays = two_monitor_topology();
        let mapper = CoordinateMapper::new(&displays);

        let rects = mapper.rectangle_list(true);

        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 1920.0, 1040.0));
    }

    #[test]
    fn test_total_bounds_of_empty_set_is_empty() {
        let mapper = CoordinateMapper::new(&[]);
        assert!(mapper.total_bounds(false).is_empty());
    }
}
