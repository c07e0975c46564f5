//! Integration tests for the probe pipeline.
//!
//! These tests exercise the probe end to end: a layout file on disk is loaded,
//! fed to a `DisplayRegistry`, and described with conversions.

use std::path::PathBuf;

use deskspace_core::{DisplayRegistry, Point, Rect, RefreshError, RefreshOutcome, TopologyError};
use deskspace_probe::application::describe_topology::{describe, DescribeError, Direction, Query};
use deskspace_probe::infrastructure::storage::config::{
    load_layout, parse_layout, save_layout, DisplayEntry, LayoutFile,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("deskspace_probe_it_{}_{name}", std::process::id()))
        .join("layout.toml")
}

/// A 1.5x root with a 1x monitor to its left and a 2x monitor above.
fn l_shaped() -> LayoutFile {
    let mut root = DisplayEntry::new(Rect::new(0.0, 0.0, 2560.0, 1440.0), 1.5);
    root.is_main = true;
    LayoutFile {
        displays: vec![
            root,
            DisplayEntry::new(Rect::new(-1920.0, 0.0, 1920.0, 1080.0), 1.0),
            DisplayEntry::new(Rect::new(0.0, -2160.0, 3840.0, 2160.0), 2.0),
        ],
        ..LayoutFile::default()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_layout_file_on_disk_resolves_and_converts() {
    // Arrange
    let path = temp_path("l_shaped");
    save_layout(&path, &l_shaped()).expect("save");
    let layout = load_layout(&path).expect("load");
    let mut registry = DisplayRegistry::new();

    // Act
    registry.refresh(&layout).expect("refresh");
    let report = describe(
        &registry,
        &[
            Query::Point(Point::new(-960.0, 540.0)),
            Query::Point(Point::new(1920.0, -1080.0)),
        ],
        Direction::PhysicalToLogical,
    )
    .expect("describe");

    // Assert
    assert_eq!(report.displays[1].logical_bounds, Rect::new(-1920.0, 0.0, 1920.0, 1080.0));
    assert_eq!(report.displays[2].logical_bounds, Rect::new(0.0, -1080.0, 1920.0, 1080.0));
    assert_eq!(report.displays[2].parent, Some(0));
    assert_eq!(report.conversions[0].output, Query::Point(Point::new(-960.0, 540.0)));
    assert_eq!(report.conversions[0].display, Some(1));
    assert_eq!(report.conversions[1].output, Query::Point(Point::new(960.0, -540.0)));
    assert_eq!(report.conversions[1].display, Some(2));

    // Cleanup
    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).ok();
    }
}

#[test]
fn test_logical_conversion_round_trips_through_report() {
    let mut registry = DisplayRegistry::new();
    registry.refresh(&l_shaped()).expect("refresh");
    let physical = Point::new(1000.0, 700.0);

    let forward = describe(&registry, &[Query::Point(physical)], Direction::PhysicalToLogical)
        .expect("describe");
    let Query::Point(logical) = forward.conversions[0].output else {
        panic!("point query must produce a point");
    };
    let back = describe(&registry, &[Query::Point(logical)], Direction::LogicalToPhysical)
        .expect("describe");

    let Query::Point(round_tripped) = back.conversions[0].output else {
        panic!("point query must produce a point");
    };
    assert!(round_tripped.approx_eq(physical, 1e-6));
    assert_eq!(back.conversions[0].display, Some(0));
}

#[test]
fn test_disconnected_layout_file_fails_to_refresh() {
    let layout = parse_layout(
        r#"
[[display]]
bounds = { x = 0.0, y = 0.0, width = 1920.0, height = 1080.0 }

[[display]]
bounds = { x = 5000.0, y = 5000.0, width = 1920.0, height = 1080.0 }
"#,
    )
    .expect("parse");
    let mut registry = DisplayRegistry::new();

    let result = registry.refresh(&layout);

    assert_eq!(
        result,
        Err(RefreshError::Topology(TopologyError::DisconnectedTopology { index: 1 }))
    );
    assert!(describe(&registry, &[], Direction::PhysicalToLogical).is_err());
}

#[test]
fn test_layout_without_displays_has_nothing_to_describe() {
    let layout = parse_layout("[probe]\nlog_level = \"warn\"\n").expect("parse");
    let mut registry = DisplayRegistry::new();

    let result = registry.refresh(&layout);

    assert_eq!(result, Ok(RefreshOutcome::Unchanged));
    assert_eq!(
        describe(&registry, &[], Direction::PhysicalToLogical),
        Err(DescribeError::NoTopology)
    );
}

#[test]
fn test_single_display_is_positioned_by_its_placement() {
    // Bounds are offset from the origin but the platform places it at 0,0.
    let layout = parse_layout(
        r#"
[[display]]
bounds = { x = 100.0, y = 100.0, width = 2000.0, height = 1000.0 }
placement = { x = 0.0, y = 0.0, width = 2000.0, height = 1000.0 }
scale = 2.0
"#,
    )
    .expect("parse");
    let mut registry = DisplayRegistry::new();

    registry.refresh(&layout).expect("refresh");

    assert_eq!(
        registry.displays()[0].logical_bounds,
        Rect::new(0.0, 0.0, 1000.0, 500.0)
    );
    assert_eq!(
        registry.displays()[0].physical_bounds,
        Rect::new(100.0, 100.0, 2000.0, 1000.0)
    );
}

#[test]
fn test_adjacency_follows_bounds_not_placement() {
    // The placement of the second display is nowhere near the first, but
    // its bounds touch, so it still joins the topology at the shared edge.
    let layout = parse_layout(
        r#"
[[display]]
bounds = { x = 0.0, y = 0.0, width = 1920.0, height = 1080.0 }
is_main = true

[[display]]
bounds = { x = 1920.0, y = 0.0, width = 1920.0, height = 1080.0 }
placement = { x = 5000.0, y = 5000.0, width = 1920.0, height = 1080.0 }
"#,
    )
    .expect("parse");
    let mut registry = DisplayRegistry::new();

    registry.refresh(&layout).expect("refresh");

    assert_eq!(
        registry.displays()[1].logical_bounds,
        Rect::new(1920.0, 0.0, 1920.0, 1080.0)
    );
}
