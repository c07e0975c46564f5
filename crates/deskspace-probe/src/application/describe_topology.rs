//! Describe-topology use case: turns the registry's current state into a
//! report, optionally with coordinate conversions.
//!
//! The report is plain data.  It renders as text through [`fmt::Display`] and
//! as JSON through `serde`, so the binary only decides which one to print.

use std::fmt;

use deskspace_core::{CoordinateMapper, Display, DisplayRegistry, Point, Rect, Space};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Error type for the describe use case.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DescribeError {
    /// The registry has never installed a topology.
    #[error("no display topology has been resolved yet")]
    NoTopology,
}

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    PhysicalToLogical,
    LogicalToPhysical,
}

impl Direction {
    /// The space the input value is expressed in.
    pub fn source(self) -> Space {
        match self {
            Direction::PhysicalToLogical => Space::Physical,
            Direction::LogicalToPhysical => Space::Logical,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::PhysicalToLogical => f.write_str("physical -> logical"),
            Direction::LogicalToPhysical => f.write_str("logical -> physical"),
        }
    }
}

/// A value to convert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Query {
    Point(Point),
    Rect(Rect),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Point(p) => write!(f, "point {},{}", p.x, p.y),
            Query::Rect(r) => write!(f, "rect {}", RectText(r)),
        }
    }
}

/// One converted value and the display whose scale governed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub direction: Direction,
    pub input: Query,
    pub output: Query,
    /// Index of the governing display, `None` when no topology exists.
    pub display: Option<usize>,
}

/// Per-display section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySummary {
    pub index: usize,
    pub is_main: bool,
    pub scale: f64,
    pub dpi: f64,
    /// Spanning-tree parent, `None` for the root.
    pub parent: Option<usize>,
    pub physical_bounds: Rect,
    pub logical_bounds: Rect,
    pub user_bounds: Rect,
}

/// Everything the probe prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReport {
    pub root: usize,
    pub displays: Vec<DisplaySummary>,
    pub total_bounds: Rect,
    pub total_user_bounds: Rect,
    pub conversions: Vec<Conversion>,
}

impl TopologyReport {
    /// Pretty-printed JSON form of the report.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ── Use case ──────────────────────────────────────────────────────────────────

/// Builds a report of `registry`'s installed topology and converts each of
/// `queries` in `direction`.
///
/// # Errors
///
/// Returns [`DescribeError::NoTopology`] if nothing has been installed.
pub fn describe(
    registry: &DisplayRegistry,
    queries: &[Query],
    direction: Direction,
) -> Result<TopologyReport, DescribeError> {
    let topology = registry.topology().ok_or(DescribeError::NoTopology)?;
    let mapper = registry.mapper();

    let displays = topology
        .displays
        .iter()
        .enumerate()
        .map(|(index, display)| {
            let parent = topology.parents[index];
            DisplaySummary {
                index,
                is_main: display.is_main,
                scale: display.scale,
                dpi: display.dpi,
                parent: (parent != index).then_some(parent),
                physical_bounds: display.physical_bounds,
                logical_bounds: display.logical_bounds,
                user_bounds: display.user_bounds,
            }
        })
        .collect();

    let conversions = queries
        .iter()
        .map(|&query| convert(&mapper, query, direction))
        .collect();

    Ok(TopologyReport {
        root: topology.root,
        displays,
        total_bounds: mapper.total_bounds(false),
        total_user_bounds: mapper.total_bounds(true),
        conversions,
    })
}

/// Converts one value, recording which display was used.
///
/// The governing display is looked up once in the source space and then
/// passed explicitly, so the reported index is the one that was applied.
pub fn convert(mapper: &CoordinateMapper<'_>, query: Query, direction: Direction) -> Conversion {
    let space = direction.source();
    let governing = match query {
        Query::Point(p) => mapper.display_for_point(p, space),
        Query::Rect(r) => mapper.display_for_rect(r, space),
    };

    let output = match (query, direction) {
        (Query::Point(p), Direction::PhysicalToLogical) => {
            Query::Point(mapper.physical_to_logical_point(p, governing))
        }
        (Query::Point(p), Direction::LogicalToPhysical) => {
            Query::Point(mapper.logical_to_physical_point(p, governing))
        }
        (Query::Rect(r), Direction::PhysicalToLogical) => {
            Query::Rect(mapper.physical_to_logical_rect(r, governing))
        }
        (Query::Rect(r), Direction::LogicalToPhysical) => {
            Query::Rect(mapper.logical_to_physical_rect(r, governing))
        }
    };

    let display_index = governing.and_then(|g| index_of(mapper.displays(), g));
    debug!("converted {query} ({direction}) to {output} via display {display_index:?}");

    Conversion {
        direction,
        input: query,
        output,
        display: display_index,
    }
}

fn index_of(displays: &[Display], display: &Display) -> Option<usize> {
    displays.iter().position(|d| std::ptr::eq(d, display))
}

// ── Text rendering ────────────────────────────────────────────────────────────

struct RectText<'a>(&'a Rect);

impl fmt::Display for RectText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(f, "{},{} {}x{}", r.x, r.y, r.width, r.height)
    }
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.displays {
            let main = if d.is_main { " (main)" } else { "" };
            writeln!(f, "display {}{main}: scale {}, dpi {}", d.index, d.scale, d.dpi)?;
            writeln!(f, "  physical  {}", RectText(&d.physical_bounds))?;
            writeln!(f, "  logical   {}", RectText(&d.logical_bounds))?;
            writeln!(f, "  user      {}", RectText(&d.user_bounds))?;
            match d.parent {
                Some(parent) => writeln!(f, "  parent    display {parent}")?,
                None => writeln!(f, "  parent    none (root)")?,
            }
        }
        writeln!(f, "total bounds       {}", RectText(&self.total_bounds))?;
        write!(f, "total user bounds  {}", RectText(&self.total_user_bounds))?;

        for c in &self.conversions {
            writeln!(f)?;
            let via = c
                .display
                .map_or_else(|| "no display".to_string(), |i| format!("display {i}"));
            write!(f, "{} ({}) = {} via {via}", c.input, c.direction, c.output)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
