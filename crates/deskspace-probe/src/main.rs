//! deskspace-probe: resolve a monitor layout file and convert coordinates.
//!
//! # Usage
//!
//! ```text
//! deskspace-probe --layout <FILE> [OPTIONS]
//!
//! Options:
//!   --layout <FILE>      TOML layout file
//!   --point <X,Y>        Point to convert (repeatable)
//!   --rect <X,Y,W,H>     Rectangle to convert (repeatable)
//!   --logical            Treat --point/--rect as logical and convert to physical
//!   --output <FORMAT>    text or json [default: the layout's [probe] output]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable             | Description                  |
//! |----------------------|------------------------------|
//! | `DESKSPACE_LAYOUT`   | Layout file path             |
//! | `DESKSPACE_OUTPUT`   | Output format                |
//! | `RUST_LOG`           | Log filter, overrides the layout's `log_level` |
//!
//! Logs go to stderr so the report on stdout stays machine-readable.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deskspace_core::{DisplayRegistry, Point, Rect};
use deskspace_probe::application::describe_topology::{describe, Direction, Query};
use deskspace_probe::infrastructure::storage::config::{load_layout, OutputFormat};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Resolves a monitor layout into a unified logical coordinate space.
#[derive(Debug, Parser)]
#[command(
    name = "deskspace-probe",
    about = "Resolve a monitor layout file and convert coordinates between physical and logical space",
    version
)]
struct Cli {
    /// Path to the TOML layout file.
    #[arg(long, env = "DESKSPACE_LAYOUT")]
    layout: PathBuf,

    /// Point to convert, as `X,Y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    point: Vec<Point>,

    /// Rectangle to convert, as `X,Y,W,H`.
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    rect: Vec<Rect>,

    /// Interpret `--point` and `--rect` as logical coordinates.
    #[arg(long)]
    logical: bool,

    /// Report format; falls back to the layout file's `[probe] output`.
    #[arg(long, value_enum, env = "DESKSPACE_OUTPUT")]
    output: Option<OutputFormat>,
}

/// What the CLI asked for, independent of how it was spelled.
#[derive(Debug, Clone, PartialEq)]
struct ProbeRequest {
    layout: PathBuf,
    queries: Vec<Query>,
    direction: Direction,
    output: Option<OutputFormat>,
}

impl Cli {
    fn into_probe_request(self) -> ProbeRequest {
        let queries = self
            .point
            .into_iter()
            .map(Query::Point)
            .chain(self.rect.into_iter().map(Query::Rect))
            .collect();
        let direction = if self.logical {
            Direction::LogicalToPhysical
        } else {
            Direction::PhysicalToLogical
        };

        ProbeRequest {
            layout: self.layout,
            queries,
            direction,
            output: self.output,
        }
    }
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got '{s}'"));
    }

    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{part}': {e}"))?;
    }
    Ok(values)
}

fn parse_point(s: &str) -> Result<Point, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    Ok(Point::new(x, y))
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_numbers::<4>(s)?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("rectangle size must not be negative, got '{s}'"));
    }
    Ok(Rect::new(x, y, width, height))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let request = Cli::parse().into_probe_request();

    let layout = load_layout(&request.layout)
        .with_context(|| format!("failed to load layout '{}'", request.layout.display()))?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the layout's own `log_level` applies.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&layout.probe.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "probing {} display(s) from {}",
        layout.displays.len(),
        request.layout.display()
    );

    let mut registry = DisplayRegistry::new();
    registry
        .refresh(&layout)
        .with_context(|| format!("failed to resolve layout '{}'", request.layout.display()))?;

    let report = describe(&registry, &request.queries, request.direction)?;

    match request.output.unwrap_or(layout.probe.output) {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!(
            "{}",
            report.to_json().context("failed to serialize report")?
        ),
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
