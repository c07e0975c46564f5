//! TOML layout files for the probe.
//!
//! A layout file describes one monitor per `[[display]]` table, in the order
//! the platform would enumerate them, plus a `[probe]` table for the probe's
//! own settings:
//!
//! ```toml
//! [probe]
//! log_level = "debug"
//! output = "json"
//!
//! [[display]]
//! bounds = { x = 0.0, y = 0.0, width = 2880.0, height = 1800.0 }
//! scale = 2.0
//! is_main = true
//! user_area = { x = 0.0, y = 50.0, width = 2880.0, height = 1750.0 }
//!
//! [[display]]
//! bounds = { x = 2880.0, y = 0.0, width = 2560.0, height = 1440.0 }
//! ```
//!
//! Every field except `bounds` is optional.  `user_area` and `placement`
//! default to `bounds`, `scale` to 1.0, and `dpi` to 96 × `scale`.
//!
//! A loaded [`LayoutFile`] is itself a [`DisplayEnumerator`], so the probe
//! feeds it straight into a [`deskspace_core::DisplayRegistry`].

use std::path::{Path, PathBuf};

use deskspace_core::domain::display::BASE_DPI;
use deskspace_core::{DisplayEnumerator, EnumerationError, Insets, RawDisplay, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Error type for layout file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing layout at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse layout TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The layout could not be serialized to TOML.
    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The TOML parsed but describes an impossible monitor.
    #[error("invalid layout: {0}")]
    Invalid(String),
}

// ── Layout schema types ───────────────────────────────────────────────────────

/// How the probe renders its report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level layout file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutFile {
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default, rename = "display")]
    pub displays: Vec<DisplayEntry>,
}

/// Settings for the probe itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeSettings {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub output: OutputFormat,
}

/// One monitor as the platform would report it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayEntry {
    /// Physical pixel bounds.
    pub bounds: Rect,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub is_main: bool,
    /// Physical work area; defaults to `bounds`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_area: Option<Rect>,
    /// Platform placement; defaults to `bounds`.  It picks the root display,
    /// positions a lone display, and is the origin of `user_area`.  Adjacency
    /// and the positions of non-root displays come from `bounds`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<f64>,
    #[serde(default)]
    pub safe_area_insets: Insets,
    #[serde(default)]
    pub keyboard_insets: Insets,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_scale() -> f64 {
    1.0
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: OutputFormat::default(),
        }
    }
}

impl DisplayEntry {
    /// An entry with every optional field left at its default.
    pub fn new(bounds: Rect, scale: f64) -> Self {
        Self {
            bounds,
            scale,
            is_main: false,
            user_area: None,
            placement: None,
            dpi: None,
            safe_area_insets: Insets::default(),
            keyboard_insets: Insets::default(),
        }
    }

    /// Converts the entry into the record the resolver consumes.
    pub fn to_raw_display(&self) -> RawDisplay {
        let mut raw = RawDisplay::new(self.bounds, self.scale)
            .with_user_area(self.user_area.unwrap_or(self.bounds))
            .with_raw_placement(self.placement.unwrap_or(self.bounds))
            .with_dpi(self.dpi.unwrap_or(BASE_DPI * self.scale))
            .with_safe_area_insets(self.safe_area_insets)
            .with_keyboard_insets(self.keyboard_insets);
        if self.is_main {
            raw = raw.main();
        }
        raw
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "display {index} has scale {}, expected a positive number",
                self.scale
            )));
        }
        let b = self.bounds;
        if !(b.width > 0.0 && b.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "display {index} has empty bounds {}x{}",
                b.width, b.height
            )));
        }
        Ok(())
    }
}

impl LayoutFile {
    /// The entries converted to raw display records, in file order.
    pub fn raw_displays(&self) -> Vec<RawDisplay> {
        self.displays.iter().map(DisplayEntry::to_raw_display).collect()
    }

    /// Rejects entries no platform could report.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.displays
            .iter()
            .enumerate()
            .try_for_each(|(index, entry)| entry.validate(index))
    }
}

impl DisplayEnumerator for LayoutFile {
    fn enumerate_displays(&self) -> Result<Vec<RawDisplay>, EnumerationError> {
        Ok(self.raw_displays())
    }
}

// ── Layout repository ─────────────────────────────────────────────────────────

/// Parses and validates layout TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed and
/// [`ConfigError::Invalid`] if an entry fails validation.
pub fn parse_layout(content: &str) -> Result<LayoutFile, ConfigError> {
    let layout: LayoutFile = toml::from_str(content)?;
    layout.validate()?;
    Ok(layout)
}

/// Loads a layout from `path`.
///
/// Unlike an application config there is no sensible default monitor set, so
/// a missing file is an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_layout`].
pub fn load_layout(path: &Path) -> Result<LayoutFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_layout(&content)?;
    debug!(
        "loaded {} display entr(ies) from {}",
        layout.displays.len(),
        path.display()
    );
    Ok(layout)
}

/// Writes `layout` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_layout(path: &Path, layout: &LayoutFile) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(layout)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
