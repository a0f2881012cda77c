//! Configuration types for layout and drawing.
//!
//! All types implement [`serde::Deserialize`] so the command line tool can
//! load them from a TOML file; every field has a default.
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`SpringConfig`] - Spring layout constants (re-exported from
//!   [`crate::layout`]).
//! - [`RenderConfig`] - Canvas size and colours.
//! - [`SnapshotConfig`] - How many algorithm snapshots a graph keeps.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 500);
//! assert!(config.render().background_color().is_ok());
//! ```

use serde::Deserialize;

use trellis_core::color::Color;

use crate::{graph::SnapshotRetention, render::Viewport};

pub use crate::layout::SpringConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Spring layout section.
    #[serde(default)]
    layout: SpringConfig,

    /// Drawing section.
    #[serde(default)]
    render: RenderConfig,

    /// Snapshot retention section.
    #[serde(default)]
    snapshots: SnapshotConfig,
}

impl AppConfig {
    pub fn new(layout: SpringConfig, render: RenderConfig, snapshots: SnapshotConfig) -> Self {
        Self {
            layout,
            render,
            snapshots,
        }
    }

    pub fn layout(&self) -> &SpringConfig {
        &self.layout
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn snapshots(&self) -> &SnapshotConfig {
        &self.snapshots
    }

    /// Replaces the layout section, keeping the rest.
    pub fn with_layout(mut self, layout: SpringConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Canvas and colour settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    width: f64,
    height: f64,
    /// Margin kept free around the drawing.
    radius: f64,
    background_color: Option<String>,
    edge_color: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.width(),
            height: viewport.height(),
            radius: viewport.radius(),
            background_color: None,
            edge_color: None,
        }
    }
}

impl RenderConfig {
    pub fn new(width: f64, height: f64, radius: f64) -> Self {
        Self {
            width,
            height,
            radius,
            ..Self::default()
        }
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_edge_color(mut self, color: impl Into<String>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.radius)
    }

    /// Returns the parsed background [`Color`], or `None` if none is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid colour.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref())
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed edge [`Color`], or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid colour.
    pub fn edge_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.edge_color.as_deref())
            .map_err(|err| format!("Invalid edge color in config: {err}"))
    }
}

fn parse_color(color: Option<&str>) -> Result<Option<Color>, String> {
    color.map(Color::new).transpose()
}

/// Snapshot retention settings.
///
/// `keep_last = 0` is accepted and keeps nothing; leaving the key out keeps
/// the default window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    keep_last: Option<usize>,
    unbounded: bool,
}

impl SnapshotConfig {
    pub fn unbounded() -> Self {
        Self {
            keep_last: None,
            unbounded: true,
        }
    }

    pub fn keep_last(limit: usize) -> Self {
        Self {
            keep_last: Some(limit),
            unbounded: false,
        }
    }

    pub fn retention(&self) -> SnapshotRetention {
        match (self.unbounded, self.keep_last) {
            (true, _) => SnapshotRetention::Unbounded,
            (false, Some(limit)) => SnapshotRetention::KeepLast(limit),
            (false, None) => SnapshotRetention::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.render().viewport(), Viewport::default());
        assert_eq!(config.render().background_color(), Ok(None));
        assert_eq!(
            config.snapshots().retention(),
            SnapshotRetention::default()
        );
    }

    #[test]
    fn test_invalid_color() {
        let render = RenderConfig::default().with_edge_color("not-a-color");
        let err = render.edge_color().unwrap_err();
        assert!(err.starts_with("Invalid edge color in config"));
    }

    #[test]
    fn test_valid_color() {
        let render = RenderConfig::default().with_background_color("white");
        assert!(render.background_color().unwrap().is_some());
    }

    #[test]
    fn test_retention() {
        assert_eq!(
            SnapshotConfig::unbounded().retention(),
            SnapshotRetention::Unbounded
        );
        assert_eq!(
            SnapshotConfig::keep_last(3).retention(),
            SnapshotRetention::KeepLast(3)
        );
    }
}
