//! Configuration types for Mooring diagram emission.
//!
//! This module provides configuration structures that control how converted
//! tables are placed on the output canvas. All types implement
//! [`serde::Deserialize`] for loading from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Canvas offsets and the tie parking point.

use serde::Deserialize;

use mooring_core::geometry::Point;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Placement configuration for the output canvas.
///
/// Anchors stack vertically at `x_offset`, starting at `y_offset` and
/// advancing by table height plus `y_offset`. Attributes stack rightward
/// from their owning anchor with `x_offset` gaps. Ties are all parked at
/// one fixed off-canvas point; their visual arrangement is left to the
/// human editor.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal border offset and inter-table gap.
    #[serde(default = "default_x_offset")]
    x_offset: i32,

    /// Vertical border offset and inter-anchor gap.
    #[serde(default = "default_y_offset")]
    y_offset: i32,

    /// X-coordinate of the tie parking point.
    #[serde(default = "default_tie_corner")]
    tie_x: i32,

    /// Y-coordinate of the tie parking point.
    #[serde(default = "default_tie_corner")]
    tie_y: i32,
}

fn default_x_offset() -> i32 {
    50
}

fn default_y_offset() -> i32 {
    100
}

fn default_tie_corner() -> i32 {
    -150
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_offset: default_x_offset(),
            y_offset: default_y_offset(),
            tie_x: default_tie_corner(),
            tie_y: default_tie_corner(),
        }
    }
}

impl LayoutConfig {
    /// Returns the horizontal offset.
    pub fn x_offset(&self) -> i32 {
        self.x_offset
    }

    /// Returns the vertical offset.
    pub fn y_offset(&self) -> i32 {
        self.y_offset
    }

    /// Returns the fixed parking point shared by all tie tables.
    pub fn tie_corner(&self) -> Point {
        Point::new(self.tie_x, self.tie_y)
    }
}
