//! Canvas viewport state
//!
//! The canvas is panned and zoomed as a whole; node positions are stored in
//! canvas coordinates. Pointer events arrive in screen coordinates, so drop
//! handling projects them through the active transform.

use serde::{Deserialize, Serialize};

use dripline_graph::Position;

/// Smallest zoom factor the canvas allows
pub const MIN_ZOOM: f64 = 0.25;
/// Largest zoom factor the canvas allows
pub const MAX_ZOOM: f64 = 2.0;

/// Pan/zoom transform of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal pan offset in screen pixels
    pub x: f64,
    /// Vertical pan offset in screen pixels
    pub y: f64,
    /// Zoom factor
    pub zoom: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self {
            x,
            y,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Shift the pan offset by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Set the zoom factor, clamped to the allowed range
    pub fn zoom_to(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Project a screen point into canvas coordinates
    pub fn to_canvas(&self, screen: Position) -> Position {
        Position::new((screen.x - self.x) / self.zoom, (screen.y - self.y) / self.zoom)
    }

    /// Project a canvas point into screen coordinates
    pub fn to_screen(&self, canvas: Position) -> Position {
        Position::new(canvas.x * self.zoom + self.x, canvas.y * self.zoom + self.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}
