//! Canvas viewport: pan/zoom transform and drag state machine.
//!
//! The editor renders a graph document on a pannable, zoomable canvas.
//! The viewport owns the affine transform `screen = pan + zoom * document`
//! and the drag state driving it. Zoom is anchored at the canvas center;
//! there is no cursor-relative zoom in this design.

use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;

/// A 2D position, in screen or document space depending on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(
        self,
        rhs: Point,
    ) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(
        self,
        rhs: Point,
    ) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pan/zoom state of one editor canvas.
///
/// Drag handling is resilient to missing or out-of-order pointer
/// events: a `begin_drag` while a drag is in flight implicitly ends the
/// stale drag, and `continue_drag` is a no-op when no drag is active
/// (stray move events after mouse-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pan: Point,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    /// Last pointer position while dragging.
    #[serde(skip)]
    drag_origin: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            pan: Point::default(),
            zoom: 1.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            drag_origin: None,
        }
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Starts a drag at the given pointer position. A drag already in
    /// flight is treated as stale and ended first.
    pub fn begin_drag(
        &mut self,
        pointer: Point,
    ) {
        if self.drag_origin.is_some() {
            self.end_drag();
        }
        self.drag_origin = Some(pointer);
    }

    /// Applies a pointer move to the pan offset. No-op when not
    /// dragging.
    pub fn continue_drag(
        &mut self,
        pointer: Point,
    ) {
        if let Some(origin) = self.drag_origin {
            self.pan = self.pan + (pointer - origin);
            self.drag_origin = Some(pointer);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Adjusts the zoom factor, clamped to the configured bounds. The
    /// min/max chain never panics, even on a malformed range.
    pub fn zoom_by(
        &mut self,
        delta: f64,
    ) {
        self.zoom = (self.zoom + delta).min(self.max_zoom).max(self.min_zoom);
    }

    /// One zoom-in step.
    pub fn zoom_in(&mut self) {
        self.zoom_by(self.zoom_step);
    }

    /// One zoom-out step.
    pub fn zoom_out(&mut self) {
        self.zoom_by(-self.zoom_step);
    }

    /// Restores the identity transform.
    pub fn reset(&mut self) {
        self.pan = Point::default();
        self.zoom = 1.0;
    }

    /// Maps a document-space point to screen space:
    /// `screen = pan + zoom * document`.
    pub fn document_to_screen(
        &self,
        p: Point,
    ) -> Point {
        Point::new(self.pan.x + self.zoom * p.x, self.pan.y + self.zoom * p.y)
    }

    /// Exact inverse of `document_to_screen`. Zoom is clamped above
    /// zero, so the transform is always invertible.
    pub fn screen_to_document(
        &self,
        p: Point,
    ) -> Point {
        Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
    }
}
