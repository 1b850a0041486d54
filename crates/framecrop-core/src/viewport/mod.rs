//! Image-space to frame-space mapping.
//!
//! A point `(ix, iy)` in the source image is drawn at frame coordinate
//! `(offset_x + ix * scale, offset_y + iy * scale)`. The frame is the fixed
//! on-screen container the user crops through.

pub mod clamp;
pub mod gesture;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

pub use clamp::ClampPolicy;
pub use gesture::{GestureController, PointerId};

/// A position in frame coordinates (pixels from the frame's top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Natural pixel dimensions of a decoded source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Container frame size, fixed for the lifetime of an edit session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT)
    }
}

/// Current affine mapping from image space into the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewportState {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Frame position of an image-space point.
    pub fn image_to_frame(&self, image: Point) -> Point {
        Point::new(
            self.offset_x + image.x * self.scale,
            self.offset_y + image.y * self.scale,
        )
    }

    /// Image-space point drawn under a frame position.
    pub fn frame_to_image(&self, frame: Point) -> Point {
        Point::new(
            (frame.x - self.offset_x) / self.scale,
            (frame.y - self.offset_y) / self.scale,
        )
    }
}
