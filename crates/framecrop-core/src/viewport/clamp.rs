use super::{FrameSize, ImageSize, ViewportState};

/// Tolerance used when checking coverage of an already clamped state.
const COVERAGE_EPSILON: f64 = 1e-9;

/// Keeps a viewport legal for one image inside one frame.
///
/// A legal state has `min_scale <= scale <= max_scale` and offsets that leave
/// no empty band inside the frame on any side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampPolicy {
    image: ImageSize,
    frame: FrameSize,
    min_scale: f64,
    max_scale: f64,
}

impl ClampPolicy {
    /// `max_scale` is the configured ceiling. It is raised to the cover scale
    /// when the image is too small to cover the frame below it.
    pub fn new(image: ImageSize, frame: FrameSize, max_scale: f64) -> Self {
        let min_scale = cover_scale(image, frame);
        Self {
            image,
            frame,
            min_scale,
            max_scale: max_scale.max(min_scale),
        }
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        self.max_scale.min(self.min_scale.max(scale))
    }

    pub fn clamp_offset_x(&self, offset_x: f64, scale: f64) -> f64 {
        let scaled_w = self.image.width as f64 * scale;
        0f64.min((self.frame.width - scaled_w).max(offset_x))
    }

    pub fn clamp_offset_y(&self, offset_y: f64, scale: f64) -> f64 {
        let scaled_h = self.image.height as f64 * scale;
        0f64.min((self.frame.height - scaled_h).max(offset_y))
    }

    /// Clamp scale first, then both offsets against the clamped scale.
    pub fn clamp(&self, state: ViewportState) -> ViewportState {
        let scale = self.clamp_scale(state.scale);
        ViewportState {
            scale,
            offset_x: self.clamp_offset_x(state.offset_x, scale),
            offset_y: self.clamp_offset_y(state.offset_y, scale),
        }
    }

    /// Cover scale, image centered in the frame.
    pub fn initialize(&self) -> ViewportState {
        self.centered(self.min_scale)
    }

    /// Image centered at the given (clamped) scale.
    pub fn centered(&self, scale: f64) -> ViewportState {
        let scale = self.clamp_scale(scale);
        let offset_x = (self.frame.width - self.image.width as f64 * scale) / 2.0;
        let offset_y = (self.frame.height - self.image.height as f64 * scale) / 2.0;
        self.clamp(ViewportState::new(scale, offset_x, offset_y))
    }

    /// True when the state satisfies every coverage invariant.
    pub fn is_legal(&self, state: &ViewportState) -> bool {
        let eps = COVERAGE_EPSILON * self.max_scale.max(1.0);
        let scaled_w = self.image.width as f64 * state.scale;
        let scaled_h = self.image.height as f64 * state.scale;
        state.scale >= self.min_scale - eps
            && state.scale <= self.max_scale + eps
            && state.offset_x <= eps
            && state.offset_y <= eps
            && state.offset_x + scaled_w >= self.frame.width - eps * scaled_w
            && state.offset_y + scaled_h >= self.frame.height - eps * scaled_h
    }
}

/// Smallest scale at which the image spans the frame in both dimensions.
pub fn cover_scale(image: ImageSize, frame: FrameSize) -> f64 {
    let sx = frame.width / image.width as f64;
    let sy = frame.height / image.height as f64;
    sx.max(sy)
}
