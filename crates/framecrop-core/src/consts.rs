/// Default export raster width in pixels.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 800;

/// Default export raster height in pixels (16:9 with the width above).
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 450;

/// Default on-screen crop frame width, in device-independent pixels.
pub const DEFAULT_FRAME_WIDTH: f64 = 640.0;

/// Default on-screen crop frame height, in device-independent pixels.
pub const DEFAULT_FRAME_HEIGHT: f64 = 360.0;

/// Lossy encode quality in (0.0, 1.0].
pub const DEFAULT_QUALITY: f32 = 0.82;

/// Absolute zoom ceiling. Raised to the cover scale for images too small to reach it.
pub const DEFAULT_MAX_SCALE: f64 = 3.0;

/// Scale change applied per wheel notch.
pub const DEFAULT_WHEEL_STEP: f64 = 0.05;

/// Widest output produced by the standalone resize helper.
pub const DEFAULT_RESIZE_MAX_WIDTH: u32 = 800;

/// Minimum output pixel count (w*h) to rasterize rows with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Tolerated difference between frame and output aspect ratios.
pub const ASPECT_TOLERANCE: f64 = 1e-3;

/// MIME prefix every accepted source file must carry.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// MIME reported for files whose extension maps to no known image format.
pub const FALLBACK_MIME: &str = "application/octet-stream";
