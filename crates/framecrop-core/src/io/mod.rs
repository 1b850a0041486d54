pub mod encode;
pub mod handle;
pub mod resize;
pub mod source;

pub use encode::{
    derive_filename, encode_with_fallback, Encoded, Encoder, ImageCrateEncoder, OutputFormat,
    Quality,
};
pub use handle::{DisplayHandle, DisplayHandles};
pub use resize::resize_image;
pub use source::{check_mime, decode, mime_for_path, SourceFile, SourceImage};
