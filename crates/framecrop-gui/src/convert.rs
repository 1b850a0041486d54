use image::RgbaImage;

/// Largest texture side uploaded for display. Bigger sources are shrunk for
/// the screen only; export always samples the full-resolution pixels.
const MAX_TEXTURE_SIDE: u32 = 4096;

/// Convert RGBA pixels to an egui ColorImage, downscaling oversized images.
pub fn rgba_to_color_image(pixels: &RgbaImage) -> egui::ColorImage {
    let (w, h) = pixels.dimensions();
    if w.max(h) > MAX_TEXTURE_SIDE {
        let ratio = MAX_TEXTURE_SIDE as f64 / w.max(h) as f64;
        let tw = ((w as f64 * ratio).round() as u32).max(1);
        let th = ((h as f64 * ratio).round() as u32).max(1);
        let small = image::imageops::thumbnail(pixels, tw, th);
        return egui::ColorImage::from_rgba_unmultiplied(
            [tw as usize, th as usize],
            small.as_raw(),
        );
    }
    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], pixels.as_raw())
}

/// Decode an encoded crop for the preview thumbnail.
pub fn encoded_to_color_image(data: &[u8]) -> Option<egui::ColorImage> {
    let decoded = image::load_from_memory(data).ok()?.to_rgba8();
    Some(rgba_to_color_image(&decoded))
}
