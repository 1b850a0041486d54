/// Textures shown by the viewport and the preview.
#[derive(Default)]
pub struct ViewState {
    /// Source image of the current session.
    pub texture: Option<egui::TextureHandle>,
    /// Decoded thumbnail of the last confirmed crop.
    pub preview: Option<egui::TextureHandle>,
}
