use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not an image: {name} ({mime})")]
    InvalidFileType { name: String, mime: String },

    #[error("Failed to decode image: {0}")]
    ImageDecodeFailure(String),

    #[error("Drawing surface unavailable: {0}")]
    CanvasUnavailable(String),

    #[error("Image encoding failed: {0}")]
    EncodeFailure(String),

    #[error("Another {0} is still in progress")]
    OperationInFlight(&'static str),

    #[error("Invalid editor state: {0}")]
    InvalidState(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CropError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidFileType { .. } => "Choose an image (JPEG, PNG or WebP)".to_string(),
            Self::ImageDecodeFailure(_) => "The selected image could not be opened".to_string(),
            Self::CanvasUnavailable(_) | Self::EncodeFailure(_) => {
                "Failed to process the image".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CropError>;
