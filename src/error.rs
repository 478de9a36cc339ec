// Library error type. Every variant states *where* things went wrong.
// Only startup (seed image, window) is fatal; export and settings
// failures are logged by the caller and the loop keeps going.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// The seed image is missing or cannot be decoded.
    #[error("seed image {}: {source}", path.display())]
    SeedImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Writing an exported PNG failed.
    #[error("export to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A frame whose buffer does not match its stated size.
    #[error("frame buffer does not match {width}x{height}")]
    FrameSize { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Settings file could not be encoded.
    #[error(transparent)]
    Settings(#[from] serde_json::Error),
}
