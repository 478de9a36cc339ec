// Loads the seed image the canvas starts from.
// Visual expectation: right after startup (or a resolution change) the
// window shows this image, resampled to the canvas size, in grayscale.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::GrayImage;
use tracing::info;

use crate::error::Error;
use crate::params::Resolution;
use crate::types::Frame;

/// Decoded once; every (re)initialization resamples from this source, never
/// from whatever the canvas currently shows.
#[derive(Clone)]
pub struct SeedImage {
    source: GrayImage,
}

impl SeedImage {
    /// Decode any format the `image` crate understands and drop to luma.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let img = image::open(path)
            .map_err(|source| Error::SeedImage { path: path.to_path_buf(), source })?;
        let source = img.to_luma8();
        info!(path = %path.display(), width = source.width(), height = source.height(), "seed image loaded");
        Ok(Self { source })
    }

    pub fn from_gray(source: GrayImage) -> Self {
        Self { source }
    }

    /// A fresh frame at `resolution`, stretched to fill the square canvas.
    pub fn frame_at(&self, resolution: Resolution) -> Frame {
        let side = resolution.px();
        let resized = if self.source.dimensions() == (side, side) {
            self.source.clone()
        } else {
            imageops::resize(&self.source, side, side, FilterType::Triangle)
        };
        Frame {
            width: side as usize,
            height: side as usize,
            pixels: resized.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn resamples_to_requested_side() {
        let seed = SeedImage::from_gray(GrayImage::from_pixel(50, 80, Luma([77])));
        let f = seed.frame_at(Resolution::or_default(200));
        assert_eq!((f.width, f.height), (200, 200));
        assert!(f.pixels.iter().all(|&v| v == 77));
    }

    #[test]
    fn missing_file_is_a_seed_error() {
        let err = SeedImage::open(Path::new("definitely/not/here.png")).err();
        assert!(matches!(err, Some(Error::SeedImage { .. })));
    }
}
