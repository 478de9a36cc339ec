// Save the current frame as a PNG named after the wall-clock time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use image::{GrayImage, ImageFormat};
use tracing::info;

use crate::error::Error;
use crate::types::Frame;

/// `reaction-diffusion_<Y>-<M>-<D>_<h>-<m>-<s>.png`, fields unpadded.
pub fn export_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("reaction-diffusion_{}.png", at.format("%Y-%-m-%-d_%-H-%-M-%-S"))
}

pub fn save_png(frame: &Frame, path: &Path) -> Result<(), Error> {
    let img = GrayImage::from_raw(frame.width as u32, frame.height as u32, frame.pixels.clone())
        .ok_or(Error::FrameSize { width: frame.width, height: frame.height })?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Export { path: path.to_path_buf(), source })
}

/// Write `frame` into `dir` under a timestamped name; returns the path.
pub fn export_frame(frame: &Frame, dir: &Path) -> Result<PathBuf, Error> {
    let path = dir.join(export_file_name(&Local::now()));
    save_png(frame, &path)?;
    info!(path = %path.display(), "frame exported");
    Ok(path)
}
