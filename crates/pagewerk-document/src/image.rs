// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — size probing and decoding of images placed on pages.

use std::path::Path;

use image::{DynamicImage, RgbImage};
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_layout::render::Crop;
use tracing::{debug, instrument};

/// Native pixel size `(width, height)` of the image at `path`, read from
/// its header without decoding the pixels.
pub fn probe(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|err| {
        PagewerkError::ImageError(format!("failed to read size of {}: {}", path.display(), err))
    })
}

/// Decode the image at `path` to RGB8, keeping only the `crop` region.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_rgb(path: &Path, crop: Option<Crop>) -> Result<RgbImage> {
    let img = image::open(path).map_err(|err| {
        PagewerkError::ImageError(format!("failed to open {}: {}", path.display(), err))
    })?;
    let img = match crop {
        Some(crop) => apply_crop(&img, crop)?,
        None => img,
    };
    debug!(width = img.width(), height = img.height(), "Image decoded");
    Ok(img.to_rgb8())
}

/// The `crop` region of `img`, fractions rounded to whole pixels.
pub fn apply_crop(img: &DynamicImage, crop: Crop) -> Result<DynamicImage> {
    let (w, h) = (f64::from(img.width()), f64::from(img.height()));
    let x = (crop.x * w).round() as u32;
    let y = (crop.y * h).round() as u32;
    let width = ((crop.width * w).round() as u32).min(img.width().saturating_sub(x));
    let height = ((crop.height * h).round() as u32).min(img.height().saturating_sub(y));
    if width == 0 || height == 0 {
        return Err(PagewerkError::ImageError(format!(
            "crop {crop:?} leaves no pixels of a {}x{} image",
            img.width(),
            img.height()
        )));
    }
    Ok(img.crop_imm(x, y, width, height))
}
