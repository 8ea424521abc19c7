// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning an intensity buffer into a picture on disk.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::errors::Result;
use crate::grid::ImageBuffer;

/// The "hot" colour map: black through red and yellow to white.  Red
/// saturates first, then green, then blue.
pub fn hot(value: f64) -> Rgb<u8> {
    let v = value.max(0.0).min(1.0);
    let ramp = |lo: f64, hi: f64| -> u8 {
        let t = ((v - lo) / (hi - lo)).max(0.0).min(1.0);
        (t * 255.0).round() as u8
    };
    Rgb([ramp(0.0, 0.365), ramp(0.365, 0.746), ramp(0.746, 1.0)])
}

/// Colour every cell.  The buffer's first index becomes the picture's
/// row, so the real axis runs top to bottom and the imaginary axis
/// left to right.
pub fn colorize(buffer: &ImageBuffer) -> RgbImage {
    let size = buffer.size() as u32;
    RgbImage::from_fn(size, size, |col, row| {
        hot(buffer.get(row as usize, col as usize))
    })
}

/// Write the buffer to `path`; the format follows the extension.
pub fn write_image<P: AsRef<Path>>(path: P, buffer: &ImageBuffer) -> Result<()> {
    colorize(buffer).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn hot_runs_black_to_white() {
        assert_eq!(hot(0.0), Rgb([0, 0, 0]));
        assert_eq!(hot(1.0), Rgb([255, 255, 255]));
        assert_eq!(hot(0.5), Rgb([255, 90, 0]));
    }

    #[test]
    fn hot_clamps() {
        assert_eq!(hot(-3.0), hot(0.0));
        assert_eq!(hot(7.0), hot(1.0));
    }

    #[test]
    fn rows_are_first_index() {
        let mut buffer = ImageBuffer::new(3);
        buffer.set(2, 0, 1.0);
        let picture = colorize(&buffer);
        assert_eq!(*picture.get_pixel(0, 2), Rgb([255, 255, 255]));
        assert_eq!(*picture.get_pixel(2, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("julia.png");
        write_image(&path, &ImageBuffer::new(8)).unwrap();
        let back = image::open(&path).unwrap();
        assert_eq!(back.width(), 8);
        assert_eq!(back.height(), 8);
    }
}
