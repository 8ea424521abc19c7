// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Domain struct, which describes the rectangle on the
//! complex plane being rendered, and the mapping from a pixel of a
//! square integral plane with its origin at 0,0 onto that rectangle.
use num::Complex;

use crate::errors::{invalid, Result};

/// Describes the x, y of a pixel in the square image.  `.0` is the
/// column along the real axis, `.1` the row along the imaginary axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// The region of the complex plane being rendered, real part on the
/// x-axis and imaginary part on the y-axis.  Once built it is never
/// modified; every renderer holds its own copy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Domain {
    /// Smallest real part.
    pub xmin: f64,
    /// Largest real part.
    pub xmax: f64,
    /// Smallest imaginary part.
    pub ymin: f64,
    /// Largest imaginary part.
    pub ymax: f64,
}

impl Domain {
    /// Constructor.  Bounds must be finite, with each minimum strictly
    /// below its maximum.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Domain> {
        if !(xmin.is_finite() && xmax.is_finite() && ymin.is_finite() && ymax.is_finite()) {
            return Err(invalid("domain bounds must be finite numbers"));
        }

        if xmin >= xmax {
            return Err(invalid(format!(
                "xmin ({}) must be smaller than xmax ({})",
                xmin, xmax
            )));
        }

        if ymin >= ymax {
            return Err(invalid(format!(
                "ymin ({}) must be smaller than ymax ({})",
                ymin, ymax
            )));
        }

        Ok(Domain {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Width of the region along the real axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height of the region along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Given a pixel of a `size` x `size` image, return the complex
    /// number it stands for.  The left and top edges of the image land
    /// exactly on `xmin` and `ymin`; `xmax` and `ymax` are never reached.
    ///
    /// The order of operations is fixed: every renderer goes through
    /// here, so the patched and sequential images agree bit for bit.
    pub fn pixel_to_point(&self, pixel: &Pixel, size: usize) -> Complex<f64> {
        let side = size as f64;
        Complex::new(
            (pixel.0 as f64) / side * self.width() + self.xmin,
            (pixel.1 as f64) / side * self.height() + self.ymin,
        )
    }
}

impl Default for Domain {
    /// The square [-1.5, 1.5] x [-1.5, 1.5].
    fn default() -> Self {
        Domain {
            xmin: -1.5,
            xmax: 1.5,
            ymin: -1.5,
            ymax: 1.5,
        }
    }
}
