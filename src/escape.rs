// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration at the heart of the Julia set.

use num::Complex;

use crate::planes::{Domain, Pixel};

/// Once `|z|` grows past this, the point is taken to have escaped.
pub const ZABS_MAX: f64 = 10.0;

/// The most iterations spent on a single point.
pub const NIT_MAX: u32 = 300;

/// Iterate `z <- z * z + c` starting from `z0`, counting steps until
/// `|z|` exceeds `ZABS_MAX` or the count reaches `NIT_MAX`, and return
/// the count as a fraction of `NIT_MAX`.  The result is always in
/// `[0, 1]`: a point outside the bound returns 0, a point that never
/// escapes returns exactly 1.
#[inline]
pub fn escape_ratio(z0: Complex<f64>, c: Complex<f64>) -> f64 {
    let mut z = z0;
    let mut nit = 0;
    while z.norm() <= ZABS_MAX && nit < NIT_MAX {
        z = z * z + c;
        nit += 1;
    }
    f64::from(nit) / f64::from(NIT_MAX)
}

/// Map a pixel of a `size` x `size` image into `domain` and return
/// its escape ratio for the constant `c`.
#[inline]
pub fn evaluate(pixel: &Pixel, size: usize, domain: &Domain, c: Complex<f64>) -> f64 {
    escape_ratio(domain.pixel_to_point(pixel, size), c)
}
