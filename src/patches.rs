// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cutting the square image into patches, and rendering one patch.
//!
//! Patches are laid out on a grid of origins spaced `patch_length`
//! apart along both axes, swept x-major: every patch of the first
//! column of origins, top to bottom, then the next column.  Patches on
//! the right and bottom edges shrink to fit when the image size is not
//! a multiple of the patch length, so the patches tile the image with
//! no overlap and no gap.

use itertools::iproduct;
use num::Complex;

use crate::errors::{invalid, Result};
use crate::escape;
use crate::planes::{Domain, Pixel};

/// One rectangular unit of work: its top-left pixel and its extent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatchDescriptor {
    /// Column of the patch's first pixel.
    pub x_start: usize,
    /// Row of the patch's first pixel.
    pub y_start: usize,
    /// Columns covered.
    pub width: usize,
    /// Rows covered.
    pub height: usize,
}

impl PatchDescriptor {
    /// Plain constructor; no validation against any image.
    pub fn new(x_start: usize, y_start: usize, width: usize, height: usize) -> Self {
        PatchDescriptor {
            x_start,
            y_start,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// A rendered patch: where it goes and what goes there.  `local` holds
/// `width * height` ratios, x-major.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchResult {
    /// The patch this buffer was rendered for.
    pub descriptor: PatchDescriptor,
    /// The rendered ratios.
    pub local: Vec<f64>,
}

/// Check a signed dimension from the outside world and convert it.
pub(crate) fn positive(value: i64, what: &str) -> Result<usize> {
    if value <= 0 {
        return Err(invalid(format!("{} must be positive, got {}", what, value)));
    }
    Ok(value as usize)
}

/// Lay out the patches covering a `size` x `size` image.  A patch
/// length at or above the size gives one patch covering everything.
pub fn plan_patches(size: i64, patch_length: i64) -> Result<Vec<PatchDescriptor>> {
    let size = positive(size, "image size")?;
    let patch_length = positive(patch_length, "patch length")?;
    Ok(plan(size, patch_length))
}

pub(crate) fn plan(size: usize, patch_length: usize) -> Vec<PatchDescriptor> {
    iproduct!(
        (0..size).step_by(patch_length),
        (0..size).step_by(patch_length)
    )
    .map(|(x, y)| {
        PatchDescriptor::new(
            x,
            y,
            patch_length.min(size - x),
            patch_length.min(size - y),
        )
    })
    .collect()
}

/// Render every pixel of one patch of a `size` x `size` image.  Pure:
/// patches can be rendered on any thread, in any order.
pub fn execute_patch(
    descriptor: &PatchDescriptor,
    size: usize,
    domain: &Domain,
    c: Complex<f64>,
) -> PatchResult {
    let mut local = Vec::with_capacity(descriptor.area());
    for (ix, iy) in iproduct!(0..descriptor.width, 0..descriptor.height) {
        let pixel = Pixel(descriptor.x_start + ix, descriptor.y_start + iy);
        local.push(escape::evaluate(&pixel, size, domain, c));
    }
    PatchResult {
        descriptor: *descriptor,
        local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_tiles(size: usize, patch_length: usize) {
        let plan = plan(size, patch_length);
        let total: usize = plan.iter().map(|p| p.area()).sum();
        assert_eq!(total, size * size, "size {} patch {}", size, patch_length);

        let mut seen = HashSet::new();
        for p in &plan {
            assert!(p.width > 0 && p.height > 0);
            assert!(p.x_start + p.width <= size);
            assert!(p.y_start + p.height <= size);
            for (x, y) in iproduct!(p.x_start..p.x_start + p.width, p.y_start..p.y_start + p.height) {
                assert!(seen.insert((x, y)), "pixel {},{} covered twice", x, y);
            }
        }
        assert_eq!(seen.len(), size * size);
    }

    #[test]
    fn plans_tile_the_image() {
        for size in 1..24 {
            for patch_length in 1..(size + 3) {
                assert_tiles(size, patch_length);
            }
        }
        assert_tiles(500, 20);
        assert_tiles(500, 33);
    }

    #[test]
    fn unit_patches_are_one_pixel_each() {
        let plan = plan_patches(7, 1).unwrap();
        assert_eq!(plan.len(), 49);
        assert!(plan.iter().all(|p| p.width == 1 && p.height == 1));
    }

    #[test]
    fn oversized_patch_covers_everything() {
        for patch_length in &[10, 11, 1000] {
            let plan = plan_patches(10, *patch_length).unwrap();
            assert_eq!(plan, vec![PatchDescriptor::new(0, 0, 10, 10)]);
        }
    }

    #[test]
    fn edge_patches_shrink() {
        let plan = plan_patches(5, 2).unwrap();
        assert_eq!(plan.len(), 9);
        assert_eq!(plan[0], PatchDescriptor::new(0, 0, 2, 2));
        assert_eq!(plan[2], PatchDescriptor::new(0, 4, 2, 1));
        assert_eq!(plan[6], PatchDescriptor::new(4, 0, 1, 2));
        assert_eq!(plan[8], PatchDescriptor::new(4, 4, 1, 1));
    }

    #[test]
    fn sweep_is_x_major() {
        let plan = plan_patches(4, 2).unwrap();
        let origins: Vec<(usize, usize)> = plan.iter().map(|p| (p.x_start, p.y_start)).collect();
        assert_eq!(origins, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(plan_patches(0, 4).unwrap_err().is_configuration());
        assert!(plan_patches(10, -1).unwrap_err().is_configuration());
        assert!(plan_patches(-3, 0).unwrap_err().is_configuration());
    }

    #[test]
    fn executed_patch_matches_pixelwise_evaluation() {
        let domain = Domain::default();
        let c = Complex::new(-0.2, -0.65);
        let desc = PatchDescriptor::new(6, 3, 4, 5);
        let result = execute_patch(&desc, 12, &domain, c);
        assert_eq!(result.descriptor, desc);
        assert_eq!(result.local.len(), 20);
        for (ix, iy) in iproduct!(0..4, 0..5) {
            let expected = escape::evaluate(&Pixel(6 + ix, 3 + iy), 12, &domain, c);
            assert_eq!(result.local[ix * 5 + iy], expected);
        }
    }
}
