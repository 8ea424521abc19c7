// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The dense square buffer of intensities a run produces.

use std::ops::Index;

use crate::patches::PatchResult;

/// A `size` x `size` grid of intensities in `[0, 1]`, stored x-major
/// so that `buffer[x]` is the column of the image at real offset `x`
/// and `buffer[x][y]` the single cell below it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    size: usize,
    cells: Vec<f64>,
}

impl ImageBuffer {
    /// A zeroed buffer.
    pub fn new(size: usize) -> ImageBuffer {
        ImageBuffer {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Side length of the image in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized image.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[self.offset(x, y)]
    }

    /// Overwrite the value at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let offset = self.offset(x, y);
        self.cells[offset] = value;
    }

    /// All cells, x-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Copy a finished patch into its region.  The patch's local buffer
    /// is x-major too, so each of its columns lands as one contiguous
    /// run of cells.
    pub fn blit(&mut self, patch: &PatchResult) {
        let desc = &patch.descriptor;
        assert!(desc.x_start + desc.width <= self.size && desc.y_start + desc.height <= self.size);
        for (ix, column) in patch.local.chunks(desc.height).enumerate() {
            let start = self.offset(desc.x_start + ix, desc.y_start);
            self.cells[start..start + desc.height].copy_from_slice(column);
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }
}

impl Index<usize> for ImageBuffer {
    type Output = [f64];

    fn index(&self, x: usize) -> &[f64] {
        let start = x * self.size;
        &self.cells[start..start + self.size]
    }
}
