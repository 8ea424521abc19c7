// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Julia set renderers.
//!
//! Two ways to produce the same image.  The sequential renderer walks
//! every pixel on the calling thread; it is the yardstick the patched
//! renderer is checked against, and the one-worker point of a speedup
//! curve.  The patched renderer cuts the image into patches, runs them
//! on a pool of workers, and copies each finished patch into the image
//! as soon as it arrives.  Both go through the same pixel-to-point
//! mapping and the same iteration, so their outputs are identical, not
//! merely close.

use std::mem;
use std::time::Instant;

use itertools::iproduct;
use log::info;
use num::Complex;

use crate::errors::{invalid, Result};
use crate::escape;
use crate::grid::ImageBuffer;
use crate::patches::{self, positive};
use crate::planes::{Domain, Pixel};
use crate::pool;
use crate::report::TimingSample;

/// A finished image and how long it took.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// The complete image; every cell has been written exactly once.
    pub image: ImageBuffer,
    /// The run's configuration and wall-clock time.
    pub sample: TimingSample,
}

/// Renders one Julia set: a square image of `size` pixels a side over
/// `domain`, for the constant `c`.  Once built it is never mutated, so
/// one renderer can serve any number of runs.
#[derive(Copy, Clone, Debug)]
pub struct JuliaRenderer {
    size: usize,
    domain: Domain,
    c: Complex<f64>,
}

impl JuliaRenderer {
    /// Requires the side length of the image, the rectangle of the
    /// complex plane it covers, and the Julia constant.  The image must
    /// be addressable in memory.
    pub fn new(size: i64, domain: Domain, c: Complex<f64>) -> Result<Self> {
        let size = positive(size, "image size")?;
        size.checked_mul(size)
            .and_then(|cells| cells.checked_mul(mem::size_of::<f64>()))
            .ok_or_else(|| invalid(format!("image size {} is too large", size)))?;
        Ok(JuliaRenderer { size, domain, c })
    }

    /// Side length of the image.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The rectangle of the complex plane being rendered.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The Julia constant.
    pub fn constant(&self) -> Complex<f64> {
        self.c
    }

    /// Render every pixel on the calling thread.
    pub fn julia_single(&self) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.size);
        for (x, y) in iproduct!(0..self.size, 0..self.size) {
            let ratio = escape::evaluate(&Pixel(x, y), self.size, &self.domain, self.c);
            image.set(x, y, ratio);
        }
        image
    }

    /// `julia_single`, timed.  The sample records the whole image as one
    /// patch on one worker.
    pub fn julia_single_timed(&self) -> Rendered {
        let start = Instant::now();
        let image = self.julia_single();
        let elapsed = start.elapsed();
        info!(
            "sequential render of {0}x{0} took {1:.6}s",
            self.size,
            elapsed.as_secs_f64()
        );
        Rendered {
            image,
            sample: TimingSample::new(self.size, self.size, 1, elapsed),
        }
    }

    /// Render the image in patches of `patch_length` pixels a side on
    /// `workers` threads.  Each patch is its own task, whatever the
    /// ratio of patches to workers.  The clock covers planning,
    /// allocation, dispatch and collection; arguments are checked
    /// before it starts.
    ///
    /// A worker that dies takes the whole run with it: the error is
    /// `ComputationFailed` and no image is returned.
    pub fn julia(&self, patch_length: i64, workers: i64) -> Result<Rendered> {
        let patch_length = positive(patch_length, "patch length")?;
        let workers = positive(workers, "worker count")?;

        let start = Instant::now();
        let plan = patches::plan(self.size, patch_length);
        let count = plan.len();
        let mut image = ImageBuffer::new(self.size);
        #[cfg(debug_assertions)]
        let mut coverage = vec![false; image.len()];

        let (size, domain, c) = (self.size, self.domain, self.c);
        pool::run(
            plan,
            workers,
            |descriptor| patches::execute_patch(&descriptor, size, &domain, c),
            |result| {
                #[cfg(debug_assertions)]
                mark_written(&mut coverage, size, &result.descriptor);
                image.blit(&result);
            },
        )?;
        let elapsed = start.elapsed();

        #[cfg(debug_assertions)]
        debug_assert!(coverage.iter().all(|w| *w), "image has unwritten cells");

        info!(
            "rendered {0}x{0} in {1} patches of {2} on {3} workers: {4:.6}s",
            size,
            count,
            patch_length,
            workers,
            elapsed.as_secs_f64()
        );
        Ok(Rendered {
            image,
            sample: TimingSample::new(size, patch_length, workers, elapsed),
        })
    }
}

#[cfg(debug_assertions)]
fn mark_written(coverage: &mut [bool], size: usize, descriptor: &patches::PatchDescriptor) {
    for (x, y) in iproduct!(
        descriptor.x_start..descriptor.x_start + descriptor.width,
        descriptor.y_start..descriptor.y_start + descriptor.height
    ) {
        let cell = &mut coverage[x * size + y];
        debug_assert!(!*cell, "pixel {},{} written twice", x, y);
        *cell = true;
    }
}
