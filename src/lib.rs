#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Patch-parallel Julia set renderer
//!
//! A Julia set is drawn by taking every pixel of an image, mapping it
//! to a point `z` on the complex plane, and repeatedly applying
//! `z <- z * z + c` for some fixed constant `c`.  The number of
//! iterations it takes for `z` to run away from the origin (or the
//! iteration cap, if it never does) is the intensity of that pixel.
//!
//! Every pixel is independent of every other, which makes the Julia
//! set a good yardstick for parallel scaling.  This crate cuts the
//! square image into rectangular patches, hands each patch to a fixed
//! pool of worker threads, and stitches the patches back into a single
//! buffer as they come home, in whatever order they finish.  A plain
//! single-threaded renderer is kept alongside as the reference the
//! patched output must match exactly, and as the one-worker baseline
//! for speedup measurements.
//!
//! The timing of each run can be appended to a CSV log and later
//! summarized into runtime, speedup and efficiency figures.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod errors;
pub mod escape;
pub mod grid;
pub mod paint;
pub mod patches;
pub mod planes;
pub mod pool;
pub mod renderer;
pub mod report;

pub use errors::{JuliaError, Result};
pub use grid::ImageBuffer;
pub use patches::{PatchDescriptor, PatchResult};
pub use planes::{Domain, Pixel};
pub use renderer::{JuliaRenderer, Rendered};
pub use report::TimingSample;
