// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by the renderer and its reporting layers.

use failure::Fail;

/// Everything that can go wrong in a run.  Configuration problems are
/// caught before any work is dispatched; a computation failure means a
/// worker died and the whole image was thrown away.
#[derive(Debug, Fail)]
pub enum JuliaError {
    /// The size, patch length, worker count or domain bounds were unusable.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// A worker terminated abnormally; no partial image is returned.
    #[fail(display = "computation failed: {}", _0)]
    ComputationFailed(String),

    /// Reading or writing a file failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] std::io::Error),

    /// The timing log could not be read or written.
    #[fail(display = "CSV error: {}", _0)]
    Csv(#[cause] csv::Error),

    /// The rendered image could not be encoded.
    #[fail(display = "image error: {}", _0)]
    Image(#[cause] image::ImageError),
}

impl JuliaError {
    /// True for errors detected before any computation started.
    pub fn is_configuration(&self) -> bool {
        match self {
            JuliaError::InvalidConfiguration(_) => true,
            _ => false,
        }
    }
}

impl From<std::io::Error> for JuliaError {
    fn from(e: std::io::Error) -> Self {
        JuliaError::Io(e)
    }
}

impl From<csv::Error> for JuliaError {
    fn from(e: csv::Error) -> Self {
        JuliaError::Csv(e)
    }
}

impl From<image::ImageError> for JuliaError {
    fn from(e: image::ImageError) -> Self {
        JuliaError::Image(e)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, JuliaError>;

/// Shorthand for building an `InvalidConfiguration` error.
pub(crate) fn invalid<S: Into<String>>(msg: S) -> JuliaError {
    JuliaError::InvalidConfiguration(msg.into())
}
