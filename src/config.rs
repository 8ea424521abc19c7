// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line configuration for the renderer binary.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use num::Complex;

use crate::errors::{invalid, Result};
use crate::planes::Domain;
use crate::renderer::JuliaRenderer;

/// The constant used for benchmark runs.
pub const BENCHMARK_C: Complex<f64> = Complex { re: -0.2, im: -0.65 };

const SIZE: &str = "size";
const XMIN: &str = "xmin";
const XMAX: &str = "xmax";
const YMIN: &str = "ymin";
const YMAX: &str = "ymax";
const PATCH: &str = "patch";
const NPROCS: &str = "nprocs";
const CONSTANT: &str = "constant";
const BENCHMARK: &str = "benchmark";
const SEQUENTIAL: &str = "sequential";
const OUTPUT: &str = "output";
const CSV: &str = "csv";

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parse `re,im` into a complex number.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

/// Help text for the worker count, naming the host's parallelism.
pub fn nprocs_help() -> String {
    format!("Number of workers (this host has {} logical CPUs)", num_cpus::get())
}

/// The argument parser.  `nprocs_help` is the help line for the worker
/// count, normally from `nprocs_help()`.
pub fn app<'a, 'b>(nprocs_help: &'b str) -> App<'a, 'b> {
    App::new("juliapar")
        .version("0.1.0")
        .about("Patch-parallel Julia set renderer")
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("500")
                .validator(|s| validate_number::<i64>(&s, "Could not parse image size"))
                .help("Image size in pixels (square images)"),
        )
        .arg(bound(XMIN, "-1.5", "Smallest real part"))
        .arg(bound(XMAX, "1.5", "Largest real part"))
        .arg(bound(YMIN, "-1.5", "Smallest imaginary part"))
        .arg(bound(YMAX, "1.5", "Largest imaginary part"))
        .arg(
            Arg::with_name(PATCH)
                .long(PATCH)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("20")
                .validator(|s| validate_number::<i64>(&s, "Could not parse patch size"))
                .help("Patch size in pixels"),
        )
        .arg(
            Arg::with_name(NPROCS)
                .long(NPROCS)
                .short("n")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1")
                .validator(|s| validate_number::<i64>(&s, "Could not parse worker count"))
                .help(nprocs_help),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .use_delimiter(false)
                .allow_hyphen_values(true)
                .default_value("-0.2,-0.65")
                .validator(|s| match parse_complex(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse the Julia constant (expected re,im)".to_string()),
                })
                .help("Julia constant as re,im"),
        )
        .arg(
            Arg::with_name(BENCHMARK)
                .long(BENCHMARK)
                .help("Render the benchmark Julia set, ignoring --constant"),
        )
        .arg(
            Arg::with_name(SEQUENTIAL)
                .long(SEQUENTIAL)
                .help("Render on one thread without patches"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .short("o")
                .long(OUTPUT)
                .takes_value(true)
                .help("Output image file"),
        )
        .arg(
            Arg::with_name(CSV)
                .long(CSV)
                .takes_value(true)
                .help("Timing log to append to (default: benchmark_data_<mode>.csv)"),
        )
}

fn bound<'a, 'b>(name: &'static str, default: &'static str, help: &'static str) -> Arg<'a, 'b> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .default_value(default)
        .validator(|s| validate_number::<f64>(&s, "Could not parse domain bound"))
        .help(help)
}

/// Everything a run needs, as given on the command line.  Numbers are
/// kept signed and unchecked here; `renderer` and `JuliaRenderer::julia`
/// reject the ones that make no sense.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Side length of the image.
    pub size: i64,
    /// Smallest real part.
    pub xmin: f64,
    /// Largest real part.
    pub xmax: f64,
    /// Smallest imaginary part.
    pub ymin: f64,
    /// Largest imaginary part.
    pub ymax: f64,
    /// Side length of the patches.
    pub patch: i64,
    /// Number of workers.
    pub nprocs: i64,
    /// The Julia constant.
    pub c: Complex<f64>,
    /// Whether this is a benchmark run.
    pub benchmark: bool,
    /// Render sequentially instead of in patches.
    pub sequential: bool,
    /// Where to write the picture, if anywhere.
    pub output: Option<PathBuf>,
    /// Where to append the timing sample.
    pub csv: PathBuf,
}

impl Settings {
    /// Pull the settings out of parsed arguments.
    pub fn from_matches(matches: &ArgMatches) -> Result<Settings> {
        let benchmark = matches.is_present(BENCHMARK);
        let c = if benchmark {
            BENCHMARK_C
        } else {
            parse_complex(value(matches, CONSTANT)?)
                .ok_or_else(|| invalid("could not parse the Julia constant"))?
        };
        let mode = if benchmark { "benchmark" } else { "student" };
        let csv = matches
            .value_of(CSV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("benchmark_data_{}.csv", mode)));

        Ok(Settings {
            size: number(matches, SIZE)?,
            xmin: number(matches, XMIN)?,
            xmax: number(matches, XMAX)?,
            ymin: number(matches, YMIN)?,
            ymax: number(matches, YMAX)?,
            patch: number(matches, PATCH)?,
            nprocs: number(matches, NPROCS)?,
            c,
            benchmark,
            sequential: matches.is_present(SEQUENTIAL),
            output: matches.value_of(OUTPUT).map(PathBuf::from),
            csv,
        })
    }

    /// Parse an argument list, program name first.
    pub fn from_args<I, T>(args: I) -> Result<Settings>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let help = nprocs_help();
        let matches = app(&help)
            .get_matches_from_safe(args)
            .map_err(|e| invalid(e.message))?;
        Settings::from_matches(&matches)
    }

    /// The domain the settings describe.
    pub fn domain(&self) -> Result<Domain> {
        Domain::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }

    /// A renderer for these settings.  Fails on a bad size or domain.
    pub fn renderer(&self) -> Result<JuliaRenderer> {
        JuliaRenderer::new(self.size, self.domain()?, self.c)
    }
}

fn value<'m>(matches: &'m ArgMatches, name: &str) -> Result<&'m str> {
    matches
        .value_of(name)
        .ok_or_else(|| invalid(format!("missing --{}", name)))
}

fn number<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let raw = value(matches, name)?;
    T::from_str(raw).map_err(|_| invalid(format!("could not parse --{} {}", name, raw)))
}
