// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use juliapar::config::{self, Settings};
use juliapar::{paint, report, Result, TimingSample};
use log::warn;

/// Render once, print and log the timing, and write the picture if
/// one was asked for.  The clock only covers the rendering.
fn run(settings: &Settings) -> Result<TimingSample> {
    let renderer = settings.renderer()?;
    let rendered = if settings.sequential {
        renderer.julia_single_timed()
    } else {
        renderer.julia(settings.patch, settings.nprocs)?
    };

    println!("{}", rendered.sample.line());
    report::append_sample(&settings.csv, &rendered.sample)?;

    if let Some(path) = &settings.output {
        paint::write_image(path, &rendered.image)?;
    }
    Ok(rendered.sample)
}

pub fn main() {
    env_logger::init();

    let help = config::nprocs_help();
    let matches = config::app(&help).get_matches();
    let settings = match Settings::from_matches(&matches) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration failure: {}", e);
            std::process::exit(1);
        }
    };

    let cpus = num_cpus::get();
    if !settings.sequential && settings.nprocs > cpus as i64 {
        warn!(
            "{} workers requested on a host with {} logical CPUs",
            settings.nprocs, cpus
        );
    }

    if let Err(e) = run(&settings) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
