// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use juliapar::report;
use log::info;

const LOGS: &str = "logs";

fn args<'a>() -> ArgMatches<'a> {
    App::new("speedup")
        .version("0.1.0")
        .about("Summarize juliapar timing logs into runtime, speedup and efficiency")
        .arg(
            Arg::with_name(LOGS)
                .required(true)
                .multiple(true)
                .help("Timing logs written by juliapar"),
        )
        .get_matches()
}

fn main() {
    env_logger::init();
    let matches = args();

    let mut samples = vec![];
    for path in matches.values_of(LOGS).into_iter().flatten() {
        match report::read_samples(path) {
            Ok(more) => {
                info!("{}: {} samples", path, more.len());
                samples.extend(more);
            }
            Err(e) => {
                eprintln!("Could not read {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    print!("{}", report::format_table(&report::summarize(&samples)));
}
