// flowmon: Per-Flow Performance Analysis of ns-3 FlowMonitor Reports
// Copyright (C) 2025 The flowmon developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
use std::{fs, path::PathBuf};

use clap::Parser;
use itertools::Itertools;

use flowmon::{output, pipeline, report, util};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Overwrite the input path of the FlowMonitor report.
    #[arg(short, long, default_value = "mk-flow.xml")]
    input: PathBuf,
    /// Overwrite the output directory for the summary CSV and the plots.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let args = Args::parse();
    fs::create_dir_all(&args.output_dir)?;

    let text = report::load(&args.input)?;
    let doc = report::parse(&text)?;
    let summaries = pipeline::analyze(&doc)?;
    log::info!("reconstructed {} flows", summaries.len());

    let csv_path = output::write_csv(&summaries, &args.output_dir)?;
    println!("Saved: {}", csv_path.display());

    output::print_top_flows(&summaries);

    let plot_paths = output::write_charts(&summaries, &args.output_dir);
    println!(
        "Saved plots: {}",
        plot_paths.iter().map(|p| p.display()).join(", ")
    );

    Ok(())
}
