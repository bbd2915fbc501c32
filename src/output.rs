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
//! Output sinks: summary CSV, console table, and per-flow bar charts.
use std::path::{Path, PathBuf};

use plotly::{layout::Axis, Bar, Layout, Plot};

use crate::{pipeline, summary::FlowSummary, util::PathBufExt, FlowmonError};

pub const SUMMARY_CSV: &str = "mk-flow-summary.csv";
pub const THROUGHPUT_PLOT: &str = "mk-throughput.html";
pub const LOSS_PLOT: &str = "mk-loss.html";
pub const DELAY_PLOT: &str = "mk-delay.html";

/// Number of flows shown in the console preview.
const TOP_FLOWS: usize = 10;

/// Write the summary CSV and return its path.
pub fn write_csv(
    summaries: &[FlowSummary],
    output_dir: &Path,
) -> Result<PathBuf, FlowmonError> {
    let csv_path = output_dir.then(SUMMARY_CSV);
    let mut csv = csv::Writer::from_path(&csv_path)?;
    for row in summaries {
        csv.serialize(row)?;
    }
    csv.flush()?;
    log::info!("Saved: {csv_path:?}");
    Ok(csv_path)
}

/// Print the top flows by throughput as an aligned table.
pub fn print_top_flows(summaries: &[FlowSummary]) {
    println!("\nTop flows by throughput:");
    println!(
        "{:>6} {:<5} {:<21} {:<21} {:>15}",
        "flowId", "proto", "src", "dst", "throughput_Mbps"
    );
    for row in pipeline::top_by_throughput(summaries, TOP_FLOWS) {
        println!(
            "{:>6} {:<5} {:<21} {:<21} {:>15.6}",
            row.flow_id, row.proto, row.src, row.dst, row.throughput_mbps
        );
    }
}

/// Render the three per-flow bar charts and return their paths. Flow ids are
/// plotted as categorical labels, not a numeric axis.
pub fn write_charts(summaries: &[FlowSummary], output_dir: &Path) -> Vec<PathBuf> {
    let labels: Vec<String> = summaries.iter().map(|row| row.flow_id.to_string()).collect();
    let charts: [(&str, &str, &str, Vec<f64>); 3] = [
        (
            THROUGHPUT_PLOT,
            "Throughput per flow (Mbps)",
            "Mbps",
            summaries.iter().map(|row| row.throughput_mbps).collect(),
        ),
        (
            LOSS_PLOT,
            "Packet loss per flow (%)",
            "Loss %",
            summaries.iter().map(|row| row.loss_pct).collect(),
        ),
        (
            DELAY_PLOT,
            "Mean one-way delay per flow (ms)",
            "ms",
            summaries.iter().map(|row| row.mean_delay_s * 1e3).collect(),
        ),
    ];

    let mut paths = Vec::with_capacity(charts.len());
    for (file_name, title, y_title, values) in charts {
        let path = output_dir.then(file_name);

        let mut plot = Plot::new();
        plot.add_trace(Bar::new(labels.clone(), values));
        plot.set_layout(
            Layout::new()
                .title(title.to_string())
                .x_axis(Axis::new().title("Flow ID".to_string()))
                .y_axis(Axis::new().title(y_title.to_string())),
        );

        log::debug!("Plotting {path:?}");
        plot.write_html(&path);
        paths.push(path);
    }
    paths
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metrics::StatsRecord;

    fn dataset() -> Vec<FlowSummary> {
        let stats = StatsRecord {
            flow_id: 1,
            rx_bytes: 1_000,
            time_last_rx_packet: 1.0,
            ..Default::default()
        };
        vec![FlowSummary::join(&stats, &stats.metrics(), None)]
    }

    #[test]
    fn csv_round_trip() {
        let dir = std::env::temp_dir().join("flowmon-csv-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_csv(&dataset(), &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), SUMMARY_CSV);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("flowId,proto,src,dst"));
        assert!(lines.next().unwrap().starts_with("1,0,:,:,"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
