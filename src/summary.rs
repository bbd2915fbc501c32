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
//! Module defining the flow summary row and the statistics/classifier join.
use serde::Serialize;

use crate::{
    classifier::ClassifierRecord,
    metrics::{FlowMetrics, StatsRecord},
};

/// One row of the flow summary dataset. Column names follow the summary CSV
/// emitted for the simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSummary {
    #[serde(rename = "flowId")]
    pub flow_id: u64,
    pub proto: String,
    pub src: String,
    pub dst: String,
    #[serde(rename = "txPackets")]
    pub tx_packets: u64,
    #[serde(rename = "rxPackets")]
    pub rx_packets: u64,
    #[serde(rename = "lossPkts")]
    pub loss_pkts: u64,
    #[serde(rename = "lossPct")]
    pub loss_pct: f64,
    #[serde(rename = "txBytes")]
    pub tx_bytes: u64,
    #[serde(rename = "rxBytes")]
    pub rx_bytes: u64,
    #[serde(rename = "meanDelay_s")]
    pub mean_delay_s: f64,
    #[serde(rename = "meanJitter_s")]
    pub mean_jitter_s: f64,
    #[serde(rename = "duration_s")]
    pub duration_s: f64,
    #[serde(rename = "throughput_Mbps")]
    pub throughput_mbps: f64,
}

/// Display name for an IP protocol number. Unmapped numbers render as their
/// decimal string.
pub fn proto_name(protocol: u16) -> String {
    match protocol {
        6 => "TCP".to_string(),
        17 => "UDP".to_string(),
        other => other.to_string(),
    }
}

impl FlowSummary {
    /// Merge a computed statistics record with its classifier entry. A flow
    /// without one degrades to empty endpoints (`":"`) and protocol 0; the
    /// sentinel values only exist here, at formatting time.
    pub fn join(
        stats: &StatsRecord,
        metrics: &FlowMetrics,
        classifier: Option<&ClassifierRecord>,
    ) -> Self {
        let (src_addr, src_port, dst_addr, dst_port, protocol) = match classifier {
            Some(c) => (
                c.source_address.as_str(),
                c.source_port.as_str(),
                c.destination_address.as_str(),
                c.destination_port.as_str(),
                c.protocol,
            ),
            None => ("", "", "", "", 0),
        };
        Self {
            flow_id: stats.flow_id,
            proto: proto_name(protocol),
            src: format!("{src_addr}:{src_port}"),
            dst: format!("{dst_addr}:{dst_port}"),
            tx_packets: stats.tx_packets,
            rx_packets: stats.rx_packets,
            loss_pkts: metrics.loss_packets,
            loss_pct: metrics.loss_percent,
            tx_bytes: stats.tx_bytes,
            rx_bytes: stats.rx_bytes,
            mean_delay_s: metrics.mean_delay_s,
            mean_jitter_s: metrics.mean_jitter_s,
            duration_s: metrics.duration_s,
            throughput_mbps: metrics.throughput_mbps,
        }
    }
}
