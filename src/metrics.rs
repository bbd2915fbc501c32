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
//! Per-flow traffic counters and the performance metrics derived from them.
use roxmltree::Node;

use crate::FlowmonError;

/// Duration floor in seconds, applied when the last receive does not trail
/// the first transmit. Keeps the throughput division well-defined.
const DURATION_EPSILON: f64 = 1e-9;

/// Traffic counters and timing sums of one flow, as reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecord {
    pub flow_id: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_packets: u64,
    pub rx_packets: u64,
    /// Timestamp of the first transmitted packet `[s]`.
    pub time_first_tx_packet: f64,
    /// Timestamp of the last received packet `[s]`.
    pub time_last_rx_packet: f64,
    /// Sum of all per-packet one-way delays `[s]`.
    pub delay_sum: f64,
    /// Sum of all per-packet jitter values `[s]`.
    pub jitter_sum: f64,
}

impl StatsRecord {
    /// Parse one raw `Flow` record. Counters and timing sums default to zero
    /// when absent or unparseable. A missing `flowId` is a hard error: flow
    /// identity cannot be defaulted, and silently dropping the record would
    /// under-report the dataset.
    pub fn from_node(node: Node) -> Result<Self, FlowmonError> {
        let flow_id = node
            .attribute("flowId")
            .and_then(|raw| raw.parse().ok())
            .ok_or(FlowmonError::MissingFlowId)?;
        Ok(Self {
            flow_id,
            tx_bytes: int_attr(node, "txBytes"),
            rx_bytes: int_attr(node, "rxBytes"),
            tx_packets: int_attr(node, "txPackets"),
            rx_packets: int_attr(node, "rxPackets"),
            time_first_tx_packet: float_attr(node, "timeFirstTxPacket"),
            time_last_rx_packet: float_attr(node, "timeLastRxPacket"),
            delay_sum: float_attr(node, "delaySum"),
            jitter_sum: float_attr(node, "jitterSum"),
        })
    }

    pub fn metrics(&self) -> FlowMetrics {
        FlowMetrics::compute(self)
    }
}

fn int_attr(node: Node, name: &str) -> u64 {
    node.attribute(name)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

fn float_attr(node: Node, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0.0)
}

/// Performance metrics derived from one [`StatsRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlowMetrics {
    pub loss_packets: u64,
    /// Packet loss in `[0, 100] [%]`, 0 for flows that never transmitted.
    pub loss_percent: f64,
    pub mean_delay_s: f64,
    pub mean_jitter_s: f64,
    pub duration_s: f64,
    pub throughput_mbps: f64,
}

impl FlowMetrics {
    pub fn compute(record: &StatsRecord) -> Self {
        let loss_packets = record.tx_packets.saturating_sub(record.rx_packets);
        let loss_percent = if record.tx_packets > 0 {
            100.0 * loss_packets as f64 / record.tx_packets as f64
        } else {
            0.0
        };
        let duration_s =
            (record.time_last_rx_packet - record.time_first_tx_packet).max(DURATION_EPSILON);
        Self {
            loss_packets,
            loss_percent,
            mean_delay_s: record.delay_sum / record.rx_packets.max(1) as f64,
            mean_jitter_s: record.jitter_sum
                / record.rx_packets.saturating_sub(1).max(1) as f64,
            duration_s,
            throughput_mbps: record.rx_bytes as f64 * 8.0 / duration_s / 1e6,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record() -> StatsRecord {
        StatsRecord {
            flow_id: 1,
            tx_bytes: 100_000,
            rx_bytes: 95_000,
            tx_packets: 100,
            rx_packets: 95,
            time_first_tx_packet: 0.0,
            time_last_rx_packet: 1.0,
            delay_sum: 0.95,
            jitter_sum: 0.47,
        }
    }

    #[test]
    fn derived_metrics() {
        let m = record().metrics();
        assert_eq!(m.loss_packets, 5);
        assert!((m.loss_percent - 5.0).abs() < 1e-12);
        assert!((m.duration_s - 1.0).abs() < 1e-12);
        assert!((m.throughput_mbps - 0.76).abs() < 1e-12);
        assert!((m.mean_delay_s - 0.01).abs() < 1e-12);
        assert!((m.mean_jitter_s - 0.005).abs() < 1e-12);
    }

    #[test]
    fn loss_saturates_at_zero() {
        let m = StatsRecord {
            tx_packets: 10,
            rx_packets: 12,
            ..record()
        }
        .metrics();
        assert_eq!(m.loss_packets, 0);
        assert_eq!(m.loss_percent, 0.0);
    }

    #[test]
    fn loss_percent_zero_without_transmissions() {
        let m = StatsRecord {
            tx_packets: 0,
            rx_packets: 0,
            ..record()
        }
        .metrics();
        assert_eq!(m.loss_percent, 0.0);
    }

    #[test]
    fn duration_floor() {
        // last rx before first tx must not produce a negative duration
        let m = StatsRecord {
            time_first_tx_packet: 2.0,
            time_last_rx_packet: 1.0,
            ..record()
        }
        .metrics();
        assert_eq!(m.duration_s, 1e-9);
        assert!(m.throughput_mbps >= 0.0);
    }

    #[test]
    fn mean_divisors_never_zero() {
        for rx_packets in [0, 1] {
            let m = StatsRecord {
                rx_packets,
                delay_sum: 0.5,
                jitter_sum: 0.25,
                ..record()
            }
            .metrics();
            assert_eq!(m.mean_delay_s, 0.5);
            assert_eq!(m.mean_jitter_s, 0.25);
        }
    }

    #[test]
    fn throughput_formula() {
        let r = record();
        let m = r.metrics();
        assert!((m.throughput_mbps - r.rx_bytes as f64 * 8.0 / m.duration_s / 1e6).abs() < 1e-12);
    }

    #[test]
    fn parse_defaults_and_mandatory_flow_id() {
        let text = r#"<FlowStats>
                        <Flow flowId="2" rxBytes="10"/>
                        <Flow txBytes="5"/>
                      </FlowStats>"#;
        let doc = roxmltree::Document::parse(text).unwrap();
        let mut nodes = doc.descendants().filter(|n| n.has_tag_name("Flow"));

        let record = StatsRecord::from_node(nodes.next().unwrap()).unwrap();
        assert_eq!(record.flow_id, 2);
        assert_eq!(record.rx_bytes, 10);
        assert_eq!(record.tx_packets, 0);
        assert_eq!(record.delay_sum, 0.0);

        let err = StatsRecord::from_node(nodes.next().unwrap()).unwrap_err();
        assert!(matches!(err, FlowmonError::MissingFlowId));
    }
}
