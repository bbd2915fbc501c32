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
//! Flow-identity records and the classifier index built from them.
use std::collections::HashMap;

use roxmltree::{Document, Node};

/// Tag names under which FlowMonitor emits its classifier, tried in order.
/// Older ns-3 versions use the plain `FlowClassifier` name.
const CLASSIFIER_TAGS: [&str; 2] = ["Ipv4FlowClassifier", "FlowClassifier"];

/// Five-tuple identifying a flow's endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRecord {
    pub flow_id: u64,
    pub source_address: String,
    pub destination_address: String,
    pub protocol: u16,
    pub source_port: String,
    pub destination_port: String,
}

impl ClassifierRecord {
    /// Parse one flow-identity record. `flowId` is mandatory; everything else
    /// defaults to an empty string (addresses, ports) or 0 (protocol).
    fn from_node(node: Node) -> Option<Self> {
        let flow_id = node.attribute("flowId")?.parse().ok()?;
        let string_attr =
            |name: &str| node.attribute(name).unwrap_or_default().to_string();
        Some(Self {
            flow_id,
            source_address: string_attr("sourceAddress"),
            destination_address: string_attr("destinationAddress"),
            protocol: node
                .attribute("protocol")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(0),
            source_port: string_attr("sourcePort"),
            destination_port: string_attr("destinationPort"),
        })
    }
}

/// Build the flow id -> five-tuple index from all classifier containers in
/// the report. The candidate tag names are probed in order and the first one
/// with any matches wins. A record rediscovered under the same flow id
/// overwrites the previous entry (last-source-wins). A report without any
/// classifier yields an empty index; unmatched flows degrade to empty
/// endpoints downstream instead of failing.
pub fn build_index(doc: &Document) -> HashMap<u64, ClassifierRecord> {
    let containers: Vec<Node> = CLASSIFIER_TAGS
        .iter()
        .map(|tag| {
            doc.descendants()
                .filter(|n| n.has_tag_name(*tag))
                .collect::<Vec<_>>()
        })
        .find(|nodes| !nodes.is_empty())
        .unwrap_or_default();
    if containers.is_empty() {
        log::warn!("no classifier container found, flows will have empty endpoints");
    }

    let mut index = HashMap::new();
    for container in containers {
        for node in container.children().filter(|n| n.has_tag_name("Flow")) {
            match ClassifierRecord::from_node(node) {
                Some(record) => {
                    log::debug!("classifier entry for flow {}", record.flow_id);
                    index.insert(record.flow_id, record);
                }
                None => log::warn!("skipping classifier record without a parseable flowId"),
            }
        }
    }
    index
}
