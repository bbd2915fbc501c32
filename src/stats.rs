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
//! Locating flow statistics records in the report tree.
use roxmltree::{Document, Node};

const STATS_CONTAINER: &str = "FlowStats";
const FLOW_TAG: &str = "Flow";

/// Iterate over all raw flow statistics records in document order.
///
/// If a `FlowStats` container exists, its subtree is the search root;
/// otherwise the whole document is searched. The search is unbounded in
/// depth, lazy, and single-pass. No de-duplication by flow id happens here:
/// with the document-root fallback, a `Flow` record reachable through more
/// than one scope is yielded each time it is found.
pub fn locate<'a, 'input>(
    doc: &'a Document<'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name(STATS_CONTAINER))
        .unwrap_or_else(|| {
            log::warn!("no FlowStats container found, searching the whole report");
            doc.root()
        });
    root.descendants().filter(|n| n.has_tag_name(FLOW_TAG))
}

#[cfg(test)]
mod test {
    use super::*;

    fn flow_ids(xml: &str) -> Vec<String> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        locate(&doc)
            .map(|n| n.attribute("flowId").unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn container_scoped_search() {
        let ids = flow_ids(
            r#"<FlowMonitor>
                 <FlowStats>
                   <Flow flowId="1"/>
                   <Flow flowId="2"/>
                 </FlowStats>
                 <Ipv4FlowClassifier><Flow flowId="1"/></Ipv4FlowClassifier>
               </FlowMonitor>"#,
        );
        // the classifier's Flow children are outside the stats container
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn nested_records_are_found() {
        let ids = flow_ids(
            r#"<FlowMonitor>
                 <FlowStats>
                   <Group><Flow flowId="4"/></Group>
                   <Flow flowId="5"/>
                 </FlowStats>
               </FlowMonitor>"#,
        );
        assert_eq!(ids, ["4", "5"]);
    }

    #[test]
    fn document_root_fallback() {
        let ids = flow_ids(
            r#"<FlowMonitor>
                 <Somewhere><Flow flowId="8"/></Somewhere>
                 <Flow flowId="9"/>
               </FlowMonitor>"#,
        );
        assert_eq!(ids, ["8", "9"]);
    }

    #[test]
    fn empty_container_yields_nothing() {
        assert!(flow_ids("<FlowMonitor><FlowStats/></FlowMonitor>").is_empty());
    }
}
