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
//! Assembly of the flow summary dataset from a parsed report.
use itertools::Itertools;
use roxmltree::Document;

use crate::{
    classifier, metrics::StatsRecord, stats, summary::FlowSummary, FlowmonError,
};

/// Reconstruct the full, ordered flow summary dataset from a parsed report.
///
/// A single statistics record without a flow id aborts the whole run. There
/// is no partial-failure policy: skipping records would silently
/// under-report flows.
pub fn analyze(doc: &Document) -> Result<Vec<FlowSummary>, FlowmonError> {
    let index = classifier::build_index(doc);
    let summaries = stats::locate(doc)
        .map(|node| {
            let record = StatsRecord::from_node(node)?;
            let metrics = record.metrics();
            Ok(FlowSummary::join(
                &record,
                &metrics,
                index.get(&record.flow_id),
            ))
        })
        .collect::<Result<Vec<_>, FlowmonError>>()?;
    aggregate(summaries)
}

/// Order the dataset by `(proto, flowId)`. An empty dataset is a hard error,
/// as it means the source report was not populated.
pub fn aggregate(mut summaries: Vec<FlowSummary>) -> Result<Vec<FlowSummary>, FlowmonError> {
    if summaries.is_empty() {
        return Err(FlowmonError::NoFlows);
    }
    summaries.sort_by(|a, b| a.proto.cmp(&b.proto).then(a.flow_id.cmp(&b.flow_id)));
    Ok(summaries)
}

/// The `n` rows with the greatest throughput. The sort is stable, so ties
/// keep the dataset order; the dataset itself is left untouched.
pub fn top_by_throughput(summaries: &[FlowSummary], n: usize) -> Vec<&FlowSummary> {
    summaries
        .iter()
        .sorted_by(|a, b| b.throughput_mbps.total_cmp(&a.throughput_mbps))
        .take(n)
        .collect()
}
