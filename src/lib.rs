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
//! Library for reconstructing per-flow performance metrics from ns-3 FlowMonitor reports.
use std::path::PathBuf;

pub mod classifier;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod summary;
pub mod util;

/// Errors that abort a report analysis run. All of them are fatal: the input
/// is a static file, so nothing is retried and no partial output is written.
#[derive(Debug, thiserror::Error)]
pub enum FlowmonError {
    #[error("{0:?} not found. Run your sim first.")]
    MissingInput(PathBuf),
    #[error("XML Error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("flow statistics record without a parseable flowId attribute")]
    MissingFlowId,
    #[error("no flows found in the report. Check that the simulation populated it.")]
    NoFlows,
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
}

pub mod prelude {
    pub use super::{
        classifier::{build_index, ClassifierRecord},
        metrics::{FlowMetrics, StatsRecord},
        pipeline::{aggregate, analyze, top_by_throughput},
        summary::FlowSummary,
        FlowmonError,
    };
}
