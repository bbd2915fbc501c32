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
//! Loading and parsing of the FlowMonitor XML report.
use std::{fs, path::Path};

use crate::FlowmonError;

/// Read the raw report. The path is checked before reading so that a missing
/// report is reported with the expected path rather than a bare IO error.
pub fn load(path: impl AsRef<Path>) -> Result<String, FlowmonError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FlowmonError::MissingInput(path.to_path_buf()));
    }
    log::info!("Loading: {path:?}");
    Ok(fs::read_to_string(path)?)
}

/// Parse the report into a tree. The document borrows `text`, so the caller
/// keeps the raw string alive for the duration of the pipeline.
pub fn parse(text: &str) -> Result<roxmltree::Document<'_>, FlowmonError> {
    Ok(roxmltree::Document::parse(text)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_report() {
        let err = load("does-not-exist.xml").unwrap_err();
        assert!(matches!(err, FlowmonError::MissingInput(_)));
        assert!(err.to_string().contains("does-not-exist.xml"));
    }

    #[test]
    fn malformed_report() {
        let err = parse("<FlowMonitor><FlowStats>").unwrap_err();
        assert!(matches!(err, FlowmonError::Xml(_)));
    }

    #[test]
    fn well_formed_report() {
        let doc = parse("<FlowMonitor><FlowStats/></FlowMonitor>").unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "FlowMonitor");
    }
}
