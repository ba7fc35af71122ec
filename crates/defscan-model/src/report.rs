//! Duplicate reports and the records they accumulate.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::Element;
use crate::origin::Origin;

/// One contribution to a definition name: the element, who contributed it,
/// and the file it was read from (none for the core origin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicationRecord {
    #[serde(skip)]
    definition: Element,
    def_type: String,
    origin: Origin,
    xml_file_path: Option<PathBuf>,
}

impl DuplicationRecord {
    pub fn new(definition: Element, origin: Origin, xml_file_path: Option<PathBuf>) -> Self {
        Self {
            def_type: definition.name().to_string(),
            definition,
            origin,
            xml_file_path,
        }
    }

    pub fn definition(&self) -> &Element {
        &self.definition
    }

    /// Tag of the contributing element, e.g. `ThingDef`.
    pub fn def_type(&self) -> &str {
        &self.def_type
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn package_id(&self) -> &str {
        &self.origin.package_id
    }

    pub fn mod_name(&self) -> &str {
        &self.origin.name
    }

    pub fn xml_file_path(&self) -> Option<&Path> {
        self.xml_file_path.as_deref()
    }
}

/// Every contribution to one definition name, in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    name: String,
    records: Vec<DuplicationRecord>,
    critical: Option<bool>,
}

impl DuplicateReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            critical: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[DuplicationRecord] {
        &self.records
    }

    pub fn push(&mut self, record: DuplicationRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_duplicates(&self) -> bool {
        self.records.len() >= 2
    }

    /// `false` until [`DuplicateReport::finalize`] has run.
    pub fn is_critical(&self) -> bool {
        self.critical.unwrap_or(false)
    }

    pub fn is_finalized(&self) -> bool {
        self.critical.is_some()
    }

    /// Fixes the criticality of the report. Only the first call has effect.
    pub fn finalize(&mut self, critical: bool) {
        if self.critical.is_none() {
            self.critical = Some(critical);
        }
    }

    /// Distinct package ids in first-seen order.
    pub fn package_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for record in &self.records {
            if !ids.contains(&record.package_id()) {
                ids.push(record.package_id());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeId;

    fn record(id: u32, package: &str) -> DuplicationRecord {
        let element = Element::new(NodeId::new(id), "ThingDef").with_attribute("Name", "Bed");
        DuplicationRecord::new(
            element,
            Origin::new(package, package.to_uppercase()),
            Some(PathBuf::from(format!("/mods/{package}/Defs/Beds.xml"))),
        )
    }

    #[test]
    fn has_duplicates_from_two_records() {
        let mut report = DuplicateReport::new("Bed");
        assert!(report.is_empty());
        report.push(record(1, "a"));
        assert!(!report.has_duplicates());
        report.push(record(2, "b"));
        assert!(report.has_duplicates());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn finalize_is_set_once() {
        let mut report = DuplicateReport::new("Bed");
        assert!(!report.is_finalized());
        assert!(!report.is_critical());
        report.finalize(true);
        report.finalize(false);
        assert!(report.is_finalized());
        assert!(report.is_critical());
    }

    #[test]
    fn package_ids_are_distinct_in_scan_order() {
        let mut report = DuplicateReport::new("Bed");
        report.push(record(1, "b"));
        report.push(record(2, "a"));
        report.push(record(3, "b"));
        assert_eq!(report.package_ids(), vec!["b", "a"]);
    }

    #[test]
    fn record_exposes_def_type_and_origin() {
        let record = record(7, "a");
        assert_eq!(record.def_type(), "ThingDef");
        assert_eq!(record.package_id(), "a");
        assert_eq!(record.mod_name(), "A");
        assert_eq!(record.definition().id(), NodeId::new(7));
        assert!(record.xml_file_path().is_some());
    }
}
