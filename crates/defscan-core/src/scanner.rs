//! Single forward pass over the top-level definitions of a document.

use std::slice;

use defscan_model::{Document, Element, Node, Origin, OriginLookup};

use crate::tracker::{DuplicateTracker, ReportReady};

pub const ABSTRACT_ATTRIBUTE: &str = "Abstract";
pub const NAME_ATTRIBUTE: &str = "Name";

/// Name of a definition eligible for duplicate detection.
///
/// The element needs an `Abstract` attribute whose value is not `false`
/// (any casing) and a non-empty `Name` attribute.
pub fn definition_name(element: &Element) -> Option<&str> {
    let is_abstract = element
        .attribute(ABSTRACT_ATTRIBUTE)
        .is_some_and(|value| !value.eq_ignore_ascii_case("false"));
    if !is_abstract {
        return None;
    }
    element
        .attribute(NAME_ATTRIBUTE)
        .filter(|name| !name.is_empty())
}

/// Lazy iterator of [`ReportReady`] events.
///
/// Every call to `next` advances the pass until the next name reaches its
/// second occurrence. Dropping the iterator early leaves the remaining
/// nodes unscanned.
pub struct Scan<'a> {
    nodes: slice::Iter<'a, Node>,
    lookup: &'a dyn OriginLookup,
    tracker: &'a mut DuplicateTracker,
    core: Origin,
    candidates: usize,
}

impl Scan<'_> {
    /// Qualifying definitions seen so far.
    pub fn candidates(&self) -> usize {
        self.candidates
    }
}

impl Iterator for Scan<'_> {
    type Item = ReportReady;

    fn next(&mut self) -> Option<ReportReady> {
        for node in self.nodes.by_ref() {
            let Some(element) = node.as_element() else {
                continue;
            };
            let Some(name) = definition_name(element) else {
                continue;
            };
            self.candidates += 1;
            let (origin, file_path) = match self.lookup.resolve(element.id()) {
                Some(asset) => (asset.origin.clone(), Some(asset.file_path.clone())),
                None => (self.core.clone(), None),
            };
            if let Some(ready) = self.tracker.record(name, element, origin, file_path) {
                return Some(ready);
            }
        }
        None
    }
}

/// Starts a scan of `document`'s top-level elements, feeding `tracker`.
/// Nodes unknown to `lookup` are attributed to [`Origin::core`].
pub fn scan<'a>(
    document: &'a Document,
    lookup: &'a dyn OriginLookup,
    tracker: &'a mut DuplicateTracker,
) -> Scan<'a> {
    Scan {
        nodes: document.root().children().iter(),
        lookup,
        tracker,
        core: Origin::core(),
        candidates: 0,
    }
}

#[cfg(test)]
mod tests {
    use defscan_model::{AssetLookup, NoLookup, NodeId, SourceAsset};

    use super::*;

    fn def(id: u32, attributes: &[(&str, &str)]) -> Node {
        let mut element = Element::new(NodeId::new(id), "ThingDef");
        for (name, value) in attributes {
            element.push_attribute(*name, *value);
        }
        Node::Element(element)
    }

    fn document(children: Vec<Node>) -> Document {
        let mut root = Element::new(NodeId::new(0), "Defs");
        for child in children {
            root.push_child(child);
        }
        Document::new(root)
    }

    #[test]
    fn definition_name_filters() {
        let check = |attributes: &[(&str, &str)]| {
            let Node::Element(element) = def(1, attributes) else {
                unreachable!()
            };
            definition_name(&element).map(str::to_string)
        };
        assert_eq!(check(&[("Name", "Bed"), ("Abstract", "True")]), Some("Bed".to_string()));
        assert_eq!(check(&[("Name", "Bed"), ("Abstract", "yes")]), Some("Bed".to_string()));
        assert_eq!(check(&[("Name", "Bed"), ("Abstract", "FALSE")]), None);
        assert_eq!(check(&[("Name", "Bed")]), None);
        assert_eq!(check(&[("Abstract", "True")]), None);
        assert_eq!(check(&[("Name", ""), ("Abstract", "True")]), None);
        assert_eq!(check(&[("name", "Bed"), ("abstract", "True")]), None);
    }

    #[test]
    fn scan_skips_non_elements_and_yields_on_second_occurrence() {
        let doc = document(vec![
            Node::Comment("beds".to_string()),
            def(1, &[("Name", "Bed"), ("Abstract", "True")]),
            Node::Text("stray".to_string()),
            def(2, &[("Name", "Bed"), ("Abstract", "True")]),
            def(3, &[("Name", "Bed"), ("Abstract", "True")]),
            def(4, &[("Name", "Chair"), ("Abstract", "True")]),
        ]);
        let mut tracker = DuplicateTracker::new();
        let mut pass = scan(&doc, &NoLookup, &mut tracker);

        let first = pass.next().unwrap();
        assert_eq!(first.name, "Bed");
        assert_eq!(pass.candidates(), 2);
        assert!(pass.next().is_none());
        assert_eq!(pass.candidates(), 4);
        assert_eq!(tracker.get("Bed").unwrap().len(), 3);
        assert_eq!(tracker.get("Chair").unwrap().len(), 1);
    }

    #[test]
    fn unresolved_nodes_use_core_origin() {
        let doc = document(vec![
            def(1, &[("Name", "Bed"), ("Abstract", "True")]),
            def(2, &[("Name", "Bed"), ("Abstract", "True")]),
        ]);
        let mut lookup = AssetLookup::new();
        lookup.insert(
            NodeId::new(1),
            SourceAsset::new(Origin::new("a.mod", "A"), "/mods/a/Defs/Beds.xml"),
        );
        let mut tracker = DuplicateTracker::new();
        let events: Vec<_> = scan(&doc, &lookup, &mut tracker).collect();
        assert_eq!(events.len(), 1);

        let report = tracker.get("Bed").unwrap();
        let records = report.records();
        assert_eq!(records[0].package_id(), "a.mod");
        assert!(records[0].xml_file_path().is_some());
        assert!(records[1].origin().is_core());
        assert_eq!(records[1].xml_file_path(), None);
    }
}
