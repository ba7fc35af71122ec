//! Tests for defscan-model types.

use std::path::PathBuf;

use defscan_model::{
    AssetLookup, Document, DuplicateReport, DuplicationRecord, Element, Node, NodeId, Origin,
    OriginLookup, SourceAsset,
};

fn bed(id: u32) -> Element {
    Element::new(NodeId::new(id), "ThingDef")
        .with_attribute("Name", "Bed")
        .with_attribute("Abstract", "True")
}

#[test]
fn duplicate_report_serializes() {
    let mut report = DuplicateReport::new("Bed");
    report.push(DuplicationRecord::new(
        bed(1),
        Origin::new("a.mod", "A"),
        Some(PathBuf::from("/mods/a/Defs/Beds.xml")),
    ));
    report.push(DuplicationRecord::new(bed(2), Origin::core(), None));
    report.finalize(true);

    insta::assert_json_snapshot!(report, @r#"
    {
      "name": "Bed",
      "records": [
        {
          "def_type": "ThingDef",
          "origin": {
            "package_id": "a.mod",
            "name": "A"
          },
          "xml_file_path": "/mods/a/Defs/Beds.xml"
        },
        {
          "def_type": "ThingDef",
          "origin": {
            "package_id": "core",
            "name": "Core"
          },
          "xml_file_path": null
        }
      ],
      "critical": true
    }
    "#);
}

#[test]
fn lookup_resolves_top_level_elements() {
    let root = Element::new(NodeId::new(0), "Defs")
        .with_child(Node::Element(bed(1)))
        .with_child(Node::Element(bed(2)));
    let document = Document::new(root);

    let mut lookup = AssetLookup::new();
    lookup.insert(
        NodeId::new(1),
        SourceAsset::new(Origin::new("a.mod", "A"), "/mods/a/Defs/Beds.xml"),
    );

    let resolved: Vec<Option<&str>> = document
        .top_level_elements()
        .map(|element| {
            lookup
                .resolve(element.id())
                .map(|asset| asset.origin.package_id.as_str())
        })
        .collect();
    assert_eq!(resolved, vec![Some("a.mod"), None]);
}
