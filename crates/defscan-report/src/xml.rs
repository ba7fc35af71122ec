//! Duplicate report XML serialization.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use defscan_model::{DuplicateReport, DuplicationRecord, Element, Node};

use crate::error::ReportError;

/// Root element of a report file.
pub const REPORT_ROOT: &str = "DuplicateReport";

type XmlWriter = Writer<Vec<u8>>;

/// Serializes `report` to a standalone XML document.
pub fn render_report(report: &DuplicateReport) -> Result<Vec<u8>, ReportError> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let count = report.len().to_string();

    write(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(REPORT_ROOT);
    root.push_attribute(("Name", report.name()));
    root.push_attribute(("Count", count.as_str()));
    root.push_attribute(("Critical", if report.is_critical() { "true" } else { "false" }));
    root.push_attribute(("CreationDateTime", timestamp.as_str()));
    write(&mut xml, Event::Start(root))?;

    for (index, record) in report.records().iter().enumerate() {
        write_record(&mut xml, index + 1, record)?;
    }

    write(&mut xml, Event::End(BytesEnd::new(REPORT_ROOT)))?;
    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Renders and writes `report` to `path`, replacing any existing file.
pub fn write_report(path: &Path, report: &DuplicateReport) -> Result<(), ReportError> {
    let bytes = render_report(report)?;
    fs::write(path, bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record(xml: &mut XmlWriter, index: usize, record: &DuplicationRecord) -> Result<(), ReportError> {
    let index = index.to_string();
    let mut start = BytesStart::new("Record");
    start.push_attribute(("Index", index.as_str()));
    write(xml, Event::Start(start))?;

    write_text_element(xml, "PackageId", record.package_id())?;
    write_text_element(xml, "ModName", record.mod_name())?;
    match record.xml_file_path() {
        Some(path) => write_text_element(xml, "XmlFilePath", &path.display().to_string())?,
        None => write(xml, Event::Empty(BytesStart::new("XmlFilePath")))?,
    }
    write_text_element(xml, "DefType", record.def_type())?;

    write(xml, Event::Start(BytesStart::new("Definition")))?;
    write_element(xml, record.definition())?;
    write(xml, Event::End(BytesEnd::new("Definition")))?;

    write(xml, Event::End(BytesEnd::new("Record")))?;
    Ok(())
}

/// Writes a copy of a definition element and its subtree.
///
/// Walks the subtree with an explicit stack so deep definitions cannot
/// overflow the call stack.
fn write_element(xml: &mut XmlWriter, element: &Element) -> Result<(), ReportError> {
    let mut open: Vec<(&Element, usize)> = Vec::new();
    if write_start(xml, element)? {
        open.push((element, 0));
    }
    while let Some(top) = open.last_mut() {
        let (current, index) = *top;
        top.1 += 1;
        match current.children().get(index) {
            None => {
                write(xml, Event::End(BytesEnd::new(current.name())))?;
                open.pop();
            }
            Some(Node::Element(inner)) => {
                if write_start(xml, inner)? {
                    open.push((inner, 0));
                }
            }
            Some(Node::Text(text)) => write(xml, Event::Text(BytesText::new(text)))?,
            Some(Node::Comment(text)) => {
                write(xml, Event::Comment(BytesText::from_escaped(text.as_str())))?;
            }
        }
    }
    Ok(())
}

/// Writes the start tag, or an empty tag for a childless element. Returns
/// whether the element was left open.
fn write_start(xml: &mut XmlWriter, element: &Element) -> Result<bool, ReportError> {
    let mut start = BytesStart::new(element.name());
    for attr in element.attributes() {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }
    if element.children().is_empty() {
        write(xml, Event::Empty(start))?;
        return Ok(false);
    }
    write(xml, Event::Start(start))?;
    Ok(true)
}

fn write_text_element(xml: &mut XmlWriter, name: &str, text: &str) -> Result<(), ReportError> {
    write(xml, Event::Start(BytesStart::new(name)))?;
    write(xml, Event::Text(BytesText::new(text)))?;
    write(xml, Event::End(BytesEnd::new(name)))
}

fn write(xml: &mut XmlWriter, event: Event<'_>) -> Result<(), ReportError> {
    xml.write_event(event).map_err(ReportError::xml)
}
