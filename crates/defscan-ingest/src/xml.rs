//! XML to [`Document`] conversion on top of `quick-xml`.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use defscan_model::{Document, Element, Node, NodeId};

use crate::error::{IngestError, Result};

/// Deepest element nesting accepted. Deeper trees would exhaust the stack
/// when definitions are copied or written into reports.
pub const MAX_DEPTH: usize = 512;

/// Builds documents and hands out element ids.
///
/// Ids keep increasing across every document parsed by the same parser, so
/// elements from different files can be merged into one tree and still be
/// told apart by an origin lookup.
#[derive(Debug, Default)]
pub struct DocumentParser {
    next_id: u32,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty element with a fresh id.
    pub fn new_element(&mut self, name: impl Into<String>) -> Element {
        Element::new(self.allocate(), name)
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<Document> {
        let text = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&text, &path.display().to_string())
    }

    /// Parses `text`; `input` names the source in error messages.
    pub fn parse_str(&mut self, text: &str, input: &str) -> Result<Document> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);
        // A `--` inside a comment would be written back into reports verbatim.
        reader.config_mut().check_comments = true;

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(xml_error(input, reader.buffer_position() as u64, err));
                }
            };
            let position = reader.buffer_position() as u64;
            match event {
                Event::Start(start) => {
                    let element = self.open_element(&start, input, position)?;
                    if stack.len() >= MAX_DEPTH {
                        return Err(IngestError::TooDeep {
                            input: input.to_string(),
                            element: element.name().to_string(),
                            limit: MAX_DEPTH,
                        });
                    }
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = self.open_element(&start, input, position)?;
                    attach_element(&mut stack, &mut root, element, input)?;
                }
                Event::End(_) => {
                    // quick-xml already rejects mismatched end tags.
                    let element = stack.pop().ok_or_else(|| IngestError::Xml {
                        input: input.to_string(),
                        position,
                        message: "end tag without a matching start tag".to_string(),
                    })?;
                    attach_element(&mut stack, &mut root, element, input)?;
                }
                Event::Text(text) => {
                    let raw = utf8(&text, input, position)?;
                    let decoded = unescape(raw).map_err(|err| xml_error(input, position, err))?;
                    push_text(&mut stack, &decoded);
                }
                Event::CData(data) => {
                    let raw = utf8(&data, input, position)?;
                    push_text(&mut stack, raw);
                }
                Event::GeneralRef(reference) => {
                    let entity = utf8(&reference, input, position)?;
                    let resolved = resolve_entity(entity).ok_or_else(|| {
                        IngestError::UnknownEntity {
                            input: input.to_string(),
                            entity: entity.to_string(),
                        }
                    })?;
                    push_text(&mut stack, &resolved);
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = utf8(&comment, input, position)?;
                        parent.push_child(Node::Comment(text.to_string()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(IngestError::UnclosedElement {
                input: input.to_string(),
                element: open.name().to_string(),
            });
        }
        root.map(Document::new).ok_or_else(|| IngestError::MissingRoot {
            input: input.to_string(),
        })
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn open_element(&mut self, start: &BytesStart<'_>, input: &str, position: u64) -> Result<Element> {
        let name = utf8(start.name().as_ref(), input, position)?.to_string();
        let mut element = self.new_element(name);
        for attr in start.attributes() {
            let attr = attr.map_err(|err| xml_error(input, position, err))?;
            let key = utf8(attr.key.as_ref(), input, position)?;
            let raw = utf8(&attr.value, input, position)?;
            let value = unescape(raw).map_err(|err| xml_error(input, position, err))?;
            element.push_attribute(key, value.into_owned());
        }
        Ok(element)
    }
}

fn attach_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    input: &str,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(IngestError::MultipleRoots {
            input: input.to_string(),
            element: element.name().to_string(),
        });
    }
    *root = Some(element);
    Ok(())
}

// Whitespace-only runs are layout, not content. Text outside the root is dropped.
fn push_text(stack: &mut [Element], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    let continues_text = matches!(parent.children().last(), Some(Node::Text(_)));
    if text.trim().is_empty() && !continues_text {
        return;
    }
    parent.push_child(Node::Text(text.to_string()));
}

fn resolve_entity(entity: &str) -> Option<String> {
    if let Some(number) = entity.strip_prefix('#') {
        let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    let text = match entity {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        _ => return None,
    };
    Some(text.to_string())
}

fn utf8<'a>(bytes: &'a [u8], input: &str, position: u64) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|err| xml_error(input, position, err))
}

fn xml_error(input: &str, position: u64, err: impl std::fmt::Display) -> IngestError {
    IngestError::Xml {
        input: input.to_string(),
        position,
        message: err.to_string(),
    }
}
