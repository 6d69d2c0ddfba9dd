//! Tree encoder: XML text to adjacency-list rows
//!
//! [`encode`] parses a whole document with `quick-xml` and flattens it into
//! row vectors in document (pre-)order. Nothing touches the database here;
//! validation failures surface before any row is written.
//!
//! Ordering rules:
//! - sibling `order` is 1-based and restarts for every parent
//! - attribute `order` follows source order, 1-based
//! - elements are emitted parent-before-child, so inserting them in vector
//!   order always satisfies the parent foreign key
//!
//! Traversal is iterative with an explicit stack; depth is bounded by
//! [`Limits`]. Names and characters are checked against the XML 1.0
//! productions on top of what the tokenizer enforces.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use xmlstore_core::{
    AttributeId, AttributeRow, DocumentId, DocumentRow, ElementId, ElementKind, ElementRow, Error,
    Limits, Result,
};

use crate::syntax;

/// Rows produced from one XML document, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    /// Document header
    pub document: DocumentRow,
    /// Elements in document order; the first one is the root
    pub elements: Vec<ElementRow>,
    /// Attributes grouped by element, in element then source order
    pub attributes: Vec<AttributeRow>,
}

impl EncodedDocument {
    /// Identifier assigned to the new document
    pub fn id(&self) -> DocumentId {
        self.document.id
    }
}

/// An open element awaiting its end tag
struct Frame {
    id: ElementId,
    next_child_order: u32,
}

impl Frame {
    fn take_order(&mut self) -> u32 {
        let order = self.next_child_order;
        self.next_child_order += 1;
        order
    }
}

/// Declaration fields as found in the source
struct Declaration {
    version: Option<String>,
    encoding: Option<String>,
}

/// Parse and flatten `xml` into rows for a document called `name`.
///
/// Checks run in this order:
/// 1. `name` must not be empty (`EmptyDocumentName`)
/// 2. `xml` must be well-formed (`InvalidXml`)
/// 3. the first construct must be a declaration with version and
///    encoding (`InvalidDeclaration`)
///
/// Nesting deeper than `limits` fails with `NestingTooDeep`.
pub fn encode(xml: &str, name: &str, limits: &Limits) -> Result<EncodedDocument> {
    if name.is_empty() {
        return Err(Error::EmptyDocumentName);
    }

    let document_id = DocumentId::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_comments = true;

    let mut declaration: Option<Declaration> = None;
    let mut elements: Vec<ElementRow> = Vec::new();
    let mut attributes: Vec<AttributeRow> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root_closed = false;
    let mut first_event = true;

    loop {
        let event = reader.read_event().map_err(Error::invalid_xml)?;
        let is_first = std::mem::replace(&mut first_event, false);

        match event {
            Event::Decl(decl) => {
                if !is_first {
                    return Err(Error::invalid_xml(
                        "XML declaration allowed only at the start of the document",
                    ));
                }
                let version = decl
                    .version()
                    .ok()
                    .map(|v| String::from_utf8_lossy(&v).into_owned());
                let encoding = match decl.encoding() {
                    Some(Ok(enc)) => Some(String::from_utf8_lossy(&enc).into_owned()),
                    Some(Err(e)) => return Err(Error::invalid_xml(e)),
                    None => None,
                };
                declaration = Some(Declaration { version, encoding });
            }
            Event::Start(start) => {
                let id = open_element(
                    &start,
                    document_id,
                    &mut stack,
                    root_closed,
                    limits,
                    &reader,
                    &mut elements,
                    &mut attributes,
                )?;
                stack.push(Frame {
                    id,
                    next_child_order: 1,
                });
            }
            Event::Empty(start) => {
                open_element(
                    &start,
                    document_id,
                    &mut stack,
                    root_closed,
                    limits,
                    &reader,
                    &mut elements,
                    &mut attributes,
                )?;
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                // quick-xml has already matched the end name against the open tag
                if stack.pop().is_none() {
                    return Err(Error::invalid_xml("unexpected end tag"));
                }
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Event::Text(text) => {
                if text.windows(3).any(|w| w == b"]]>") {
                    return Err(Error::invalid_xml("']]>' is not allowed in character data"));
                }
                let value = text.unescape().map_err(Error::invalid_xml)?;
                check_chars(&value)?;
                if value.trim().is_empty() {
                    continue;
                }
                push_text(value.into_owned(), document_id, &mut stack, &mut elements)?;
            }
            Event::CData(cdata) => {
                let value = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(Error::invalid_xml)?;
                check_chars(&value)?;
                push_text(value, document_id, &mut stack, &mut elements)?;
            }
            Event::Comment(comment) => {
                let content = reader.decoder().decode(&comment).map_err(Error::invalid_xml)?;
                check_chars(&content)?;
            }
            Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(Error::invalid_xml("unexpected end of input, unclosed element"));
    }
    if elements.is_empty() {
        return Err(Error::invalid_xml("document has no root element"));
    }

    let declaration = declaration.ok_or(Error::InvalidDeclaration)?;
    let (version, encoding) = match (declaration.version, declaration.encoding) {
        (Some(v), Some(e)) if !v.is_empty() && !e.is_empty() => (v, e),
        _ => return Err(Error::InvalidDeclaration),
    };

    Ok(EncodedDocument {
        document: DocumentRow {
            id: document_id,
            name: name.to_string(),
            version,
            encoding,
        },
        elements,
        attributes,
    })
}

#[allow(clippy::too_many_arguments)]
fn open_element(
    start: &BytesStart<'_>,
    document_id: DocumentId,
    stack: &mut [Frame],
    root_closed: bool,
    limits: &Limits,
    reader: &Reader<&[u8]>,
    elements: &mut Vec<ElementRow>,
    attributes: &mut Vec<AttributeRow>,
) -> Result<ElementId> {
    if stack.is_empty() && root_closed {
        return Err(Error::invalid_xml("multiple root elements"));
    }
    limits.check_depth(stack.len() + 1)?;

    let decoder = reader.decoder();
    let name = decoder
        .decode(start.name().as_ref())
        .map_err(Error::invalid_xml)?
        .into_owned();
    check_name(&name)?;

    let (parent_id, order) = match stack.last_mut() {
        Some(parent) => (Some(parent.id), parent.take_order()),
        None => (None, 1),
    };

    let id = ElementId::new();
    elements.push(ElementRow {
        id,
        document_id,
        parent_id,
        order,
        kind: ElementKind::Node,
        value: name,
    });

    for (index, attr) in start.attributes().enumerate() {
        let attr = attr.map_err(Error::invalid_xml)?;
        let attr_name = decoder
            .decode(attr.key.as_ref())
            .map_err(Error::invalid_xml)?
            .into_owned();
        check_name(&attr_name)?;
        if attr.value.contains(&b'<') {
            return Err(Error::invalid_xml(format!(
                "'<' is not allowed in the value of attribute '{}'",
                attr_name
            )));
        }
        let attr_value = attr.unescape_value().map_err(Error::invalid_xml)?.into_owned();
        check_chars(&attr_value)?;
        attributes.push(AttributeRow {
            id: AttributeId::new(),
            element_id: id,
            name: attr_name,
            value: attr_value,
            order: index as u32 + 1,
        });
    }

    Ok(id)
}

fn check_name(name: &str) -> Result<()> {
    if syntax::is_name(name) {
        Ok(())
    } else {
        Err(Error::invalid_xml(format!("'{}' is not a valid XML name", name)))
    }
}

fn check_chars(text: &str) -> Result<()> {
    match syntax::find_illegal_char(text) {
        Some(c) => Err(Error::invalid_xml(format!(
            "character U+{:04X} is not allowed in XML",
            c as u32
        ))),
        None => Ok(()),
    }
}

fn push_text(
    value: String,
    document_id: DocumentId,
    stack: &mut [Frame],
    elements: &mut Vec<ElementRow>,
) -> Result<()> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| Error::invalid_xml("text outside of the root element"))?;
    elements.push(ElementRow {
        id: ElementId::new(),
        document_id,
        parent_id: Some(parent.id),
        order: parent.take_order(),
        kind: ElementKind::Text,
        value,
    });
    Ok(())
}
