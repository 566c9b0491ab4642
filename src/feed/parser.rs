//! Upstream RSS parsing.
//!
//! The document is read into a small namespace-aware element tree and the
//! fields the filter and builder need are pulled out of it. `feed-rs` is not
//! used here: it normalizes text and merges namespaces, and the creator match
//! has to compare the raw element text.
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use thiserror::Error;

/// Dublin Core namespace carrying the `creator` element.
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// SEC-003: Maximum element nesting accepted from upstream.
/// Bounds memory for hostile documents; real feeds nest a handful of levels.
const MAX_XML_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(String),

    /// SEC-003: Nesting depth exceeds safety limit.
    #[error("XML nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    #[error("Unbound namespace prefix: {0}")]
    UnboundPrefix(String),

    #[error("Document ended before all elements were closed")]
    UnexpectedEof,

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Content found outside the root element")]
    ContentOutsideRoot,

    #[error("Feed has no <channel> element")]
    MissingChannel,
}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        ParseError::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Xml(e.to_string())
    }
}

/// Channel-level data extracted from the upstream document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamFeed {
    /// Text of `channel/title`, if present and non-empty.
    pub title: Option<String>,
    /// Every `item` in the document, in document order.
    pub items: Vec<UpstreamItem>,
}

/// One upstream `<item>`. Empty element text is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamItem {
    /// `dc:creator` text, exactly as written.
    pub creator: Option<String>,
    pub link: Option<String>,
    pub guid: Option<Guid>,
    pub pub_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guid {
    pub value: String,
    /// Raw `isPermaLink` attribute value, if the element carried one.
    pub is_perma_link: Option<String>,
}

/// Parses upstream RSS text.
///
/// Items are collected from anywhere below the root, not only from
/// `rss/channel`, so aggregated or nested structures still yield their items.
/// Item fields are looked up among the item's direct children only.
///
/// # Errors
///
/// - [`ParseError::Xml`] and friends for documents that are not well-formed
/// - [`ParseError::MissingChannel`] when the root has no `channel` child
pub fn parse_feed(xml: &str) -> Result<UpstreamFeed, ParseError> {
    let root = parse_tree(xml)?;
    let channel = root
        .child(None, "channel")
        .ok_or(ParseError::MissingChannel)?;

    let items = root
        .descendants("item")
        .into_iter()
        .map(|item| UpstreamItem {
            creator: item.child_text(Some(DC_NAMESPACE), "creator"),
            link: item.child_text(None, "link"),
            guid: item.child(None, "guid").and_then(|guid| {
                guid.text().map(|value| Guid {
                    value: value.to_string(),
                    is_perma_link: guid.attribute("isPermaLink").map(str::to_string),
                })
            }),
            pub_date: item.child_text(None, "pubDate"),
        })
        .collect();

    Ok(UpstreamFeed {
        title: channel.child_text(None, "title"),
        items,
    })
}

/// Element node. `text` holds the character data that appears before the
/// first child element; anything after a child is not kept.
#[derive(Debug, Default)]
struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.name == name
    }

    fn child(&self, namespace: Option<&str>, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    fn child_text(&self, namespace: Option<&str>, name: &str) -> Option<String> {
        self.child(namespace, name)
            .and_then(Element::text)
            .map(str::to_string)
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Un-namespaced descendants called `name`, in pre-order. Excludes `self`.
    fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut pending: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(el) = pending.pop() {
            if el.is(None, name) {
                found.push(el);
            }
            pending.extend(el.children.iter().rev());
        }
        found
    }
}

fn parse_tree(xml: &str) -> Result<Element, ParseError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let namespace = match resolved {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(ParseError::UnboundPrefix(
                    String::from_utf8_lossy(&prefix).into_owned(),
                ))
            }
        };

        match event {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::ContentOutsideRoot);
                }
                // SEC-003: Reject excessively nested documents
                if stack.len() >= MAX_XML_DEPTH {
                    return Err(ParseError::MaxDepthExceeded(MAX_XML_DEPTH));
                }
                stack.push(open_element(&reader, &e, namespace)?);
            }
            Event::Empty(e) => {
                let element = open_element(&reader, &e, namespace)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(ParseError::ContentOutsideRoot),
                }
            }
            Event::End(_) => {
                // End names are checked by the reader, so the stack cannot be empty here
                let Some(element) = stack.pop() else {
                    return Err(ParseError::Xml("unexpected closing tag".to_string()));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|e| ParseError::Xml(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::UnexpectedEof);
    }
    root.ok_or(ParseError::NoRootElement)
}

fn open_element(
    reader: &NsReader<&[u8]>,
    e: &BytesStart<'_>,
    namespace: Option<String>,
) -> Result<Element, ParseError> {
    check_name(e.name().as_ref())?;

    let decoder = reader.decoder();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let raw_key = attr.key.as_ref();
        check_name(raw_key)?;

        // Namespace declarations and the reserved `xml` prefix are always bound
        let is_reserved = raw_key == b"xmlns"
            || raw_key.starts_with(b"xmlns:")
            || raw_key.starts_with(b"xml:");
        if !is_reserved {
            if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
                return Err(ParseError::UnboundPrefix(
                    String::from_utf8_lossy(&prefix).into_owned(),
                ));
            }
        }

        if attr.value.contains(&b'<') {
            return Err(ParseError::Xml(format!(
                "'<' is not allowed in the value of attribute {}",
                String::from_utf8_lossy(raw_key)
            )));
        }

        let key = String::from_utf8_lossy(raw_key).into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        namespace,
        name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
        attributes,
        text: None,
        children: Vec::new(),
    })
}

/// Rejects element and attribute names outside the XML `Name` production.
fn check_name(raw: &[u8]) -> Result<(), ParseError> {
    let name = std::str::from_utf8(raw).map_err(|e| ParseError::Xml(e.to_string()))?;
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char);
    if valid {
        Ok(())
    } else {
        Err(ParseError::Xml(format!("invalid XML name: {name:?}")))
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(current) if current.children.is_empty() => {
            current
                .text
                .get_or_insert_with(String::new)
                .push_str(text);
            Ok(())
        }
        // Tail text after a child element
        Some(_) => Ok(()),
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::ContentOutsideRoot),
    }
}
