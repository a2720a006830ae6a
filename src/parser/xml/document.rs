//! In-memory element tree for a workflow file
//!
//! Elements are stored in an arena in document order, so a node's id is
//! also its position in a pre-order walk and its descendants occupy the
//! contiguous id range `id + 1 .. subtree_end`. Rules only ever see the
//! [`Node`] handle, never quick-xml types.

use super::query::{Query, QueryError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::fmt;
use thiserror::Error;

pub type NodeId = usize;

/// Error raised when a workflow file is not well-formed XML
#[derive(Debug, Clone, Error)]
#[error("{message} (at byte {position})")]
pub struct XmlError {
    pub position: usize,
    pub message: String,
}

impl XmlError {
    fn new(position: usize, message: impl fmt::Display) -> Self {
        Self {
            position,
            message: message.to_string(),
        }
    }
}

/// Namespace-resolved name of an element or attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    /// Match against a namespace URI (`None` = no namespace) and local name
    pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == namespace
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

#[derive(Debug)]
struct Element {
    name: QName,
    attributes: Vec<Attribute>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    subtree_end: NodeId,
}

/// A parsed workflow document
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Parse a document from its text
    pub fn parse(contents: &str) -> Result<Self, XmlError> {
        let mut reader = NsReader::from_str(contents);
        reader.trim_text(true);

        let mut elements: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let position = reader.buffer_position();
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| XmlError::new(position, e))?;
            let namespace = owned_namespace(resolved);

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    let id = elements.len();
                    let element = read_element(&reader, e, namespace, stack.last().copied(), position)?;
                    elements.push(element);

                    if let Some(&parent) = stack.last() {
                        elements[parent].children.push(id);
                    } else if id != 0 {
                        return Err(XmlError::new(position, "multiple root elements"));
                    }

                    if is_empty {
                        elements[id].subtree_end = id + 1;
                    } else {
                        stack.push(id);
                    }
                }
                Event::End(_) => {
                    let id = stack
                        .pop()
                        .ok_or_else(|| XmlError::new(position, "unexpected closing tag"))?;
                    elements[id].subtree_end = elements.len();
                }
                Event::Text(t) => {
                    if let Some(&top) = stack.last() {
                        let text = t.unescape().map_err(|e| XmlError::new(position, e))?;
                        elements[top].text.push_str(&text);
                    }
                }
                Event::CData(c) => {
                    if let Some(&top) = stack.last() {
                        elements[top]
                            .text
                            .push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(&open) = stack.last() {
            return Err(XmlError::new(
                reader.buffer_position(),
                format!("unclosed element <{}>", elements[open].name.local),
            ));
        }
        if elements.is_empty() {
            return Err(XmlError::new(0, "document has no root element"));
        }

        Ok(Self { elements })
    }

    pub fn root(&self) -> Node<'_> {
        self.node(0)
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { doc: self, id }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Evaluate a path expression against the whole document
    pub fn query(&self, expression: &str) -> Result<Vec<Node<'_>>, QueryError> {
        let query = Query::parse(expression)?;
        Ok(self.run(&query, None))
    }

    /// Evaluate an already-compiled query, optionally relative to a node
    pub fn run(&self, query: &Query, context: Option<NodeId>) -> Vec<Node<'_>> {
        query
            .evaluate(self, context)
            .into_iter()
            .map(|id| self.node(id))
            .collect()
    }

    pub(crate) fn name_of(&self, id: NodeId) -> &QName {
        &self.elements[id].name
    }

    pub(crate) fn attributes_of(&self, id: NodeId) -> &[Attribute] {
        &self.elements[id].attributes
    }

    pub(crate) fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.elements[id].children
    }

    pub(crate) fn subtree_end(&self, id: NodeId) -> NodeId {
        self.elements[id].subtree_end
    }
}

fn owned_namespace(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        // Undeclared prefixes are tolerated and treated as "no namespace"
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

fn read_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
    parent: Option<NodeId>,
    position: usize,
) -> Result<Element, XmlError> {
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::new(position, e))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let (resolved, local) = reader.resolve_attribute(attr.key);
        let name = QName {
            namespace: owned_namespace(resolved),
            local: String::from_utf8_lossy(local.as_ref()).into_owned(),
        };
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::new(position, e))?
            .into_owned();

        attributes.push(Attribute { name, value });
    }

    Ok(Element {
        name: QName {
            namespace,
            local: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        },
        attributes,
        parent,
        children: Vec::new(),
        text: String::new(),
        subtree_end: 0,
    })
}

/// Strip a `{uri}` or `prefix:` wrapper from a tag name
pub fn local_tag(tag: &str) -> &str {
    let tag = match tag.find('}') {
        Some(pos) => &tag[pos + 1..],
        None => tag,
    };
    match tag.rfind(':') {
        Some(pos) => &tag[pos + 1..],
        None => tag,
    }
}

/// Lightweight handle to an element of a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn name(&self) -> &'a QName {
        &self.doc.elements[self.id].name
    }

    /// Tag in `{namespace-uri}LocalName` form
    pub fn tag(&self) -> String {
        self.name().to_string()
    }

    pub fn local_name(&self) -> &'a str {
        &self.name().local
    }

    pub fn namespace(&self) -> Option<&'a str> {
        self.name().namespace.as_deref()
    }

    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name().is(Some(namespace), local)
    }

    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace() == Some(namespace)
    }

    /// Value of an unqualified attribute
    pub fn attr(&self, local: &str) -> Option<&'a str> {
        self.attr_ns(None, local)
    }

    /// Value of an attribute in the given namespace
    pub fn attr_ns(&self, namespace: Option<&str>, local: &str) -> Option<&'a str> {
        self.doc.elements[self.id]
            .attributes
            .iter()
            .find(|a| a.name.is(namespace, local))
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, local: &str) -> bool {
        self.attr(local).is_some()
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        &self.doc.elements[self.id].attributes
    }

    /// Character data directly inside this element
    pub fn text(&self) -> &'a str {
        &self.doc.elements[self.id].text
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.doc.elements[self.id].parent.map(|id| self.doc.node(id))
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        std::iter::successors(self.parent(), move |n| {
            doc.elements[n.id].parent.map(|id| doc.node(id))
        })
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        doc.elements[self.id].children.iter().map(move |&id| doc.node(id))
    }

    pub fn child_count(&self) -> usize {
        self.doc.elements[self.id].children.len()
    }

    /// Descendants in document order
    pub fn descendants(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        (self.id + 1..doc.elements[self.id].subtree_end).map(move |id| doc.node(id))
    }

    pub fn has_ancestor(&self, namespace: &str, local: &str) -> bool {
        self.ancestors().any(|a| a.is(namespace, local))
    }

    /// Evaluate a path expression relative to this node
    pub fn select(&self, expression: &str) -> Result<Vec<Node<'a>>, QueryError> {
        let query = Query::parse(expression)?;
        Ok(self.doc.run(&query, Some(self.id)))
    }

    /// Human-readable name used in findings.
    ///
    /// A `Target` element sits two levels below the activity that owns it,
    /// so it reports the activity instead.
    pub fn display_name(&self) -> &'a str {
        let node = if self.local_name() == "Target" {
            self.parent().and_then(|p| p.parent()).unwrap_or(*self)
        } else {
            *self
        };

        match node.attr("DisplayName") {
            Some(name) if !name.is_empty() => name,
            _ => node.local_name(),
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}, {})", self.id, self.name())
    }
}
