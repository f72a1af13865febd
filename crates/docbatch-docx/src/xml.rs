//! Minimal mutable XML tree for WordprocessingML parts.
//!
//! Attribute values and markup other than elements and text are kept in
//! their raw, escaped form, so a part that is parsed and written back
//! without edits reproduces the same document.

use quick_xml::Reader;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{DocxError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// Declarations, comments, CDATA and processing instructions, verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    /// `(qualified name, raw escaped value)`.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>, part: &str) -> Result<Self> {
        let name = utf8(start.name().as_ref(), part)?.to_string();
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            attrs.push((
                utf8(attr.key.as_ref(), part)?.to_string(),
                utf8(&attr.value, part)?.to_string(),
            ));
        }
        Ok(Self {
            name,
            attrs,
            children: Vec::new(),
        })
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.is(name))
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn set_text(&mut self, text: String) {
        self.children.retain(|node| !matches!(node, Node::Text(_)));
        self.children.push(Node::Text(text));
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }
}

/// Parse a whole part into its top-level nodes.
pub(crate) fn parse(xml: &str, part: &str) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut top = Vec::new();

    loop {
        let node = match reader.read_event()? {
            Event::Start(start) => {
                stack.push(Element::from_start(&start, part)?);
                continue;
            }
            Event::End(_) => match stack.pop() {
                Some(element) => Node::Element(element),
                None => return Err(DocxError::malformed(part, "unbalanced end tag")),
            },
            Event::Empty(start) => Node::Element(Element::from_start(&start, part)?),
            Event::Text(text) => Node::Text(text.unescape()?.into_owned()),
            Event::CData(data) => Node::Raw(format!("<![CDATA[{}]]>", utf8(&data, part)?)),
            Event::Comment(comment) => Node::Raw(format!("<!--{}-->", utf8(&comment, part)?)),
            Event::Decl(decl) => Node::Raw(format!("<?{}?>", utf8(&decl, part)?)),
            Event::PI(pi) => Node::Raw(format!("<?{}?>", utf8(&pi, part)?)),
            Event::DocType(doctype) => {
                Node::Raw(format!("<!DOCTYPE {}>", utf8(&doctype, part)?))
            }
            Event::Eof => break,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => top.push(node),
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocxError::malformed(part, format!("unclosed element {}", open.name)));
    }
    Ok(top)
}

pub(crate) fn write(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

pub(crate) fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
        Node::Raw(raw) => out.push_str(raw),
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attrs {
                let quote = if value.contains('"') { '\'' } else { '"' };
                out.push(' ');
                out.push_str(key);
                out.push('=');
                out.push(quote);
                out.push_str(value);
                out.push(quote);
            }
            if element.children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in &element.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

fn utf8<'a>(bytes: &'a [u8], part: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|err| DocxError::malformed(part, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unedited_part_is_reproduced() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t xml:space="preserve">a &amp; b &lt; c</w:t></w:r></w:p><w:sectPr/></w:body></w:document>"#;
        let nodes = parse(xml, "word/document.xml").expect("parse");
        assert_eq!(write(&nodes), xml);
    }

    #[test]
    fn text_is_unescaped_in_the_tree() {
        let nodes = parse("<w:t>&quot;ООО &amp; Ко&quot;</w:t>", "part").expect("parse");
        let Node::Element(t) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(t.text(), "\"ООО & Ко\"");
        assert_eq!(write(&nodes), "<w:t>\"ООО &amp; Ко\"</w:t>");
    }

    #[test]
    fn single_quoted_attribute_with_double_quote_keeps_its_quotes() {
        let xml = r#"<a title='say "hi"'/>"#;
        let nodes = parse(xml, "part").expect("parse");
        assert_eq!(write(&nodes), xml);
    }

    #[test]
    fn unbalanced_markup_is_rejected() {
        assert!(parse("<a><b></a>", "part").is_err());
        assert!(parse("<a>", "part").is_err());
    }
}
