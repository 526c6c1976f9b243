use xmltree::{Element, XMLNode};

/// Flattened view of a declaration element's mixed content: the free text
/// before the first child element, then each child element paired with the
/// free text that follows it (up to the next child).
///
/// In the registry, qualifiers and array suffixes live in that free text:
/// `<param>const <type>XrSystemGetInfo</type>* <name>getInfo</name></param>`
/// keeps `const ` as leading text and `* ` as the trailing text of the
/// `<type>` element. The reconstruction in [`decl`](super::decl) works
/// against this shape rather than poking at the raw node list.
#[derive(Debug, Default)]
pub struct MixedDecl<'a> {
    pub leading: String,
    pub items: Vec<(&'a Element, String)>,
}

impl<'a> MixedDecl<'a> {
    pub fn from_element(element: &'a Element) -> Self {
        let mut decl = MixedDecl::default();
        for node in &element.children {
            match node {
                XMLNode::Element(child) => decl.items.push((child, String::new())),
                XMLNode::Text(text) | XMLNode::CData(text) => match decl.items.last_mut() {
                    Some((_, trailing)) => trailing.push_str(text),
                    None => decl.leading.push_str(text),
                },
                _ => {}
            }
        }
        decl
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&'a Element> {
        self.items
            .iter()
            .map(|(el, _)| *el)
            .find(|el| el.name == name)
    }

    /// Free text that follows the first child element with the given name.
    pub fn trailing_of(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(el, _)| el.name == name)
            .map(|(_, trailing)| trailing.as_str())
    }
}

/// Concatenated text content of an element, in document order.
pub fn element_text(element: &Element) -> String {
    let mut text = String::new();
    for node in &element.children {
        if let XMLNode::Text(value) | XMLNode::CData(value) = node {
            text.push_str(value);
        }
    }
    text
}
