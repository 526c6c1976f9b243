use xmltree::Element;

use crate::registry::model::Parameter;
use crate::registry::node::{element_text, MixedDecl};

/// Return type of a `<proto>` element, reconstructed from its mixed content:
/// leading free text, the `<type>` text, and the text trailing `<type>`.
/// A proto without a `<type>` element means the command returns `void`.
pub fn return_type(proto: &Element) -> String {
    let decl = MixedDecl::from_element(proto);
    let Some(type_el) = decl.child("type") else {
        return "void".to_string();
    };

    let mut parts = Vec::new();
    push_trimmed(&mut parts, &decl.leading);
    parts.push(element_text(type_el));
    push_trimmed(&mut parts, decl.trailing_of("type").unwrap_or(""));
    collapse_whitespace(&parts.join(" "))
}

/// Reconstructs one `<param>` element into a [`Parameter`], along with a flag
/// marking an ambiguous type/name split. Returns `None` when the parameter
/// has no usable `<name>` element.
///
/// The full declaration is rebuilt in document order: leading free text,
/// `<type>` text, its trailing text (pointers), the `<name>` text, and the
/// name's trailing text (array suffixes such as `[2]`). The type string is
/// everything before the *last* occurrence of the name inside the full
/// declaration; when the name token also occurs earlier, the split is
/// best-effort and the ambiguity flag is set.
pub fn parameter(param: &Element) -> Option<(Parameter, bool)> {
    let decl = MixedDecl::from_element(param);
    let name_el = decl.child("name")?;
    let name = element_text(name_el).trim().to_string();
    if name.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    push_trimmed(&mut parts, &decl.leading);
    if let Some(type_el) = decl.child("type") {
        parts.push(element_text(type_el));
        push_trimmed(&mut parts, decl.trailing_of("type").unwrap_or(""));
    }
    parts.push(name.clone());
    push_trimmed(&mut parts, decl.trailing_of("name").unwrap_or(""));

    let full_decl = collapse_whitespace(&parts.join(" "));
    let ambiguous = full_decl.matches(name.as_str()).count() > 1;
    let ty = match full_decl.rfind(name.as_str()) {
        Some(at) => full_decl[..at].trim().to_string(),
        None => String::new(),
    };

    Some((
        Parameter {
            ty,
            name,
            full_decl,
        },
        ambiguous,
    ))
}

fn push_trimmed(parts: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
