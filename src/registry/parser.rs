use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use serde::Serialize;
use tracing::warn;
use xmltree::{Element, XMLNode};

use crate::registry::decl;
use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::index::CommandIndex;
use crate::registry::model::Command;
use crate::registry::node::element_text;

/// Upper bounds applied to untrusted registry documents before extraction.
/// The size bound is checked before the XML is read; the depth bound runs on
/// the parsed tree before any of it is walked.
#[derive(Debug, Clone, Copy)]
pub struct ParseLimits {
    pub max_document_bytes: u64,
    pub max_tree_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits {
            max_document_bytes: 64 * 1024 * 1024,
            max_tree_depth: 64,
        }
    }
}

/// One skipped or degraded registry entry. These never abort the parse; they
/// accumulate so the caller can decide whether a degraded index is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ParseDiagnostic {
    /// `<command>` without a `<proto>`; the command is dropped.
    CommandMissingProto { position: usize },
    /// `<proto>` without a `<name>`; the command is dropped.
    CommandMissingName { position: usize },
    /// `<param>` without a `<name>`; only that parameter is dropped.
    ParameterMissingName { command: String, position: usize },
    /// The name token occurs more than once in the reconstructed declaration,
    /// so the type/name split is best-effort. The parameter is kept.
    AmbiguousNameSplit { command: String, param: String },
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDiagnostic::CommandMissingProto { position } => {
                write!(f, "command #{position} has no <proto>, dropped")
            }
            ParseDiagnostic::CommandMissingName { position } => {
                write!(f, "command #{position} has no <name> in its <proto>, dropped")
            }
            ParseDiagnostic::ParameterMissingName { command, position } => {
                write!(f, "{command}: parameter #{position} has no <name>, dropped")
            }
            ParseDiagnostic::AmbiguousNameSplit { command, param } => {
                write!(f, "{command}: ambiguous type/name split for parameter {param}")
            }
        }
    }
}

/// Result of one registry parse: the read-only index plus everything that was
/// skipped along the way.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub index: CommandIndex,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parses the registry document at `path` into a [`ParseOutcome`].
///
/// Document-level failures (unreadable, oversized, malformed markup, overly
/// deep tree) are fatal and produce no partial index. Incomplete commands and
/// parameters are dropped with a diagnostic instead.
pub fn parse_registry(path: &Path, limits: &ParseLimits) -> RegistryResult<ParseOutcome> {
    let metadata = std::fs::metadata(path).map_err(|e| RegistryError::io(path, e))?;
    if metadata.len() > limits.max_document_bytes {
        return Err(RegistryError::DocumentTooLarge {
            size: metadata.len(),
            max: limits.max_document_bytes,
        });
    }

    let file = File::open(path).map_err(|e| RegistryError::io(path, e))?;
    let root = Element::parse(BufReader::new(file)).map_err(|e| RegistryError::malformed(path, e))?;
    extract(&root, limits)
}

/// In-memory variant of [`parse_registry`], used by tests and embedders that
/// already hold the document.
pub fn parse_registry_str(xml: &str, limits: &ParseLimits) -> RegistryResult<ParseOutcome> {
    if xml.len() as u64 > limits.max_document_bytes {
        return Err(RegistryError::DocumentTooLarge {
            size: xml.len() as u64,
            max: limits.max_document_bytes,
        });
    }

    let root = Element::parse(Cursor::new(xml.as_bytes()))
        .map_err(|e| RegistryError::malformed("<memory>", e))?;
    extract(&root, limits)
}

fn extract(root: &Element, limits: &ParseLimits) -> RegistryResult<ParseOutcome> {
    let depth = tree_depth(root);
    if depth > limits.max_tree_depth {
        return Err(RegistryError::TreeTooDeep {
            depth,
            max: limits.max_tree_depth,
        });
    }

    let mut outcome = ParseOutcome::default();
    let mut position = 0usize;

    // The registry may carry several <commands> sections.
    for commands_node in children_named(root, "commands") {
        for command_el in children_named(commands_node, "command") {
            extract_command(command_el, position, &mut outcome);
            position += 1;
        }
    }

    for diagnostic in &outcome.diagnostics {
        warn!("registry: {diagnostic}");
    }
    Ok(outcome)
}

fn extract_command(command_el: &Element, position: usize, outcome: &mut ParseOutcome) {
    let Some(proto) = command_el.get_child("proto") else {
        outcome
            .diagnostics
            .push(ParseDiagnostic::CommandMissingProto { position });
        return;
    };
    let name = match proto.get_child("name").map(element_text) {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => {
            outcome
                .diagnostics
                .push(ParseDiagnostic::CommandMissingName { position });
            return;
        }
    };

    let return_type = decl::return_type(proto);

    let mut params = Vec::new();
    for (param_position, param_el) in children_named(command_el, "param").enumerate() {
        match decl::parameter(param_el) {
            Some((param, ambiguous)) => {
                if ambiguous {
                    outcome.diagnostics.push(ParseDiagnostic::AmbiguousNameSplit {
                        command: name.clone(),
                        param: param.name.clone(),
                    });
                }
                params.push(param);
            }
            None => outcome
                .diagnostics
                .push(ParseDiagnostic::ParameterMissingName {
                    command: name.clone(),
                    position: param_position,
                }),
        }
    }

    outcome.index.insert(Command {
        name,
        return_type,
        params,
    });
}

fn children_named<'a>(element: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    element.children.iter().filter_map(move |node| match node {
        XMLNode::Element(child) if child.name == name => Some(child),
        _ => None,
    })
}

fn tree_depth(root: &Element) -> usize {
    let mut max = 1;
    let mut stack = vec![(root, 1usize)];
    while let Some((element, depth)) = stack.pop() {
        max = max.max(depth);
        for node in &element.children {
            if let XMLNode::Element(child) = node {
                stack.push((child, depth + 1));
            }
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_SYSTEM: &str = r#"
        <registry>
            <commands>
                <command>
                    <proto><type>XrResult</type> <name>xrGetSystem</name></proto>
                    <param><type>XrInstance</type> <name>instance</name></param>
                    <param>const <type>XrSystemGetInfo</type>* <name>getInfo</name></param>
                    <param><type>XrSystemId</type>* <name>systemId</name></param>
                </command>
            </commands>
        </registry>
    "#;

    #[test]
    fn test_end_to_end_get_system() {
        let outcome = parse_registry_str(GET_SYSTEM, &ParseLimits::default()).unwrap();
        assert!(outcome.diagnostics.is_empty());

        let command = outcome.index.get("xrGetSystem").unwrap();
        assert_eq!(command.return_type, "XrResult");
        assert_eq!(command.params.len(), 3);
        assert_eq!(
            command.param_list(),
            "XrInstance instance, const XrSystemGetInfo* getInfo, XrSystemId* systemId"
        );
    }

    #[test]
    fn test_parameter_order_is_declaration_order() {
        let outcome = parse_registry_str(GET_SYSTEM, &ParseLimits::default()).unwrap();
        let command = outcome.index.get("xrGetSystem").unwrap();
        let names: Vec<_> = command.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["instance", "getInfo", "systemId"]);
    }

    #[test]
    fn test_full_decl_contains_name_and_type_invariant() {
        let outcome = parse_registry_str(GET_SYSTEM, &ParseLimits::default()).unwrap();
        let command = outcome.index.get("xrGetSystem").unwrap();
        for param in &command.params {
            assert!(param.full_decl.contains(&param.name));
            let at = param.full_decl.rfind(&param.name).unwrap();
            assert_eq!(param.ty, param.full_decl[..at].trim());
        }
    }

    #[test]
    fn test_multiple_commands_sections() {
        let xml = r#"
            <registry>
                <commands>
                    <command><proto><type>XrResult</type> <name>xrOne</name></proto></command>
                </commands>
                <commands>
                    <command><proto><type>XrResult</type> <name>xrTwo</name></proto></command>
                </commands>
            </registry>
        "#;
        let outcome = parse_registry_str(xml, &ParseLimits::default()).unwrap();
        assert_eq!(outcome.index.list_names(), vec!["xrOne", "xrTwo"]);
    }

    #[test]
    fn test_duplicate_command_is_last_wins() {
        let xml = r#"
            <registry>
                <commands>
                    <command>
                        <proto><type>XrResult</type> <name>xrGetSystem</name></proto>
                        <param><type>XrInstance</type> <name>instance</name></param>
                    </command>
                    <command>
                        <proto><type>void</type> <name>xrGetSystem</name></proto>
                    </command>
                </commands>
            </registry>
        "#;
        let outcome = parse_registry_str(xml, &ParseLimits::default()).unwrap();
        assert_eq!(outcome.index.list_names(), vec!["xrGetSystem"]);

        let command = outcome.index.get("xrGetSystem").unwrap();
        assert_eq!(command.return_type, "void");
        assert!(command.params.is_empty());
    }

    #[test]
    fn test_command_without_proto_is_dropped() {
        let xml = r#"
            <registry>
                <commands>
                    <command><param><type>XrInstance</type> <name>instance</name></param></command>
                    <command><proto><type>XrResult</type> <name>xrKept</name></proto></command>
                </commands>
            </registry>
        "#;
        let outcome = parse_registry_str(xml, &ParseLimits::default()).unwrap();
        assert_eq!(outcome.index.list_names(), vec!["xrKept"]);
        assert_eq!(
            outcome.diagnostics,
            vec![ParseDiagnostic::CommandMissingProto { position: 0 }]
        );
    }

    #[test]
    fn test_command_without_name_is_dropped() {
        let xml = r#"
            <registry>
                <commands>
                    <command><proto><type>XrResult</type></proto></command>
                </commands>
            </registry>
        "#;
        let outcome = parse_registry_str(xml, &ParseLimits::default()).unwrap();
        assert!(outcome.index.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![ParseDiagnostic::CommandMissingName { position: 0 }]
        );
    }

    #[test]
    fn test_parameter_without_name_is_dropped_from_command_only() {
        let xml = r#"
            <registry>
                <commands>
                    <command>
                        <proto><type>XrResult</type> <name>xrGetSystem</name></proto>
                        <param><type>XrInstance</type> <name>instance</name></param>
                        <param><type>XrSystemId</type>*</param>
                    </command>
                </commands>
            </registry>
        "#;
        let outcome = parse_registry_str(xml, &ParseLimits::default()).unwrap();
        let command = outcome.index.get("xrGetSystem").unwrap();
        assert_eq!(command.params.len(), 1);
        assert_eq!(
            outcome.diagnostics,
            vec![ParseDiagnostic::ParameterMissingName {
                command: "xrGetSystem".to_string(),
                position: 1,
            }]
        );
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let err = parse_registry_str("<registry><commands>", &ParseLimits::default()).unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { .. }));
    }

    #[test]
    fn test_document_size_limit() {
        let limits = ParseLimits {
            max_document_bytes: 8,
            ..ParseLimits::default()
        };
        let err = parse_registry_str(GET_SYSTEM, &limits).unwrap_err();
        assert!(matches!(err, RegistryError::DocumentTooLarge { .. }));
    }

    #[test]
    fn test_tree_depth_limit() {
        let limits = ParseLimits {
            max_tree_depth: 2,
            ..ParseLimits::default()
        };
        let err = parse_registry_str(GET_SYSTEM, &limits).unwrap_err();
        assert!(matches!(err, RegistryError::TreeTooDeep { .. }));
    }
}
