use serde::{Deserialize, Serialize};

/// One function parameter as declared in the registry.
///
/// Invariant: `full_decl` contains `name`, and `ty` equals `full_decl` with
/// the last occurrence of `name` removed and the remainder trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Type with qualifiers and pointers, e.g. `const XrSystemGetInfo*`.
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    /// Exact reconstructed source declaration, e.g.
    /// `const XrSystemGetInfo* getInfo`.
    pub full_decl: String,
}

/// One OpenXR command (function) from the registry. Parameter order is the
/// call-forwarding argument order, not just display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Parameter>,
}

impl Command {
    /// Full parameter list for a generated prototype; the empty list renders
    /// as the literal `void`.
    pub fn param_list(&self) -> String {
        if self.params.is_empty() {
            return "void".to_string();
        }
        self.params
            .iter()
            .map(|p| p.full_decl.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Just the parameter names, for forwarding the call to the next layer.
    pub fn arg_list(&self) -> String {
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Rendered prototype, e.g. `XrResult xrGetSystem(XrInstance instance, ...)`.
    pub fn signature(&self) -> String {
        format!("{} {}({})", self.return_type, self.name, self.param_list())
    }
}
