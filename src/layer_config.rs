//! Developer-authored layer selection: which functions the layer intercepts,
//! which it calls through to the next layer, and which extensions it uses.
//! Three flat string lists in a TOML file; the registry core never reads
//! this, but the downstream generator keys its lookups off these names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Functions the loader-facing layer plumbing always intercepts itself.
/// Listing one of these in `override_functions` is a configuration mistake.
pub const IMPLICIT_FUNCTIONS: [&str; 4] = [
    "xrCreateInstance",
    "xrDestroyInstance",
    "xrGetInstanceProcAddr",
    "xrEnumerateInstanceExtensionProperties",
];

pub type LayerConfigResult<T> = Result<T, LayerConfigError>;

#[derive(Debug, Error)]
pub enum LayerConfigError {
    #[error("failed to read layer config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid layer config {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerConfig {
    /// Functions the layer intercepts and may change the behavior of.
    pub override_functions: Vec<String>,
    /// Functions the layer needs to call on the next layer or runtime.
    pub requested_functions: Vec<String>,
    /// OpenXR extension names the layer uses, e.g. `XR_KHR_vulkan_enable`.
    pub extensions: Vec<String>,
}

impl LayerConfig {
    pub fn load(path: &Path) -> LayerConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LayerConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| LayerConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Functions listed for override that are already handled implicitly.
    pub fn implicit_overrides(&self) -> Vec<&str> {
        self.override_functions
            .iter()
            .map(String::as_str)
            .filter(|name| IMPLICIT_FUNCTIONS.contains(name))
            .collect()
    }

    /// Every function name the generator will need a signature for, in
    /// selection order: overrides first, then requested call-throughs.
    pub fn selected_functions(&self) -> impl Iterator<Item = &str> {
        self.override_functions
            .iter()
            .chain(self.requested_functions.iter())
            .map(String::as_str)
    }
}
