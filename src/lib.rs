//! xrgen — registry-driven front end for OpenXR API layer code generation.
//!
//! Parses the OpenXR registry (`xr.xml`) into an order-preserving model of
//! command signatures, for a downstream generator that emits intercepting
//! and forwarding dispatch code. The model is built in a single pass and is
//! read-only afterwards.

pub mod layer_config;
pub mod logging;
pub mod registry;

pub use layer_config::{LayerConfig, LayerConfigError, IMPLICIT_FUNCTIONS};
pub use registry::{
    parse_registry, parse_registry_str, Command, CommandIndex, Parameter, ParseDiagnostic,
    ParseLimits, ParseOutcome, RegistryError, RegistryLocator, RegistryResult,
};
