//! OpenXR registry parsing: reconstructs command signatures from the mixed
//! XML content of `xr.xml` and serves them from a read-only index.

pub mod decl;
pub mod error;
pub mod index;
pub mod locator;
pub mod model;
pub mod node;
pub mod parser;

pub use error::{RegistryError, RegistryResult};
pub use index::CommandIndex;
pub use locator::{RegistryLocator, REGISTRY_FILE_NAME};
pub use model::{Command, Parameter};
pub use parser::{parse_registry, parse_registry_str, ParseDiagnostic, ParseLimits, ParseOutcome};
