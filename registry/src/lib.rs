//! Command-schema registry with inheritance-aware manifest loading.
//!
//! This crate owns the mapping of fully-qualified command names
//! (`"package.command"`) to immutable [`CommandDefinition`]s:
//!
//! - [`CommandRegistry`] — loads vendor manifests one category at a time,
//!   validates every command's parameter schema (optionally against a base
//!   registry), and commits each load atomically.
//! - [`ObjectSchema`] — the parameter-schema validator: structural checks
//!   plus reference-counted base sharing for inherited commands.
//! - [`load_manifest`] / [`parse_manifest`] — JSON manifest loading
//!   helpers for file and string sources.
//!
//! # Example
//!
//! ```
//! use device_commands_registry::CommandRegistry;
//! use serde_json::json;
//!
//! let manifest = json!({
//!     "light": {
//!         "setColor": {"parameters": {"color": "string"}},
//!     }
//! });
//!
//! let mut registry = CommandRegistry::new();
//! registry.load_commands(&manifest, "vendor", None).unwrap();
//!
//! let def = registry.find_command("light.setColor").unwrap();
//! assert_eq!(def.category(), "vendor");
//! ```

mod definition;
mod error;
mod manifest;
mod registry;
mod schema;

pub use definition::CommandDefinition;
pub use error::{RegistryError, Result};
pub use manifest::{ManifestError, load_manifest, parse_manifest};
pub use registry::{CommandRegistry, PARAMETERS_KEY};
pub use schema::{ObjectSchema, SchemaError};
