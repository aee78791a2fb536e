//! The command registry: manifest loading, lookup, and JSON projection.

use std::collections::HashMap;
use std::sync::Arc;

use device_commands_core::ValueKind;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::definition::CommandDefinition;
use crate::error::{RegistryError, Result};
use crate::schema::ObjectSchema;

/// Manifest attribute holding a command's parameter schema.
pub const PARAMETERS_KEY: &str = "parameters";

/// Registry of command definitions keyed by full command name.
///
/// A full command name is `"<package>.<command>"` and is globally unique
/// across categories. Loads are per-category and all-or-nothing: either a
/// whole manifest is applied or the registry is left untouched, so the
/// registry is fully valid at every observable instant.
///
/// The registry holds no locking of its own; callers serialize mutation
/// ([`load_commands`](Self::load_commands), [`clear`](Self::clear))
/// against concurrent reads themselves.
///
/// # Examples
///
/// ```
/// use device_commands_registry::CommandRegistry;
/// use serde_json::json;
///
/// let manifest = json!({
///     "light": {
///         "setColor": {"parameters": {"color": "string"}},
///         "blink": {"parameters": {}},
///     }
/// });
///
/// let mut registry = CommandRegistry::new();
/// registry.load_commands(&manifest, "builtin", None).unwrap();
///
/// assert_eq!(registry.len(), 2);
/// assert!(registry.find_command("light.setColor").is_some());
/// assert!(registry.find_command("light.off").is_none());
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    definitions: HashMap<String, CommandDefinition>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the command definitions of one category from a manifest.
    ///
    /// The manifest is a two-level mapping `package -> command ->
    /// {"parameters": schema, ...}`; members other than `"parameters"`
    /// are ignored. When `base` is given, each command's schema is
    /// validated against the schema of the same command in the base
    /// registry, and a command absent from the base is a vendor extension
    /// whose name must start with `_`.
    ///
    /// The whole manifest is staged and validated before any mutation.
    /// On success, every previous definition of `category` is replaced by
    /// the staged set in one commit, so re-registering one vendor's
    /// command set is idempotent and never disturbs other categories. On
    /// error, the registry is untouched.
    ///
    /// # Errors
    ///
    /// See [`RegistryError`]; any staged name already registered under a
    /// different category fails the load with
    /// [`RegistryError::DuplicateCommandDef`].
    pub fn load_commands(
        &mut self,
        manifest: &Value,
        category: &str,
        base: Option<&CommandRegistry>,
    ) -> Result<()> {
        let packages = as_object(manifest, || "manifest".to_string())?;

        let mut staged: HashMap<String, CommandDefinition> = HashMap::new();
        for (package_name, package_value) in packages {
            let commands = as_object(package_value, || format!("package '{package_name}'"))?;

            for (command_name, command_value) in commands {
                if command_name.is_empty() {
                    return Err(RegistryError::InvalidCommandName {
                        package: package_name.clone(),
                        name: command_name.clone(),
                        reason: "command name is empty".to_string(),
                    });
                }
                let members = as_object(command_value, || format!("command '{command_name}'"))?;

                let full_name = format!("{package_name}.{command_name}");
                let parameters =
                    members
                        .get(PARAMETERS_KEY)
                        .ok_or_else(|| RegistryError::PropertyMissing {
                            command: full_name.clone(),
                            property: PARAMETERS_KEY,
                        })?;

                let base_schema = match base {
                    Some(base_registry) => {
                        let found = base_registry
                            .find_command(&full_name)
                            .map(|def| def.parameters_handle());
                        // Commands absent from the base are vendor
                        // extensions and must be marked as such.
                        if found.is_none() && !command_name.starts_with('_') {
                            return Err(RegistryError::InvalidCommandName {
                                package: package_name.clone(),
                                name: command_name.clone(),
                                reason: "custom command names must start with '_'".to_string(),
                            });
                        }
                        found
                    }
                    None => None,
                };

                let schema = ObjectSchema::from_value(parameters, base_schema).map_err(
                    |source| RegistryError::InvalidObjectSchema {
                        command: full_name.clone(),
                        source,
                    },
                )?;

                debug!(command = %full_name, category, "staged command definition");
                staged.insert(full_name, CommandDefinition::new(category, Arc::new(schema)));
            }
        }

        // A name already live under another category means one vendor
        // daemon is trying to redefine another's command: abort with the
        // live registry untouched. Same-category hits are the reload case.
        for name in staged.keys() {
            if let Some(existing) = self.definitions.get(name) {
                if existing.category() != category {
                    return Err(RegistryError::DuplicateCommandDef {
                        command: name.clone(),
                        category: existing.category().to_string(),
                    });
                }
            }
        }

        // Commit: drop the category's previous definitions, insert the
        // staged set.
        self.definitions.retain(|_, def| def.category() != category);
        let count = staged.len();
        self.definitions.extend(staged);
        info!(category, count, "loaded command definitions");
        Ok(())
    }

    /// Looks up a definition by full command name.
    pub fn find_command(&self, full_name: &str) -> Option<&CommandDefinition> {
        self.definitions.get(full_name)
    }

    /// Full names of every command registered under `category`, in
    /// unspecified order.
    pub fn command_names_by_category(&self, category: &str) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|(_, def)| def.category() == category)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Projects the registry back into the manifest shape, containing
    /// only the `"parameters"` member per command.
    ///
    /// With `full_schema` set, each schema is serialized with its
    /// inherited base properties merged in. If any schema fails to
    /// serialize the whole call fails and no partial tree is returned.
    pub fn to_json(&self, full_schema: bool) -> Result<Value> {
        let mut packages: Map<String, Value> = Map::new();
        for (full_name, def) in &self.definitions {
            let schema_json = def.parameters().to_value(full_schema).map_err(|source| {
                RegistryError::InvalidObjectSchema {
                    command: full_name.clone(),
                    source,
                }
            })?;

            let (package_name, command_name) = full_name
                .split_once('.')
                .unwrap_or((full_name.as_str(), ""));

            let package = packages
                .entry(package_name.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(package) = package {
                let mut command = Map::new();
                command.insert(PARAMETERS_KEY.to_string(), schema_json);
                package.insert(command_name.to_string(), Value::Object(command));
            }
        }
        Ok(Value::Object(packages))
    }

    /// Removes every definition.
    pub fn clear(&mut self) {
        self.definitions.clear();
        debug!("cleared command registry");
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over `(full_name, definition)` pairs in unspecified order.
    pub fn commands(&self) -> impl Iterator<Item = (&str, &CommandDefinition)> {
        self.definitions
            .iter()
            .map(|(name, def)| (name.as_str(), def))
    }
}

fn as_object<'a>(
    value: &'a Value,
    context: impl FnOnce() -> String,
) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| RegistryError::TypeMismatch {
        context: context(),
        found: ValueKind::of(value),
    })
}
