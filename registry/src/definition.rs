//! Immutable command definitions.

use std::sync::Arc;

use crate::schema::ObjectSchema;

/// A registered command: its category label and parameter schema.
///
/// Definitions are created only by a successful
/// [`CommandRegistry::load_commands`](crate::CommandRegistry::load_commands)
/// and never mutated afterwards. The schema handle may be shared with the
/// base command the definition inherits from.
#[derive(Debug, Clone)]
pub struct CommandDefinition {
    category: String,
    parameters: Arc<ObjectSchema>,
}

impl CommandDefinition {
    pub(crate) fn new(category: &str, parameters: Arc<ObjectSchema>) -> Self {
        Self {
            category: category.to_string(),
            parameters,
        }
    }

    /// The category this command was registered under.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The command's parameter schema.
    pub fn parameters(&self) -> &ObjectSchema {
        &self.parameters
    }

    /// Shared handle to the parameter schema, used as the base when a
    /// derived registry re-validates this command.
    pub(crate) fn parameters_handle(&self) -> &Arc<ObjectSchema> {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_definition_exposes_category_and_schema() {
        let schema =
            Arc::new(ObjectSchema::from_value(&json!({"on": "boolean"}), None).unwrap());
        let def = CommandDefinition::new("vendor", schema);

        assert_eq!(def.category(), "vendor");
        assert!(def.parameters().has_property("on"));
    }

    #[test]
    fn test_clone_shares_the_schema_handle() {
        let schema = Arc::new(ObjectSchema::from_value(&json!({}), None).unwrap());
        let def = CommandDefinition::new("vendor", Arc::clone(&schema));
        let copy = def.clone();
        assert!(Arc::ptr_eq(copy.parameters_handle(), &schema));
    }
}
