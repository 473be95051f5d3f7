//! Process-wide parameter schema.

use super::builtin::builtin_fields;
use super::field::FieldSpec;
use once_cell::sync::Lazy;

static SCHEMA: Lazy<ParameterSchema> = Lazy::new(ParameterSchema::builtin);

/// Get the shared, read-only parameter schema.
///
/// Built on first use and never mutated afterwards.
pub fn parameter_schema() -> &'static ParameterSchema {
    &SCHEMA
}

/// Fixed set of extractable fields.
#[derive(Debug, Clone)]
pub struct ParameterSchema {
    fields: Vec<FieldSpec>,
}

impl ParameterSchema {
    /// Schema with the built-in LinkedEarth fields.
    pub fn builtin() -> Self {
        Self {
            fields: builtin_fields(),
        }
    }

    /// All fields, in prompt order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// `true` if `name` is one of the schema's field names.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Resolve a raw value for a field to its canonical name.
    ///
    /// # Returns
    ///
    /// `None` if the field is unknown or the value is not in its vocabulary
    pub fn resolve(&self, field: &str, raw: &str) -> Option<&'static str> {
        self.field(field).and_then(|f| f.resolve(raw))
    }
}
