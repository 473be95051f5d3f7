//! Parameter schema: fields, vocabularies, periods and regions.

pub mod field;
pub mod builtin;
pub mod parameters;
pub mod periods;
pub mod regions;

pub use field::{normalize_key, FieldKind, FieldSpec, MatchMode, Term, Vocabulary};
pub use parameters::{parameter_schema, ParameterSchema};
pub use periods::Period;
pub use regions::Region;
