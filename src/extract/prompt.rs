//! Extraction prompt construction.

use crate::schema::{FieldKind, ParameterSchema};

/// Build the extraction prompt for a request.
///
/// The prompt depends only on the schema and the request text, so the same
/// request always produces the same prompt.
///
/// # Arguments
///
/// * `schema` - Fields and vocabularies to describe
/// * `request` - User's request, already validated as non-empty
pub fn build_prompt(schema: &ParameterSchema, request: &str) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "You extract structured search parameters from natural language requests about paleoclimate datasets.\n\n",
    );
    prompt.push_str("Request:\n\"");
    prompt.push_str(request.trim());
    prompt.push_str("\"\n\nParameters (extract only what the request mentions):\n");

    for (i, field) in schema.fields().iter().enumerate() {
        let kind = match field.kind {
            FieldKind::List => "list of strings",
            FieldKind::Enumerated => "one value",
            FieldKind::Text => "string",
        };
        prompt.push_str(&format!(
            "{}. {} ({}): {}\n",
            i + 1,
            field.name,
            kind,
            field.description
        ));
        if !field.vocabulary.is_empty() {
            prompt.push_str(&format!(
                "   Allowed values: {}\n",
                field.vocabulary.canonical_names().join(", ")
            ));
        }
        if let Some(default) = field.default {
            prompt.push_str(&format!("   Default when not mentioned: {}\n", default));
        }
    }

    prompt.push_str("\nRespond ONLY with one JSON object of this shape, using null for anything not mentioned:\n{\n");
    let template: Vec<String> = schema
        .fields()
        .iter()
        .map(|field| {
            let value = if field.is_list() {
                "[\"value\", ...] or null"
            } else {
                "\"value\" or null"
            };
            format!("  \"{}\": {}", field.name, value)
        })
        .collect();
    prompt.push_str(&template.join(",\n"));
    prompt.push_str("\n}\n\n");

    prompt.push_str(
        "Rules:\n\
         - Variables are direct measurements (e.g. d18O, Sr_Ca); interpretations are climate quantities inferred from them (e.g. temperature).\n\
         - Use the allowed values exactly as written.\n\
         - Do not guess parameters the request does not mention.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parameter_schema;

    #[test]
    fn test_prompt_is_deterministic() {
        let schema = parameter_schema();
        let a = build_prompt(schema, "coral d18O records from the Holocene");
        let b = build_prompt(schema, "coral d18O records from the Holocene");
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_lists_every_field() {
        let schema = parameter_schema();
        let prompt = build_prompt(schema, "  ice cores  ");
        assert!(prompt.contains("\"ice cores\""));
        for field in schema.fields() {
            assert!(prompt.contains(&format!("\"{}\":", field.name)), "{}", field.name);
        }
        assert!(prompt.contains("GlacierIce"));
        assert!(prompt.contains("LastGlacialMaximum"));
        assert!(prompt.contains("Default when not mentioned: partial"));
    }
}
