//! LinkedEarth namespaces and IRI rendering.

/// Prefixes declared in every compiled query, in declaration order.
pub const PREFIXES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("le", "http://linked.earth/ontology#"),
    ("archive", "http://linked.earth/ontology/archive#"),
    ("pvar", "http://linked.earth/ontology/paleo_variables#"),
    ("punits", "http://linked.earth/ontology/paleo_units#"),
    ("interp", "http://linked.earth/ontology/interpretation#"),
];

/// Render the `PREFIX` header.
pub fn prefix_block() -> String {
    PREFIXES
        .iter()
        .map(|(prefix, iri)| format!("PREFIX {}: <{}>", prefix, iri))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a term in one of the known namespaces.
///
/// Uses the prefixed form (`pvar:d18O`) when the local name is a plain
/// identifier and falls back to a full IRI otherwise.
///
/// # Example
///
/// ```
/// use paleo_query::query::namespace::term;
///
/// assert_eq!(term("pvar", "d18O"), "pvar:d18O");
/// assert_eq!(term("pvar", "Sr/Ca"), "<http://linked.earth/ontology/paleo_variables#Sr/Ca>");
/// ```
pub fn term(prefix: &str, local: &str) -> String {
    let namespace = PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, iri)| *iri)
        .unwrap_or("http://linked.earth/ontology#");

    if is_plain_local(local) {
        format!("{}:{}", prefix, local)
    } else {
        let escaped: String = local
            .chars()
            .filter(|c| !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') && !c.is_whitespace())
            .collect();
        format!("<{}{}>", namespace, escaped)
    }
}

fn is_plain_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_block() {
        let block = prefix_block();
        assert!(block.starts_with("PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>"));
        assert!(block.contains("PREFIX le: <http://linked.earth/ontology#>"));
        assert_eq!(block.lines().count(), PREFIXES.len());
    }

    #[test]
    fn test_term_rendering() {
        assert_eq!(term("archive", "GlacierIce"), "archive:GlacierIce");
        assert_eq!(term("interp", "sea_surface_temperature"), "interp:sea_surface_temperature");
        assert_eq!(
            term("interp", "sea surface"),
            "<http://linked.earth/ontology/interpretation#seasurface>"
        );
        assert_eq!(term("punits", "-bad"), "<http://linked.earth/ontology/paleo_units#-bad>");
    }
}
