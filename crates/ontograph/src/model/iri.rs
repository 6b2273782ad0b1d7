//! Prefix handling and qualified names for ontology entities.

use percent_encoding::percent_decode_str;

use super::vocab::STANDARD_PREFIXES;

/// A named entity's IRI split against the document's prefix map.
///
/// `prefix` is `None` when no declared namespace matches; such names live in the
/// "undeclared" bucket and are identified by their full IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub iri: String,
    pub prefix: Option<String>,
    pub local: String,
}

impl QualifiedName {
    /// Graph identifier: `prefix:local`, or the full IRI when undeclared.
    pub fn id(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.iri.clone(),
        }
    }

    /// Local name with percent-escapes decoded, for display.
    pub fn display_local(&self) -> String {
        percent_decode_str(&self.local)
            .decode_utf8_lossy()
            .into_owned()
    }

    /// `prefix:local` with the local part decoded. Undeclared names keep the full IRI.
    pub fn display_id(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.display_local()),
            None => self.iri.clone(),
        }
    }

    pub fn is_undeclared(&self) -> bool {
        self.prefix.is_none()
    }
}

/// Namespace prefixes known to one document, kept sorted by prefix name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map pre-populated with the owl, rdf, rdfs and xsd namespaces.
    pub fn with_standard() -> Self {
        let mut map = Self::new();
        for (name, ns) in STANDARD_PREFIXES {
            map.insert(name, ns);
        }
        map
    }

    /// Register a prefix. A name that is already bound keeps its first namespace.
    pub fn insert(&mut self, name: &str, namespace: &str) {
        if namespace.is_empty() || self.entries.iter().any(|(n, _)| n == name) {
            return;
        }
        let pos = self
            .entries
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .unwrap_or_else(|pos| pos);
        self.entries
            .insert(pos, (name.to_string(), namespace.to_string()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in prefix-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, ns)| (n.as_str(), ns.as_str()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn namespace(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ns)| ns.as_str())
    }

    /// Split an IRI against the longest matching namespace.
    pub fn qualify(&self, iri: &str) -> QualifiedName {
        let mut best: Option<(&str, &str)> = None;
        for (name, ns) in &self.entries {
            if iri.starts_with(ns.as_str())
                && iri.len() > ns.len()
                && best.is_none_or(|(_, prev_ns)| ns.len() > prev_ns.len())
            {
                best = Some((name.as_str(), ns.as_str()));
            }
        }
        match best {
            Some((name, ns)) => QualifiedName {
                iri: iri.to_string(),
                prefix: Some(name.to_string()),
                local: iri[ns.len()..].to_string(),
            },
            None => QualifiedName {
                iri: iri.to_string(),
                prefix: None,
                local: local_name(iri).to_string(),
            },
        }
    }

    /// One `name: namespace` line per prefix, in prefix-name order.
    pub fn display_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, ns)| format!("{name}: {ns}"))
            .collect()
    }
}

/// The part of an IRI after its last `#` or `/`.
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['#', '/']);
    match trimmed.rfind(['#', '/']) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// The namespace portion of an IRI, up to and including its last `#` or `/`.
pub fn namespace_of(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(pos) => &iri[..=pos],
        None => iri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_handles_hash_and_slash() {
        assert_eq!(local_name("http://ex.org/onto#Person"), "Person");
        assert_eq!(local_name("http://ex.org/onto/Person"), "Person");
        assert_eq!(local_name("http://ex.org/onto/"), "onto");
        assert_eq!(local_name("urn-like"), "urn-like");
    }

    #[test]
    fn namespace_of_keeps_separator() {
        assert_eq!(namespace_of("http://ex.org/onto#Person"), "http://ex.org/onto#");
        assert_eq!(namespace_of("http://ex.org/onto/Person"), "http://ex.org/onto/");
    }
}
