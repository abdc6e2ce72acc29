//! Prefix bindings used to expand CURIEs found in the sheets and to compact IRIs
//! when writing sheets back out.

use crate::consts::COMMON_PREFIXES;
use crate::conversion_error;
use anyhow::Result;
use oxigraph::model::NamedNode;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    entries: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map seeded with the common prefixes.
    pub fn well_known() -> Self {
        Self {
            entries: COMMON_PREFIXES
                .iter()
                .map(|(p, ns)| (p.to_string(), ns.to_string()))
                .collect(),
        }
    }

    /// Binds `prefix` to `namespace`, replacing any earlier binding. A trailing
    /// ':' on the prefix is dropped, so ":" binds the default prefix.
    pub fn insert(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        let prefix = normalize_prefix(prefix);
        let namespace = namespace.trim();
        if NamedNode::new(namespace).is_err() {
            return Err(conversion_error!(
                "The namespace '{}' given for prefix '{}' is not a valid IRI",
                namespace,
                prefix
            ));
        }
        if prefix.contains(char::is_whitespace) {
            return Err(conversion_error!(
                "The prefix '{}' must not contain spaces",
                prefix
            ));
        }
        self.entries.insert(prefix, namespace.to_string());
        Ok(())
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Bindings from `other` override ours.
    pub fn extend(&mut self, other: &PrefixMap) {
        for (p, ns) in other.iter() {
            self.entries.insert(p.to_string(), ns.to_string());
        }
    }

    /// Turns a cell value into an IRI. Full IRIs are taken as they are, CURIEs
    /// are expanded with a declared prefix, and anything else is an error.
    pub fn expand(&self, value: &str) -> Result<NamedNode> {
        let value = value.trim();
        if value.contains("://") || value.starts_with("urn:") {
            return NamedNode::new(value).map_err(|_| {
                conversion_error!("'{}' looks like an IRI but is not a valid one", value)
            });
        }
        if let Some((prefix, local)) = value.split_once(':') {
            if let Some(namespace) = self.entries.get(prefix) {
                let iri = format!("{namespace}{local}");
                return NamedNode::new(&iri).map_err(|_| {
                    conversion_error!("The CURIE '{}' expands to an invalid IRI {}", value, iri)
                });
            }
            return Err(conversion_error!(
                "The prefix '{}' used in '{}' is not declared. Add it to the Prefixes sheet or use a full IRI",
                prefix,
                value
            ));
        }
        Err(conversion_error!(
            "'{}' is neither an IRI nor a CURIE with a known prefix",
            value
        ))
    }

    /// Writes `iri` as `prefix:local` with the longest namespace that leaves a
    /// simple local name, otherwise returns the IRI unchanged.
    pub fn compact(&self, iri: &str) -> String {
        self.entries
            .iter()
            .filter(|(_, ns)| iri.len() > ns.len() && iri.starts_with(ns.as_str()))
            .filter(|(_, ns)| is_simple_local_name(&iri[ns.len()..]))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(p, ns)| format!("{}:{}", p, &iri[ns.len()..]))
            .unwrap_or_else(|| iri.to_string())
    }

    /// True when `prefix` is bound to `namespace` in the common prefix list.
    pub fn is_common(prefix: &str, namespace: &str) -> bool {
        COMMON_PREFIXES
            .iter()
            .any(|(p, ns)| *p == prefix && *ns == namespace)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim();
    prefix.strip_suffix(':').unwrap_or(prefix).to_string()
}

fn is_simple_local_name(local: &str) -> bool {
    !local.is_empty()
        && !local
            .chars()
            .any(|c| matches!(c, '/' | '#' | '?' | ':') || c.is_whitespace())
}
