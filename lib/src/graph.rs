//! The graph a conversion builds or reads: an oxigraph [`Graph`] plus the namespace
//! prefixes bound to it.

use crate::consts::skos;
use crate::prefixes::PrefixMap;
use crate::usage_error;
use crate::util::{rdf_file_endings, RdfSyntax};
use anyhow::Result;
use log::{debug, info};
use oxigraph::io::{RdfParser, RdfSerializer};
use oxigraph::model::vocab::rdf;
use oxigraph::model::{Graph, NamedNode, NamedOrBlankNodeRef, TermRef, Triple, TripleRef};
use std::collections::BTreeMap;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct VocabGraph {
    graph: Graph,
    namespaces: BTreeMap<String, String>,
}

impl VocabGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            namespaces: BTreeMap::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.insert(triple)
    }

    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.contains(triple)
    }

    /// Binds `prefix` to `namespace`, replacing an earlier binding of the prefix.
    pub fn bind(&mut self, prefix: &str, namespace: &str) {
        self.namespaces
            .insert(prefix.to_string(), namespace.to_string());
    }

    pub fn bind_all(&mut self, prefixes: &PrefixMap) {
        for (prefix, namespace) in prefixes.iter() {
            self.bind(prefix, namespace);
        }
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// The bound namespaces as a [`PrefixMap`], skipping any that are not valid IRIs.
    pub fn prefix_map(&self) -> PrefixMap {
        let mut prefixes = PrefixMap::new();
        for (prefix, namespace) in self.namespaces() {
            if prefixes.insert(prefix, namespace).is_err() {
                debug!("Ignoring unusable namespace binding {prefix}: {namespace}");
            }
        }
        prefixes
    }

    /// Set union with `other`. Bindings from `other` win when a prefix is bound
    /// in both.
    pub fn merge(&mut self, other: VocabGraph) {
        for triple in other.graph.iter() {
            self.graph.insert(triple);
        }
        self.namespaces.extend(other.namespaces);
    }

    /// The first subject typed `skos:ConceptScheme`, in IRI order.
    pub fn concept_scheme(&self) -> Option<NamedNode> {
        let mut schemes: Vec<NamedNode> = self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, skos::CONCEPT_SCHEME)
            .filter_map(|s| match s {
                NamedOrBlankNodeRef::NamedNode(n) => Some(n.into_owned()),
                _ => None,
            })
            .collect();
        schemes.sort();
        schemes.into_iter().next()
    }

    /// Parses a graph file, picking the syntax from its file ending. Prefixes
    /// declared in the file are bound on the result.
    pub fn parse_file(path: &Path) -> Result<Self> {
        let syntax = RdfSyntax::from_path(path).ok_or_else(|| {
            usage_error!(
                "Files for conversion to Excel must end with one of the RDF file formats: {}",
                rdf_file_endings()
            )
        })?;
        debug!("Reading {} as {}", path.display(), syntax);
        let file = std::fs::File::open(path)?;
        Self::parse_reader(BufReader::new(file), syntax)
    }

    pub fn parse_bytes(bytes: &[u8], syntax: RdfSyntax) -> Result<Self> {
        Self::parse_reader(bytes, syntax)
    }

    fn parse_reader<R: Read>(reader: R, syntax: RdfSyntax) -> Result<Self> {
        let mut graph = Graph::new();
        let mut parser = RdfParser::from_format(syntax.rdf_format()).for_reader(reader);
        for quad in parser.by_ref() {
            let quad = quad?;
            graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
        }
        let mut vocab = VocabGraph::from_graph(graph);
        for (prefix, namespace) in parser.prefixes() {
            vocab.bind(prefix, namespace);
        }
        Ok(vocab)
    }

    /// Namespaces with at least one IRI in the graph inside them.
    fn used_namespaces(&self) -> Vec<(&str, &str)> {
        self.namespaces()
            .filter(|(_, ns)| !ns.is_empty() && self.uses_namespace(ns))
            .collect()
    }

    fn uses_namespace(&self, ns: &str) -> bool {
        self.graph.iter().any(|t| {
            let subject = match t.subject {
                NamedOrBlankNodeRef::NamedNode(n) => n.as_str().starts_with(ns),
                _ => false,
            };
            let object = match t.object {
                TermRef::NamedNode(n) => n.as_str().starts_with(ns),
                TermRef::Literal(l) => l.datatype().as_str().starts_with(ns),
                _ => false,
            };
            subject || object || t.predicate.as_str().starts_with(ns)
        })
    }

    pub fn serialize(&self, syntax: RdfSyntax) -> Result<Vec<u8>> {
        let mut serializer = RdfSerializer::from_format(syntax.rdf_format());
        for (prefix, namespace) in self.used_namespaces() {
            serializer = serializer.with_prefix(prefix, namespace)?;
        }
        let mut writer = serializer.for_writer(Vec::new());
        if syntax.is_sorted() {
            let mut triples: Vec<TripleRef> = self.graph.iter().collect();
            triples.sort_by_cached_key(|t| {
                (
                    t.subject.to_string(),
                    t.predicate.to_string(),
                    t.object.to_string(),
                )
            });
            for triple in triples {
                writer.serialize_triple(triple)?;
            }
        } else {
            for triple in self.graph.iter() {
                writer.serialize_triple(triple)?;
            }
        }
        Ok(writer.finish()?)
    }

    pub fn serialize_to_string(&self, syntax: RdfSyntax) -> Result<String> {
        Ok(String::from_utf8(self.serialize(syntax)?)?)
    }

    pub fn write_to_file(&self, path: &Path, syntax: RdfSyntax) -> Result<()> {
        info!(
            "Writing graph to file: {} with length {}",
            path.display(),
            self.len()
        );
        std::fs::write(path, self.serialize(syntax)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{Literal, NamedNodeRef};

    const TTL: &str = r#"
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix voc: <https://example.org/voc/> .
@prefix unused: <https://unused.example.org/> .

<https://example.org/voc> a skos:ConceptScheme ;
    skos:prefLabel "Voc"@en .
voc:a a skos:Concept ;
    skos:prefLabel "A"@en .
"#;

    #[test]
    fn test_parse_keeps_prefixes() {
        let vocab = VocabGraph::parse_bytes(TTL.as_bytes(), RdfSyntax::Turtle).unwrap();
        assert_eq!(vocab.len(), 4);
        let bound: Vec<_> = vocab.namespaces().map(|(p, _)| p.to_string()).collect();
        assert!(bound.contains(&"voc".to_string()));
        assert_eq!(
            vocab.concept_scheme().unwrap().as_str(),
            "https://example.org/voc"
        );
    }

    #[test]
    fn test_serialize_only_used_prefixes() {
        let vocab = VocabGraph::parse_bytes(TTL.as_bytes(), RdfSyntax::Turtle).unwrap();
        let text = vocab.serialize_to_string(RdfSyntax::LongTurtle).unwrap();
        assert!(text.contains("@prefix voc:"));
        assert!(!text.contains("unused"));
        let again = VocabGraph::parse_bytes(text.as_bytes(), RdfSyntax::Turtle).unwrap();
        assert_eq!(again.len(), vocab.len());
    }

    #[test]
    fn test_merge_is_union() {
        let a = NamedNodeRef::new("https://example.org/a").unwrap();
        let mut left = VocabGraph::new();
        left.insert(TripleRef::new(a, skos::PREF_LABEL, &Literal::new_simple_literal("A")));
        let mut right = VocabGraph::new();
        right.insert(TripleRef::new(a, skos::PREF_LABEL, &Literal::new_simple_literal("A")));
        right.insert(TripleRef::new(a, rdf::TYPE, skos::CONCEPT));
        right.bind("ex", "https://example.org/");
        left.merge(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.namespaces().count(), 1);
    }

    #[test]
    fn test_parse_file_rejects_unknown_ending() {
        let err = VocabGraph::parse_file(Path::new("voc.csv")).unwrap_err();
        assert!(err.to_string().contains(".ttl"));
    }
}
