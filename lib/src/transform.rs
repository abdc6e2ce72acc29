//! Provides the structural completion passes run over an assembled vocabulary graph:
//! mirroring the concept hierarchy and deriving the scheme's top concepts.
//! Both passes only add triples and are idempotent.

use crate::consts::skos;
use oxigraph::model::vocab::rdf;
use oxigraph::model::{Graph, NamedNodeRef, NamedOrBlankNode, Term, TermRef, Triple};

/// Makes `skos:narrower` and `skos:broader` mirror each other: every
/// `(a narrower b)` gains `(b broader a)` and every `(b broader a)` gains
/// `(a narrower b)`. Returns the number of triples added.
pub fn complete_hierarchy(graph: &mut Graph) -> usize {
    let mut to_add: Vec<Triple> = vec![];
    for (forward, backward) in [(skos::NARROWER, skos::BROADER), (skos::BROADER, skos::NARROWER)] {
        for triple in graph.triples_for_predicate(forward) {
            let inverse_subject = match triple.object {
                TermRef::NamedNode(n) => NamedOrBlankNode::from(n.into_owned()),
                TermRef::BlankNode(b) => NamedOrBlankNode::from(b.into_owned()),
                _ => continue,
            };
            let inverse_object: Term = triple.subject.into_owned().into();
            to_add.push(Triple::new(inverse_subject, backward, inverse_object));
        }
    }
    to_add
        .into_iter()
        .filter(|triple| graph.insert(triple))
        .count()
}

/// Marks every concept of `scheme` that has no `skos:broader` edge as a top
/// concept, in both directions (`hasTopConcept` and `topConceptOf`). Returns the
/// number of top concepts found.
pub fn add_top_concepts(graph: &mut Graph, scheme: NamedNodeRef) -> usize {
    let top: Vec<NamedOrBlankNode> = graph
        .subjects_for_predicate_object(rdf::TYPE, skos::CONCEPT)
        .filter(|concept| {
            graph
                .object_for_subject_predicate(*concept, skos::BROADER)
                .is_none()
        })
        .map(|concept| concept.into_owned())
        .collect();
    for concept in &top {
        graph.insert(&Triple::new(
            scheme.into_owned(),
            skos::HAS_TOP_CONCEPT,
            Term::from(concept.clone()),
        ));
        graph.insert(&Triple::new(concept.clone(), skos::TOP_CONCEPT_OF, scheme.into_owned()));
    }
    top.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{NamedNode, TripleRef};

    fn node(local: &str) -> NamedNode {
        NamedNode::new(format!("https://example.org/voc/{local}")).unwrap()
    }

    fn concept(graph: &mut Graph, n: &NamedNode) {
        graph.insert(TripleRef::new(n, rdf::TYPE, skos::CONCEPT));
    }

    #[test]
    fn test_complete_hierarchy_both_directions() {
        let (a, b, c) = (node("a"), node("b"), node("c"));
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(&a, skos::NARROWER, &b));
        graph.insert(TripleRef::new(&c, skos::BROADER, &a));

        assert_eq!(complete_hierarchy(&mut graph), 2);
        assert!(graph.contains(TripleRef::new(&b, skos::BROADER, &a)));
        assert!(graph.contains(TripleRef::new(&a, skos::NARROWER, &c)));

        // running again adds nothing
        let before = graph.len();
        assert_eq!(complete_hierarchy(&mut graph), 0);
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn test_top_concepts_only_without_broader() {
        let scheme = node("");
        let (a, b) = (node("a"), node("b"));
        let mut graph = Graph::new();
        concept(&mut graph, &a);
        concept(&mut graph, &b);
        graph.insert(TripleRef::new(&b, skos::BROADER, &a));

        assert_eq!(add_top_concepts(&mut graph, scheme.as_ref()), 1);
        assert!(graph.contains(TripleRef::new(&scheme, skos::HAS_TOP_CONCEPT, &a)));
        assert!(graph.contains(TripleRef::new(&a, skos::TOP_CONCEPT_OF, &scheme)));
        assert!(!graph.contains(TripleRef::new(&scheme, skos::HAS_TOP_CONCEPT, &b)));

        let before = graph.len();
        add_top_concepts(&mut graph, scheme.as_ref());
        assert_eq!(graph.len(), before);
    }
}
