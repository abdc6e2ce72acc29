//! Joins the fragments read from each sheet into the vocabulary graph.

use crate::consts::{dataroles, dcterms, owl, prov, rdfs, sdo, skos};
use crate::graph::VocabGraph;
use crate::prefixes::PrefixMap;
use crate::templates::TemplateExtractor;
use crate::transform;
use crate::workbook::Workbook;
use anyhow::Result;
use log::{debug, info};
use oxigraph::model::NamedNode;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Union of `fragments`, with the hierarchy mirrored, top concepts derived and
/// the sheet prefixes plus the vocabulary's own namespaces bound.
pub fn assemble(
    prefixes: &PrefixMap,
    scheme: &NamedNode,
    fragments: impl IntoIterator<Item = VocabGraph>,
) -> VocabGraph {
    let mut graph = VocabGraph::new();
    for fragment in fragments {
        graph.merge(fragment);
    }
    let added = transform::complete_hierarchy(graph.graph_mut());
    debug!("Hierarchy completion added {added} triples");
    let top = transform::add_top_concepts(graph.graph_mut(), scheme.as_ref());
    debug!("Found {top} top concepts");

    graph.bind_all(prefixes);
    graph.bind("cs", scheme.as_str());
    if prefixes.get("").is_none() {
        graph.bind("", &format!("{}/", scheme.as_str()));
    }
    for (prefix, namespace) in [
        ("skos", skos::NAMESPACE),
        ("schema", sdo::NAMESPACE),
        ("dcterms", dcterms::NAMESPACE),
        ("owl", owl::NAMESPACE),
        ("prov", prov::NAMESPACE),
        ("rdfs", rdfs::NAMESPACE),
        ("xsd", XSD),
        ("dataroles", dataroles::NAMESPACE),
    ] {
        graph.bind(prefix, namespace);
    }
    graph
}

/// Runs every extraction step of `extractor` over `workbook` and assembles the
/// result.
pub fn extract_vocabulary(
    extractor: &dyn TemplateExtractor,
    workbook: &Workbook,
) -> Result<VocabGraph> {
    let prefixes = extractor.extract_prefixes(workbook)?;
    let (scheme_graph, scheme) = extractor.extract_concept_scheme(workbook, &prefixes)?;
    let concepts = extractor.extract_concepts(workbook, &prefixes, &scheme)?;
    let collections = extractor.extract_collections(workbook, &prefixes, &scheme)?;
    let additional = extractor.extract_additional_properties(workbook, &prefixes)?;
    let graph = assemble(
        &prefixes,
        &scheme,
        [scheme_graph, concepts, collections, additional],
    );
    info!(
        "Assembled vocabulary {} from template {} with {} triples",
        scheme,
        extractor.version(),
        graph.len()
    );
    Ok(graph)
}
