//! Defines constant NamedNodeRefs for the RDF terms used when building and reading
//! vocabularies, grouped by namespace (SKOS, schema.org, DCTERMS, OWL, PROV, RDFS,
//! SHACL), plus the fixed lookup tables shared by the template families.

use lazy_static::lazy_static;
use std::collections::BTreeMap;

pub mod skos {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

    pub const CONCEPT_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#ConceptScheme");
    pub const CONCEPT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#Concept");
    pub const COLLECTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#Collection");
    pub const PREF_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#prefLabel");
    pub const ALT_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#altLabel");
    pub const DEFINITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#definition");
    pub const HISTORY_NOTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#historyNote");
    pub const EXAMPLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#example");
    pub const NOTATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#notation");
    pub const IN_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#inScheme");
    pub const HAS_TOP_CONCEPT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#hasTopConcept");
    pub const TOP_CONCEPT_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#topConceptOf");
    pub const BROADER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#broader");
    pub const NARROWER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#narrower");
    pub const MEMBER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#member");
    pub const RELATED_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#relatedMatch");
    pub const CLOSE_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#closeMatch");
    pub const EXACT_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#exactMatch");
    pub const NARROW_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#narrowMatch");
    pub const BROAD_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#broadMatch");

    /// The external match predicates in the column order used by the match sheets.
    pub const MATCHES: [NamedNodeRef<'_>; 5] = [
        RELATED_MATCH,
        CLOSE_MATCH,
        EXACT_MATCH,
        NARROW_MATCH,
        BROAD_MATCH,
    ];
}

pub mod sdo {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "https://schema.org/";

    pub const DATE_CREATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/dateCreated");
    pub const DATE_MODIFIED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/dateModified");
    pub const CREATOR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://schema.org/creator");
    pub const PUBLISHER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/publisher");
    pub const VERSION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://schema.org/version");
    pub const CITATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/citation");
    pub const KEYWORDS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/keywords");
    pub const STATUS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/status");
    pub const IDENTIFIER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/identifier");
    pub const IMAGE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://schema.org/image");
    pub const NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://schema.org/name");
    pub const ORGANIZATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/Organization");
}

pub mod dcterms {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";

    pub const CREATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
    pub const MODIFIED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/modified");
    pub const CREATOR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/creator");
    pub const PUBLISHER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/publisher");
    pub const IDENTIFIER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/identifier");
    pub const SOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/source");
}

pub mod owl {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    pub const VERSION_INFO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
    pub const VERSION_IRI: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionIRI");
}

pub mod prov {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/ns/prov#";

    pub const QUALIFIED_ATTRIBUTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#qualifiedAttribution");
    pub const QUALIFIED_DERIVATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#qualifiedDerivation");
    pub const AGENT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#agent");
    pub const ENTITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#entity");
    pub const HAD_ROLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#hadRole");
}

pub mod rdfs {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    pub const IS_DEFINED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#isDefinedBy");
    pub const SUB_CLASS_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");
}

pub mod dataroles {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "https://linked.data.gov.au/def/data-roles/";

    pub const CUSTODIAN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://linked.data.gov.au/def/data-roles/custodian");
}

pub mod sh {
    use oxigraph::model::NamedNodeRef;

    macro_rules! shacl_terms {
        ($($name:ident => $local:literal),* $(,)?) => {
            $(
                pub const $name: NamedNodeRef<'_> =
                    NamedNodeRef::new_unchecked(concat!("http://www.w3.org/ns/shacl#", $local));
            )*
        };
    }

    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#";

    shacl_terms! {
        NODE_SHAPE => "NodeShape",
        PROPERTY_SHAPE => "PropertyShape",
        TARGET_CLASS => "targetClass",
        TARGET_OBJECTS_OF => "targetObjectsOf",
        PATH => "path",
        ALTERNATIVE_PATH => "alternativePath",
        PROPERTY => "property",
        CLASS => "class",
        DATATYPE => "datatype",
        NODE_KIND => "nodeKind",
        MIN_COUNT => "minCount",
        MAX_COUNT => "maxCount",
        UNIQUE_LANG => "uniqueLang",
        OR => "or",
        NOT => "not",
        SEVERITY => "severity",
        MESSAGE => "message",
        VIOLATION => "Violation",
        WARNING => "Warning",
        INFO => "Info",
        IRI => "IRI",
        BLANK_NODE => "BlankNode",
        LITERAL => "Literal",
        BLANK_NODE_OR_IRI => "BlankNodeOrIRI",
        BLANK_NODE_OR_LITERAL => "BlankNodeOrLiteral",
        IRI_OR_LITERAL => "IRIOrLiteral",
    }
}

/// Namespace of the registry status vocabulary.
pub const REG_STATUSES: &str = "https://linked.data.gov.au/def/reg-statuses/";
/// Namespace of the vocabulary derivation mode vocabulary.
pub const VOCDERMODS: &str = "https://linked.data.gov.au/def/vocdermods/";
/// Every GA catalogue identifier starts with this.
pub const GA_CATALOGUE_PREFIX: &str = "https://pid.geoscience.gov.au/";

/// Rows carrying these concept IRIs are the worked examples shipped in the blank templates.
pub const EXAMPLE_CONCEPT_IRIS: [&str; 3] = [
    "http://example.com/earth-science",
    "http://example.com/atmospheric-science",
    "http://example.com/geology",
];

/// Prefixes every conversion knows about, with the namespace each one stands for.
pub const COMMON_PREFIXES: [(&str, &str); 30] = [
    ("ex", "http://example.com/"),
    ("brick", "https://brickschema.org/schema/Brick#"),
    ("csvw", "http://www.w3.org/ns/csvw#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcat", "http://www.w3.org/ns/dcat#"),
    ("dcmitype", "http://purl.org/dc/dcmitype/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("dcam", "http://purl.org/dc/dcam/"),
    ("doap", "http://usefulinc.com/ns/doap#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("geo", "http://www.opengis.net/ont/geosparql#"),
    ("odrl", "http://www.w3.org/ns/odrl/2/"),
    ("org", "http://www.w3.org/ns/org#"),
    ("prof", "http://www.w3.org/ns/dx/prof/"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("qb", "http://purl.org/linked-data/cube#"),
    ("schema", "https://schema.org/"),
    ("sh", "http://www.w3.org/ns/shacl#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("sosa", "http://www.w3.org/ns/sosa/"),
    ("ssn", "http://www.w3.org/ns/ssn/"),
    ("time", "http://www.w3.org/2006/time#"),
    ("vann", "http://purl.org/vocab/vann/"),
    ("void", "http://rdfs.org/ns/void#"),
    ("wgs", "https://www.w3.org/2003/01/geo/wgs84_pos#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
];

lazy_static! {
    /// Status labels accepted in the sheets, mapped to their registry IRIs.
    pub static ref STATUSES: BTreeMap<&'static str, String> = [
        ("Accepted", "accepted"),
        ("Addition", "addition"),
        ("Experimental", "experimental"),
        ("Invalid", "invalid"),
        ("Not Accepted", "notAccepted"),
        ("Original", "original"),
        ("Retired", "retired"),
        ("Stable", "stable"),
        ("Submitted", "submitted"),
        ("Superseded", "superseded"),
        ("Valid", "valid"),
    ]
    .into_iter()
    .map(|(label, local)| (label, format!("{REG_STATUSES}{local}")))
    .collect();

    /// Derivation mode labels accepted in the sheets, mapped to their IRIs.
    pub static ref DERIVATION_MODES: BTreeMap<&'static str, String> = [
        ("Direct", "direct"),
        ("Extension", "extension"),
        ("None", "none"),
        ("Partial Direct", "partial-direct"),
        ("Partial Extension", "partial-extension"),
        ("Relabelling", "relabelling"),
        ("Subsetting", "subsetting"),
        ("Translation", "translation"),
    ]
    .into_iter()
    .map(|(label, local)| (label, format!("{VOCDERMODS}{local}")))
    .collect();
}

/// Finds the sheet label that maps to `iri` in one of the tables above.
pub fn label_for_iri(table: &BTreeMap<&'static str, String>, iri: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, value)| value.as_str() == iri)
        .map(|(label, _)| *label)
}

/// Comma separated list of a table's labels, used in error messages.
pub fn table_labels(table: &BTreeMap<&'static str, String>) -> String {
    table.keys().copied().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(
            STATUSES.get("Experimental").map(String::as_str),
            Some("https://linked.data.gov.au/def/reg-statuses/experimental")
        );
        assert_eq!(
            label_for_iri(&STATUSES, "https://linked.data.gov.au/def/reg-statuses/notAccepted"),
            Some("Not Accepted")
        );
        assert_eq!(label_for_iri(&STATUSES, "https://example.com/nope"), None);
    }

    #[test]
    fn test_table_labels() {
        let labels = table_labels(&DERIVATION_MODES);
        assert!(labels.starts_with("Direct, Extension"));
    }
}
