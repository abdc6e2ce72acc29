//! 0.7.0 and 0.7.1: schema.org metadata, provenance fields on the scheme and a
//! typed notation column. 0.7.1 added concept status.

use super::layout::*;
use super::TemplateExtractor;
use crate::detect::TemplateVersion;

pub const SCHEME: SchemeLayout<'static> = SchemeLayout {
    sheet: "Concept Scheme",
    iri: at("B", 3),
    title: at("B", 4),
    description: at("B", 5),
    created: at("B", 6),
    modified: at("B", 7),
    creator: at("B", 8),
    publisher: at("B", 9),
    custodian: Some(at("B", 10)),
    version: Some(at("B", 11)),
    history_note: at("B", 12),
    citation: Some(at("B", 13)),
    derived_from: Some(at("B", 14)),
    derivation_mode: Some(at("B", 15)),
    themes: Some(at("B", 16)),
    ..SchemeLayout::BLANK
};

pub const CONCEPTS_070: ConceptLayout<'static> = ConceptLayout {
    sheet: "Concepts",
    first_row: 4,
    iri: "A",
    pref_label: "B",
    definition: "C",
    alt_labels: Some("D"),
    narrower: Some("E"),
    history_note: Some("F"),
    citation: Some("G"),
    defined_by: Some("H"),
    ..ConceptLayout::BLANK
};

pub const CONCEPTS_071: ConceptLayout<'static> = ConceptLayout {
    status: Some("I"),
    ..CONCEPTS_070
};

pub const COLLECTIONS: CollectionLayout<'static> = CollectionLayout {
    sheet: "Collections",
    first_row: 4,
    iri: "A",
    pref_label: "B",
    definition: "C",
    members: "D",
    history_note: Some("E"),
};

pub const MATCHES: MatchLayout = MatchLayout {
    sheet: "Additional Concept Properties",
    first_row: 4,
    iri: "A",
    matches: ["B", "C", "D", "E", "F"],
    notation: Some("G"),
    notation_datatype: Some("H"),
};

pub const PREFIXES: PrefixLayout = PrefixLayout {
    sheet: "Prefixes",
    first_row: 4,
    prefix: "A",
    namespace: "B",
};

pub struct Extractor {
    version: TemplateVersion,
}

impl Extractor {
    pub fn new(version: TemplateVersion) -> Self {
        Self { version }
    }
}

impl TemplateExtractor for Extractor {
    fn family(&self) -> &'static str {
        "0.7.x"
    }

    fn version(&self) -> TemplateVersion {
        self.version
    }

    fn layout(&self) -> TemplateLayout<'_> {
        let concepts = match self.version {
            TemplateVersion::V070 => CONCEPTS_070,
            _ => CONCEPTS_071,
        };
        TemplateLayout {
            dialect: Dialect::SchemaOrg,
            scheme: SCHEME,
            concepts,
            collections: COLLECTIONS,
            matches: Some(MATCHES),
            prefixes: Some(PREFIXES),
        }
    }
}
