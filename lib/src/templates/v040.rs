//! 0.4.0 to 0.4.4: one sheet per table, with explicit language columns on the
//! concepts sheet. 0.4.3 introduced the prefix sheet.

use super::layout::*;
use super::TemplateExtractor;
use crate::detect::TemplateVersion;

pub const SCHEME: SchemeLayout<'static> = SchemeLayout {
    sheet: "Concept Scheme",
    iri: at("B", 2),
    title: at("B", 3),
    description: at("B", 4),
    created: at("B", 5),
    modified: at("B", 6),
    creator: at("B", 7),
    publisher: at("B", 8),
    version: Some(at("B", 9)),
    history_note: at("B", 10),
    custodian: Some(at("B", 11)),
    pid: Some(at("B", 12)),
    ..SchemeLayout::BLANK
};

pub const CONCEPTS: ConceptLayout<'static> = ConceptLayout {
    sheet: "Concepts",
    first_row: 3,
    iri: "A",
    pref_label: "B",
    pref_label_lang: Some("C"),
    definition: "D",
    definition_lang: Some("E"),
    alt_labels: Some("F"),
    narrower: Some("G"),
    history_note: Some("H"),
    defined_by: Some("I"),
    ..ConceptLayout::BLANK
};

pub const COLLECTIONS: CollectionLayout<'static> = CollectionLayout {
    sheet: "Collections",
    first_row: 3,
    iri: "A",
    pref_label: "B",
    definition: "C",
    members: "D",
    history_note: Some("E"),
};

pub const MATCHES: MatchLayout = MatchLayout {
    sheet: "Additional Concept Features",
    first_row: 3,
    iri: "A",
    matches: ["B", "C", "D", "E", "F"],
    notation: None,
    notation_datatype: None,
};

pub const PREFIXES: PrefixLayout = PrefixLayout {
    sheet: "Prefix Sheet",
    first_row: 2,
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
        "0.4.x"
    }

    fn version(&self) -> TemplateVersion {
        self.version
    }

    fn layout(&self) -> TemplateLayout<'_> {
        let prefixes = match self.version {
            TemplateVersion::V043 | TemplateVersion::V044 => Some(PREFIXES),
            _ => None,
        };
        TemplateLayout {
            dialect: Dialect::Dcterms,
            scheme: SCHEME,
            concepts: CONCEPTS,
            collections: COLLECTIONS,
            matches: Some(MATCHES),
            prefixes,
        }
    }
}
