//! 0.5.0 to 0.6.3. Labels carry their language as an "@lang" suffix and concepts
//! gain a source vocabulary column. 0.6.2 moved the prefixes to their own
//! "Prefixes" sheet and added notations to the matches sheet.

use super::layout::*;
use super::{v040, TemplateExtractor};
use crate::detect::TemplateVersion;

pub const CONCEPTS: ConceptLayout<'static> = ConceptLayout {
    sheet: "Concepts",
    first_row: 3,
    iri: "A",
    pref_label: "B",
    definition: "C",
    alt_labels: Some("D"),
    narrower: Some("E"),
    history_note: Some("F"),
    source: Some("G"),
    defined_by: Some("H"),
    ..ConceptLayout::BLANK
};

pub const MATCHES_062: MatchLayout = MatchLayout {
    notation: Some("G"),
    ..v040::MATCHES
};

pub const PREFIXES_062: PrefixLayout = PrefixLayout {
    sheet: "Prefixes",
    first_row: 3,
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
        "0.5.x/0.6.x"
    }

    fn version(&self) -> TemplateVersion {
        self.version
    }

    fn layout(&self) -> TemplateLayout<'_> {
        let (matches, prefixes) = match self.version {
            TemplateVersion::V062 | TemplateVersion::V063 => (MATCHES_062, PREFIXES_062),
            _ => (v040::MATCHES, v040::PREFIXES),
        };
        TemplateLayout {
            dialect: Dialect::Dcterms,
            scheme: v040::SCHEME,
            concepts: CONCEPTS,
            collections: v040::COLLECTIONS,
            matches: Some(matches),
            prefixes: Some(prefixes),
        }
    }
}
