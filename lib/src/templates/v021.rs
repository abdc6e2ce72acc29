//! 0.2.1 and 0.3.0: everything on one sheet, scheme fields at the top, concepts
//! and collections side by side underneath.

use super::layout::*;
use super::TemplateExtractor;
use crate::detect::TemplateVersion;

/// Default name of the single data sheet.
pub const SHEET: &str = "vocabulary";

pub const SCHEME: SchemeLayout<'static> = SchemeLayout {
    sheet: SHEET,
    iri: at("B", 2),
    title: at("B", 3),
    description: at("B", 4),
    created: at("B", 5),
    modified: at("B", 6),
    creator: at("B", 7),
    publisher: at("B", 8),
    version: Some(at("B", 9)),
    history_note: at("B", 10),
    ..SchemeLayout::BLANK
};

pub const CONCEPTS_021: ConceptLayout<'static> = ConceptLayout {
    sheet: SHEET,
    first_row: 15,
    iri: "A",
    pref_label: "B",
    alt_labels: Some("C"),
    definition: "D",
    narrower: Some("E"),
    notation: Some("F"),
    defined_by: Some("G"),
    ..ConceptLayout::BLANK
};

pub const CONCEPTS_030: ConceptLayout<'static> = ConceptLayout {
    history_note: Some("H"),
    source: Some("I"),
    ..CONCEPTS_021
};

pub const COLLECTIONS_021: CollectionLayout<'static> = CollectionLayout {
    sheet: SHEET,
    first_row: 15,
    iri: "L",
    pref_label: "M",
    definition: "N",
    members: "O",
    history_note: None,
};

pub const COLLECTIONS_030: CollectionLayout<'static> = CollectionLayout {
    history_note: Some("P"),
    ..COLLECTIONS_021
};

pub struct Extractor {
    version: TemplateVersion,
    sheet: Option<String>,
}

impl Extractor {
    pub fn new(version: TemplateVersion, sheet: Option<&str>) -> Self {
        Self {
            version,
            sheet: sheet.map(str::to_string),
        }
    }
}

impl TemplateExtractor for Extractor {
    fn family(&self) -> &'static str {
        "0.2.x/0.3.x"
    }

    fn version(&self) -> TemplateVersion {
        self.version
    }

    fn layout(&self) -> TemplateLayout<'_> {
        let (mut concepts, mut collections) = match self.version {
            TemplateVersion::V021 => (CONCEPTS_021, COLLECTIONS_021),
            _ => (CONCEPTS_030, COLLECTIONS_030),
        };
        let mut scheme = SCHEME;
        if let Some(name) = self.sheet.as_deref() {
            scheme.sheet = name;
            concepts.sheet = name;
            collections.sheet = name;
        }
        TemplateLayout {
            dialect: Dialect::Dcterms,
            scheme,
            concepts,
            collections,
            matches: None,
            prefixes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_sheet_name() {
        let extractor = Extractor::new(TemplateVersion::V030, Some("my vocab"));
        let layout = extractor.layout();
        assert_eq!(layout.scheme.sheet, "my vocab");
        assert_eq!(layout.concepts.sheet, "my vocab");
        assert_eq!(layout.collections.history_note, Some("P"));

        // each extractor keeps its own name
        let other = Extractor::new(TemplateVersion::V030, Some("rocks"));
        assert_eq!(other.layout().scheme.sheet, "rocks");
        assert_eq!(extractor.layout().collections.sheet, "my vocab");

        let extractor = Extractor::new(TemplateVersion::V021, None);
        let layout = extractor.layout();
        assert_eq!(layout.concepts.sheet, SHEET);
        assert_eq!(layout.concepts.history_note, None);
    }
}
