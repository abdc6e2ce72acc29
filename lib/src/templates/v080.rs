//! 0.8.0 and its Geoscience Australia variant. Adds scheme status, concept
//! examples and images. The GA variant requires a catalogue identifier.
//!
//! These layouts are also the ones graphs are written back into.

use super::layout::*;
use super::{v070, TemplateExtractor};
use crate::detect::TemplateVersion;

pub const SCHEME: SchemeLayout<'static> = SchemeLayout {
    status: Some(at("B", 17)),
    ..v070::SCHEME
};

pub const SCHEME_GA: SchemeLayout<'static> = SchemeLayout {
    catalogue_pid: Some(at("B", 18)),
    ..SCHEME
};

pub const CONCEPTS: ConceptLayout<'static> = ConceptLayout {
    status: Some("I"),
    example: Some("J"),
    image_url: Some("K"),
    image_embedded: Some("L"),
    ..v070::CONCEPTS_070
};

pub const COLLECTIONS: CollectionLayout<'static> = v070::COLLECTIONS;
pub const MATCHES: MatchLayout = v070::MATCHES;
pub const PREFIXES: PrefixLayout = v070::PREFIXES;

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
        "0.8.x"
    }

    fn version(&self) -> TemplateVersion {
        self.version
    }

    fn layout(&self) -> TemplateLayout<'_> {
        let scheme = match self.version {
            TemplateVersion::V080GA => SCHEME_GA,
            _ => SCHEME,
        };
        TemplateLayout {
            dialect: Dialect::SchemaOrg,
            scheme,
            concepts: CONCEPTS,
            collections: COLLECTIONS,
            matches: Some(MATCHES),
            prefixes: Some(PREFIXES),
        }
    }
}
