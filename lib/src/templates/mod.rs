//! Template families. Each family knows the sheet layout of the template versions
//! it covers and turns a workbook of one of those versions into graph fragments.

pub mod common;
pub mod layout;
pub mod v021;
pub mod v040;
pub mod v060;
pub mod v070;
pub mod v080;

use crate::detect::TemplateVersion;
use crate::graph::VocabGraph;
use crate::prefixes::PrefixMap;
use crate::workbook::Workbook;
use anyhow::Result;
use layout::TemplateLayout;
use oxigraph::model::NamedNode;

pub trait TemplateExtractor {
    /// Name of the family, e.g. "0.4.x".
    fn family(&self) -> &'static str;

    fn version(&self) -> TemplateVersion;

    /// Where every field of `version()` lives.
    fn layout(&self) -> TemplateLayout<'_>;

    /// The validation profile graphs from this family conform to.
    fn default_profile(&self) -> &'static str {
        self.layout().dialect.profile()
    }

    fn extract_prefixes(&self, workbook: &Workbook) -> Result<PrefixMap> {
        common::extract_prefixes(workbook, &self.layout())
    }

    fn extract_concept_scheme(
        &self,
        workbook: &Workbook,
        prefixes: &PrefixMap,
    ) -> Result<(VocabGraph, NamedNode)> {
        common::extract_concept_scheme(workbook, &self.layout(), prefixes)
    }

    fn extract_concepts(
        &self,
        workbook: &Workbook,
        prefixes: &PrefixMap,
        scheme: &NamedNode,
    ) -> Result<VocabGraph> {
        common::extract_concepts(workbook, &self.layout(), prefixes, scheme)
    }

    fn extract_collections(
        &self,
        workbook: &Workbook,
        prefixes: &PrefixMap,
        scheme: &NamedNode,
    ) -> Result<VocabGraph> {
        common::extract_collections(workbook, &self.layout(), prefixes, scheme)
    }

    fn extract_additional_properties(
        &self,
        workbook: &Workbook,
        prefixes: &PrefixMap,
    ) -> Result<VocabGraph> {
        common::extract_additional_properties(workbook, &self.layout(), prefixes)
    }

    /// An empty workbook of this version, ready to be filled in.
    fn blank_template(&self) -> Workbook {
        common::blank_template(self.version(), &self.layout())
    }
}

/// The extractor for `version`. `sheet_name` renames the single data sheet of the
/// 0.2.1 and 0.3.0 templates and is ignored by the others.
pub fn extractor_for_version(
    version: TemplateVersion,
    sheet_name: Option<&str>,
) -> Box<dyn TemplateExtractor> {
    use TemplateVersion::*;
    match version {
        V021 | V030 => Box::new(v021::Extractor::new(version, sheet_name)),
        V040 | V041 | V042 | V043 | V044 => Box::new(v040::Extractor::new(version)),
        V050 | V060 | V061 | V062 | V063 => Box::new(v060::Extractor::new(version)),
        V070 | V071 => Box::new(v070::Extractor::new(version)),
        V080 | V080GA => Box::new(v080::Extractor::new(version)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_version_has_an_extractor() {
        for version in TemplateVersion::ALL {
            let extractor = extractor_for_version(version, None);
            assert_eq!(extractor.version(), version);
            let blank = extractor.blank_template();
            assert_eq!(
                crate::detect::get_template_version(&blank).unwrap(),
                version
            );
            assert!(blank.has_sheet(extractor.layout().concepts.sheet));
        }
    }

    #[test]
    fn test_default_profiles() {
        assert_eq!(
            extractor_for_version(TemplateVersion::V043, None).default_profile(),
            "vocpub-49"
        );
        assert_eq!(
            extractor_for_version(TemplateVersion::V080, None).default_profile(),
            "vocpub-51"
        );
    }
}
