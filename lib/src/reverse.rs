//! Writes a vocabulary graph back into a 0.8.0 or 0.8.0.GA workbook.

use crate::consts::{
    dataroles, dcterms, label_for_iri, owl, prov, rdfs, sdo, skos, DERIVATION_MODES, STATUSES,
};
use crate::conversion_error;
use crate::detect::TemplateVersion;
use crate::graph::VocabGraph;
use crate::prefixes::PrefixMap;
use crate::shacl::shapes::as_subject;
use crate::templates::common::DEFAULT_LANGUAGE;
use crate::templates::extractor_for_version;
use crate::templates::layout::{
    CellRef, CollectionLayout, ConceptLayout, MatchLayout, PrefixLayout, TemplateLayout,
};
use crate::usage_error;
use crate::util::{is_rdf_file, rdf_file_endings};
use crate::workbook::{CellStyle, Sheet, Workbook};
use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info, warn};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{
    Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef, TripleRef,
};
use std::path::Path;

/// Template versions graphs can be written into.
pub const REVERSE_VERSIONS: [TemplateVersion; 2] = [TemplateVersion::V080, TemplateVersion::V080GA];

/// Separator between list items inside one cell.
const LIST_SEPARATOR: &str = ",\n";

fn check_version(version: TemplateVersion) -> Result<()> {
    if REVERSE_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(usage_error!(
            "This converter can only handle templates with versions 0.8.0 or 0.8.0.GA, not {}",
            version
        ))
    }
}

/// The checks made before anything is read, in order: the input must have an RDF
/// file ending, an output path must end with .xlsx, and the template version
/// must be one graphs can be written into.
pub fn check_request(
    input: &Path,
    output: Option<&Path>,
    version: TemplateVersion,
) -> Result<()> {
    if !is_rdf_file(input) {
        return Err(usage_error!(
            "Files for conversion to Excel must end with one of the RDF file formats: {}",
            rdf_file_endings()
        ));
    }
    if let Some(output) = output {
        if output.extension().and_then(|e| e.to_str()) != Some("xlsx") {
            return Err(usage_error!(
                "If specifying an output path, it must end with .xlsx, not {}",
                output.display()
            ));
        }
    }
    check_version(version)
}

/// Fills a blank `version` workbook from `graph`.
pub fn graph_to_workbook(graph: &VocabGraph, version: TemplateVersion) -> Result<Workbook> {
    check_version(version)?;
    let extractor = extractor_for_version(version, None);
    let layout = extractor.layout();
    let mut workbook = extractor.blank_template();
    let scheme = graph.concept_scheme().ok_or_else(|| {
        conversion_error!("The graph holds no skos:ConceptScheme to write to the workbook")
    })?;
    let reader = GraphReader {
        graph: graph.graph(),
        prefixes: graph.prefix_map(),
    };

    reader.write_scheme(workbook.sheet_mut(layout.scheme.sheet)?, &layout, &scheme);
    let concepts = reader.instances(skos::CONCEPT);
    reader.write_concepts(
        workbook.sheet_mut(layout.concepts.sheet)?,
        &layout.concepts,
        &scheme,
        &concepts,
    );
    if let Some(matches) = &layout.matches {
        reader.write_matches(workbook.sheet_mut(matches.sheet)?, matches, &concepts);
    }
    let collections = reader.instances(skos::COLLECTION);
    reader.write_collections(
        workbook.sheet_mut(layout.collections.sheet)?,
        &layout.collections,
        &collections,
    );
    if let Some(prefixes) = &layout.prefixes {
        write_prefixes(workbook.sheet_mut(prefixes.sheet)?, prefixes, graph);
    }
    info!(
        "Wrote {} with {} concepts and {} collections into a {} workbook",
        scheme,
        concepts.len(),
        collections.len(),
        version
    );
    Ok(workbook)
}

/// Literal values and IRIs as plain text.
fn lexical(term: &Term) -> String {
    match term {
        Term::NamedNode(n) => n.as_str().to_string(),
        Term::Literal(l) => l.value().to_string(),
        other => other.to_string(),
    }
}

/// Labels in a language other than the default keep an "@lang" suffix.
fn label_text(term: &Term) -> String {
    match term {
        Term::Literal(l) => match l.language() {
            Some(language) if language != DEFAULT_LANGUAGE => format!("{}@{}", l.value(), language),
            _ => l.value().to_string(),
        },
        other => lexical(other),
    }
}

/// The English label when there is one, otherwise the first.
fn preferred(labels: &[Term]) -> Option<&Term> {
    labels
        .iter()
        .find(|t| matches!(t, Term::Literal(l) if l.language() == Some(DEFAULT_LANGUAGE)))
        .or_else(|| labels.first())
}

fn joined(items: Vec<String>, separator: &str) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(separator))
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

fn put(sheet: &mut Sheet, cell: Option<CellRef>, value: Option<String>, style: CellStyle) {
    if let (Some(cell), Some(value)) = (cell, value) {
        sheet.set_styled(cell.column, cell.row, value, style);
    }
}

fn put_column(
    sheet: &mut Sheet,
    column: Option<&str>,
    row: u32,
    value: Option<String>,
    style: CellStyle,
) {
    if let (Some(column), Some(value)) = (column, value) {
        sheet.set_styled(column, row, value, style);
    }
}

fn write_prefixes(sheet: &mut Sheet, columns: &PrefixLayout, graph: &VocabGraph) {
    let custom = graph
        .namespaces()
        .filter(|(prefix, namespace)| !PrefixMap::is_common(prefix, namespace));
    let mut count = 0;
    for ((prefix, namespace), row) in custom.zip(columns.first_row..) {
        let prefix = if prefix.is_empty() { ":" } else { prefix };
        sheet.set_styled(columns.prefix, row, prefix, CellStyle::Large);
        sheet.set_styled(columns.namespace, row, namespace, CellStyle::Link);
        count += 1;
    }
    debug!("Wrote {count} prefixes to the {} sheet", columns.sheet);
}

struct GraphReader<'a> {
    graph: &'a Graph,
    prefixes: PrefixMap,
}

impl GraphReader<'_> {
    /// Objects in a stable order.
    fn objects(&self, subject: NamedOrBlankNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        let mut objects: Vec<Term> = self
            .graph
            .objects_for_subject_predicate(subject, predicate)
            .map(TermRef::into_owned)
            .collect();
        objects.sort_by_cached_key(|t| t.to_string());
        objects
    }

    /// The value of the first of `predicates` that has one.
    fn first(&self, subject: NamedOrBlankNodeRef<'_>, predicates: &[NamedNodeRef<'_>]) -> Option<Term> {
        predicates
            .iter()
            .find_map(|p| self.objects(subject, *p).into_iter().next())
    }

    fn text(&self, subject: NamedOrBlankNodeRef<'_>, predicates: &[NamedNodeRef<'_>]) -> Option<String> {
        self.first(subject, predicates).map(|t| lexical(&t))
    }

    fn curie(&self, term: &Term) -> String {
        match term {
            Term::NamedNode(n) => self.prefixes.compact(n.as_str()),
            other => lexical(other),
        }
    }

    fn curies(&self, terms: &[Term]) -> Option<String> {
        joined(terms.iter().map(|t| self.curie(t)).collect(), LIST_SEPARATOR)
    }

    /// Named subjects typed `class`, sorted by IRI.
    fn instances(&self, class: NamedNodeRef<'_>) -> Vec<NamedNode> {
        let mut instances: Vec<NamedNode> = self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, class)
            .filter_map(|s| match s {
                NamedOrBlankNodeRef::NamedNode(n) => Some(n.into_owned()),
                _ => None,
            })
            .collect();
        instances.sort();
        instances
    }

    /// Agents are written as their IRI, or by name for blank organisations.
    fn agent(&self, term: &Term) -> Option<String> {
        match term {
            Term::BlankNode(b) => self.text(b.as_ref().into(), &[sdo::NAME]),
            other => Some(lexical(other)),
        }
    }

    fn status_label(&self, status: &Term, owner: &str) -> Option<String> {
        let iri = lexical(status);
        match label_for_iri(&STATUSES, &iri) {
            Some(label) => Some(label.to_string()),
            None => {
                warn!("The status {iri} of {owner} has no label in the status table, leaving it out");
                None
            }
        }
    }

    /// Narrower concepts, including those only recorded as `skos:broader` the
    /// other way.
    fn narrower(&self, concept: &NamedNode) -> Vec<Term> {
        let mut narrower = self.objects(concept.as_ref().into(), skos::NARROWER);
        for child in self
            .graph
            .subjects_for_predicate_object(skos::BROADER, concept.as_ref())
        {
            let child = Term::from(child.into_owned());
            if !narrower.contains(&child) {
                narrower.push(child);
            }
        }
        narrower.sort_by_cached_key(|t| t.to_string());
        narrower
    }

    fn write_scheme(&self, sheet: &mut Sheet, layout: &TemplateLayout, scheme: &NamedNode) {
        let fields = &layout.scheme;
        let s: NamedOrBlankNodeRef = scheme.as_ref().into();

        put(sheet, Some(fields.iri), Some(scheme.as_str().to_string()), CellStyle::Link);
        let labels = self.objects(s, skos::PREF_LABEL);
        put(sheet, Some(fields.title), preferred(&labels).map(lexical), CellStyle::Large);
        let definitions = self.objects(s, skos::DEFINITION);
        put(
            sheet,
            Some(fields.description),
            preferred(&definitions).map(lexical),
            CellStyle::Wrapped,
        );
        for (cell, predicates) in [
            (fields.created, [sdo::DATE_CREATED, dcterms::CREATED]),
            (fields.modified, [sdo::DATE_MODIFIED, dcterms::MODIFIED]),
        ] {
            if let Some(value) = self.text(s, &predicates) {
                match parse_date(&value) {
                    Some(date) => sheet.set(cell.column, cell.row, date),
                    None => sheet.set(cell.column, cell.row, value),
                }
            }
        }
        for (cell, predicates) in [
            (fields.creator, [sdo::CREATOR, dcterms::CREATOR]),
            (fields.publisher, [sdo::PUBLISHER, dcterms::PUBLISHER]),
        ] {
            let agent = self.first(s, &predicates).and_then(|a| self.agent(&a));
            put(sheet, Some(cell), agent, CellStyle::Link);
        }

        let attributions = self.objects(s, prov::QUALIFIED_ATTRIBUTION);
        let custodians: Vec<String> = attributions
            .iter()
            .filter_map(as_subject)
            .filter(|a| {
                self.graph
                    .contains(TripleRef::new(*a, prov::HAD_ROLE, dataroles::CUSTODIAN))
            })
            .filter_map(|a| self.first(a, &[prov::AGENT]))
            .filter_map(|agent| self.agent(&agent))
            .collect();
        put(sheet, fields.custodian, joined(custodians, ", "), CellStyle::Large);
        put(
            sheet,
            fields.version,
            self.text(s, &[sdo::VERSION, owl::VERSION_INFO]),
            CellStyle::Large,
        );
        put(
            sheet,
            Some(fields.history_note),
            self.text(s, &[skos::HISTORY_NOTE]),
            CellStyle::Wrapped,
        );
        let citations: Vec<String> = self.objects(s, sdo::CITATION).iter().map(lexical).collect();
        put(sheet, fields.citation, joined(citations, LIST_SEPARATOR), CellStyle::Large);

        if let Some(derivation) = self.first(s, &[prov::QUALIFIED_DERIVATION]) {
            if let Some(d) = as_subject(&derivation) {
                put(sheet, fields.derived_from, self.text(d, &[prov::ENTITY]), CellStyle::Link);
                let mode = self
                    .text(d, &[prov::HAD_ROLE])
                    .and_then(|role| label_for_iri(&DERIVATION_MODES, &role))
                    .map(str::to_string);
                put(sheet, fields.derivation_mode, mode, CellStyle::Large);
            }
        }
        let themes: Vec<String> = self.objects(s, sdo::KEYWORDS).iter().map(lexical).collect();
        put(sheet, fields.themes, joined(themes, ", "), CellStyle::Large);
        let status = self
            .first(s, &[sdo::STATUS])
            .and_then(|status| self.status_label(&status, scheme.as_str()));
        put(sheet, fields.status, status, CellStyle::Large);
        put(
            sheet,
            fields.catalogue_pid,
            self.text(s, &[sdo::IDENTIFIER, dcterms::IDENTIFIER]),
            CellStyle::Link,
        );
    }

    fn write_concepts(
        &self,
        sheet: &mut Sheet,
        columns: &ConceptLayout,
        scheme: &NamedNode,
        concepts: &[NamedNode],
    ) {
        let scheme_term = Term::from(scheme.clone());
        for (concept, row) in concepts.iter().zip(columns.first_row..) {
            let c: NamedOrBlankNodeRef = concept.as_ref().into();
            sheet.set_styled(
                columns.iri,
                row,
                self.prefixes.compact(concept.as_str()),
                CellStyle::Link,
            );
            let labels = self.objects(c, skos::PREF_LABEL);
            if labels.len() > 1 {
                debug!("{concept} has {} preferred labels, writing one", labels.len());
            }
            put_column(
                sheet,
                Some(columns.pref_label),
                row,
                preferred(&labels).map(label_text),
                CellStyle::Large,
            );
            let definitions = self.objects(c, skos::DEFINITION);
            put_column(
                sheet,
                Some(columns.definition),
                row,
                preferred(&definitions).map(lexical),
                CellStyle::Wrapped,
            );
            let alt_labels: Vec<String> = self
                .objects(c, skos::ALT_LABEL)
                .iter()
                .map(label_text)
                .collect();
            put_column(
                sheet,
                columns.alt_labels,
                row,
                joined(alt_labels, LIST_SEPARATOR),
                CellStyle::Large,
            );
            put_column(
                sheet,
                columns.narrower,
                row,
                self.curies(&self.narrower(concept)),
                CellStyle::Link,
            );
            put_column(
                sheet,
                columns.history_note,
                row,
                self.text(c, &[skos::HISTORY_NOTE]),
                CellStyle::Wrapped,
            );
            let citations: Vec<String> = self.objects(c, sdo::CITATION).iter().map(lexical).collect();
            put_column(
                sheet,
                columns.citation,
                row,
                joined(citations, LIST_SEPARATOR),
                CellStyle::Large,
            );
            let defined_by = self
                .first(c, &[rdfs::IS_DEFINED_BY])
                .filter(|d| *d != scheme_term)
                .map(|d| self.curie(&d));
            put_column(sheet, columns.defined_by, row, defined_by, CellStyle::Link);
            let status = self
                .first(c, &[sdo::STATUS])
                .and_then(|status| self.status_label(&status, concept.as_str()));
            put_column(sheet, columns.status, row, status, CellStyle::Large);
            put_column(
                sheet,
                columns.example,
                row,
                self.text(c, &[skos::EXAMPLE]),
                CellStyle::Wrapped,
            );
            for image in self.objects(c, sdo::IMAGE) {
                let value = lexical(&image);
                if value.starts_with("http") {
                    put_column(sheet, columns.image_url, row, Some(value), CellStyle::Link);
                } else {
                    warn!("The image '{value}' of {concept} cannot be embedded again, leaving it out");
                }
            }
        }
        debug!("Wrote {} concepts to the {} sheet", concepts.len(), columns.sheet);
    }

    /// One row for each concept with an external match or a notation.
    fn write_matches(&self, sheet: &mut Sheet, columns: &MatchLayout, concepts: &[NamedNode]) {
        let mut row = columns.first_row;
        for concept in concepts {
            let c: NamedOrBlankNodeRef = concept.as_ref().into();
            let matches: Vec<Vec<Term>> = skos::MATCHES.iter().map(|p| self.objects(c, *p)).collect();
            let notations = self.objects(c, skos::NOTATION);
            if notations.is_empty() && matches.iter().all(Vec::is_empty) {
                continue;
            }
            sheet.set_styled(
                columns.iri,
                row,
                self.prefixes.compact(concept.as_str()),
                CellStyle::Link,
            );
            for (column, targets) in columns.matches.iter().zip(&matches) {
                put_column(sheet, Some(*column), row, self.curies(targets), CellStyle::Link);
            }
            put_column(
                sheet,
                columns.notation,
                row,
                joined(notations.iter().map(lexical).collect(), LIST_SEPARATOR),
                CellStyle::Large,
            );
            let mut datatypes: Vec<String> = notations
                .iter()
                .map(|n| match n {
                    Term::Literal(l) => l.datatype().as_str().to_string(),
                    _ => xsd::STRING.as_str().to_string(),
                })
                .collect();
            if datatypes.iter().all(|d| d == xsd::STRING.as_str()) {
                datatypes.clear();
            } else if datatypes.iter().all(|d| *d == datatypes[0]) {
                datatypes.truncate(1);
            }
            let datatypes: Vec<String> = datatypes
                .iter()
                .map(|d| self.prefixes.compact(d))
                .collect();
            put_column(
                sheet,
                columns.notation_datatype,
                row,
                joined(datatypes, LIST_SEPARATOR),
                CellStyle::Link,
            );
            row += 1;
        }
        debug!(
            "Wrote {} rows to the {} sheet",
            row - columns.first_row,
            columns.sheet
        );
    }

    fn write_collections(
        &self,
        sheet: &mut Sheet,
        columns: &CollectionLayout,
        collections: &[NamedNode],
    ) {
        for (collection, row) in collections.iter().zip(columns.first_row..) {
            let c: NamedOrBlankNodeRef = collection.as_ref().into();
            sheet.set_styled(
                columns.iri,
                row,
                self.prefixes.compact(collection.as_str()),
                CellStyle::Link,
            );
            let labels = self.objects(c, skos::PREF_LABEL);
            put_column(
                sheet,
                Some(columns.pref_label),
                row,
                preferred(&labels).map(label_text),
                CellStyle::Large,
            );
            let definitions = self.objects(c, skos::DEFINITION);
            put_column(
                sheet,
                Some(columns.definition),
                row,
                preferred(&definitions).map(lexical),
                CellStyle::Wrapped,
            );
            put_column(
                sheet,
                Some(columns.members),
                row,
                self.curies(&self.objects(c, skos::MEMBER)),
                CellStyle::Link,
            );
            put_column(
                sheet,
                columns.history_note,
                row,
                self.text(c, &[skos::HISTORY_NOTE]),
                CellStyle::Wrapped,
            );
        }
    }
}
