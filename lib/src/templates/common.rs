//! Reading template sheets into graph fragments and writing blank templates, both
//! driven by a family's [`TemplateLayout`].

use super::layout::{CellRef, Dialect, TemplateLayout};
use crate::consts::{
    dataroles, dcterms, owl, prov, rdfs, sdo, skos, table_labels, DERIVATION_MODES,
    EXAMPLE_CONCEPT_IRIS, GA_CATALOGUE_PREFIX, STATUSES,
};
use crate::conversion_error;
use crate::detect::TemplateVersion;
use crate::graph::VocabGraph;
use crate::prefixes::PrefixMap;
use crate::util::{split_and_tidy_to_iris, split_and_tidy_to_strings};
use crate::workbook::{CellStyle, Sheet, Workbook};
use anyhow::Result;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::{debug, info};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{BlankNode, Literal, NamedNode, NamedNodeRef, Term, TripleRef};
use regex::Regex;
use url::Url;

pub const DEFAULT_LANGUAGE: &str = "en";

lazy_static! {
    static ref LANGUAGE_TAG: Regex = Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").unwrap();
}

/// Splits a trailing "@lang" off a label. The suffix only counts when it looks
/// like a language tag and leaves a non-empty label.
pub fn split_language(text: &str) -> (&str, Option<&str>) {
    match text.rsplit_once('@') {
        Some((value, tag)) if !value.trim().is_empty() && LANGUAGE_TAG.is_match(tag) => {
            (value.trim_end(), Some(tag))
        }
        _ => (text, None),
    }
}

fn tagged(value: &str, language: &str) -> Result<Literal> {
    Literal::new_language_tagged_literal(value, language.to_lowercase())
        .map_err(|_| conversion_error!("'{}' is not a valid language tag", language))
}

fn english(value: &str) -> Literal {
    Literal::new_language_tagged_literal_unchecked(value, DEFAULT_LANGUAGE)
}

/// A label literal, honouring an "@lang" suffix.
fn suffixed_label(text: &str) -> Result<Literal> {
    let (value, language) = split_language(text);
    tagged(value, language.unwrap_or(DEFAULT_LANGUAGE))
}

fn any_uri(value: &str) -> Literal {
    Literal::new_typed_literal(value, xsd::ANY_URI)
}

fn date_literal(date: NaiveDate) -> Literal {
    Literal::new_typed_literal(date.format("%Y-%m-%d").to_string(), xsd::DATE)
}

/// Citations that are web addresses are typed `xsd:anyURI`, anything else stays plain.
fn citation_literal(value: &str) -> Literal {
    if value.starts_with("http") {
        any_uri(value)
    } else {
        Literal::new_simple_literal(value)
    }
}

fn missing(what: &str, sheet: &str) -> anyhow::Error {
    conversion_error!(
        "Your vocabulary has no {}. Please add it to the {} sheet",
        what,
        sheet
    )
}

fn text_at(sheet: &Sheet, cell: CellRef) -> Option<String> {
    sheet.text(cell.column, cell.row)
}

fn optional_text(sheet: &Sheet, cell: Option<CellRef>) -> Option<String> {
    cell.and_then(|c| text_at(sheet, c))
}

fn required_text(sheet: &Sheet, cell: CellRef, what: &str) -> Result<String> {
    text_at(sheet, cell).ok_or_else(|| missing(what, sheet.name()))
}

fn required_date(sheet: &Sheet, cell: CellRef, what: &str) -> Result<NaiveDate> {
    let value = sheet.cell(cell.column, cell.row);
    if value.is_empty() {
        return Err(missing(what, sheet.name()));
    }
    value.as_date().ok_or_else(|| {
        conversion_error!(
            "The {} '{}' in cell {}{} of the {} sheet is not a date",
            what,
            value.as_text().unwrap_or_default(),
            cell.column,
            cell.row,
            sheet.name()
        )
    })
}

/// Maps a status label to its registry IRI. `owner` names what the status is
/// for ("vocab", "Concept") in the error.
fn status_iri(label: &str, owner: &str) -> Result<NamedNode> {
    match STATUSES.get(label) {
        Some(iri) => Ok(NamedNode::new(iri.as_str())?),
        None => Err(conversion_error!(
            "You have supplied a status for your {} of {} but it is not recognised. If supplied, it must be one of {}",
            owner,
            label,
            table_labels(&STATUSES)
        )),
    }
}

fn derivation_mode_iri(label: &str) -> Result<NamedNode> {
    match DERIVATION_MODES.get(label) {
        Some(iri) => Ok(NamedNode::new(iri.as_str())?),
        None => Err(conversion_error!(
            "You have supplied a vocab derivation mode of {} but it is not recognised. If supplied, it must be one of {}",
            label,
            table_labels(&DERIVATION_MODES)
        )),
    }
}

/// An agent given as an IRI (or CURIE) is referenced directly. Anything else is
/// a name, recorded on a blank node typed `schema:Organization`.
pub fn make_agent(graph: &mut VocabGraph, value: &str, prefixes: &PrefixMap) -> Term {
    match prefixes.expand(value) {
        Ok(iri) => iri.into(),
        Err(_) => {
            debug!("Agent '{value}' is not an IRI, recording it by name");
            let node = BlankNode::default();
            graph.insert(TripleRef::new(&node, rdf::TYPE, sdo::ORGANIZATION));
            graph.insert(TripleRef::new(
                &node,
                sdo::NAME,
                &Literal::new_simple_literal(value),
            ));
            node.into()
        }
    }
}

fn add_custodian(
    graph: &mut VocabGraph,
    scheme: NamedNodeRef,
    value: &str,
    prefixes: &PrefixMap,
) {
    let agent = make_agent(graph, value, prefixes);
    let attribution = BlankNode::default();
    graph.insert(TripleRef::new(scheme, prov::QUALIFIED_ATTRIBUTION, &attribution));
    graph.insert(TripleRef::new(&attribution, prov::AGENT, &agent));
    graph.insert(TripleRef::new(&attribution, prov::HAD_ROLE, dataroles::CUSTODIAN));
}

/// Prefix table rows, over the common prefixes. Templates without a prefix
/// sheet get an empty map.
pub fn extract_prefixes(workbook: &Workbook, layout: &TemplateLayout) -> Result<PrefixMap> {
    let Some(columns) = layout.prefixes else {
        return Ok(PrefixMap::new());
    };
    let sheet = workbook.sheet(columns.sheet)?;
    let mut prefixes = PrefixMap::well_known();
    let mut count = 0;
    for row in sheet.rows_from(columns.first_row, columns.prefix) {
        let Some(prefix) = sheet.text(columns.prefix, row) else {
            continue;
        };
        let namespace = sheet.text(columns.namespace, row).ok_or_else(|| {
            conversion_error!(
                "The prefix '{}' on row {} of the {} sheet has no namespace",
                prefix,
                row,
                columns.sheet
            )
        })?;
        prefixes.insert(&prefix, &namespace)?;
        count += 1;
    }
    info!("Read {count} prefixes from the {} sheet", columns.sheet);
    Ok(prefixes)
}

/// The concept scheme fragment and the scheme IRI.
pub fn extract_concept_scheme(
    workbook: &Workbook,
    layout: &TemplateLayout,
    prefixes: &PrefixMap,
) -> Result<(VocabGraph, NamedNode)> {
    let fields = &layout.scheme;
    let dialect = layout.dialect;
    let sheet = workbook.sheet(fields.sheet)?;

    let iri = prefixes.expand(&required_text(sheet, fields.iri, "IRI")?)?;
    let title = required_text(sheet, fields.title, "title")?;
    let description = required_text(sheet, fields.description, "description")?;
    let created = required_date(sheet, fields.created, "created date")?;
    let modified = required_date(sheet, fields.modified, "modified date")?;
    let creator = required_text(sheet, fields.creator, "creator")?;
    let publisher = required_text(sheet, fields.publisher, "publisher")?;
    let history_note = required_text(sheet, fields.history_note, "History Note statement")?;

    let version = optional_text(sheet, fields.version).map(|v| v.trim_matches('\'').to_string());
    let custodians = optional_text(sheet, fields.custodian)
        .map(|c| split_and_tidy_to_strings(&c))
        .unwrap_or_default();
    let pid = optional_text(sheet, fields.pid);
    let citation = optional_text(sheet, fields.citation);
    let themes = optional_text(sheet, fields.themes)
        .map(|t| split_and_tidy_to_strings(&t))
        .unwrap_or_default();

    let derivation = match (
        optional_text(sheet, fields.derived_from),
        optional_text(sheet, fields.derivation_mode),
    ) {
        (Some(source), Some(mode)) => Some((prefixes.expand(&source)?, derivation_mode_iri(&mode)?)),
        (Some(_), None) => {
            return Err(conversion_error!(
                "If you supply a 'Derived From' value - IRI of another vocab - you must also supply a 'Derivation Mode' value"
            ))
        }
        (None, Some(_)) => {
            return Err(conversion_error!(
                "If you supply a 'Derivation Mode' value you must also supply a 'Derived From' value - IRI of another vocab"
            ))
        }
        (None, None) => None,
    };
    let status = optional_text(sheet, fields.status)
        .map(|s| status_iri(&s, "vocab"))
        .transpose()?;
    let catalogue_pid = match fields.catalogue_pid {
        Some(cell) => match text_at(sheet, cell) {
            Some(pid) if pid.starts_with(GA_CATALOGUE_PREFIX) => Some(pid),
            _ => {
                return Err(conversion_error!(
                    "All GA vocabularies must have an eCat ID starting {}dataset/..., assigned in the {} metadata",
                    GA_CATALOGUE_PREFIX,
                    fields.sheet
                ))
            }
        },
        None => None,
    };

    let mut graph = VocabGraph::new();
    let s = iri.as_ref();
    graph.insert(TripleRef::new(s, rdf::TYPE, skos::CONCEPT_SCHEME));
    graph.insert(TripleRef::new(s, skos::PREF_LABEL, &english(&title)));
    graph.insert(TripleRef::new(s, skos::DEFINITION, &english(&description)));
    graph.insert(TripleRef::new(s, dialect.created(), &date_literal(created)));
    graph.insert(TripleRef::new(s, dialect.modified(), &date_literal(modified)));
    let agent = make_agent(&mut graph, &creator, prefixes);
    graph.insert(TripleRef::new(s, dialect.creator(), &agent));
    let agent = make_agent(&mut graph, &publisher, prefixes);
    graph.insert(TripleRef::new(s, dialect.publisher(), &agent));
    for custodian in &custodians {
        add_custodian(&mut graph, s, custodian, prefixes);
    }
    if let Some(version) = &version {
        graph.insert(TripleRef::new(
            s,
            dialect.version(),
            &Literal::new_simple_literal(version),
        ));
        if dialect == Dialect::SchemaOrg {
            let version_iri = NamedNode::new(format!("{}/{}", iri.as_str(), version))
                .map_err(|_| conversion_error!("The version '{}' cannot be used in a version IRI", version))?;
            graph.insert(TripleRef::new(s, owl::VERSION_IRI, &version_iri));
        }
    }
    graph.insert(TripleRef::new(
        s,
        skos::HISTORY_NOTE,
        &Literal::new_simple_literal(&history_note),
    ));
    if let Some(pid) = &pid {
        graph.insert(TripleRef::new(s, dcterms::IDENTIFIER, &any_uri(pid)));
    }
    if let Some(citations) = &citation {
        for citation in split_and_tidy_to_strings(citations) {
            graph.insert(TripleRef::new(s, sdo::CITATION, &citation_literal(&citation)));
        }
    }
    if let Some((source, mode)) = &derivation {
        let derivation = BlankNode::default();
        graph.insert(TripleRef::new(s, prov::QUALIFIED_DERIVATION, &derivation));
        graph.insert(TripleRef::new(&derivation, prov::ENTITY, source));
        graph.insert(TripleRef::new(&derivation, prov::HAD_ROLE, mode));
    }
    for theme in &themes {
        let term: Term = match prefixes.expand(theme) {
            Ok(iri) => iri.into(),
            Err(_) => Literal::new_simple_literal(theme).into(),
        };
        graph.insert(TripleRef::new(s, sdo::KEYWORDS, &term));
    }
    if let Some(status) = &status {
        graph.insert(TripleRef::new(s, sdo::STATUS, status));
    }
    if let Some(pid) = &catalogue_pid {
        graph.insert(TripleRef::new(s, dialect.identifier(), &any_uri(pid)));
    }
    info!("Read concept scheme {} from the {} sheet", iri, fields.sheet);
    Ok((graph, iri))
}

/// One fragment holding every concept row.
pub fn extract_concepts(
    workbook: &Workbook,
    layout: &TemplateLayout,
    prefixes: &PrefixMap,
    scheme: &NamedNode,
) -> Result<VocabGraph> {
    let columns = &layout.concepts;
    let sheet = workbook.sheet(columns.sheet)?;
    let mut graph = VocabGraph::new();
    let mut count = 0;
    for row in sheet.rows_from(columns.first_row, columns.iri) {
        let Some(iri_text) = sheet.text(columns.iri, row) else {
            continue;
        };
        if EXAMPLE_CONCEPT_IRIS.contains(&iri_text.as_str()) {
            debug!("Skipping example concept {iri_text} on row {row}");
            continue;
        }
        let text = |column: Option<&str>| column.and_then(|c| sheet.text(c, row));
        let iri = prefixes.expand(&iri_text)?;
        let pref_label = sheet.text(columns.pref_label, row).ok_or_else(|| {
            conversion_error!("You must provide a Preferred Label for Concept {}", iri_text)
        })?;
        let definition = sheet.text(columns.definition, row).ok_or_else(|| {
            conversion_error!("You must provide a Definition for Concept {}", iri_text)
        })?;
        let pref_label = match columns.pref_label_lang {
            Some(column) => tagged(
                &pref_label,
                &sheet
                    .text(column, row)
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            )?,
            None => suffixed_label(&pref_label)?,
        };
        let definition = match text(columns.definition_lang) {
            Some(language) => tagged(&definition, &language)?,
            None => english(&definition),
        };
        let status = text(columns.status)
            .map(|s| status_iri(&s, "Concept"))
            .transpose()?;
        let image_url = match text(columns.image_url) {
            Some(url) => match Url::parse(&url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(url),
                _ => {
                    return Err(conversion_error!(
                        "If supplied, an Image URL must be a web address starting with 'http', not {}",
                        url
                    ))
                }
            },
            None => None,
        };
        let embedded_image = match columns.image_embedded {
            Some(column) => {
                let value = sheet.cell(column, row);
                if value.is_embedded_object_marker() {
                    Some(format!("Image at {column}{row}"))
                } else if value.is_empty() {
                    None
                } else {
                    return Err(conversion_error!(
                        "Cell {}{} of the {} sheet must hold an embedded image or be left empty",
                        column,
                        row,
                        columns.sheet
                    ));
                }
            }
            None => None,
        };

        let s = iri.as_ref();
        graph.insert(TripleRef::new(s, rdf::TYPE, skos::CONCEPT));
        graph.insert(TripleRef::new(s, skos::IN_SCHEME, scheme));
        graph.insert(TripleRef::new(s, skos::PREF_LABEL, &pref_label));
        graph.insert(TripleRef::new(s, skos::DEFINITION, &definition));
        if let Some(alt_labels) = text(columns.alt_labels) {
            for label in split_and_tidy_to_strings(&alt_labels) {
                graph.insert(TripleRef::new(s, skos::ALT_LABEL, &suffixed_label(&label)?));
            }
        }
        if let Some(narrower) = text(columns.narrower) {
            for child in split_and_tidy_to_iris(&narrower, prefixes)? {
                graph.insert(TripleRef::new(s, skos::NARROWER, &child));
                graph.insert(TripleRef::new(&child, skos::BROADER, s));
            }
        }
        if let Some(notations) = text(columns.notation) {
            for notation in split_and_tidy_to_strings(&notations) {
                graph.insert(TripleRef::new(
                    s,
                    skos::NOTATION,
                    &Literal::new_simple_literal(notation),
                ));
            }
        }
        if let Some(note) = text(columns.history_note) {
            graph.insert(TripleRef::new(
                s,
                skos::HISTORY_NOTE,
                &Literal::new_simple_literal(note),
            ));
        }
        if let Some(citations) = text(columns.citation) {
            for citation in split_and_tidy_to_strings(&citations) {
                graph.insert(TripleRef::new(s, sdo::CITATION, &citation_literal(&citation)));
            }
        }
        if let Some(sources) = text(columns.source) {
            for source in split_and_tidy_to_iris(&sources, prefixes)? {
                graph.insert(TripleRef::new(s, dcterms::SOURCE, &source));
            }
        }
        let defined_by = match text(columns.defined_by) {
            Some(value) => prefixes.expand(&value)?,
            None => scheme.clone(),
        };
        graph.insert(TripleRef::new(s, rdfs::IS_DEFINED_BY, &defined_by));
        if let Some(status) = &status {
            graph.insert(TripleRef::new(s, sdo::STATUS, status));
        }
        if let Some(example) = text(columns.example) {
            graph.insert(TripleRef::new(
                s,
                skos::EXAMPLE,
                &Literal::new_simple_literal(example),
            ));
        }
        if let Some(url) = &image_url {
            graph.insert(TripleRef::new(s, sdo::IMAGE, &any_uri(url)));
        }
        if let Some(placeholder) = embedded_image {
            graph.insert(TripleRef::new(
                s,
                sdo::IMAGE,
                &Literal::new_simple_literal(placeholder),
            ));
        }
        count += 1;
    }
    info!("Read {count} concepts from the {} sheet", columns.sheet);
    Ok(graph)
}

pub fn extract_collections(
    workbook: &Workbook,
    layout: &TemplateLayout,
    prefixes: &PrefixMap,
    scheme: &NamedNode,
) -> Result<VocabGraph> {
    let columns = &layout.collections;
    let sheet = workbook.sheet(columns.sheet)?;
    let mut graph = VocabGraph::new();
    let mut count = 0;
    for row in sheet.rows_from(columns.first_row, columns.iri) {
        let Some(iri_text) = sheet.text(columns.iri, row) else {
            continue;
        };
        let iri = prefixes.expand(&iri_text)?;
        let pref_label = sheet.text(columns.pref_label, row).ok_or_else(|| {
            conversion_error!("You must provide a Preferred Label for Collection {}", iri_text)
        })?;
        let definition = sheet.text(columns.definition, row).ok_or_else(|| {
            conversion_error!("You must provide a Definition for Collection {}", iri_text)
        })?;

        let s = iri.as_ref();
        graph.insert(TripleRef::new(s, rdf::TYPE, skos::COLLECTION));
        graph.insert(TripleRef::new(s, skos::PREF_LABEL, &suffixed_label(&pref_label)?));
        graph.insert(TripleRef::new(s, skos::DEFINITION, &english(&definition)));
        if let Some(members) = sheet.text(columns.members, row) {
            for member in split_and_tidy_to_iris(&members, prefixes)? {
                graph.insert(TripleRef::new(s, skos::MEMBER, &member));
            }
        }
        if let Some(note) = columns.history_note.and_then(|c| sheet.text(c, row)) {
            graph.insert(TripleRef::new(
                s,
                skos::HISTORY_NOTE,
                &Literal::new_simple_literal(note),
            ));
        }
        graph.insert(TripleRef::new(s, rdfs::IS_DEFINED_BY, scheme));
        count += 1;
    }
    info!("Read {count} collections from the {} sheet", columns.sheet);
    Ok(graph)
}

/// Pairs notations with their datatypes: none gives plain literals, one applies
/// to every notation, otherwise the lists must be the same length.
pub fn notation_literals(
    concept: &str,
    notations: &[String],
    datatypes: &[NamedNode],
) -> Result<Vec<Literal>> {
    match datatypes.len() {
        0 => Ok(notations.iter().map(Literal::new_simple_literal).collect()),
        1 => Ok(notations
            .iter()
            .map(|n| Literal::new_typed_literal(n, datatypes[0].clone()))
            .collect()),
        n if n == notations.len() => Ok(notations
            .iter()
            .zip(datatypes)
            .map(|(value, datatype)| Literal::new_typed_literal(value, datatype.clone()))
            .collect()),
        n => Err(conversion_error!(
            "Concept {} has {} notations but {} notation datatypes. Supply one datatype for all notations or one per notation",
            concept,
            notations.len(),
            n
        )),
    }
}

/// External matches and notations. Templates without the sheet give an empty
/// fragment.
pub fn extract_additional_properties(
    workbook: &Workbook,
    layout: &TemplateLayout,
    prefixes: &PrefixMap,
) -> Result<VocabGraph> {
    let mut graph = VocabGraph::new();
    let Some(columns) = layout.matches else {
        return Ok(graph);
    };
    let sheet = workbook.sheet(columns.sheet)?;
    let mut count = 0;
    for row in sheet.rows_from(columns.first_row, columns.iri) {
        let Some(iri_text) = sheet.text(columns.iri, row) else {
            continue;
        };
        if EXAMPLE_CONCEPT_IRIS.contains(&iri_text.as_str()) {
            continue;
        }
        let iri = prefixes.expand(&iri_text)?;
        for (column, predicate) in columns.matches.iter().zip(skos::MATCHES) {
            if let Some(targets) = sheet.text(column, row) {
                for target in split_and_tidy_to_iris(&targets, prefixes)? {
                    graph.insert(TripleRef::new(&iri, predicate, &target));
                }
            }
        }
        if let Some(notations) = columns.notation.and_then(|c| sheet.text(c, row)) {
            let datatypes = match columns.notation_datatype.and_then(|c| sheet.text(c, row)) {
                Some(datatypes) => split_and_tidy_to_iris(&datatypes, prefixes)?,
                None => vec![],
            };
            let notations = split_and_tidy_to_strings(&notations);
            for literal in notation_literals(&iri_text, &notations, &datatypes)? {
                graph.insert(TripleRef::new(&iri, skos::NOTATION, &literal));
            }
        }
        count += 1;
    }
    info!("Read additional properties for {count} concepts from the {} sheet", columns.sheet);
    Ok(graph)
}

fn table_header(sheet: &mut Sheet, header_row: u32, title: &str, columns: &[(&str, &str)]) {
    if header_row > 1 {
        sheet.set_styled("A", 1, title, CellStyle::Heading);
    }
    for (label, column) in columns {
        sheet.set_styled(column, header_row, *label, CellStyle::Heading);
        sheet.set_column_width(column, 30.0);
    }
}

/// An empty workbook laid out as `version` of the template: the version marker,
/// the scheme field labels and every table's header row.
pub fn blank_template(version: TemplateVersion, layout: &TemplateLayout) -> Workbook {
    let mut workbook = Workbook::new();
    let (marker_sheet, column, row) = version.marker_cell();
    let intro = workbook.add_sheet(marker_sheet);
    intro.set_styled("A", 1, "VocExcel template", CellStyle::Heading);
    intro.set(column, row, version.as_str());

    let scheme = workbook.add_sheet(layout.scheme.sheet);
    for (label, cell) in layout.scheme.fields() {
        scheme.set_styled("A", cell.row, label, CellStyle::Heading);
    }
    scheme.set_column_width("A", 20.0);
    scheme.set_column_width("B", 60.0);

    let concepts = &layout.concepts;
    table_header(
        workbook.add_sheet(concepts.sheet),
        concepts.first_row - 1,
        "Concepts",
        &concepts.columns(),
    );
    let collections = &layout.collections;
    table_header(
        workbook.add_sheet(collections.sheet),
        collections.first_row - 1,
        "Collections",
        &collections.columns(),
    );
    if let Some(matches) = &layout.matches {
        table_header(
            workbook.add_sheet(matches.sheet),
            matches.first_row - 1,
            "Additional Concept Properties",
            &matches.columns(),
        );
    }
    if let Some(prefixes) = &layout.prefixes {
        table_header(
            workbook.add_sheet(prefixes.sheet),
            prefixes.first_row - 1,
            "Prefixes",
            &[("Prefix", prefixes.prefix), ("Namespace", prefixes.namespace)],
        );
    }
    workbook
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_language() {
        assert_eq!(split_language("Rock@fr"), ("Rock", Some("fr")));
        assert_eq!(split_language("Rock @en-AU"), ("Rock", Some("en-AU")));
        assert_eq!(split_language("Rock"), ("Rock", None));
        assert_eq!(split_language("mail me@ga.gov.au"), ("mail me@ga.gov.au", None));
        assert_eq!(split_language("@en"), ("@en", None));
    }

    #[test]
    fn test_notation_pairing() {
        let int = NamedNode::new("http://www.w3.org/2001/XMLSchema#integer").unwrap();
        let token = NamedNode::new("http://www.w3.org/2001/XMLSchema#token").unwrap();
        let notations = vec!["1".to_string(), "A".to_string()];

        let plain = notation_literals("c", &notations, &[]).unwrap();
        assert!(plain.iter().all(|l| l.datatype() == xsd::STRING));

        let shared = notation_literals("c", &notations, &[int.clone()]).unwrap();
        assert!(shared.iter().all(|l| l.datatype() == int.as_ref()));

        let paired = notation_literals("c", &notations, &[int.clone(), token.clone()]).unwrap();
        assert_eq!(paired[1].datatype(), token.as_ref());

        let err = notation_literals("c", &notations[..1], &[int, token]).unwrap_err();
        assert!(err.to_string().contains("notation datatypes"));
    }

    #[test]
    fn test_agent_by_name_is_blank_organization() {
        let mut graph = VocabGraph::new();
        let agent = make_agent(&mut graph, "Geoscience Australia", &PrefixMap::new());
        assert!(matches!(agent, Term::BlankNode(_)));
        assert_eq!(graph.len(), 2);

        let agent = make_agent(&mut graph, "https://linked.data.gov.au/org/ga", &PrefixMap::new());
        assert!(matches!(agent, Term::NamedNode(_)));
        assert_eq!(graph.len(), 2);
    }
}
