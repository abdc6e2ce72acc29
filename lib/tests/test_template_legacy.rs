mod common;

use anyhow::Result;
use common::{date, node};
use oxigraph::model::vocab::xsd;
use oxigraph::model::{Literal, NamedOrBlankNodeRef, Term, TripleRef};
use vocsheet::consts::{dcterms, owl, prov, sdo, skos};
use vocsheet::templates::extractor_for_version;
use vocsheet::templates::layout::SchemeLayout;
use vocsheet::templates::{v021, v040, v060, v070};
use vocsheet::{
    workbook_to_rdf, Conversion, ConversionError, ExcelToRdfOptions, OutputFormat,
    TemplateVersion, UsageError, VocabGraph, Workbook,
};

const SCHEME: &str = "https://example.org/minerals";

fn to_graph(workbook: &Workbook, sheet_name: Option<&str>) -> Result<VocabGraph> {
    let mut builder = ExcelToRdfOptions::builder()
        .output_format(OutputFormat::Graph)
        .validate(true);
    if let Some(sheet_name) = sheet_name {
        builder = builder.sheet_name(sheet_name);
    }
    match workbook_to_rdf(workbook, &builder.build()?)? {
        Conversion::Graph(graph) => Ok(graph),
        other => panic!("expected a graph, got {other:?}"),
    }
}

/// Fills the mandatory scheme fields shared by every template.
fn fill_scheme(workbook: &mut Workbook, scheme: &SchemeLayout) -> Result<()> {
    let sheet = workbook.sheet_mut(scheme.sheet)?;
    for (cell, value) in [
        (scheme.iri, SCHEME),
        (scheme.title, "Minerals"),
        (scheme.description, "Naturally occurring solids"),
        (scheme.creator, "https://example.org/org/survey"),
        (scheme.publisher, "https://example.org/org/survey"),
        (scheme.history_note, "Collected over many field seasons"),
    ] {
        sheet.set(cell.column, cell.row, value);
    }
    sheet.set(scheme.created.column, scheme.created.row, date(2020, 5, 1));
    // dates typed as text are accepted too
    sheet.set(scheme.modified.column, scheme.modified.row, "02/06/2021");
    Ok(())
}

#[test]
fn single_sheet_030() -> Result<()> {
    let version = TemplateVersion::V030;
    let mut workbook = extractor_for_version(version, Some("minerals")).blank_template();
    let scheme = SchemeLayout {
        sheet: "minerals",
        ..v021::SCHEME
    };
    fill_scheme(&mut workbook, &scheme)?;
    let concepts = v021::CONCEPTS_030;
    let collections = v021::COLLECTIONS_030;
    let sheet = workbook.sheet_mut("minerals")?;
    let row = concepts.first_row;
    sheet.set(concepts.iri, row, "https://example.org/minerals/quartz");
    sheet.set(concepts.pref_label, row, "Quartz");
    sheet.set(concepts.definition, row, "Silicon dioxide");
    sheet.set(concepts.notation.unwrap(), row, "Q");
    sheet.set(concepts.source.unwrap(), row, "https://example.org/handbook");
    sheet.set(collections.iri, row, "https://example.org/minerals/common");
    sheet.set(collections.pref_label, row, "Common minerals");
    sheet.set(collections.definition, row, "Minerals found everywhere");
    sheet.set(collections.members, row, "https://example.org/minerals/quartz");

    let graph = to_graph(&workbook, Some("minerals"))?;
    let s = node(SCHEME);
    let quartz = node("https://example.org/minerals/quartz");
    assert!(graph.contains(TripleRef::new(
        &s,
        dcterms::CREATED,
        &Literal::new_typed_literal("2020-05-01", xsd::DATE)
    )));
    assert!(graph.contains(TripleRef::new(
        &s,
        dcterms::MODIFIED,
        &Literal::new_typed_literal("2021-06-02", xsd::DATE)
    )));
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::NOTATION,
        &Literal::new_simple_literal("Q")
    )));
    assert!(graph.contains(TripleRef::new(
        &quartz,
        dcterms::SOURCE,
        &node("https://example.org/handbook")
    )));
    assert!(graph.contains(TripleRef::new(
        &node("https://example.org/minerals/common"),
        skos::MEMBER,
        &quartz
    )));

    // without the sheet name the default "vocabulary" sheet is looked for
    assert!(to_graph(&workbook, None).is_err());
    Ok(())
}

#[test]
fn language_columns_040() -> Result<()> {
    let version = TemplateVersion::V040;
    let mut workbook = extractor_for_version(version, None).blank_template();
    fill_scheme(&mut workbook, &v040::SCHEME)?;
    let scheme = workbook.sheet_mut(v040::SCHEME.sheet)?;
    let version_cell = v040::SCHEME.version.unwrap();
    scheme.set(version_cell.column, version_cell.row, "'2.1'");
    let pid = v040::SCHEME.pid.unwrap();
    scheme.set(pid.column, pid.row, "https://pid.example.org/minerals");

    let c = v040::CONCEPTS;
    let sheet = workbook.sheet_mut(c.sheet)?;
    let row = c.first_row;
    sheet.set(c.iri, row, "https://example.org/minerals/quartz");
    sheet.set(c.pref_label, row, "Quarz");
    sheet.set(c.pref_label_lang.unwrap(), row, "de");
    sheet.set(c.definition, row, "Siliziumdioxid");
    sheet.set(c.definition_lang.unwrap(), row, "de");

    let graph = to_graph(&workbook, None)?;
    let s = node(SCHEME);
    let quartz = node("https://example.org/minerals/quartz");
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::PREF_LABEL,
        &Literal::new_language_tagged_literal("Quarz", "de")?
    )));
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::DEFINITION,
        &Literal::new_language_tagged_literal("Siliziumdioxid", "de")?
    )));
    // quotes protecting a version from number formatting are dropped
    assert!(graph.contains(TripleRef::new(
        &s,
        owl::VERSION_INFO,
        &Literal::new_simple_literal("2.1")
    )));
    assert!(graph.contains(TripleRef::new(
        &s,
        dcterms::IDENTIFIER,
        &Literal::new_typed_literal("https://pid.example.org/minerals", xsd::ANY_URI)
    )));
    assert!(graph
        .graph()
        .objects_for_subject_predicate(s.as_ref(), owl::VERSION_IRI)
        .next()
        .is_none());

    // no prefix sheet, so CURIEs cannot be expanded
    let sheet = workbook.sheet_mut(c.sheet)?;
    sheet.set(c.iri, row + 1, "min:feldspar");
    sheet.set(c.pref_label, row + 1, "Feldspar");
    sheet.set(c.definition, row + 1, "A group of minerals");
    let err = to_graph(&workbook, None).unwrap_err();
    assert!(err.to_string().contains("min:feldspar"));
    Ok(())
}

#[test]
fn prefix_sheet_043() -> Result<()> {
    let mut workbook = extractor_for_version(TemplateVersion::V043, None).blank_template();
    fill_scheme(&mut workbook, &v040::SCHEME)?;
    let p = v040::PREFIXES;
    assert_eq!((p.sheet, p.first_row), ("Prefix Sheet", 2));
    let sheet = workbook.sheet_mut(p.sheet)?;
    sheet.set(p.prefix, p.first_row, "min:");
    sheet.set(p.namespace, p.first_row, "https://example.org/minerals/");

    let c = v040::CONCEPTS;
    let sheet = workbook.sheet_mut(c.sheet)?;
    let row = c.first_row;
    sheet.set(c.iri, row, "min:quartz");
    sheet.set(c.pref_label, row, "Quartz");
    sheet.set(c.pref_label_lang.unwrap(), row, "en");
    sheet.set(c.definition, row, "Silicon dioxide");
    sheet.set(c.definition_lang.unwrap(), row, "en");
    sheet.set(c.alt_labels.unwrap(), row, "Rock crystal");

    let m = v040::MATCHES;
    let sheet = workbook.sheet_mut(m.sheet)?;
    sheet.set(m.iri, m.first_row, "min:quartz");
    sheet.set(m.matches[2], m.first_row, "https://example.com/quartz");

    let graph = to_graph(&workbook, None)?;
    let quartz = node("https://example.org/minerals/quartz");
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::PREF_LABEL,
        &Literal::new_language_tagged_literal("Quartz", "en")?
    )));
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::ALT_LABEL,
        &Literal::new_language_tagged_literal("Rock crystal", "en")?
    )));
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::EXACT_MATCH,
        &node("https://example.com/quartz")
    )));
    let bound: Vec<(&str, &str)> = graph.namespaces().collect();
    assert!(bound.contains(&("min", "https://example.org/minerals/")));
    Ok(())
}

#[test]
fn notations_on_the_matches_sheet_062() -> Result<()> {
    let mut workbook = extractor_for_version(TemplateVersion::V062, None).blank_template();
    fill_scheme(&mut workbook, &v040::SCHEME)?;
    let p = v060::PREFIXES_062;
    assert_eq!((p.sheet, p.first_row), ("Prefixes", 3));
    let sheet = workbook.sheet_mut(p.sheet)?;
    sheet.set(p.prefix, p.first_row, "min");
    sheet.set(p.namespace, p.first_row, "https://example.org/minerals/");

    let c = v060::CONCEPTS;
    let sheet = workbook.sheet_mut(c.sheet)?;
    let row = c.first_row;
    sheet.set(c.iri, row, "min:quartz");
    sheet.set(c.pref_label, row, "Quarz@de");
    sheet.set(c.definition, row, "Silicon dioxide");
    sheet.set(c.source.unwrap(), row, "https://example.org/handbook");

    let m = v060::MATCHES_062;
    assert_eq!(m.notation, Some("G"));
    let sheet = workbook.sheet_mut(m.sheet)?;
    sheet.set(m.iri, m.first_row, "min:quartz");
    sheet.set(m.matches[4], m.first_row, "https://example.com/silicates");
    sheet.set("G", m.first_row, "Q, SiO2");

    let graph = to_graph(&workbook, None)?;
    let quartz = node("https://example.org/minerals/quartz");
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::PREF_LABEL,
        &Literal::new_language_tagged_literal("Quarz", "de")?
    )));
    assert!(graph.contains(TripleRef::new(
        &quartz,
        skos::BROAD_MATCH,
        &node("https://example.com/silicates")
    )));
    for notation in ["Q", "SiO2"] {
        assert!(graph.contains(TripleRef::new(
            &quartz,
            skos::NOTATION,
            &Literal::new_simple_literal(notation)
        )));
    }
    assert!(graph.contains(TripleRef::new(
        &quartz,
        dcterms::SOURCE,
        &node("https://example.org/handbook")
    )));
    Ok(())
}

#[test]
fn blank_title_in_every_family() -> Result<()> {
    for version in TemplateVersion::ALL {
        let extractor = extractor_for_version(version, None);
        let scheme = extractor.layout().scheme;
        let mut workbook = extractor.blank_template();
        fill_scheme(&mut workbook, &scheme)?;
        workbook
            .sheet_mut(scheme.sheet)?
            .clear(scheme.title.column, scheme.title.row);

        let err = to_graph(&workbook, None).unwrap_err();
        assert!(
            err.downcast_ref::<ConversionError>().is_some(),
            "{}: {err}",
            version.as_str()
        );
        assert_eq!(
            err.to_string(),
            format!(
                "Your vocabulary has no title. Please add it to the {} sheet",
                scheme.sheet
            ),
            "{}",
            version.as_str()
        );
    }
    Ok(())
}

#[test]
fn derivation_and_themes_071() -> Result<()> {
    let version = TemplateVersion::V071;
    let mut workbook = extractor_for_version(version, None).blank_template();
    fill_scheme(&mut workbook, &v070::SCHEME)?;
    let scheme = v070::SCHEME;
    let sheet = workbook.sheet_mut(scheme.sheet)?;
    for (cell, value) in [
        (scheme.derived_from, "https://example.org/rocks"),
        (scheme.derivation_mode, "Extension"),
        (scheme.themes, "geology, https://example.org/themes/earth"),
    ] {
        let cell = cell.unwrap();
        sheet.set(cell.column, cell.row, value);
    }
    let c = v070::CONCEPTS_071;
    let sheet = workbook.sheet_mut(c.sheet)?;
    let row = c.first_row;
    sheet.set(c.iri, row, "https://example.org/minerals/quartz");
    sheet.set(c.pref_label, row, "Quartz");
    sheet.set(c.definition, row, "Silicon dioxide");
    sheet.set(c.status.unwrap(), row, "Experimental");

    let graph = to_graph(&workbook, None)?;
    let s = node(SCHEME);
    let derivations: Vec<Term> = graph
        .graph()
        .objects_for_subject_predicate(s.as_ref(), prov::QUALIFIED_DERIVATION)
        .map(|t| t.into_owned())
        .collect();
    let [Term::BlankNode(derivation)] = derivations.as_slice() else {
        panic!("expected one derivation node, got {derivations:?}");
    };
    let d: NamedOrBlankNodeRef = derivation.as_ref().into();
    assert!(graph.contains(TripleRef::new(
        d,
        prov::ENTITY,
        &node("https://example.org/rocks")
    )));
    assert!(graph.contains(TripleRef::new(
        d,
        prov::HAD_ROLE,
        &node("https://linked.data.gov.au/def/vocdermods/extension")
    )));
    assert!(graph.contains(TripleRef::new(
        &s,
        sdo::KEYWORDS,
        &Literal::new_simple_literal("geology")
    )));
    assert!(graph.contains(TripleRef::new(
        &s,
        sdo::KEYWORDS,
        &node("https://example.org/themes/earth")
    )));

    // a derivation mode without its source is refused
    let cell = scheme.derived_from.unwrap();
    workbook.sheet_mut(scheme.sheet)?.clear(cell.column, cell.row);
    let err = to_graph(&workbook, None).unwrap_err();
    assert!(err.to_string().contains("'Derived From'"));
    Ok(())
}

#[test]
fn allowed_versions() -> Result<()> {
    let workbook = extractor_for_version(TemplateVersion::V063, None).blank_template();
    let options = ExcelToRdfOptions::builder()
        .allowed_template_versions(vec![TemplateVersion::V080])
        .build()?;
    let err = workbook_to_rdf(&workbook, &options).unwrap_err();
    assert!(err.downcast_ref::<UsageError>().is_some());
    assert!(err.to_string().contains("0.6.3"));
    Ok(())
}
