#![allow(dead_code)]

use chrono::NaiveDate;
use oxigraph::model::{BlankNodeRef, Graph, NamedNode, NamedOrBlankNodeRef, TermRef};
use vocsheet::templates::extractor_for_version;
use vocsheet::templates::layout::CellRef;
use vocsheet::templates::v080;
use vocsheet::{TemplateVersion, VocabGraph, Workbook};

pub const SCHEME_IRI: &str = "https://example.org/rocks";
pub const ROCKS: &str = "https://example.org/rocks/";
pub const GA_ORG: &str = "https://linked.data.gov.au/org/ga";

pub fn node(iri: &str) -> NamedNode {
    NamedNode::new(iri).unwrap()
}

pub fn rock(local: &str) -> NamedNode {
    node(&format!("{ROCKS}{local}"))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn put(workbook: &mut Workbook, sheet: &str, cell: CellRef, value: &str) {
    workbook.sheet_mut(sheet).unwrap().set(cell.column, cell.row, value);
}

/// A filled-in 0.8.0 (or 0.8.0.GA) workbook describing a small rock vocabulary:
/// two concepts (granite narrower than rock), one collection, one match with a
/// typed notation and two custom prefixes.
pub fn rocks_workbook(version: TemplateVersion) -> Workbook {
    let mut workbook = extractor_for_version(version, None).blank_template();
    let scheme = match version {
        TemplateVersion::V080GA => v080::SCHEME_GA,
        _ => v080::SCHEME,
    };
    put(&mut workbook, scheme.sheet, scheme.iri, SCHEME_IRI);
    put(&mut workbook, scheme.sheet, scheme.title, "Rocks");
    put(&mut workbook, scheme.sheet, scheme.description, "Kinds of rock");
    {
        let sheet = workbook.sheet_mut(scheme.sheet).unwrap();
        sheet.set(scheme.created.column, scheme.created.row, date(2023, 1, 31));
        sheet.set(scheme.modified.column, scheme.modified.row, date(2023, 3, 1));
    }
    put(&mut workbook, scheme.sheet, scheme.creator, GA_ORG);
    put(&mut workbook, scheme.sheet, scheme.publisher, "Rock Society");
    put(&mut workbook, scheme.sheet, scheme.custodian.unwrap(), "ga:ga");
    put(&mut workbook, scheme.sheet, scheme.version.unwrap(), "1.0");
    put(&mut workbook, scheme.sheet, scheme.history_note, "Made from field notes");
    put(&mut workbook, scheme.sheet, scheme.status.unwrap(), "Experimental");
    if let Some(cell) = scheme.catalogue_pid {
        put(
            &mut workbook,
            scheme.sheet,
            cell,
            "https://pid.geoscience.gov.au/dataset/ga/123",
        );
    }

    let c = v080::CONCEPTS;
    let concepts = workbook.sheet_mut(c.sheet).unwrap();
    let rows: [[(&str, &str); 5]; 2] = [
        [
            (c.iri, ":rock"),
            (c.pref_label, "Rock"),
            (c.definition, "Solid stuff"),
            (c.alt_labels.unwrap(), "Stone, Roche@fr"),
            (c.narrower.unwrap(), ":granite"),
        ],
        [
            (c.iri, ":granite"),
            (c.pref_label, "Granite"),
            (c.definition, "Speckled rock"),
            (c.defined_by.unwrap(), "https://example.org/other"),
            (c.image_url.unwrap(), "https://example.org/granite.png"),
        ],
    ];
    for (values, row) in rows.iter().zip(c.first_row..) {
        for (column, value) in values {
            concepts.set(column, row, *value);
        }
    }

    let collections = v080::COLLECTIONS;
    let sheet = workbook.sheet_mut(collections.sheet).unwrap();
    let row = collections.first_row;
    sheet.set(collections.iri, row, ":igneous");
    sheet.set(collections.pref_label, row, "Igneous");
    sheet.set(collections.definition, row, "Rocks from magma");
    sheet.set(collections.members, row, ":granite");

    let matches = v080::MATCHES;
    let sheet = workbook.sheet_mut(matches.sheet).unwrap();
    let row = matches.first_row;
    sheet.set(matches.iri, row, ":rock");
    sheet.set(matches.matches[2], row, "http://example.com/rock");
    sheet.set(matches.notation.unwrap(), row, "R");
    sheet.set(matches.notation_datatype.unwrap(), row, "xsd:token");

    let prefixes = v080::PREFIXES;
    let sheet = workbook.sheet_mut(prefixes.sheet).unwrap();
    for ((prefix, namespace), row) in [(":", ROCKS), ("ga", "https://linked.data.gov.au/org/")]
        .into_iter()
        .zip(prefixes.first_row..)
    {
        sheet.set(prefixes.prefix, row, prefix);
        sheet.set(prefixes.namespace, row, namespace);
    }
    workbook
}

/// Every triple as text, with each blank node written out as the sorted list of
/// its own properties, so graphs compare equal up to blank node labels.
pub fn canonical_triples(graph: &VocabGraph) -> Vec<String> {
    let g = graph.graph();
    let mut triples: Vec<String> = g
        .iter()
        .map(|t| {
            let subject = match t.subject {
                NamedOrBlankNodeRef::BlankNode(b) => blank_label(g, b, 0),
                named => named.to_string(),
            };
            format!("{subject} {} {}", t.predicate, term_label(g, t.object, 0))
        })
        .collect();
    triples.sort();
    triples
}

fn term_label(g: &Graph, term: TermRef, depth: usize) -> String {
    match term {
        TermRef::BlankNode(b) => blank_label(g, b, depth),
        other => other.to_string(),
    }
}

fn blank_label(g: &Graph, node: BlankNodeRef, depth: usize) -> String {
    if depth > 8 {
        return "[...]".to_string();
    }
    let mut properties: Vec<String> = g
        .triples_for_subject(node)
        .map(|t| format!("{} {}", t.predicate, term_label(g, t.object, depth + 1)))
        .collect();
    properties.sort();
    format!("[{}]", properties.join("; "))
}
