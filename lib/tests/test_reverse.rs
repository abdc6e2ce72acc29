mod common;

use anyhow::Result;
use common::{canonical_triples, rocks_workbook};
use vocsheet::templates::v080;
use vocsheet::util::RdfSyntax;
use vocsheet::{
    rdf_to_excel, workbook_to_rdf, Conversion, ExcelOutput, ExcelToRdfOptions, OutputFormat,
    RdfToExcelOptions, ShaclValidationError, TemplateVersion, VocabGraph, Workbook,
};

fn to_graph(workbook: &Workbook) -> Result<VocabGraph> {
    let options = ExcelToRdfOptions::builder()
        .output_format(OutputFormat::Graph)
        .build()?;
    match workbook_to_rdf(workbook, &options)? {
        Conversion::Graph(graph) => Ok(graph),
        other => panic!("expected a graph, got {other:?}"),
    }
}

#[test]
fn round_trip_keeps_the_vocabulary() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let original = to_graph(&rocks_workbook(TemplateVersion::V080))?;
    let ttl = dir.path().join("rocks.ttl");
    original.write_to_file(&ttl, RdfSyntax::LongTurtle)?;

    // without an output path the workbook lands next to the input
    let Conversion::Written(path) = rdf_to_excel(&ttl, &RdfToExcelOptions::default())? else {
        panic!("expected a written workbook");
    };
    assert_eq!(path, dir.path().join("rocks.xlsx"));

    let workbook = Workbook::load(&path)?;
    let again = to_graph(&workbook)?;
    // blank nodes (publisher, custodian attribution) must survive too
    let expected = canonical_triples(&original);
    assert!(expected.iter().any(|t| t.contains("prov#hadRole")));
    assert_eq!(canonical_triples(&again), expected);
    Ok(())
}

#[test]
fn blob_output_and_collections() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let original = to_graph(&rocks_workbook(TemplateVersion::V080GA))?;
    let ttl = dir.path().join("rocks.ttl");
    original.write_to_file(&ttl, RdfSyntax::Turtle)?;

    let options = RdfToExcelOptions::builder()
        .template_version(TemplateVersion::V080GA)
        .output(ExcelOutput::Blob)
        .build()?;
    let Conversion::Blob(bytes) = rdf_to_excel(&ttl, &options)? else {
        panic!("expected workbook bytes");
    };
    assert!(!dir.path().join("rocks.xlsx").exists());

    let workbook = Workbook::from_bytes(&bytes)?;
    let collections = workbook.sheet(v080::COLLECTIONS.sheet)?;
    let row = v080::COLLECTIONS.first_row;
    assert_eq!(collections.text("A", row).as_deref(), Some(":igneous"));
    assert_eq!(collections.text("D", row).as_deref(), Some(":granite"));

    let scheme = workbook.sheet(v080::SCHEME_GA.sheet)?;
    let pid = v080::SCHEME_GA.catalogue_pid.unwrap();
    assert_eq!(
        scheme.text(pid.column, pid.row).as_deref(),
        Some("https://pid.geoscience.gov.au/dataset/ga/123")
    );
    Ok(())
}

#[test]
fn graph_must_conform() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let ttl = dir.path().join("thin.ttl");
    std::fs::write(
        &ttl,
        "PREFIX skos: <http://www.w3.org/2004/02/skos/core#>\n\
         <https://example.org/thin> a skos:ConceptScheme ; skos:prefLabel \"Thin\"@en .\n",
    )?;
    let err = rdf_to_excel(&ttl, &RdfToExcelOptions::default()).unwrap_err();
    let shacl = err.downcast_ref::<ShaclValidationError>().unwrap();
    assert!(shacl.report.contains("Conforms: False"));
    assert!(!dir.path().join("thin.xlsx").exists());
    Ok(())
}

#[test]
fn output_path_must_be_xlsx() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let ttl = dir.path().join("rocks.ttl");
    to_graph(&rocks_workbook(TemplateVersion::V080))?.write_to_file(&ttl, RdfSyntax::Turtle)?;
    let options = RdfToExcelOptions::builder()
        .output_path(dir.path().join("rocks.ods"))
        .build()?;
    let err = rdf_to_excel(&ttl, &options).unwrap_err();
    assert!(err.to_string().contains("must end with .xlsx"));

    let options = RdfToExcelOptions::builder()
        .template_version(TemplateVersion::V070)
        .build()?;
    let err = rdf_to_excel(&ttl, &options).unwrap_err();
    assert!(err.to_string().contains("not 0.7.0"));
    Ok(())
}
