mod common;

use anyhow::Result;
use common::rocks_workbook;
use vocsheet::shacl::Severity;
use vocsheet::templates::v080;
use vocsheet::validate::validate;
use vocsheet::{
    workbook_to_rdf, Conversion, ExcelToRdfOptions, OutputFormat, ShaclValidationError,
    TemplateVersion, Workbook,
};

/// The rocks workbook with a second collection that has no members, which the
/// profiles only warn about.
fn with_empty_collection() -> Result<Workbook> {
    let mut workbook = rocks_workbook(TemplateVersion::V080);
    let c = v080::COLLECTIONS;
    let sheet = workbook.sheet_mut(c.sheet)?;
    let row = c.first_row + 1;
    sheet.set(c.iri, row, ":empty");
    sheet.set(c.pref_label, row, "Empty");
    sheet.set(c.definition, row, "Nothing in here yet");
    Ok(workbook)
}

fn options(error_level: u8) -> Result<ExcelToRdfOptions> {
    Ok(ExcelToRdfOptions::builder()
        .output_format(OutputFormat::Graph)
        .validate(true)
        .error_level(error_level)
        .message_level(3)
        .build()?)
}

#[test]
fn warnings_fail_only_at_level_two() -> Result<()> {
    let workbook = with_empty_collection()?;
    assert!(matches!(
        workbook_to_rdf(&workbook, &options(1)?)?,
        Conversion::Graph(_)
    ));

    let err = workbook_to_rdf(&workbook, &options(2)?).unwrap_err();
    let shacl = err.downcast_ref::<ShaclValidationError>().unwrap();
    assert_eq!(shacl.profile, "vocpub-51");
    assert!(shacl.report.contains("Validation Warning"));
    assert!(shacl.report.contains("https://example.org/rocks/empty"));
    Ok(())
}

#[test]
fn profile_can_be_chosen() -> Result<()> {
    let workbook = with_empty_collection()?;
    let options = ExcelToRdfOptions::builder()
        .output_format(OutputFormat::Graph)
        .validate(true)
        .profile("vocpub-4.9")
        .error_level(2)
        .build()?;
    let err = workbook_to_rdf(&workbook, &options).unwrap_err();
    let shacl = err.downcast_ref::<ShaclValidationError>().unwrap();
    assert_eq!(shacl.profile, "vocpub-49");

    let options = ExcelToRdfOptions::builder()
        .validate(true)
        .profile("skos-ap")
        .build()?;
    let err = workbook_to_rdf(&workbook, &options).unwrap_err();
    assert!(err.to_string().contains("not known"));
    Ok(())
}

#[test]
fn report_is_written_to_log_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let log_file = dir.path().join("validation.txt");
    let options = ExcelToRdfOptions::builder()
        .output_format(OutputFormat::Graph)
        .validate(true)
        .log_file(&log_file)
        .build()?;
    let Conversion::Graph(graph) = workbook_to_rdf(&with_empty_collection()?, &options)? else {
        panic!("expected a graph");
    };
    let report = std::fs::read_to_string(&log_file)?;
    assert!(report.starts_with("Validation Report\nConforms: False"));
    assert!(report.contains("Results (1):"));

    let report = validate(graph.graph(), "vocpub", 1, 1, None)?;
    assert_eq!(report.count(Severity::Warning), 1);
    assert_eq!(report.count(Severity::Violation), 0);
    Ok(())
}
