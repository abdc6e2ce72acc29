use anyhow::Result;
use vocsheet::detect::get_template_version;
use vocsheet::templates::extractor_for_version;
use vocsheet::{excel_to_rdf, ExcelToRdfOptions, TemplateVersion, UnknownTemplateError, Workbook};

#[test]
fn blank_templates_survive_a_file_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    for version in TemplateVersion::ALL {
        let path = dir.path().join(format!("{}.xlsx", version.as_str()));
        extractor_for_version(version, None).blank_template().save(&path)?;
        let loaded = Workbook::load(&path)?;
        assert_eq!(get_template_version(&loaded)?, version);
    }
    Ok(())
}

#[test]
fn unknown_marker() -> Result<()> {
    let mut workbook = Workbook::new();
    workbook.add_sheet("Introduction").set("E", 4, "0.9.9");
    let err = get_template_version(&workbook).unwrap_err();
    let unknown = err.downcast_ref::<UnknownTemplateError>().unwrap();
    assert_eq!(unknown.found.as_deref(), Some("0.9.9"));

    let err = get_template_version(&Workbook::new()).unwrap_err();
    assert!(err.downcast_ref::<UnknownTemplateError>().unwrap().found.is_none());
    Ok(())
}

#[test]
fn unknown_template_fails_conversion() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("odd.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_sheet("Notes").set("A", 1, "nothing to see");
    workbook.save(&path)?;
    let err = excel_to_rdf(&path, &ExcelToRdfOptions::default()).unwrap_err();
    assert!(err.downcast_ref::<UnknownTemplateError>().is_some());
    Ok(())
}

#[test]
fn known_tokens_are_newest_first() {
    let tokens = TemplateVersion::known_tokens_descending();
    assert_eq!(tokens.first(), Some(&"0.8.0.GA"));
    assert_eq!(tokens.last(), Some(&"0.2.1"));
    assert_eq!(tokens.len(), TemplateVersion::ALL.len());
}
