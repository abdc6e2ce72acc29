use anyhow::{anyhow, Error, Result};
use clap::Parser;
use log::{error, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use vocsheet::util::{is_excel_file, is_rdf_file, rdf_file_endings, RdfSyntax};
use vocsheet::{
    Conversion, ConversionError, ExcelToRdfOptions, OutputFormat, RdfToExcelOptions,
    TemplateVersion,
};

#[derive(Debug, Parser)]
#[command(name = "vocsheet")]
#[command(about = "Converts VocExcel vocabulary spreadsheets to SKOS RDF and back")]
struct Cli {
    /// The version and other info of this instance of vocsheet
    #[clap(long, short, action)]
    info: bool,
    /// Output file path. If not given, Excel -> RDF output goes to standard out and
    /// RDF -> Excel output is the input file with an .xlsx file ending
    #[clap(long = "outputfile", short = 'o')]
    output_file: Option<PathBuf>,
    /// Validate the graph made from a workbook before writing it
    #[clap(long, action, default_value = "false")]
    validate: bool,
    /// Validation profile to use, defaults to the one of the template
    #[clap(long, short)]
    profile: Option<String>,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false")]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false")]
    debug: bool,
    /// The Excel file to convert to RDF, or an RDF file to convert to Excel
    input_file: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    vocsheet::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    vocsheet::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

/// Reports a failed run, logging conversion problems and printing anything else.
pub fn report_error(err: &Error) {
    if err.downcast_ref::<ConversionError>().is_some() {
        error!("{err}");
    } else {
        eprintln!("Error: {err}");
    }
}

fn execute(cmd: Cli) -> Result<()> {
    // CLI flags take precedence over RUST_LOG (and VOCSHEET_LOG via init_logging)
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    if cmd.info {
        println!("vocsheet version: {}", vocsheet::VERSION);
        println!(
            "Known template versions: {}",
            TemplateVersion::known_tokens_descending().join(", ")
        );
        return Ok(());
    }
    let Some(input) = cmd.input_file.as_deref() else {
        return Err(anyhow!("You must supply a path to a file to convert"));
    };

    if is_excel_file(input) {
        info!("Processing file {}", input.display());
        excel_to_rdf(input, &cmd)
    } else if is_rdf_file(input) {
        info!("Processing file {}", input.display());
        rdf_to_excel(input, &cmd)
    } else {
        Err(anyhow!(
            "Files for conversion must either end with .xlsx (Excel) or one of the known RDF file endings, {}",
            rdf_file_endings()
        ))
    }
}

/// The output format matching the file ending of `path`, long-turtle otherwise.
fn output_format_for(path: &Path) -> OutputFormat {
    match RdfSyntax::from_path(path) {
        Some(RdfSyntax::RdfXml) => OutputFormat::Xml,
        Some(RdfSyntax::JsonLd) => OutputFormat::JsonLd,
        Some(RdfSyntax::NTriples) => OutputFormat::NTriples,
        _ => OutputFormat::LongTurtle,
    }
}

fn excel_to_rdf(input: &Path, cmd: &Cli) -> Result<()> {
    let mut builder = ExcelToRdfOptions::builder().validate(cmd.validate);
    if let Some(profile) = &cmd.profile {
        builder = builder.profile(profile.clone());
    }
    if let Some(output) = &cmd.output_file {
        builder = builder
            .output_path(output.clone())
            .output_format(output_format_for(output));
    }
    let options = builder.build()?;
    if cmd.verbose {
        options.print();
    }
    match vocsheet::excel_to_rdf(input, &options)? {
        Conversion::Text(text) => println!("{text}"),
        Conversion::Written(path) => info!("Wrote {}", path.display()),
        other => return Err(anyhow!("Unexpected conversion result {other:?}")),
    }
    Ok(())
}

fn rdf_to_excel(input: &Path, cmd: &Cli) -> Result<()> {
    let mut builder = RdfToExcelOptions::builder();
    if let Some(output) = &cmd.output_file {
        builder = builder.output_path(output.clone());
    }
    let options = builder.build()?;
    if cmd.verbose {
        options.print();
    }
    match vocsheet::rdf_to_excel(input, &options)? {
        Conversion::Written(path) => println!("Converted result at {}", path.display()),
        other => return Err(anyhow!("Unexpected conversion result {other:?}")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_follows_ending() {
        assert_eq!(output_format_for(Path::new("v.rdf")), OutputFormat::Xml);
        assert_eq!(output_format_for(Path::new("v.jsonld")), OutputFormat::JsonLd);
        assert_eq!(output_format_for(Path::new("v.ttl")), OutputFormat::LongTurtle);
    }

    #[test]
    fn test_missing_input() {
        let err = run_from_args(["vocsheet"]).unwrap_err();
        assert_eq!(err.to_string(), "You must supply a path to a file to convert");
    }

    #[test]
    fn test_unknown_ending() {
        let err = run_from_args(["vocsheet", "vocab.csv"]).unwrap_err();
        assert!(err.to_string().contains("'.ttl'"));
    }
}
