//! Entry points for both conversion directions. They check the request, pick the
//! template family, run validation and decide what the caller gets back.

use crate::config::{ExcelToRdfOptions, RdfToExcelOptions};
use crate::detect::{check_allowed, get_template_version};
use crate::errors::error_kind;
use crate::graph::VocabGraph;
use crate::options::{ErrorFormat, OutputFormat};
use crate::reverse::{check_request, graph_to_workbook};
use crate::templates::extractor_for_version;
use crate::util::{is_excel_file, EXCEL_FILE_ENDING};
use crate::workbook::Workbook;
use crate::{assemble, usage_error, validate};
use anyhow::Result;
use log::{error, info};
use std::path::{Path, PathBuf};

/// Profile graphs are checked against before they are written to a workbook.
const REVERSE_PROFILE: &str = "vocpub-51";

/// Initializes logging for the vocsheet library.
///
/// If `VOCSHEET_LOG` is set, `RUST_LOG` is set to its value, so it takes
/// precedence. The logger itself (e.g. `env_logger::init()`) must be initialised
/// after this call for the level to take effect.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("VOCSHEET_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}

/// What a conversion produced.
#[derive(Debug)]
pub enum Conversion {
    /// The vocabulary graph itself.
    Graph(VocabGraph),
    /// A serialized graph, or a JSON error envelope.
    Text(String),
    /// Serialized bytes: long-turtle for graphs, xlsx for workbooks.
    Blob(Vec<u8>),
    /// The output was written to this path.
    Written(PathBuf),
    /// A failure was printed for a person to read.
    Reported(String),
}

impl Conversion {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Conversion::Text(text) | Conversion::Reported(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_graph(self) -> Option<VocabGraph> {
        match self {
            Conversion::Graph(graph) => Some(graph),
            _ => None,
        }
    }
}

/// Converts the workbook at `path` to a vocabulary graph.
pub fn excel_to_rdf(path: &Path, options: &ExcelToRdfOptions) -> Result<Conversion> {
    if !is_excel_file(path) {
        return Err(usage_error!(
            "Files for conversion to RDF must end with {}, not {}",
            EXCEL_FILE_ENDING,
            path.display()
        ));
    }
    info!("Reading workbook {}", path.display());
    let workbook = Workbook::load(path)?;
    workbook_to_rdf(&workbook, options)
}

/// Converts an already loaded workbook to a vocabulary graph.
pub fn workbook_to_rdf(workbook: &Workbook, options: &ExcelToRdfOptions) -> Result<Conversion> {
    // contradicting output options fail before any work is done
    let output_path = options.output_path.as_deref();
    match (options.output_format, output_path) {
        (OutputFormat::Graph, Some(_)) => {
            return Err(usage_error!(
                "You cannot specify both an output path and the graph output format"
            ))
        }
        (OutputFormat::Blob, Some(_)) => {
            return Err(usage_error!(
                "You cannot specify both an output path and the blob output format"
            ))
        }
        (OutputFormat::File, None) => {
            return Err(usage_error!(
                "The file output format needs an output path to write to"
            ))
        }
        _ => {}
    }

    let version = get_template_version(workbook)?;
    check_allowed(version, options.allowed_template_versions.as_deref())?;
    let extractor = extractor_for_version(version, options.sheet_name.as_deref());
    info!(
        "Using the {} template family for version {}",
        extractor.family(),
        version
    );
    let graph = assemble::extract_vocabulary(extractor.as_ref(), workbook)?;

    if options.validate {
        let profile = options
            .profile
            .as_deref()
            .unwrap_or_else(|| extractor.default_profile());
        validate::validate(
            graph.graph(),
            profile,
            options.error_level,
            options.message_level,
            options.log_file.as_deref(),
        )?;
    }

    let syntax = options.output_format.syntax();
    match (options.output_format, output_path) {
        (OutputFormat::Graph, _) => Ok(Conversion::Graph(graph)),
        (OutputFormat::Blob, _) => Ok(Conversion::Blob(graph.serialize(syntax)?)),
        (_, Some(path)) => {
            graph.write_to_file(path, syntax)?;
            info!("Wrote {} triples to {}", graph.len(), path.display());
            Ok(Conversion::Written(path.to_path_buf()))
        }
        (_, None) => Ok(Conversion::Text(graph.serialize_to_string(syntax)?)),
    }
}

/// Converts the graph file at `path` into a 0.8.0 (or 0.8.0.GA) workbook. How a
/// failure surfaces depends on `options.error_format`.
pub fn rdf_to_excel(path: &Path, options: &RdfToExcelOptions) -> Result<Conversion> {
    match (convert_rdf(path, options), options.error_format) {
        (Ok(conversion), _) => Ok(conversion),
        (Err(err), ErrorFormat::Raise) => Err(err),
        (Err(err), ErrorFormat::Cmd) => {
            let message = format!("{}: {}", error_kind(&err), err);
            println!("{message}");
            Ok(Conversion::Reported(message))
        }
        (Err(err), ErrorFormat::Json) => {
            error!("{err}");
            Ok(Conversion::Text(error_envelope(&err)))
        }
    }
}

/// `{"error": {"type": ..., "message": ...}}`
fn error_envelope(err: &anyhow::Error) -> String {
    serde_json::json!({
        "error": {
            "type": error_kind(err),
            "message": err.to_string(),
        }
    })
    .to_string()
}

fn convert_rdf(path: &Path, options: &RdfToExcelOptions) -> Result<Conversion> {
    let output_path = options.output_path.as_deref();
    check_request(path, output_path, options.template_version)?;
    let graph = VocabGraph::parse_file(path)?;
    info!("Read {} triples from {}", graph.len(), path.display());
    validate::validate(graph.graph(), REVERSE_PROFILE, 1, 1, None)?;

    let workbook = graph_to_workbook(&graph, options.template_version)?;
    if options.output.is_blob() {
        return Ok(Conversion::Blob(workbook.to_bytes()?));
    }
    let destination = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.with_extension("xlsx"));
    workbook.save(&destination)?;
    info!("Wrote workbook to {}", destination.display());
    Ok(Conversion::Written(destination))
}
