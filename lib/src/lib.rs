//! Converts VocExcel vocabulary spreadsheets into SKOS graphs and writes SKOS
//! graphs back into the latest spreadsheet template.

extern crate derive_builder;

#[macro_use]
pub mod errors;
pub mod api;
pub mod assemble;
pub mod config;
pub mod consts;
pub mod detect;
pub mod graph;
pub mod options;
pub mod prefixes;
pub mod reverse;
pub mod shacl;
pub mod templates;
pub mod transform;
pub mod util;
pub mod validate;
pub mod workbook;

pub use api::{excel_to_rdf, init_logging, rdf_to_excel, workbook_to_rdf, Conversion};
pub use config::{ExcelToRdfOptions, RdfToExcelOptions};
pub use detect::TemplateVersion;
pub use errors::{ConversionError, ShaclValidationError, UnknownTemplateError, UsageError};
pub use graph::VocabGraph;
pub use options::{ErrorFormat, ExcelOutput, OutputFormat};
pub use workbook::Workbook;

/// Version of this crate, reported by the command line `--info`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
