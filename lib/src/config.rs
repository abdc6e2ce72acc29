//! Options for the two conversion directions. Both can be built field by field,
//! e.g. `ExcelToRdfOptions::builder().validate(true).build()?`, or read from JSON.

use crate::detect::TemplateVersion;
use crate::options::{ErrorFormat, ExcelOutput, OutputFormat};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_level() -> u8 {
    1
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[builder(pattern = "owned", default)]
pub struct ExcelToRdfOptions {
    /// Validation profile; the template family's own when not given.
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub profile: Option<String>,
    /// Name of the data sheet in 0.2.1 and 0.3.0 workbooks.
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub sheet_name: Option<String>,
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Validation results ranked at or below this fail the conversion.
    #[serde(default = "default_level")]
    pub error_level: u8,
    /// Validation results ranked at or below this are logged.
    #[serde(default = "default_level")]
    pub message_level: u8,
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub validate: bool,
    #[builder(setter(strip_option))]
    #[serde(default)]
    pub allowed_template_versions: Option<Vec<TemplateVersion>>,
}

impl Default for ExcelToRdfOptions {
    fn default() -> Self {
        Self {
            profile: None,
            sheet_name: None,
            output_path: None,
            output_format: OutputFormat::default(),
            error_level: default_level(),
            message_level: default_level(),
            log_file: None,
            validate: false,
            allowed_template_versions: None,
        }
    }
}

impl ExcelToRdfOptions {
    pub fn builder() -> ExcelToRdfOptionsBuilder {
        ExcelToRdfOptionsBuilder::default()
    }

    /// Prints the options in a readable way for command line output.
    pub fn print(&self) {
        println!("Excel to RDF options:");
        println!(
            "  Profile: {}",
            self.profile.as_deref().unwrap_or("(template default)")
        );
        if let Some(sheet_name) = &self.sheet_name {
            println!("  Sheet Name: {sheet_name}");
        }
        if let Some(path) = &self.output_path {
            println!("  Output Path: {}", path.display());
        }
        println!("  Output Format: {}", self.output_format);
        println!("  Validate: {}", self.validate);
        println!("  Error Level: {}", self.error_level);
        println!("  Message Level: {}", self.message_level);
        if let Some(path) = &self.log_file {
            println!("  Log File: {}", path.display());
        }
        if let Some(allowed) = &self.allowed_template_versions {
            println!("  Allowed Template Versions:");
            for version in allowed {
                println!("    - {version}");
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, Builder)]
#[builder(pattern = "owned", default)]
pub struct RdfToExcelOptions {
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default)]
    pub template_version: TemplateVersion,
    #[serde(default)]
    pub output: ExcelOutput,
    #[serde(default)]
    pub error_format: ErrorFormat,
}

impl RdfToExcelOptions {
    pub fn builder() -> RdfToExcelOptionsBuilder {
        RdfToExcelOptionsBuilder::default()
    }

    /// Prints the options in a readable way for command line output.
    pub fn print(&self) {
        println!("RDF to Excel options:");
        if let Some(path) = &self.output_path {
            println!("  Output Path: {}", path.display());
        }
        println!("  Template Version: {}", self.template_version);
        println!(
            "  Output: {}",
            if self.output.is_blob() { "blob" } else { "file" }
        );
        println!("  Error Format: {}", self.error_format);
    }
}
