//! Shared option types that replace loosely typed string parameters in the Rust API.

use crate::errors::UsageError;
use crate::util::RdfSyntax;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the forward conversion hands back.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// The in-memory graph.
    Graph,
    /// Serialized long-turtle bytes.
    Blob,
    /// Long-turtle written to the output path.
    File,
    Turtle,
    #[default]
    LongTurtle,
    Xml,
    JsonLd,
    NTriples,
}

impl OutputFormat {
    /// The textual syntax used when this format produces serialized output.
    pub fn syntax(self) -> RdfSyntax {
        match self {
            OutputFormat::Turtle => RdfSyntax::Turtle,
            OutputFormat::Xml => RdfSyntax::RdfXml,
            OutputFormat::JsonLd => RdfSyntax::JsonLd,
            OutputFormat::NTriples => RdfSyntax::NTriples,
            OutputFormat::Graph
            | OutputFormat::Blob
            | OutputFormat::File
            | OutputFormat::LongTurtle => RdfSyntax::LongTurtle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Graph => "graph",
            OutputFormat::Blob => "blob",
            OutputFormat::File => "file",
            OutputFormat::Turtle => "turtle",
            OutputFormat::LongTurtle => "longturtle",
            OutputFormat::Xml => "xml",
            OutputFormat::JsonLd => "json-ld",
            OutputFormat::NTriples => "nt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graph" => Ok(OutputFormat::Graph),
            "blob" => Ok(OutputFormat::Blob),
            "file" => Ok(OutputFormat::File),
            "turtle" | "ttl" => Ok(OutputFormat::Turtle),
            "longturtle" => Ok(OutputFormat::LongTurtle),
            "xml" | "rdf/xml" => Ok(OutputFormat::Xml),
            "json-ld" | "jsonld" => Ok(OutputFormat::JsonLd),
            "nt" | "ntriples" => Ok(OutputFormat::NTriples),
            other => Err(UsageError::new(format!(
                "Unknown output format '{other}'. Use one of graph, blob, file, turtle, longturtle, xml, json-ld, nt"
            ))),
        }
    }
}

/// How the reverse conversion surfaces a failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorFormat {
    /// Return the error to the caller.
    #[default]
    Raise,
    /// Print a human readable message to stdout and return normally.
    Cmd,
    /// Return a JSON error envelope as text.
    Json,
}

impl FromStr for ErrorFormat {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "raise" => Ok(ErrorFormat::Raise),
            "cmd" => Ok(ErrorFormat::Cmd),
            "json" => Ok(ErrorFormat::Json),
            other => Err(UsageError::new(format!(
                "Unknown error format '{other}'. Use cmd or json"
            ))),
        }
    }
}

impl fmt::Display for ErrorFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ErrorFormat::Raise => "raise",
            ErrorFormat::Cmd => "cmd",
            ErrorFormat::Json => "json",
        })
    }
}

/// Where the reverse conversion puts the workbook it builds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExcelOutput {
    /// Save to the output path, or next to the input file.
    #[default]
    File,
    /// Hand back the xlsx bytes.
    Blob,
}

impl ExcelOutput {
    pub fn is_blob(self) -> bool {
        matches!(self, ExcelOutput::Blob)
    }
}

impl From<bool> for ExcelOutput {
    fn from(in_memory: bool) -> Self {
        if in_memory {
            ExcelOutput::Blob
        } else {
            ExcelOutput::File
        }
    }
}

impl FromStr for ExcelOutput {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(ExcelOutput::File),
            "blob" => Ok(ExcelOutput::Blob),
            other => Err(UsageError::new(format!(
                "Unknown workbook output '{other}'. Use file or blob"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_names() {
        for format in [
            OutputFormat::Graph,
            OutputFormat::Blob,
            OutputFormat::File,
            OutputFormat::Turtle,
            OutputFormat::LongTurtle,
            OutputFormat::Xml,
            OutputFormat::JsonLd,
            OutputFormat::NTriples,
        ] {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_error_format_parse() {
        assert_eq!("json".parse::<ErrorFormat>().unwrap(), ErrorFormat::Json);
        assert_eq!("CMD".parse::<ErrorFormat>().unwrap(), ErrorFormat::Cmd);
        assert_eq!("".parse::<ErrorFormat>().unwrap(), ErrorFormat::Raise);
    }

    #[test]
    fn test_excel_output_from_bool() {
        assert!(ExcelOutput::from(true).is_blob());
        assert!(!ExcelOutput::from(false).is_blob());
    }
}
