use crate::prefixes::PrefixMap;
use anyhow::Result;
use lazy_static::lazy_static;
use oxigraph::io::{JsonLdProfileSet, RdfFormat};
use oxigraph::model::NamedNode;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// The one spreadsheet file ending the converter reads and writes.
pub const EXCEL_FILE_ENDING: &str = ".xlsx";

/// Graph file endings, mapped to the syntax used to parse them.
pub const RDF_FILE_ENDINGS: [(&str, RdfSyntax); 8] = [
    (".ttl", RdfSyntax::Turtle),
    (".rdf", RdfSyntax::RdfXml),
    (".xml", RdfSyntax::RdfXml),
    (".json-ld", RdfSyntax::JsonLd),
    (".jsonld", RdfSyntax::JsonLd),
    (".json", RdfSyntax::JsonLd),
    (".nt", RdfSyntax::NTriples),
    (".n3", RdfSyntax::N3),
];

lazy_static! {
    static ref LIST_SEPARATOR: Regex = Regex::new(r"[,;]").unwrap();
}

/// Textual graph syntaxes the converter parses and writes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RdfSyntax {
    Turtle,
    /// Turtle with the statements written in sorted order, so output is stable.
    LongTurtle,
    RdfXml,
    JsonLd,
    NTriples,
    N3,
}

impl RdfSyntax {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "turtle" | "ttl" => Some(RdfSyntax::Turtle),
            "longturtle" => Some(RdfSyntax::LongTurtle),
            "xml" | "rdf/xml" | "pretty-xml" => Some(RdfSyntax::RdfXml),
            "json-ld" | "jsonld" => Some(RdfSyntax::JsonLd),
            "nt" | "ntriples" | "nt11" => Some(RdfSyntax::NTriples),
            "n3" => Some(RdfSyntax::N3),
            _ => None,
        }
    }

    /// Looks the syntax up from a file's ending, `None` for anything that is not
    /// a known graph file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        RDF_FILE_ENDINGS
            .iter()
            .find(|(ending, _)| name.ends_with(ending))
            .map(|(_, syntax)| *syntax)
    }

    pub fn rdf_format(self) -> RdfFormat {
        match self {
            RdfSyntax::Turtle | RdfSyntax::LongTurtle => RdfFormat::Turtle,
            RdfSyntax::RdfXml => RdfFormat::RdfXml,
            RdfSyntax::JsonLd => RdfFormat::JsonLd {
                profile: JsonLdProfileSet::empty(),
            },
            RdfSyntax::NTriples => RdfFormat::NTriples,
            RdfSyntax::N3 => RdfFormat::N3,
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            RdfSyntax::Turtle | RdfSyntax::LongTurtle => "text/turtle",
            RdfSyntax::RdfXml => "application/rdf+xml",
            RdfSyntax::JsonLd => "application/ld+json",
            RdfSyntax::NTriples => "application/n-triples",
            RdfSyntax::N3 => "text/n3",
        }
    }

    pub fn is_sorted(self) -> bool {
        matches!(self, RdfSyntax::LongTurtle)
    }
}

impl fmt::Display for RdfSyntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            RdfSyntax::Turtle => "turtle",
            RdfSyntax::LongTurtle => "longturtle",
            RdfSyntax::RdfXml => "xml",
            RdfSyntax::JsonLd => "json-ld",
            RdfSyntax::NTriples => "nt",
            RdfSyntax::N3 => "n3",
        })
    }
}

pub fn is_excel_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_lowercase().ends_with(EXCEL_FILE_ENDING))
}

pub fn is_rdf_file(path: &Path) -> bool {
    RdfSyntax::from_path(path).is_some()
}

/// The graph file endings, quoted and comma separated, for error messages.
pub fn rdf_file_endings() -> String {
    RDF_FILE_ENDINGS
        .iter()
        .map(|(ending, _)| format!("'{ending}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits a multi-valued cell on commas and semicolons, trimming each element
/// and dropping empty ones.
pub fn split_and_tidy_to_strings(text: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`split_and_tidy_to_strings`], expanding each element to an IRI.
pub fn split_and_tidy_to_iris(text: &str, prefixes: &PrefixMap) -> Result<Vec<NamedNode>> {
    split_and_tidy_to_strings(text)
        .iter()
        .map(|s| prefixes.expand(s))
        .collect()
}
