//! Where each field lives in a template: plain data describing sheets, rows and
//! columns, read by the shared extraction code in `common`.

use crate::consts::{dcterms, owl, sdo};
use oxigraph::model::NamedNodeRef;

/// Which predicate vocabulary a template era writes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dialect {
    /// DCTERMS dates and agents, `owl:versionInfo` (templates before 0.7).
    Dcterms,
    /// schema.org dates and agents, `schema:version` plus a version IRI.
    SchemaOrg,
}

impl Dialect {
    pub fn created(self) -> NamedNodeRef<'static> {
        match self {
            Dialect::Dcterms => dcterms::CREATED,
            Dialect::SchemaOrg => sdo::DATE_CREATED,
        }
    }

    pub fn modified(self) -> NamedNodeRef<'static> {
        match self {
            Dialect::Dcterms => dcterms::MODIFIED,
            Dialect::SchemaOrg => sdo::DATE_MODIFIED,
        }
    }

    pub fn creator(self) -> NamedNodeRef<'static> {
        match self {
            Dialect::Dcterms => dcterms::CREATOR,
            Dialect::SchemaOrg => sdo::CREATOR,
        }
    }

    pub fn publisher(self) -> NamedNodeRef<'static> {
        match self {
            Dialect::Dcterms => dcterms::PUBLISHER,
            Dialect::SchemaOrg => sdo::PUBLISHER,
        }
    }

    pub fn identifier(self) -> NamedNodeRef<'static> {
        match self {
            Dialect::Dcterms => dcterms::IDENTIFIER,
            Dialect::SchemaOrg => sdo::IDENTIFIER,
        }
    }

    pub fn version(self) -> NamedNodeRef<'static> {
        match self {
            Dialect::Dcterms => owl::VERSION_INFO,
            Dialect::SchemaOrg => sdo::VERSION,
        }
    }

    /// The validation profile written for graphs of this era.
    pub fn profile(self) -> &'static str {
        match self {
            Dialect::Dcterms => "vocpub-49",
            Dialect::SchemaOrg => "vocpub-51",
        }
    }
}

/// A single cell, by column letters and 1-based row.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellRef {
    pub column: &'static str,
    pub row: u32,
}

pub const fn at(column: &'static str, row: u32) -> CellRef {
    CellRef { column, row }
}

/// The concept scheme fields: one cell each on a key/value sheet.
#[derive(Debug, Copy, Clone)]
pub struct SchemeLayout<'a> {
    pub sheet: &'a str,
    pub iri: CellRef,
    pub title: CellRef,
    pub description: CellRef,
    pub created: CellRef,
    pub modified: CellRef,
    pub creator: CellRef,
    pub publisher: CellRef,
    pub history_note: CellRef,
    pub version: Option<CellRef>,
    pub custodian: Option<CellRef>,
    /// Persistent identifier of the vocabulary, written as an anyURI literal.
    pub pid: Option<CellRef>,
    pub citation: Option<CellRef>,
    pub derived_from: Option<CellRef>,
    pub derivation_mode: Option<CellRef>,
    pub themes: Option<CellRef>,
    pub status: Option<CellRef>,
    /// Mandatory GA catalogue identifier.
    pub catalogue_pid: Option<CellRef>,
}

impl SchemeLayout<'static> {
    pub const BLANK: SchemeLayout<'static> = SchemeLayout {
        sheet: "Concept Scheme",
        iri: at("B", 1),
        title: at("B", 1),
        description: at("B", 1),
        created: at("B", 1),
        modified: at("B", 1),
        creator: at("B", 1),
        publisher: at("B", 1),
        history_note: at("B", 1),
        version: None,
        custodian: None,
        pid: None,
        citation: None,
        derived_from: None,
        derivation_mode: None,
        themes: None,
        status: None,
        catalogue_pid: None,
    };
}

impl SchemeLayout<'_> {
    /// Field labels and their cells, in sheet order.
    pub fn fields(&self) -> Vec<(&'static str, CellRef)> {
        let mut fields: Vec<(&'static str, CellRef)> = [
            ("IRI", Some(self.iri)),
            ("Title", Some(self.title)),
            ("Description", Some(self.description)),
            ("Created", Some(self.created)),
            ("Modified", Some(self.modified)),
            ("Creator", Some(self.creator)),
            ("Publisher", Some(self.publisher)),
            ("Custodian", self.custodian),
            ("Version", self.version),
            ("History Note", Some(self.history_note)),
            ("PID", self.pid),
            ("Citation", self.citation),
            ("Derived From", self.derived_from),
            ("Derivation Mode", self.derivation_mode),
            ("Themes", self.themes),
            ("Status", self.status),
            ("Catalogue PID", self.catalogue_pid),
        ]
        .into_iter()
        .filter_map(|(label, cell)| cell.map(|c| (label, c)))
        .collect();
        fields.sort_by_key(|(_, cell)| cell.row);
        fields
    }
}

/// The concepts table: one concept per row from `first_row`.
#[derive(Debug, Copy, Clone)]
pub struct ConceptLayout<'a> {
    pub sheet: &'a str,
    pub first_row: u32,
    pub iri: &'static str,
    pub pref_label: &'static str,
    /// Separate language column for the preferred label. Without one, a label
    /// may carry an "@lang" suffix.
    pub pref_label_lang: Option<&'static str>,
    pub definition: &'static str,
    pub definition_lang: Option<&'static str>,
    pub alt_labels: Option<&'static str>,
    pub narrower: Option<&'static str>,
    pub notation: Option<&'static str>,
    pub history_note: Option<&'static str>,
    pub citation: Option<&'static str>,
    pub source: Option<&'static str>,
    pub defined_by: Option<&'static str>,
    pub status: Option<&'static str>,
    pub example: Option<&'static str>,
    pub image_url: Option<&'static str>,
    pub image_embedded: Option<&'static str>,
}

impl ConceptLayout<'static> {
    pub const BLANK: ConceptLayout<'static> = ConceptLayout {
        sheet: "Concepts",
        first_row: 2,
        iri: "A",
        pref_label: "B",
        pref_label_lang: None,
        definition: "C",
        definition_lang: None,
        alt_labels: None,
        narrower: None,
        notation: None,
        history_note: None,
        citation: None,
        source: None,
        defined_by: None,
        status: None,
        example: None,
        image_url: None,
        image_embedded: None,
    };
}

impl ConceptLayout<'_> {
    /// Column headers and their columns, left to right.
    pub fn columns(&self) -> Vec<(&'static str, &'static str)> {
        let mut columns: Vec<(&'static str, &'static str)> = [
            ("Concept IRI", Some(self.iri)),
            ("Preferred Label", Some(self.pref_label)),
            ("Preferred Label Language", self.pref_label_lang),
            ("Definition", Some(self.definition)),
            ("Definition Language", self.definition_lang),
            ("Alternative Labels", self.alt_labels),
            ("Narrower Concepts", self.narrower),
            ("Notation", self.notation),
            ("History Note", self.history_note),
            ("Citation", self.citation),
            ("Source Vocab", self.source),
            ("Is Defined By", self.defined_by),
            ("Status", self.status),
            ("Example", self.example),
            ("Image URL", self.image_url),
            ("Image Embedded", self.image_embedded),
        ]
        .into_iter()
        .filter_map(|(label, column)| column.map(|c| (label, c)))
        .collect();
        columns.sort_by_key(|(_, column)| crate::workbook::column_index(column));
        columns
    }
}

/// The collections table.
#[derive(Debug, Copy, Clone)]
pub struct CollectionLayout<'a> {
    pub sheet: &'a str,
    pub first_row: u32,
    pub iri: &'static str,
    pub pref_label: &'static str,
    pub definition: &'static str,
    pub members: &'static str,
    pub history_note: Option<&'static str>,
}

impl CollectionLayout<'_> {
    pub fn columns(&self) -> Vec<(&'static str, &'static str)> {
        let mut columns = vec![
            ("Collection IRI", self.iri),
            ("Preferred Label", self.pref_label),
            ("Definition", self.definition),
            ("Members", self.members),
        ];
        if let Some(column) = self.history_note {
            columns.push(("History Note", column));
        }
        columns
    }
}

/// The additional concept properties table: external matches and notations.
#[derive(Debug, Copy, Clone)]
pub struct MatchLayout {
    pub sheet: &'static str,
    pub first_row: u32,
    pub iri: &'static str,
    /// Columns for related, close, exact, narrow and broad matches.
    pub matches: [&'static str; 5],
    pub notation: Option<&'static str>,
    pub notation_datatype: Option<&'static str>,
}

impl MatchLayout {
    pub fn columns(&self) -> Vec<(&'static str, &'static str)> {
        let mut columns = vec![
            ("Concept IRI", self.iri),
            ("Related Match", self.matches[0]),
            ("Close Match", self.matches[1]),
            ("Exact Match", self.matches[2]),
            ("Narrow Match", self.matches[3]),
            ("Broad Match", self.matches[4]),
        ];
        if let Some(column) = self.notation {
            columns.push(("Notation", column));
        }
        if let Some(column) = self.notation_datatype {
            columns.push(("Notation Datatype", column));
        }
        columns
    }
}

/// The prefix table: prefix in one column, namespace in the next.
#[derive(Debug, Copy, Clone)]
pub struct PrefixLayout {
    pub sheet: &'static str,
    pub first_row: u32,
    pub prefix: &'static str,
    pub namespace: &'static str,
}

/// Everything a template family needs to read (and write) one template version.
/// Sheet names are borrowed so a caller supplied name can stand in for the
/// default one.
#[derive(Debug, Copy, Clone)]
pub struct TemplateLayout<'a> {
    pub dialect: Dialect,
    pub scheme: SchemeLayout<'a>,
    pub concepts: ConceptLayout<'a>,
    pub collections: CollectionLayout<'a>,
    pub matches: Option<MatchLayout>,
    pub prefixes: Option<PrefixLayout>,
}
