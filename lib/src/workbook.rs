//! A small in-memory model of a spreadsheet: named sheets of sparse, typed cells
//! addressed the way the templates describe them ("B3", column "A" of row 12).
//! Workbooks are read from xlsx with calamine and written with rust_xlsxwriter.

use crate::conversion_error;
use anyhow::{anyhow, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatUnderline, Workbook as XlsxWorkbook};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Text Excel shows for a cell holding an embedded object instead of a value.
pub const EMBEDDED_OBJECT_MARKER: &str = "#VALUE!";

static EMPTY: CellValue = CellValue::Empty;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// A formula error such as `#VALUE!`.
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The trimmed textual content of the cell, `None` when there is none.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Empty => return None,
            CellValue::String(s) => s.trim().to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) if f.fract() == 0.0 && f.abs() < 1e16 => format!("{f:.1}"),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            CellValue::Error(code) => code.clone(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Reads the cell as a calendar date: a date cell, a date serial number, or
    /// text written as `YYYY-MM-DD[...]` or `DD/MM/YYYY`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Int(i) => excel_serial_to_datetime(*i as f64).map(|dt| dt.date()),
            CellValue::Float(f) => excel_serial_to_datetime(*f).map(|dt| dt.date()),
            CellValue::String(s) => parse_date_text(s.trim()),
            _ => None,
        }
    }

    pub fn is_embedded_object_marker(&self) -> bool {
        match self {
            CellValue::Error(code) | CellValue::String(code) => {
                code.trim() == EMBEDDED_OBJECT_MARKER
            }
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::String(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// 2^53, above which not every integer has an exact `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl From<Data> for CellValue {
    fn from(data: Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::String(s),
            Data::Int(i) => CellValue::Int(i),
            // xlsx stores every number as a float; whole ones are read as integers
            Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
                CellValue::Int(f as i64)
            }
            Data::Float(f) => CellValue::Float(f),
            Data::Bool(b) => CellValue::Bool(b),
            Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
                Some(value) if value.time() == chrono::NaiveTime::MIN => {
                    CellValue::Date(value.date())
                }
                Some(value) => CellValue::DateTime(value),
                None => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => match NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S")
            {
                Ok(value) => CellValue::DateTime(value),
                Err(_) => parse_date_text(&s)
                    .map(CellValue::Date)
                    .unwrap_or(CellValue::String(s)),
            },
            Data::DurationIso(s) => CellValue::String(s),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(head) = text.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}

/// Converts an Excel serial date (days since 1899-12-30, fractional part is the
/// time of day) into a date-time.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    base.checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}

/// Write-side styling hint for a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CellStyle {
    #[default]
    Plain,
    /// Rendered like a hyperlink.
    Link,
    /// Larger body text.
    Large,
    /// Larger body text wrapped within the column.
    Wrapped,
    Heading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Converts column letters ("A", "L", "AB") to a zero-based column index.
pub fn column_index(letters: &str) -> u16 {
    letters
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .fold(0u16, |acc, b| {
            acc.saturating_mul(26)
                .saturating_add((b.to_ascii_uppercase() - b'A') as u16 + 1)
        })
        .saturating_sub(1)
}

/// Converts a zero-based column index back to its letters.
pub fn column_letters(index: u16) -> String {
    let mut n = index as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    /// keyed by (1-based row, 0-based column)
    cells: BTreeMap<(u32, u16), Cell>,
    column_widths: BTreeMap<u16, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value at `column` (letters) and `row` (1-based). Missing cells are empty.
    pub fn cell(&self, column: &str, row: u32) -> &CellValue {
        self.value_at(column_index(column), row)
    }

    fn value_at(&self, column: u16, row: u32) -> &CellValue {
        self.cells
            .get(&(row, column))
            .map(|c| &c.value)
            .unwrap_or(&EMPTY)
    }

    /// Shorthand for `cell(column, row).as_text()`.
    pub fn text(&self, column: &str, row: u32) -> Option<String> {
        self.cell(column, row).as_text()
    }

    pub fn style(&self, column: &str, row: u32) -> CellStyle {
        self.cells
            .get(&(row, column_index(column)))
            .map(|c| c.style)
            .unwrap_or_default()
    }

    pub fn set(&mut self, column: &str, row: u32, value: impl Into<CellValue>) {
        self.set_styled(column, row, value, CellStyle::Plain);
    }

    pub fn set_styled(
        &mut self,
        column: &str,
        row: u32,
        value: impl Into<CellValue>,
        style: CellStyle,
    ) {
        let value = value.into();
        let key = (row, column_index(column));
        if value == CellValue::Empty {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, Cell { value, style });
        }
    }

    pub fn clear(&mut self, column: &str, row: u32) {
        self.cells.remove(&(row, column_index(column)));
    }

    pub fn set_column_width(&mut self, column: &str, width: f64) {
        self.column_widths.insert(column_index(column), width);
    }

    /// The last row holding a cell, 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map(|(row, _)| *row).unwrap_or(0)
    }

    /// Row numbers of a table whose data starts at `first_row`. The scan ends
    /// before the first row whose `key_column` cell is empty, and never runs past
    /// the last used row of the sheet.
    pub fn rows_from(&self, first_row: u32, key_column: &str) -> RowScan<'_> {
        RowScan {
            sheet: self,
            key_column: column_index(key_column),
            next_row: first_row,
            last_row: self.max_row(),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter().map(|((row, col), cell)| (*row, *col, cell))
    }
}

/// Iterator returned by [`Sheet::rows_from`].
pub struct RowScan<'a> {
    sheet: &'a Sheet,
    key_column: u16,
    next_row: u32,
    last_row: u32,
}

impl Iterator for RowScan<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next_row > self.last_row {
            return None;
        }
        let row = self.next_row;
        if self.sheet.value_at(self.key_column, row).is_empty() {
            self.next_row = self.last_row.saturating_add(1);
            return None;
        }
        self.next_row += 1;
        Some(row)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| conversion_error!("The workbook has no sheet named '{}'", name))
    }

    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| conversion_error!("The workbook has no sheet named '{}'", name))
    }

    /// Adds an empty sheet, or returns the existing one with that name.
    pub fn add_sheet(&mut self, name: &str) -> &mut Sheet {
        let index = match self.sheets.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sheets.push(Sheet::new(name));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index]
    }

    /// Loads every sheet of an xlsx file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading workbook {}", path.display());
        let mut xlsx: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| anyhow!("Failed to open {}: {}", path.display(), e))?;
        Self::read_sheets(&mut xlsx)
    }

    /// Loads every sheet of an in-memory xlsx file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut xlsx = Xlsx::new(Cursor::new(bytes.to_vec()))
            .map_err(|e| anyhow!("Failed to read workbook: {}", e))?;
        Self::read_sheets(&mut xlsx)
    }

    fn read_sheets<RS: Read + Seek>(xlsx: &mut Xlsx<RS>) -> Result<Self> {
        let mut workbook = Workbook::new();
        for name in xlsx.sheet_names() {
            let range = xlsx
                .worksheet_range(&name)
                .map_err(|e| anyhow!("Failed to read sheet '{}': {}", name, e))?;
            let (row0, col0) = range.start().unwrap_or((0, 0));
            let sheet = workbook.add_sheet(&name);
            for (r, c, data) in range.used_cells() {
                let value = CellValue::from(data.clone());
                if value == CellValue::Empty {
                    continue;
                }
                let row = row0 + r as u32 + 1;
                let col = (col0 + c as u32) as u16;
                sheet.cells.insert(
                    (row, col),
                    Cell {
                        value,
                        style: CellStyle::Plain,
                    },
                );
            }
        }
        Ok(workbook)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("Saving workbook to {}", path.display());
        let mut book = self.to_xlsx()?;
        book.save(path)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut book = self.to_xlsx()?;
        Ok(book.save_to_buffer()?)
    }

    fn to_xlsx(&self) -> Result<XlsxWorkbook> {
        let formats = StyleFormats::new();
        let mut book = XlsxWorkbook::new();
        for sheet in &self.sheets {
            let ws = book.add_worksheet();
            ws.set_name(&sheet.name)?;
            for (col, width) in &sheet.column_widths {
                ws.set_column_width(*col, *width)?;
            }
            for ((row, col), cell) in &sheet.cells {
                let (row, col) = (row - 1, *col);
                let format = formats.for_style(cell.style);
                match &cell.value {
                    CellValue::Empty => {}
                    CellValue::String(s) | CellValue::Error(s) => {
                        ws.write_string_with_format(row, col, s, format)?;
                    }
                    CellValue::Int(i) => {
                        ws.write_number_with_format(row, col, *i as f64, format)?;
                    }
                    CellValue::Float(f) => {
                        ws.write_number_with_format(row, col, *f, format)?;
                    }
                    CellValue::Bool(b) => {
                        ws.write_boolean_with_format(row, col, *b, format)?;
                    }
                    CellValue::Date(d) => {
                        let date = excel_date(*d)?;
                        ws.write_datetime_with_format(row, col, &date, &formats.date)?;
                    }
                    CellValue::DateTime(dt) => {
                        let text = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
                        ws.write_string_with_format(row, col, &text, format)?;
                    }
                }
            }
        }
        Ok(book)
    }
}

fn excel_date(date: NaiveDate) -> Result<ExcelDateTime> {
    use chrono::Datelike;
    Ok(ExcelDateTime::from_ymd(
        date.year() as u16,
        date.month() as u8,
        date.day() as u8,
    )?)
}

struct StyleFormats {
    plain: Format,
    link: Format,
    large: Format,
    wrapped: Format,
    heading: Format,
    date: Format,
}

impl StyleFormats {
    fn new() -> Self {
        Self {
            plain: Format::new(),
            link: Format::new()
                .set_font_color(Color::Blue)
                .set_underline(FormatUnderline::Single),
            large: Format::new().set_font_size(14.0),
            wrapped: Format::new().set_font_size(14.0).set_text_wrap(),
            heading: Format::new().set_bold().set_font_size(14.0),
            date: Format::new().set_num_format("yyyy-mm-dd"),
        }
    }

    fn for_style(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Plain => &self.plain,
            CellStyle::Link => &self.link,
            CellStyle::Large => &self.large,
            CellStyle::Wrapped => &self.wrapped,
            CellStyle::Heading => &self.heading,
        }
    }
}
