use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::debug;

use super::error::ImportError;

type SheetRows = Vec<Vec<String>>;

/// Every sheet of a spreadsheet, loaded into memory as rows of cell text.
///
/// Loading reads the whole file up front, so the underlying reader or file
/// handle is released before any row is processed. Cells keep their absolute
/// position: a sheet whose data starts at `C3` yields two empty leading rows and
/// two empty leading cells per row. Trailing empty cells are dropped, so a row's
/// length ends at its last non-empty cell.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: HashMap<String, Result<SheetRows, String>>,
}

impl Workbook {
    pub fn from_sheets<I, S>(sheets: I) -> Self
    where
        I: IntoIterator<Item = (S, SheetRows)>,
        S: Into<String>,
    {
        Self {
            sheets: sheets
                .into_iter()
                .map(|(name, rows)| (name.into(), Ok(rows)))
                .collect(),
        }
    }

    /// Opens an xlsx, xls, xlsb or ods document held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImportError> {
        let book = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ImportError::Open(e.to_string()))?;
        Ok(Self::load(book))
    }

    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let book = open_workbook_auto(path)
            .map_err(|e| ImportError::Open(format!("{}: {e}", path.display())))?;
        Ok(Self::load(book))
    }

    fn load<RS: Read + Seek>(mut book: Sheets<RS>) -> Self {
        let mut sheets = HashMap::new();
        for name in book.sheet_names() {
            let rows = book
                .worksheet_range(&name)
                .map(|range| range_rows(&range))
                .map_err(|e| e.to_string());
            debug!(sheet = %name, ok = rows.is_ok(), "sheet loaded");
            sheets.insert(name, rows);
        }
        Self { sheets }
    }

    pub fn rows(&self, name: &str) -> Result<&[Vec<String>], ImportError> {
        match self.sheets.get(name) {
            None => Err(ImportError::SheetMissing(name.to_string())),
            Some(Err(reason)) => Err(ImportError::SheetUnreadable {
                sheet: name.to_string(),
                reason: reason.clone(),
            }),
            Some(Ok(rows)) => Ok(rows),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_unreadable(mut self, name: &str, reason: &str) -> Self {
        self.sheets.insert(name.to_string(), Err(reason.to_string()));
        self
    }
}

fn range_rows(range: &Range<Data>) -> SheetRows {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows = vec![Vec::new(); row_offset];
    for cells in range.rows() {
        let mut row: Vec<String> = std::iter::repeat(String::new())
            .take(col_offset)
            .chain(cells.iter().map(cell_text))
            .collect();
        while row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
        rows.push(row);
    }
    rows
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}
