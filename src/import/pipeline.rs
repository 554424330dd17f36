use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use super::{
    error::ImportError,
    rows::{
        ingredient_row, recipe_ingredient_row, recipe_row, CatalogRow, INGREDIENTS_SHEET,
        RECIPES_SHEET, RECIPE_INGREDIENT_SHEET,
    },
    sink::CatalogSink,
    workbook::Workbook,
};

type RowParser = fn(&[String]) -> Option<CatalogRow>;

/// Sheets in processing order. Later sheets refer to ids created by earlier ones.
const SHEETS: [(&str, RowParser); 3] = [
    (INGREDIENTS_SHEET, ingredient_row),
    (RECIPES_SHEET, recipe_row),
    (RECIPE_INGREDIENT_SHEET, recipe_ingredient_row),
];

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet: String,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub sheets: Vec<SheetReport>,
}

impl ImportReport {
    #[cfg(test)]
    pub fn sheet(&self, name: &str) -> Option<&SheetReport> {
        self.sheets.iter().find(|s| s.sheet == name)
    }

    pub fn inserted(&self) -> usize {
        self.sheets.iter().map(|s| s.inserted).sum()
    }
}

/// Imports an uploaded workbook.
pub async fn import_bytes(
    bytes: Bytes,
    sink: &dyn CatalogSink,
) -> Result<ImportReport, ImportError> {
    let workbook = tokio::task::spawn_blocking(move || Workbook::from_bytes(bytes.to_vec()))
        .await
        .map_err(|e| ImportError::Internal(e.to_string()))??;
    process_workbook(&workbook, sink).await
}

/// Imports a workbook from the filesystem.
pub async fn import_path(
    path: impl Into<PathBuf>,
    sink: &dyn CatalogSink,
) -> Result<ImportReport, ImportError> {
    let path = path.into();
    info!(path = %path.display(), "importing workbook");
    let workbook = tokio::task::spawn_blocking(move || Workbook::open(&path))
        .await
        .map_err(|e| ImportError::Internal(e.to_string()))??;
    process_workbook(&workbook, sink).await
}

/// Walks the three catalog sheets in order and inserts every parsable row.
///
/// The header row of each sheet is skipped. Short rows are skipped silently and
/// a row whose insert fails is logged and counted, neither stops the sheet. A
/// missing or unreadable sheet stops the import with an error; rows inserted
/// from earlier sheets are kept.
pub async fn process_workbook(
    workbook: &Workbook,
    sink: &dyn CatalogSink,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();
    for (sheet, parse) in SHEETS {
        let rows = workbook.rows(sheet).map_err(|e| {
            warn!(sheet, error = %e, "import aborted");
            e
        })?;
        let sheet_report = import_sheet(sheet, rows, parse, sink).await;
        info!(
            sheet,
            inserted = sheet_report.inserted,
            skipped = sheet_report.skipped,
            failed = sheet_report.failed,
            "sheet imported"
        );
        report.sheets.push(sheet_report);
    }
    Ok(report)
}

async fn import_sheet(
    sheet: &str,
    rows: &[Vec<String>],
    parse: RowParser,
    sink: &dyn CatalogSink,
) -> SheetReport {
    let mut report = SheetReport {
        sheet: sheet.to_string(),
        ..SheetReport::default()
    };

    for (index, cells) in rows.iter().enumerate().skip(1) {
        let Some(row) = parse(cells) else {
            report.skipped += 1;
            continue;
        };
        match sink.insert(&row).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                warn!(sheet, row = index + 1, error = %e, "row insert failed");
                report.failed += 1;
            }
        }
    }
    report
}
