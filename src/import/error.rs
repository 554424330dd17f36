use thiserror::Error;

/// Failures that stop a workbook import. Rows inserted before the failure stay
/// committed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open workbook: {0}")]
    Open(String),

    #[error("sheet '{0}' not found")]
    SheetMissing(String),

    #[error("error reading '{sheet}': {reason}")]
    SheetUnreadable { sheet: String, reason: String },

    #[error("import task failed: {0}")]
    Internal(String),
}
