//! Bulk catalog import from a three-sheet spreadsheet.

mod error;
pub mod handlers;
pub mod pipeline;
pub mod rows;
pub mod sink;
pub mod workbook;

use crate::state::AppState;
use axum::Router;

pub use error::ImportError;
pub use pipeline::import_path;
pub use sink::PgCatalogSink;

pub fn router() -> Router<AppState> {
    handlers::import_routes()
}
