//! Rendering surfaces for order documents.
//!
//! Two outputs are produced from the same grouped order lines:
//!
//! - **Export rows** ([`build_rows`], [`RowBuilder`]): an array of rows of
//!   printable [`Cell`]s, handed to a spreadsheet or CSV writer.
//! - **Print HTML** ([`PrintDocument`]): header, body and footer templates
//!   rendered against the order and wrapped in a self-contained page.
//!
//! Both honour the same cell conventions: file values show a marker, missing
//! values show `N/A` in item rows, and keys without a total show `-` in the
//! total row.

pub mod cell;
pub mod context;
pub mod error;
pub mod print;
pub mod rows;
pub mod settings;
pub mod summary;

pub use cell::{Cell, Row, row_strings};
pub use context::OrderDocument;
pub use error::{ExportError, Result};
pub use print::{PAGE_TEMPLATE, PrintDocument, PrintOutput};
pub use rows::{GroupRows, GroupedOrder, RowBuilder, build_rows};
pub use settings::{ColumnSpec, DocumentSettings, ExportSettings, PrintSettings};
pub use summary::OrderSummary;
