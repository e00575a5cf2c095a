pub mod credentials;
pub mod pdf_inspector;

pub use pdf_inspector::{PdfSummary, inspect_pdf};
