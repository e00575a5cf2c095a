use lopdf::Document as PdfDocument;

const PDF_MAGIC: &[u8] = b"%PDF-";
// Readers accept the header anywhere in the first kilobyte.
const HEADER_WINDOW: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfSummary {
    /// `None` when the structure could not be parsed; the ingestion pipeline
    /// gets the final say on such files.
    pub page_count: Option<i32>,
}

pub fn looks_like_pdf(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}

pub fn inspect_pdf(data: &[u8]) -> Result<PdfSummary, String> {
    if !looks_like_pdf(data) {
        return Err("Only PDF documents are supported".to_string());
    }

    let page_count = match PdfDocument::load_mem(data) {
        Ok(doc) => Some(doc.get_pages().len() as i32),
        Err(e) => {
            tracing::warn!("PDF structure unreadable, page count unknown: {}", e);
            None
        }
    };

    Ok(PdfSummary { page_count })
}
