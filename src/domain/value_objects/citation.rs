use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use uuid::Uuid;

// Matches `[1]` and grouped markers such as `[2, 5]`.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{1,4}(?:\s*,\s*\d{1,4})*)\]").expect("citation marker pattern is valid")
});

/// A retrieved chunk the answer engine based its reply on. Sources are ranked;
/// the n-th distinct source is what a `[n]` marker in the reply points at.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceChunk {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub file_name: String,
    pub page_number: i32,
}

/// Reference attached to an assistant message, binding a marker number to the
/// page a reader can jump to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub number: u32,
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub file_name: String,
    pub page_number: i32,
}

/// Marker numbers in order of first appearance, without duplicates.
pub fn extract_markers(text: &str) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut markers = Vec::new();

    for capture in MARKER.captures_iter(text) {
        for part in capture[1].split(',') {
            if let Ok(number) = part.trim().parse::<u32>() {
                if seen.insert(number) {
                    markers.push(number);
                }
            }
        }
    }

    markers
}

/// Turns ranked sources into the citations stored with an assistant reply.
///
/// When the reply cites at least one valid marker only those sources are kept,
/// ordered by marker number. A reply without usable markers keeps every source.
pub fn bind_citations(reply: &str, sources: &[SourceChunk]) -> Vec<Citation> {
    let mut seen = HashSet::new();
    let distinct: Vec<&SourceChunk> = sources
        .iter()
        .filter(|source| seen.insert(source.chunk_id))
        .collect();

    let mut cited: Vec<u32> = extract_markers(reply)
        .into_iter()
        .filter(|n| *n >= 1 && (*n as usize) <= distinct.len())
        .collect();
    cited.sort_unstable();

    let numbers: Vec<u32> = if cited.is_empty() {
        (1..=distinct.len() as u32).collect()
    } else {
        cited
    };

    numbers
        .into_iter()
        .map(|number| {
            let source = distinct[(number - 1) as usize];
            Citation {
                number,
                chunk_id: source.chunk_id,
                document_id: source.document_id,
                file_name: source.file_name.clone(),
                page_number: source.page_number,
            }
        })
        .collect()
}
