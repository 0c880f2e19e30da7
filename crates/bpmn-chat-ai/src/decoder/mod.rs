//! Reply decoding.
//!
//! The backend is a free-text generator, so nothing in its reply is
//! trusted: `decode` always yields a renderable document and a well-typed
//! (possibly empty) annotation list. The fallible pieces are exposed
//! separately so callers and tests can tell "empty on purpose" from
//! "empty because the block was malformed".

mod annotations;
mod document;
mod fence;


pub use annotations::{parse_annotations, Annotation, OverlayPosition};
pub use document::{DiagramDocument, DEFINITIONS_TAG, PLACEHOLDER_XML, XML_DECLARATION};
pub use fence::{fenced_blocks, FenceMatcher, FencedBlock};

use tracing::{debug, warn};

/// Annotation source used when a reply carries no ```json block.
const EMPTY_ANNOTATIONS: &str = "[]";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("document has no <bpmn:definitions> root")]
    MissingDefinitions,

    #[error("annotation block is not a list of records: {0}")]
    Annotations(#[from] serde_json::Error),
}

/// A decoded backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedReply {
    pub document: DiagramDocument,
    pub annotations: Vec<Annotation>,
}

/// Decode a raw reply. Never fails: a bad document becomes the placeholder
/// and a bad annotation block becomes an empty list.
pub fn decode(raw: &str) -> DecodedReply {
    let document = extract_document(raw).unwrap_or_else(|e| {
        warn!(error = %e, "reply has no usable diagram, using placeholder");
        DiagramDocument::placeholder()
    });

    let annotations = extract_annotations(raw).unwrap_or_else(|e| {
        warn!(error = %e, "discarding malformed annotation block");
        Vec::new()
    });

    debug!(
        document_chars = document.as_str().len(),
        annotations = annotations.len(),
        "decoded reply"
    );

    DecodedReply {
        document,
        annotations,
    }
}

/// Pick the document candidate out of a reply and normalize it.
///
/// Preference: an ```xml block, then an untagged fence, then the whole
/// reply (for backends that answer with bare XML).
pub fn extract_document(raw: &str) -> Result<DiagramDocument, DecodeError> {
    let block = FenceMatcher::xml()
        .find(raw)
        .or_else(|| FenceMatcher::untagged().find(raw));

    let candidate = match block {
        Some(block) => {
            debug!(tag = block.tag, span = ?block.span, "document taken from fenced block");
            block.body
        }
        None => raw.trim(),
    };

    DiagramDocument::from_candidate(candidate)
}

/// Parse the ```json overlay block, treating its absence as an empty list.
pub fn extract_annotations(raw: &str) -> Result<Vec<Annotation>, DecodeError> {
    let source = FenceMatcher::json()
        .find(raw)
        .map(|block| block.body)
        .unwrap_or(EMPTY_ANNOTATIONS);

    parse_annotations(source)
}
