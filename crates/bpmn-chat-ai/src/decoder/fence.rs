//! Markdown code-fence matching.
//!
//! Fence markers are paired in order of appearance, so the closing marker
//! of one block is never mistaken for the opener of the next.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A run of three backticks plus the info-string tag that may follow it.
static FENCE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([A-Za-z][A-Za-z0-9_+-]*)?").unwrap());

/// The interior of one fenced block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Info-string tag of the opener; empty for an untagged fence.
    pub tag: &'a str,
    /// Interior text, trimmed.
    pub body: &'a str,
    /// Byte range of `body` within the searched text.
    pub span: Range<usize>,
}

/// Every complete fenced block in `text`, in order. An unterminated opener
/// at the end is ignored.
pub fn fenced_blocks(text: &str) -> impl Iterator<Item = FencedBlock<'_>> + '_ {
    let mut markers = FENCE_MARKER.captures_iter(text);
    std::iter::from_fn(move || {
        let open = markers.next()?;
        let close = markers.next()?.get(0)?;

        let tag = open.get(1).map_or("", |m| m.as_str());
        let inner_start = open.get(0)?.end();
        let raw = &text[inner_start..close.start()];
        let body = raw.trim();
        let start = inner_start + (raw.len() - raw.trim_start().len());

        Some(FencedBlock {
            tag,
            body,
            span: start..start + body.len(),
        })
    })
}

/// Finds the first fenced block with a given info-string tag.
#[derive(Debug, Clone)]
pub struct FenceMatcher {
    tag: Option<String>,
}

impl FenceMatcher {
    /// Matcher for ```` ```<tag> ```` blocks; the tag is case-insensitive.
    pub fn tagged(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
        }
    }

    pub fn xml() -> Self {
        Self::tagged("xml")
    }

    pub fn json() -> Self {
        Self::tagged("json")
    }

    /// Matcher for fences with no info string at all.
    pub fn untagged() -> Self {
        Self { tag: None }
    }

    pub fn find<'a>(&self, text: &'a str) -> Option<FencedBlock<'a>> {
        fenced_blocks(text).find(|block| match self.tag {
            Some(ref tag) => block.tag.eq_ignore_ascii_case(tag),
            None => block.tag.is_empty(),
        })
    }
}
