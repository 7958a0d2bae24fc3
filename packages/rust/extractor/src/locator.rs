//! Content region lookup.
//!
//! Parses a document with the html5ever-backed tolerant parser and walks the
//! whole tree for elements whose class token set contains [`CONTENT_MARKER`].

use scraper::{ElementRef, Html};
use tracing::debug;

use anchorprobe_shared::{AnchorProbeError, CONTENT_MARKER, Result};

/// One marker-classed subtree of a parsed document.
#[derive(Debug, Clone, Copy)]
pub struct ContentRegion<'a> {
    index: usize,
    element: ElementRef<'a>,
}

impl<'a> ContentRegion<'a> {
    /// Position among the located regions, in document order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Root element of the region.
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }
}

/// Leading bytes inspected when deciding whether a body is binary.
const SNIFF_LEN: usize = 1024;

/// A sniffed prefix with more than one NUL per this many bytes is binary.
const NUL_DENSITY: usize = 16;

/// Parse document text into a tree.
///
/// Malformed markup, stray NUL bytes included, is recovered the way browsers
/// do. The only rejection is a body whose leading bytes are dense with NULs,
/// i.e. a binary payload (image, archive) served where a page was expected.
pub fn parse_document(text: &str) -> Result<Html> {
    if looks_binary(text) {
        return Err(AnchorProbeError::parse(
            "document body is binary data, not markup",
        ));
    }

    Ok(Html::parse_document(text))
}

fn looks_binary(text: &str) -> bool {
    let prefix = &text.as_bytes()[..text.len().min(SNIFF_LEN)];
    let nuls = prefix.iter().filter(|&&b| b == 0).count();
    nuls > 0 && nuls * NUL_DENSITY > prefix.len()
}

/// Every element carrying the content marker, in document order.
///
/// Nested marker elements are each returned as their own region.
pub fn locate(doc: &Html) -> Vec<ContentRegion<'_>> {
    let regions: Vec<ContentRegion<'_>> = doc
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| has_class_token(el, CONTENT_MARKER))
        .enumerate()
        .map(|(index, element)| ContentRegion { index, element })
        .collect();

    debug!(regions = regions.len(), "content regions located");
    regions
}

/// Whitespace-separated token match on the `class` attribute.
fn has_class_token(el: &ElementRef<'_>, token: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == token))
}
