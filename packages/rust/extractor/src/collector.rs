//! Anchor text collection from located content regions.

use scraper::ElementRef;
use tracing::debug;

use anchorprobe_shared::AnchorRecord;

use crate::locator::ContentRegion;

/// Anchor texts of all regions, region by region, in document order.
pub fn collect(regions: &[ContentRegion<'_>]) -> Vec<AnchorRecord> {
    regions.iter().flat_map(collect_region).collect()
}

/// Anchor texts of a single region.
///
/// Walks the region's descendants depth-first. A link qualifies when it is an
/// `<a>` with a non-empty `href`; its text is every descendant text node
/// concatenated, then trimmed. Links whose text trims to nothing are skipped.
pub fn collect_region(region: &ContentRegion<'_>) -> Vec<AnchorRecord> {
    let records: Vec<AnchorRecord> = region
        .element()
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(is_qualifying_link)
        .filter_map(|link| AnchorRecord::new(&link.text().collect::<String>()))
        .collect();

    debug!(
        region = region.index(),
        anchors = records.len(),
        "anchors collected"
    );
    records
}

fn is_qualifying_link(el: &ElementRef<'_>) -> bool {
    el.value().name() == "a" && el.value().attr("href").is_some_and(|href| !href.is_empty())
}
