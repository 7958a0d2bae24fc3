//! Page fetching, content region lookup, and anchor text collection.
//!
//! This crate provides:
//! - [`fetcher`] — single-shot HTTP GET behind the [`PageSource`] seam
//! - [`locator`] — tolerant parsing and marker-class region lookup
//! - [`collector`] — anchor text extraction from located regions

pub mod collector;
pub mod fetcher;
pub mod locator;

pub use collector::{collect, collect_region};
pub use fetcher::{HttpFetcher, PageSource};
pub use locator::{ContentRegion, locate, parse_document};

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture(name: &str) -> String {
        let path = format!("../../../fixtures/html/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    fn extract_fixture(name: &str) -> (usize, Vec<String>) {
        let doc = parse_document(&load_fixture(name)).unwrap();
        let regions = locate(&doc);
        let texts = collect(&regions)
            .into_iter()
            .map(|record| record.into_inner())
            .collect();
        (regions.len(), texts)
    }

    // -----------------------------------------------------------------------
    // Fixture pages
    // -----------------------------------------------------------------------

    #[test]
    fn elementor_post_extracts_content_links_only() {
        let (regions, texts) = extract_fixture("elementor-post.html");

        assert_eq!(regions, 1);
        assert_eq!(
            texts,
            vec![
                "metal vs. asphalt comparison",
                "wind rating specs",
                "attic ventilation basics",
                "get a free quote",
                "metal vs. asphalt comparison",
            ]
        );
        // Header, navigation and footer chrome stay out
        assert!(!texts.iter().any(|t| t == "Services" || t == "Privacy Policy"));
        assert!(!texts.iter().any(|t| t == "Previous post"));
    }

    #[test]
    fn multiple_regions_keep_document_order() {
        let (regions, texts) = extract_fixture("elementor-multi-region.html");

        assert_eq!(regions, 2);
        assert_eq!(texts, vec!["Part One", "Part Two", "Part Three", "Part One"]);
    }

    #[test]
    fn malformed_page_without_marker_is_empty() {
        let (regions, texts) = extract_fixture("no-marker.html");

        assert_eq!(regions, 0);
        assert!(texts.is_empty());
    }

    #[test]
    fn region_without_linked_text_is_empty() {
        let (regions, texts) = extract_fixture("empty-region.html");

        assert_eq!(regions, 1);
        assert!(texts.is_empty());
    }

    #[test]
    fn extraction_is_repeatable() {
        let first = extract_fixture("elementor-post.html");
        let second = extract_fixture("elementor-post.html");
        assert_eq!(first, second);
    }
}
