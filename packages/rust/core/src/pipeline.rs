//! End-to-end `extract` pipeline: URL → fetch → parse → locate → collect.

use std::time::Instant;

use tracing::{info, instrument, warn};

use anchorprobe_extractor::{HttpFetcher, PageSource, collect_region, locate, parse_document};
use anchorprobe_shared::{Document, Extraction, FetchOptions, Notice, Result};

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before collecting each region, only when more than one was found.
    fn region(&self, index: usize, total: usize);
    /// Called when the pipeline completes successfully.
    fn done(&self, extraction: &Extraction);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn region(&self, _index: usize, _total: usize) {}
    fn done(&self, _extraction: &Extraction) {}
}

/// Run the full pipeline against `url` over HTTP.
///
/// 1. Fetch the page (one GET, bounded by `opts.timeout`)
/// 2. Parse and locate content regions
/// 3. Collect anchor texts
#[instrument(skip_all, fields(url = %url))]
pub async fn extract(
    url: &str,
    opts: &FetchOptions,
    progress: &dyn ProgressReporter,
) -> Result<Extraction> {
    let fetcher = HttpFetcher::new(opts)?;
    extract_with(&fetcher, url, progress).await
}

/// Run the pipeline with a caller-supplied [`PageSource`].
///
/// Any fetch failure is returned as-is and nothing is parsed.
pub async fn extract_with<S: PageSource>(
    source: &S,
    url: &str,
    progress: &dyn ProgressReporter,
) -> Result<Extraction> {
    let start = Instant::now();

    progress.phase("Fetching page");
    let document = source.fetch(url).await?;

    let extraction = extract_document(&document, progress)?;

    info!(
        regions = extraction.regions,
        anchors = extraction.anchors.len(),
        notice = ?extraction.notice,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction completed"
    );

    progress.done(&extraction);
    Ok(extraction)
}

/// Locate and collect over an already-fetched document.
pub fn extract_document(
    document: &Document,
    progress: &dyn ProgressReporter,
) -> Result<Extraction> {
    progress.phase("Locating content");
    let html = parse_document(&document.body)?;
    let regions = locate(&html);

    if regions.is_empty() {
        warn!(url = %document.url, "no content region found");
        return Ok(Extraction {
            url: document.url.to_string(),
            regions: 0,
            anchors: Vec::new(),
            notice: Some(Notice::NoRegionFound),
        });
    }

    progress.phase("Collecting anchors");
    let total = regions.len();
    let mut anchors = Vec::new();
    for region in &regions {
        if total > 1 {
            progress.region(region.index(), total);
        }
        anchors.extend(collect_region(region));
    }

    let notice = anchors.is_empty().then_some(Notice::NoAnchorsFound);
    if notice.is_some() {
        warn!(url = %document.url, regions = total, "content regions hold no linked text");
    }

    Ok(Extraction {
        url: document.url.to_string(),
        regions: total,
        anchors,
        notice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use anchorprobe_shared::AnchorProbeError;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const POST: &str = r#"<html><body>
        <nav><a href="/">Home page</a></nav>
        <div class="elementor-widget elementor-widget-theme-post-content">
            <a href="/a">Home</a><a href="/b">  Docs  </a>
        </div>
    </body></html>"#;

    /// Serves a fixed body for any URL.
    struct StaticSource(&'static str);

    impl PageSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<Document> {
            let url = Url::parse(url).map_err(|e| AnchorProbeError::Request {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
            Ok(Document::new(url, self.0))
        }
    }

    /// Records every callback for assertions.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn phase(&self, name: &str) {
            self.events.lock().unwrap().push(format!("phase:{name}"));
        }
        fn region(&self, index: usize, total: usize) {
            self.events.lock().unwrap().push(format!("region:{index}/{total}"));
        }
        fn done(&self, extraction: &Extraction) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}", extraction.anchors.len()));
        }
    }

    async fn serve(body: &str, status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/post"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn extract_over_http() {
        let server = serve(POST, 200).await;
        let url = format!("{}/post", server.uri());

        let extraction = extract(&url, &FetchOptions::default(), &SilentProgress)
            .await
            .unwrap();

        assert_eq!(extraction.texts(), vec!["Home", "Docs"]);
        assert_eq!(extraction.regions, 1);
        assert!(extraction.notice.is_none());
        assert_eq!(extraction.url, url);
    }

    #[tokio::test]
    async fn not_found_never_parses_body() {
        // Error page carries the marker; its links must not leak into a result.
        let server = serve(POST, 404).await;
        let url = format!("{}/post", server.uri());
        let progress = RecordingProgress::default();

        let err = extract(&url, &FetchOptions::default(), &progress)
            .await
            .unwrap_err();

        assert!(matches!(err, AnchorProbeError::HttpStatus { status: 404, .. }));
        let events = progress.events.lock().unwrap();
        assert_eq!(*events, vec!["phase:Fetching page"]);
    }

    #[tokio::test]
    async fn timeout_is_an_error_not_empty_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(POST)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let opts = FetchOptions {
            timeout: Duration::from_millis(200),
            ..FetchOptions::default()
        };
        let err = extract(&server.uri(), &opts, &SilentProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test]
    async fn missing_region_is_success_with_notice() {
        let source = StaticSource("<p>Unclosed <b>markup <a href='/x'>Link</a>");

        let extraction = extract_with(&source, "https://example.com/post", &SilentProgress)
            .await
            .unwrap();

        assert!(extraction.anchors.is_empty());
        assert_eq!(extraction.regions, 0);
        assert_eq!(extraction.notice, Some(Notice::NoRegionFound));
    }

    #[tokio::test]
    async fn empty_region_is_success_with_notice() {
        let source = StaticSource(
            r#"<div class="elementor-widget-theme-post-content"><a href="">Nothing</a></div>"#,
        );

        let extraction = extract_with(&source, "https://example.com/post", &SilentProgress)
            .await
            .unwrap();

        assert!(extraction.anchors.is_empty());
        assert_eq!(extraction.regions, 1);
        assert_eq!(extraction.notice, Some(Notice::NoAnchorsFound));
    }

    #[tokio::test]
    async fn binary_body_is_parse_error() {
        let source = StaticSource("GIF89a\0\0\0");

        let err = extract_with(&source, "https://example.com/pixel", &SilentProgress)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn stray_nul_byte_keeps_anchors() {
        let source = StaticSource(
            "<div class=\"elementor-widget-theme-post-content\"><a href=\"/a\">Home</a>\0</div>",
        );

        let extraction = extract_with(&source, "https://example.com/post", &SilentProgress)
            .await
            .unwrap();

        assert_eq!(extraction.texts(), vec!["Home"]);
        assert!(extraction.notice.is_none());
    }

    #[tokio::test]
    async fn reports_each_region_when_several() {
        let source = StaticSource(
            r#"<div class="elementor-widget-theme-post-content"><a href="/1">One</a></div>
               <div class="elementor-widget-theme-post-content"><a href="/2">Two</a></div>"#,
        );
        let progress = RecordingProgress::default();

        let extraction = extract_with(&source, "https://example.com/post", &progress)
            .await
            .unwrap();

        assert_eq!(extraction.texts(), vec!["One", "Two"]);
        let events = progress.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "phase:Fetching page",
                "phase:Locating content",
                "phase:Collecting anchors",
                "region:0/2",
                "region:1/2",
                "done:2",
            ]
        );
    }

    #[tokio::test]
    async fn single_region_is_not_announced() {
        let source = StaticSource(POST);
        let progress = RecordingProgress::default();

        extract_with(&source, "https://example.com/post", &progress)
            .await
            .unwrap();

        let events = progress.events.lock().unwrap();
        assert!(!events.iter().any(|e| e.starts_with("region:")));
    }

    #[tokio::test]
    async fn repeated_extraction_is_identical() {
        let source = StaticSource(POST);

        let first = extract_with(&source, "https://example.com/post", &SilentProgress)
            .await
            .unwrap();
        let second = extract_with(&source, "https://example.com/post", &SilentProgress)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_url_fails_before_fetching() {
        let err = extract("", &FetchOptions::default(), &SilentProgress)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }
}
