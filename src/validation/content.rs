use log::debug;
use scraper::{Html, Node};
use std::time::Duration;

use super::PageFetcher;

/// Elements whose text never renders on the page
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract the visible text of an HTML document, whitespace collapsed
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

/// Case-insensitive substring test of a school name against page text
pub fn contains_school_name(page_text: &str, school_name: &str) -> bool {
    page_text
        .to_lowercase()
        .contains(&school_name.to_lowercase())
}

/// The content gate: fetch a school's page and look for its name.
///
/// Every fetch is preceded by a fixed delay. This is a blunt throttle, it
/// does not adapt to the remote host.
pub struct ContentChecker<F> {
    fetcher: F,
    delay: Duration,
    fetches: usize,
}

impl<F: PageFetcher> ContentChecker<F> {
    pub fn new(fetcher: F, delay: Duration) -> Self {
        Self {
            fetcher,
            delay,
            fetches: 0,
        }
    }

    /// Number of fetches attempted so far
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// True when the page at `url` shows `school_name`; fetch errors count as false
    pub async fn fetch_and_contains(&mut self, school_name: &str, url: &str) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.fetches += 1;

        match self.fetcher.fetch(url).await {
            Ok(body) => contains_school_name(&extract_visible_text(&body), school_name),
            Err(e) => {
                debug!("Fetch failed for {}: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FetchError;

    struct StaticPage(&'static str);

    impl PageFetcher for StaticPage {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    struct TimesOut;

    impl PageFetcher for TimesOut {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Timeout)
        }
    }

    #[test]
    fn test_extract_visible_text_skips_scripts_and_styles() {
        let html = r#"<html><head><title>Lincoln</title>
            <style>.x { color: red }</style>
            <script>var school = "Hidden Academy";</script></head>
            <body><h1>Welcome to
                Lincoln High School</h1><noscript>Enable JS</noscript></body></html>"#;

        let text = extract_visible_text(html);
        assert_eq!(text, "Lincoln Welcome to Lincoln High School");
        assert!(!text.contains("Hidden Academy"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_extract_visible_text_plain_body() {
        assert_eq!(extract_visible_text("just some text"), "just some text");
        assert_eq!(extract_visible_text(""), "");
    }

    #[test]
    fn test_contains_school_name_ignores_case() {
        assert!(contains_school_name("Welcome to LINCOLN high School", "Lincoln High"));
        assert!(!contains_school_name("Welcome to Lincoln Middle", "Lincoln High"));
    }

    #[test]
    fn test_markup_between_words_still_matches() {
        let text = extract_visible_text("<p>Lincoln <b>High</b></p>");
        assert!(contains_school_name(&text, "lincoln high"));
    }

    #[tokio::test]
    async fn test_fetch_and_contains_match() {
        let mut checker = ContentChecker::new(
            StaticPage("<body>Welcome to Lincoln High School</body>"),
            Duration::ZERO,
        );
        assert!(checker.fetch_and_contains("Lincoln High", "http://lincolnhigh.edu").await);
        assert!(!checker.fetch_and_contains("Roosevelt Prep", "http://lincolnhigh.edu").await);
        assert_eq!(checker.fetches(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_counts_as_not_found() {
        let mut checker = ContentChecker::new(TimesOut, Duration::ZERO);
        assert!(!checker.fetch_and_contains("Lincoln High", "http://lincolnhigh.edu").await);
        assert_eq!(checker.fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_precedes_every_fetch() {
        let mut checker = ContentChecker::new(StaticPage("Lincoln High"), Duration::from_secs(15));
        let start = tokio::time::Instant::now();

        checker.fetch_and_contains("Lincoln High", "http://a").await;
        checker.fetch_and_contains("Lincoln High", "http://b").await;

        assert!(start.elapsed() >= Duration::from_secs(30));
    }
}
