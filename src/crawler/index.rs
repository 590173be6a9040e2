use scraper::Html;
use std::collections::HashSet;
use url::Url;

use crate::crawler::SiteLayout;

/// Announcement URLs linked from an index page, in page order, without
/// duplicates. Only http(s) links inside article containers are kept.
pub fn article_links(html: &str, base: &Url, layout: &SiteLayout) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for container in document.select(&layout.article) {
        for anchor in container.select(&layout.link) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Ok(mut url) = base.join(href.trim()) else {
                continue;
            };
            if !matches!(url.scheme(), "http" | "https") {
                continue;
            }
            url.set_fragment(None);
            if seen.insert(url.clone()) {
                links.push(url);
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_article_links() {
        let html = std::fs::read_to_string("src/crawler/fixtures/index.html")
            .expect("Failed to read test fixture");
        let base = Url::parse("http://mts.ro/proiecte-legislative-in-dezbatere-publica/").unwrap();

        let links = article_links(&html, &base, &SiteLayout::default());
        let links: Vec<_> = links.iter().map(Url::as_str).collect();

        assert_eq!(
            links,
            vec![
                "http://mts.ro/noutati/proiect-hg-cluburi-sportive/",
                "http://mts.ro/noutati/proiect-lege-tineret/",
            ]
        );
    }

    #[test]
    fn test_no_containers_no_links() {
        let base = Url::parse("http://mts.ro/").unwrap();
        let html = r#"<html><body><a href="/noutati/x/">x</a></body></html>"#;
        assert!(article_links(html, &base, &SiteLayout::default()).is_empty());
    }
}
