use scraper::Selector;

use crate::crawler::CrawlError;

/// CSS selectors locating announcement parts on a site.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    /// Container of one announcement, both on the index and on article pages.
    pub article: Selector,
    pub title: Selector,
    pub date: Selector,
    pub content: Selector,
    pub link: Selector,
}

impl SiteLayout {
    pub fn new(article: &str, title: &str, date: &str, content: &str) -> Result<Self, CrawlError> {
        Ok(Self {
            article: compile(article)?,
            title: compile(title)?,
            date: compile(date)?,
            content: compile(content)?,
            link: compile("a[href]")?,
        })
    }
}

impl Default for SiteLayout {
    /// Layout of mts.ro (Ministerul Tineretului și Sportului).
    fn default() -> Self {
        Self::new(
            "div.main > div.article",
            "h3.article-title",
            "span.date",
            "div.article-content",
        )
        .expect("built-in selectors are valid")
    }
}

fn compile(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
