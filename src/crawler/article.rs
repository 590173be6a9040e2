use scraper::{ElementRef, Html};
use url::Url;

use crate::crawler::{CrawlError, SiteLayout};
use crate::extractor::{Announcement, RawLink};

/// Pull the raw announcement fields out of an article page.
///
/// Missing title, date or content become empty strings; only a page with no
/// article container at all is rejected.
pub fn parse_article(html: &str, url: &Url, layout: &SiteLayout) -> Result<Announcement, CrawlError> {
    let document = Html::parse_document(html);
    let article = document
        .select(&layout.article)
        .next()
        .ok_or_else(|| CrawlError::MissingArticle(url.clone()))?;

    let content = article.select(&layout.content).next();
    let links = content
        .map(|content| {
            content
                .select(&layout.link)
                .filter_map(|anchor| {
                    let href = anchor.value().attr("href")?;
                    Some(RawLink::new(text_of(anchor), href))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Announcement {
        url: url.clone(),
        title: first_text(article, &layout.title),
        date: first_text(article, &layout.date),
        body: content.map(text_of).unwrap_or_default(),
        links,
    })
}

fn first_text(scope: ElementRef<'_>, selector: &scraper::Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(text_of)
        .unwrap_or_default()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
