//! Page discovery and parsing for announcement sites.
//!
//! The index page lists announcements; each announcement page holds a title,
//! a publication date and a content block with links. Parsing is synchronous
//! so parsed documents never cross an await point.

pub mod article;
pub mod index;
pub mod layout;

pub use article::parse_article;
pub use index::article_links;
pub use layout::SiteLayout;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("no article container on {0}")]
    MissingArticle(url::Url),
}
