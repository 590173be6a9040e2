use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

use crate::extractor::{
    classify::classify_title,
    contact::extract_contacts,
    dates::parse_publication_date,
    diacritics::strip_diacritics_strict,
    documents::filter_documents,
    feedback::{FeedbackDeadline, extract_feedback},
    model::{Announcement, Publication},
    title::clean_title,
};

pub const DEFAULT_INSTITUTION: &str = "tineret";
pub const DEFAULT_SLUG_MAX_LEN: usize = 128;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// How a publication's storage key is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierMode {
    /// The announcement page URL.
    SourceUrl,
    /// A slug of the cleaned title, at most `max_len` bytes.
    TitleSlug { max_len: usize },
}

/// Which fields get extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Full,
    /// Everything except the feedback deadline.
    Reduced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub institution: String,
    pub identifier: IdentifierMode,
    pub fields: ExtractionMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            institution: DEFAULT_INSTITUTION.to_string(),
            identifier: IdentifierMode::SourceUrl,
            fields: ExtractionMode::Full,
        }
    }
}

/// Turns one announcement into one publication. Holds no per-run state, so
/// a single instance can be shared across workers.
#[derive(Debug, Clone, Default)]
pub struct PublicationAssembler {
    config: PipelineConfig,
}

impl PublicationAssembler {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[instrument(skip_all, fields(url = %announcement.url))]
    pub fn assemble(&self, announcement: &Announcement) -> Publication {
        let title = clean_title(&announcement.title);
        let kind = classify_title(&title);

        let date = parse_publication_date(&announcement.date);
        if date.is_none() {
            warn!(raw = %announcement.date.trim(), "unrecognized publication date");
        }

        let description = announcement.body.trim().to_string();
        // matching text only: non-breaking spaces and dashes become ASCII
        let normalized = strip_diacritics_strict(&description).to_lowercase();

        let feedback = match self.config.fields {
            ExtractionMode::Full => extract_feedback(&normalized, date),
            ExtractionMode::Reduced => FeedbackDeadline::default(),
        };

        let contact = extract_contacts(&normalized);
        let documents: Vec<_> = filter_documents(&announcement.links, &announcement.url).collect();

        let identifier = match self.config.identifier {
            IdentifierMode::SourceUrl => announcement.url.to_string(),
            IdentifierMode::TitleSlug { max_len } => {
                let slug = slugify(&title, max_len);
                if slug.is_empty() {
                    warn!(title = %title, "title yields an empty slug, identifier will collide");
                }
                slug
            }
        };

        debug!(
            %identifier,
            %kind,
            documents = documents.len(),
            feedback_days = ?feedback.days,
            "assembled publication"
        );

        Publication {
            institution: self.config.institution.clone(),
            identifier,
            kind,
            date,
            title,
            description,
            documents,
            contact,
            feedback_days: feedback.days,
            max_feedback_date: feedback.date,
        }
    }
}

/// Key-safe form of a title: ASCII, lower-case, words joined by `-`.
pub fn slugify(text: &str, max_len: usize) -> String {
    let ascii = strip_diacritics_strict(text).to_lowercase();
    let slug = NON_WORD.replace_all(&ascii, "-");
    let slug = slug.trim_matches('-');
    // deunicode output is ASCII, so byte slicing stays on char boundaries
    let cut = &slug[..slug.len().min(max_len)];
    cut.trim_end_matches('-').to_string()
}
