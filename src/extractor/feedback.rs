//! Public-feedback deadline extraction.
//!
//! Announcements state the deadline in one of a few loose shapes:
//!
//! - `data limita pentru primirea de propuneri/observatii (10 zile de la publicare): 07 aprilie 2017`
//! - `data limita pentru primirea de propuneri/opinii/sugestii : 26.09.2016`
//! - `perioada consultare publica: 17.12.2014 – 31.01.2015`
//! - `... sa le transmiteti in termen de 20 zile`
//!
//! What the text states is captured as a [`FeedbackObservation`]; the missing
//! half is then derived from the publication date by [`FeedbackObservation::reconcile`].

use chrono::{Days, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::extractor::dates::parse_deadline_date;

static DEADLINE_PHRASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"data limita.*").unwrap());

static PERIOD_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"perioada (?:de )?consultare publica.*").unwrap());

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\d?\.\d\d?\.20\d\d|\d\d?\s[a-z]+\s20\d\d").unwrap());

static DAYS_FROM_PUBLICATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(\d+)\s+(?:de\s+)?zile[^)]*de la publicare\)").unwrap()
});

static DAYS_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"in termen de (\d+)\s+(?:de\s+)?zile").unwrap());

/// Deadline as it ends up on a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackDeadline {
    pub days: Option<u32>,
    pub date: Option<NaiveDate>,
}

/// What the announcement text itself says about the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackObservation {
    Neither,
    DaysOnly(u32),
    DateOnly(NaiveDate),
    Both { days: u32, date: NaiveDate },
}

impl FeedbackObservation {
    pub fn from_parts(days: Option<u32>, date: Option<NaiveDate>) -> Self {
        match (days, date) {
            (None, None) => Self::Neither,
            (Some(days), None) => Self::DaysOnly(days),
            (None, Some(date)) => Self::DateOnly(date),
            (Some(days), Some(date)) => Self::Both { days, date },
        }
    }

    /// Derive the unobserved half from the publication date.
    ///
    /// Values observed together are kept as they are, even if they disagree.
    /// A deadline before the publication date yields no day count.
    pub fn reconcile(self, published: Option<NaiveDate>) -> FeedbackDeadline {
        match self {
            Self::Neither => FeedbackDeadline::default(),
            Self::DaysOnly(days) => FeedbackDeadline {
                days: Some(days),
                date: published.and_then(|p| p.checked_add_days(Days::new(days.into()))),
            },
            Self::DateOnly(date) => FeedbackDeadline {
                days: published
                    .and_then(|p| u32::try_from(date.signed_duration_since(p).num_days()).ok()),
                date: Some(date),
            },
            Self::Both { days, date } => FeedbackDeadline {
                days: Some(days),
                date: Some(date),
            },
        }
    }
}

/// Find the feedback deadline in diacritics-free, lower-cased body text.
pub fn extract_feedback(text: &str, published: Option<NaiveDate>) -> FeedbackDeadline {
    let observation = observe(text);
    debug!(?observation, "feedback deadline observed");
    observation.reconcile(published)
}

/// Scan the text, preferring an explicit "data limita" phrase, then a
/// consultation period, then an "in termen de N zile" clause.
pub fn observe(text: &str) -> FeedbackObservation {
    let (mut days, mut date) = (None, None);

    if let Some(phrase) = DEADLINE_PHRASE.find(text) {
        let phrase = phrase.as_str();
        date = DATE_TOKEN
            .find_iter(phrase)
            .find_map(|token| parse_deadline_date(token.as_str()));
        days = DAYS_FROM_PUBLICATION
            .captures(phrase)
            .and_then(|caps| caps[1].parse().ok());
    }

    if days.is_none() && date.is_none() {
        // periods are ranges; the end date is the deadline
        if let Some(phrase) = PERIOD_PHRASE.find(text) {
            date = DATE_TOKEN
                .find_iter(phrase.as_str())
                .filter_map(|token| parse_deadline_date(token.as_str()))
                .last();
        }
    }

    if days.is_none() && date.is_none() {
        days = DAYS_TERM
            .captures(text)
            .and_then(|caps| caps[1].parse().ok());
    }

    FeedbackObservation::from_parts(days, date)
}
