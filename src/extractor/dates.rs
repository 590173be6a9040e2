use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static PUBLICATION_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").unwrap());

const MONTHS: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

/// Parse a publication date written as `DD.MM.YYYY`.
pub fn parse_publication_date(text: &str) -> Option<NaiveDate> {
    let caps = PUBLICATION_DATE.captures(text.trim())?;
    NaiveDate::from_ymd_opt(
        caps[3].parse().ok()?,
        caps[2].parse().ok()?,
        caps[1].parse().ok()?,
    )
}

/// Parse a deadline token, either `7 aprilie 2017` or `7.4.2017`.
///
/// The token is expected to be diacritics-free and lower-cased already.
pub fn parse_deadline_date(token: &str) -> Option<NaiveDate> {
    parse_month_name_date(token).or_else(|| parse_dotted_date(token))
}

fn parse_month_name_date(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let month = MONTHS.iter().position(|name| *name == month)? as u32 + 1;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

fn parse_dotted_date(token: &str) -> Option<NaiveDate> {
    let mut parts = token.trim().split('.');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || year.len() != 4 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
