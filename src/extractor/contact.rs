use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::model::ContactInfo;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,6}").unwrap()
});

/// A channel keyword, up to ten non-digits, then a 10 to 13 character run of
/// digits optionally separated by spaces or dots.
static PHONE_OR_FAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(fax|telefon|tel)[^\d]{1,10}(\d[\d .]{8,11}\d)").unwrap());

/// Collect e-mail addresses and phone/fax numbers from body text.
///
/// No case folding happens here: callers wanting case-insensitive e-mail
/// uniqueness pass lower-cased text. `telefon` and `tel` are kept as
/// separate channels, as written in the source.
pub fn extract_contacts(text: &str) -> ContactInfo {
    let mut contact = ContactInfo::new();

    for email in EMAIL.find_iter(text) {
        contact.insert(ContactInfo::EMAIL, email.as_str());
    }

    for caps in PHONE_OR_FAX.captures_iter(text) {
        let number: String = caps[2]
            .chars()
            .filter(|c| !matches!(c, ' ' | '.'))
            .collect();
        contact.insert(&caps[1], number);
    }

    contact
}
