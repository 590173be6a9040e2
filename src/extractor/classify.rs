use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::diacritics::strip_diacritics;
use crate::extractor::model::InstrumentType;

/// Search phrase → instrument type, tested in order. Some phrases are
/// substrings of later ones' targets ("hotarare" vs "hotarare de guvern"),
/// so the more specific rule must come first.
pub const TYPE_RULES: &[(&str, InstrumentType)] = &[
    ("lege", InstrumentType::Lege),
    ("hotarare de guvern", InstrumentType::Hg),
    ("hotarare a guvernului", InstrumentType::Hg),
    ("hotarare", InstrumentType::Hg),
    ("hg", InstrumentType::Hg),
    ("ordonanta de guvern", InstrumentType::Og),
    ("ordonanta de urgenta", InstrumentType::Oug),
    ("ordin de ministru", InstrumentType::Om),
    ("ordinul", InstrumentType::Om),
];

/// Marks the end of the instrument phrase and the start of its subject.
static STOP_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"pentru|privind").unwrap());

/// Guess the instrument type from a title.
///
/// Only the part before the first "pentru"/"privind" is considered, so the
/// subject of an act ("... privind modificarea Legii nr. 350/2006") does not
/// leak into its type. Without a stop keyword the whole title is used.
pub fn classify_title(title: &str) -> InstrumentType {
    let lowered = title.trim().to_lowercase();
    let phrase = match STOP_KEYWORD.find(&lowered) {
        Some(stop) => &lowered[..stop.start()],
        None => lowered.as_str(),
    };
    match_rules(&strip_diacritics(phrase), TYPE_RULES)
}

/// First rule whose search phrase occurs in `text`, or `Other`.
pub fn match_rules(text: &str, rules: &[(&str, InstrumentType)]) -> InstrumentType {
    rules
        .iter()
        .find(|(search, _)| text.contains(search))
        .map(|(_, kind)| *kind)
        .unwrap_or(InstrumentType::Other)
}
