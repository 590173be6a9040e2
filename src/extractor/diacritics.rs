use regex::Regex;
use std::sync::LazyLock;

/// Romanian diacritics and their plain counterparts. Both the comma-below
/// and the legacy cedilla forms of s/t are covered. Applied in order.
static DIACRITICS_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("[șş]", "s"),
        ("[ȘŞ]", "S"),
        ("[țţ]", "t"),
        ("[ȚŢ]", "T"),
        ("[ăâ]", "a"),
        ("[ĂÂ]", "A"),
        ("î", "i"),
        ("Î", "I"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Replace Romanian diacritics with their unaccented letters.
///
/// Every other character, accented or not, is left untouched so the result
/// is still fit for display.
pub fn strip_diacritics(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in DIACRITICS_RULES.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }
    }
    result
}

/// Like [`strip_diacritics`], then transliterate whatever non-ASCII is left.
///
/// Only meant for matching and keys (slugs); the output may differ visibly
/// from the input for non-Latin scripts.
pub fn strip_diacritics_strict(text: &str) -> String {
    deunicode::deunicode(&strip_diacritics(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_comma_below_and_cedilla_forms() {
        assert_eq!(strip_diacritics("șşțţ ȘŞȚŢ"), "sstt SSTT");
    }

    #[test]
    fn test_strips_vowels() {
        assert_eq!(
            strip_diacritics("HOTĂRÂRE privind înființarea Învățământului"),
            "HOTARARE privind infiintarea Invatamantului"
        );
    }

    #[test]
    fn test_leaves_other_accents_alone() {
        assert_eq!(strip_diacritics("café ăla"), "café ala");
    }

    #[test]
    fn test_strict_transliterates_leftovers() {
        assert_eq!(strip_diacritics_strict("café ăla"), "cafe ala");
        assert!(strip_diacritics_strict("Ordinul nr. 5.001 – «proiect»").is_ascii());
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Data limită pentru primirea de propuneri/observaţii",
            "Perioada consultare publică: 17.12.2014 – 31.01.2015",
            "",
            "plain ascii",
        ];
        for sample in samples {
            let once = strip_diacritics(sample);
            assert_eq!(strip_diacritics(&once), once);
            let strict = strip_diacritics_strict(sample);
            assert_eq!(strip_diacritics_strict(&strict), strict);
        }
    }
}
