/// Merge a letter-spaced leading word back together.
///
/// Some sources render the first word of a title with a space between every
/// letter ("H O T Ă R Â R E privind ..."). All single-character tokens before
/// the first multi-character token are concatenated; the rest of the title is
/// re-joined with single spaces. A title made only of single characters
/// collapses into one word.
pub fn clean_title(text: &str) -> String {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let idx = parts
        .iter()
        .position(|part| part.chars().count() > 1)
        .unwrap_or(parts.len());

    let head = parts[..idx].concat();
    let tail = parts[idx..].join(" ");

    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail,
        (false, true) => head,
        (false, false) => format!("{head} {tail}"),
    }
}
