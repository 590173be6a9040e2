use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

/// Only the head of the document is searched for meta declarations.
const SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
    content_type: &str,
) -> PageResponse {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset);

    PageResponse {
        url_final,
        status,
        headers,
        body_raw: body_bytes,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    }
}

/// Header first, then `<meta charset>`, then `<meta http-equiv>`, then a
/// statistical guess biased towards the `.ro` TLD.
fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(encoding) = label_from(regex, &head_str) {
            return Charset::from_encoding(encoding);
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, head.len() == body_bytes.len());
    let guessed = detector.guess(Some(b"ro"), true);
    debug!(encoding = guessed.name(), "charset guessed from content");
    Charset::from_encoding(guessed)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Decoding never fails the fetch: malformed sequences become U+FFFD and
/// the page is still handed to extraction.
fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(encoding = encoding.name(), "page contained malformed byte sequences");
    }

    decoded.into_owned()
}
