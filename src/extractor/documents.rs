use url::Url;

use crate::extractor::model::{DocumentLink, RawLink};

/// File extensions worth keeping as attached documents. `.docs` is a typo
/// that shows up in published links.
pub const DOC_EXTENSIONS: &[&str] = &[
    ".docs", ".doc", ".txt", ".crt", ".xls", ".xml", ".pdf", ".docx", ".xlsx",
];

/// Resolve links against `base` and keep those pointing at documents.
pub fn filter_documents<'a>(
    links: &'a [RawLink],
    base: &'a Url,
) -> impl Iterator<Item = DocumentLink> + 'a {
    links.iter().filter_map(move |link| {
        let url = base.join(link.href.trim()).ok()?;
        is_document(&url).then(|| DocumentLink {
            kind: link.text.trim().to_string(),
            url,
        })
    })
}

/// Whether the URL path carries a whitelisted extension. Query and fragment
/// are ignored.
pub fn is_document(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://mts.ro/noutati/anunt/").unwrap()
    }

    #[test]
    fn test_keeps_only_documents() {
        let links = vec![
            RawLink::new("Raport", "/files/report.pdf"),
            RawLink::new("Pagina", "/files/page.html"),
        ];
        let base = base();
        let docs: Vec<_> = filter_documents(&links, &base).collect();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].kind, "Raport");
        assert_eq!(docs[0].url.as_str(), "http://mts.ro/files/report.pdf");
    }

    #[test]
    fn test_resolves_relative_and_keeps_absolute() {
        let links = vec![
            RawLink::new("", "proiect.docx"),
            RawLink::new(" Anexa 1 ", "https://cdn.mts.ro/anexa.XLSX"),
        ];
        let base = base();
        let docs: Vec<_> = filter_documents(&links, &base).collect();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].url.as_str(), "http://mts.ro/noutati/anunt/proiect.docx");
        assert_eq!(docs[0].kind, "");
        assert_eq!(docs[1].kind, "Anexa 1");
    }

    #[test]
    fn test_ignores_query_and_bad_hrefs() {
        let links = vec![
            RawLink::new("download", "/get?file=a.pdf"),
            RawLink::new("nota", "/nota.pdf?v=2"),
            RawLink::new("rupt", "http://[::1"),
            RawLink::new("legacy", "/vechi/propunere.docs"),
        ];
        let base = base();
        let urls: Vec<_> = filter_documents(&links, &base)
            .map(|doc| doc.url.to_string())
            .collect();
        assert_eq!(
            urls,
            vec!["http://mts.ro/nota.pdf?v=2", "http://mts.ro/vechi/propunere.docs"]
        );
    }
}
