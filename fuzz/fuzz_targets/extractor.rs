#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use avizier::crawler::{SiteLayout, parse_article};
use avizier::extractor::{Announcement, PublicationAssembler};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let url = Url::parse("http://mts.ro/noutati/fuzz/").unwrap();
    let assembler = PublicationAssembler::default();

    // Parsing and assembly should never panic regardless of input
    if let Ok(announcement) = parse_article(&html, &url, &SiteLayout::default()) {
        let _ = assembler.assemble(&announcement);
    }

    let _ = assembler.assemble(&Announcement {
        url,
        title: html.to_string(),
        date: html.to_string(),
        body: html.to_string(),
        links: Vec::new(),
    });
});
