use chrono::NaiveDate;
use url::Url;

use crate::extractor::{
    Announcement, ExtractionMode, IdentifierMode, InstrumentType, PipelineConfig,
    PublicationAssembler, RawLink,
};

const BODY: &str = "Ministerul Tineretului și Sportului supune dezbaterii publice proiectul de Hotărâre.
Data limită pentru primirea de propuneri/observaţii (10 zile de la publicare): 17 aprilie 2017
Propunerile se transmit la adresa Dezbatere@MTS.ro, telefon: 021 307 22 30, fax: 021.307.22.31.";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn announcement() -> Announcement {
    Announcement {
        url: Url::parse("http://mts.ro/noutati/proiect-hg-cluburi/").unwrap(),
        title: "H O T Ă R Â R E privind organizarea cluburilor sportive".to_string(),
        date: "07.04.2017".to_string(),
        body: format!("  {BODY}\n"),
        links: vec![
            RawLink::new("Proiect HG", "/wp-content/uploads/2017/04/proiect.pdf"),
            RawLink::new("Nota de fundamentare", "nota.docx"),
            RawLink::new("Alte noutati", "/noutati/"),
        ],
    }
}

#[test]
fn test_assemble_full_record() {
    let publication = PublicationAssembler::default().assemble(&announcement());

    assert_eq!(publication.institution, "tineret");
    assert_eq!(publication.identifier, "http://mts.ro/noutati/proiect-hg-cluburi/");
    assert_eq!(publication.kind, InstrumentType::Hg);
    assert_eq!(publication.date, Some(ymd(2017, 4, 7)));
    assert_eq!(
        publication.title,
        "HOTĂRÂRE privind organizarea cluburilor sportive"
    );
    // description keeps diacritics, only trimmed
    assert_eq!(publication.description, BODY);

    // both observed in the text, so neither is recomputed
    assert_eq!(publication.feedback_days, Some(10));
    assert_eq!(publication.max_feedback_date, Some(ymd(2017, 4, 17)));

    assert_eq!(
        publication.contact.emails().collect::<Vec<_>>(),
        vec!["dezbatere@mts.ro"]
    );
    assert_eq!(publication.contact.joined("telefon").as_deref(), Some("0213072230"));
    assert_eq!(publication.contact.joined("fax").as_deref(), Some("0213072231"));

    let urls: Vec<_> = publication.documents.iter().map(|d| d.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "http://mts.ro/wp-content/uploads/2017/04/proiect.pdf",
            "http://mts.ro/noutati/proiect-hg-cluburi/nota.docx",
        ]
    );
}

#[test]
fn test_feedback_days_derived_from_publication_date() {
    let mut input = announcement();
    input.date = "01.01.2017".to_string();
    input.body = "data limita de transmitere (10 zile de la publicare)".to_string();

    let publication = PublicationAssembler::default().assemble(&input);
    assert_eq!(publication.feedback_days, Some(10));
    assert_eq!(publication.max_feedback_date, Some(ymd(2017, 1, 11)));
}

#[test]
fn test_deadline_with_non_breaking_spaces() {
    let mut input = announcement();
    input.date = "26.09.2016".to_string();
    input.body = "Data\u{a0}limită pentru primirea de propuneri: 06.10.2016\n\
                  Perioada\u{a0}consultare publică: 26.09.2016 – 06.10.2016"
        .to_string();

    let publication = PublicationAssembler::default().assemble(&input);
    assert_eq!(publication.max_feedback_date, Some(ymd(2016, 10, 6)));
    assert_eq!(publication.feedback_days, Some(10));
    // description is the page text as published
    assert!(publication.description.contains('\u{a0}'));
}

#[test]
fn test_period_with_non_breaking_space_only() {
    let mut input = announcement();
    input.date = "17.12.2014".to_string();
    input.body = "Perioada\u{a0}consultare\u{a0}publică: 17.12.2014\u{a0}–\u{a0}31.01.2015".to_string();

    let publication = PublicationAssembler::default().assemble(&input);
    assert_eq!(publication.max_feedback_date, Some(ymd(2015, 1, 31)));
    assert_eq!(publication.feedback_days, Some(45));
}

#[test]
fn test_punctuation_title_gives_empty_slug() {
    let assembler = PublicationAssembler::new(PipelineConfig {
        identifier: IdentifierMode::TitleSlug { max_len: 128 },
        ..PipelineConfig::default()
    });
    let mut input = announcement();
    input.title = " – … ".to_string();

    let publication = assembler.assemble(&input);
    assert_eq!(publication.identifier, "");
}

#[test]
fn test_bad_date_yields_partial_record() {
    let mut input = announcement();
    input.date = "2017-04-07".to_string();
    input.body = "Data limită: 17.04.2017".to_string();

    let publication = PublicationAssembler::default().assemble(&input);
    assert_eq!(publication.date, None);
    assert_eq!(publication.max_feedback_date, Some(ymd(2017, 4, 17)));
    assert_eq!(publication.feedback_days, None);
    assert_eq!(publication.kind, InstrumentType::Hg);
}

#[test]
fn test_empty_announcement_degrades_gracefully() {
    let input = Announcement {
        url: Url::parse("http://mts.ro/noutati/gol/").unwrap(),
        title: String::new(),
        date: String::new(),
        body: String::new(),
        links: Vec::new(),
    };

    let publication = PublicationAssembler::default().assemble(&input);
    assert_eq!(publication.kind, InstrumentType::Other);
    assert_eq!(publication.title, "");
    assert_eq!(publication.date, None);
    assert!(publication.documents.is_empty());
    assert!(publication.contact.is_empty());
    assert_eq!(publication.feedback_days, None);
    assert_eq!(publication.max_feedback_date, None);
}

#[test]
fn test_reduced_mode_with_slug_identifier() {
    let assembler = PublicationAssembler::new(PipelineConfig {
        institution: "sport".to_string(),
        identifier: IdentifierMode::TitleSlug { max_len: 40 },
        fields: ExtractionMode::Reduced,
    });

    let publication = assembler.assemble(&announcement());
    assert_eq!(publication.institution, "sport");
    assert_eq!(publication.identifier, "hotarare-privind-organizarea-cluburilor");
    assert_eq!(publication.feedback_days, None);
    assert_eq!(publication.max_feedback_date, None);
    // contacts and documents are still extracted
    assert_eq!(publication.contact.joined("fax").as_deref(), Some("0213072231"));
    assert_eq!(publication.documents.len(), 2);
}

#[test]
fn test_same_announcement_same_identifier() {
    let assembler = PublicationAssembler::default();
    let first = assembler.assemble(&announcement());
    let second = assembler.assemble(&announcement());
    assert_eq!(first.identifier, second.identifier);
    assert_eq!(first, second);

    let slugger = PublicationAssembler::new(PipelineConfig {
        identifier: IdentifierMode::TitleSlug { max_len: 128 },
        ..PipelineConfig::default()
    });
    assert_eq!(
        slugger.assemble(&announcement()).identifier,
        slugger.assemble(&announcement()).identifier
    );
}

#[test]
fn test_serialized_shape() {
    let publication = PublicationAssembler::default().assemble(&announcement());
    let json = serde_json::to_value(&publication).unwrap();

    assert_eq!(json["type"], "HG");
    assert_eq!(json["date"], "2017-04-07");
    assert_eq!(json["max_feedback_date"], "2017-04-17");
    assert_eq!(json["contact"]["email"], "dezbatere@mts.ro");
    assert_eq!(json["documents"][0]["type"], "Proiect HG");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_assemble_never_panics(
            title in ".*",
            date in ".*",
            body in ".*",
            href in ".*",
        ) {
            let input = Announcement {
                url: Url::parse("http://mts.ro/noutati/x/").unwrap(),
                title,
                date,
                body,
                links: vec![RawLink::new("doc", href)],
            };
            let publication = PublicationAssembler::default().assemble(&input);
            prop_assert!(publication.documents.iter().all(|doc| crate::extractor::documents::is_document(&doc.url)));
        }

        #[test]
        fn test_derived_deadline_matches_day_count(
            days in 0u32..400,
            day in 1u32..28,
            month in 1u32..12,
        ) {
            let input = Announcement {
                url: Url::parse("http://mts.ro/noutati/x/").unwrap(),
                title: "Lege privind x".to_string(),
                date: format!("{day:02}.{month:02}.2016"),
                body: format!("Data limită ({days} zile de la publicare)"),
                links: Vec::new(),
            };
            let publication = PublicationAssembler::default().assemble(&input);
            let published = publication.date.unwrap();
            prop_assert_eq!(publication.feedback_days, Some(days));
            prop_assert_eq!(
                publication.max_feedback_date,
                published.checked_add_days(chrono::Days::new(days.into()))
            );
        }

        #[test]
        fn test_slug_is_key_safe(title in ".*", max_len in 1usize..200) {
            let slug = crate::extractor::slugify(&title, max_len);
            prop_assert!(slug.len() <= max_len);
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
