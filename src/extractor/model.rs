use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use url::Url;

/// One announcement as handed over by the crawler.
#[derive(Debug, Clone)]
pub struct Announcement {
    /// Page URL. Identifier in URL mode and base for relative links.
    pub url: Url,
    pub title: String,
    pub date: String,
    pub body: String,
    pub links: Vec<RawLink>,
}

/// A hyperlink found in the announcement body, unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub text: String,
    pub href: String,
}

impl RawLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Legal instrument category inferred from the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    #[serde(rename = "LEGE")]
    Lege,
    #[serde(rename = "HG")]
    Hg,
    #[serde(rename = "OG")]
    Og,
    #[serde(rename = "OUG")]
    Oug,
    #[serde(rename = "OM")]
    Om,
    #[serde(rename = "OTHER")]
    Other,
}

impl InstrumentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Lege => "LEGE",
            Self::Hg => "HG",
            Self::Og => "OG",
            Self::Oug => "OUG",
            Self::Om => "OM",
            Self::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [Self::Lege, Self::Hg, Self::Og, Self::Oug, Self::Om, Self::Other]
            .into_iter()
            .find(|kind| kind.code() == code)
    }
}

impl Display for InstrumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    /// Link label, possibly empty.
    #[serde(rename = "type")]
    pub kind: String,
    pub url: Url,
}

/// Contact channels found in an announcement, keyed by the keyword that
/// introduced them (`email`, `fax`, `telefon`, `tel`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo(BTreeMap<String, BTreeSet<String>>);

impl ContactInfo {
    pub const EMAIL: &'static str = "email";

    pub fn new() -> Self {
        let mut channels = BTreeMap::new();
        channels.insert(Self::EMAIL.to_string(), BTreeSet::new());
        Self(channels)
    }

    pub fn insert(&mut self, channel: &str, value: impl Into<String>) {
        self.0
            .entry(channel.to_string())
            .or_default()
            .insert(value.into());
    }

    pub fn get(&self, channel: &str) -> Option<&BTreeSet<String>> {
        self.0.get(channel)
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.0
            .get(Self::EMAIL)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Values of a channel rendered the way they are stored: comma-joined.
    pub fn joined(&self, channel: &str) -> Option<String> {
        self.0
            .get(channel)
            .map(|values| values.iter().cloned().collect::<Vec<_>>().join(","))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ContactInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(channel, values)| (channel, values.iter().cloned().collect::<Vec<_>>().join(","))),
        )
    }
}

impl<'de> Deserialize<'de> for ContactInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let joined = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut contact = ContactInfo::new();
        for (channel, values) in joined {
            let set = contact.0.entry(channel).or_default();
            set.extend(
                values
                    .split(',')
                    .filter(|value| !value.is_empty())
                    .map(str::to_string),
            );
        }
        Ok(contact)
    }
}

/// The structured record produced for one announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub institution: String,
    pub identifier: String,
    #[serde(rename = "type")]
    pub kind: InstrumentType,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub description: String,
    pub documents: Vec<DocumentLink>,
    pub contact: ContactInfo,
    pub feedback_days: Option<u32>,
    pub max_feedback_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_serializes_comma_joined() {
        let mut contact = ContactInfo::new();
        contact.insert("tel", "0211234567");
        contact.insert("tel", "0217654321");
        contact.insert(ContactInfo::EMAIL, "a@b.ro");

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "a@b.ro", "tel": "0211234567,0217654321"})
        );

        let back: ContactInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, contact);
    }

    #[test]
    fn test_empty_contact_keeps_email_channel() {
        let contact = ContactInfo::new();
        assert!(contact.is_empty());
        assert_eq!(contact.joined(ContactInfo::EMAIL).as_deref(), Some(""));
        assert_eq!(serde_json::to_string(&contact).unwrap(), r#"{"email":""}"#);
    }

    #[test]
    fn test_instrument_type_codes() {
        assert_eq!(serde_json::to_string(&InstrumentType::Oug).unwrap(), r#""OUG""#);
        assert_eq!(InstrumentType::Other.to_string(), "OTHER");
        assert_eq!(InstrumentType::from_code("OM"), Some(InstrumentType::Om));
        assert_eq!(InstrumentType::from_code("om"), None);
    }
}
