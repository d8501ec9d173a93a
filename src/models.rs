//! Domain model that mirrors the persisted JSON document and gets passed
//! throughout the TUI. The type stays a light-weight data holder so the other
//! layers can focus on presentation and persistence logic.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One store entry. Every field is stored as free-form text; latitude and
/// longitude are deliberately not parsed as numbers because the document
/// format keeps them as strings.
pub struct Record {
    /// Store name. Required; the store layer rejects a blank value.
    pub name: String,
    /// Region the store operates in. Required alongside the name.
    pub region: String,
    pub lat: String,
    pub lng: String,
    pub address: String,
    /// Open-chat contact URL. Kept as raw text so non-web references survive.
    pub open_chat_url: String,
    pub phone_number: String,
}

impl Record {
    /// Compose the `name / region` line shown in the record list.
    pub fn display_line(&self) -> String {
        format!("{} / {}", self.name, self.region)
    }

    /// Whether `keyword` occurs in the name or the region. The match is a
    /// case-sensitive substring check with no normalization, so the filtered
    /// view is deterministic for any store contents.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.region.contains(keyword)
    }
}

impl fmt::Display for Record {
    /// Write the list line to any formatter so the type plays nicely with
    /// Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_line())
    }
}

#[cfg(test)]
mod tests {
    use super::Record;

    fn sample() -> Record {
        Record {
            name: "Alpha".to_string(),
            region: "Seoul".to_string(),
            lat: "37.56".to_string(),
            lng: "126.97".to_string(),
            address: "1 Example-ro".to_string(),
            open_chat_url: "https://open.kakao.com/o/alpha".to_string(),
            phone_number: "02-555-0100".to_string(),
        }
    }

    #[test]
    fn keyword_matches_name_and_region_substrings() {
        let record = sample();
        assert!(record.matches_keyword("Alp"));
        assert!(record.matches_keyword("Seo"));
        assert!(!record.matches_keyword("Busan"));
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let record = sample();
        assert!(!record.matches_keyword("alpha"));
        assert!(!record.matches_keyword("SEOUL"));
    }

    #[test]
    fn display_line_joins_name_and_region() {
        assert_eq!(sample().display_line(), "Alpha / Seoul");
    }

    #[test]
    fn serialized_field_names_follow_the_document_format() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"openChatUrl\""));
        assert!(json.contains("\"phoneNumber\""));
        assert!(json.contains("\"lat\""));
    }
}
