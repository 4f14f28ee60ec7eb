//! Wire types for the recommendation endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub text: String,
    pub use_ai: bool,
}

impl RecommendRequest {
    pub fn new(text: impl Into<String>, use_ai: bool) -> Self {
        Self {
            text: text.into(),
            use_ai,
        }
    }
}

/// One recommended assessment, exactly as the server ranked it.
///
/// `score` is the server's relevance in `0..=1`. Optional fields are absent
/// when the catalogue has no value for them; the filter engine never treats
/// an absent field as a wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_testing: Option<String>,
    #[serde(
        default,
        alias = "adaptive/irt_support",
        skip_serializing_if = "Option::is_none"
    )]
    pub adaptive_support: Option<String>,
}

impl ResultItem {
    /// Score as a whole percentage, e.g. `0.873` -> `87`.
    pub fn match_percent(&self) -> u8 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Non-blank insight lines, trimmed.
    pub fn insight_lines(&self) -> Vec<&str> {
        self.ai_insights
            .as_deref()
            .map(|text| {
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_snake_case() {
        let json = serde_json::to_value(RecommendRequest::new("Java Developer", true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "Java Developer", "use_ai": true })
        );
    }

    #[test]
    fn item_accepts_missing_optionals() {
        let item: ResultItem = serde_json::from_str(
            r#"{"name":"Verify","url":"https://x.test/verify","description":"d","score":0.5}"#,
        )
        .unwrap();
        assert_eq!(item.duration, None);
        assert_eq!(item.job_level, None);
        assert_eq!(item.test_type, None);
        assert!(item.languages.is_empty());
    }

    #[test]
    fn item_reads_adaptive_alias() {
        let item: ResultItem = serde_json::from_str(
            r#"{"name":"n","url":"u","description":"","score":1.0,"adaptive/irt_support":"Yes"}"#,
        )
        .unwrap();
        assert_eq!(item.adaptive_support.as_deref(), Some("Yes"));
    }

    #[test]
    fn null_optionals_are_absent() {
        let item: ResultItem = serde_json::from_str(
            r#"{"name":"n","url":"u","description":"","score":0.2,"test_type":null}"#,
        )
        .unwrap();
        assert_eq!(item.test_type, None);
    }

    #[test]
    fn match_percent_rounds_and_clamps() {
        let mut item: ResultItem =
            serde_json::from_str(r#"{"name":"n","url":"u","score":0.876}"#).unwrap();
        assert_eq!(item.match_percent(), 88);
        item.score = 1.7;
        assert_eq!(item.match_percent(), 100);
    }

    #[test]
    fn insight_lines_drop_blanks() {
        let item = ResultItem {
            ai_insights: Some("Measures Java\n\n  Fits senior roles  \n".to_string()),
            ..serde_json::from_str(r#"{"name":"n","url":"u","score":0.1}"#).unwrap()
        };
        assert_eq!(item.insight_lines(), vec!["Measures Java", "Fits senior roles"]);
    }
}
