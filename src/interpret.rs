use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

/// Parses raw model output as JSON, then validates it into `T`.
///
/// Syntax failures yield [`Error::Decode`] carrying the raw text; shape
/// failures yield [`Error::Schema`]. Nothing partial is ever returned.
pub fn interpret<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = serde_json::from_str::<Value>(raw).map_err(|source| {
        error!("Model response was not valid JSON");
        Error::Decode {
            raw: String::from(raw),
            source,
        }
    })?;
    serde_json::from_value::<T>(value).map_err(|e| {
        error!("Model JSON did not match schema: {}", e);
        Error::Schema(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EventSummary;

    #[test]
    fn valid_document() {
        let raw = r#"{"title": "Meetup", "location": null, "talks": [{"topic": "AI", "speaker": {"name": "A", "organization": null, "email": null}, "start_time": "5:30"}], "published_at": null}"#;
        let summary = interpret::<EventSummary>(raw).unwrap();
        assert_eq!(summary.title, "Meetup");
        assert_eq!(summary.talks[0].speaker.name, "A");
        assert_eq!(summary.talks[0].start_time.as_deref(), Some("5:30"));
    }

    #[test]
    fn invalid_json_is_a_decode_error_with_raw_text() {
        let err = interpret::<EventSummary>("not json").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("not json"));
    }

    #[test]
    fn empty_text_is_a_decode_error() {
        let err = interpret::<EventSummary>("").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn missing_title_is_a_schema_error() {
        let err = interpret::<EventSummary>(r#"{"location": "X", "talks": [], "published_at": null}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn nested_failure_fails_the_whole_document() {
        let raw = r#"{"title": "Meetup", "talks": [{"topic": "AI", "speaker": {"organization": "BioSense"}}]}"#;
        let err = interpret::<EventSummary>(raw).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn wrong_type_is_not_coerced() {
        let err = interpret::<EventSummary>(r#"{"title": 2024, "talks": []}"#).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));

        let err = interpret::<EventSummary>(r#"{"title": "Meetup", "talks": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn strings_are_kept_as_written() {
        let summary =
            interpret::<EventSummary>(r#"{"title": "  Meetup ", "talks": [], "published_at": "last Tuesday"}"#)
                .unwrap();
        assert_eq!(summary.title, "  Meetup ");
        assert_eq!(summary.published_at.as_deref(), Some("last Tuesday"));
    }
}
