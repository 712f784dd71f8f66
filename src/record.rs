//! Records describing the event data extracted from an announcement.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Someone giving a talk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeakerContact {
    pub name: String,
    pub organization: Option<String>,
    pub email: Option<String>,
}

/// A single talk within an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TalkDatum {
    pub topic: String,
    pub speaker: SpeakerContact,
    /// Free-form, as written in the announcement.
    pub start_time: Option<String>,
}

/// Everything extracted from one announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EventSummary {
    pub title: String,
    pub location: Option<String>,
    /// Talks in the order the model listed them.
    pub talks: Vec<TalkDatum>,
    pub published_at: Option<String>,
}

/// JSON Schema document for [`EventSummary`].
pub fn event_summary_schema() -> Value {
    serde_json::to_value(schema_for!(EventSummary)).unwrap_or(Value::Null)
}

/// Writes the [`EventSummary`] schema to stdout.
///
/// Callers that want the schema dump invoke this explicitly; nothing is
/// printed when the crate is merely linked.
pub fn print_event_summary_schema() {
    println!("{}", event_summary_schema());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_accept_null_and_absence() {
        let summary: EventSummary = serde_json::from_value(json!({
            "title": "Meetup",
            "location": null,
            "talks": [
                {"topic": "AI", "speaker": {"name": "A"}}
            ]
        }))
        .unwrap();
        assert_eq!(summary.location, None);
        assert_eq!(summary.published_at, None);
        assert_eq!(summary.talks[0].start_time, None);
        assert_eq!(summary.talks[0].speaker.email, None);
    }

    #[test]
    fn reserializing_keeps_required_fields_and_talk_order() {
        let input = json!({
            "title": "2024 Health Tech Meetup",
            "location": "Mission Street Hub",
            "talks": [
                {
                    "topic": "AI in Clinical Trials",
                    "speaker": {"name": "Theresa Lee", "organization": "BioSense", "email": null},
                    "start_time": "5:30"
                },
                {
                    "topic": "Scaling Remote Care",
                    "speaker": {"name": "Samir Gupta", "organization": "HealthFirst", "email": null},
                    "start_time": "6:15"
                }
            ],
            "published_at": null
        });
        let summary: EventSummary = serde_json::from_value(input.clone()).unwrap();
        let output = serde_json::to_value(&summary).unwrap();
        assert_eq!(output, input);

        let topics: Vec<&str> = summary.talks.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(topics, vec!["AI in Clinical Trials", "Scaling Remote Care"]);
    }

    #[test]
    fn schema_lists_required_fields() {
        let schema = event_summary_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("title")));
        assert!(required.contains(&json!("talks")));
        assert!(!required.contains(&json!("location")));
        assert!(schema["definitions"]["TalkDatum"].is_object());
        assert!(schema["definitions"]["SpeakerContact"].is_object());
    }
}
