use schemars::{schema_for, JsonSchema};
use serde_json::to_string_pretty;

const STRUCTURED_PREAMBLE: &str = "You extract structured data from event announcements. \
Answer using JSON that exactly matches this schema: ";

const UNSTRUCTURED_INSTRUCTION: &str = "You extract event details from announcements. \
Provide the event title, location, each talk's topic, speaker name, organization, and start time, \
along with any publication date you notice.";

/// Announcement used by the demo binaries.
pub const SAMPLE_ANNOUNCEMENT: &str = "Join us this Thursday at the Mission Street Hub for the 2024 Health Tech Meetup! \
Doors open at 5:00 PM. Theresa Lee from BioSense will present 'AI in Clinical Trials' at 5:30, \
followed by Samir Gupta of HealthFirst covering 'Scaling Remote Care' at 6:15. \
RSVP via events@missionhub.org.";

/// Pretty-printed JSON Schema of `T`.
pub fn json_schema_string<T: JsonSchema>() -> String {
    let schema = schema_for!(T);
    // RootSchema only holds maps and strings, so serializing it cannot fail.
    to_string_pretty(&schema).unwrap_or_default()
}

/// System prompt asking for JSON that matches the schema of `T`.
pub fn structured_system_prompt<T: JsonSchema>() -> String {
    format!("{}{}", STRUCTURED_PREAMBLE, json_schema_string::<T>())
}

/// System prompt for free-text extraction, with no schema attached.
pub fn unstructured_system_prompt() -> String {
    String::from(UNSTRUCTURED_INSTRUCTION)
}
