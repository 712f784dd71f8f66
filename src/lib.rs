use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::future::Future;

pub mod client;
pub mod config;
pub mod error;
pub mod interpret;
pub mod logging;
pub mod prompt;
pub mod record;

pub use client::{CompletionClient, GenerateMessageOptionsBuilder, ReqwestTransport, Transport};
pub use config::{ClientConfig, CredentialSource, EnvCredentials, StaticCredentials};
pub use error::{ChatError, Error, Result};
pub use record::{EventSummary, SpeakerContact, TalkDatum};

pub const OPENROUTER_API_KEY_NAME: &str = "OPENROUTER_API_KEY";
pub const OPENROUTER_MODEL_NAME: &str = "OPENROUTER_MODEL";
pub const OPENROUTER_API_BASE: &str = "openrouter.ai/api/v1";
pub const OPENROUTER_API_CHAT_ENDPOINT: &str = "/chat/completions";
pub const OPENROUTER_DEFAULT_MODEL: &str = "openai/gpt-4o";

pub trait Model {
    /// Free-text answer to `instruction` applied to `text`, with no validation.
    fn generate_text(
        &self,
        instruction: String,
        text: String,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Extracts a `T` from `text`, constraining the model to `T`'s JSON schema.
    fn parse<T>(&self, text: String) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + JsonSchema + Send;
}

impl<X: Transport> Model for CompletionClient<X> {
    async fn generate_text(&self, instruction: String, text: String) -> Result<String> {
        let options = GenerateMessageOptionsBuilder::new().force_json(false).build();
        self.complete(&instruction, &text, options).await
    }

    async fn parse<T>(&self, text: String) -> Result<T>
    where
        T: DeserializeOwned + JsonSchema + Send,
    {
        let system_prompt = prompt::structured_system_prompt::<T>();
        let options = GenerateMessageOptionsBuilder::new().force_json(true).build();
        let raw = self.complete(&system_prompt, &text, options).await?;
        interpret::interpret::<T>(&raw)
    }
}

/// Extracts an [`EventSummary`] from an announcement.
pub async fn extract_event_summary<M: Model>(model: &M, announcement: &str) -> Result<EventSummary> {
    model.parse::<EventSummary>(String::from(announcement)).await
}

/// Asks for event details as free text; the answer is returned unvalidated.
pub async fn extract_event_text<M: Model>(model: &M, announcement: &str) -> Result<String> {
    model
        .generate_text(prompt::unstructured_system_prompt(), String::from(announcement))
        .await
}
