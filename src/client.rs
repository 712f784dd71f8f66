use crate::config::{ClientConfig, CredentialSource, EnvCredentials};
use crate::error::{missing_credential, ChatError, Result};
use crate::{OPENROUTER_API_CHAT_ENDPOINT, OPENROUTER_API_KEY_NAME};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    Assistant,
    User,
}

impl Serialize for MessageRole {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        match self {
            MessageRole::System => serializer.serialize_str("system"),
            MessageRole::Assistant => serializer.serialize_str("assistant"),
            MessageRole::User => serializer.serialize_str("user"),
        }
    }
}

impl<'de> Deserialize<'de> for MessageRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<MessageRole, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "system" => Ok(MessageRole::System),
            "assistant" => Ok(MessageRole::Assistant),
            "user" => Ok(MessageRole::User),
            _ => Err(serde::de::Error::custom("invalid role")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateMessageOptions {
    pub temperature: Option<f64>,
    pub force_json: bool,
}

pub struct GenerateMessageOptionsBuilder {
    temperature: Option<f64>,
    force_json: bool,
}

impl GenerateMessageOptionsBuilder {
    pub fn new() -> Self {
        GenerateMessageOptionsBuilder {
            temperature: None,
            force_json: false,
        }
    }

    pub fn temperature(&mut self, temperature: f64) -> &mut Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn force_json(&mut self, force_json: bool) -> &mut Self {
        self.force_json = force_json;
        self
    }

    pub fn build(&self) -> GenerateMessageOptions {
        GenerateMessageOptions {
            temperature: self.temperature,
            force_json: self.force_json,
        }
    }
}

impl Default for GenerateMessageOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON body posted to the chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestBody {
    pub model: String,
    pub messages: Vec<RequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub r#type: ResponseFormatType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatType {
    JsonObject,
    Text,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// A response holding a single assistant choice.
    pub fn with_content(content: impl Into<String>) -> Self {
        ChatResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    role: MessageRole::Assistant,
                    content: Some(content.into()),
                },
            }],
        }
    }

    /// Content of the first choice. Missing choices and null content read as "".
    pub fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// Everything a transport needs to issue one completion request.
#[derive(Clone)]
pub struct ChatRequest {
    pub url: String,
    pub api_key: String,
    pub referer: String,
    pub site_title: String,
    pub body: ChatRequestBody,
}

/// Sends a chat request and decodes the response envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ChatRequest) -> std::result::Result<ChatResponse, ChatError>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ChatRequest) -> std::result::Result<ChatResponse, ChatError> {
        let response = self
            .client
            .post(&request.url)
            .bearer_auth(&request.api_key)
            .header("HTTP-Referer", &request.referer)
            .header("X-Title", &request.site_title)
            .json(&request.body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }
        Ok(response.json::<ChatResponse>().await?)
    }
}

/// Issues system + user completion requests against one endpoint.
pub struct CompletionClient<T = ReqwestTransport> {
    config: ClientConfig,
    credentials: Box<dyn CredentialSource>,
    transport: T,
}

impl CompletionClient<ReqwestTransport> {
    /// Client reading `OPENROUTER_API_KEY` from the environment at request time.
    pub fn new(config: ClientConfig) -> Self {
        CompletionClient::with_transport(
            config,
            EnvCredentials::new(OPENROUTER_API_KEY_NAME),
            ReqwestTransport::new(),
        )
    }
}

impl<T: Transport> CompletionClient<T> {
    pub fn with_transport(
        config: ClientConfig,
        credentials: impl CredentialSource + 'static,
        transport: T,
    ) -> Self {
        CompletionClient {
            config,
            credentials: Box::new(credentials),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the first choice's text for a system + user exchange.
    ///
    /// The text is returned untouched; it may be empty.
    pub async fn complete(
        &self,
        system_prompt: &str,
        text: &str,
        options: GenerateMessageOptions,
    ) -> Result<String> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or_else(|| missing_credential(self.credentials.name()))?;

        let response_format = if options.force_json {
            Some(ResponseFormat {
                r#type: ResponseFormatType::JsonObject,
            })
        } else {
            None
        };
        let body = ChatRequestBody {
            model: self.config.model.clone(),
            messages: vec![
                RequestMessage {
                    role: MessageRole::System,
                    content: String::from(system_prompt),
                },
                RequestMessage {
                    role: MessageRole::User,
                    content: String::from(text),
                },
            ],
            temperature: options.temperature,
            response_format,
        };
        let request = ChatRequest {
            url: format!("{}{}", self.config.base_url, OPENROUTER_API_CHAT_ENDPOINT),
            api_key,
            referer: self.config.referer.clone(),
            site_title: self.config.site_title.clone(),
            body,
        };

        info!(
            "Requesting completion from {} (json: {})",
            self.config.model, options.force_json
        );
        let response = self.transport.send(request).await?;
        let content = response.first_content();
        if content.is_empty() {
            warn!("Completion returned no content");
        } else {
            debug!("Completion returned {} bytes", content.len());
        }
        Ok(content)
    }
}
