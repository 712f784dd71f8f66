use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while extracting data from a model response.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A required setting (usually the API key) could not be resolved.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(llm_extraction::config),
        help("set the variable in your environment or in a local .env file")
    )]
    Config(String),

    /// The completion request failed before a response text was obtained.
    #[error(transparent)]
    #[diagnostic(code(llm_extraction::chat))]
    Chat(#[from] ChatError),

    /// The response text is not syntactically valid JSON.
    #[error("Model response was not valid JSON: {raw}")]
    #[diagnostic(code(llm_extraction::decode))]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response is valid JSON but does not fit the expected record shape.
    #[error("Model JSON did not match schema: {0}")]
    #[diagnostic(code(llm_extraction::schema))]
    Schema(#[source] serde_json::Error),
}

/// Failures at the HTTP layer of a chat completion request.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("ChatError: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ChatError: {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Helper to create the error raised when a credential variable is unset.
pub fn missing_credential(var: &str) -> Error {
    Error::Config(format!("{} environment variable is required", var))
}
