use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnknownAlgorithm,
    InvalidCommand,
    InvalidConfig,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sorting algorithm '{name}'")]
pub struct ParseMethodError {
    pub name: String,
}

impl ParseMethodError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<ParseMethodError> for ApiError {
    fn from(value: ParseMethodError) -> Self {
        Self::new(ErrorCode::UnknownAlgorithm, value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("command '{verb}' expects an argument")]
    MissingArgument { verb: &'static str },
    #[error("invalid speed '{0}'")]
    InvalidSpeed(String),
    #[error(transparent)]
    Method(#[from] ParseMethodError),
    #[error("malformed JSON command: {0}")]
    Json(String),
}

impl From<CommandParseError> for ApiError {
    fn from(value: CommandParseError) -> Self {
        let code = match &value {
            CommandParseError::Method(_) => ErrorCode::UnknownAlgorithm,
            _ => ErrorCode::InvalidCommand,
        };
        Self::new(code, value.to_string())
    }
}
