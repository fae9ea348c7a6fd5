use std::fmt;
use thiserror::Error;

/// 產生錯誤的查詢階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ip,
    Coordinates,
    FlyOverTimes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ip => "IP",
            Stage::Coordinates => "coordinates",
            Stage::FlyOverTimes => "flyover times",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    RemoteService,
    MalformedResponse,
    Configuration,
}

#[derive(Error, Debug)]
pub enum SpotterError {
    #[error("Network error when fetching {stage}: {source}")]
    NetworkError {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Status Code {status} when fetching {stage}. Response: {body}")]
    RemoteServiceError {
        stage: Stage,
        status: u16,
        body: String,
    },

    #[error("Malformed response when fetching {stage}: {message}")]
    MalformedResponseError { stage: Stage, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SpotterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpotterError::NetworkError { .. } => ErrorCategory::Network,
            SpotterError::RemoteServiceError { .. } => ErrorCategory::RemoteService,
            SpotterError::MalformedResponseError { .. } => ErrorCategory::MalformedResponse,
            SpotterError::IoError(_)
            | SpotterError::ConfigError { .. }
            | SpotterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// The resolver stage that produced this error, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SpotterError::NetworkError { stage, .. }
            | SpotterError::RemoteServiceError { stage, .. }
            | SpotterError::MalformedResponseError { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SpotterError::RemoteServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SpotterError::NetworkError { stage, .. } => {
                format!("Could not reach the service for {stage}. Are you online?")
            }
            SpotterError::RemoteServiceError { stage, status, .. } => {
                format!("The service for {stage} answered with status {status}")
            }
            SpotterError::MalformedResponseError { stage, .. } => {
                format!("The service for {stage} returned an unexpected payload")
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::RemoteService => 3,
            ErrorCategory::MalformedResponse => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpotterError>;
