pub mod assistant;
pub mod cards;
pub mod config;
pub mod script;
pub mod speech;
pub mod state;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EtLightError {
    #[error("Speech recognition error: {0}")]
    SpeechError(String),

    #[error("Speech recognition is not available on this device")]
    SpeechUnavailable,

    #[error("Assistant error: {0}")]
    AssistantError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session script error: {0}")]
    ScriptError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for EtLightError {
    fn from(e: std::io::Error) -> Self {
        EtLightError::IOError(e.to_string())
    }
}

impl EtLightError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The session keeps running without voice input
            EtLightError::SpeechError(_) => true,
            EtLightError::SpeechUnavailable => true,
            // A failed ask can simply be retried
            EtLightError::AssistantError(_) => true,
            // Channel errors mean a worker died
            EtLightError::ChannelError(_) => false,
            EtLightError::ConfigError(_) => false,
            EtLightError::ScriptError(_) => false,
            EtLightError::IOError(_) => false,
        }
    }

    /// Get a user-facing description, in the product's language
    pub fn user_message(&self) -> String {
        match self {
            EtLightError::SpeechError(_) => "語音辨識出錯，請再試一次。".to_string(),
            EtLightError::SpeechUnavailable => speech::UNSUPPORTED_NOTICE.to_string(),
            EtLightError::AssistantError(_) => "Net仔暫時答唔到你，請再試一次。".to_string(),
            EtLightError::ChannelError(_) => "內部通訊出錯，請重新開啟應用程式。".to_string(),
            EtLightError::ConfigError(_) => "設定檔有問題，請檢查設定。".to_string(),
            EtLightError::ScriptError(_) => "測試腳本有問題，請檢查腳本檔案。".to_string(),
            EtLightError::IOError(_) => "檔案系統出錯。".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtLightError>;
