use thiserror::Error;

/// 服務沒有提供可用訊息時顯示給使用者的通用錯誤
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to get recommendation";

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Recommendation service returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    ServiceError {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid response from recommendation service: {message}")]
    InvalidResponseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::ApiError(_) => ErrorCategory::Network,
            AdvisorError::ServiceError { .. } | AdvisorError::InvalidResponseError { .. } => {
                ErrorCategory::Service
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::ValidationError { .. } => ErrorCategory::Input,
            AdvisorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 服務在錯誤回應中帶回的訊息；只有空字串視為沒有，空白照原樣顯示
    pub fn service_message(&self) -> Option<&str> {
        match self {
            AdvisorError::ServiceError {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// 提交失敗時要通知使用者的文字
    pub fn failure_message(&self) -> String {
        self.service_message()
            .unwrap_or(FALLBACK_FAILURE_MESSAGE)
            .to_string()
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::ApiError(_)
            | AdvisorError::ServiceError { .. }
            | AdvisorError::InvalidResponseError { .. } => self.failure_message(),
            AdvisorError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the recommendation service is reachable and try again"
            }
            ErrorCategory::Service => "Try submitting again in a moment",
            ErrorCategory::Configuration => {
                "Check --base-url, the TOML config file and ADVISOR_* environment variables"
            }
            ErrorCategory::Input => "Correct the highlighted fields and submit again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
