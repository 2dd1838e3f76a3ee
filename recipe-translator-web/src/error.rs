//! HTTP 错误映射

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use recipe_translator_core::error::{CoreError, ProviderError};
use recipe_translator_core::types::ErrorBody;

/// API 层错误
#[derive(Debug)]
pub enum ApiError {
    /// 业务层错误
    Core(CoreError),
    /// Request could not be decoded (bad JSON, bad query string)
    BadRequest(String),
}

impl ApiError {
    /// Message sent to the client. Internal details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Core(err) => match err {
                CoreError::MissingParameters => "Missing required parameters".to_string(),
                CoreError::UnsupportedLanguage(_) => "Unsupported target language".to_string(),
                CoreError::UnsupportedContentType(_) => "Unsupported content type".to_string(),
                CoreError::InvalidContent(_) => "Invalid content for content type".to_string(),
                CoreError::ValidationError(msg) => msg.clone(),
                CoreError::CredentialValidation(e) => e.to_string(),
                CoreError::RecipeNotFound(_) => "Recipe not found".to_string(),
                CoreError::Provider(ProviderError::ParseError { .. }) => {
                    "Failed to parse translated content".to_string()
                }
                CoreError::Provider(_) => "Translation failed".to_string(),
                CoreError::StorageError(_) | CoreError::SerializationError(_) => {
                    "Internal server error".to_string()
                }
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(err) => err.fmt(f),
            Self::BadRequest(msg) => f.write_str(msg),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_expected() {
            tracing::warn!("ApiError: {err}");
        } else {
            tracing::error!("ApiError: {err}");
        }
        Self::Core(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(err) => match err {
                CoreError::RecipeNotFound(_) => StatusCode::NOT_FOUND,
                CoreError::Provider(_)
                | CoreError::StorageError(_)
                | CoreError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CoreError::MissingParameters
                | CoreError::UnsupportedLanguage(_)
                | CoreError::UnsupportedContentType(_)
                | CoreError::InvalidContent(_)
                | CoreError::ValidationError(_)
                | CoreError::CredentialValidation(_) => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.message()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
