pub use crate::repository::RepositoryError;
use anyhow::Error;
use serde::*;
use std::any::Any;

pub const INTERNAL_ERROR_TYPE: &str = "internal_server_error";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub trait IServiceError: Any {
    fn error_type(&self) -> String {
        INTERNAL_ERROR_TYPE.to_string()
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Message shown to the caller. The wrapped detail never is.
    fn message(&self) -> String {
        INTERNAL_ERROR_MESSAGE.to_string()
    }
}

#[derive(Debug)]
pub struct ServiceError {
    type_id: std::any::TypeId,
    error_type: String,
    status_code: http::StatusCode,
    message: String,
    inner: Error,
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub error: String,
}

impl ServiceError {
    pub fn new<E>(err: impl IServiceError, detail: E) -> ServiceError
    where
        Error: From<E>,
    {
        ServiceError {
            type_id: err.type_id(),
            error_type: err.error_type(),
            status_code: err.status_code(),
            message: err.message(),
            inner: From::from(detail),
        }
    }

    pub fn only(err: impl IServiceError) -> ServiceError {
        ServiceError {
            type_id: err.type_id(),
            error_type: err.error_type(),
            status_code: err.status_code(),
            message: err.message(),
            inner: Error::msg("error"),
        }
    }

    pub fn status_code(&self) -> http::StatusCode {
        self.status_code
    }

    pub fn error_type(&self) -> String {
        self.error_type.clone()
    }

    pub fn detail(&self) -> String {
        format!("{:#}", self.inner)
    }

    pub fn is_error_of(&self, err: impl IServiceError) -> bool {
        self.type_id == err.type_id() && self.error_type() == err.error_type()
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code.is_server_error()
    }

    // 500のときは詳細なエラーは隠す
    pub fn to_secure_error_response(&self) -> ErrorResponse {
        if self.is_server_error() {
            ErrorResponse {
                error_type: INTERNAL_ERROR_TYPE.to_string(),
                error: INTERNAL_ERROR_MESSAGE.to_string(),
            }
        } else {
            ErrorResponse {
                error_type: self.error_type.clone(),
                error: self.message.clone(),
            }
        }
    }

    pub fn to_http_response(&self) -> axum::response::Response {
        crate::wrapper::response::json(self.status_code, &self.to_secure_error_response())
    }
}

impl axum::response::IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        if self.is_server_error() {
            log::error!("{}: {}", self.error_type, self.detail());
        } else {
            log::warn!("{}: {}", self.error_type, self.detail());
        }
        self.to_http_response()
    }
}

// anyhow::Error can be treated as ServiceError
impl IServiceError for Error {}

pub enum FutureError {
    JoinError,
}

// for tokio::task::spawn_blocking
impl IServiceError for FutureError {
    fn error_type(&self) -> String {
        match self {
            FutureError::JoinError => INTERNAL_ERROR_TYPE.to_string(),
        }
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            FutureError::JoinError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> ServiceError {
        ServiceError::new(FutureError::JoinError, err)
    }
}

// アプリ全体でよく使いそうなエラーはここで定義しても良い
// 注意: ビジネスロジックを入れないこと。また、エラーハンドリングをしたくなるような時はサボらずカスタムエラーを定義すること
pub enum GeneralError {
    InvalidRequest,
    RouteNotFound,
    MethodNotAllowed,
}

impl GeneralError {
    pub fn invalid_request<E>(detail: E) -> ServiceError
    where
        Error: From<E>,
    {
        ServiceError::new(GeneralError::InvalidRequest, detail)
    }
}

impl IServiceError for GeneralError {
    fn error_type(&self) -> String {
        use GeneralError::*;

        match self {
            InvalidRequest => "invalid_request",
            RouteNotFound => "route_not_found",
            MethodNotAllowed => "method_not_allowed",
        }
        .to_string()
    }

    fn status_code(&self) -> http::StatusCode {
        use GeneralError::*;

        match self {
            InvalidRequest => http::StatusCode::BAD_REQUEST,
            RouteNotFound => http::StatusCode::NOT_FOUND,
            MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn message(&self) -> String {
        use GeneralError::*;

        match self {
            InvalidRequest => "Invalid request",
            RouteNotFound => "Not found",
            MethodNotAllowed => "Method not allowed",
        }
        .to_string()
    }
}
