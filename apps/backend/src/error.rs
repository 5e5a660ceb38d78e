//! Application error type and RFC 7807 response rendering.
//!
//! [`AppError`] is the single error type that crosses the HTTP boundary.
//! Domain code returns [`DomainError`]; the `From` impl below picks the
//! HTTP status and [`ErrorCode`] so handlers can simply use `?`.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::{DomainError, ErrorCode};
use crate::trace_ctx;

/// Base URL for problem type documents.
const PROBLEM_TYPE_BASE: &str = "https://pinochle.app/errors";

/// RFC 7807 problem details body.
///
/// Every error response carries this shape with content type
/// `application/problem+json`, plus an `x-trace-id` header that matches
/// the `trace_id` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Application-level error with an HTTP status and a stable error code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{detail}")]
    Validation { code: ErrorCode, detail: String },

    #[error("{detail}")]
    NotFound { code: ErrorCode, detail: String },

    #[error("{detail}")]
    Conflict { code: ErrorCode, detail: String },

    #[error("{detail}")]
    Internal { code: ErrorCode, detail: String },
}

impl AppError {
    pub fn validation(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::ConfigError,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::BadRequest,
            detail: detail.into(),
        }
    }

    /// The stable code carried by this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. }
            | Self::NotFound { code, .. }
            | Self::Conflict { code, .. }
            | Self::Internal { code, .. } => *code,
        }
    }

    /// The human-readable detail carried by this error.
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation { detail, .. }
            | Self::NotFound { detail, .. }
            | Self::Conflict { detail, .. }
            | Self::Internal { detail, .. } => detail,
        }
    }
}

/// Turns `GAME_NOT_FOUND` into `Game not found` for the problem title.
fn humanize_code(code: ErrorCode) -> String {
    let mut words = code.as_str().split('_');
    let mut title = String::new();
    if let Some(first) = words.next() {
        let lower = first.to_lowercase();
        let mut chars = lower.chars();
        if let Some(c) = chars.next() {
            title.push(c.to_ascii_uppercase());
            title.push_str(chars.as_str());
        }
    }
    for word in words {
        title.push(' ');
        title.push_str(&word.to_lowercase());
    }
    title
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::KittySize => ErrorCode::InvalidKittySize,
                    ValidationKind::CardName => ErrorCode::InvalidCardName,
                    ValidationKind::Suit => ErrorCode::InvalidSuit,
                    ValidationKind::Bid => ErrorCode::InvalidBid,
                    ValidationKind::PlayerCount => ErrorCode::InvalidPlayerCount,
                    _ => ErrorCode::ValidationError,
                };
                Self::Validation { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Round => ErrorCode::RoundNotFound,
                    NotFoundKind::Team => ErrorCode::TeamNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Hand => ErrorCode::HandNotFound,
                    NotFoundKind::Trick => ErrorCode::TrickNotFound,
                    _ => ErrorCode::NotFound,
                };
                Self::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                    ConflictKind::BidBelowCurrent => ErrorCode::BidBelowCurrent,
                    ConflictKind::NotBidWinner => ErrorCode::NotBidWinner,
                    ConflictKind::CardNotInHand => ErrorCode::CardNotInHand,
                    ConflictKind::DuplicateCardPlay => ErrorCode::DuplicateCardPlay,
                    ConflictKind::TeamAlreadyOnRound => ErrorCode::TeamAlreadyOnRound,
                    ConflictKind::PlayerAlreadyOnTeam => ErrorCode::PlayerAlreadyOnTeam,
                    ConflictKind::PlayerNotInRound => ErrorCode::PlayerNotInRound,
                    ConflictKind::NoTeamsForRound => ErrorCode::NoTeamsForRound,
                    _ => ErrorCode::Conflict,
                };
                Self::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::StoreUnavailable => ErrorCode::StoreUnavailable,
                    InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                    _ => ErrorCode::Internal,
                };
                Self::Internal { code, detail }
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            tracing::error!(
                code = code.as_str(),
                status = status.as_u16(),
                trace_id = %trace_id,
                detail = self.detail(),
                "request failed"
            );
        } else {
            tracing::warn!(
                code = code.as_str(),
                status = status.as_u16(),
                trace_id = %trace_id,
                detail = self.detail(),
                "request rejected"
            );
        }

        let body = ProblemDetails {
            type_: format!("{PROBLEM_TYPE_BASE}/{code}"),
            title: humanize_code(code),
            status: status.as_u16(),
            detail: self.detail().to_string(),
            code: code.as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        let mut response = HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(body);

        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static("x-trace-id"), value);
        }

        response
    }
}
