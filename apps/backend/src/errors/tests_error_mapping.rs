use actix_web::http::StatusCode;
use actix_web::ResponseError;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::{DomainError, ErrorCode};

#[test]
fn validation_kinds_map_to_specific_codes() {
    let cases = [
        (ValidationKind::KittySize, ErrorCode::InvalidKittySize),
        (ValidationKind::CardName, ErrorCode::InvalidCardName),
        (ValidationKind::Suit, ErrorCode::InvalidSuit),
        (ValidationKind::Bid, ErrorCode::InvalidBid),
        (ValidationKind::PlayerCount, ErrorCode::InvalidPlayerCount),
    ];
    for (kind, expected) in cases {
        let app: AppError = DomainError::validation(kind, "bad input").into();
        assert_eq!(app.code(), expected);
        assert_eq!(app.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[test]
fn unmatched_validation_falls_back_to_generic_code() {
    let app: AppError =
        DomainError::validation(ValidationKind::Other("seating".into()), "bad seating").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn not_found_kinds_map_to_specific_codes() {
    let cases = [
        (NotFoundKind::Game, ErrorCode::GameNotFound),
        (NotFoundKind::Round, ErrorCode::RoundNotFound),
        (NotFoundKind::Team, ErrorCode::TeamNotFound),
        (NotFoundKind::Player, ErrorCode::PlayerNotFound),
        (NotFoundKind::Hand, ErrorCode::HandNotFound),
        (NotFoundKind::Trick, ErrorCode::TrickNotFound),
    ];
    for (kind, expected) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code(), expected);
        assert_eq!(app.status_code(), StatusCode::NOT_FOUND);
    }
}

#[test]
fn conflict_kinds_map_to_specific_codes() {
    let cases = [
        (ConflictKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (ConflictKind::BidBelowCurrent, ErrorCode::BidBelowCurrent),
        (ConflictKind::NotBidWinner, ErrorCode::NotBidWinner),
        (ConflictKind::CardNotInHand, ErrorCode::CardNotInHand),
        (ConflictKind::DuplicateCardPlay, ErrorCode::DuplicateCardPlay),
        (ConflictKind::TeamAlreadyOnRound, ErrorCode::TeamAlreadyOnRound),
        (
            ConflictKind::PlayerAlreadyOnTeam,
            ErrorCode::PlayerAlreadyOnTeam,
        ),
        (ConflictKind::PlayerNotInRound, ErrorCode::PlayerNotInRound),
        (ConflictKind::NoTeamsForRound, ErrorCode::NoTeamsForRound),
    ];
    for (kind, expected) in cases {
        let app: AppError = DomainError::conflict(kind, "in the way").into();
        assert_eq!(app.code(), expected);
        assert_eq!(app.status_code(), StatusCode::CONFLICT);
    }
}

#[test]
fn infra_kinds_map_to_server_errors() {
    let app: AppError =
        DomainError::infra(InfraErrorKind::StoreUnavailable, "store down").into();
    assert_eq!(app.code(), ErrorCode::StoreUnavailable);
    assert_eq!(app.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let app: AppError =
        DomainError::infra(InfraErrorKind::DataCorruption, "round without teams").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn detail_text_survives_the_mapping() {
    let app: AppError = DomainError::conflict(
        ConflictKind::BidBelowCurrent,
        "Bid 21 is below current bid 25",
    )
    .into();
    assert_eq!(app.detail(), "Bid 21 is below current bid 25");
}
