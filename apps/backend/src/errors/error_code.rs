//! Error codes for the Pinochle backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Pinochle backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Kitty size outside the allowed range
    InvalidKittySize,
    /// Malformed card name
    InvalidCardName,
    /// Unknown suit
    InvalidSuit,
    /// Bid that cannot be parsed or is out of range
    InvalidBid,
    /// Unsupported number of seated players
    InvalidPlayerCount,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Round not found
    RoundNotFound,
    /// Team not found
    TeamNotFound,
    /// Player not found
    PlayerNotFound,
    /// Hand not found
    HandNotFound,
    /// Trick not found
    TrickNotFound,
    /// General not found error
    NotFound,

    // Game Rule Conflicts
    /// Operation not valid in the current phase
    PhaseMismatch,
    /// Bid does not exceed the current bid
    BidBelowCurrent,
    /// Only the bid winner may perform this action
    NotBidWinner,
    /// Card not in the player's hand
    CardNotInHand,
    /// Player already contributed a card to this trick
    DuplicateCardPlay,
    /// Team already associated with the round
    TeamAlreadyOnRound,
    /// Player already a member of the team
    PlayerAlreadyOnTeam,
    /// Player is not seated in this round
    PlayerNotInRound,
    /// Round has no associated teams
    NoTeamsForRound,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Store unavailable
    StoreUnavailable,
    /// Stored state violates an engine invariant
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidKittySize => "INVALID_KITTY_SIZE",
            Self::InvalidCardName => "INVALID_CARD_NAME",
            Self::InvalidSuit => "INVALID_SUIT",
            Self::InvalidBid => "INVALID_BID",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::HandNotFound => "HAND_NOT_FOUND",
            Self::TrickNotFound => "TRICK_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Game Rule Conflicts
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::BidBelowCurrent => "BID_BELOW_CURRENT",
            Self::NotBidWinner => "NOT_BID_WINNER",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::DuplicateCardPlay => "DUPLICATE_CARD_PLAY",
            Self::TeamAlreadyOnRound => "TEAM_ALREADY_ON_ROUND",
            Self::PlayerAlreadyOnTeam => "PLAYER_ALREADY_ON_TEAM",
            Self::PlayerNotInRound => "PLAYER_NOT_IN_ROUND",
            Self::NoTeamsForRound => "NO_TEAMS_FOR_ROUND",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
