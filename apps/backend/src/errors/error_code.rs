//! Error codes carried in `ERROR` envelopes and HTTP problem details.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE on the wire.

use core::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Envelope handling
    /// Frame was not a JSON `{ event, payload }` envelope
    MalformedEnvelope,
    /// Event name not recognised
    UnknownEvent,
    /// Payload missing required fields or of the wrong shape
    InvalidPayload,
    /// Binary frames are not part of the protocol
    BinaryNotSupported,

    // Matchmaking
    /// Connection already waiting in the queue
    AlreadyQueued,
    /// Connection already seated in a session
    AlreadyInSession,
    /// Connection is not seated in the referenced session
    NotInSession,
    /// Session id unknown or already closed
    SessionNotFound,

    // Gameplay
    /// Choice is not rock, paper or scissors
    InvalidChoice,
    /// No round is accepting moves
    RoundNotActive,

    // System
    /// Configuration error
    ConfigError,
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedEnvelope => "MALFORMED_ENVELOPE",
            Self::UnknownEvent => "UNKNOWN_EVENT",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::BinaryNotSupported => "BINARY_NOT_SUPPORTED",
            Self::AlreadyQueued => "ALREADY_QUEUED",
            Self::AlreadyInSession => "ALREADY_IN_SESSION",
            Self::NotInSession => "NOT_IN_SESSION",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::InvalidChoice => "INVALID_CHOICE",
            Self::RoundNotActive => "ROUND_NOT_ACTIVE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
