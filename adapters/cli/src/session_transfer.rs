#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use twin_elements_core::GameState;

const SAVE_DOMAIN: &str = "twin";
const SAVE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded session payload.
pub(crate) const SAVE_HEADER: &str = "twin:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes the session record into a single line suitable for a save file.
pub(crate) fn encode(state: &GameState) -> Result<String, SessionTransferError> {
    let json = serde_json::to_vec(state).map_err(SessionTransferError::Serialize)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SAVE_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes a session record from its single-line representation.
pub(crate) fn decode(value: &str) -> Result<GameState, SessionTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SessionTransferError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().ok_or(SessionTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(SessionTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(SessionTransferError::MissingPayload)?;

    if domain != SAVE_DOMAIN {
        return Err(SessionTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SAVE_VERSION {
        return Err(SessionTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(SessionTransferError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(SessionTransferError::InvalidPayload)
}

/// Errors that can occur while encoding or decoding saved sessions.
#[derive(Debug, Error)]
pub(crate) enum SessionTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("save file was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded session.
    #[error("save string is missing the prefix")]
    MissingPrefix,
    /// The encoded session did not contain a version segment.
    #[error("save string is missing the version")]
    MissingVersion,
    /// The encoded session did not include the payload segment.
    #[error("save string is missing the payload")]
    MissingPayload,
    /// The encoded session used an unexpected prefix segment.
    #[error("save prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded session used an unsupported version identifier.
    #[error("save version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode save payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse save payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The session record could not be serialised.
    #[error("could not serialise session: {0}")]
    Serialize(#[source] serde_json::Error),
}
