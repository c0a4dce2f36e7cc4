//! Row validation ahead of any cache interaction.

use thiserror::Error;

use crate::record::{prefix_of, InputRecord, PREFIX_LEN};

/// Why a row cannot be resolved. Logged and folded into a not-found output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("missing identifier")]
    MissingIdentifier,
    #[error("identifier has {len} characters, need at least {min}", min = PREFIX_LEN)]
    IdentifierTooShort { len: usize },
    #[error("missing handle")]
    MissingHandle,
}

/// Validate `record` and return its prefix.
pub fn validate(record: &InputRecord, requires_handle: bool) -> Result<&str, InvalidInput> {
    if record.identifier.is_empty() {
        return Err(InvalidInput::MissingIdentifier);
    }
    let prefix = prefix_of(&record.identifier).ok_or(InvalidInput::IdentifierTooShort {
        len: record.identifier.chars().count(),
    })?;
    if requires_handle
        && record
            .handle
            .as_deref()
            .map_or(true, |h| h.trim().is_empty())
    {
        return Err(InvalidInput::MissingHandle);
    }
    Ok(prefix)
}
